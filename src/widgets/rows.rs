//! Row, progress and separator components.
//!
//! Each widget draws one component whose top edge is at `top` and returns
//! the full-width rectangle it occupies. Heights are fixed per kind so the
//! composition engine can decide whether a component fits before drawing it.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use super::header::LINE_TEXT_OFFSET;
use super::primitives::{draw_bar, draw_hrule, draw_text};
use crate::colors::{EpdColor, INK};
use crate::config::layout::{
    PAGE_SIDE_MARGIN,
    PROGRESS_BAR_GAP,
    PROGRESS_BAR_INSET,
    PROGRESS_LABEL_WIDTH,
    PROGRESS_VALUE_WIDTH,
    ROW_HEIGHT,
    SEPARATOR_HEIGHT,
};
use crate::styles::{BODY_FONT, TOP_LEFT, TOP_RIGHT};

const LABEL_X: i32 = PAGE_SIDE_MARGIN as i32;

/// Draw a label/value row. The value is right-aligned in `color`.
pub fn draw_row<D>(
    display: &mut D,
    label: &str,
    value: &str,
    color: EpdColor,
    top: i32,
) -> Rectangle
where
    D: DrawTarget<Color = EpdColor>,
{
    let width = display.bounding_box().size.width;
    let text_y = top + LINE_TEXT_OFFSET;

    draw_text(display, label, Point::new(LABEL_X, text_y), BODY_FONT, INK, TOP_LEFT);
    if !value.is_empty() {
        let value_x = width.saturating_sub(PAGE_SIDE_MARGIN) as i32;
        draw_text(display, value, Point::new(value_x, text_y), BODY_FONT, color, TOP_RIGHT);
    }
    Rectangle::new(Point::new(0, top), Size::new(width, ROW_HEIGHT))
}

/// Bar rectangle for a progress row starting at `top` on a `width` px panel.
pub fn progress_bar_area(
    width: u32,
    top: i32,
) -> Rectangle {
    let x = PAGE_SIDE_MARGIN + PROGRESS_LABEL_WIDTH + PROGRESS_BAR_GAP;
    let reserved = PAGE_SIDE_MARGIN * 2 + PROGRESS_LABEL_WIDTH + PROGRESS_VALUE_WIDTH + PROGRESS_BAR_GAP * 2;
    Rectangle::new(
        Point::new(x as i32, top + PROGRESS_BAR_INSET as i32),
        Size::new(width.saturating_sub(reserved), ROW_HEIGHT - PROGRESS_BAR_INSET * 2),
    )
}

/// Draw a progress row: label, bordered bar filled to `percent`, value text.
pub fn draw_progress<D>(
    display: &mut D,
    label: &str,
    value_text: &str,
    percent: f32,
    color: EpdColor,
    top: i32,
) -> Rectangle
where
    D: DrawTarget<Color = EpdColor>,
{
    let width = display.bounding_box().size.width;
    let text_y = top + LINE_TEXT_OFFSET;

    draw_text(display, label, Point::new(LABEL_X, text_y), BODY_FONT, INK, TOP_LEFT);
    draw_bar(display, progress_bar_area(width, top), percent, color);
    if !value_text.is_empty() {
        let value_x = width.saturating_sub(PAGE_SIDE_MARGIN) as i32;
        draw_text(display, value_text, Point::new(value_x, text_y), BODY_FONT, INK, TOP_RIGHT);
    }
    Rectangle::new(Point::new(0, top), Size::new(width, ROW_HEIGHT))
}

/// Draw a horizontal rule centered in a separator line.
pub fn draw_separator<D>(
    display: &mut D,
    top: i32,
) -> Rectangle
where
    D: DrawTarget<Color = EpdColor>,
{
    let width = display.bounding_box().size.width;
    let y = top + (SEPARATOR_HEIGHT / 2) as i32;
    let right = width.saturating_sub(PAGE_SIDE_MARGIN) as i32 - 1;
    if right >= LABEL_X {
        draw_hrule(display, y, LABEL_X, right, INK);
    }
    Rectangle::new(Point::new(0, top), Size::new(width, SEPARATOR_HEIGHT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::ACCENT;
    use crate::framebuffer::FrameBuffer;

    fn panel() -> FrameBuffer { FrameBuffer::new(Size::new(128, 40)) }

    fn right_half(area: Rectangle) -> Rectangle {
        Rectangle::new(
            Point::new(64, area.top_left.y),
            Size::new(64, area.size.height),
        )
    }

    #[test]
    fn test_row_value_in_color() {
        let mut fb = panel();
        let area = draw_row(&mut fb, "CPU", "12%", ACCENT, 0);
        assert!(fb.count(&right_half(area), ACCENT) > 0, "Value should be drawn on the right in its color");
        assert_eq!(fb.count(&right_half(area), INK), 0);
    }

    #[test]
    fn test_row_empty_value() {
        let mut fb = panel();
        let area = draw_row(&mut fb, "Milk", "", INK, 0);
        assert!(fb.count(&area, INK) > 0, "Label should be drawn");
        assert_eq!(fb.count(&right_half(area), INK), 0, "Empty value should leave the right side blank");
    }

    #[test]
    fn test_progress_fill() {
        let mut empty = panel();
        let mut full = panel();
        draw_progress(&mut empty, "Disk", "0%", 0.0, ACCENT, 0);
        draw_progress(&mut full, "Disk", "100%", 100.0, ACCENT, 0);

        let bar = progress_bar_area(128, 0);
        let inner = (bar.size.width - 2) * (bar.size.height - 2);
        assert_eq!(empty.count(&bar, ACCENT), 0);
        assert_eq!(full.count(&bar, ACCENT), inner as usize, "Full bar should fill its inner area");
    }

    #[test]
    fn test_separator_rule() {
        let mut fb = panel();
        let area = draw_separator(&mut fb, 10);
        assert_eq!(area.size.height, SEPARATOR_HEIGHT);
        let rule = Rectangle::new(Point::new(0, 10 + (SEPARATOR_HEIGHT / 2) as i32), Size::new(128, 1));
        assert_eq!(fb.count(&rule, INK), (128 - PAGE_SIDE_MARGIN * 2) as usize);
    }

    #[test]
    fn test_narrower_than_margins() {
        let mut fb = FrameBuffer::new(Size::new(2, 40));
        let row = draw_row(&mut fb, "a", "b", ACCENT, 0);
        let progress = draw_progress(&mut fb, "a", "1%", 50.0, ACCENT, row.size.height as i32);
        let separator = draw_separator(&mut fb, 30);

        assert_eq!(row.size.width, 2);
        assert_eq!(progress.size.width, 2);
        assert_eq!(fb.count(&separator, INK), 0, "No room between the margins for a rule");
    }
}
