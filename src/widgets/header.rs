//! Page title block and section headers.
//!
//! The title is a bold line underlined by a double rule across the whole
//! panel. Long titles drop to the body font before they would be clipped.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use super::primitives::{draw_bold_text, draw_hrule, fit_font};
use crate::colors::{EpdColor, INK};
use crate::config::layout::{
    HEADER_LINE_HEIGHT,
    PAGE_SIDE_MARGIN,
    TITLE_BOTTOM_GAP,
    TITLE_RULE_GAP,
    TITLE_RULE_SPACING,
};
use crate::styles::{BODY_FONT, TITLE_FONTS, TOP_LEFT};

/// Vertical offset of body text inside a component line.
pub(crate) const LINE_TEXT_OFFSET: i32 = ((HEADER_LINE_HEIGHT - BODY_FONT.character_size.height) / 2) as i32;

/// Draw the page title at `top` and return the area it used, rules included.
pub fn draw_page_title<D>(
    display: &mut D,
    title: &str,
    top: i32,
) -> Rectangle
where
    D: DrawTarget<Color = EpdColor>,
{
    let width = display.bounding_box().size.width;
    // Bold text is one pixel wider than measured.
    let max_width = width.saturating_sub(PAGE_SIDE_MARGIN * 2 + 1);
    let font = fit_font(title, &TITLE_FONTS, max_width).unwrap_or(BODY_FONT);

    draw_bold_text(display, title, Point::new(PAGE_SIDE_MARGIN as i32, top), font, INK, TOP_LEFT);

    let right = width as i32 - 1;
    let first_rule = top + (font.character_size.height + TITLE_RULE_GAP) as i32;
    let second_rule = first_rule + TITLE_RULE_SPACING as i32;
    draw_hrule(display, first_rule, 0, right, INK);
    draw_hrule(display, second_rule, 0, right, INK);

    let bottom = second_rule + 1 + TITLE_BOTTOM_GAP as i32;
    Rectangle::new(Point::new(0, top), Size::new(width, (bottom - top) as u32))
}

/// Draw a bold, left-aligned section header line at `top`.
pub fn draw_section_header<D>(
    display: &mut D,
    text: &str,
    top: i32,
) -> Rectangle
where
    D: DrawTarget<Color = EpdColor>,
{
    let width = display.bounding_box().size.width;
    draw_bold_text(
        display,
        text,
        Point::new(PAGE_SIDE_MARGIN as i32, top + LINE_TEXT_OFFSET),
        BODY_FONT,
        INK,
        TOP_LEFT,
    );
    Rectangle::new(Point::new(0, top), Size::new(width, HEADER_LINE_HEIGHT))
}
