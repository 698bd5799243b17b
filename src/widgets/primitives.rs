//! Low-level drawing primitives shared across widgets and screens.
//!
//! All text is positioned by its top-left (or top-right) corner. Widths come
//! from the mono font cell metrics via `TextRenderer::measure_string`, so a
//! measured string is exactly as wide as the pixels later drawn for it.

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::renderer::TextRenderer;
use embedded_graphics::text::{Baseline, Text, TextStyle};
#[allow(unused_imports)]
use micromath::F32Ext;

use crate::colors::{EpdColor, INK};

/// Rendered width of `text` in `font`.
pub fn text_width(
    text: &str,
    font: &MonoFont<'_>,
) -> u32 {
    MonoTextStyle::new(font, INK)
        .measure_string(text, Point::zero(), Baseline::Top)
        .bounding_box
        .size
        .width
}

/// First font in `fonts` (ordered largest first) that renders `text` within `max_width`.
pub fn fit_font<'a>(
    text: &str,
    fonts: &[&'a MonoFont<'a>],
    max_width: u32,
) -> Option<&'a MonoFont<'a>> {
    fonts.iter().copied().find(|font| text_width(text, font) <= max_width)
}

/// Split `text` into two lines at the space closest to its middle.
///
/// Falls back to the middle character when there is no inner space. Both
/// halves are trimmed.
pub fn split_two_lines(text: &str) -> (&str, &str) {
    let text = text.trim();
    let middle = text.len() / 2;
    let split = text
        .char_indices()
        .filter(|(_, c)| *c == ' ')
        .map(|(i, _)| i)
        .min_by_key(|&i| i.abs_diff(middle));

    match split {
        Some(i) => (text[..i].trim_end(), text[i + 1..].trim_start()),
        None => {
            let chars = text.chars().count();
            let at = text.char_indices().nth(chars / 2).map_or(text.len(), |(i, _)| i);
            text.split_at(at)
        }
    }
}

/// Draw a single line of text.
pub fn draw_text<D>(
    display: &mut D,
    text: &str,
    position: Point,
    font: &MonoFont<'_>,
    color: EpdColor,
    text_style: TextStyle,
) where
    D: DrawTarget<Color = EpdColor>,
{
    Text::with_text_style(text, position, MonoTextStyle::new(font, color), text_style)
        .draw(display)
        .ok();
}

/// Draw text twice with a 1 px horizontal offset for a bold look.
pub fn draw_bold_text<D>(
    display: &mut D,
    text: &str,
    position: Point,
    font: &MonoFont<'_>,
    color: EpdColor,
    text_style: TextStyle,
) where
    D: DrawTarget<Color = EpdColor>,
{
    draw_text(display, text, position, font, color, text_style);
    draw_text(display, text, position + Point::new(1, 0), font, color, text_style);
}

/// Draw a 1 px horizontal rule from `x0` to `x1` inclusive.
pub fn draw_hrule<D>(
    display: &mut D,
    y: i32,
    x0: i32,
    x1: i32,
    color: EpdColor,
) where
    D: DrawTarget<Color = EpdColor>,
{
    Line::new(Point::new(x0, y), Point::new(x1, y))
        .into_styled(PrimitiveStyle::with_stroke(color, 1))
        .draw(display)
        .ok();
}

/// Inner fill width of a bar `inner_width` wide at `percent` (clamped to 0-100).
pub fn bar_fill_width(
    inner_width: u32,
    percent: f32,
) -> u32 {
    if percent.is_nan() {
        return 0;
    }
    let fraction = percent.clamp(0.0, 100.0) / 100.0;
    ((inner_width as f32 * fraction).round() as u32).min(inner_width)
}

/// Draw a bordered progress bar filling `area` with the fill in `color`.
pub fn draw_bar<D>(
    display: &mut D,
    area: Rectangle,
    percent: f32,
    color: EpdColor,
) where
    D: DrawTarget<Color = EpdColor>,
{
    if area.size.width < 3 || area.size.height < 3 {
        return;
    }
    area.into_styled(PrimitiveStyle::with_stroke(INK, 1)).draw(display).ok();

    let inner_width = area.size.width - 2;
    let fill = bar_fill_width(inner_width, percent);
    if fill == 0 {
        return;
    }
    Rectangle::new(area.top_left + Point::new(1, 1), Size::new(fill, area.size.height - 2))
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(display)
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::ACCENT;
    use crate::framebuffer::FrameBuffer;
    use crate::styles::{BODY_FONT, LARGE_FONT, TEXT_FONTS, TITLE_FONT, TOP_LEFT};

    #[test]
    fn test_text_width_uses_cells() {
        let cell = BODY_FONT.character_size.width + BODY_FONT.character_spacing;
        assert_eq!(text_width("", BODY_FONT), 0);
        assert_eq!(text_width("abcd", BODY_FONT), cell * 4 - BODY_FONT.character_spacing);
    }

    #[test]
    fn test_fit_font_prefers_large() {
        let wide = text_width("Hello", LARGE_FONT);
        assert_eq!(fit_font("Hello", &TEXT_FONTS, wide).map(|f| f.character_size), Some(LARGE_FONT.character_size));
        assert_eq!(
            fit_font("Hello", &TEXT_FONTS, wide - 1).map(|f| f.character_size),
            Some(TITLE_FONT.character_size),
            "Should fall back to the smaller font"
        );
        assert!(fit_font("Hello", &TEXT_FONTS, 1).is_none());
    }

    #[test]
    fn test_split_two_lines() {
        assert_eq!(split_two_lines("Temperature outside now"), ("Temperature", "outside now"));
        assert_eq!(split_two_lines("abcdef"), ("abc", "def"), "No space should split in the middle");
    }

    #[test]
    fn test_bar_fill_width() {
        assert_eq!(bar_fill_width(50, 0.0), 0);
        assert_eq!(bar_fill_width(50, 50.0), 25);
        assert_eq!(bar_fill_width(50, 150.0), 50, "Percent should clamp at 100");
        assert_eq!(bar_fill_width(50, -5.0), 0, "Percent should clamp at 0");
        assert_eq!(bar_fill_width(50, f32::NAN), 0);
    }

    #[test]
    fn test_draw_bar_fill() {
        let mut fb = FrameBuffer::new(Size::new(40, 10));
        let area = Rectangle::new(Point::new(0, 0), Size::new(22, 6));
        draw_bar(&mut fb, area, 50.0, ACCENT);
        // Inner area is 20x4, half filled.
        assert_eq!(fb.count(&fb.bounding_box(), ACCENT), 10 * 4);
        assert_eq!(fb.count(&fb.bounding_box(), INK), 2 * 22 + 2 * 4, "Border should be drawn in ink");
    }

    #[test]
    fn test_bold_text_is_wider() {
        let mut plain = FrameBuffer::new(Size::new(64, 16));
        let mut bold = FrameBuffer::new(Size::new(64, 16));
        draw_text(&mut plain, "Hi", Point::zero(), BODY_FONT, INK, TOP_LEFT);
        draw_bold_text(&mut bold, "Hi", Point::zero(), BODY_FONT, INK, TOP_LEFT);
        assert!(bold.count(&bold.bounding_box(), INK) > plain.count(&plain.bounding_box(), INK));
    }
}
