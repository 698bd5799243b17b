//! Centered standalone text.
//!
//! A text job uses the largest font that fits the panel width. When even
//! the smaller font is too wide the text is split into two centered lines.

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::Vec;

use crate::colors::EpdColor;
use crate::config::layout::{TEXT_LINE_SPACING, TEXT_SIDE_MARGIN, UPDATE_PADDING};
use crate::styles::{TEXT_FONTS, TITLE_FONT, TOP_LEFT};
use crate::widgets::{draw_text, fit_font, split_two_lines, text_width};

/// Font, line split and position of a text job on a given panel.
#[derive(Clone)]
pub struct TextLayout<'a> {
    lines: Vec<&'a str, 2>,
    font: &'static MonoFont<'static>,
    panel: Size,
    bounds: Rectangle,
}

impl<'a> TextLayout<'a> {
    /// Lay out `text` centered on a panel of `panel` size.
    pub fn new(
        text: &'a str,
        panel: Size,
    ) -> Self {
        let max_width = panel.width.saturating_sub(TEXT_SIDE_MARGIN);
        let mut lines: Vec<&'a str, 2> = Vec::new();

        let font = match fit_font(text, &TEXT_FONTS, max_width) {
            Some(font) => {
                lines.push(text).ok();
                font
            }
            None => {
                let (first, second) = split_two_lines(text);
                lines.push(first).ok();
                if !second.is_empty() {
                    lines.push(second).ok();
                }
                TITLE_FONT
            }
        };

        let width = lines.iter().map(|line| text_width(line, font)).max().unwrap_or(0);
        let line_height = font.character_size.height;
        let count = lines.len() as u32;
        let height = line_height * count + TEXT_LINE_SPACING * count.saturating_sub(1);

        let origin = Point::new(
            (panel.width.saturating_sub(width) / 2) as i32,
            (panel.height.saturating_sub(height) / 2) as i32,
        );

        Self {
            lines,
            font,
            panel,
            bounds: Rectangle::new(origin, Size::new(width, height)),
        }
    }

    /// Font chosen for the text.
    #[inline]
    pub const fn font(&self) -> &'static MonoFont<'static> { self.font }

    /// Lines to draw (one or two).
    #[inline]
    pub fn lines(&self) -> &[&'a str] { &self.lines }

    /// Tight bounds of the text block.
    #[inline]
    pub const fn bounds(&self) -> Rectangle { self.bounds }

    /// Partial refresh window: the bounds padded on every side, clamped to the panel.
    pub fn update_area(&self) -> Rectangle { padded_area(self.bounds, self.panel) }

    /// Draw every line horizontally centered.
    pub fn draw<D>(
        &self,
        display: &mut D,
        color: EpdColor,
    ) where
        D: DrawTarget<Color = EpdColor>,
    {
        let step = (self.font.character_size.height + TEXT_LINE_SPACING) as i32;
        for (i, line) in self.lines.iter().enumerate() {
            let x = (self.panel.width.saturating_sub(text_width(line, self.font)) / 2) as i32;
            let y = self.bounds.top_left.y + step * i as i32;
            draw_text(display, line, Point::new(x, y), self.font, color, TOP_LEFT);
        }
    }
}

/// Grow `area` by the update padding and clamp it to the panel.
pub fn padded_area(
    area: Rectangle,
    panel: Size,
) -> Rectangle {
    let pad = UPDATE_PADDING as i32;
    let padded = Rectangle::new(
        area.top_left - Point::new(pad, pad),
        area.size + Size::new(UPDATE_PADDING * 2, UPDATE_PADDING * 2),
    );
    padded.intersection(&Rectangle::new(Point::zero(), panel))
}
