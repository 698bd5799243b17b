//! Page composition engine.
//!
//! Lays a [`Page`] out top to bottom on any `DrawTarget`, taking the panel
//! size from the target's bounding box. Components are never wrapped or
//! scaled: each kind has a fixed height, and once the next component could
//! reach into the bottom margin the rest of the page is dropped.
//!
//! Composition only draws; the caller owns the refresh cycle. The same page
//! on the same cleared target always produces the same pixels.

use alloc::vec::Vec;

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::colors::{EpdColor, INK};
use crate::config::layout::{MIN_COMPONENT_HEIGHT, PAGE_BOTTOM_MARGIN, PAGE_TOP_MARGIN};
use crate::pages::{Component, Page};
use crate::widgets::{draw_page_title, draw_progress, draw_row, draw_section_header, draw_separator};

/// Where one component ended up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Index into `Page::components`.
    pub index: usize,
    /// Full-width band the component occupies.
    pub area: Rectangle,
}

/// Result of composing a page.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct PageLayout {
    /// Title block, if a title was drawn.
    pub title: Option<Rectangle>,
    /// Drawn components, in page order.
    pub placements: Vec<Placement>,
    /// Components left out because the page ran out of height.
    pub dropped: usize,
}

impl PageLayout {
    /// Number of components drawn.
    #[inline]
    pub fn drawn(&self) -> usize { self.placements.len() }

    #[inline]
    pub const fn is_truncated(&self) -> bool { self.dropped > 0 }
}

/// Draw `page` onto `display` and report what was placed.
///
/// The target is expected to be cleared already.
pub fn compose_page<D>(
    display: &mut D,
    page: &Page,
) -> PageLayout
where
    D: DrawTarget<Color = EpdColor>,
{
    let height = display.bounding_box().size.height;
    let limit = height.saturating_sub(PAGE_BOTTOM_MARGIN) as i32;
    let mut cursor = PAGE_TOP_MARGIN as i32;
    let mut layout = PageLayout::default();

    if let Some(title) = page.display_title() {
        let area = draw_page_title(display, title, cursor);
        cursor += area.size.height as i32;
        layout.title = Some(area);
    }

    for (index, component) in page.components.iter().enumerate() {
        if cursor + MIN_COMPONENT_HEIGHT as i32 > limit {
            layout.dropped = page.components.len() - index;
            break;
        }
        let area = draw_component(display, component, cursor);
        cursor += area.size.height as i32;
        layout.placements.push(Placement { index, area });
    }
    layout
}

fn draw_component<D>(
    display: &mut D,
    component: &Component,
    top: i32,
) -> Rectangle
where
    D: DrawTarget<Color = EpdColor>,
{
    match component {
        Component::Header(text) => draw_section_header(display, text, top),
        Component::Row { label, value, color } => draw_row(display, label, value, color.unwrap_or(INK), top),
        Component::Progress {
            label,
            value_text,
            percent,
            color,
        } => draw_progress(display, label, value_text, *percent, color.unwrap_or(INK), top),
        Component::Separator => draw_separator(display, top),
    }
}
