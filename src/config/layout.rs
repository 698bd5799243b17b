//! Display and layout configuration constants.
//!
//! Page metrics are derived from the font cell sizes at compile time, so
//! changing a font in `styles` keeps rows and headers from overlapping.

use crate::styles::BODY_FONT;

// =============================================================================
// Display Configuration
// =============================================================================

/// Panel width in pixels (2.9" tri-color, portrait: 128x296).
pub const PANEL_WIDTH: u32 = 128;

/// Panel height in pixels.
pub const PANEL_HEIGHT: u32 = 296;

// =============================================================================
// Text Jobs
// =============================================================================

/// Horizontal space reserved around standalone text (4 px each side).
pub const TEXT_SIDE_MARGIN: u32 = 8;

/// Padding added around text and images to form the partial refresh window.
pub const UPDATE_PADDING: u32 = 4;

/// Vertical gap between the two lines of a wrapped text job.
pub const TEXT_LINE_SPACING: u32 = 2;

// =============================================================================
// Page Layout
// =============================================================================

/// Gap above the title (or first component).
pub const PAGE_TOP_MARGIN: u32 = 4;

/// Space kept free at the bottom of a page. Components that would reach into it are dropped.
pub const PAGE_BOTTOM_MARGIN: u32 = 4;

/// Left and right inset for component text.
pub const PAGE_SIDE_MARGIN: u32 = 4;

/// Gap between the title text and the first rule.
pub const TITLE_RULE_GAP: u32 = 2;

/// Distance between the two rules under the title.
pub const TITLE_RULE_SPACING: u32 = 2;

/// Space between the second title rule and the first component.
pub const TITLE_BOTTOM_GAP: u32 = 4;

/// Height of a row or progress component.
pub const ROW_HEIGHT: u32 = BODY_FONT.character_size.height + 4;

/// Height of a header component.
pub const HEADER_LINE_HEIGHT: u32 = BODY_FONT.character_size.height + 4;

/// Height of a separator component. The rule sits in the middle.
pub const SEPARATOR_HEIGHT: u32 = 6;

/// Space a component needs for the engine to start drawing it.
pub const MIN_COMPONENT_HEIGHT: u32 = ROW_HEIGHT;

/// Width reserved for a progress label (6 body characters).
pub const PROGRESS_LABEL_WIDTH: u32 = BODY_FONT.character_size.width * 6;

/// Width reserved for the value text right of a progress bar (4 body characters).
pub const PROGRESS_VALUE_WIDTH: u32 = BODY_FONT.character_size.width * 4;

/// Gap between a progress bar and its neighbours.
pub const PROGRESS_BAR_GAP: u32 = 2;

/// Vertical inset of a progress bar inside its row.
pub const PROGRESS_BAR_INSET: u32 = 3;

// =============================================================================
// App Helpers
// =============================================================================

/// Characters per wrapped line when apps split long-form text into rows.
pub const WRAP_CHARS: usize = 18;

/// Components per page when apps paginate long content.
pub const ARTICLE_COMPONENTS_PER_PAGE: usize = 24;
