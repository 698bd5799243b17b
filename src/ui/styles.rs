//! Pre-computed static text styles.
//!
//! All page text is positioned by its top edge so layout code can advance a
//! vertical cursor by font height without baseline arithmetic. Component
//! colors vary per row, so character styles are built from the exposed font
//! constants at draw time.

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::text::{Alignment, Baseline, TextStyle, TextStyleBuilder};
use profont::{PROFONT_10_POINT, PROFONT_14_POINT, PROFONT_24_POINT};

// =============================================================================
// Text Alignment Styles
// =============================================================================

/// Left-aligned, positioned by top edge. Used for labels and headers.
pub const TOP_LEFT: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Left)
    .baseline(Baseline::Top)
    .build();

/// Right-aligned, positioned by top edge. Used for row values.
pub const TOP_RIGHT: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Right)
    .baseline(Baseline::Top)
    .build();

// =============================================================================
// Fonts
// =============================================================================

/// Large font for standalone text jobs (16x29 cells).
pub const LARGE_FONT: &MonoFont<'static> = &PROFONT_24_POINT;

/// Page title font and fallback for text jobs (10x17 cells).
pub const TITLE_FONT: &MonoFont<'static> = &PROFONT_14_POINT;

/// Body font for components (7x13 cells).
pub const BODY_FONT: &MonoFont<'static> = &PROFONT_10_POINT;

/// Text job font candidates, largest first.
pub const TEXT_FONTS: [&MonoFont<'static>; 2] = [LARGE_FONT, TITLE_FONT];

/// Page title candidates, largest first.
pub const TITLE_FONTS: [&MonoFont<'static>; 2] = [TITLE_FONT, BODY_FONT];
