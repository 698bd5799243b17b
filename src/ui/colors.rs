//! Tri-color e-paper pixel type.
//!
//! The panel can only show three states per pixel, so instead of an RGB
//! format the frame buffer works with a small enum. Drawing code uses the
//! semantic aliases below rather than naming the variants directly.

use core::str::FromStr;

use embedded_graphics::pixelcolor::PixelColor;

/// One pixel on the tri-color panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum EpdColor {
    /// Unpowered paper.
    #[default]
    White = 0,
    /// Ink plane.
    Black = 1,
    /// Highlight plane.
    Red = 2,
}

impl EpdColor {
    /// Get the name used by the HTTP API.
    pub const fn name(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
            Self::Red => "red",
        }
    }

    /// Decode a value previously produced by `as u8`. Unknown values map to ink.
    pub const fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::White,
            2 => Self::Red,
            _ => Self::Black,
        }
    }
}

impl PixelColor for EpdColor {
    type Raw = ();
}

/// Error returned when a color name is not one of `white`, `black`, `red`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnknownColor;

impl FromStr for EpdColor {
    type Err = UnknownColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("white") {
            Ok(Self::White)
        } else if s.eq_ignore_ascii_case("black") {
            Ok(Self::Black)
        } else if s.eq_ignore_ascii_case("red") {
            Ok(Self::Red)
        } else {
            Err(UnknownColor)
        }
    }
}

// =============================================================================
// Semantic Colors
// =============================================================================

/// Paper color. Used for clears and partial window fills.
pub const BACKGROUND: EpdColor = EpdColor::White;

/// Default text and rule color.
pub const INK: EpdColor = EpdColor::Black;

/// Accent color for dates and highlighted values.
pub const ACCENT: EpdColor = EpdColor::Red;
