//! Render jobs accepted by the render service.
//!
//! A [`Job`] owns everything it needs. Producers hand it to the queue and
//! never see it again; the render worker consumes it and drops it once the
//! panel refresh has finished.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use embedded_graphics::geometry::Size;

use crate::colors::EpdColor;
use crate::framebuffer::plane_len;
use crate::pages::Page;

/// One request to change what the panel shows.
#[derive(Clone, Debug, PartialEq)]
pub enum Job {
    /// Centered text.
    Text(TextJob),
    /// Packed bitplane image.
    Image(ImageJob),
    /// Structured page.
    Page(Page),
    /// Single full-frame background fill.
    Clear,
    /// Inversion cycles that remove ghosting.
    ForceClear,
    /// Unix timestamp shown as `DD/MM/YYYY` in the accent color.
    Date(i64),
    /// Page containing only a title.
    Header(String),
}

impl Job {
    pub const fn kind(&self) -> JobKind {
        match self {
            Self::Text(_) => JobKind::Text,
            Self::Image(_) => JobKind::Image,
            Self::Page(_) => JobKind::Page,
            Self::Clear => JobKind::Clear,
            Self::ForceClear => JobKind::ForceClear,
            Self::Date(_) => JobKind::Date,
            Self::Header(_) => JobKind::Header,
        }
    }
}

/// Job variant without its payload, for logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum JobKind {
    Text,
    Image,
    Page,
    Clear,
    ForceClear,
    Date,
    Header,
}

impl JobKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Page => "page",
            Self::Clear => "clear",
            Self::ForceClear => "force-clear",
            Self::Date => "date",
            Self::Header => "header",
        }
    }
}

impl fmt::Display for JobKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text job payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextJob {
    pub text: String,
    pub color: EpdColor,
    /// Skip partial refresh even when it is available.
    pub force_full: bool,
}

// =============================================================================
// Images
// =============================================================================

/// Packed bitplane layout of an image job.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ImageFormat {
    /// One plane; set bits draw in the job color (`"bw"`).
    Mono,
    /// Ink plane followed by highlight plane (`"3c"`).
    TriColor,
}

impl ImageFormat {
    /// Number of packed planes in the buffer.
    pub const fn planes(self) -> usize {
        match self {
            Self::Mono => 1,
            Self::TriColor => 2,
        }
    }

    /// Name used by the HTTP API.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mono => "bw",
            Self::TriColor => "3c",
        }
    }
}

/// Error returned for image formats other than `bw` and `3c`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnknownFormat;

impl FromStr for ImageFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bw" => Ok(Self::Mono),
            "3c" => Ok(Self::TriColor),
            _ => Err(UnknownFormat),
        }
    }
}

/// Why an image job was abandoned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ImageError {
    /// Width or height is zero.
    EmptyImage,
    /// The image does not fit on the panel.
    TooLarge { width: u32, height: u32 },
    /// The buffer holds fewer bytes than the format needs.
    BufferTooShort { expected: usize, actual: usize },
    /// Ink and highlight planes both set a pixel in this byte of the plane.
    PlaneOverlap { offset: usize },
}

impl fmt::Display for ImageError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::EmptyImage => f.write_str("empty image"),
            Self::TooLarge { width, height } => write!(f, "{}x{} too large", width, height),
            Self::BufferTooShort { expected, actual } => write!(f, "need {} bytes, got {}", expected, actual),
            Self::PlaneOverlap { offset } => write!(f, "planes overlap at {}", offset),
        }
    }
}

/// Image job payload. `data` is row-major, MSB first, `ceil(width / 8)` bytes per row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageJob {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub format: ImageFormat,
    /// Color of set bits for [`ImageFormat::Mono`].
    pub color: EpdColor,
    /// Skip partial refresh even when it is available.
    pub force_full: bool,
}

impl ImageJob {
    /// Bytes in one plane.
    #[inline]
    pub const fn plane_len(&self) -> usize { plane_len(self.width, self.height) }

    /// Image size in pixels.
    #[inline]
    pub const fn size(&self) -> Size { Size::new(self.width, self.height) }

    /// Check the image against a panel of size `panel`.
    ///
    /// Trailing bytes past the last plane are ignored.
    pub fn validate(
        &self,
        panel: Size,
    ) -> Result<(), ImageError> {
        if self.width == 0 || self.height == 0 {
            return Err(ImageError::EmptyImage);
        }
        if self.width > panel.width || self.height > panel.height {
            return Err(ImageError::TooLarge {
                width: self.width,
                height: self.height,
            });
        }

        let plane = self.plane_len();
        let expected = plane * self.format.planes();
        if self.data.len() < expected {
            return Err(ImageError::BufferTooShort {
                expected,
                actual: self.data.len(),
            });
        }

        if self.format == ImageFormat::TriColor {
            let (black, rest) = self.data.split_at(plane);
            if let Some(offset) = black.iter().zip(&rest[..plane]).position(|(b, r)| b & r != 0) {
                return Err(ImageError::PlaneOverlap { offset });
            }
        }
        Ok(())
    }
}
