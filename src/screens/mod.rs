//! Full-screen renderers for the non-page job kinds.
//!
//! - `text`: centered text layout with font fallback and two-line wrap
//! - `image`: packed bitplane blit
//! - `date`: timestamp formatting for date jobs

pub mod date;
pub mod image;
pub mod text;

pub use date::format_date;
pub use image::{draw_image, image_area};
pub use text::{TextLayout, padded_area};
