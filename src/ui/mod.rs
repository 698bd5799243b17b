//! UI styling and visual constants.
//!
//! - `colors`: tri-color pixel type and semantic color aliases
//! - `styles`: pre-computed text styles and fonts

pub mod colors;
pub mod styles;
