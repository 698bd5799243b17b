//! Shared runtime state.
//!
//! - `settings`: partial-update toggle and last text shown

pub mod settings;

pub use settings::DisplaySettings;
