//! Application configuration.
//!
//! - `layout`: panel dimensions and pre-computed page layout metrics
//! - this module: render pipeline behavior (queue depth, refresh policy, force-clear timing)

pub mod layout;

use embassy_time::Duration;

// Re-export layout constants at config level for convenience
pub use layout::{PANEL_HEIGHT, PANEL_WIDTH};

// =============================================================================
// Render Pipeline
// =============================================================================

/// Maximum number of jobs waiting for the render worker.
pub const QUEUE_CAPACITY: usize = 5;

/// Whether text and image jobs may use partial refreshes after boot.
/// The tri-color panel ghosts badly with partial updates, so this starts off.
pub const ENABLE_PARTIAL_UPDATE: bool = false;

/// Text reported by `current_text()` before any text job has run.
pub const DEFAULT_TEXT: &str = "Hello API";

// =============================================================================
// Force Clear
// =============================================================================

/// Number of white/black inversion cycles in a force clear.
pub const FORCE_CLEAR_CYCLES: u32 = 4;

/// Settle time after each inversion refresh.
pub const FORCE_CLEAR_SETTLE_MS: u64 = 400;

/// Settle time after the final white refresh.
pub const FORCE_CLEAR_FINAL_SETTLE_MS: u64 = 200;

/// Force clear sequence timing, overridable per worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ForceClearTiming {
    /// Number of white/black cycles.
    pub cycles: u32,
    /// Delay after every inversion refresh.
    pub settle: Duration,
    /// Delay after the closing white refresh.
    pub final_settle: Duration,
}

impl ForceClearTiming {
    /// Timing used on hardware.
    pub const fn new() -> Self {
        Self {
            cycles: FORCE_CLEAR_CYCLES,
            settle: Duration::from_millis(FORCE_CLEAR_SETTLE_MS),
            final_settle: Duration::from_millis(FORCE_CLEAR_FINAL_SETTLE_MS),
        }
    }

    /// Number of full refreshes one force clear performs.
    pub const fn refresh_count(&self) -> u32 { self.cycles * 2 + 1 }
}

impl Default for ForceClearTiming {
    fn default() -> Self { Self::new() }
}
