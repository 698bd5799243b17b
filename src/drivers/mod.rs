//! Panel driver adapter interface.
//!
//! - `EpdPanel`: what the render worker needs from a physical panel driver
//! - `memory`: in-memory panel backed by a [`FrameBuffer`](crate::framebuffer::FrameBuffer)
//!
//! The worker is the only caller of these methods. A refresh cycle is
//! `set_*_window`, `begin_frame`, drawing through `DrawTarget`, then
//! `commit_frame`, which pushes the frame to the glass and waits for the
//! controller to report idle.

mod memory;

use core::fmt;

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::colors::EpdColor;

pub use memory::MemoryPanel;

/// Failure reported by a panel refresh.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelError {
    /// The controller did not leave its busy state in time.
    Busy,
    /// The bus transfer to the controller failed.
    Communication,
    /// `commit_frame` was called without `begin_frame`.
    FrameNotStarted,
}

impl fmt::Display for PanelError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Busy => f.write_str("panel busy timeout"),
            Self::Communication => f.write_str("panel bus error"),
            Self::FrameNotStarted => f.write_str("frame not started"),
        }
    }
}

/// Region pushed to the glass by one committed frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshWindow {
    /// Whole panel.
    Full,
    /// Single rectangle.
    Partial(Rectangle),
}

/// Physical e-paper panel as seen by the render worker.
#[allow(async_fn_in_trait)]
pub trait EpdPanel: DrawTarget<Color = EpdColor> + OriginDimensions {
    /// Whether the controller can refresh a sub-rectangle.
    fn supports_partial_update(&self) -> bool;

    /// Target the next frame at the whole panel.
    fn set_full_window(&mut self);

    /// Target the next frame at `area`. Drawing outside it is ignored.
    fn set_partial_window(
        &mut self,
        area: Rectangle,
    );

    /// Start a frame in the current window.
    fn begin_frame(&mut self);

    /// Push the frame to the glass and wait for the refresh to finish.
    async fn commit_frame(&mut self) -> Result<(), PanelError>;
}

/// Panel facts the render service exposes without touching the panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelInfo {
    /// Panel size in its fixed orientation.
    pub size: Size,
    /// Whether partial refresh is available.
    pub partial_update: bool,
}

impl PanelInfo {
    pub const fn new(
        width: u32,
        height: u32,
        partial_update: bool,
    ) -> Self {
        Self {
            size: Size::new(width, height),
            partial_update,
        }
    }

    /// Capture the facts of an attached panel.
    pub fn of<P: EpdPanel>(panel: &P) -> Self {
        Self {
            size: panel.size(),
            partial_update: panel.supports_partial_update(),
        }
    }
}
