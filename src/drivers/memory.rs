//! In-memory panel used on the host.
//!
//! Behaves like the tri-color controller from the worker's point of view:
//! frames are drawn into a [`FrameBuffer`] and every commit is recorded
//! with the window it covered, so callers can check both the final pixels
//! and the refresh sequence that produced them.

use alloc::vec::Vec;

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use super::{EpdPanel, PanelError, RefreshWindow};
use crate::colors::EpdColor;
use crate::framebuffer::FrameBuffer;

/// Frame-buffer backed panel that records its refreshes.
pub struct MemoryPanel {
    frame: FrameBuffer,
    partial_update: bool,
    window: RefreshWindow,
    in_frame: bool,
    refreshes: Vec<RefreshWindow>,
}

impl MemoryPanel {
    /// Create a white panel without partial refresh support.
    pub fn new(size: Size) -> Self {
        Self {
            frame: FrameBuffer::new(size),
            partial_update: false,
            window: RefreshWindow::Full,
            in_frame: false,
            refreshes: Vec::new(),
        }
    }

    /// Enable or disable partial refresh support.
    pub fn with_partial_update(
        mut self,
        supported: bool,
    ) -> Self {
        self.partial_update = supported;
        self
    }

    /// Pixels as of the last draw.
    #[inline]
    pub fn frame(&self) -> &FrameBuffer { &self.frame }

    /// Every committed refresh, oldest first.
    #[inline]
    pub fn refreshes(&self) -> &[RefreshWindow] { &self.refreshes }
}

impl OriginDimensions for MemoryPanel {
    fn size(&self) -> Size { self.frame.size() }
}

impl DrawTarget for MemoryPanel {
    type Color = EpdColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.frame.draw_iter(pixels)
    }

    fn fill_solid(
        &mut self,
        area: &Rectangle,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        self.frame.fill_solid(area, color)
    }

    fn clear(
        &mut self,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        self.frame.clear(color)
    }
}

impl EpdPanel for MemoryPanel {
    fn supports_partial_update(&self) -> bool { self.partial_update }

    fn set_full_window(&mut self) {
        self.window = RefreshWindow::Full;
        self.frame.reset_clip();
    }

    fn set_partial_window(
        &mut self,
        area: Rectangle,
    ) {
        self.frame.set_clip(area);
        self.window = RefreshWindow::Partial(self.frame.clip());
    }

    fn begin_frame(&mut self) { self.in_frame = true; }

    async fn commit_frame(&mut self) -> Result<(), PanelError> {
        if !self.in_frame {
            return Err(PanelError::FrameNotStarted);
        }
        self.in_frame = false;
        self.refreshes.push(self.window);
        Ok(())
    }
}
