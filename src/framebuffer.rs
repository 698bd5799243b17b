//! Two-plane frame buffer for the tri-color panel.
//!
//! The controller takes one bit per pixel for the ink plane and one for the
//! highlight plane, row-major and MSB first. The buffer stores exactly that
//! layout so a driver can stream the planes without conversion.
//!
//! # Clip Window
//!
//! Drawing is clipped to a window that is the full panel by default. Partial
//! refreshes narrow it to the refresh rectangle, so pixels outside the
//! rectangle keep whatever the previous frame left there.

use alloc::vec;
use alloc::vec::Vec;

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::colors::EpdColor;

/// Bytes per row of one packed plane.
#[inline]
pub const fn plane_stride(width: u32) -> usize { width.div_ceil(8) as usize }

/// Bytes in one packed plane of `width` x `height` pixels.
#[inline]
pub const fn plane_len(
    width: u32,
    height: u32,
) -> usize {
    plane_stride(width) * height as usize
}

/// Packed ink and highlight planes plus the active clip window.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    size: Size,
    black: Vec<u8>,
    red: Vec<u8>,
    clip: Rectangle,
}

impl FrameBuffer {
    /// Create an all-white buffer.
    pub fn new(size: Size) -> Self {
        let len = plane_len(size.width, size.height);
        Self {
            size,
            black: vec![0; len],
            red: vec![0; len],
            clip: Rectangle::new(Point::zero(), size),
        }
    }

    /// Packed ink plane.
    #[inline]
    pub fn black_plane(&self) -> &[u8] { &self.black }

    /// Packed highlight plane.
    #[inline]
    pub fn red_plane(&self) -> &[u8] { &self.red }

    /// Current clip window.
    #[inline]
    pub const fn clip(&self) -> Rectangle { self.clip }

    /// Restrict drawing to `area` (clamped to the buffer).
    pub fn set_clip(
        &mut self,
        area: Rectangle,
    ) {
        self.clip = area.intersection(&self.bounding_box());
    }

    /// Allow drawing anywhere on the buffer again.
    pub fn reset_clip(&mut self) { self.clip = self.bounding_box(); }

    /// Read back one pixel. Outside the buffer reads as white.
    pub fn pixel(
        &self,
        point: Point,
    ) -> EpdColor {
        let Some((idx, mask)) = self.locate(point) else {
            return EpdColor::White;
        };
        if self.red[idx] & mask != 0 {
            EpdColor::Red
        } else if self.black[idx] & mask != 0 {
            EpdColor::Black
        } else {
            EpdColor::White
        }
    }

    /// Count pixels of `color` inside `area`.
    pub fn count(
        &self,
        area: &Rectangle,
        color: EpdColor,
    ) -> usize {
        area.intersection(&self.bounding_box())
            .points()
            .filter(|&p| self.pixel(p) == color)
            .count()
    }

    /// Byte index and bit mask for a point, if it lies inside the buffer.
    #[inline]
    fn locate(
        &self,
        point: Point,
    ) -> Option<(usize, u8)> {
        if point.x < 0 || point.y < 0 || point.x >= self.size.width as i32 || point.y >= self.size.height as i32 {
            return None;
        }
        let x = point.x as usize;
        let idx = point.y as usize * plane_stride(self.size.width) + x / 8;
        Some((idx, 0x80 >> (x % 8)))
    }

    /// Set a pixel if it lies inside the clip window.
    #[inline]
    fn set_pixel(
        &mut self,
        point: Point,
        color: EpdColor,
    ) {
        if !self.clip.contains(point) {
            return;
        }
        let Some((idx, mask)) = self.locate(point) else {
            return;
        };
        match color {
            EpdColor::White => {
                self.black[idx] &= !mask;
                self.red[idx] &= !mask;
            }
            EpdColor::Black => {
                self.black[idx] |= mask;
                self.red[idx] &= !mask;
            }
            EpdColor::Red => {
                self.black[idx] &= !mask;
                self.red[idx] |= mask;
            }
        }
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size { self.size }
}

impl DrawTarget for FrameBuffer {
    type Color = EpdColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point, color);
        }
        Ok(())
    }

    fn fill_solid(
        &mut self,
        area: &Rectangle,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        let drawable_area = area.intersection(&self.clip);
        if drawable_area.size == Size::zero() {
            return Ok(());
        }
        for point in drawable_area.points() {
            self.set_pixel(point, color);
        }
        Ok(())
    }

    /// Fill the clip window, not the whole buffer.
    fn clear(
        &mut self,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        let clip = self.clip;
        self.fill_solid(&clip, color)
    }
}
