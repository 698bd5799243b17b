//! Packed bitplane image blit.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::colors::EpdColor;
use crate::framebuffer::plane_stride;
use crate::jobs::{ImageFormat, ImageJob};

/// Where a validated image lands: centered on the panel.
pub fn image_area(
    image: &ImageJob,
    panel: Size,
) -> Rectangle {
    let origin = Point::new(
        (panel.width.saturating_sub(image.width) / 2) as i32,
        (panel.height.saturating_sub(image.height) / 2) as i32,
    );
    Rectangle::new(origin, image.size())
}

/// Color of the pixel at (`x`, `y`) of the image, or `None` when neither plane sets it.
fn image_pixel(
    image: &ImageJob,
    x: u32,
    y: u32,
) -> Option<EpdColor> {
    let idx = y as usize * plane_stride(image.width) + x as usize / 8;
    let mask = 0x80u8 >> (x % 8);
    let ink = image.data.get(idx).is_some_and(|b| b & mask != 0);

    match image.format {
        ImageFormat::Mono => ink.then_some(image.color),
        ImageFormat::TriColor => {
            let highlight = image.data.get(image.plane_len() + idx).is_some_and(|b| b & mask != 0);
            if highlight {
                Some(EpdColor::Red)
            } else {
                ink.then_some(EpdColor::Black)
            }
        }
    }
}

/// Draw the set pixels of `image` with its top-left corner at `origin`.
///
/// Unset pixels are left alone, so the target should be cleared first.
pub fn draw_image<D>(
    display: &mut D,
    image: &ImageJob,
    origin: Point,
) where
    D: DrawTarget<Color = EpdColor>,
{
    let pixels = (0..image.height).flat_map(move |y| {
        (0..image.width).filter_map(move |x| {
            image_pixel(image, x, y).map(|color| Pixel(origin + Point::new(x as i32, y as i32), color))
        })
    });
    display.draw_iter(pixels).ok();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::FrameBuffer;

    const PANEL: Size = Size::new(128, 296);

    fn tricolor() -> ImageJob {
        ImageJob {
            width: 8,
            height: 2,
            // Row 0: left half ink. Row 1: right half highlight.
            data: vec![0xF0, 0x00, 0x00, 0x0F],
            format: ImageFormat::TriColor,
            color: EpdColor::Black,
            force_full: false,
        }
    }

    #[test]
    fn test_image_area_centered() {
        let area = image_area(&tricolor(), PANEL);
        assert_eq!(area, Rectangle::new(Point::new(60, 147), Size::new(8, 2)));
    }

    #[test]
    fn test_draw_tricolor() {
        let mut fb = FrameBuffer::new(Size::new(8, 2));
        draw_image(&mut fb, &tricolor(), Point::zero());
        assert_eq!(fb.pixel(Point::new(0, 0)), EpdColor::Black);
        assert_eq!(fb.pixel(Point::new(4, 0)), EpdColor::White);
        assert_eq!(fb.pixel(Point::new(7, 1)), EpdColor::Red);
        assert_eq!(fb.count(&fb.bounding_box(), EpdColor::Black), 4);
        assert_eq!(fb.count(&fb.bounding_box(), EpdColor::Red), 4);
    }

    #[test]
    fn test_draw_mono_in_job_color() {
        let image = ImageJob {
            width: 3,
            height: 1,
            data: vec![0b1010_0000],
            format: ImageFormat::Mono,
            color: EpdColor::Red,
            force_full: false,
        };
        let mut fb = FrameBuffer::new(Size::new(4, 1));
        draw_image(&mut fb, &image, Point::new(1, 0));
        assert_eq!(fb.pixel(Point::new(1, 0)), EpdColor::Red);
        assert_eq!(fb.pixel(Point::new(2, 0)), EpdColor::White);
        assert_eq!(fb.pixel(Point::new(3, 0)), EpdColor::Red, "Bits are read MSB first");
    }
}
