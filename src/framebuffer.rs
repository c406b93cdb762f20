//! In-memory frame for the face
//!
//! One [`PackedColor`] byte per pixel keeps a whole 180×180 frame at about
//! 32 KiB, small enough to live in the nRF52832's RAM next to the executor.
//! The face is rendered here first and then pushed to the panel in one go.

use core::convert::Infallible;

use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::PixelColor,
    primitives::Rectangle,
    Pixel,
};

use crate::{
    color::PackedColor,
    ui::{FACE_HEIGHT, FACE_WIDTH},
};

const PIXEL_COUNT: usize = (FACE_WIDTH * FACE_HEIGHT) as usize;

/// Face-sized pixel buffer
pub struct Framebuffer {
    pixels: [PackedColor; PIXEL_COUNT],
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Framebuffer {
    /// Create a frame filled with black
    pub const fn new() -> Self {
        Self {
            pixels: [PackedColor::BLACK; PIXEL_COUNT],
        }
    }

    /// Color at `point`, `None` outside the face
    pub fn pixel(&self, point: Point) -> Option<PackedColor> {
        Self::index(point).map(|i| self.pixels[i])
    }

    /// All pixels, row by row from the top left corner
    pub fn pixels(&self) -> impl Iterator<Item = PackedColor> + '_ {
        self.pixels.iter().copied()
    }

    /// Copy the whole frame onto `target` with its top left corner at `origin`.
    pub fn blit<D, C>(&self, target: &mut D, origin: Point) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = C>,
        C: PixelColor + From<PackedColor>,
    {
        let area = Rectangle::new(origin, self.size());
        target.fill_contiguous(&area, self.pixels().map(C::from))
    }

    fn index(point: Point) -> Option<usize> {
        let in_bounds =
            (0..FACE_WIDTH).contains(&point.x) && (0..FACE_HEIGHT).contains(&point.y);
        in_bounds.then(|| (point.y * FACE_WIDTH + point.x) as usize)
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(FACE_WIDTH as u32, FACE_HEIGHT as u32)
    }
}

impl DrawTarget for Framebuffer {
    type Color = PackedColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        // Pixels off the face are dropped
        for Pixel(point, color) in pixels {
            if let Some(i) = Self::index(point) {
                self.pixels[i] = color;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

    /// Target that remembers every pixel it was handed
    struct RecordingTarget {
        pixels: Vec<Pixel<Rgb565>>,
    }

    impl OriginDimensions for RecordingTarget {
        fn size(&self) -> Size {
            Size::new(240, 240)
        }
    }

    impl DrawTarget for RecordingTarget {
        type Color = Rgb565;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            self.pixels.extend(pixels);
            Ok(())
        }
    }

    #[test]
    fn test_starts_black() {
        let frame = Framebuffer::new();
        assert!(frame.pixels().all(|c| c == PackedColor::BLACK));
        assert_eq!(frame.pixels().count(), PIXEL_COUNT);
    }

    #[test]
    fn test_out_of_bounds_is_ignored() {
        let mut frame = Framebuffer::new();
        frame
            .draw_iter([
                Pixel(Point::new(-1, 0), PackedColor::WHITE),
                Pixel(Point::new(180, 10), PackedColor::WHITE),
                Pixel(Point::new(10, 180), PackedColor::WHITE),
                Pixel(Point::new(179, 179), PackedColor::WHITE),
            ])
            .unwrap();

        assert_eq!(frame.pixel(Point::new(-1, 0)), None);
        assert_eq!(frame.pixel(Point::new(180, 10)), None);
        assert_eq!(frame.pixel(Point::new(179, 179)), Some(PackedColor::WHITE));
        assert_eq!(
            frame.pixels().filter(|&c| c == PackedColor::WHITE).count(),
            1
        );
    }

    #[test]
    fn test_blit_offsets_and_converts() {
        let mut frame = Framebuffer::new();
        frame
            .draw_iter([Pixel(Point::new(2, 1), PackedColor::WHITE)])
            .unwrap();

        let mut target = RecordingTarget { pixels: Vec::new() };
        frame.blit(&mut target, Point::new(30, 30)).unwrap();

        assert_eq!(target.pixels.len(), PIXEL_COUNT);
        assert_eq!(target.pixels[0], Pixel(Point::new(30, 30), Rgb565::BLACK));
        let white: Vec<_> = target
            .pixels
            .iter()
            .filter(|p| p.1 == Rgb565::WHITE)
            .collect();
        assert_eq!(white, [&Pixel(Point::new(32, 31), Rgb565::WHITE)]);
    }
}
