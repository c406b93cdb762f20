//! Drawing capability
//!
//! The face never touches a display directly. It issues a handful of primitive
//! operations against a [`DrawSurface`]: set the stroke or fill color, set a
//! pixel, fill a rectangle, draw a line. Whatever owns the pixels decides what
//! those operations mean.

use core::convert::Infallible;

use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::Point,
    pixelcolor::PixelColor,
    primitives::{Line, Primitive, PrimitiveStyle, Rectangle},
    Drawable, Pixel,
};

use crate::color::PackedColor;

/// Host drawing surface
pub trait DrawSurface {
    /// Error reported by the underlying drawing primitives
    type Error;

    /// Color used by [`draw_pixel`](Self::draw_pixel) and [`draw_line`](Self::draw_line)
    fn set_stroke_color(&mut self, color: PackedColor);

    /// Color used by [`fill_rect`](Self::fill_rect)
    fn set_fill_color(&mut self, color: PackedColor);

    fn draw_pixel(&mut self, point: Point) -> Result<(), Self::Error>;

    fn fill_rect(&mut self, area: Rectangle) -> Result<(), Self::Error>;

    /// Draw a one pixel wide line, both end points included
    fn draw_line(&mut self, start: Point, end: Point) -> Result<(), Self::Error>;
}

/// A single drawing operation, as seen by an [`OpSink`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOp {
    SetStrokeColor(PackedColor),
    SetFillColor(PackedColor),
    Pixel(Point),
    FillRect(Rectangle),
    Line(Point, Point),
}

/// Surface that hands every operation to a closure.
///
/// Useful for recording a frame as a sequence of [`DrawOp`]s or forwarding it
/// somewhere else.
pub struct OpSink<F>(pub F);

impl<F> DrawSurface for OpSink<F>
where
    F: FnMut(DrawOp),
{
    type Error = Infallible;

    fn set_stroke_color(&mut self, color: PackedColor) {
        (self.0)(DrawOp::SetStrokeColor(color));
    }

    fn set_fill_color(&mut self, color: PackedColor) {
        (self.0)(DrawOp::SetFillColor(color));
    }

    fn draw_pixel(&mut self, point: Point) -> Result<(), Self::Error> {
        (self.0)(DrawOp::Pixel(point));
        Ok(())
    }

    fn fill_rect(&mut self, area: Rectangle) -> Result<(), Self::Error> {
        (self.0)(DrawOp::FillRect(area));
        Ok(())
    }

    fn draw_line(&mut self, start: Point, end: Point) -> Result<(), Self::Error> {
        (self.0)(DrawOp::Line(start, end));
        Ok(())
    }
}

/// Stateful context drawing onto an embedded-graphics [`DrawTarget`].
///
/// Keeps the current stroke and fill colors and converts them to the target's
/// color type on every operation.
pub struct GraphicsContext<'a, D> {
    target: &'a mut D,
    stroke: PackedColor,
    fill: PackedColor,
}

impl<'a, D> GraphicsContext<'a, D> {
    /// Stroke starts out black, fill white
    pub fn new(target: &'a mut D) -> Self {
        Self {
            target,
            stroke: PackedColor::BLACK,
            fill: PackedColor::WHITE,
        }
    }

    pub fn stroke_color(&self) -> PackedColor {
        self.stroke
    }

    pub fn fill_color(&self) -> PackedColor {
        self.fill
    }
}

impl<D, C> DrawSurface for GraphicsContext<'_, D>
where
    D: DrawTarget<Color = C>,
    C: PixelColor + From<PackedColor>,
{
    type Error = D::Error;

    fn set_stroke_color(&mut self, color: PackedColor) {
        self.stroke = color;
    }

    fn set_fill_color(&mut self, color: PackedColor) {
        self.fill = color;
    }

    fn draw_pixel(&mut self, point: Point) -> Result<(), Self::Error> {
        Pixel(point, C::from(self.stroke)).draw(&mut *self.target)
    }

    fn fill_rect(&mut self, area: Rectangle) -> Result<(), Self::Error> {
        area.into_styled(PrimitiveStyle::with_fill(C::from(self.fill)))
            .draw(&mut *self.target)
    }

    fn draw_line(&mut self, start: Point, end: Point) -> Result<(), Self::Error> {
        Line::new(start, end)
            .into_styled(PrimitiveStyle::with_stroke(C::from(self.stroke), 1))
            .draw(&mut *self.target)
    }
}
