//! Pixel mosaic watchface
//!
//! Four passes, each painting over the previous one:
//!
//! 1. background: every 4×4 tile gets two fresh random colors, dithered in a
//!    checkerboard over the tile's pixels
//! 2. hour: blocky white digits centered near the top
//! 3. minute: a white square on a circle around the center, snapped to the tiles
//! 4. grid: black lines along every tile edge

use embedded_graphics::{
    geometry::{Point, Size},
    primitives::Rectangle,
};
use rand_core::RngCore;

use super::{
    glyphs::{digit_cell, digit_width, GLYPH_HEIGHT},
    WatchFace, WatchFaceState, FACE_HEIGHT, FACE_WIDTH, SQUARES_PER_HEIGHT, SQUARES_PER_WIDTH,
    SQUARE_SIZE,
};
use crate::{
    color::PackedColor,
    surface::DrawSurface,
    time::{ClockFormat, TimeSnapshot},
};

/// First tile row of the hour digits
pub const HOUR_ROW_START: i32 = 11;
/// Tile column the hour is centered on
pub const HOUR_COL_MIDDLE: i32 = 22;
/// Empty tile columns between two digits
pub const HOUR_SPACING: i32 = 1;
/// Tiles per glyph cell, in both directions
pub const HOUR_THICKNESS: i32 = 3;
/// Distance of the minute marker from the face center in pixels
pub const MINUTE_RADIUS: i32 = 75;
/// Side of the minute marker in tiles
pub const MINUTE_SIZE: i32 = 5;

const TILE_COUNT: usize = (SQUARES_PER_WIDTH * SQUARES_PER_HEIGHT) as usize;

const DIGIT_COLOR: PackedColor = PackedColor::WHITE;
const GRID_COLOR: PackedColor = PackedColor::BLACK;

/// Background color for a random draw: always opaque, only the low six bits vary
pub const fn background_color(random: u32) -> PackedColor {
    PackedColor::opaque((random & 0x3F) as u8)
}

/// Pixel area of a `tiles`×`tiles` block whose top left tile is at `tile_row`, `tile_col`
fn tile_block(tile_row: i32, tile_col: i32, tiles: i32) -> Rectangle {
    Rectangle::new(
        Point::new(tile_col * SQUARE_SIZE, tile_row * SQUARE_SIZE),
        Size::new_equal((tiles * SQUARE_SIZE) as u32),
    )
}

/// Placement of the hour digits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourLayout {
    digits: [u8; 2],
    len: usize,
    /// Tile column of the first digit
    start_col: i32,
}

impl HourLayout {
    pub fn new(time: TimeSnapshot, clock_format: ClockFormat) -> Self {
        let hour = clock_format.display_hour(time.hour());
        let (digits, len) = if hour >= 10 {
            ([hour / 10, hour % 10], 2)
        } else {
            ([hour, 0], 1)
        };

        let start_col = if len == 2 {
            let total_width = i32::from(digit_width(digits[0]) + digit_width(digits[1]));
            HOUR_COL_MIDDLE - (total_width * HOUR_THICKNESS + HOUR_SPACING) / 2
        } else {
            HOUR_COL_MIDDLE - i32::from(digit_width(digits[0])) * HOUR_THICKNESS / 2
        };

        Self {
            digits,
            len,
            start_col,
        }
    }

    /// Displayed digits, most significant first
    pub fn digits(&self) -> &[u8] {
        &self.digits[..self.len]
    }

    pub fn start_col(&self) -> i32 {
        self.start_col
    }

    /// Every digit with the tile column it starts at
    pub fn digit_columns(&self) -> impl Iterator<Item = (u8, i32)> + '_ {
        self.digits().iter().scan(self.start_col, |col, &digit| {
            let start = *col;
            *col += i32::from(digit_width(digit)) * HOUR_THICKNESS + HOUR_SPACING;
            Some((digit, start))
        })
    }

    /// Pixel squares for all lit glyph cells, digit by digit, row by row
    pub fn squares(&self) -> impl Iterator<Item = Rectangle> + '_ {
        self.digit_columns().flat_map(|(digit, col)| {
            (0..GLYPH_HEIGHT).flat_map(move |row| {
                (0..usize::from(digit_width(digit)))
                    .filter(move |&c| digit_cell(digit, row, c))
                    .map(move |c| {
                        tile_block(
                            HOUR_ROW_START + row as i32 * HOUR_THICKNESS,
                            col + c as i32 * HOUR_THICKNESS,
                            HOUR_THICKNESS,
                        )
                    })
            })
        })
    }
}

/// Position of the minute square
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinuteMarker {
    unsnapped: Point,
    center: Point,
}

impl MinuteMarker {
    pub fn new(minute: u8) -> Self {
        // Minute 0 points up; y grows downwards so the angle runs clockwise
        let degrees = i32::from(minute) * 360 / 60 - 90;
        let angle = degrees as f32 * core::f32::consts::PI / 180.0;
        let radius = MINUTE_RADIUS as f32;

        let unsnapped = Point::new(
            FACE_WIDTH / 2 + (libm::cosf(angle) * radius) as i32,
            FACE_HEIGHT / 2 + (libm::sinf(angle) * radius) as i32,
        );
        let center = Point::new(
            unsnapped.x / SQUARE_SIZE * SQUARE_SIZE,
            unsnapped.y / SQUARE_SIZE * SQUARE_SIZE,
        );

        Self { unsnapped, center }
    }

    /// Point on the circle before snapping
    pub fn unsnapped(&self) -> Point {
        self.unsnapped
    }

    /// Center aligned to the tile grid
    pub fn center(&self) -> Point {
        self.center
    }

    /// Filled square in pixels
    pub fn area(&self) -> Rectangle {
        let offset = SQUARE_SIZE * (MINUTE_SIZE / 2);
        Rectangle::new(
            self.center - Point::new(offset, offset),
            Size::new_equal((MINUTE_SIZE * SQUARE_SIZE) as u32),
        )
    }
}

/// Mosaic face drawing with its own random source.
///
/// The two tile color buffers are scratch space: both are overwritten at the
/// start of every frame before anything reads them.
pub struct MosaicWatchface<R> {
    rng: R,
    /// Tile colors for pixels where `row + col` is even
    even_colors: [PackedColor; TILE_COUNT],
    /// Tile colors for pixels where `row + col` is odd
    odd_colors: [PackedColor; TILE_COUNT],
}

impl<R: RngCore> MosaicWatchface<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            even_colors: [PackedColor::BLACK; TILE_COUNT],
            odd_colors: [PackedColor::BLACK; TILE_COUNT],
        }
    }

    /// Tile colors of the last frame as `(even, odd)`, row-major
    pub fn tile_colors(&self) -> (&[PackedColor], &[PackedColor]) {
        (&self.even_colors, &self.odd_colors)
    }

    fn reroll_background(&mut self) {
        for (even, odd) in self.even_colors.iter_mut().zip(self.odd_colors.iter_mut()) {
            *even = background_color(self.rng.next_u32());
            *odd = background_color(self.rng.next_u32());
        }
    }

    fn draw_background<S: DrawSurface>(&mut self, surface: &mut S) -> Result<(), S::Error> {
        self.reroll_background();

        for r in 0..FACE_HEIGHT {
            for c in 0..FACE_WIDTH {
                let tile = ((r / SQUARE_SIZE) * SQUARES_PER_WIDTH + c / SQUARE_SIZE) as usize;
                let color = if (r + c) % 2 == 0 {
                    self.even_colors[tile]
                } else {
                    self.odd_colors[tile]
                };
                surface.set_stroke_color(color);
                surface.draw_pixel(Point::new(c, r))?;
            }
        }
        Ok(())
    }
}

fn draw_hour<S: DrawSurface>(layout: &HourLayout, surface: &mut S) -> Result<(), S::Error> {
    for square in layout.squares() {
        surface.fill_rect(square)?;
    }
    Ok(())
}

fn draw_grid<S: DrawSurface>(surface: &mut S) -> Result<(), S::Error> {
    surface.set_stroke_color(GRID_COLOR);
    for r in 0..SQUARES_PER_HEIGHT {
        let y = r * SQUARE_SIZE;
        surface.draw_line(Point::new(0, y), Point::new(FACE_WIDTH, y))?;
    }
    for c in 0..SQUARES_PER_WIDTH {
        let x = c * SQUARE_SIZE;
        surface.draw_line(Point::new(x, 0), Point::new(x, FACE_HEIGHT))?;
    }
    Ok(())
}

impl<R: RngCore> WatchFace for MosaicWatchface<R> {
    fn render<S: DrawSurface>(
        &mut self,
        state: &WatchFaceState,
        surface: &mut S,
    ) -> Result<(), S::Error> {
        let hour = HourLayout::new(state.time, state.clock_format);
        let marker = MinuteMarker::new(state.time.minute());

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "Rendering {}:{} ({})",
            state.time.hour(),
            state.time.minute(),
            state.clock_format
        );

        self.draw_background(surface)?;
        surface.set_fill_color(DIGIT_COLOR);
        draw_hour(&hour, surface)?;
        surface.fill_rect(marker.area())?;
        draw_grid(surface)
    }
}
