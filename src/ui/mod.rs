//! UI definitions module
//! Based on: https://github.com/lupyuen/pinetime-watchface/blob/master/src/lib.rs

use crate::{
    surface::DrawSurface,
    time::{ClockFormat, TimeSnapshot},
};

pub mod glyphs;
mod mosaic_watchface;

pub use mosaic_watchface::{
    background_color, HourLayout, MinuteMarker, MosaicWatchface, HOUR_COL_MIDDLE,
    HOUR_ROW_START, HOUR_SPACING, HOUR_THICKNESS, MINUTE_RADIUS, MINUTE_SIZE,
};

/// Face width in pixels
pub const FACE_WIDTH: i32 = 180;
/// Face height in pixels
pub const FACE_HEIGHT: i32 = 180;
/// Side of one background tile in pixels
pub const SQUARE_SIZE: i32 = 4;
pub const SQUARES_PER_WIDTH: i32 = FACE_WIDTH / SQUARE_SIZE;
pub const SQUARES_PER_HEIGHT: i32 = FACE_HEIGHT / SQUARE_SIZE;

pub trait WatchFace {
    /// Draw a complete frame for `state` onto `surface`
    fn render<S: DrawSurface>(
        &mut self,
        state: &WatchFaceState,
        surface: &mut S,
    ) -> Result<(), S::Error>;
}

/// State for the watch face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WatchFaceState {
    pub time: TimeSnapshot,
    pub clock_format: ClockFormat,
}
