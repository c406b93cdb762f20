//! Pixel Mosaic watch face
//!
//! A 180×180 face made of 4×4 tiles: a dithered random background, the hour as
//! blocky digits, a square marking the minute on a circle and a black grid over
//! everything. The face draws through the [`DrawSurface`] capability and reads
//! the clock through [`TimeSource`], so it runs the same on the PineTime
//! firmware and on the host.

#![cfg_attr(not(test), no_std)]

pub mod app;
pub mod color;
pub mod framebuffer;
pub mod surface;
pub mod time;
pub mod ui;

pub use app::{FaceConfig, WatchFaceApp};
pub use color::PackedColor;
pub use framebuffer::Framebuffer;
pub use surface::{DrawOp, DrawSurface, GraphicsContext, OpSink};
pub use time::{ClockFormat, TimeSnapshot, TimeSource};
pub use ui::{MosaicWatchface, WatchFace, WatchFaceState, FACE_HEIGHT, FACE_WIDTH};
