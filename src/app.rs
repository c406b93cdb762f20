//! Watch face lifecycle
//!
//! Ties the face to the host: loading subscribes to minute ticks, every tick
//! marks the face dirty and a redraw only produces a frame while it is dirty.

use rand_core::RngCore;

use crate::{
    surface::DrawSurface,
    time::{ClockFormat, TimeSource},
    ui::{MosaicWatchface, WatchFace, WatchFaceState},
};

/// Face settings handed over by the host
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FaceConfig {
    pub clock_format: ClockFormat,
}

pub struct WatchFaceApp<T, R> {
    time: T,
    face: MosaicWatchface<R>,
    clock_format: ClockFormat,
    loaded: bool,
    dirty: bool,
}

impl<T, R> WatchFaceApp<T, R>
where
    T: TimeSource,
    R: RngCore,
{
    pub fn new(time: T, rng: R, config: FaceConfig) -> Self {
        Self {
            time,
            face: MosaicWatchface::new(rng),
            clock_format: config.clock_format,
            loaded: false,
            dirty: false,
        }
    }

    /// Subscribe to minute ticks and schedule the first frame
    pub fn load(&mut self) {
        if self.loaded {
            return;
        }
        self.time.subscribe_minutes();
        self.loaded = true;
        self.dirty = true;

        #[cfg(feature = "defmt")]
        defmt::info!("Watch face loaded ({})", self.clock_format);
    }

    /// Stop ticks; no frame is drawn until the next [`load`](Self::load)
    pub fn unload(&mut self) {
        if !self.loaded {
            return;
        }
        self.time.unsubscribe();
        self.loaded = false;
        self.dirty = false;

        #[cfg(feature = "defmt")]
        defmt::info!("Watch face unloaded");
    }

    /// A minute elapsed
    pub fn on_tick(&mut self) {
        if self.loaded {
            self.dirty = true;
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Whether the next [`redraw`](Self::redraw) produces a frame
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clock_format(&self) -> ClockFormat {
        self.clock_format
    }

    /// Change the display mode, redrawing if it differs from the current one
    pub fn set_clock_format(&mut self, clock_format: ClockFormat) {
        if clock_format != self.clock_format {
            self.clock_format = clock_format;
            self.on_tick();
        }
    }

    /// Render a frame onto `surface` if one is due.
    ///
    /// Returns whether a frame was drawn. A failed frame leaves the face
    /// dirty so the next redraw tries again.
    pub fn redraw<S: DrawSurface>(&mut self, surface: &mut S) -> Result<bool, S::Error> {
        if !self.dirty {
            return Ok(false);
        }

        let state = WatchFaceState {
            time: self.time.now(),
            clock_format: self.clock_format,
        };
        self.face.render(&state, surface)?;
        self.dirty = false;
        Ok(true)
    }

    pub fn time_source(&self) -> &T {
        &self.time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        color::PackedColor,
        surface::{DrawOp, OpSink},
        time::TimeSnapshot,
    };
    use core::cell::Cell;
    use embedded_graphics::{geometry::Point, primitives::Rectangle};
    use rand_core::SeedableRng;
    use rand_xoshiro::Xoroshiro128StarStar;

    // Mock clock for testing
    struct MockClock {
        time: TimeSnapshot,
        subscribed: bool,
        reads: Cell<usize>,
    }

    impl MockClock {
        fn at(hour: u8, minute: u8) -> Self {
            Self {
                time: TimeSnapshot::new(hour, minute).unwrap(),
                subscribed: false,
                reads: Cell::new(0),
            }
        }
    }

    impl TimeSource for MockClock {
        fn now(&self) -> TimeSnapshot {
            self.reads.set(self.reads.get() + 1);
            self.time
        }

        fn subscribe_minutes(&mut self) {
            self.subscribed = true;
        }

        fn unsubscribe(&mut self) {
            self.subscribed = false;
        }
    }

    fn app(
        clock: MockClock,
        clock_format: ClockFormat,
    ) -> WatchFaceApp<MockClock, Xoroshiro128StarStar> {
        WatchFaceApp::new(
            clock,
            Xoroshiro128StarStar::seed_from_u64(42),
            FaceConfig { clock_format },
        )
    }

    /// Redraw and return the filled rectangles, or `None` when nothing was drawn
    fn redraw_rects(
        app: &mut WatchFaceApp<MockClock, Xoroshiro128StarStar>,
    ) -> Option<Vec<Rectangle>> {
        let mut rects = Vec::new();
        let mut sink = OpSink(|op: DrawOp| {
            if let DrawOp::FillRect(area) = op {
                rects.push(area);
            }
        });
        let drawn = app.redraw(&mut sink).unwrap();
        drop(sink);
        drawn.then_some(rects)
    }

    #[test]
    fn test_nothing_drawn_before_load() {
        let mut app = app(MockClock::at(9, 5), ClockFormat::TwelveHour);
        app.on_tick();
        assert!(!app.is_dirty());
        assert_eq!(redraw_rects(&mut app), None);
        assert_eq!(app.time_source().reads.get(), 0);
    }

    #[test]
    fn test_load_subscribes_and_draws_once() {
        let mut app = app(MockClock::at(9, 5), ClockFormat::TwelveHour);
        app.load();
        assert!(app.is_loaded());
        assert!(app.time_source().subscribed);
        assert!(app.is_dirty());

        assert!(redraw_rects(&mut app).is_some());
        assert!(!app.is_dirty());
        assert_eq!(redraw_rects(&mut app), None);
        assert_eq!(app.time_source().reads.get(), 1);
    }

    #[test]
    fn test_tick_marks_dirty() {
        let mut app = app(MockClock::at(9, 5), ClockFormat::TwelveHour);
        app.load();
        redraw_rects(&mut app);

        app.on_tick();
        assert!(app.is_dirty());
        assert!(redraw_rects(&mut app).is_some());
        assert_eq!(app.time_source().reads.get(), 2);
    }

    #[test]
    fn test_unload_unsubscribes() {
        let mut app = app(MockClock::at(9, 5), ClockFormat::TwelveHour);
        app.load();
        app.unload();
        assert!(!app.is_loaded());
        assert!(!app.time_source().subscribed);

        app.on_tick();
        assert_eq!(redraw_rects(&mut app), None);
    }

    #[test]
    fn test_clock_format_change_redraws() {
        let mut app = app(MockClock::at(13, 30), ClockFormat::TwentyFourHour);
        app.load();
        let twenty_four = redraw_rects(&mut app).unwrap();

        app.set_clock_format(ClockFormat::TwentyFourHour);
        assert!(!app.is_dirty());

        app.set_clock_format(ClockFormat::TwelveHour);
        assert!(app.is_dirty());
        let twelve = redraw_rects(&mut app).unwrap();

        // "13" against "1", same minute square at the end
        assert_ne!(twenty_four, twelve);
        assert_eq!(twenty_four.last(), twelve.last());
    }

    #[test]
    fn test_failed_frame_stays_dirty() {
        struct Broken;

        impl DrawSurface for Broken {
            type Error = ();

            fn set_stroke_color(&mut self, _color: PackedColor) {}

            fn set_fill_color(&mut self, _color: PackedColor) {}

            fn draw_pixel(&mut self, _point: Point) -> Result<(), ()> {
                Err(())
            }

            fn fill_rect(&mut self, _area: Rectangle) -> Result<(), ()> {
                Err(())
            }

            fn draw_line(&mut self, _start: Point, _end: Point) -> Result<(), ()> {
                Err(())
            }
        }

        let mut app = app(MockClock::at(0, 0), ClockFormat::TwentyFourHour);
        app.load();
        assert_eq!(app.redraw(&mut Broken), Err(()));
        assert!(app.is_dirty());
        assert!(redraw_rects(&mut app).is_some());
    }
}
