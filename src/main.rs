#![no_std]
#![no_main]

mod peripherals;
mod system;

// Panic handler and debugging
use defmt::unwrap;

use defmt_rtt as _;
use panic_probe as _;

// Device
use core::sync::atomic::{AtomicBool, Ordering};
use embassy_executor::Spawner;
use embassy_nrf::{
    bind_interrupts,
    gpio::{Input, Level, Output, OutputDrive, Pull},
    peripherals::SPI2,
    spim,
};
use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, signal::Signal};
use embassy_time::{Duration, Instant, Timer};
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    SPIM2_SPIS2_SPI2 => spim::InterruptHandler<SPI2>;
});

// Crate
use peripherals::{backlight::Backlight, button::Button, display::Display};
use system::{
    config::SystemConfig,
    time::{TimeManager, TimeReference},
};

// Others
use pixel_mosaic::{ClockFormat, FaceConfig, Framebuffer, GraphicsContext, WatchFaceApp};
use rand_xoshiro::{rand_core::SeedableRng, Xoroshiro128StarStar};

// Include current UTC epoch at compile time
include!(concat!(env!("OUT_DIR"), "/utc.rs"));
const TIMEZONE: i32 = 1 * 3_600;
const BACKLIGHT_LEVEL: u8 = 2;

type FaceApp = WatchFaceApp<TimeManager, Xoroshiro128StarStar>;

/// Why the face needs another look
enum Redraw {
    MinuteElapsed,
    ClockFormatChanged,
}

// Communication channels
static REDRAW: Signal<ThreadModeRawMutex, Redraw> = Signal::new();
static CLOCK_24H: AtomicBool = AtomicBool::new(true);

// Kept out of the task arena
static FRAMEBUFFER: StaticCell<Framebuffer> = StaticCell::new();
static APP: StaticCell<FaceApp> = StaticCell::new();

/// Wake up whenever the minute changes
#[embassy_executor::task(pool_size = 1)]
async fn minute_ticks(clock: TimeManager) {
    loop {
        Timer::after(clock.until_next_minute()).await;

        if TimeManager::ticks_subscribed() {
            defmt::debug!("Minute elapsed");
            REDRAW.signal(Redraw::MinuteElapsed);
        }
    }
}

/// Polls the button every 10ms, a press toggles 12/24 hour display
#[embassy_executor::task(pool_size = 1)]
async fn poll_button(mut button: Button<'static>) {
    loop {
        if button.pressed().await {
            let was_24h = CLOCK_24H.fetch_xor(true, Ordering::Relaxed);
            defmt::info!("24 hour display: {}", !was_24h);
            REDRAW.signal(Redraw::ClockFormatChanged);
        }

        // Re-schedule the timer interrupt in 10ms
        Timer::after(Duration::from_millis(10)).await;
    }
}

#[embassy_executor::task(pool_size = 1)]
async fn update_lcd(
    mut display: Display<'static, SPI2>,
    mut backlight: Backlight<'static>,
    app: &'static mut FaceApp,
    frame: &'static mut Framebuffer,
) {
    app.load();
    loop {
        app.set_clock_format(ClockFormat::from_24h_style(
            CLOCK_24H.load(Ordering::Relaxed),
        ));

        let drawn = match app.redraw(&mut GraphicsContext::new(&mut *frame)) {
            Ok(drawn) => drawn,
            Err(never) => match never {},
        };
        if drawn {
            match display.present(frame) {
                // Light up once there is something to see
                Ok(()) if backlight.brightness() == 0 => {
                    unwrap!(backlight.set(BACKLIGHT_LEVEL));
                }
                Ok(()) => {}
                // Shown again on the next minute
                Err(e) => defmt::warn!("Frame upload failed: {}", e),
            }
        }

        match REDRAW.wait().await {
            Redraw::MinuteElapsed => app.on_tick(),
            // Picked up by `set_clock_format` at the top of the loop
            Redraw::ClockFormatChanged => {}
        }
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(SystemConfig::new());
    defmt::info!("Initializing");

    // Initialize Backlight
    let backlight = unwrap!(Backlight::init(
        Output::new(p.P0_14, Level::High, OutputDrive::Standard),
        Output::new(p.P0_22, Level::High, OutputDrive::Standard),
        Output::new(p.P0_23, Level::High, OutputDrive::Standard),
        0,
    ));

    // Initialize Button
    let button = Button::init(
        Input::new(p.P0_13, Pull::None),
        Output::new(p.P0_15, Level::Low, OutputDrive::Standard),
    );

    // Initialize SPI
    let mut spim_config = spim::Config::default();
    // Use SPI at 8MHz (the fastest clock available on the nRF52832),
    // otherwise refreshing will be super slow.
    spim_config.frequency = spim::Frequency::M8;
    // SPI must be used in mode 3. Mode 0 (the default) won't work.
    spim_config.mode = spim::MODE_3;

    let spim = spim::Spim::new(p.SPI2, Irqs, p.P0_02, p.P0_04, p.P0_03, spim_config);

    // Initialize LCD
    let display = unwrap!(Display::init(
        spim,
        Output::new(p.P0_25, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_18, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_26, Level::Low, OutputDrive::Standard),
    ));

    // Initialize clock and face
    let clock = TimeManager::init(TimeReference::from_timestamp(
        UTC_EPOCH + i64::from(TIMEZONE),
    ));
    let rng = Xoroshiro128StarStar::seed_from_u64(UTC_EPOCH as u64 ^ Instant::now().as_ticks());
    let app = APP.init(WatchFaceApp::new(
        clock,
        rng,
        FaceConfig {
            clock_format: ClockFormat::from_24h_style(CLOCK_24H.load(Ordering::Relaxed)),
        },
    ));
    let frame = FRAMEBUFFER.init_with(Framebuffer::new);

    defmt::info!("Initialization finished");

    // Schedule tasks
    unwrap!(spawner.spawn(minute_ticks(clock)));
    unwrap!(spawner.spawn(poll_button(button)));
    unwrap!(spawner.spawn(update_lcd(display, backlight, app, frame)));
}
