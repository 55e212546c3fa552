//! Sunburst watch face firmware
//! ========================================
//! needs to be run in WSL2 terminal
//! source ~/export-esp.sh
//! cargo run --release --features devkit-esp32s3-disp128
//! ========================================
//!
//! Draws the sunburst face on the GC9A01 round LCD and redraws it once a
//! minute, using the PCF85063 RTC as the wall clock.

//% CHIPS: esp32s3
//% FEATURES: esp-hal/unstable

#![no_std]
#![no_main]

// Define the application description, which is placed in a special section of the binary.
// This is used by the bootloader to verify the application.
// The macro automatically fills in the fields.
esp_bootloader_esp_idf::esp_app_desc!();

// Module imports
use sunburst_watch::{
    app::SunburstApp,
    clock::MinuteTicker,
    display::setup_display,
    rtc_pcf85063::Pcf85063,
    wiring::{init_board_pins, BoardPins},
};

use esp_backtrace as _;

// ESP-HAL imports
use esp_hal::{
    delay::Delay,
    i2c::master::{Config as I2cConfig, I2c},
    main, ram,
    time::Rate,
    Config,
};

use embedded_graphics::prelude::Dimensions;
use esp_println::println;
use log::{error, info, LevelFilter, Log, Metadata, Record};

#[ram]
static mut DISPLAY_BUF: [u8; 1024] = [0; 1024];

// How often the RTC is polled for a minute boundary
const POLL_MS: u32 = 1000;

// Forwards `log` records to the serial console
struct SerialLogger;

impl Log for SerialLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            println!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: SerialLogger = SerialLogger;

#[main]
fn main() -> ! {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }

    // Initialize peripherals
    let peripherals = esp_hal::init(Config::default());

    // one call gives you all role pins from wiring.rs
    let BoardPins { display_pins, rtc_pins } = init_board_pins(peripherals);

    // Safe because DISPLAY_BUF is only used here
    let display_buf = unsafe { &mut *core::ptr::addr_of_mut!(DISPLAY_BUF) };
    let mut display = match setup_display(display_pins, display_buf) {
        Ok(d) => d,
        Err(e) => panic!("display unavailable: {}", e),
    };

    // -------------------- RTC initialization --------------------
    let i2c_cfg = I2cConfig::default().with_frequency(Rate::from_khz(400));
    let i2c = match I2c::new(rtc_pins.i2c0, i2c_cfg) {
        Ok(i2c) => i2c.with_sda(rtc_pins.sda).with_scl(rtc_pins.scl),
        Err(e) => panic!("RTC I2C config rejected: {:?}", e),
    };
    let mut rtc = Pcf85063::new(i2c);

    // -------------------- Face start --------------------
    let mut app = SunburstApp::new();
    let started_at = match app.on_start(&mut rtc, display.bounding_box()) {
        Ok(t) => t,
        // No usable time: do not show a face with made-up hands
        Err(e) => panic!("clock unavailable: {}", e),
    };

    if let Err(e) = app.on_draw(&mut display) {
        panic!("initial draw failed: {}", e);
    }

    let mut ticker = MinuteTicker::new();
    ticker.prime(started_at);
    let delay = Delay::new();
    info!("polling RTC every {} ms", POLL_MS);

    // -------------------- Main loop --------------------
    loop {
        delay.delay_millis(POLL_MS);

        // a failed minute stays pending and is retried on the next poll
        if let Err(e) = app.poll(&mut rtc, &mut ticker, &mut display) {
            error!("{}", e);
        }
    }
}
