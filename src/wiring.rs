// This module handles board-specific pin mappings and initialization.
//! The following wiring is assumed (ESP32-S3 devkit + GC9A01 1.28" round LCD + PCF85063 RTC):
//! - LCD SCK  => GPIO10
//! - LCD MOSI => GPIO11
//! - LCD CS   => GPIO9
//! - LCD DC   => GPIO8
//! - LCD RST  => GPIO14
//! - LCD BL   => GPIO2
//! - RTC SDA  => GPIO4
//! - RTC SCL  => GPIO5
//! - GND => GND
//! - 3.3V => 3.3V
//! The RTC module carries its own I2C pull-ups and backup cell.

use esp_hal::gpio::{Level, Output, OutputConfig};
use esp_hal::peripherals::{Peripherals, GPIO10, GPIO11, GPIO4, GPIO5, I2C0, SPI2};

pub struct DisplayPins<'a> {
    pub spi2: SPI2<'a>,
    pub spi_sck: GPIO10<'a>,
    pub spi_mosi: GPIO11<'a>,
    pub lcd_cs: Output<'a>,  // GPIO9
    pub lcd_dc: Output<'a>,  // GPIO8
    pub lcd_rst: Output<'a>, // GPIO14
    pub lcd_bl: Output<'a>,  // GPIO2
}

pub struct RtcPins<'a> {
    pub i2c0: I2C0<'a>,
    pub sda: GPIO4<'a>,
    pub scl: GPIO5<'a>,
}

pub struct BoardPins<'a> {
    pub display_pins: DisplayPins<'a>,
    pub rtc_pins: RtcPins<'a>,
}

pub fn init_board_pins(p: Peripherals) -> BoardPins<'static> {
    // LCD control pins, SPI SCK/MOSI are handed over untouched
    let lcd_cs = Output::new(p.GPIO9, Level::High, OutputConfig::default());
    let lcd_dc = Output::new(p.GPIO8, Level::Low, OutputConfig::default());
    let lcd_rst = Output::new(p.GPIO14, Level::High, OutputConfig::default());
    // backlight stays off until the first frame is drawn
    let lcd_bl = Output::new(p.GPIO2, Level::Low, OutputConfig::default());

    BoardPins {
        display_pins: DisplayPins {
            spi2: p.SPI2,
            spi_sck: p.GPIO10,
            spi_mosi: p.GPIO11,
            lcd_cs,
            lcd_dc,
            lcd_rst,
            lcd_bl,
        },
        rtc_pins: RtcPins {
            i2c0: p.I2C0,
            sda: p.GPIO4,
            scl: p.GPIO5,
        },
    }
}
