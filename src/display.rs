//! Display setup for the GC9A01 240x240 round LCD.
//
// - `setup_display` brings the panel up over SPI2 through mipidsi.
// - The returned display is an embedded-graphics `DrawTarget<Color = Rgb565>`,
//   which is all the face renderer needs.

use core::fmt;

use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use esp_hal::{
    delay::Delay,
    gpio::Output,
    spi::master::{Config as SpiConfig, ConfigError, Spi},
    spi::Mode,
    time::Rate,
    Blocking,
};
use mipidsi::interface::SpiInterface;
use mipidsi::{
    models::GC9A01,
    options::{ColorInversion, ColorOrder, Orientation, Rotation},
    Builder as DisplayBuilder,
};

use crate::wiring::DisplayPins;

// Display configuration, (0,0) is top-left corner
pub const RESOLUTION: u16 = 240;

pub type DisplayType<'a> = mipidsi::Display<
    SpiInterface<'a, ExclusiveDevice<Spi<'a, Blocking>, Output<'a>, NoDelay>, Output<'a>>,
    GC9A01,
    Output<'a>,
>;

#[derive(Debug)]
pub enum DisplayError {
    Spi(ConfigError),
    ChipSelect,
    Init,
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::Spi(e) => write!(f, "LCD SPI config rejected: {:?}", e),
            DisplayError::ChipSelect => f.write_str("LCD chip select unavailable"),
            DisplayError::Init => f.write_str("GC9A01 init sequence failed"),
        }
    }
}

pub fn setup_display<'a>(
    display_pins: DisplayPins<'a>,
    display_buf: &'a mut [u8],
) -> Result<DisplayType<'a>, DisplayError> {
    let DisplayPins {
        spi2,
        spi_sck,
        spi_mosi,
        lcd_cs,
        lcd_dc,
        lcd_rst,
        mut lcd_bl,
    } = display_pins;

    // SPI @ 40 MHz, Mode 0
    let spi_cfg = SpiConfig::default()
        .with_frequency(Rate::from_hz(40_000_000))
        .with_mode(Mode::_0);

    let spi = Spi::new(spi2, spi_cfg)
        .map_err(DisplayError::Spi)?
        .with_sck(spi_sck)
        .with_mosi(spi_mosi);

    // SPI device + DisplayInterface (needs D/C and a buffer)
    let spi_dev =
        ExclusiveDevice::new(spi, lcd_cs, NoDelay).map_err(|_| DisplayError::ChipSelect)?;
    let di = SpiInterface::new(spi_dev, lcd_dc, display_buf);
    let mut delay = Delay::new();

    // Hardware reset is driven by mipidsi through the reset pin
    let display = DisplayBuilder::new(GC9A01, di)
        .display_size(RESOLUTION, RESOLUTION)
        .display_offset(0, 0)
        .orientation(Orientation::new().rotate(Rotation::Deg180))
        .invert_colors(ColorInversion::Inverted)
        .color_order(ColorOrder::Bgr)
        .reset_pin(lcd_rst)
        .init(&mut delay)
        .map_err(|_| DisplayError::Init)?;

    // backlight stays on for the life of the firmware; dropping the driver would release the pin
    lcd_bl.set_high();
    core::mem::forget(lcd_bl);
    Ok(display)
}
