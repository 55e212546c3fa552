//! Shared fixtures for the integration tests: an in-memory RGB565 canvas and
//! a fake PCF85063 register bus.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::rc::Rc;

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::{DrawTarget, OriginDimensions, Pixel, Point, Size},
};
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, Operation};

/// Color the canvas starts with, never used by the face.
pub const UNTOUCHED: Rgb565 = Rgb565::new(31, 0, 31);

#[derive(Clone, PartialEq, Eq)]
pub struct Canvas {
    size: Size,
    pixels: Vec<Rgb565>,
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Canvas({}x{})", self.size.width, self.size.height)
    }
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Size::new(width, height),
            pixels: vec![UNTOUCHED; (width * height) as usize],
        }
    }

    pub fn pixel(&self, x: i32, y: i32) -> Rgb565 {
        self.pixels[(y as u32 * self.size.width + x as u32) as usize]
    }

    pub fn count(&self, color: Rgb565) -> usize {
        self.pixels.iter().filter(|c| **c == color).count()
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for Canvas {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            if x >= 0 && y >= 0 && (x as u32) < self.size.width && (y as u32) < self.size.height
            {
                let idx = (y as u32 * self.size.width + x as u32) as usize;
                self.pixels[idx] = color;
            }
        }
        Ok(())
    }
}

/// A surface whose bus has gone away.
pub struct DeadSurface;

impl OriginDimensions for DeadSurface {
    fn size(&self) -> Size {
        Size::new(180, 180)
    }
}

impl DrawTarget for DeadSurface {
    type Color = Rgb565;
    type Error = &'static str;

    fn draw_iter<I>(&mut self, _pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        Err("spi write failed")
    }
}

fn bcd(v: u8) -> u8 {
    ((v / 10) << 4) | (v % 10)
}

/// PCF85063 time registers (0x04..=0x0A) behind a cloneable handle, so a test
/// can move the time forward while the driver owns the bus.
#[derive(Clone)]
pub struct RtcBus {
    regs: Rc<RefCell<[u8; 7]>>,
    // transactions left before one fails
    fail_in: Rc<Cell<Option<u32>>>,
}

impl RtcBus {
    pub fn at(hour: u8, minute: u8, second: u8) -> Self {
        let bus = Self {
            regs: Rc::new(RefCell::new([0; 7])),
            fail_in: Rc::new(Cell::new(None)),
        };
        bus.set(hour, minute, second);
        bus
    }

    pub fn set(&self, hour: u8, minute: u8, second: u8) {
        // 2025-03-01, weekday unused
        let time = [bcd(second), bcd(minute), bcd(hour)];
        *self.regs.borrow_mut() = [time[0], time[1], time[2], 0x01, 0x00, 0x03, 0x25];
    }

    /// Let `ok` more transactions through, then fail exactly one.
    pub fn glitch_after(&self, ok: u32) {
        self.fail_in.set(Some(ok));
    }

    pub fn stop_oscillator(&self) {
        self.regs.borrow_mut()[0] |= 0x80;
    }
}

impl ErrorType for RtcBus {
    type Error = ErrorKind;
}

impl I2c for RtcBus {
    fn transaction(
        &mut self,
        _address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), ErrorKind> {
        match self.fail_in.get() {
            Some(0) => {
                self.fail_in.set(None);
                return Err(ErrorKind::Bus);
            }
            Some(n) => self.fail_in.set(Some(n - 1)),
            None => {}
        }

        let mut ptr = 0usize;
        for op in operations {
            match op {
                Operation::Write(bytes) => ptr = bytes[0] as usize - 0x04,
                Operation::Read(buf) => {
                    let regs = self.regs.borrow();
                    buf.copy_from_slice(&regs[ptr..ptr + buf.len()]);
                }
            }
        }
        Ok(())
    }
}
