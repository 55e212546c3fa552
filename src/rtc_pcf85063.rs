// RTC driver for PCF85063A/PCF85063TP real-time clock chips.
// Datasheet: https://files.waveshare.com/wiki/common/Pcf85063atl1118-NdPQpTGE-loeW7GbZ7.pdf
//
// The chip keeps local time in BCD, 24-hour mode. The watch face only reads it.

use core::fmt;

use embedded_hal::i2c::I2c;

use crate::clock::{ClockTime, WallClock};

pub const DEFAULT_I2C_ADDR: u8 = 0x51;

// Time registers start at 0x04: sec, min, hour, day, weekday, month, year
const REG_SECONDS: u8 = 0x04;
// OS flag: oscillator stopped, time is unreliable
const SECONDS_OS_FLAG: u8 = 0x80;
// Century bit in the month register
const MONTH_CENTURY: u8 = 0x80;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DateTime {
    pub year: u16,  // full year, e.g., 2024
    pub month: u8,  // 1-12
    pub day: u8,    // 1-31
    pub hour: u8,   // 0-23
    pub minute: u8, // 0-59
    pub second: u8, // 0-59
}

impl DateTime {
    // Basic sanity check on decoded RTC time.
    pub fn is_valid(&self) -> bool {
        (2020..=2099).contains(&self.year)
            && (1..=12).contains(&self.month)
            && (1..=31).contains(&self.day)
            && self.hour < 24
            && self.minute < 60
            && self.second < 60
    }

    pub fn time(&self) -> Option<ClockTime> {
        ClockTime::new(self.hour, self.minute, self.second)
    }
}

// RTC error type
#[derive(Debug, PartialEq, Eq)]
pub enum RtcError<E> {
    Bus(E),
    /// Oscillator stopped since the time was last set (power loss).
    Unreliable,
    /// Registers decoded to an impossible date or time.
    Invalid(DateTime),
}

// Allow automatic conversion from I2C errors
impl<E> From<E> for RtcError<E> {
    fn from(e: E) -> Self {
        RtcError::Bus(e)
    }
}

impl<E: fmt::Debug> fmt::Display for RtcError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RtcError::Bus(e) => write!(f, "RTC bus error: {:?}", e),
            RtcError::Unreliable => f.write_str("RTC oscillator stopped, time not set"),
            RtcError::Invalid(dt) => write!(
                f,
                "RTC returned invalid time {:04}-{:02}-{:02} {:02}:{:02}:{:02}",
                dt.year, dt.month, dt.day, dt.hour, dt.minute, dt.second
            ),
        }
    }
}

pub struct Pcf85063<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Pcf85063<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            address: DEFAULT_I2C_ADDR,
        }
    }

    /// Read datetime. Returns (dt, os_flag) where os_flag == true means time is
    /// unreliable (power loss).
    pub fn read_datetime(&mut self) -> Result<(DateTime, bool), I2C::Error> {
        let mut buf = [0u8; 7];
        self.i2c.write_read(self.address, &[REG_SECONDS], &mut buf)?;
        let os = (buf[0] & SECONDS_OS_FLAG) != 0;
        let month_raw = buf[5];
        let year = if (month_raw & MONTH_CENTURY) != 0 {
            1900u16 + bcd_decode(buf[6]) as u16
        } else {
            2000u16 + bcd_decode(buf[6]) as u16
        };
        Ok((
            DateTime {
                year,
                month: bcd_decode(month_raw & 0x1F),
                day: bcd_decode(buf[3] & 0x3F),
                hour: bcd_decode(buf[2] & 0x3F),
                minute: bcd_decode(buf[1] & 0x7F),
                second: bcd_decode(buf[0] & 0x7F),
            },
            os,
        ))
    }
}

impl<I2C: I2c> WallClock for Pcf85063<I2C> {
    type Error = RtcError<I2C::Error>;

    fn local_time(&mut self) -> Result<ClockTime, Self::Error> {
        let (dt, os) = self.read_datetime()?;
        if os {
            return Err(RtcError::Unreliable);
        }
        if !dt.is_valid() {
            return Err(RtcError::Invalid(dt));
        }
        dt.time().ok_or(RtcError::Invalid(dt))
    }
}

// BCD decode
fn bcd_decode(v: u8) -> u8 {
    (v & 0x0F) + ((v >> 4) * 10)
}
