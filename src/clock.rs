//! Wall-clock sampling for the watch face.
//!
//! This module provides:
//! - `ClockTime`, a validated hour/minute/second triple
//! - The `WallClock` trait, implemented by whatever supplies local time (RTC, host OS, tests)
//! - `refresh_time`, which samples a clock and overwrites the shared time slot
//! - `MinuteTicker`, which turns polled samples into minute-boundary notifications

use core::fmt;

/// Time of day as read from the wall clock. Always in range once constructed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ClockTime {
    hour: u8,   // 0-23
    minute: u8, // 0-59
    second: u8, // 0-59
}

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime {
        hour: 0,
        minute: 0,
        second: 0,
    };

    /// Returns `None` if any field is out of range.
    pub const fn new(hour: u8, minute: u8, second: u8) -> Option<Self> {
        if hour < 24 && minute < 60 && second < 60 {
            Some(Self {
                hour,
                minute,
                second,
            })
        } else {
            None
        }
    }

    pub const fn hour(&self) -> u8 {
        self.hour
    }

    pub const fn minute(&self) -> u8 {
        self.minute
    }

    pub const fn second(&self) -> u8 {
        self.second
    }

    // 14:xx is 2:xx on an analog dial
    pub const fn hour12(&self) -> u8 {
        self.hour % 12
    }
}

impl Default for ClockTime {
    fn default() -> Self {
        Self::MIDNIGHT
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// Source of local wall-clock time.
pub trait WallClock {
    type Error: fmt::Debug;

    /// Read the current local time once.
    fn local_time(&mut self) -> Result<ClockTime, Self::Error>;
}

impl<C: WallClock + ?Sized> WallClock for &mut C {
    type Error = C::Error;

    fn local_time(&mut self) -> Result<ClockTime, Self::Error> {
        (**self).local_time()
    }
}

/// Sample `clock` and overwrite `slot` with the result.
///
/// The slot is only written on success, and always as a whole value.
pub fn refresh_time<C: WallClock>(
    clock: &mut C,
    slot: &mut ClockTime,
) -> Result<ClockTime, C::Error> {
    let now = clock.local_time()?;
    *slot = now;
    Ok(now)
}

/// Detects minute boundaries in a stream of polled samples.
///
/// `is_new` only looks; the minute is recorded by `commit` once the work for
/// it is done, so a failed tick or redraw is retried on the next poll.
#[derive(Debug, Default)]
pub struct MinuteTicker {
    last: Option<(u8, u8)>,
}

impl MinuteTicker {
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Seed with the time the face was started at, so the first poll in the
    /// same minute does not fire.
    pub fn prime(&mut self, time: ClockTime) {
        self.commit(time);
    }

    /// True when `time` is in a different minute than the last committed one.
    /// An unprimed ticker reports every sample as new.
    pub fn is_new(&self, time: ClockTime) -> bool {
        self.last != Some((time.hour, time.minute))
    }

    pub fn commit(&mut self, time: ClockTime) {
        self.last = Some((time.hour, time.minute));
    }
}
