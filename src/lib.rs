#![cfg_attr(not(test), no_std)]

pub mod app;
pub mod clock;
pub mod face;
pub mod geometry;
pub mod rtc_pcf85063;

#[cfg(feature = "firmware")]
pub mod display;
#[cfg(feature = "firmware")]
pub mod wiring;
