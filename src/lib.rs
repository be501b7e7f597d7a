//! Beat Clock - Holocene/lunar/beat time display

pub mod clock;
pub mod core;
pub mod ephemeris;

pub use clock::{
    convert_gregorian, read_clock, render_clock, render_now, ClockReading, LunarCache,
};
pub use core::{ClockConfig, ClockError, GeoPosition, Instant, Result};
pub use ephemeris::SunCalc;
