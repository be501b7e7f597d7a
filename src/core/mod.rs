pub mod astronomy;
pub mod calendar;
pub mod config;
pub mod error;
pub mod types;

pub use astronomy::{CombinedOracle, LunarOracle, MeanSynodicMoon, SolarOracle, SunTimes};
pub use config::ClockConfig;
pub use error::{ClockError, Result};
pub use types::{GeoPosition, Instant};
