//! Low-precision sun and moon positions
//!
//! A compact set of mean-element formulas (the same family popularized by the
//! SunCalc library): good to a few arc-minutes for the sun and a degree or two
//! for the moon. Plenty for "which hour is the new moon in" and "when does the
//! sun rise", which is all the clock needs.

pub mod moon;
pub mod sun;

use std::f64::consts::PI;

use crate::core::astronomy::{LunarOracle, SolarOracle, SunTimes};
use crate::core::calendar::{julian_day, JD_J2000};
use crate::core::types::{GeoPosition, Instant};

pub use moon::{moon_illumination, MoonIllumination};
pub use sun::sun_times;

/// Degrees to radians
pub(crate) const RAD: f64 = PI / 180.0;

/// Obliquity of the ecliptic at J2000, radians
pub(crate) const OBLIQUITY: f64 = RAD * 23.4397;

/// Right ascension and declination (radians), plus distance in km where known
#[derive(Debug, Clone, Copy)]
pub struct EquatorialCoords {
    pub right_ascension: f64,
    pub declination: f64,
    pub distance_km: f64,
}

/// Days since J2000.0
pub(crate) fn days_since_j2000(at: Instant) -> f64 {
    julian_day(at) - JD_J2000
}

pub(crate) fn right_ascension(longitude: f64, latitude: f64) -> f64 {
    (longitude.sin() * OBLIQUITY.cos() - latitude.tan() * OBLIQUITY.sin()).atan2(longitude.cos())
}

pub(crate) fn declination(longitude: f64, latitude: f64) -> f64 {
    (latitude.sin() * OBLIQUITY.cos() + latitude.cos() * OBLIQUITY.sin() * longitude.sin()).asin()
}

/// Oracle backed by the mean-element formulas in this module
#[derive(Debug, Clone, Copy, Default)]
pub struct SunCalc;

impl LunarOracle for SunCalc {
    fn illumination_phase(&self, at: Instant) -> f64 {
        moon_illumination(at).phase
    }
}

impl SolarOracle for SunCalc {
    fn sun_times(&self, at: Instant, position: GeoPosition) -> SunTimes {
        sun_times(at, position)
    }
}
