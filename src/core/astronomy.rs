//! Astronomical oracles - lunar phase and sunrise/sunset
//!
//! The clock never computes a full ephemeris. It asks two narrow questions:
//! "how far through its synodic cycle is the moon?" and "when does the sun
//! rise and set around this instant?". Both are traits so the clock can be
//! driven by the bundled low-precision models or by deterministic fakes.

use chrono::{DateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::core::types::{GeoPosition, Instant, MS_PER_DAY};

// ============================================================================
// Constants
// ============================================================================

/// Mean synodic month in days (new moon to new moon)
pub const SYNODIC_MONTH_DAYS: f64 = 29.53059;

/// Unix milliseconds of the new moon of 2000-01-06 18:14 UTC
pub const REFERENCE_NEW_MOON_MS: i64 = 947_182_440_000;

// ============================================================================
// Oracles
// ============================================================================

/// Lunar illumination oracle
pub trait LunarOracle {
    /// Fraction of the synodic cycle at `at`, in `[0, 1)`.
    ///
    /// 0 (and values approaching 1) mean new moon, 0.5 means full moon. This
    /// is *not* the illuminated fraction of the disc.
    fn illumination_phase(&self, at: Instant) -> f64;
}

/// Sunrise/sunset oracle
pub trait SolarOracle {
    /// Sunrise and sunset of the solar day around `at` at `position`.
    ///
    /// Either event is `None` when it does not happen (polar day or night).
    fn sun_times(&self, at: Instant, position: GeoPosition) -> SunTimes;
}

impl<T: LunarOracle + ?Sized> LunarOracle for &T {
    fn illumination_phase(&self, at: Instant) -> f64 {
        (**self).illumination_phase(at)
    }
}

impl<T: SolarOracle + ?Sized> SolarOracle for &T {
    fn sun_times(&self, at: Instant, position: GeoPosition) -> SunTimes {
        (**self).sun_times(at, position)
    }
}

/// A lunar oracle and a solar oracle used together
///
/// Lets callers mix models, e.g. [`MeanSynodicMoon`] for the moon and the
/// full solar model for sunrise/sunset.
#[derive(Debug, Clone, Copy, Default)]
pub struct CombinedOracle<L, S> {
    pub lunar: L,
    pub solar: S,
}

impl<L, S> CombinedOracle<L, S> {
    pub fn new(lunar: L, solar: S) -> Self {
        Self { lunar, solar }
    }
}

impl<L: LunarOracle, S> LunarOracle for CombinedOracle<L, S> {
    fn illumination_phase(&self, at: Instant) -> f64 {
        self.lunar.illumination_phase(at)
    }
}

impl<L, S: SolarOracle> SolarOracle for CombinedOracle<L, S> {
    fn sun_times(&self, at: Instant, position: GeoPosition) -> SunTimes {
        self.solar.sun_times(at, position)
    }
}

/// Sunrise and sunset bounding one solar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SunTimes {
    pub sunrise: Option<Instant>,
    pub sunset: Option<Instant>,
}

impl SunTimes {
    pub fn new(sunrise: Option<Instant>, sunset: Option<Instant>) -> Self {
        Self { sunrise, sunset }
    }

    /// Both events present
    pub fn both(&self) -> Option<(Instant, Instant)> {
        Some((self.sunrise?, self.sunset?))
    }
}

// ============================================================================
// MeanSynodicMoon
// ============================================================================

/// Linear lunar phase: a constant-length cycle counted from a reference new moon
///
/// Ignores the moon's orbital eccentricity, so real new moons drift up to
/// about half a day either side of its prediction.
#[derive(Debug, Clone, Copy)]
pub struct MeanSynodicMoon {
    reference: Instant,
    period_ms: i64,
}

impl MeanSynodicMoon {
    pub fn new(reference: Instant, period: TimeDelta) -> Self {
        Self {
            reference,
            period_ms: period.num_milliseconds().max(1),
        }
    }

    pub fn reference(&self) -> Instant {
        self.reference
    }

    pub fn period(&self) -> TimeDelta {
        TimeDelta::milliseconds(self.period_ms)
    }
}

impl Default for MeanSynodicMoon {
    fn default() -> Self {
        let reference = DateTime::from_timestamp_millis(REFERENCE_NEW_MOON_MS)
            .unwrap_or_default();
        let period_ms = (SYNODIC_MONTH_DAYS * MS_PER_DAY as f64).round() as i64;
        Self::new(reference, TimeDelta::milliseconds(period_ms))
    }
}

impl LunarOracle for MeanSynodicMoon {
    fn illumination_phase(&self, at: Instant) -> f64 {
        let since = at.timestamp_millis() - self.reference.timestamp_millis();
        since.rem_euclid(self.period_ms) as f64 / self.period_ms as f64
    }
}
