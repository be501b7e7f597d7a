//! Calendar arithmetic shared by the clock components
//!
//! Holocene year numbering, floor-based day counting, and conversion between
//! Julian days and UTC instants.

use chrono::{DateTime, Datelike};

use crate::core::types::{Instant, MS_PER_DAY};

// ============================================================================
// Constants
// ============================================================================

/// Years added to the Gregorian year to get the Holocene year
pub const HOLOCENE_OFFSET: i32 = 9700;

/// Julian day of the Unix epoch (1970-01-01T00:00:00Z)
pub const JD_UNIX_EPOCH: f64 = 2_440_587.5;

/// Julian day of J2000.0
pub const JD_J2000: f64 = 2_451_545.0;

/// Days in a Julian year
pub const DAYS_PER_JULIAN_YEAR: f64 = 365.25;

// ============================================================================
// Holocene years and day counting
// ============================================================================

/// Holocene year of an instant (UTC year + 9700)
pub fn holocene_year(now: Instant) -> i32 {
    now.year() + HOLOCENE_OFFSET
}

/// Gregorian year for a Holocene year
pub fn gregorian_year(holocene_year: i32) -> i32 {
    holocene_year - HOLOCENE_OFFSET
}

/// One-based count of whole days elapsed since `anchor`.
///
/// Uses floor division, so instants before the anchor count down from 0.
pub fn days_since(now: Instant, anchor: Instant) -> i64 {
    let elapsed = now.timestamp_millis() - anchor.timestamp_millis();
    elapsed.div_euclid(MS_PER_DAY) + 1
}

// ============================================================================
// Julian days
// ============================================================================

/// Julian day (UT) of an instant
pub fn julian_day(instant: Instant) -> f64 {
    instant.timestamp_millis() as f64 / MS_PER_DAY as f64 + JD_UNIX_EPOCH
}

/// UTC instant for a Julian day (UT), rounded to the millisecond
pub fn instant_from_julian_day(jd: f64) -> Option<Instant> {
    let ms = ((jd - JD_UNIX_EPOCH) * MS_PER_DAY as f64).round();
    if !ms.is_finite() || ms.abs() > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_millis(ms as i64)
}

/// UTC instant for a Julian Ephemeris Day (dynamical time)
pub fn instant_from_jde(jde: f64) -> Option<Instant> {
    let year = 2000.0 + (jde - JD_J2000) / DAYS_PER_JULIAN_YEAR;
    instant_from_julian_day(jde - delta_t_seconds(year) / 86_400.0)
}

/// Approximate ΔT = TT − UT in seconds for a decimal year.
///
/// Piecewise polynomials by Espenak and Meeus for 1900-2150, the long-term
/// parabola outside that range.
pub fn delta_t_seconds(year: f64) -> f64 {
    match year {
        y if (1900.0..1920.0).contains(&y) => {
            let t = y - 1900.0;
            -2.79 + 1.494119 * t - 0.0598939 * t.powi(2) + 0.0061966 * t.powi(3)
                - 0.000197 * t.powi(4)
        }
        y if (1920.0..1941.0).contains(&y) => {
            let t = y - 1920.0;
            21.20 + 0.84493 * t - 0.076100 * t.powi(2) + 0.0020936 * t.powi(3)
        }
        y if (1941.0..1961.0).contains(&y) => {
            let t = y - 1950.0;
            29.07 + 0.407 * t - t.powi(2) / 233.0 + t.powi(3) / 2547.0
        }
        y if (1961.0..1986.0).contains(&y) => {
            let t = y - 1975.0;
            45.45 + 1.067 * t - t.powi(2) / 260.0 - t.powi(3) / 718.0
        }
        y if (1986.0..2005.0).contains(&y) => {
            let t = y - 2000.0;
            63.86 + 0.3345 * t - 0.060374 * t.powi(2)
                + 0.0017275 * t.powi(3)
                + 0.000651814 * t.powi(4)
                + 0.00002373599 * t.powi(5)
        }
        y if (2005.0..2050.0).contains(&y) => {
            let t = y - 2000.0;
            62.92 + 0.32217 * t + 0.005589 * t.powi(2)
        }
        y if (2050.0..2150.0).contains(&y) => {
            let u = (y - 1820.0) / 100.0;
            -20.0 + 32.0 * u.powi(2) - 0.5628 * (2150.0 - y)
        }
        y => {
            let u = (y - 1820.0) / 100.0;
            -20.0 + 32.0 * u.powi(2)
        }
    }
}
