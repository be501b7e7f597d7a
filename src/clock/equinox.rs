//! March equinox estimate and the day-zero anchor derived from it

use chrono::{DateTime, TimeZone, Timelike, Utc};

use crate::core::calendar::instant_from_jde;
use crate::core::types::Instant;

/// UTC hour of the daily boundary the anchor is snapped to
pub const ANCHOR_HOUR: u32 = 23;

/// Julian Ephemeris Day of the mean March equinox (Meeus, years 1000-3000)
pub fn march_equinox_jde(year: i32) -> f64 {
    let y = (year as f64 - 2000.0) / 1000.0;
    2451623.80984 + 365242.37404 * y + 0.05169 * y.powi(2) - 0.00411 * y.powi(3)
        - 0.00057 * y.powi(4)
}

/// UTC instant of the mean March equinox, unsnapped
pub fn raw_march_equinox(year: i32) -> Option<Instant> {
    instant_from_jde(march_equinox_jde(year))
}

/// Snap an instant to 23:00:00.000 UTC on its own date when it is already
/// past 23:00, otherwise to 23:00 on the previous date.
pub fn snap_to_anchor(raw: Instant) -> Instant {
    let date = raw.date_naive();
    let date = if raw.hour() >= ANCHOR_HOUR {
        Some(date)
    } else {
        date.pred_opt()
    };

    date.and_then(|d| d.and_hms_opt(ANCHOR_HOUR, 0, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or(raw)
}

/// Day-zero anchor for `year`: the March equinox snapped back to 23:00 UTC.
///
/// Always 23:00:00.000 UTC, on the equinox date or the day before it.
pub fn estimate_march_equinox(year: i32) -> Instant {
    let raw = raw_march_equinox(year).or_else(|| {
        tracing::warn!("Equinox for {} out of range, using 20 March noon", year);
        Utc.with_ymd_and_hms(year, 3, 20, 12, 0, 0).single()
    });

    match raw {
        Some(raw) => {
            let anchor = snap_to_anchor(raw);
            tracing::debug!(year, %raw, %anchor, "Estimated March equinox");
            anchor
        }
        None if year < 0 => DateTime::<Utc>::MIN_UTC,
        None => DateTime::<Utc>::MAX_UTC,
    }
}
