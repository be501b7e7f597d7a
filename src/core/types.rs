//! Core type definitions used throughout the codebase

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::core::error::{ClockError, Result};

/// A UTC point in time with millisecond resolution
pub type Instant = DateTime<Utc>;

/// Milliseconds in one civil day
pub const MS_PER_DAY: i64 = 86_400_000;

/// Milliseconds in one hour
pub const MS_PER_HOUR: i64 = 3_600_000;

/// Geographic position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPosition {
    /// Create a position, rejecting out-of-range or non-finite coordinates
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let lat_ok = latitude.is_finite() && (-90.0..=90.0).contains(&latitude);
        let lon_ok = longitude.is_finite() && (-180.0..=180.0).contains(&longitude);
        if lat_ok && lon_ok {
            Ok(Self { latitude, longitude })
        } else {
            Err(ClockError::InvalidPosition { latitude, longitude })
        }
    }

    /// Build a position from two optional coordinates.
    ///
    /// Either coordinate missing, or the pair out of range, yields `None`:
    /// a failed location lookup is "no position", never an error.
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        match (latitude, longitude) {
            (Some(lat), Some(lon)) => match Self::new(lat, lon) {
                Ok(position) => Some(position),
                Err(e) => {
                    tracing::warn!("Ignoring position: {}", e);
                    None
                }
            },
            _ => None,
        }
    }
}

/// Shift an instant by a signed number of milliseconds, saturating at the
/// representable range instead of panicking
pub fn offset_millis(instant: Instant, ms: i64) -> Instant {
    instant
        .checked_add_signed(TimeDelta::milliseconds(ms))
        .unwrap_or(if ms < 0 { DateTime::<Utc>::MIN_UTC } else { DateTime::<Utc>::MAX_UTC })
}

/// Truncate an instant to whole milliseconds
pub fn truncate_to_millis(instant: Instant) -> Instant {
    DateTime::from_timestamp_millis(instant.timestamp_millis()).unwrap_or(instant)
}
