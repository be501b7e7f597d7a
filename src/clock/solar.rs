//! Day/night phase relative to sunrise and sunset

use serde::{Deserialize, Serialize};

use crate::core::astronomy::SolarOracle;
use crate::core::types::{offset_millis, GeoPosition, Instant, MS_PER_DAY};

/// Days searched either side of `now` for the neighbouring sunset or sunrise
pub const SUN_SEARCH_DAYS: i64 = 3;

/// Where `now` falls between the sunrise/sunset events around it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "tag", content = "percent")]
pub enum SolarPhase {
    /// Between sunrise and sunset, percent of daylight elapsed
    Day(u8),
    /// Between sunset and sunrise, percent of darkness elapsed
    Night(u8),
    /// No position, or no sunrise/sunset today
    Unknown,
}

impl SolarPhase {
    pub fn percent(&self) -> Option<u8> {
        match self {
            Self::Day(p) | Self::Night(p) => Some(*p),
            Self::Unknown => None,
        }
    }

    pub fn is_day(&self) -> bool {
        matches!(self, Self::Day(_))
    }
}

impl std::fmt::Display for SolarPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Day(p) => write!(f, "S{:02}", p),
            Self::Night(p) => write!(f, "N{:02}", p),
            Self::Unknown => write!(f, "S??"),
        }
    }
}

/// Solar phase at `now` for an optional observer position
pub fn solar_phase(
    now: Instant,
    position: Option<GeoPosition>,
    oracle: &impl SolarOracle,
) -> SolarPhase {
    let Some(position) = position else {
        return SolarPhase::Unknown;
    };

    let Some((sunrise, sunset)) = oracle.sun_times(now, position).both() else {
        tracing::debug!(%now, ?position, "No sunrise/sunset today");
        return SolarPhase::Unknown;
    };

    if sunrise <= now && now < sunset {
        SolarPhase::Day(elapsed_percent(now, sunrise, sunset))
    } else if now < sunrise {
        let start = previous_sunset(now, position, oracle);
        SolarPhase::Night(elapsed_percent(now, start, sunrise))
    } else {
        let end = next_sunrise(now, position, oracle);
        SolarPhase::Night(elapsed_percent(now, sunset, end))
    }
}

/// Most recent sunset found on the preceding days, or one day ago
fn previous_sunset(now: Instant, position: GeoPosition, oracle: &impl SolarOracle) -> Instant {
    (1..=SUN_SEARCH_DAYS)
        .find_map(|day| oracle.sun_times(offset_millis(now, -day * MS_PER_DAY), position).sunset)
        .unwrap_or_else(|| {
            tracing::warn!(%now, ?position, "No sunset in the previous {} days", SUN_SEARCH_DAYS);
            offset_millis(now, -MS_PER_DAY)
        })
}

/// Earliest sunrise found on the following days, or one day ahead
fn next_sunrise(now: Instant, position: GeoPosition, oracle: &impl SolarOracle) -> Instant {
    (1..=SUN_SEARCH_DAYS)
        .find_map(|day| oracle.sun_times(offset_millis(now, day * MS_PER_DAY), position).sunrise)
        .unwrap_or_else(|| {
            tracing::warn!(%now, ?position, "No sunrise in the next {} days", SUN_SEARCH_DAYS);
            offset_millis(now, MS_PER_DAY)
        })
}

/// Whole percent of `[start, end)` elapsed at `now`, clamped to 0-99
fn elapsed_percent(now: Instant, start: Instant, end: Instant) -> u8 {
    let span = end.timestamp_millis() - start.timestamp_millis();
    if span <= 0 {
        return 0;
    }
    let elapsed = now.timestamp_millis() - start.timestamp_millis();
    (elapsed.saturating_mul(100).div_euclid(span)).clamp(0, 99) as u8
}
