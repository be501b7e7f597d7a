//! Clock orchestration: one reading from the four components
//!
//! `read_clock` is the single core. `read_now` (live) and
//! `convert_gregorian_reading` (retrospective) are thin callers around it.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::beat::{beat_of_day, Beat};
use crate::clock::equinox::estimate_march_equinox;
use crate::clock::lunation::{lunation_since, LunationState};
use crate::clock::solar::{solar_phase, SolarPhase};
use crate::core::astronomy::{LunarOracle, SolarOracle};
use crate::core::calendar::{days_since, gregorian_year, holocene_year};
use crate::core::error::{ClockError, Result};
use crate::core::types::{truncate_to_millis, GeoPosition, Instant};

/// Naive date-time layouts accepted by [`parse_instant`], read as UTC
const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// One clock reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClockReading {
    /// UTC year + 9700
    pub holocene_year: i32,
    /// One-based lunation since the equinox anchor
    pub lunation: u32,
    /// Whole percent of the current lunation elapsed
    pub lunation_percent: u8,
    /// One-based day count since the equinox anchor (negative before it)
    pub days_since_equinox: i64,
    pub beat: Beat,
    pub solar: SolarPhase,
}

impl ClockReading {
    pub fn lunation_state(&self) -> LunationState {
        LunationState {
            lunation: self.lunation,
            percent: self.lunation_percent,
        }
    }
}

impl std::fmt::Display for ClockReading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "H{} L{} D{} @{} {}",
            self.holocene_year,
            self.lunation_state(),
            self.days_since_equinox,
            self.beat,
            self.solar
        )
    }
}

/// Assemble a reading once the anchor and lunation are known
pub(crate) fn compose(
    now: Instant,
    anchor: Instant,
    lunation: LunationState,
    position: Option<GeoPosition>,
    oracle: &impl SolarOracle,
) -> ClockReading {
    ClockReading {
        holocene_year: holocene_year(now),
        lunation: lunation.lunation,
        lunation_percent: lunation.percent,
        days_since_equinox: days_since(now, anchor),
        beat: beat_of_day(now),
        solar: solar_phase(now, position, oracle),
    }
}

/// Full clock reading at `now`
pub fn read_clock<O>(now: Instant, position: Option<GeoPosition>, oracle: &O) -> ClockReading
where
    O: LunarOracle + SolarOracle,
{
    let anchor = estimate_march_equinox(gregorian_year(holocene_year(now)));
    let lunation = lunation_since(now, anchor, oracle);
    compose(now, anchor, lunation, position, oracle)
}

/// Formatted clock string at `now`
pub fn render_clock<O>(now: Instant, position: Option<GeoPosition>, oracle: &O) -> String
where
    O: LunarOracle + SolarOracle,
{
    read_clock(now, position, oracle).to_string()
}

/// Reading for the current system time
pub fn read_now<O>(position: Option<GeoPosition>, oracle: &O) -> ClockReading
where
    O: LunarOracle + SolarOracle,
{
    read_clock(truncate_to_millis(Utc::now()), position, oracle)
}

/// Formatted clock string for the current system time
pub fn render_now<O>(position: Option<GeoPosition>, oracle: &O) -> String
where
    O: LunarOracle + SolarOracle,
{
    read_now(position, oracle).to_string()
}

/// Parse a calendar date string into a UTC instant.
///
/// Accepts RFC 3339, RFC 2822, `YYYY-MM-DDTHH:MM:SS[.fff]`,
/// `YYYY-MM-DD HH:MM:SS[.fff]` and `YYYY-MM-DD`. Strings without an offset
/// are read as UTC; a bare date is UTC midnight.
pub fn parse_instant(input: &str) -> Result<Instant> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(truncate_to_millis(dt.with_timezone(&Utc)));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(input) {
        return Ok(truncate_to_millis(dt.with_timezone(&Utc)));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(truncate_to_millis(naive.and_utc()));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }

    Err(ClockError::InvalidDate(input.to_string()))
}

/// Reading for a calendar date string, `None` if it does not parse.
///
/// A missing or out-of-range coordinate leaves the position absent.
pub fn convert_gregorian_reading<O>(
    input: &str,
    latitude: Option<f64>,
    longitude: Option<f64>,
    oracle: &O,
) -> Option<ClockReading>
where
    O: LunarOracle + SolarOracle,
{
    let now = match parse_instant(input) {
        Ok(now) => now,
        Err(e) => {
            tracing::warn!("{}", e);
            return None;
        }
    };
    let position = GeoPosition::from_parts(latitude, longitude);
    Some(read_clock(now, position, oracle))
}

/// Formatted clock string for a calendar date string
pub fn convert_gregorian<O>(
    input: &str,
    latitude: Option<f64>,
    longitude: Option<f64>,
    oracle: &O,
) -> Option<String>
where
    O: LunarOracle + SolarOracle,
{
    convert_gregorian_reading(input, latitude, longitude, oracle).map(|r| r.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::astronomy::{CombinedOracle, MeanSynodicMoon, SunTimes};
    use chrono::{TimeDelta, TimeZone};

    /// Sun that never rises or sets
    struct NoSun;

    impl SolarOracle for NoSun {
        fn sun_times(&self, _at: Instant, _position: GeoPosition) -> SunTimes {
            SunTimes::default()
        }
    }

    fn oracle() -> CombinedOracle<MeanSynodicMoon, NoSun> {
        let new_moon = Utc.with_ymd_and_hms(2025, 3, 29, 10, 58, 0).unwrap();
        CombinedOracle::new(
            MeanSynodicMoon::new(new_moon, TimeDelta::milliseconds(2_551_442_976)),
            NoSun,
        )
    }

    #[test]
    fn test_reading_day_after_equinox() {
        let now = Utc.with_ymd_and_hms(2025, 3, 21, 0, 0, 0).unwrap();
        let reading = read_clock(now, None, &oracle());
        assert_eq!(reading.holocene_year, 11725);
        assert_eq!(reading.days_since_equinox, 2);
        assert_eq!(reading.lunation_state(), LunationState::START);
        assert_eq!(reading.solar, SolarPhase::Unknown);
        assert_eq!(reading.to_string(), "H11725 L1.00 D2 @041.67 S??");
    }

    #[test]
    fn test_day_count_before_anchor_is_not_positive() {
        // Early March precedes this year's anchor
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let reading = read_clock(now, None, &oracle());
        assert_eq!(reading.days_since_equinox, -18);
    }

    #[test]
    fn test_render_matches_display() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 8, 30, 0).unwrap();
        let o = oracle();
        assert_eq!(render_clock(now, None, &o), read_clock(now, None, &o).to_string());
    }

    #[test]
    fn test_parse_instant_formats() {
        let expected = Utc.with_ymd_and_hms(2025, 3, 21, 6, 30, 0).unwrap();
        assert_eq!(parse_instant("2025-03-21T06:30:00Z").unwrap(), expected);
        assert_eq!(parse_instant("2025-03-21T08:30:00+02:00").unwrap(), expected);
        assert_eq!(parse_instant("Fri, 21 Mar 2025 06:30:00 +0000").unwrap(), expected);
        assert_eq!(parse_instant("2025-03-21T06:30:00").unwrap(), expected);
        assert_eq!(parse_instant("2025-03-21 06:30:00").unwrap(), expected);
        assert_eq!(
            parse_instant("2025-03-21").unwrap(),
            Utc.with_ymd_and_hms(2025, 3, 21, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_instant_keeps_milliseconds_only() {
        let parsed = parse_instant("2025-03-21T06:30:00.123456Z").unwrap();
        assert_eq!(parsed.timestamp_subsec_nanos(), 123_000_000);
    }

    #[test]
    fn test_parse_instant_rejects_garbage() {
        assert!(matches!(parse_instant("not a date"), Err(ClockError::InvalidDate(_))));
        assert!(parse_instant("2025-02-30").is_err());
        assert!(parse_instant("").is_err());
    }

    #[test]
    fn test_convert_gregorian_invalid_is_none() {
        assert_eq!(convert_gregorian("yesterday-ish", None, None, &oracle()), None);
    }

    #[test]
    fn test_convert_gregorian_ignores_partial_position() {
        let rendered = convert_gregorian("2025-03-21T00:00:00Z", Some(51.5), None, &oracle());
        assert_eq!(rendered.as_deref(), Some("H11725 L1.00 D2 @041.67 S??"));
    }

    #[test]
    fn test_reading_json_shape() {
        let now = Utc.with_ymd_and_hms(2025, 3, 21, 0, 0, 0).unwrap();
        let reading = read_clock(now, None, &oracle());
        let value = serde_json::to_value(reading).unwrap();
        assert_eq!(value["holocene_year"], 11725);
        assert_eq!(value["days_since_equinox"], 2);
        assert_eq!(value["solar"]["tag"], "Unknown");

        let back: ClockReading = serde_json::from_value(value).unwrap();
        assert_eq!(back, reading);
    }
}
