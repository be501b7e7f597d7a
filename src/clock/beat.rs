//! Beats: thousandths of a day on a meridian one hour east of UTC

use chrono::Timelike;
use serde::{Deserialize, Serialize};

use crate::core::error::ClockError;
use crate::core::types::{Instant, MS_PER_DAY, MS_PER_HOUR};

/// Offset of the beat reference meridian from UTC
pub const BEAT_OFFSET_MS: i64 = MS_PER_HOUR;

/// Beats in one day
pub const BEATS_PER_DAY: i64 = 1000;

/// Milliseconds in one beat
pub const MS_PER_BEAT: i64 = MS_PER_DAY / BEATS_PER_DAY;

/// Hundredths of a beat in one day
const CENTIBEATS_PER_DAY: i64 = BEATS_PER_DAY * 100;

/// Position within the beat day, in `[0, 1000)` beats
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "f64", try_from = "f64")]
pub struct Beat {
    /// Milliseconds since midnight on the beat meridian
    shifted_ms: i64,
}

impl Beat {
    /// Beat from milliseconds since midnight on the beat meridian
    pub fn from_shifted_millis(ms: i64) -> Self {
        Self {
            shifted_ms: ms.rem_euclid(MS_PER_DAY),
        }
    }

    pub fn shifted_millis(&self) -> i64 {
        self.shifted_ms
    }

    /// Fractional beat value
    pub fn value(&self) -> f64 {
        self.shifted_ms as f64 / MS_PER_BEAT as f64
    }

    /// Hundredths of a beat, rounded half up.
    ///
    /// The last 432 ms of the day round to 100000 and wrap to 0.
    pub fn centibeats(&self) -> u32 {
        let rounded = (self.shifted_ms * 100 + MS_PER_BEAT / 2) / MS_PER_BEAT;
        (rounded % CENTIBEATS_PER_DAY) as u32
    }
}

impl std::fmt::Display for Beat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let centibeats = self.centibeats();
        write!(f, "{:03}.{:02}", centibeats / 100, centibeats % 100)
    }
}

impl From<Beat> for f64 {
    fn from(beat: Beat) -> f64 {
        beat.value()
    }
}

impl TryFrom<f64> for Beat {
    type Error = ClockError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !(0.0..BEATS_PER_DAY as f64).contains(&value) {
            return Err(ClockError::InvalidBeat(value));
        }
        Ok(Self::from_shifted_millis((value * MS_PER_BEAT as f64).round() as i64))
    }
}

/// Beat of the day at `now`
pub fn beat_of_day(now: Instant) -> Beat {
    let millis = i64::from(now.timestamp_subsec_millis().min(999));
    let ms_of_day = i64::from(now.num_seconds_from_midnight()) * 1000 + millis;
    Beat::from_shifted_millis(ms_of_day + BEAT_OFFSET_MS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone, Utc};

    #[test]
    fn test_constants() {
        assert_eq!(MS_PER_BEAT, 86_400);
        assert_eq!(BEAT_OFFSET_MS, 3_600_000);
    }

    #[test]
    fn test_utc_midnight_is_one_hour_in() {
        let midnight = Utc.with_ymd_and_hms(2025, 6, 21, 0, 0, 0).unwrap();
        let beat = beat_of_day(midnight);
        assert_eq!(beat.shifted_millis(), 3_600_000);
        assert_eq!(beat.to_string(), "041.67");
        assert!((beat.value() - 41.666_666).abs() < 1e-5);
    }

    #[test]
    fn test_2300_utc_is_beat_zero() {
        let t = Utc.with_ymd_and_hms(2025, 6, 21, 23, 0, 0).unwrap();
        assert_eq!(beat_of_day(t).to_string(), "000.00");
    }

    #[test]
    fn test_noon_utc() {
        let noon = Utc.with_ymd_and_hms(2025, 6, 21, 12, 0, 0).unwrap();
        // 13:00 on the beat meridian = 541.666...
        assert_eq!(beat_of_day(noon).to_string(), "541.67");
    }

    #[test]
    fn test_end_of_beat_day_wraps_instead_of_reaching_1000() {
        let t = Utc.with_ymd_and_hms(2025, 6, 21, 22, 59, 59).unwrap() + TimeDelta::milliseconds(999);
        let beat = beat_of_day(t);
        assert!(beat.value() < 1000.0);
        assert_eq!(beat.to_string(), "000.00");

        let t = Utc.with_ymd_and_hms(2025, 6, 21, 22, 59, 59).unwrap();
        assert_eq!(beat_of_day(t).to_string(), "999.99");
    }

    #[test]
    fn test_display_is_six_characters() {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        for minute in (0..24 * 60).step_by(13) {
            let rendered = beat_of_day(start + TimeDelta::minutes(minute)).to_string();
            assert_eq!(rendered.len(), 6, "{}", rendered);
            assert_eq!(&rendered[3..4], ".");
        }
    }

    #[test]
    fn test_serializes_as_number() {
        let beat = Beat::from_shifted_millis(44_064_000);
        let json = serde_json::to_string(&beat).unwrap();
        assert_eq!(json, "510.0");
        let back: Beat = serde_json::from_str(&json).unwrap();
        assert_eq!(back, beat);
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        assert!(Beat::try_from(1000.0).is_err());
        assert!(Beat::try_from(-0.5).is_err());
        assert!(Beat::try_from(f64::NAN).is_err());
    }
}
