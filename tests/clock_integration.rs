//! Clock integration tests
//!
//! End-to-end readings through the public API, with deterministic oracles
//! where exact values matter and the bundled SunCalc model elsewhere.

use beat_clock::clock::{
    convert_gregorian, convert_gregorian_reading, estimate_march_equinox, read_clock,
    render_clock, ClockReading, LunarCache, SolarPhase,
};
use beat_clock::core::astronomy::{CombinedOracle, MeanSynodicMoon, SolarOracle, SunTimes};
use beat_clock::core::{ClockConfig, GeoPosition, Instant};
use beat_clock::ephemeris::SunCalc;
use chrono::{TimeDelta, TimeZone, Utc};

/// Sunrise 06:00 and sunset 18:00 UTC on every date
struct SixToSix;

impl SolarOracle for SixToSix {
    fn sun_times(&self, at: Instant, _position: GeoPosition) -> SunTimes {
        let date = at.date_naive();
        let at_hour = |h| date.and_hms_opt(h, 0, 0).map(|n| n.and_utc());
        SunTimes::new(at_hour(6), at_hour(18))
    }
}

fn fake_oracle() -> CombinedOracle<MeanSynodicMoon, SixToSix> {
    let new_moon = Utc.with_ymd_and_hms(2025, 3, 29, 10, 58, 0).unwrap();
    CombinedOracle::new(
        MeanSynodicMoon::new(new_moon, TimeDelta::milliseconds(2_551_442_976)),
        SixToSix,
    )
}

fn london() -> Option<GeoPosition> {
    GeoPosition::new(51.5074, -0.1278).ok()
}

#[test]
fn test_day_after_equinox_2025() {
    let now = Utc.with_ymd_and_hms(2025, 3, 21, 0, 0, 0).unwrap();
    assert_eq!(
        estimate_march_equinox(2025),
        Utc.with_ymd_and_hms(2025, 3, 19, 23, 0, 0).unwrap()
    );

    let reading = read_clock(now, None, &SunCalc);
    assert_eq!(reading.holocene_year, 11725);
    assert_eq!(reading.days_since_equinox, 2);
    assert!(render_clock(now, None, &SunCalc).starts_with("H11725 L1.00 D2 @041.67"));
}

#[test]
fn test_london_midsummer_noon_is_day() {
    let now = Utc.with_ymd_and_hms(2025, 6, 21, 12, 0, 0).unwrap();
    let reading = read_clock(now, london(), &SunCalc);

    match reading.solar {
        SolarPhase::Day(p) => assert!(p > 0 && p < 99, "percent {}", p),
        other => panic!("expected day, got {}", other),
    }
    assert!(reading.to_string().ends_with(&format!(" {}", reading.solar)));
}

#[test]
fn test_no_position_renders_unknown() {
    let now = Utc.with_ymd_and_hms(2025, 6, 21, 12, 0, 0).unwrap();
    let rendered = render_clock(now, None, &SunCalc);
    assert!(rendered.ends_with(" S??"), "{}", rendered);
    assert_eq!(read_clock(now, None, &SunCalc).solar, SolarPhase::Unknown);
}

#[test]
fn test_render_is_idempotent() {
    let now = Utc.with_ymd_and_hms(2024, 11, 3, 17, 42, 9).unwrap();
    let first = render_clock(now, london(), &SunCalc);
    let second = render_clock(now, london(), &SunCalc);
    assert_eq!(first, second);
}

#[test]
fn test_full_string_with_fakes() {
    // 2025-06-01 21:00 UTC: anchor 2025-03-19 23:00, first new moon
    // 2025-03-29 05:00:00.001 from the hourly search
    let now = Utc.with_ymd_and_hms(2025, 6, 1, 21, 0, 0).unwrap();
    let rendered = render_clock(now, london(), &fake_oracle());
    assert_eq!(rendered, "H11725 L3.18 D74 @916.67 N25");
}

#[test]
fn test_convert_gregorian_invalid_date() {
    assert_eq!(convert_gregorian("31/31/2025", None, None, &SunCalc), None);
    assert!(convert_gregorian_reading("", Some(51.5), Some(0.0), &SunCalc).is_none());
}

#[test]
fn test_convert_gregorian_matches_read_clock() {
    let now = Utc.with_ymd_and_hms(2025, 3, 21, 0, 0, 0).unwrap();
    let converted =
        convert_gregorian("2025-03-21T00:00:00Z", Some(51.5074), Some(-0.1278), &SunCalc);
    assert_eq!(converted, Some(render_clock(now, london(), &SunCalc)));
}

#[test]
fn test_out_of_range_coordinates_mean_no_position() {
    let converted = convert_gregorian("2025-06-21", Some(123.0), Some(0.0), &SunCalc).unwrap();
    assert!(converted.ends_with(" S??"));
}

#[test]
fn test_cache_agrees_over_a_year_boundary() {
    let oracle = fake_oracle();
    let mut cache = LunarCache::new();
    let start = Utc.with_ymd_and_hms(2025, 12, 30, 0, 0, 0).unwrap();

    for step in 0..48 {
        let now = start + TimeDelta::hours(step * 2) + TimeDelta::milliseconds(step * 137);
        assert_eq!(cache.read(now, london(), &oracle), read_clock(now, london(), &oracle));
    }
}

#[test]
fn test_reading_json_round_trip() {
    let now = Utc.with_ymd_and_hms(2025, 6, 1, 21, 0, 0).unwrap();
    let reading = read_clock(now, london(), &fake_oracle());

    let json = serde_json::to_string(&reading).unwrap();
    assert!(json.contains(r#""solar":{"tag":"Night","percent":25}"#), "{}", json);
    let back: ClockReading = serde_json::from_str(&json).unwrap();
    assert_eq!(back.to_string(), reading.to_string());
}

#[test]
fn test_config_position_feeds_reading() {
    let config = ClockConfig::from_toml_str("latitude = 51.5074\nlongitude = -0.1278\n").unwrap();
    let now = Utc.with_ymd_and_hms(2025, 6, 21, 12, 0, 0).unwrap();
    let reading = read_clock(now, config.position(), &SunCalc);
    assert!(reading.solar.is_day());
}
