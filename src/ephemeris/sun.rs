//! Solar coordinates and sunrise/sunset

use std::f64::consts::PI;

use crate::core::astronomy::SunTimes;
use crate::core::calendar::{instant_from_julian_day, JD_J2000};
use crate::core::types::{GeoPosition, Instant};

use super::{days_since_j2000, declination, right_ascension, EquatorialCoords, RAD};

/// Mean distance Earth-Sun in km
pub const SUN_DISTANCE_KM: f64 = 149_598_000.0;

/// Altitude of the sun's centre at apparent sunrise/sunset (refraction + radius), degrees
pub const SUNRISE_ALTITUDE_DEG: f64 = -0.833;

/// Offset of the solar transit from the Julian day boundary
const J0: f64 = 0.0009;

pub fn solar_mean_anomaly(days: f64) -> f64 {
    RAD * (357.5291 + 0.98560028 * days)
}

pub fn ecliptic_longitude(mean_anomaly: f64) -> f64 {
    let m = mean_anomaly;
    let center = RAD * (1.9148 * m.sin() + 0.02 * (2.0 * m).sin() + 0.0003 * (3.0 * m).sin());
    let perihelion = RAD * 102.9372;
    m + center + perihelion + PI
}

pub fn sun_coords(days: f64) -> EquatorialCoords {
    let longitude = ecliptic_longitude(solar_mean_anomaly(days));
    EquatorialCoords {
        right_ascension: right_ascension(longitude, 0.0),
        declination: declination(longitude, 0.0),
        distance_km: SUN_DISTANCE_KM,
    }
}

fn approx_transit(hour_angle: f64, lw: f64, cycle: f64) -> f64 {
    J0 + (hour_angle + lw) / (2.0 * PI) + cycle
}

fn solar_transit_jd(ds: f64, mean_anomaly: f64, longitude: f64) -> f64 {
    JD_J2000 + ds + 0.0053 * mean_anomaly.sin() - 0.0069 * (2.0 * longitude).sin()
}

/// Sunrise and sunset of the solar day nearest `at`.
///
/// Both are `None` when the sun stays above or below the horizon all day.
pub fn sun_times(at: Instant, position: GeoPosition) -> SunTimes {
    let lw = RAD * -position.longitude;
    let phi = RAD * position.latitude;

    let days = days_since_j2000(at);
    let cycle = (days - J0 - lw / (2.0 * PI)).round();
    let ds = approx_transit(0.0, lw, cycle);

    let m = solar_mean_anomaly(ds);
    let l = ecliptic_longitude(m);
    let dec = declination(l, 0.0);
    let noon = solar_transit_jd(ds, m, l);

    let h0 = RAD * SUNRISE_ALTITUDE_DEG;
    let cos_w = (h0.sin() - phi.sin() * dec.sin()) / (phi.cos() * dec.cos());
    if !cos_w.is_finite() || !(-1.0..=1.0).contains(&cos_w) {
        return SunTimes::default();
    }

    let w = cos_w.acos();
    let set = solar_transit_jd(approx_transit(w, lw, cycle), m, l);
    let rise = noon - (set - noon);

    SunTimes::new(instant_from_julian_day(rise), instant_from_julian_day(set))
}
