//! Lunar coordinates and illumination

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::core::types::Instant;

use super::sun::sun_coords;
use super::{days_since_j2000, declination, right_ascension, EquatorialCoords, RAD};

/// Geocentric lunar coordinates from the mean elements plus the equation of centre
pub fn moon_coords(days: f64) -> EquatorialCoords {
    let mean_longitude = RAD * (218.316 + 13.176396 * days);
    let mean_anomaly = RAD * (134.963 + 13.064993 * days);
    let argument_of_latitude = RAD * (93.272 + 13.229350 * days);

    let longitude = mean_longitude + RAD * 6.289 * mean_anomaly.sin();
    let latitude = RAD * 5.128 * argument_of_latitude.sin();
    let distance_km = 385_001.0 - 20_905.0 * mean_anomaly.cos();

    EquatorialCoords {
        right_ascension: right_ascension(longitude, latitude),
        declination: declination(longitude, latitude),
        distance_km,
    }
}

/// Illumination of the moon at an instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoonIllumination {
    /// Illuminated fraction of the disc, 0.0 (new) to 1.0 (full)
    pub fraction: f64,
    /// Position in the synodic cycle, `[0, 1)`: 0 new, 0.25 first quarter, 0.5 full
    pub phase: f64,
    /// Midpoint angle of the illuminated limb, radians
    pub angle: f64,
}

pub fn moon_illumination(at: Instant) -> MoonIllumination {
    let days = days_since_j2000(at);
    let s = sun_coords(days);
    let m = moon_coords(days);

    let ra_diff = s.right_ascension - m.right_ascension;
    let cos_phi = s.declination.sin() * m.declination.sin()
        + s.declination.cos() * m.declination.cos() * ra_diff.cos();
    let phi = cos_phi.clamp(-1.0, 1.0).acos();
    let inc = (s.distance_km * phi.sin()).atan2(m.distance_km - s.distance_km * phi.cos());
    let angle = (s.declination.cos() * ra_diff.sin()).atan2(
        s.declination.sin() * m.declination.cos()
            - s.declination.cos() * m.declination.sin() * ra_diff.cos(),
    );

    let sign = if angle < 0.0 { -1.0 } else { 1.0 };
    let mut phase = 0.5 + 0.5 * inc * sign / PI;
    if phase >= 1.0 {
        phase -= 1.0;
    }

    MoonIllumination {
        fraction: (1.0 + inc.cos()) / 2.0,
        phase: phase.max(0.0),
        angle,
    }
}
