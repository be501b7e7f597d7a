//! Clock configuration
//!
//! Settings come from three layers, each overriding the previous one:
//! a TOML file, `BEAT_CLOCK_*` environment variables, then command-line flags
//! (applied by the binary).

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{ClockError, Result};
use crate::core::types::GeoPosition;

/// Environment variable overriding the configured latitude
pub const LATITUDE_ENV: &str = "BEAT_CLOCK_LAT";

/// Environment variable overriding the configured longitude
pub const LONGITUDE_ENV: &str = "BEAT_CLOCK_LON";

/// Configuration for the clock binary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Observer latitude in decimal degrees (north positive)
    ///
    /// Without both coordinates the solar field renders as `S??`.
    pub latitude: Option<f64>,

    /// Observer longitude in decimal degrees (east positive)
    pub longitude: Option<f64>,

    /// Delay between redraws in `watch` mode, in milliseconds
    ///
    /// The default of 864 ms is one hundredth of a beat, so every redraw
    /// advances the last beat digit.
    pub refresh_interval_ms: u64,

    /// `tracing` filter directive used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            latitude: None,
            longitude: None,
            refresh_interval_ms: 864,
            log_filter: "beat_clock=info".into(),
        }
    }
}

impl ClockConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse a config from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: ClockConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay coordinates from `BEAT_CLOCK_LAT` / `BEAT_CLOCK_LON`
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(
            read_env_coordinate(LATITUDE_ENV)?,
            read_env_coordinate(LONGITUDE_ENV)?,
        )
    }

    /// Replace whichever coordinates are given
    pub fn with_overrides(mut self, latitude: Option<f64>, longitude: Option<f64>) -> Result<Self> {
        if latitude.is_some() {
            self.latitude = latitude;
        }
        if longitude.is_some() {
            self.longitude = longitude;
        }
        self.validate()?;
        Ok(self)
    }

    /// Observer position, if both coordinates are configured
    pub fn position(&self) -> Option<GeoPosition> {
        GeoPosition::from_parts(self.latitude, self.longitude)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(lat) = self.latitude {
            if !(-90.0..=90.0).contains(&lat) {
                return Err(ClockError::Config(format!(
                    "latitude ({}) must be within -90..=90",
                    lat
                )));
            }
        }

        if let Some(lon) = self.longitude {
            if !(-180.0..=180.0).contains(&lon) {
                return Err(ClockError::Config(format!(
                    "longitude ({}) must be within -180..=180",
                    lon
                )));
            }
        }

        if self.refresh_interval_ms == 0 {
            return Err(ClockError::Config("refresh_interval_ms must be positive".into()));
        }

        Ok(())
    }
}

fn read_env_coordinate(name: &str) -> Result<Option<f64>> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|e| ClockError::Config(format!("{} ({:?}): {}", name, raw, e))),
        Err(_) => Ok(None),
    }
}
