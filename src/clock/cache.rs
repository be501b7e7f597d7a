//! Per-year cache of the equinox anchor and first new moon
//!
//! Both only change when the Gregorian year does, while the new-moon search
//! costs up to ~1440 oracle queries. The live loop keeps one cache and
//! recomputes only the beat and solar phase on each tick.

use crate::clock::equinox::estimate_march_equinox;
use crate::clock::lunation::{lunation_from_new_moon, next_new_moon};
use crate::clock::reading::{compose, ClockReading};
use crate::core::astronomy::{LunarOracle, SolarOracle};
use crate::core::calendar::{gregorian_year, holocene_year};
use crate::core::types::{GeoPosition, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct YearAnchors {
    year: i32,
    anchor: Instant,
    first_new_moon: Instant,
}

/// Caller-owned cache for repeated readings
#[derive(Debug, Clone, Default)]
pub struct LunarCache {
    entry: Option<YearAnchors>,
}

impl LunarCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gregorian year currently cached, if any
    pub fn cached_year(&self) -> Option<i32> {
        self.entry.map(|e| e.year)
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }

    /// Anchor and first new moon for `year`, computing them on a miss
    pub fn anchors(&mut self, year: i32, oracle: &impl LunarOracle) -> (Instant, Instant) {
        let entry = match self.entry {
            Some(entry) if entry.year == year => entry,
            _ => {
                let anchor = estimate_march_equinox(year);
                let first_new_moon = next_new_moon(anchor, oracle);
                tracing::debug!(year, %anchor, %first_new_moon, "Refreshed lunar cache");
                let entry = YearAnchors {
                    year,
                    anchor,
                    first_new_moon,
                };
                self.entry = Some(entry);
                entry
            }
        };
        (entry.anchor, entry.first_new_moon)
    }

    /// Same reading as [`read_clock`](crate::clock::read_clock), reusing the
    /// cached anchors when the year is unchanged
    pub fn read<O>(&mut self, now: Instant, position: Option<GeoPosition>, oracle: &O) -> ClockReading
    where
        O: LunarOracle + SolarOracle,
    {
        let year = gregorian_year(holocene_year(now));
        let (anchor, first_new_moon) = self.anchors(year, oracle);
        let lunation = lunation_from_new_moon(now, first_new_moon);
        compose(now, anchor, lunation, position, oracle)
    }

    /// Formatted form of [`LunarCache::read`]
    pub fn render<O>(&mut self, now: Instant, position: Option<GeoPosition>, oracle: &O) -> String
    where
        O: LunarOracle + SolarOracle,
    {
        self.read(now, position, oracle).to_string()
    }
}
