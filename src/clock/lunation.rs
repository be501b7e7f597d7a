//! New-moon search and lunation tracking
//!
//! The first new moon after the equinox anchor starts lunation 1. From there
//! lunations are counted with the mean synodic month rather than by finding
//! every subsequent new moon.

use serde::{Deserialize, Serialize};

use crate::core::astronomy::LunarOracle;
use crate::core::types::{offset_millis, Instant, MS_PER_HOUR};

// ============================================================================
// Constants
// ============================================================================

/// Step between oracle probes while searching for a new moon
pub const NEW_MOON_SEARCH_STEP_MS: i64 = MS_PER_HOUR;

/// Maximum number of probes (60 days of hourly steps)
pub const NEW_MOON_SEARCH_STEPS: i64 = 1440;

/// A probe whose phase is within this distance of 0 or 1 is a new-moon candidate
pub const NEW_MOON_PHASE_TOLERANCE: f64 = 0.01;

/// Synodic month in milliseconds (29.53059 days)
pub const SYNODIC_MONTH_MS: i64 = 2_551_442_976;

// ============================================================================
// New-Moon Locator
// ============================================================================

/// Cyclic distance from a phase to the nearest new moon
fn distance_to_new(phase: f64) -> f64 {
    phase.min(1.0 - phase)
}

fn is_new_moon_candidate(phase: f64) -> bool {
    phase < NEW_MOON_PHASE_TOLERANCE || phase > 1.0 - NEW_MOON_PHASE_TOLERANCE
}

/// Next new moon strictly after `after`.
///
/// Probes hourly from `after + 1ms` for up to 60 days. The first probe close
/// enough to new moon is refined against its neighbours one step either side.
/// If nothing qualifies the end of the search window is returned.
pub fn next_new_moon(after: Instant, oracle: &impl LunarOracle) -> Instant {
    let horizon = offset_millis(after, NEW_MOON_SEARCH_STEP_MS * NEW_MOON_SEARCH_STEPS);
    let mut probe = offset_millis(after, 1);

    for _ in 0..NEW_MOON_SEARCH_STEPS {
        let phase = oracle.illumination_phase(probe);
        if is_new_moon_candidate(phase) {
            let best = refine_candidate(probe, phase, after, horizon, oracle);
            tracing::debug!(%after, new_moon = %best, "Located new moon");
            return best;
        }
        probe = offset_millis(probe, NEW_MOON_SEARCH_STEP_MS);
    }

    tracing::warn!(%after, %horizon, "No new moon within search window, using window end");
    horizon
}

fn refine_candidate(
    candidate: Instant,
    candidate_phase: f64,
    after: Instant,
    horizon: Instant,
    oracle: &impl LunarOracle,
) -> Instant {
    let mut best = candidate;
    let mut best_distance = distance_to_new(candidate_phase);

    for delta in [-NEW_MOON_SEARCH_STEP_MS, NEW_MOON_SEARCH_STEP_MS] {
        let probe = offset_millis(candidate, delta);
        if probe <= after || probe > horizon {
            continue;
        }
        let distance = distance_to_new(oracle.illumination_phase(probe));
        if distance < best_distance {
            best = probe;
            best_distance = distance;
        }
    }

    best
}

// ============================================================================
// Lunation Tracker
// ============================================================================

/// Progress through the current lunation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LunationState {
    /// One-based lunation count since the equinox anchor
    pub lunation: u32,
    /// Whole percent of the current lunation elapsed (0-99)
    pub percent: u8,
}

impl LunationState {
    /// State reported before the first new moon after the anchor
    pub const START: LunationState = LunationState { lunation: 1, percent: 0 };
}

impl std::fmt::Display for LunationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.lunation, self.percent)
    }
}

/// Lunation state at `now`, counting from the first new moon after `anchor`
pub fn lunation_since(now: Instant, anchor: Instant, oracle: &impl LunarOracle) -> LunationState {
    lunation_from_new_moon(now, next_new_moon(anchor, oracle))
}

/// Lunation state at `now` given the new moon that opens lunation 1
pub fn lunation_from_new_moon(now: Instant, first_new_moon: Instant) -> LunationState {
    if now < first_new_moon {
        return LunationState::START;
    }

    let elapsed = now.timestamp_millis() - first_new_moon.timestamp_millis();
    let completed = elapsed / SYNODIC_MONTH_MS;
    let into_cycle = elapsed % SYNODIC_MONTH_MS;

    LunationState {
        lunation: u32::try_from(completed + 1).unwrap_or(u32::MAX),
        percent: (into_cycle * 100 / SYNODIC_MONTH_MS) as u8,
    }
}
