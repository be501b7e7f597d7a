//! The clock: Holocene year, lunation, day since equinox, beat and solar phase
//!
//! Output reads `H<year> L<lunation>.<pp> D<days> @<beat> <S|N><pp>`, for
//! example `H11725 L3.41 D74 @541.67 S48`.

pub mod beat;
pub mod cache;
pub mod equinox;
pub mod lunation;
pub mod reading;
pub mod solar;

pub use beat::{beat_of_day, Beat};
pub use cache::LunarCache;
pub use equinox::estimate_march_equinox;
pub use lunation::{lunation_since, next_new_moon, LunationState};
pub use reading::{
    convert_gregorian, convert_gregorian_reading, parse_instant, read_clock, read_now,
    render_clock, render_now, ClockReading,
};
pub use solar::{solar_phase, SolarPhase};
