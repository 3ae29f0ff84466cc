//! Season-long weather driver for live demonstrations.
//!
//! The simulator cycles pre-monsoon → onset → peak → decline and back again,
//! each phase lasting `steps_per_phase` steps. Drain blockage builds up while
//! it rains and eases off in the decline; a new cycle starts clean.

use crate::{
    record::round_to,
    rng::SeededRng,
    scenario::Band,
};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_STEPS_PER_PHASE: u64 = 10;

const RIVER_BASE_M: f64 = 203.0;
/// River rise in metres per 100 mm of 24h rain.
const RIVER_RISE_PER_100MM: f64 = 1.5;
const MAX_BLOCKAGE_ADJUSTMENT: f64 = 0.4;

const RAIN_3H_SHARE: f64 = 0.45;
const RAIN_3H_JITTER: Band = Band(-5.0, 10.0);
const RAIN_1H_SHARE: f64 = 0.35;
const RAIN_1H_JITTER: Band = Band(-2.0, 5.0);
const FORECAST_OVERSHOOT: f64 = 1.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonsoonPhase {
    PreMonsoon,
    Onset,
    Peak,
    Decline,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseProfile {
    pub rain_24h:       Band,
    pub river_offset_m: f64,
    /// Change in blockage adjustment per step.
    pub blockage_rate:  f64,
}

impl MonsoonPhase {
    pub fn profile(&self) -> PhaseProfile {
        match self {
            Self::PreMonsoon => PhaseProfile { rain_24h: Band(5.0, 25.0),   river_offset_m: -0.3, blockage_rate:  0.01 },
            Self::Onset      => PhaseProfile { rain_24h: Band(30.0, 60.0),  river_offset_m:  0.2, blockage_rate:  0.02 },
            Self::Peak       => PhaseProfile { rain_24h: Band(70.0, 120.0), river_offset_m:  1.0, blockage_rate:  0.05 },
            Self::Decline    => PhaseProfile { rain_24h: Band(40.0, 70.0),  river_offset_m:  0.5, blockage_rate: -0.01 },
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::PreMonsoon => Self::Onset,
            Self::Onset      => Self::Peak,
            Self::Peak       => Self::Decline,
            Self::Decline    => Self::PreMonsoon,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PreMonsoon => "pre_monsoon",
            Self::Onset      => "onset",
            Self::Peak       => "peak",
            Self::Decline    => "decline",
        }
    }
}

impl fmt::Display for MonsoonPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Shared weather for one simulation step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonsoonConditions {
    pub step:                      u64,
    pub phase:                     MonsoonPhase,
    pub rain_1h_mm:                f64,
    pub rain_3h_mm:                f64,
    pub rain_24h_mm:               f64,
    pub rain_forecast_3h_mm:       f64,
    pub river_level_m:             f64,
    pub drain_blockage_adjustment: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonsoonState {
    pub phase:               MonsoonPhase,
    pub time_step:           u64,
    pub blockage_adjustment: f64,
}

impl Default for MonsoonState {
    fn default() -> Self {
        Self {
            phase:               MonsoonPhase::PreMonsoon,
            time_step:           0,
            blockage_adjustment: 0.0,
        }
    }
}

pub struct MonsoonSimulator {
    pub state:       MonsoonState,
    steps_per_phase: u64,
}

impl MonsoonSimulator {
    pub fn new() -> Self {
        Self::with_steps_per_phase(DEFAULT_STEPS_PER_PHASE)
    }

    pub fn with_steps_per_phase(steps_per_phase: u64) -> Self {
        Self {
            state: MonsoonState::default(),
            steps_per_phase: steps_per_phase.max(1),
        }
    }

    pub fn phase(&self) -> MonsoonPhase {
        self.state.phase
    }

    /// Draw this step's conditions, then advance the phase on its boundary.
    pub fn step(&mut self, rng: &mut SeededRng) -> MonsoonConditions {
        let profile = self.state.phase.profile();

        let rain_24h = profile.rain_24h.sample(rng);
        let rain_3h = rain_24h * RAIN_3H_SHARE + RAIN_3H_JITTER.sample(rng);
        let rain_1h = rain_3h * RAIN_1H_SHARE + RAIN_1H_JITTER.sample(rng);
        let river_level =
            RIVER_BASE_M + profile.river_offset_m + rain_24h / 100.0 * RIVER_RISE_PER_100MM;

        self.state.blockage_adjustment = (self.state.blockage_adjustment + profile.blockage_rate)
            .clamp(0.0, MAX_BLOCKAGE_ADJUSTMENT);

        let conditions = MonsoonConditions {
            step:                      self.state.time_step,
            phase:                     self.state.phase,
            rain_1h_mm:                rain_1h.max(0.0),
            rain_3h_mm:                rain_3h.max(0.0),
            rain_24h_mm:               rain_24h.max(0.0),
            rain_forecast_3h_mm:       (rain_3h * FORECAST_OVERSHOOT).max(0.0),
            river_level_m:             round_to(river_level, 2),
            drain_blockage_adjustment: self.state.blockage_adjustment,
        };

        self.state.time_step += 1;
        if self.state.time_step.is_multiple_of(self.steps_per_phase) {
            self.advance_phase();
        }
        conditions
    }

    fn advance_phase(&mut self) {
        let next = self.state.phase.next();
        if next == MonsoonPhase::PreMonsoon {
            self.state.blockage_adjustment = 0.0;
            log::debug!("step={} monsoon cycle complete, resetting", self.state.time_step);
        } else {
            log::debug!("step={} monsoon phase -> {next}", self.state.time_step);
        }
        self.state.phase = next;
    }
}

impl Default for MonsoonSimulator {
    fn default() -> Self { Self::new() }
}
