//! Scenario classes and the feature bands they sample from.
//!
//! A scenario is a severity tier for one generation draw. Each tier fixes
//! closed ranges for 24h rain, the 3h/24h rain ratio, river level, drain
//! blockage and drain capacity; severity moves all of them together.

use crate::{
    error::{FloodError, FloodResult},
    rng::SeededRng,
    scorer::RiskLevel,
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Closed numeric range sampled uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band(pub f64, pub f64);

impl Band {
    pub fn sample(&self, rng: &mut SeededRng) -> f64 {
        rng.uniform(self.0, self.1)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.0 && value <= self.1
    }

    pub fn low(&self) -> f64 {
        self.0
    }

    pub fn high(&self) -> f64 {
        self.1
    }
}

/// 1h rain as a share of 3h rain, shared by every scenario.
pub const RAIN_1H_RATIO: Band = Band(0.28, 0.42);
/// 3h forecast as a multiple of observed 3h rain. Always overshoots.
pub const FORECAST_3H_RATIO: Band = Band(1.05, 1.25);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioClass {
    Normal,
    Light,
    Moderate,
    Heavy,
    Extreme,
}

/// Feature bands for one scenario class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioRanges {
    pub rain_24h_mm:    Band,
    pub rain_3h_ratio:  Band,
    pub river_level_m:  Band,
    pub drain_blockage: Band,
    pub drain_capacity: Band,
}

impl ScenarioClass {
    pub const ALL: [ScenarioClass; 5] = [
        Self::Normal,
        Self::Light,
        Self::Moderate,
        Self::Heavy,
        Self::Extreme,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal   => "normal",
            Self::Light    => "light",
            Self::Moderate => "moderate",
            Self::Heavy    => "heavy",
            Self::Extreme  => "extreme",
        }
    }

    pub fn ranges(&self) -> ScenarioRanges {
        match self {
            Self::Extreme => ScenarioRanges {
                rain_24h_mm:    Band(110.0, 150.0),
                rain_3h_ratio:  Band(0.50, 0.65),
                river_level_m:  Band(204.5, 206.0),
                drain_blockage: Band(0.75, 0.95),
                drain_capacity: Band(0.45, 0.60),
            },
            Self::Heavy => ScenarioRanges {
                rain_24h_mm:    Band(85.0, 110.0),
                rain_3h_ratio:  Band(0.45, 0.60),
                river_level_m:  Band(204.2, 204.8),
                drain_blockage: Band(0.65, 0.80),
                drain_capacity: Band(0.50, 0.68),
            },
            Self::Moderate => ScenarioRanges {
                rain_24h_mm:    Band(50.0, 85.0),
                rain_3h_ratio:  Band(0.40, 0.55),
                river_level_m:  Band(203.8, 204.5),
                drain_blockage: Band(0.50, 0.70),
                drain_capacity: Band(0.60, 0.75),
            },
            Self::Light => ScenarioRanges {
                rain_24h_mm:    Band(25.0, 50.0),
                rain_3h_ratio:  Band(0.35, 0.50),
                river_level_m:  Band(203.2, 203.8),
                drain_blockage: Band(0.40, 0.60),
                drain_capacity: Band(0.65, 0.82),
            },
            Self::Normal => ScenarioRanges {
                rain_24h_mm:    Band(5.0, 25.0),
                rain_3h_ratio:  Band(0.30, 0.45),
                river_level_m:  Band(203.0, 203.5),
                drain_blockage: Band(0.30, 0.50),
                drain_capacity: Band(0.72, 0.88),
            },
        }
    }
}

impl fmt::Display for ScenarioClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScenarioClass {
    type Err = FloodError;

    fn from_str(s: &str) -> FloodResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" | "dry"                => Ok(Self::Normal),
            "light" | "light_rain"          => Ok(Self::Light),
            "moderate" | "moderate_rain"    => Ok(Self::Moderate),
            "heavy" | "heavy_rain"          => Ok(Self::Heavy),
            "extreme" | "extreme_rain"      => Ok(Self::Extreme),
            _ => Err(FloodError::InvalidScenario { name: s.to_string() }),
        }
    }
}

// ── Target-conditioned profiles ─────────────────────────────────────────────

/// Feature bands chosen so that the intended label is the likely scorer outcome.
/// Used by balanced generation, which assigns the label first and samples second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetProfile {
    pub rain_24h_mm:    Band,
    pub river_level_m:  Band,
    pub drain_blockage: Band,
    pub drain_capacity: Band,
}

pub const TARGET_RAIN_3H_RATIO: Band = Band(0.40, 0.55);
pub const TARGET_RAIN_1H_RATIO: Band = Band(0.30, 0.40);
pub const TARGET_FORECAST_3H_RATIO: Band = Band(1.05, 1.20);

impl TargetProfile {
    pub fn for_level(level: RiskLevel) -> Self {
        match level {
            RiskLevel::Danger => Self {
                rain_24h_mm:    Band(85.0, 125.0),
                river_level_m:  Band(204.3, 205.2),
                drain_blockage: Band(0.70, 0.90),
                drain_capacity: Band(0.48, 0.65),
            },
            RiskLevel::Warning => Self {
                rain_24h_mm:    Band(50.0, 85.0),
                river_level_m:  Band(203.8, 204.5),
                drain_blockage: Band(0.55, 0.75),
                drain_capacity: Band(0.60, 0.75),
            },
            RiskLevel::Safe => Self {
                rain_24h_mm:    Band(10.0, 50.0),
                river_level_m:  Band(203.0, 203.8),
                drain_blockage: Band(0.30, 0.60),
                drain_capacity: Band(0.70, 0.88),
            },
        }
    }
}
