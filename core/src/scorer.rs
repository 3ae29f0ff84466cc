//! Weighted breakpoint scoring of a feature vector into a risk level.
//!
//! Each factor contributes through its own ladder; factors are independent and
//! all contribute. The summed score is thresholded into Safe / Warning / Danger,
//! then a small fraction of labels is perturbed within a neighbourhood so that
//! the label is never a perfectly deterministic function of the score.

use crate::{
    error::{FloodError, FloodResult},
    features::FeatureVector,
    ladder::{first_match, step, Direction, Ladder},
    rng::SeededRng,
};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum RiskLevel {
    Safe    = 0,
    Warning = 1,
    Danger  = 2,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [Self::Safe, Self::Warning, Self::Danger];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Safe    => "Safe",
            Self::Warning => "Warning",
            Self::Danger  => "Danger",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Levels a noisy relabel may land on. Always includes `self`.
    pub fn noise_neighbourhood(&self) -> &'static [RiskLevel] {
        match self {
            Self::Danger  => &[Self::Warning, Self::Danger],
            Self::Safe    => &[Self::Safe, Self::Warning],
            Self::Warning => &[Self::Safe, Self::Warning, Self::Danger],
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<RiskLevel> for u8 {
    fn from(level: RiskLevel) -> u8 {
        level as u8
    }
}

impl TryFrom<i64> for RiskLevel {
    type Error = FloodError;

    fn try_from(value: i64) -> FloodResult<Self> {
        match value {
            0 => Ok(Self::Safe),
            1 => Ok(Self::Warning),
            2 => Ok(Self::Danger),
            _ => Err(FloodError::InvalidRiskLevel { value }),
        }
    }
}

impl TryFrom<u8> for RiskLevel {
    type Error = FloodError;

    fn try_from(value: u8) -> FloodResult<Self> {
        Self::try_from(value as i64)
    }
}

/// A level plus the score that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub score: f64,
    /// Only set at serving time.
    pub confidence: Option<f64>,
}

// ── Ladders ──────────────────────────────────────────────────────────────────

pub const RAIN_24H_LADDER: Ladder = Ladder {
    name: "rain_24h",
    direction: Direction::Above,
    steps: &[step(100.0, 2.0), step(70.0, 1.5), step(50.0, 1.0)],
};

pub const RIVER_LEVEL_LADDER: Ladder = Ladder {
    name: "river_level",
    direction: Direction::Above,
    steps: &[step(204.8, 1.5), step(204.3, 1.0), step(204.0, 0.5)],
};

pub const BLOCKAGE_LADDER: Ladder = Ladder {
    name: "drain_blockage",
    direction: Direction::Above,
    steps: &[step(0.80, 1.5), step(0.65, 1.0)],
};

pub const CAPACITY_LADDER: Ladder = Ladder {
    name: "drain_capacity",
    direction: Direction::Below,
    steps: &[step(0.55, 1.0), step(0.65, 0.5)],
};

pub const ELEVATION_LADDER: Ladder = Ladder {
    name: "elevation",
    direction: Direction::Below,
    steps: &[step(210.0, 0.5), step(212.0, 0.3)],
};

pub const HISTORY_CONTRIBUTION: f64 = 0.3;
/// Frequency must exceed this for the history bonus to apply.
pub const HISTORY_MIN_FREQUENCY: u32 = 3;

/// Score thresholds, checked top-down; lower bound inclusive.
const LEVEL_THRESHOLDS: &[(f64, RiskLevel)] = &[
    (4.5, RiskLevel::Danger),
    (2.5, RiskLevel::Warning),
];

pub const DEFAULT_NOISE_PROBABILITY: f64 = 0.05;

// ── Scorer ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct RiskScorer {
    noise_probability: f64,
}

impl RiskScorer {
    pub fn new(noise_probability: f64) -> Self {
        Self { noise_probability: noise_probability.clamp(0.0, 1.0) }
    }

    /// A scorer that never perturbs labels.
    pub fn noiseless() -> Self {
        Self::new(0.0)
    }

    pub fn noise_probability(&self) -> f64 {
        self.noise_probability
    }

    /// Per-factor contributions, in ladder order, history last.
    pub fn breakdown(features: &FeatureVector) -> [(&'static str, f64); 6] {
        let history = if features.flooded_before && features.flood_frequency > HISTORY_MIN_FREQUENCY {
            HISTORY_CONTRIBUTION
        } else {
            0.0
        };
        [
            (RAIN_24H_LADDER.name, RAIN_24H_LADDER.evaluate(features.rain_24h_mm)),
            (RIVER_LEVEL_LADDER.name, RIVER_LEVEL_LADDER.evaluate(features.river_level_m)),
            (BLOCKAGE_LADDER.name, BLOCKAGE_LADDER.evaluate(features.drain_blockage_risk)),
            (CAPACITY_LADDER.name, CAPACITY_LADDER.evaluate(features.drain_capacity_score)),
            (ELEVATION_LADDER.name, ELEVATION_LADDER.evaluate(features.elevation_m)),
            ("history", history),
        ]
    }

    /// Pre-noise score. Never negative.
    pub fn raw_score(features: &FeatureVector) -> f64 {
        Self::breakdown(features).iter().map(|(_, c)| c).sum()
    }

    pub fn level_for_score(score: f64) -> RiskLevel {
        first_match(LEVEL_THRESHOLDS, |(min, _)| score >= *min)
            .map(|(_, level)| *level)
            .unwrap_or(RiskLevel::Safe)
    }

    /// Deterministic assessment, no label noise.
    pub fn assess(features: &FeatureVector) -> RiskAssessment {
        let score = Self::raw_score(features);
        RiskAssessment {
            level: Self::level_for_score(score),
            score,
            confidence: None,
        }
    }

    /// Assessment with bounded label noise drawn from `rng`.
    pub fn score(&self, features: &FeatureVector, rng: &mut SeededRng) -> RiskAssessment {
        let mut assessment = Self::assess(features);
        if rng.chance(self.noise_probability) {
            let relabelled = assessment
                .level
                .noise_neighbourhood()
                .choose(rng)
                .copied()
                .unwrap_or(assessment.level);
            if relabelled != assessment.level {
                log::trace!(
                    "label noise: score={:.2} {} -> {}",
                    assessment.score, assessment.level, relabelled
                );
            }
            assessment.level = relabelled;
        }
        assessment
    }
}

impl Default for RiskScorer {
    fn default() -> Self {
        Self::new(DEFAULT_NOISE_PROBABILITY)
    }
}
