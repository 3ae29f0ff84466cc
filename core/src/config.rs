use crate::{
    error::{FloodError, FloodResult},
    scenario::ScenarioClass,
    scorer::{RiskLevel, DEFAULT_NOISE_PROBABILITY},
    types::CellId,
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::Path, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    /// Sample each record from a weighted scenario, then score it.
    Scored,
    /// Fix the label multiset first, then sample features to match each label.
    Balanced,
}

impl GenerationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scored   => "scored",
            Self::Balanced => "balanced",
        }
    }
}

impl FromStr for GenerationMode {
    type Err = FloodError;

    fn from_str(s: &str) -> FloodResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scored"   => Ok(Self::Scored),
            "balanced" => Ok(Self::Balanced),
            other => Err(FloodError::InvalidConfig {
                reason: format!("unknown generation mode '{other}'"),
            }),
        }
    }
}

/// How balanced generation derives report statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthPolicy {
    /// Buckets keyed on the assigned label.
    LabelTiered,
    /// Buckets keyed on the causal depth estimate, as in scored mode.
    Causal,
}

/// Relative weight of each scenario, keyed by scenario name.
///
/// Keys accept every spelling `ScenarioClass::from_str` does; a scenario
/// that is not listed weighs zero. Keys are checked by `resolve`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenarioWeights(BTreeMap<String, f64>);

impl ScenarioWeights {
    pub fn new(weights: impl IntoIterator<Item = (ScenarioClass, f64)>) -> Self {
        Self(weights.into_iter().map(|(scenario, w)| (scenario.as_str().to_string(), w)).collect())
    }

    /// Weights in `ScenarioClass::ALL` order. Fails on an unknown scenario
    /// name, or on two spellings of the same scenario.
    pub fn resolve(&self) -> FloodResult<[f64; 5]> {
        let mut weights = [0.0; 5];
        let mut seen = [false; 5];
        for (name, weight) in &self.0 {
            let scenario: ScenarioClass = name.parse()?;
            let slot = scenario as usize;
            if seen[slot] {
                return Err(FloodError::InvalidConfig {
                    reason: format!("scenario '{scenario}' is weighted more than once"),
                });
            }
            seen[slot] = true;
            weights[slot] = *weight;
        }
        Ok(weights)
    }
}

impl Default for ScenarioWeights {
    fn default() -> Self {
        Self::new(ScenarioClass::ALL.into_iter().zip([0.25, 0.25, 0.25, 0.15, 0.10]))
    }
}

/// Relative share of each label in a balanced dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LabelShares {
    pub safe:    f64,
    pub warning: f64,
    pub danger:  f64,
}

impl Default for LabelShares {
    fn default() -> Self {
        Self { safe: 35.0, warning: 40.0, danger: 25.0 }
    }
}

/// Exact number of records wanted per label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TargetCounts {
    pub safe:    usize,
    pub warning: usize,
    pub danger:  usize,
}

impl TargetCounts {
    pub fn new(safe: usize, warning: usize, danger: usize) -> Self {
        Self { safe, warning, danger }
    }

    pub fn total(&self) -> usize {
        self.safe + self.warning + self.danger
    }

    pub fn get(&self, level: RiskLevel) -> usize {
        match level {
            RiskLevel::Safe    => self.safe,
            RiskLevel::Warning => self.warning,
            RiskLevel::Danger  => self.danger,
        }
    }

    /// Split `total` by `shares` using the largest-remainder method, so the
    /// counts always sum to exactly `total`. Ties go to the lower level.
    pub fn from_shares(total: usize, shares: &LabelShares) -> FloodResult<Self> {
        let weights = [shares.safe, shares.warning, shares.danger];
        let sum: f64 = weights.iter().sum();
        if weights.iter().any(|w| *w < 0.0 || !w.is_finite()) || sum <= 0.0 {
            return Err(FloodError::InvalidConfig {
                reason: format!("label shares must be non-negative with a positive sum, got {weights:?}"),
            });
        }

        let exact: Vec<f64> = weights.iter().map(|w| total as f64 * w / sum).collect();
        let mut counts: Vec<usize> = exact.iter().map(|e| e.floor() as usize).collect();
        let mut leftover = total.saturating_sub(counts.iter().sum::<usize>());

        let mut order: Vec<usize> = (0..3).collect();
        order.sort_by(|&a, &b| {
            let ra = exact[a] - exact[a].floor();
            let rb = exact[b] - exact[b].floor();
            rb.total_cmp(&ra).then(a.cmp(&b))
        });
        for i in order {
            if leftover == 0 {
                break;
            }
            counts[i] += 1;
            leftover -= 1;
        }

        Ok(Self::new(counts[0], counts[1], counts[2]))
    }

    /// The label multiset in level order (unshuffled).
    pub fn expand(&self) -> Vec<RiskLevel> {
        RiskLevel::ALL
            .iter()
            .flat_map(|level| std::iter::repeat(*level).take(self.get(*level)))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationConfig {
    pub seed:                    u64,
    pub mode:                    GenerationMode,
    pub total_records:           usize,
    pub first_cell_id:           CellId,
    pub scenario_weights:        ScenarioWeights,
    pub label_shares:            LabelShares,
    pub label_noise_probability: f64,
    pub allow_ward_reuse:        bool,
    pub balanced_depth:          DepthPolicy,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            seed:                    42,
            mode:                    GenerationMode::Scored,
            total_records:           1000,
            first_cell_id:           1000,
            scenario_weights:        ScenarioWeights::default(),
            label_shares:            LabelShares::default(),
            label_noise_probability: DEFAULT_NOISE_PROBABILITY,
            allow_ward_reuse:        true,
            balanced_depth:          DepthPolicy::LabelTiered,
        }
    }
}

impl GenerationConfig {
    /// Load from a JSON file. Missing keys fall back to the defaults.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        Ok(Self::from_json(&content)?)
    }

    /// Parse and validate a JSON document. Missing keys fall back to the defaults.
    pub fn from_json(json: &str) -> FloodResult<Self> {
        let config: GenerationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// The 100-record, 35/40/25 balanced preset.
    pub fn balanced() -> Self {
        Self {
            mode: GenerationMode::Balanced,
            total_records: 100,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> FloodResult<()> {
        let weights = self.scenario_weights.resolve()?;
        if weights.iter().any(|w| *w < 0.0 || !w.is_finite()) || weights.iter().sum::<f64>() <= 0.0 {
            return Err(FloodError::InvalidConfig {
                reason: format!("scenario weights must be non-negative with a positive sum, got {weights:?}"),
            });
        }
        if !(0.0..=1.0).contains(&self.label_noise_probability) {
            return Err(FloodError::InvalidConfig {
                reason: format!(
                    "label_noise_probability must be in [0, 1], got {}",
                    self.label_noise_probability
                ),
            });
        }
        TargetCounts::from_shares(self.total_records, &self.label_shares)?;
        Ok(())
    }

    pub fn target_counts(&self) -> FloodResult<TargetCounts> {
        TargetCounts::from_shares(self.total_records, &self.label_shares)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_shares_split_one_hundred_exactly() {
        let counts = TargetCounts::from_shares(100, &LabelShares::default()).unwrap();
        assert_eq!(counts, TargetCounts::new(35, 40, 25));
    }

    #[test]
    fn largest_remainder_keeps_total() {
        for total in [0, 1, 7, 33, 101, 999] {
            let counts = TargetCounts::from_shares(total, &LabelShares::default()).unwrap();
            assert_eq!(counts.total(), total, "total {total}");
        }
        let thirds = LabelShares { safe: 1.0, warning: 1.0, danger: 1.0 };
        assert_eq!(TargetCounts::from_shares(10, &thirds).unwrap(), TargetCounts::new(4, 3, 3));
    }

    #[test]
    fn bad_shares_are_rejected() {
        let zero = LabelShares { safe: 0.0, warning: 0.0, danger: 0.0 };
        assert!(TargetCounts::from_shares(10, &zero).is_err());
        let negative = LabelShares { safe: -1.0, warning: 2.0, danger: 1.0 };
        assert!(TargetCounts::from_shares(10, &negative).is_err());
    }

    #[test]
    fn expand_orders_by_level() {
        let labels = TargetCounts::new(1, 2, 1).expand();
        assert_eq!(
            labels,
            vec![RiskLevel::Safe, RiskLevel::Warning, RiskLevel::Warning, RiskLevel::Danger]
        );
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: GenerationConfig =
            serde_json::from_str(r#"{ "seed": 7, "mode": "balanced", "total_records": 100 }"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.mode, GenerationMode::Balanced);
        assert_eq!(config.first_cell_id, 1000);
        assert_eq!(config.balanced_depth, DepthPolicy::LabelTiered);
        config.validate().unwrap();
    }

    #[test]
    fn scenario_keys_accept_every_spelling() {
        let config = GenerationConfig::from_json(
            r#"{ "scenario_weights": { "dry": 1.0, "light_rain": 2.0, "Heavy": 3.0 } }"#,
        )
        .unwrap();
        assert_eq!(config.scenario_weights.resolve().unwrap(), [1.0, 2.0, 0.0, 3.0, 0.0]);
    }

    #[test]
    fn unknown_scenario_key_fails_fast() {
        let err = GenerationConfig::from_json(
            r#"{ "scenario_weights": { "normal": 1.0, "heavy": 1.0, "tsunami": 5.0 } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, FloodError::InvalidScenario { ref name } if name == "tsunami"));
    }

    #[test]
    fn duplicate_scenario_spellings_are_rejected() {
        let err = GenerationConfig::from_json(r#"{ "scenario_weights": { "dry": 1.0, "normal": 1.0 } }"#)
            .unwrap_err();
        assert!(matches!(err, FloodError::InvalidConfig { .. }));
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let err = GenerationConfig::from_json(r#"{ "seed": "forty-two" }"#).unwrap_err();
        assert!(matches!(err, FloodError::Serialization(_)));
    }

    #[test]
    fn misspelled_keys_are_rejected() {
        let shares = r#"{ "label_shares": { "safe": 1.0, "warning": 1.0, "danger": 1.0, "dangr": 2.0 } }"#;
        assert!(matches!(GenerationConfig::from_json(shares), Err(FloodError::Serialization(_))));
        let top = r#"{ "scenario_weigths": { "normal": 1.0 } }"#;
        assert!(matches!(GenerationConfig::from_json(top), Err(FloodError::Serialization(_))));
    }

    #[test]
    fn default_weights_follow_scenario_order() {
        let weights = ScenarioWeights::default().resolve().unwrap();
        assert_eq!(weights, [0.25, 0.25, 0.25, 0.15, 0.10]);
    }

    #[test]
    fn noise_probability_out_of_range_is_rejected() {
        let config = GenerationConfig { label_noise_probability: 1.5, ..GenerationConfig::default() };
        assert!(matches!(config.validate(), Err(FloodError::InvalidConfig { .. })));
    }
}
