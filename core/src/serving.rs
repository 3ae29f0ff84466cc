//! The serving-side context: everything classification needs, built once at
//! startup and shared by reference afterwards.
//!
//! RULE: Nothing in here is mutated after construction. Concurrent callers
//! share a `&ServingContext` with no locking.

use crate::{
    defaults::{ClassificationRequest, WardDefaultsTable},
    error::FloodResult,
    fallback::{Classification, FallbackClassifier},
    features::FeatureVector,
    monsoon::MonsoonConditions,
    rng::SeededRng,
    scenario::Band,
    scorer::RiskLevel,
    ward::WardRegistry,
};
use serde::{Deserialize, Serialize};

/// An externally trained classifier.
pub trait RiskModel {
    fn name(&self) -> &str {
        "trained-model"
    }

    fn predict(&self, features: &FeatureVector) -> FloodResult<ModelOutput>;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelOutput {
    pub level:         RiskLevel,
    /// Class probabilities indexed by level.
    pub probabilities: [f64; 3],
}

impl ModelOutput {
    pub fn confidence(&self) -> f64 {
        self.probabilities.iter().copied().fold(0.0, f64::max)
    }
}

// ── Ward outlook jitter ──────────────────────────────────────────────────────

const OUTLOOK_RAIN_1H_JITTER: Band = Band(-3.0, 3.0);
const OUTLOOK_RAIN_3H_JITTER: Band = Band(-5.0, 5.0);
const OUTLOOK_RAIN_24H_JITTER: Band = Band(-10.0, 10.0);
const OUTLOOK_BLOCKAGE_JITTER: Band = Band(-0.1, 0.1);
const OUTLOOK_EXTRA_REPORTS: (i64, i64) = (0, 2);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WardForecast {
    pub ward_name:      String,
    pub classification: Classification,
}

/// Every requested ward classified under one set of shared conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WardOutlook {
    pub conditions: MonsoonConditions,
    pub wards:      Vec<WardForecast>,
    /// Ward count per level, indexed by level.
    pub counts:     [usize; 3],
}

impl WardOutlook {
    pub fn count(&self, level: RiskLevel) -> usize {
        self.counts[level.index()]
    }
}

pub struct ServingContext {
    registry: WardRegistry,
    defaults: WardDefaultsTable,
    model:    Option<Box<dyn RiskModel + Send + Sync>>,
    fallback: FallbackClassifier,
}

impl ServingContext {
    pub fn new(registry: WardRegistry, defaults: WardDefaultsTable) -> Self {
        Self {
            registry,
            defaults,
            model: None,
            fallback: FallbackClassifier::new(),
        }
    }

    /// Registry-derived defaults and no trained model.
    pub fn from_registry(registry: WardRegistry) -> Self {
        let defaults = WardDefaultsTable::from_registry(&registry);
        Self::new(registry, defaults)
    }

    pub fn with_model(mut self, model: Box<dyn RiskModel + Send + Sync>) -> Self {
        self.model = Some(model);
        self
    }

    pub fn registry(&self) -> &WardRegistry {
        &self.registry
    }

    pub fn defaults(&self) -> &WardDefaultsTable {
        &self.defaults
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    pub fn classify(&self, request: &ClassificationRequest) -> Classification {
        let resolved = request.resolve(&self.defaults);
        self.classify_features(&resolved.features, resolved.citizen_reports_count)
    }

    /// Trained model first; the rule-based fallback when there is none or it
    /// errors. Depth always comes from the causal estimate clamped to the level.
    pub fn classify_features(&self, features: &FeatureVector, citizen_reports_count: u32) -> Classification {
        if let Some(model) = &self.model {
            match model.predict(features) {
                Ok(output) => {
                    return Classification::new(
                        output.level,
                        output.confidence(),
                        features,
                        citizen_reports_count,
                    );
                }
                Err(e) => {
                    log::warn!("{} prediction failed: {e}. Using fallback.", model.name());
                }
            }
        }
        self.fallback.classify_features(features, citizen_reports_count)
    }

    /// Classify each named ward under `conditions`, with small per-ward jitter
    /// on rain and blockage. Unknown ward names classify on global defaults.
    pub fn ward_outlook(
        &self,
        conditions: &MonsoonConditions,
        wards: &[&str],
        rng: &mut SeededRng,
    ) -> WardOutlook {
        let mut counts = [0usize; 3];
        let forecasts: Vec<WardForecast> = wards
            .iter()
            .map(|name| {
                let d = self.defaults.lookup(Some(*name));
                let blockage = d.drain_blockage_risk
                    + conditions.drain_blockage_adjustment
                    + OUTLOOK_BLOCKAGE_JITTER.sample(rng);
                let features = FeatureVector {
                    rain_1h_mm:           (conditions.rain_1h_mm + OUTLOOK_RAIN_1H_JITTER.sample(rng)).max(0.0),
                    rain_3h_mm:           (conditions.rain_3h_mm + OUTLOOK_RAIN_3H_JITTER.sample(rng)).max(0.0),
                    rain_24h_mm:          (conditions.rain_24h_mm + OUTLOOK_RAIN_24H_JITTER.sample(rng)).max(0.0),
                    rain_forecast_3h_mm:  conditions.rain_forecast_3h_mm,
                    distance_to_river_m:  d.distance_to_river_m,
                    elevation_m:          d.elevation_m,
                    slope_percent:        d.slope_percent,
                    impervious_ratio:     d.impervious_ratio,
                    drain_density:        d.drain_density,
                    drain_capacity_score: d.drain_capacity_score,
                    drain_blockage_risk:  blockage.clamp(0.0, 1.0),
                    river_level_m:        conditions.river_level_m,
                    flooded_before:       d.flooded_before,
                    flood_frequency:      d.flood_frequency,
                };
                let reports = d.citizen_reports_count
                    + rng.int_inclusive(OUTLOOK_EXTRA_REPORTS.0, OUTLOOK_EXTRA_REPORTS.1) as u32;
                let classification = self.classify_features(&features, reports);
                counts[classification.flood_risk_level.index()] += 1;
                WardForecast { ward_name: name.to_string(), classification }
            })
            .collect();

        log::debug!(
            "step={} outlook over {} wards: safe={} warning={} danger={}",
            conditions.step,
            forecasts.len(),
            counts[0],
            counts[1],
            counts[2]
        );
        WardOutlook { conditions: *conditions, wards: forecasts, counts }
    }
}
