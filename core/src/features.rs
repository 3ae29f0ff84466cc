//! The causal inputs of the risk model.

use serde::{Deserialize, Serialize};

/// Every causal measurement for one cell at one moment.
///
/// Rain, distance and counts are non-negative; river level and elevation are
/// absolute metres; ratios and drainage scores live in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub rain_1h_mm:           f64,
    pub rain_3h_mm:           f64,
    pub rain_24h_mm:          f64,
    pub rain_forecast_3h_mm:  f64,
    pub distance_to_river_m:  f64,
    pub elevation_m:          f64,
    pub slope_percent:        f64,
    pub impervious_ratio:     f64,
    pub drain_density:        f64,
    pub drain_capacity_score: f64,
    pub drain_blockage_risk:  f64,
    pub river_level_m:        f64,
    pub flooded_before:       bool,
    pub flood_frequency:      u32,
}

/// Names of the model inputs, in the order of [`FeatureVector::model_inputs`].
/// Outcome columns (report counts and depths) are deliberately absent.
pub const FEATURE_COLUMNS: [&str; 14] = [
    "distance_to_yamuna_m",
    "rain_1h_mm",
    "rain_3h_mm",
    "rain_24h_mm",
    "rain_forecast_3h_mm",
    "elevation_m",
    "slope_percent",
    "impervious_ratio",
    "drain_density",
    "drain_capacity_score",
    "drain_blockage_risk",
    "yamuna_level_m",
    "flooded_before",
    "flood_frequency",
];

impl FeatureVector {
    /// Flatten into the column order a trained model consumes.
    pub fn model_inputs(&self) -> [f64; 14] {
        [
            self.distance_to_river_m,
            self.rain_1h_mm,
            self.rain_3h_mm,
            self.rain_24h_mm,
            self.rain_forecast_3h_mm,
            self.elevation_m,
            self.slope_percent,
            self.impervious_ratio,
            self.drain_density,
            self.drain_capacity_score,
            self.drain_blockage_risk,
            self.river_level_m,
            if self.flooded_before { 1.0 } else { 0.0 },
            self.flood_frequency as f64,
        ]
    }
}

/// Jittered position of a generated cell inside its ward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude:  f64,
    pub longitude: f64,
}
