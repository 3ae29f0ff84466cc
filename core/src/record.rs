//! The persisted unit: one row of the generated dataset.

use crate::{
    depth::DepthReport,
    features::{FeatureVector, Location},
    scorer::RiskLevel,
    types::CellId,
    ward::{WardProfile, Zone},
};
use serde::{Deserialize, Serialize};

/// Column order of the tabular format. Matches the field order of [`FloodRecord`].
pub const RECORD_COLUMNS: [&str; 23] = [
    "cell_id",
    "latitude",
    "longitude",
    "ward_name",
    "zone",
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
    "citizen_reports_count",
    "avg_reported_depth_cm",
    "max_flood_depth_cm",
    "flood_risk_level",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloodRecord {
    pub cell_id:               CellId,
    pub latitude:              f64,
    pub longitude:             f64,
    pub ward_name:             String,
    pub zone:                  Zone,
    #[serde(rename = "distance_to_yamuna_m")]
    pub distance_to_river_m:   f64,
    pub rain_1h_mm:            f64,
    pub rain_3h_mm:            f64,
    pub rain_24h_mm:           f64,
    pub rain_forecast_3h_mm:   f64,
    pub elevation_m:           f64,
    pub slope_percent:         f64,
    pub impervious_ratio:      f64,
    pub drain_density:         f64,
    pub drain_capacity_score:  f64,
    pub drain_blockage_risk:   f64,
    #[serde(rename = "yamuna_level_m")]
    pub river_level_m:         f64,
    pub flooded_before:        u8,
    pub flood_frequency:       u32,
    pub citizen_reports_count: u32,
    pub avg_reported_depth_cm: f64,
    pub max_flood_depth_cm:    f64,
    pub flood_risk_level:      RiskLevel,
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

impl FloodRecord {
    /// Build a row, applying the output rounding: coordinates to 4 decimals,
    /// ratios and scores to 2, every other measurement to 1.
    pub fn assemble(
        cell_id: CellId,
        ward: &WardProfile,
        location: Location,
        features: &FeatureVector,
        level: RiskLevel,
        depth: &DepthReport,
    ) -> Self {
        Self {
            cell_id,
            latitude:              round_to(location.latitude, 4),
            longitude:             round_to(location.longitude, 4),
            ward_name:             ward.name.to_string(),
            zone:                  ward.zone,
            distance_to_river_m:   round_to(features.distance_to_river_m, 1),
            rain_1h_mm:            round_to(features.rain_1h_mm, 1),
            rain_3h_mm:            round_to(features.rain_3h_mm, 1),
            rain_24h_mm:           round_to(features.rain_24h_mm, 1),
            rain_forecast_3h_mm:   round_to(features.rain_forecast_3h_mm, 1),
            elevation_m:           round_to(features.elevation_m, 1),
            slope_percent:         round_to(features.slope_percent, 1),
            impervious_ratio:      round_to(features.impervious_ratio, 2),
            drain_density:         round_to(features.drain_density, 2),
            drain_capacity_score:  round_to(features.drain_capacity_score, 2),
            drain_blockage_risk:   round_to(features.drain_blockage_risk, 2),
            river_level_m:         round_to(features.river_level_m, 1),
            flooded_before:        features.flooded_before as u8,
            flood_frequency:       features.flood_frequency,
            citizen_reports_count: depth.citizen_reports_count,
            avg_reported_depth_cm: round_to(depth.avg_reported_depth_cm, 1),
            max_flood_depth_cm:    round_to(depth.max_flood_depth_cm, 1),
            flood_risk_level:      level,
        }
    }

    /// The (rounded) causal inputs of this row.
    pub fn features(&self) -> FeatureVector {
        FeatureVector {
            rain_1h_mm:           self.rain_1h_mm,
            rain_3h_mm:           self.rain_3h_mm,
            rain_24h_mm:          self.rain_24h_mm,
            rain_forecast_3h_mm:  self.rain_forecast_3h_mm,
            distance_to_river_m:  self.distance_to_river_m,
            elevation_m:          self.elevation_m,
            slope_percent:        self.slope_percent,
            impervious_ratio:     self.impervious_ratio,
            drain_density:        self.drain_density,
            drain_capacity_score: self.drain_capacity_score,
            drain_blockage_risk:  self.drain_blockage_risk,
            river_level_m:        self.river_level_m,
            flooded_before:       self.flooded_before != 0,
            flood_frequency:      self.flood_frequency,
        }
    }
}
