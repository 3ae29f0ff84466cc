//! Serving-time requests and the defaults that complete them.
//!
//! Resolution order for every field: explicit value, then the ward default,
//! then the global constant. Weather fields have no ward default.

use crate::{
    features::FeatureVector,
    record::FloodRecord,
    ward::WardRegistry,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Static per-ward characteristics used to fill a partial request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WardDefaults {
    pub distance_to_river_m:   f64,
    pub elevation_m:           f64,
    pub slope_percent:         f64,
    pub impervious_ratio:      f64,
    pub drain_density:         f64,
    pub drain_capacity_score:  f64,
    pub drain_blockage_risk:   f64,
    pub flooded_before:        bool,
    pub flood_frequency:       u32,
    pub citizen_reports_count: u32,
}

/// Every recognised field's fallback value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDefaults {
    pub rain_1h_mm:          f64,
    pub rain_3h_mm:          f64,
    pub rain_24h_mm:         f64,
    pub rain_forecast_3h_mm: f64,
    pub river_level_m:       f64,
    pub ward:                WardDefaults,
}

pub const GLOBAL_DEFAULTS: FieldDefaults = FieldDefaults {
    rain_1h_mm:          15.5,
    rain_3h_mm:          42.3,
    rain_24h_mm:         85.2,
    rain_forecast_3h_mm: 38.5,
    river_level_m:       203.5,
    ward: WardDefaults {
        distance_to_river_m:   4000.0,
        elevation_m:           215.0,
        slope_percent:         2.5,
        impervious_ratio:      0.75,
        drain_density:         0.50,
        drain_capacity_score:  0.70,
        drain_blockage_risk:   0.55,
        flooded_before:        false,
        flood_frequency:       1,
        citizen_reports_count: 0,
    },
};

/// Ward name → defaults. Unknown or absent names resolve to the globals.
#[derive(Debug, Clone, Default)]
pub struct WardDefaultsTable {
    by_name: HashMap<String, WardDefaults>,
}

impl WardDefaultsTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Distance from the registry, elevation at the middle of the zone's
    /// band, everything else global.
    pub fn from_registry(registry: &WardRegistry) -> Self {
        let by_name = registry
            .wards()
            .iter()
            .map(|w| {
                let defaults = WardDefaults {
                    distance_to_river_m: w.distance_to_river_m,
                    elevation_m:         w.zone.typical_elevation(),
                    ..GLOBAL_DEFAULTS.ward
                };
                (w.name.to_string(), defaults)
            })
            .collect();
        Self { by_name }
    }

    /// The first record seen for each ward supplies its defaults.
    pub fn from_records(records: &[FloodRecord]) -> Self {
        let mut by_name = HashMap::new();
        for r in records {
            by_name.entry(r.ward_name.clone()).or_insert(WardDefaults {
                distance_to_river_m:   r.distance_to_river_m,
                elevation_m:           r.elevation_m,
                slope_percent:         r.slope_percent,
                impervious_ratio:      r.impervious_ratio,
                drain_density:         r.drain_density,
                drain_capacity_score:  r.drain_capacity_score,
                drain_blockage_risk:   r.drain_blockage_risk,
                flooded_before:        r.flooded_before != 0,
                flood_frequency:       r.flood_frequency,
                citizen_reports_count: r.citizen_reports_count,
            });
        }
        Self { by_name }
    }

    pub fn get(&self, ward_name: &str) -> Option<&WardDefaults> {
        self.by_name.get(ward_name)
    }

    pub fn lookup(&self, ward_name: Option<&str>) -> &WardDefaults {
        ward_name
            .and_then(|name| self.by_name.get(name))
            .unwrap_or(&GLOBAL_DEFAULTS.ward)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// A partial feature vector as received from a caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationRequest {
    pub ward_name:            Option<String>,
    pub rain_1h_mm:           Option<f64>,
    pub rain_3h_mm:           Option<f64>,
    pub rain_24h_mm:          Option<f64>,
    pub rain_forecast_3h_mm:  Option<f64>,
    #[serde(alias = "yamuna_level_m")]
    pub river_level_m:        Option<f64>,
    #[serde(alias = "distance_to_yamuna_m")]
    pub distance_to_river_m:  Option<f64>,
    pub elevation_m:          Option<f64>,
    pub slope_percent:        Option<f64>,
    pub impervious_ratio:     Option<f64>,
    pub drain_density:        Option<f64>,
    pub drain_capacity_score: Option<f64>,
    pub drain_blockage_risk:  Option<f64>,
    pub flooded_before:       Option<bool>,
    pub flood_frequency:      Option<u32>,
}

/// A request with every field filled in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedRequest {
    pub features:              FeatureVector,
    pub citizen_reports_count: u32,
}

impl ClassificationRequest {
    pub fn for_ward(name: impl Into<String>) -> Self {
        Self { ward_name: Some(name.into()), ..Self::default() }
    }

    pub fn resolve(&self, table: &WardDefaultsTable) -> ResolvedRequest {
        let ward = table.lookup(self.ward_name.as_deref());
        let g = &GLOBAL_DEFAULTS;
        let features = FeatureVector {
            rain_1h_mm:           self.rain_1h_mm.unwrap_or(g.rain_1h_mm),
            rain_3h_mm:           self.rain_3h_mm.unwrap_or(g.rain_3h_mm),
            rain_24h_mm:          self.rain_24h_mm.unwrap_or(g.rain_24h_mm),
            rain_forecast_3h_mm:  self.rain_forecast_3h_mm.unwrap_or(g.rain_forecast_3h_mm),
            river_level_m:        self.river_level_m.unwrap_or(g.river_level_m),
            distance_to_river_m:  self.distance_to_river_m.unwrap_or(ward.distance_to_river_m),
            elevation_m:          self.elevation_m.unwrap_or(ward.elevation_m),
            slope_percent:        self.slope_percent.unwrap_or(ward.slope_percent),
            impervious_ratio:     self.impervious_ratio.unwrap_or(ward.impervious_ratio),
            drain_density:        self.drain_density.unwrap_or(ward.drain_density),
            drain_capacity_score: self.drain_capacity_score.unwrap_or(ward.drain_capacity_score),
            drain_blockage_risk:  self.drain_blockage_risk.unwrap_or(ward.drain_blockage_risk),
            flooded_before:       self.flooded_before.unwrap_or(ward.flooded_before),
            flood_frequency:      self.flood_frequency.unwrap_or(ward.flood_frequency),
        };
        ResolvedRequest { features, citizen_reports_count: ward.citizen_reports_count }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_request_resolves_to_globals() {
        let resolved = ClassificationRequest::default().resolve(&WardDefaultsTable::empty());
        let f = resolved.features;
        assert_eq!(f.rain_24h_mm, 85.2);
        assert_eq!(f.river_level_m, 203.5);
        assert_eq!(f.distance_to_river_m, 4000.0);
        assert_eq!(f.drain_blockage_risk, 0.55);
        assert!(!f.flooded_before);
        assert_eq!(f.flood_frequency, 1);
        assert_eq!(resolved.citizen_reports_count, 0);
    }

    #[test]
    fn explicit_beats_ward_beats_global() {
        let table = WardDefaultsTable::from_registry(&WardRegistry::delhi());
        let mut request = ClassificationRequest::for_ward("Karol Bagh");
        request.elevation_m = Some(209.0);

        let f = request.resolve(&table).features;
        assert_eq!(f.elevation_m, 209.0);
        assert_eq!(f.distance_to_river_m, 3500.0);
        assert_eq!(f.slope_percent, 2.5);
    }

    #[test]
    fn explicit_zero_is_kept() {
        let mut request = ClassificationRequest::default();
        request.drain_blockage_risk = Some(0.0);
        request.rain_24h_mm = Some(0.0);
        let f = request.resolve(&WardDefaultsTable::empty()).features;
        assert_eq!(f.drain_blockage_risk, 0.0);
        assert_eq!(f.rain_24h_mm, 0.0);
    }

    #[test]
    fn unknown_ward_uses_globals() {
        let table = WardDefaultsTable::from_registry(&WardRegistry::delhi());
        let f = ClassificationRequest::for_ward("Atlantis").resolve(&table).features;
        assert_eq!(f.distance_to_river_m, 4000.0);
        assert_eq!(f.elevation_m, 215.0);
    }

    #[test]
    fn request_accepts_river_aliases() {
        let request: ClassificationRequest =
            serde_json::from_str(r#"{"ward_name":"Paharganj","yamuna_level_m":204.9}"#).unwrap();
        assert_eq!(request.river_level_m, Some(204.9));
        assert_eq!(request.rain_1h_mm, None);
    }
}
