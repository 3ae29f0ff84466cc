//! Dataset verification: distributions, value ranges and invariant checks.

use crate::{
    record::FloodRecord,
    scorer::RiskLevel,
    types::CellId,
    ward::Zone,
};
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, BTreeSet, HashSet},
    fmt,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    fn over(records: &[FloodRecord], field: impl Fn(&FloodRecord) -> f64) -> Option<Self> {
        records.iter().map(field).fold(None, |acc, v| match acc {
            None => Some(Self { min: v, max: v }),
            Some(r) => Some(Self { min: r.min.min(v), max: r.max.max(v) }),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub total:          usize,
    pub distinct_wards: usize,
    pub distinct_zones: usize,
    /// Record count per risk level, indexed by level.
    pub label_counts:   [usize; 3],
    pub zone_counts:    BTreeMap<Zone, usize>,
    pub rain_24h_mm:    Option<ValueRange>,
    pub river_level_m:  Option<ValueRange>,
    pub elevation_m:    Option<ValueRange>,
}

/// One record breaking a range invariant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeViolation {
    pub cell_id: CellId,
    pub field:   &'static str,
    pub value:   f64,
}

impl DatasetSummary {
    pub fn from_records(records: &[FloodRecord]) -> Self {
        let mut label_counts = [0usize; 3];
        let mut zone_counts = BTreeMap::new();
        let mut wards = BTreeSet::new();
        for r in records {
            label_counts[r.flood_risk_level.index()] += 1;
            *zone_counts.entry(r.zone).or_insert(0) += 1;
            wards.insert(r.ward_name.as_str());
        }

        Self {
            total:          records.len(),
            distinct_wards: wards.len(),
            distinct_zones: zone_counts.len(),
            label_counts,
            zone_counts,
            rain_24h_mm:    ValueRange::over(records, |r| r.rain_24h_mm),
            river_level_m:  ValueRange::over(records, |r| r.river_level_m),
            elevation_m:    ValueRange::over(records, |r| r.elevation_m),
        }
    }

    pub fn count(&self, level: RiskLevel) -> usize {
        self.label_counts[level.index()]
    }

    /// Percentage of records at `level`; zero for an empty dataset.
    pub fn share_percent(&self, level: RiskLevel) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(level) as f64 / self.total as f64 * 100.0
    }

    /// Records breaking the range invariants, plus any repeated cell id.
    pub fn violations(records: &[FloodRecord]) -> Vec<RangeViolation> {
        let mut found = Vec::new();
        let mut seen = HashSet::with_capacity(records.len());

        for r in records {
            let unit_fields = [
                ("impervious_ratio", r.impervious_ratio),
                ("drain_capacity_score", r.drain_capacity_score),
                ("drain_blockage_risk", r.drain_blockage_risk),
            ];
            for (field, value) in unit_fields {
                if !(0.0..=1.0).contains(&value) {
                    found.push(RangeViolation { cell_id: r.cell_id, field, value });
                }
            }

            let non_negative = [
                ("avg_reported_depth_cm", r.avg_reported_depth_cm),
                ("max_flood_depth_cm", r.max_flood_depth_cm),
                ("rain_1h_mm", r.rain_1h_mm),
                ("rain_3h_mm", r.rain_3h_mm),
                ("rain_24h_mm", r.rain_24h_mm),
                ("rain_forecast_3h_mm", r.rain_forecast_3h_mm),
                ("distance_to_yamuna_m", r.distance_to_river_m),
            ];
            for (field, value) in non_negative {
                if value < 0.0 {
                    found.push(RangeViolation { cell_id: r.cell_id, field, value });
                }
            }

            if !seen.insert(r.cell_id) {
                found.push(RangeViolation { cell_id: r.cell_id, field: "cell_id", value: r.cell_id as f64 });
            }
        }
        found
    }
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total records: {}", self.total)?;
        writeln!(f, "Unique wards:  {}", self.distinct_wards)?;
        writeln!(f, "Unique zones:  {}", self.distinct_zones)?;
        writeln!(f)?;
        writeln!(f, "Risk level distribution:")?;
        for level in RiskLevel::ALL {
            writeln!(
                f,
                "  {} ({}): {} ({:.1}%)",
                level,
                level.index(),
                self.count(level),
                self.share_percent(level)
            )?;
        }
        writeln!(f)?;
        writeln!(f, "Zone distribution:")?;
        for (zone, count) in &self.zone_counts {
            writeln!(f, "  {zone}: {count} records")?;
        }
        writeln!(f)?;
        writeln!(f, "Data range check:")?;
        let ranges = [
            ("Rain (24h)", self.rain_24h_mm, "mm"),
            ("River level", self.river_level_m, "m"),
            ("Elevation", self.elevation_m, "m"),
        ];
        for (name, range, unit) in ranges {
            match range {
                Some(r) => writeln!(f, "  {name}: {:.1} - {:.1} {unit}", r.min, r.max)?,
                None => writeln!(f, "  {name}: n/a")?,
            }
        }
        Ok(())
    }
}
