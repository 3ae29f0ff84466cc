//! Estimated water depth and the citizen-report statistics derived from it.
//!
//! RULE: The causal path below takes a `FeatureVector` and nothing else.
//! It cannot see a risk label, so outcome-like columns never leak the label.

use crate::{
    features::FeatureVector,
    ladder::first_match,
    rng::SeededRng,
    scenario::Band,
    scorer::RiskLevel,
    types::DepthCm,
};
use serde::{Deserialize, Serialize};

// ── Depth model coefficients ─────────────────────────────────────────────────

const RAIN_24H_CM_PER_MM: f64 = 0.4;
const RIVER_CM_PER_M: f64 = 15.0;
const RIVER_DATUM_M: f64 = 203.0;
const CAPACITY_CM: f64 = 30.0;
const ELEVATION_CM_PER_M: f64 = 2.0;
const ELEVATION_DATUM_M: f64 = 205.0;

const REPORT_JITTER: (i64, i64) = (-2, 2);
const AVG_DEPTH_JITTER: f64 = 3.0;
const MAX_DEPTH_JITTER: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthReport {
    pub estimated_depth_cm:    DepthCm,
    pub citizen_reports_count: u32,
    pub avg_reported_depth_cm: DepthCm,
    pub max_flood_depth_cm:    DepthCm,
}

/// One bucket of report statistics.
#[derive(Debug, Clone, Copy)]
struct ReportTier {
    /// Applies when the estimated depth is strictly above this.
    depth_above: f64,
    reports:     (i64, i64),
    avg_depth:   Band,
    max_depth:   Band,
    /// Depth statistics are zero when nobody reported.
    zero_without_reports: bool,
}

const CAUSAL_TIERS: &[ReportTier] = &[
    ReportTier { depth_above: 40.0, reports: (8, 20), avg_depth: Band(30.0, 60.0), max_depth: Band(50.0, 100.0), zero_without_reports: false },
    ReportTier { depth_above: 20.0, reports: (3, 12), avg_depth: Band(15.0, 35.0), max_depth: Band(25.0, 55.0),  zero_without_reports: false },
    ReportTier { depth_above: 5.0,  reports: (0, 5),  avg_depth: Band(5.0, 18.0),  max_depth: Band(10.0, 25.0),  zero_without_reports: true },
    ReportTier { depth_above: f64::NEG_INFINITY, reports: (0, 2), avg_depth: Band(0.0, 8.0), max_depth: Band(0.0, 12.0), zero_without_reports: true },
];

/// Label-conditioned buckets used by balanced generation, indexed by level.
const LABEL_TIERS: [ReportTier; 3] = [
    ReportTier { depth_above: 0.0, reports: (0, 3),   avg_depth: Band(0.0, 12.0),  max_depth: Band(0.0, 18.0),  zero_without_reports: true },
    ReportTier { depth_above: 0.0, reports: (3, 12),  avg_depth: Band(12.0, 35.0), max_depth: Band(20.0, 55.0), zero_without_reports: false },
    ReportTier { depth_above: 0.0, reports: (10, 20), avg_depth: Band(30.0, 55.0), max_depth: Band(50.0, 95.0), zero_without_reports: false },
];

impl ReportTier {
    fn draw(&self, rng: &mut SeededRng) -> (u32, f64, f64) {
        let reports = rng.int_inclusive(self.reports.0, self.reports.1);
        if self.zero_without_reports && reports == 0 {
            return (0, 0.0, 0.0);
        }
        let avg = self.avg_depth.sample(rng);
        let max = self.max_depth.sample(rng);
        (reports as u32, avg, max)
    }
}

pub struct DepthEstimator;

impl DepthEstimator {
    /// Linear causal depth model, floored at zero.
    pub fn estimated_depth(features: &FeatureVector) -> DepthCm {
        let depth = RAIN_24H_CM_PER_MM * features.rain_24h_mm
            + RIVER_CM_PER_M * (features.river_level_m - RIVER_DATUM_M).max(0.0)
            - CAPACITY_CM * features.drain_capacity_score
            - ELEVATION_CM_PER_M * (features.elevation_m - ELEVATION_DATUM_M).max(0.0);
        depth.max(0.0)
    }

    /// Report statistics bucketed on the estimated depth, with jitter so the
    /// bucket edges do not recur exactly.
    pub fn estimate(features: &FeatureVector, rng: &mut SeededRng) -> DepthReport {
        let estimated_depth_cm = Self::estimated_depth(features);
        let tier = first_match(CAUSAL_TIERS, |t| estimated_depth_cm > t.depth_above)
            .unwrap_or(&CAUSAL_TIERS[CAUSAL_TIERS.len() - 1]);
        let (reports, avg, max) = tier.draw(rng);

        let reports = (reports as i64 + rng.int_inclusive(REPORT_JITTER.0, REPORT_JITTER.1)).max(0);
        let avg = (avg + rng.uniform(-AVG_DEPTH_JITTER, AVG_DEPTH_JITTER)).max(0.0);
        let max = (max + rng.uniform(-MAX_DEPTH_JITTER, MAX_DEPTH_JITTER)).max(0.0);

        DepthReport {
            estimated_depth_cm,
            citizen_reports_count: reports as u32,
            avg_reported_depth_cm: avg,
            max_flood_depth_cm:    max,
        }
    }

    /// Report statistics bucketed on an assigned label. This is the relaxed
    /// variant used when the label is chosen before the features; the
    /// estimated depth is still computed causally.
    pub fn label_tiered(features: &FeatureVector, level: RiskLevel, rng: &mut SeededRng) -> DepthReport {
        let (reports, avg, max) = LABEL_TIERS[level.index()].draw(rng);
        DepthReport {
            estimated_depth_cm:    Self::estimated_depth(features),
            citizen_reports_count: reports,
            avg_reported_depth_cm: avg,
            max_flood_depth_cm:    max,
        }
    }
}
