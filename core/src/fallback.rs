//! Rule-based classification used when no trained model is available.
//!
//! A collapsed form of the scoring ladder: three signals, OR'd thresholds,
//! a fixed confidence per tier. Never fails; inputs are not range-checked.

use crate::{
    defaults::{ClassificationRequest, WardDefaultsTable},
    depth::DepthEstimator,
    features::FeatureVector,
    ladder::first_match,
    scorer::{RiskAssessment, RiskLevel, RiskScorer},
    types::DepthCm,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy)]
struct FallbackTier {
    rain_24h_above: f64,
    river_above:    f64,
    blockage_above: f64,
    level:          RiskLevel,
    confidence:     f64,
}

impl FallbackTier {
    fn matches(&self, f: &FeatureVector) -> bool {
        f.rain_24h_mm > self.rain_24h_above
            || f.river_level_m > self.river_above
            || f.drain_blockage_risk > self.blockage_above
    }
}

const FALLBACK_TIERS: &[FallbackTier] = &[
    FallbackTier { rain_24h_above: 80.0, river_above: 204.5, blockage_above: 0.75, level: RiskLevel::Danger,  confidence: 0.85 },
    FallbackTier { rain_24h_above: 50.0, river_above: 204.0, blockage_above: 0.60, level: RiskLevel::Warning, confidence: 0.75 },
];

pub const SAFE_CONFIDENCE: f64 = 0.70;

// ── Depth clamps ─────────────────────────────────────────────────────────────

pub const DANGER_MIN_DEPTH_CM: DepthCm = 40.0;
pub const WARNING_DEPTH_RANGE_CM: (DepthCm, DepthCm) = (10.0, 40.0);
pub const SAFE_MAX_DEPTH_CM: DepthCm = 10.0;
pub const DEPTH_CAP_CM: DepthCm = 100.0;

/// Keep a causal depth estimate consistent with the level it is reported under.
pub fn clamp_depth(depth: DepthCm, level: RiskLevel) -> DepthCm {
    let clamped = match level {
        RiskLevel::Danger  => depth.max(DANGER_MIN_DEPTH_CM),
        RiskLevel::Warning => depth.clamp(WARNING_DEPTH_RANGE_CM.0, WARNING_DEPTH_RANGE_CM.1),
        RiskLevel::Safe    => depth.min(SAFE_MAX_DEPTH_CM),
    };
    clamped.min(DEPTH_CAP_CM)
}

/// Response shape handed to the web boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub flood_risk_level:      RiskLevel,
    pub risk_label:            String,
    pub confidence:            f64,
    pub max_flood_depth_cm:    DepthCm,
    pub drain_capacity_score:  f64,
    pub citizen_reports_count: u32,
}

impl Classification {
    pub fn new(level: RiskLevel, confidence: f64, features: &FeatureVector, citizen_reports_count: u32) -> Self {
        Self {
            flood_risk_level: level,
            risk_label:       level.label().to_string(),
            confidence,
            max_flood_depth_cm: clamp_depth(DepthEstimator::estimated_depth(features), level),
            drain_capacity_score: features.drain_capacity_score,
            citizen_reports_count,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackClassifier;

impl FallbackClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Level and fixed tier confidence. The score is the full ladder score,
    /// reported for diagnostics only.
    pub fn assess(&self, features: &FeatureVector) -> RiskAssessment {
        let (level, confidence) = first_match(FALLBACK_TIERS, |t| t.matches(features))
            .map(|t| (t.level, t.confidence))
            .unwrap_or((RiskLevel::Safe, SAFE_CONFIDENCE));
        RiskAssessment {
            level,
            score: RiskScorer::raw_score(features),
            confidence: Some(confidence),
        }
    }

    pub fn classify_features(&self, features: &FeatureVector, citizen_reports_count: u32) -> Classification {
        let assessment = self.assess(features);
        Classification::new(
            assessment.level,
            assessment.confidence.unwrap_or(SAFE_CONFIDENCE),
            features,
            citizen_reports_count,
        )
    }

    /// Fill the request from ward or global defaults, then classify.
    pub fn classify(&self, request: &ClassificationRequest, defaults: &WardDefaultsTable) -> Classification {
        let resolved = request.resolve(defaults);
        self.classify_features(&resolved.features, resolved.citizen_reports_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_clamps_per_level() {
        assert_eq!(clamp_depth(0.0, RiskLevel::Danger), 40.0);
        assert_eq!(clamp_depth(250.0, RiskLevel::Danger), 100.0);
        assert_eq!(clamp_depth(3.0, RiskLevel::Warning), 10.0);
        assert_eq!(clamp_depth(55.0, RiskLevel::Warning), 40.0);
        assert_eq!(clamp_depth(25.0, RiskLevel::Warning), 25.0);
        assert_eq!(clamp_depth(30.0, RiskLevel::Safe), 10.0);
        assert_eq!(clamp_depth(4.0, RiskLevel::Safe), 4.0);
    }

    #[test]
    fn any_single_signal_raises_the_tier() {
        let classifier = FallbackClassifier::new();
        let table = WardDefaultsTable::empty();
        let base = ClassificationRequest {
            rain_24h_mm: Some(20.0),
            river_level_m: Some(203.0),
            drain_blockage_risk: Some(0.3),
            ..ClassificationRequest::default()
        };
        assert_eq!(classifier.classify(&base, &table).flood_risk_level, RiskLevel::Safe);

        let river = ClassificationRequest { river_level_m: Some(204.6), ..base.clone() };
        assert_eq!(classifier.classify(&river, &table).flood_risk_level, RiskLevel::Danger);

        let blockage = ClassificationRequest { drain_blockage_risk: Some(0.65), ..base.clone() };
        assert_eq!(classifier.classify(&blockage, &table).flood_risk_level, RiskLevel::Warning);
    }

    #[test]
    fn thresholds_are_strict() {
        let classifier = FallbackClassifier::new();
        let request = ClassificationRequest {
            rain_24h_mm: Some(50.0),
            river_level_m: Some(204.0),
            drain_blockage_risk: Some(0.60),
            ..ClassificationRequest::default()
        };
        let c = classifier.classify(&request, &WardDefaultsTable::empty());
        assert_eq!(c.flood_risk_level, RiskLevel::Safe);
        assert_eq!(c.confidence, SAFE_CONFIDENCE);
    }
}
