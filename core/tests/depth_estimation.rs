//! Depth estimation and the anti-leakage discipline.

use floodrisk_core::{
    depth::DepthEstimator,
    features::{FeatureVector, FEATURE_COLUMNS},
    fallback::clamp_depth,
    record::RECORD_COLUMNS,
    rng::SeededRng,
    scorer::{RiskLevel, RiskScorer},
};

fn features(rain_24h_mm: f64, river_level_m: f64, drain_capacity_score: f64, elevation_m: f64) -> FeatureVector {
    FeatureVector {
        rain_1h_mm: rain_24h_mm * 0.15,
        rain_3h_mm: rain_24h_mm * 0.45,
        rain_24h_mm,
        rain_forecast_3h_mm: rain_24h_mm * 0.5,
        distance_to_river_m: 2500.0,
        elevation_m,
        slope_percent: 2.0,
        impervious_ratio: 0.8,
        drain_density: 0.5,
        drain_capacity_score,
        drain_blockage_risk: 0.6,
        river_level_m,
        flooded_before: true,
        flood_frequency: 4,
    }
}

#[test]
fn linear_depth_model() {
    let depth = DepthEstimator::estimated_depth(&features(100.0, 204.0, 0.5, 210.0));
    assert!((depth - 30.0).abs() < 1e-9, "got {depth}");

    // River below datum and ground below 205 m contribute nothing.
    let depth = DepthEstimator::estimated_depth(&features(100.0, 202.0, 0.0, 200.0));
    assert!((depth - 40.0).abs() < 1e-9, "got {depth}");
}

#[test]
fn depth_is_floored_at_zero() {
    let depth = DepthEstimator::estimated_depth(&features(0.0, 203.0, 0.9, 225.0));
    assert_eq!(depth, 0.0);
}

#[test]
fn report_statistics_do_not_depend_on_the_label() {
    // History moves the score across the Danger threshold but is not a depth input.
    let with_history = features(105.0, 204.6, 0.5, 211.0);
    let without_history = FeatureVector { flooded_before: false, flood_frequency: 0, ..with_history };

    let danger = RiskScorer::assess(&with_history);
    let warning = RiskScorer::assess(&without_history);
    assert_eq!(danger.level, RiskLevel::Danger, "score {}", danger.score);
    assert_eq!(warning.level, RiskLevel::Warning, "score {}", warning.score);

    for seed in [3, 77, 1234] {
        let a = DepthEstimator::estimate(&with_history, &mut SeededRng::new(seed));
        let b = DepthEstimator::estimate(&without_history, &mut SeededRng::new(seed));
        assert_eq!(a, b, "seed {seed}");
    }

    // The serving-side clamp is the only place a level touches depth, and it
    // starts from the same causal estimate for every level.
    let raw = DepthEstimator::estimated_depth(&with_history);
    assert_eq!(raw, DepthEstimator::estimated_depth(&without_history));
    for level in RiskLevel::ALL {
        let clamped = clamp_depth(raw, level);
        assert!((0.0..=100.0).contains(&clamped));
    }
}

#[test]
fn deep_water_lands_in_the_top_tier() {
    let f = features(150.0, 206.0, 0.3, 205.0);
    let mut rng = SeededRng::new(5);
    for _ in 0..200 {
        let report = DepthEstimator::estimate(&f, &mut rng);
        assert!(report.estimated_depth_cm > 40.0);
        assert!((6..=22).contains(&report.citizen_reports_count));
        assert!(report.avg_reported_depth_cm >= 27.0 && report.avg_reported_depth_cm <= 63.0);
        assert!(report.max_flood_depth_cm >= 45.0 && report.max_flood_depth_cm <= 105.0);
    }
}

#[test]
fn dry_ground_reports_little() {
    let f = features(0.0, 203.0, 0.9, 225.0);
    let mut rng = SeededRng::new(6);
    for _ in 0..200 {
        let report = DepthEstimator::estimate(&f, &mut rng);
        assert!(report.citizen_reports_count <= 4);
        assert!(report.avg_reported_depth_cm >= 0.0 && report.avg_reported_depth_cm <= 11.0);
        assert!(report.max_flood_depth_cm >= 0.0 && report.max_flood_depth_cm <= 17.0);
    }
}

#[test]
fn label_tiered_reports_follow_the_label() {
    let f = features(60.0, 203.9, 0.7, 215.0);
    let mut rng = SeededRng::new(8);
    for _ in 0..100 {
        let danger = DepthEstimator::label_tiered(&f, RiskLevel::Danger, &mut rng);
        assert!((10..=20).contains(&danger.citizen_reports_count));
        let safe = DepthEstimator::label_tiered(&f, RiskLevel::Safe, &mut rng);
        assert!(safe.citizen_reports_count <= 3);
        assert_eq!(safe.estimated_depth_cm, DepthEstimator::estimated_depth(&f));
    }
}

#[test]
fn model_inputs_exclude_outcome_columns() {
    for outcome in ["citizen_reports_count", "avg_reported_depth_cm", "max_flood_depth_cm", "flood_risk_level", "cell_id"] {
        assert!(!FEATURE_COLUMNS.contains(&outcome), "{outcome} leaks into model inputs");
        assert!(RECORD_COLUMNS.contains(&outcome));
    }
    assert!(FEATURE_COLUMNS.iter().all(|c| RECORD_COLUMNS.contains(c)));
}
