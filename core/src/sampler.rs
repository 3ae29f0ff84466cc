//! Correlated feature sampling for one (ward, scenario) draw.
//!
//! RULE: Historical fields (prior flood, flood frequency) are drawn from the
//! ward's static drainage and elevation only. They describe the past and must
//! never see the current rain or river draw.

use crate::{
    features::{FeatureVector, Location},
    rng::SeededRng,
    scenario::{
        Band, ScenarioClass, TargetProfile, FORECAST_3H_RATIO, RAIN_1H_RATIO,
        TARGET_FORECAST_3H_RATIO, TARGET_RAIN_1H_RATIO, TARGET_RAIN_3H_RATIO,
    },
    scorer::RiskLevel,
    ward::WardProfile,
};

// ── Constants ────────────────────────────────────────────────────────────────

pub const COORDINATE_JITTER_DEG: f64 = 0.01;
pub const DISTANCE_JITTER_M: f64 = 200.0;

pub const SLOPE_PERCENT: Band = Band(1.0, 5.5);
pub const IMPERVIOUS_RATIO: Band = Band(0.55, 0.92);
pub const DRAIN_DENSITY: Band = Band(0.35, 0.72);

/// Below this elevation a ward carries an extra historical flooding penalty.
pub const LOW_LYING_ELEVATION_M: f64 = 210.0;
const ELEVATION_PENALTY_SPAN_M: f64 = 50.0;
const CAPACITY_WEIGHT: f64 = 0.5;

const FREQUENCY_IF_FLOODED: (i64, i64) = (1, 6);
const FREQUENCY_IF_DRY: (i64, i64) = (0, 1);

/// Static terrain of one cell, independent of the weather.
#[derive(Debug, Clone, Copy)]
struct Terrain {
    distance_to_river_m: f64,
    elevation_m:         f64,
    slope_percent:       f64,
    impervious_ratio:    f64,
    drain_density:       f64,
}

/// Draws internally-correlated feature vectors.
pub struct FeatureSampler;

impl FeatureSampler {
    /// Ward anchor perturbed by a small uniform jitter.
    pub fn sample_location(ward: &WardProfile, rng: &mut SeededRng) -> Location {
        Location {
            latitude:  ward.latitude + rng.uniform(-COORDINATE_JITTER_DEG, COORDINATE_JITTER_DEG),
            longitude: ward.longitude + rng.uniform(-COORDINATE_JITTER_DEG, COORDINATE_JITTER_DEG),
        }
    }

    /// Independent sampling: the scenario fixes the weather bands and the
    /// label is decided later by the scorer.
    pub fn sample(ward: &WardProfile, scenario: ScenarioClass, rng: &mut SeededRng) -> FeatureVector {
        let terrain = Self::sample_terrain(ward, rng);
        let ranges = scenario.ranges();

        let rain_24h_mm = ranges.rain_24h_mm.sample(rng);
        let rain_3h_mm = rain_24h_mm * ranges.rain_3h_ratio.sample(rng);
        let river_level_m = ranges.river_level_m.sample(rng);
        let drain_blockage_risk = ranges.drain_blockage.sample(rng);
        let drain_capacity_score = ranges.drain_capacity.sample(rng);

        let rain_1h_mm = rain_3h_mm * RAIN_1H_RATIO.sample(rng);
        let rain_forecast_3h_mm = rain_3h_mm * FORECAST_3H_RATIO.sample(rng);

        let (flooded_before, flood_frequency) =
            Self::sample_history(drain_capacity_score, terrain.elevation_m, rng);

        log::trace!(
            "sample ward={} scenario={scenario} rain_24h={rain_24h_mm:.1} river={river_level_m:.2}",
            ward.name
        );

        Self::compose(
            terrain,
            [rain_1h_mm, rain_3h_mm, rain_24h_mm, rain_forecast_3h_mm],
            river_level_m,
            drain_capacity_score,
            drain_blockage_risk,
            (flooded_before, flood_frequency),
        )
    }

    /// Target-conditioned sampling: bands are picked from the intended label
    /// so that label is the most likely scorer outcome.
    pub fn sample_for_target(ward: &WardProfile, target: RiskLevel, rng: &mut SeededRng) -> FeatureVector {
        let terrain = Self::sample_terrain(ward, rng);
        let profile = TargetProfile::for_level(target);

        let rain_24h_mm = profile.rain_24h_mm.sample(rng);
        let river_level_m = profile.river_level_m.sample(rng);
        let drain_blockage_risk = profile.drain_blockage.sample(rng);
        let drain_capacity_score = profile.drain_capacity.sample(rng);

        let rain_3h_mm = rain_24h_mm * TARGET_RAIN_3H_RATIO.sample(rng);
        let rain_1h_mm = rain_3h_mm * TARGET_RAIN_1H_RATIO.sample(rng);
        let rain_forecast_3h_mm = rain_3h_mm * TARGET_FORECAST_3H_RATIO.sample(rng);

        let history = Self::sample_history(drain_capacity_score, terrain.elevation_m, rng);

        Self::compose(
            terrain,
            [rain_1h_mm, rain_3h_mm, rain_24h_mm, rain_forecast_3h_mm],
            river_level_m,
            drain_capacity_score,
            drain_blockage_risk,
            history,
        )
    }

    /// Probability that a ward has flooded before, from static traits only.
    /// Poor drainage always contributes; low ground adds a penalty below
    /// [`LOW_LYING_ELEVATION_M`].
    pub fn historical_risk_factor(drain_capacity_score: f64, elevation_m: f64) -> f64 {
        let drainage = (1.0 - drain_capacity_score) * CAPACITY_WEIGHT;
        let elevation_penalty = if elevation_m < LOW_LYING_ELEVATION_M {
            (LOW_LYING_ELEVATION_M - elevation_m) / ELEVATION_PENALTY_SPAN_M
        } else {
            0.0
        };
        (drainage + elevation_penalty).clamp(0.0, 1.0)
    }

    /// Weighted coin for the prior-flood flag, then a frequency drawn from a
    /// wider range when the flag is set.
    pub fn sample_history(drain_capacity_score: f64, elevation_m: f64, rng: &mut SeededRng) -> (bool, u32) {
        let factor = Self::historical_risk_factor(drain_capacity_score, elevation_m);
        let flooded_before = rng.chance(factor);
        let (lo, hi) = if flooded_before { FREQUENCY_IF_FLOODED } else { FREQUENCY_IF_DRY };
        (flooded_before, rng.int_inclusive(lo, hi) as u32)
    }

    fn sample_terrain(ward: &WardProfile, rng: &mut SeededRng) -> Terrain {
        let distance_to_river_m =
            (ward.distance_to_river_m + rng.uniform(-DISTANCE_JITTER_M, DISTANCE_JITTER_M)).max(0.0);
        let (elev_lo, elev_hi) = ward.zone.elevation_range();
        Terrain {
            distance_to_river_m,
            elevation_m:      rng.uniform(elev_lo, elev_hi),
            slope_percent:    SLOPE_PERCENT.sample(rng),
            impervious_ratio: IMPERVIOUS_RATIO.sample(rng),
            drain_density:    DRAIN_DENSITY.sample(rng),
        }
    }

    fn compose(
        terrain: Terrain,
        rain: [f64; 4],
        river_level_m: f64,
        drain_capacity_score: f64,
        drain_blockage_risk: f64,
        (flooded_before, flood_frequency): (bool, u32),
    ) -> FeatureVector {
        let [rain_1h_mm, rain_3h_mm, rain_24h_mm, rain_forecast_3h_mm] = rain;
        FeatureVector {
            rain_1h_mm,
            rain_3h_mm,
            rain_24h_mm,
            rain_forecast_3h_mm,
            distance_to_river_m: terrain.distance_to_river_m,
            elevation_m:         terrain.elevation_m,
            slope_percent:       terrain.slope_percent,
            impervious_ratio:    terrain.impervious_ratio,
            drain_density:       terrain.drain_density,
            drain_capacity_score,
            drain_blockage_risk,
            river_level_m,
            flooded_before,
            flood_frequency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ward::WardRegistry;

    #[test]
    fn rain_windows_are_ordered() {
        let registry = WardRegistry::delhi();
        let mut rng = SeededRng::new(2024);
        for ward in registry.wards().iter().take(40) {
            for scenario in ScenarioClass::ALL {
                let f = FeatureSampler::sample(ward, scenario, &mut rng);
                assert!(f.rain_1h_mm <= f.rain_3h_mm);
                assert!(f.rain_3h_mm <= f.rain_24h_mm);
                assert!(f.rain_forecast_3h_mm > f.rain_3h_mm);
            }
        }
    }

    #[test]
    fn scenario_bands_are_respected() {
        let ward = *WardRegistry::delhi().get("Shahdara").unwrap();
        let mut rng = SeededRng::new(9);
        for scenario in ScenarioClass::ALL {
            let ranges = scenario.ranges();
            for _ in 0..50 {
                let f = FeatureSampler::sample(&ward, scenario, &mut rng);
                assert!(ranges.rain_24h_mm.contains(f.rain_24h_mm));
                assert!(ranges.river_level_m.contains(f.river_level_m));
                assert!(ranges.drain_blockage.contains(f.drain_blockage_risk));
                assert!(ranges.drain_capacity.contains(f.drain_capacity_score));
                let (lo, hi) = ward.zone.elevation_range();
                assert!(f.elevation_m >= lo && f.elevation_m <= hi);
            }
        }
    }

    #[test]
    fn location_stays_near_anchor() {
        let ward = *WardRegistry::delhi().get("Karol Bagh").unwrap();
        let mut rng = SeededRng::new(1);
        for _ in 0..100 {
            let loc = FeatureSampler::sample_location(&ward, &mut rng);
            assert!((loc.latitude - ward.latitude).abs() <= COORDINATE_JITTER_DEG);
            assert!((loc.longitude - ward.longitude).abs() <= COORDINATE_JITTER_DEG);
        }
    }

    #[test]
    fn historical_factor_ignores_weather_and_rewards_drainage() {
        let good = FeatureSampler::historical_risk_factor(0.88, 225.0);
        let poor = FeatureSampler::historical_risk_factor(0.45, 225.0);
        let low = FeatureSampler::historical_risk_factor(0.45, 205.0);
        assert!(poor > good);
        assert!(low > poor);
        assert!((0.0..=1.0).contains(&low));
    }

    #[test]
    fn frequency_range_depends_on_flag() {
        let mut rng = SeededRng::new(77);
        for _ in 0..500 {
            let (flooded, freq) = FeatureSampler::sample_history(0.2, 200.0, &mut rng);
            if flooded {
                assert!((1..=6).contains(&freq));
            } else {
                assert!(freq <= 1);
            }
        }
    }
}
