//! Dataset assembly: many (ward, scenario) draws into one labelled table.
//!
//! PER-RECORD ORDER (fixed, never reordered; the seed depends on it):
//!   1. Location jitter
//!   2. Terrain (distance, elevation, slope, imperviousness, drain density)
//!   3. Weather and drainage bands
//!   4. History
//!   5. Label (scored mode only)
//!   6. Report statistics
//!
//! RULES:
//!   - One `SeededRng` drives the whole pass; same seed, same dataset.
//!   - Cell ids are assigned only after the final shuffle, so they carry no
//!     information about generation order.
//!   - The requested record count is always met exactly.

use crate::{
    config::{DepthPolicy, GenerationConfig, GenerationMode, TargetCounts},
    depth::{DepthEstimator, DepthReport},
    error::{FloodError, FloodResult},
    features::{FeatureVector, Location},
    record::FloodRecord,
    rng::SeededRng,
    sampler::FeatureSampler,
    scenario::ScenarioClass,
    scorer::{RiskLevel, RiskScorer},
    ward::{WardProfile, WardRegistry},
};
use rand::{distributions::{Distribution, WeightedIndex}, seq::SliceRandom};

/// A generated row before its identifier is known.
#[derive(Debug, Clone)]
pub struct DraftRecord {
    pub ward:     WardProfile,
    pub location: Location,
    pub features: FeatureVector,
    pub level:    RiskLevel,
    pub depth:    DepthReport,
}

pub struct ScenarioDatasetAssembler<'a> {
    registry: &'a WardRegistry,
    config:   GenerationConfig,
    scorer:   RiskScorer,
}

impl<'a> ScenarioDatasetAssembler<'a> {
    pub fn new(registry: &'a WardRegistry, config: GenerationConfig) -> FloodResult<Self> {
        config.validate()?;
        let scorer = RiskScorer::new(config.label_noise_probability);
        Ok(Self { registry, config, scorer })
    }

    /// Run the configured mode over `config.total_records`.
    pub fn assemble(&self, rng: &mut SeededRng) -> FloodResult<Vec<FloodRecord>> {
        match self.config.mode {
            GenerationMode::Scored => self.assemble_scored(self.config.total_records, rng),
            GenerationMode::Balanced => self.assemble_balanced(self.config.target_counts()?, rng),
        }
    }

    /// Independent sampling: every ward gets an even share of records, each
    /// with a weighted-random scenario, and the scorer decides the label.
    pub fn assemble_scored(&self, total: usize, rng: &mut SeededRng) -> FloodResult<Vec<FloodRecord>> {
        self.check_ward_supply(total)?;

        let wards = self.registry.wards();
        let per_ward = total / wards.len();
        let extra = total % wards.len();
        let weights = WeightedIndex::new(self.config.scenario_weights.resolve()?).map_err(|e| {
            FloodError::InvalidConfig { reason: format!("scenario weights: {e}") }
        })?;

        let mut drafts = Vec::with_capacity(total);
        for (i, ward) in wards.iter().enumerate() {
            let count = per_ward + usize::from(i < extra);
            for _ in 0..count {
                let scenario = ScenarioClass::ALL[weights.sample(rng)];
                drafts.push(self.generate_scored(ward, scenario, rng));
            }
        }

        log::debug!(
            "scored pass: {} wards, {per_ward} records each, {extra} wards with one extra",
            wards.len()
        );
        Ok(self.finalize(drafts, rng))
    }

    /// Target-conditioned sampling: the label multiset is fixed up front and
    /// each record's features are drawn to match its label. Labels are never
    /// re-scored, so the counts come out exactly as requested.
    pub fn assemble_balanced(&self, counts: TargetCounts, rng: &mut SeededRng) -> FloodResult<Vec<FloodRecord>> {
        let total = counts.total();
        self.check_ward_supply(total)?;

        let mut targets = counts.expand();
        targets.shuffle(rng);

        let wards = self.registry.wards();
        let mut unused: Vec<usize> = (0..wards.len()).collect();
        let mut drafts = Vec::with_capacity(total);
        let mut agreeing = 0usize;

        for target in targets {
            let ward_index = if unused.is_empty() {
                rng.next_u64_below(wards.len() as u64) as usize
            } else {
                let pick = rng.next_u64_below(unused.len() as u64) as usize;
                unused.swap_remove(pick)
            };
            let draft = self.generate_targeted(&wards[ward_index], target, rng);
            if RiskScorer::assess(&draft.features).level == target {
                agreeing += 1;
            }
            drafts.push(draft);
        }

        log::debug!(
            "balanced pass: {agreeing}/{total} targets agree with the noiseless scorer"
        );
        Ok(self.finalize(drafts, rng))
    }

    /// One independently sampled, scored record.
    pub fn generate_scored(&self, ward: &WardProfile, scenario: ScenarioClass, rng: &mut SeededRng) -> DraftRecord {
        let location = FeatureSampler::sample_location(ward, rng);
        let features = FeatureSampler::sample(ward, scenario, rng);
        let level = self.scorer.score(&features, rng).level;
        let depth = DepthEstimator::estimate(&features, rng);
        DraftRecord { ward: *ward, location, features, level, depth }
    }

    /// One record whose features were drawn for `target`.
    pub fn generate_targeted(&self, ward: &WardProfile, target: RiskLevel, rng: &mut SeededRng) -> DraftRecord {
        let location = FeatureSampler::sample_location(ward, rng);
        let features = FeatureSampler::sample_for_target(ward, target, rng);
        let depth = match self.config.balanced_depth {
            DepthPolicy::LabelTiered => DepthEstimator::label_tiered(&features, target, rng),
            DepthPolicy::Causal => DepthEstimator::estimate(&features, rng),
        };
        DraftRecord { ward: *ward, location, features, level: target, depth }
    }

    fn check_ward_supply(&self, total: usize) -> FloodResult<()> {
        let available = self.registry.len();
        let short = available == 0 || (!self.config.allow_ward_reuse && total > available);
        if total > 0 && short {
            return Err(FloodError::InsufficientWards { requested: total, available });
        }
        Ok(())
    }

    /// Shuffle, then number sequentially.
    fn finalize(&self, mut drafts: Vec<DraftRecord>, rng: &mut SeededRng) -> Vec<FloodRecord> {
        drafts.shuffle(rng);
        let records: Vec<FloodRecord> = drafts
            .iter()
            .enumerate()
            .map(|(i, d)| {
                FloodRecord::assemble(
                    self.config.first_cell_id + i as u64,
                    &d.ward,
                    d.location,
                    &d.features,
                    d.level,
                    &d.depth,
                )
            })
            .collect();

        let mut by_level = [0usize; 3];
        for r in &records {
            by_level[r.flood_risk_level.index()] += 1;
        }
        log::info!(
            "assembled {} records (seed={}): safe={} warning={} danger={}",
            records.len(),
            rng.seed(),
            by_level[0],
            by_level[1],
            by_level[2]
        );
        records
    }
}
