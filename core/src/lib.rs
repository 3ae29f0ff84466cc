//! Flood risk scoring and synthetic scenario generation.
//!
//! Offline: wards and scenarios are sampled into correlated feature vectors,
//! scored into Safe / Warning / Danger, and assembled into labelled datasets.
//! Online: the same rules, collapsed, classify partial requests when no
//! trained model is loaded.

pub mod assembler;
pub mod config;
pub mod defaults;
pub mod depth;
pub mod error;
pub mod fallback;
pub mod features;
pub mod ladder;
pub mod monsoon;
pub mod record;
pub mod rng;
pub mod sampler;
pub mod scenario;
pub mod scorer;
pub mod serving;
pub mod store;
pub mod summary;
pub mod table;
pub mod types;
pub mod ward;

pub use assembler::ScenarioDatasetAssembler;
pub use config::{GenerationConfig, GenerationMode};
pub use error::{FloodError, FloodResult};
pub use fallback::{Classification, FallbackClassifier};
pub use features::FeatureVector;
pub use record::FloodRecord;
pub use rng::SeededRng;
pub use scorer::{RiskLevel, RiskScorer};
pub use serving::ServingContext;
pub use ward::WardRegistry;
