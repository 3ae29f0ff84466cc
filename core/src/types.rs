//! Shared primitive types used across the engine.

/// Sequential identifier of a persisted flood record.
pub type CellId = u64;

/// Water depth in centimetres.
pub type DepthCm = f64;
