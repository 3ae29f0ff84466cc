use thiserror::Error;

#[derive(Error, Debug)]
pub enum FloodError {
    #[error("Unknown scenario class '{name}'")]
    InvalidScenario { name: String },

    #[error("Risk level must be 0, 1 or 2, got {value}")]
    InvalidRiskLevel { value: i64 },

    #[error("Requested {requested} distinct wards but the registry holds {available}")]
    InsufficientWards { requested: usize, available: usize },

    #[error("Invalid generation config: {reason}")]
    InvalidConfig { reason: String },

    #[error("Trained model failed: {reason}")]
    Model { reason: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type FloodResult<T> = Result<T, FloodError>;
