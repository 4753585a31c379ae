use thiserror::Error;

#[derive(Error, Debug)]
pub enum SaturationError {
    #[error("Invalid capacity: {available_hours}h/week at productivity {productivity_factor} leaves no usable hours")]
    InvalidCapacity {
        available_hours:     f64,
        productivity_factor: f64,
    },

    #[error("Invalid productivity factor {0}: must be in (0, 1]")]
    InvalidProductivityFactor(f64),

    #[error("Invalid estimated hours for work item '{item_id}': {hours}")]
    InvalidHours { item_id: String, hours: f64 },

    #[error("Invalid thresholds: {reason}")]
    InvalidThresholds { reason: String },

    #[error("Duplicate consultant '{consultant_id}': already evaluated in this batch")]
    DuplicateConsultant { consultant_id: String },

    #[error("Invalid refresh interval: {0}s, must be between 1s and one week")]
    InvalidRefreshInterval(u64),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SatResult<T> = Result<T, SaturationError>;
