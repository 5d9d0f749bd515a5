//! Error types for the estimation pipeline

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnergyError {
    #[error("invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("report serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("settings parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl EnergyError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EnergyError>;
