//! Error types for the batch driver.
//!
//! Everything here is fatal for a batch invocation. Per-document transport failures are
//! not errors at this level; they are recorded in the [`BatchReport`](super::BatchReport).

use crate::model::SchemaError;
use thiserror::Error;

/// The batch configuration could not be loaded or is unusable.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// The external record repository failed.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Record source failed for {model}: {message}")]
pub struct SourceError {
    pub model: String,
    pub message: String,
}

impl SourceError {
    pub fn new(model: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            message: message.into(),
        }
    }
}

/// Errors that abort a whole batch.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("Worker pool closed")]
    WorkerPoolClosed,

    #[error("Merge worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}
