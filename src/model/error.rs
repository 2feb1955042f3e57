//! Error types for schema metadata.

use thiserror::Error;

/// Errors raised while loading or resolving schema metadata.
///
/// All of these are fatal for a batch: no record of the affected model can be
/// flattened without a consistent schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// No schema is registered under the requested model name.
    #[error("Unknown model: {0}")]
    UnknownModel(String),

    /// A reference or collection property points at an unregistered model.
    #[error("Property {model}.{property} targets unknown model {target}")]
    UnresolvedTarget {
        model: String,
        property: String,
        target: String,
    },

    /// Two schemas were registered under the same model name.
    #[error("Model registered twice: {0}")]
    DuplicateModel(String),

    /// The schema file could not be read.
    #[error("Failed to read schema file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The schema document is not valid JSON for a schema set.
    #[error("Invalid schema document: {0}")]
    Parse(#[from] serde_json::Error),
}
