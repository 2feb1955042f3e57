//! # Service Errors
//!
//! Failures talking to the document service. None of these are fatal for a batch: the
//! driver records them against the (record, template) pair and moves on.

/// Errors that can occur while copying or updating a document.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ServiceError {
    #[error("Document service closed")]
    ServiceClosed,
    #[error("Document service dropped response channel")]
    ServiceDropped,
    #[error("Document not found: {0}")]
    NotFound(String),
    #[error("Transport error: {0}")]
    Transport(String),
}
