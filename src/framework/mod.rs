//! # Document Service Framework
//!
//! The remote document service is the one resource every merge job shares. Instead of
//! handing a connection to each worker, one [`DocumentActor`] owns the backend and all
//! workers talk to it through cheap, cloneable [`DocumentClient`]s.
//!
//! # Main Components
//!
//! - [`DocumentBackend`] - Trait implemented by anything that can copy a template and apply
//!   merge requests to the copy
//! - [`DocumentActor`] - Owns a backend and processes requests sequentially
//! - [`DocumentClient`] - Type-safe async handle used by the batch driver
//! - [`ServiceError`] - Transport-level failures, recoverable per document
//! - [`InMemoryDocuments`] - A backend holding template bodies in memory
//!
//! # Testing
//!
//! See [`mock`] for an expectation-driven client that needs no backend at all.

pub mod actor;
pub mod backend;
pub mod client;
pub mod error;
pub mod memory;
pub mod message;
pub mod mock;

pub use actor::DocumentActor;
pub use backend::{DocumentBackend, DocumentId};
pub use client::DocumentClient;
pub use error::ServiceError;
pub use memory::{InMemoryDocuments, StoredDocument};
pub use message::{DocumentRequest, Response};
