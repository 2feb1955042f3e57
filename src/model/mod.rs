//! # Model
//!
//! Pure data structures describing *what* gets merged into a document:
//!
//! - [`Schema`] / [`PropertyDescriptor`] - the runtime description of a record type.
//! - [`Record`] / [`Value`] - a live, dynamically typed business record.
//! - [`SchemaRegistry`] - the process-wide, read-only schema cache behind the
//!   [`SchemaIntrospector`] trait.
//!
//! Nothing in here performs I/O or formatting; see [`crate::format`] and
//! [`crate::flatten`] for that.

pub mod error;
pub mod record;
pub mod registry;
pub mod schema;

pub use error::SchemaError;
pub use record::{Record, Value};
pub use registry::{SchemaIntrospector, SchemaRegistry, SchemaRegistryBuilder};
pub use schema::{PropertyDescriptor, PropertyKind, Schema};
