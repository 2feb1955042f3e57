#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # docmerge
//!
//! > **Flatten runtime-described business records into document merge fields.**
//!
//! Given a record whose shape is only known through schema metadata, `docmerge` produces an
//! ordered map of dotted placeholder names (`partner.company.name`) to formatted text, and
//! ships that map to a document service as `{{placeholder}}` replacements.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Schemas as data, kinds as types
//! Records carry no compile-time shape. Every property is described by a
//! [`PropertyDescriptor`](model::PropertyDescriptor) whose kind is a closed enum
//! (`Scalar`, `Reference`, `Collection`), so the walker is an exhaustive `match` instead of
//! reflection.
//!
//! ### Bounded walks
//! Schemas may be cyclic (`Partner → Company → Partner`). The flattener threads an explicit
//! depth counter through its recursion; that counter alone guarantees termination.
//!
//! ### One owner for the shared connection
//! The document service is owned by a single Tokio task, the
//! [`DocumentActor`](framework::DocumentActor). Merge workers talk to it through cloned
//! [`DocumentClient`](framework::DocumentClient)s over a channel, so the backend is never
//! touched concurrently and needs no locks.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Metadata ([`model`])
//! - **Role**: schemas, records and the [`SchemaIntrospector`](model::SchemaIntrospector)
//!   capability, with the validating [`SchemaRegistry`](model::SchemaRegistry).
//!
//! ### 2. The Rules ([`format`], [`flatten`])
//! - **Role**: turn one value into text ([`ValueFormatter`](format::ValueFormatter)) and a
//!   whole record graph into a [`FlatFieldMap`](flatten::FlatFieldMap)
//!   ([`FieldFlattener`](flatten::FieldFlattener)).
//!
//! ### 3. The Output ([`merge`])
//! - **Role**: placeholder tokens, [`MergeRequest`](merge::MergeRequest)s, and the two wire
//!   envelopes (`replaceAllText` batch updates and the render-service input).
//!
//! ### 4. The Engine ([`framework`])
//! - **Role**: the document service actor, its client, an in-memory backend and an
//!   expectation-driven mock. See the [`framework::mock`] module for testing.
//!
//! ### 5. The Batch ([`driver`])
//! - **Role**: config groups → records → (record, template) jobs on a bounded worker pool
//!   → per-pair [`BatchReport`](driver::BatchReport).
//!
//! ### 6. The Orchestrator ([`lifecycle`])
//! - **Role**: [`MergeSystem`](lifecycle::MergeSystem) spawns the actor, wires the driver,
//!   and shuts everything down. See the [`lifecycle::tracing`] module for logging.
//!
//! ## 🚀 Quick Start
//!
//! ```rust
//! use docmerge::flatten::FieldFlattener;
//! use docmerge::format::NoTranslation;
//! use docmerge::merge;
//! use docmerge::model::{PropertyDescriptor, Record, Schema, SchemaRegistry};
//! use rust_decimal::Decimal;
//! use std::sync::Arc;
//!
//! let registry = Arc::new(
//!     SchemaRegistry::builder()
//!         .schema(Schema::new(
//!             "Invoice",
//!             vec![PropertyDescriptor::scalar("name"), PropertyDescriptor::scalar("total")],
//!         ))
//!         .build()
//!         .unwrap(),
//! );
//! let flattener = FieldFlattener::new(registry.clone(), Arc::new(NoTranslation));
//!
//! let invoice = Record::new("Invoice", 1)
//!     .with("name", "Acme")
//!     .with("total", Decimal::new(100, 0));
//! let fields = flattener.flatten(&registry.require("Invoice").unwrap(), &invoice);
//!
//! let (text, replaced) = merge::apply("{{name}} owes {{total}}", &merge::build(&fields));
//! assert_eq!(text, "Acme owes 100.00");
//! assert_eq!(replaced, 2);
//! ```
//!
//! ### Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

pub mod driver;
pub mod flatten;
pub mod format;
pub mod framework;
pub mod lifecycle;
pub mod merge;
pub mod model;
