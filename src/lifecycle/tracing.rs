//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing` crate.
//!
//! ## Configuration
//!
//! The compact format hides the module prefix (`with_target(false)`) and shows spans
//! inline, so a merge job's lines carry the `run` span of the batch that started it.
//!
//! - **Configurable log levels** via the `RUST_LOG` environment variable
//! - **Structured fields** (`file_name`, `document_id`, `template_id`, ...) on every event
//!
//! ## What Gets Traced
//!
//! - **Batch**: pair count at start, succeeded/failed/occurrences at the end (`info`)
//! - **Per pair**: flattened field count (`debug`), merged document (`info`), failure with
//!   model, record and template (`warn`)
//! - **Document service**: startup, every copy and update, shutdown with the request count
//! - **Schemas**: registry size when built, missing reference targets (`warn`)
//!
//! ## Usage Examples
//!
//! ```bash
//! # Batch summaries and one line per document
//! RUST_LOG=info cargo run
//!
//! # Also show fetched record counts and document service requests
//! RUST_LOG=debug cargo run
//!
//! # Only the driver
//! RUST_LOG=docmerge::driver=debug cargo run
//! ```
//!
//! With `RUST_LOG=info` a two-template batch looks like:
//!
//! ```text
//! INFO run{groups=1 workers=4}: Starting merge batch pairs=2
//! INFO Document service started
//! INFO Template copied name="SaleOrder#1" document_id="doc_1"
//! INFO run{groups=1 workers=4}: Merged file_name=SaleOrder#1 document_id=doc_1 occurrences=9
//! WARN run{groups=1 workers=4}: Merge failed model=SaleOrder record_id=1 template_id=missing error=Document not found: missing
//! INFO run{groups=1 workers=4}: Merge batch finished succeeded=1 failed=1 occurrences=9
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
