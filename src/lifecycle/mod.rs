//! # System Lifecycle & Orchestration
//!
//! Starting, wiring and stopping the pieces of a merge run.
//!
//! **Key Responsibilities:**
//! 1. **Actor Creation** - Spawn the document service actor around a backend
//! 2. **Dependency Injection** - Hand the actor's client, the schema registry and the record
//!    source to a [`BatchDriver`](crate::driver::BatchDriver)
//! 3. **Graceful Shutdown** - Drop every client, wait for the actor, return its backend
//! 4. **Observability Setup** - [`setup_tracing`]
//!
//! ## The MergeSystem Pattern
//!
//! ```rust,ignore
//! let system = MergeSystem::new(registry, source, InMemoryDocuments::new(), localizer);
//! let report = system.run(&config).await?;
//! let backend = system.shutdown().await?;
//! ```
//!
//! Shutdown relies on channel closure: once the driver (and with it the last
//! [`DocumentClient`](crate::framework::DocumentClient)) is dropped, the actor's receive
//! loop ends and its task completes.

pub mod merge_system;
pub mod tracing;

pub use merge_system::MergeSystem;
pub use tracing::setup_tracing;
