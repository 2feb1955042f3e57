use crate::driver::{BatchConfig, BatchDriver, BatchReport, DriverError, RecordSource};
use crate::format::Localizer;
use crate::framework::{DocumentActor, DocumentBackend};
use crate::model::SchemaIntrospector;
use std::sync::Arc;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};

/// Capacity of the document service request channel.
pub const DOCUMENT_CHANNEL_SIZE: usize = 32;

/// A running document service plus the driver that feeds it.
///
/// `MergeSystem` is responsible for:
/// - **Lifecycle Management**: starting and stopping the document actor
/// - **Dependency Wiring**: giving the driver its client, schemas and records
///
/// # Example
///
/// ```rust
/// use docmerge::driver::{BatchConfig, ConfigGroup, InMemoryRecordSource, TemplateRef};
/// use docmerge::format::NoTranslation;
/// use docmerge::framework::InMemoryDocuments;
/// use docmerge::lifecycle::MergeSystem;
/// use docmerge::model::{PropertyDescriptor, Record, Schema, SchemaRegistry};
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() {
///     let registry = SchemaRegistry::builder()
///         .schema(Schema::new("Partner", vec![PropertyDescriptor::scalar("name")]))
///         .build()
///         .unwrap();
///     let source = InMemoryRecordSource::new()
///         .with_record(Record::new("Partner", 1).with("name", "Acme"));
///     let backend = InMemoryDocuments::new().with_template("hello", "Hello {{name}}");
///
///     let system = MergeSystem::new(
///         Arc::new(registry),
///         Arc::new(source),
///         backend,
///         Arc::new(NoTranslation),
///     );
///     let config = BatchConfig::new(vec![ConfigGroup::new(
///         "Partner",
///         "out",
///         vec![TemplateRef::new("hello")],
///     )]);
///     let report = system.run(&config).await.unwrap();
///     assert_eq!(report.succeeded(), 1);
///
///     let backend = system.shutdown().await.unwrap();
///     assert_eq!(backend.find("Partner#1", "hello").unwrap().body, "Hello Acme");
/// }
/// ```
pub struct MergeSystem<B: DocumentBackend> {
    driver: BatchDriver,
    handle: JoinHandle<B>,
}

impl<B: DocumentBackend> MergeSystem<B> {
    /// Spawns the document actor around `backend` and wires the driver to it.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn new(
        introspector: Arc<dyn SchemaIntrospector>,
        source: Arc<dyn RecordSource>,
        backend: B,
        localizer: Arc<dyn Localizer>,
    ) -> Self {
        let (actor, client) = DocumentActor::new(DOCUMENT_CHANNEL_SIZE, backend);
        let handle = tokio::spawn(actor.run());
        let driver = BatchDriver::new(introspector, localizer, source, client);
        Self { driver, handle }
    }

    pub fn driver(&self) -> &BatchDriver {
        &self.driver
    }

    pub async fn run(&self, config: &BatchConfig) -> Result<BatchReport, DriverError> {
        self.driver.run(config).await
    }

    /// Stops the document service and returns its backend.
    ///
    /// Dropping the driver drops the last client, which closes the channel and ends the
    /// actor's loop. An `Err` means the actor task panicked.
    pub async fn shutdown(self) -> Result<B, JoinError> {
        info!("Shutting down merge system...");
        drop(self.driver);

        match self.handle.await {
            Ok(backend) => {
                info!("Merge system shutdown complete.");
                Ok(backend)
            }
            Err(e) => {
                error!("Document actor failed: {:?}", e);
                Err(e)
            }
        }
    }
}
