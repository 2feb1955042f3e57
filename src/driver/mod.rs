//! # Batch Driver
//!
//! Turns a [`BatchConfig`] into rendered documents.
//!
//! ## Flow
//!
//! 1. Validate the config and resolve every group's schema. An unknown model aborts the
//!    batch before anything is sent to the document service.
//! 2. Fetch `page_limit` records per group from the [`RecordSource`]. A source failure
//!    also aborts the batch.
//! 3. Every (record, template) pair becomes one [`MergeJob`]: flatten, build the merge
//!    requests, copy the template to `<Model>#<id>`, then batch-update the copy.
//! 4. Jobs run on a [`JoinSet`], at most `workers` at a time. A failing pair is logged
//!    and recorded in the [`BatchReport`]; the other pairs carry on.
//!
//! ```text
//! BatchDriver::run
//!   ├─ resolve schemas       (fatal)
//!   ├─ fetch records         (fatal)
//!   └─ JoinSet ── MergeJob ── DocumentClient ──► DocumentActor
//!              ├─ MergeJob ── DocumentClient ──►      │
//!              └─ ...                                 ▼
//!                                               DocumentBackend
//! ```

pub mod config;
pub mod error;
pub mod report;
pub mod source;

pub use config::{BatchConfig, ConfigGroup, TemplateRef};
pub use error::{ConfigError, DriverError, SourceError};
pub use report::{BatchReport, PairOutcome, PairReport};
pub use source::{InMemoryRecordSource, RecordSource};

use crate::flatten::FieldFlattener;
use crate::format::Localizer;
use crate::framework::{DocumentClient, DocumentId, ServiceError};
use crate::merge::{self, carbone::RenderInput, MergeRequest};
use crate::model::{Record, Schema, SchemaError, SchemaIntrospector};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, instrument, warn, Instrument, Span};

/// Name of the document generated for `id` of `model`.
pub fn output_file_name(model: &str, id: i64) -> String {
    format!("{model}#{id}")
}

/// Builds the render-service envelope for one record.
pub fn render_input(flattener: &FieldFlattener, schema: &Schema, record: &Record) -> RenderInput {
    RenderInput::new(schema.name(), flattener.flatten(schema, record))
}

/// Runs merge batches against a document service.
pub struct BatchDriver {
    introspector: Arc<dyn SchemaIntrospector>,
    localizer: Arc<dyn Localizer>,
    source: Arc<dyn RecordSource>,
    documents: DocumentClient,
}

impl BatchDriver {
    pub fn new(
        introspector: Arc<dyn SchemaIntrospector>,
        localizer: Arc<dyn Localizer>,
        source: Arc<dyn RecordSource>,
        documents: DocumentClient,
    ) -> Self {
        Self {
            introspector,
            localizer,
            source,
            documents,
        }
    }

    /// A flattener sharing this driver's introspector and localizer.
    pub fn flattener(&self, max_depth: usize) -> FieldFlattener {
        FieldFlattener::new(self.introspector.clone(), self.localizer.clone())
            .with_max_depth(max_depth)
    }

    #[instrument(skip(self, config), fields(groups = config.groups.len(), workers = config.workers))]
    pub async fn run(&self, config: &BatchConfig) -> Result<BatchReport, DriverError> {
        config.validate()?;

        let mut schemas = Vec::with_capacity(config.groups.len());
        for group in &config.groups {
            let schema = self
                .introspector
                .schema(&group.model)
                .ok_or_else(|| SchemaError::UnknownModel(group.model.clone()))?;
            schemas.push(schema);
        }

        let mut jobs = Vec::new();
        for (group, schema) in config.groups.iter().zip(schemas) {
            let records = self.source.fetch(&group.model, config.page_limit).await?;
            debug!(model = %group.model, records = records.len(), "Fetched records");
            for record in records {
                for template in &group.templates {
                    jobs.push(MergeJob {
                        schema: schema.clone(),
                        record: record.clone(),
                        folder: group.destination_folder.clone(),
                        template_id: template.id.clone(),
                    });
                }
            }
        }

        info!(pairs = jobs.len(), "Starting merge batch");

        let flattener = Arc::new(self.flattener(config.max_depth));
        let permits = Arc::new(Semaphore::new(config.workers));
        let mut workers = JoinSet::new();
        let total = jobs.len();

        for (index, job) in jobs.into_iter().enumerate() {
            let permit = permits
                .clone()
                .acquire_owned()
                .await
                .map_err(|_| DriverError::WorkerPoolClosed)?;
            let flattener = flattener.clone();
            let documents = self.documents.clone();
            workers.spawn(
                async move {
                    let _permit = permit;
                    (index, job.execute(&flattener, &documents).await)
                }
                .instrument(Span::current()),
            );
        }

        let mut finished = Vec::with_capacity(total);
        while let Some(joined) = workers.join_next().await {
            finished.push(joined?);
        }
        finished.sort_by_key(|(index, _)| *index);

        let report = BatchReport::new(finished.into_iter().map(|(_, pair)| pair).collect());
        info!(
            succeeded = report.succeeded(),
            failed = report.failed(),
            occurrences = report.occurrences(),
            "Merge batch finished"
        );
        Ok(report)
    }
}

/// One (record, template) pair.
struct MergeJob {
    schema: Arc<Schema>,
    record: Arc<Record>,
    folder: String,
    template_id: String,
}

impl MergeJob {
    async fn execute(self, flattener: &FieldFlattener, documents: &DocumentClient) -> PairReport {
        let file_name = output_file_name(self.schema.name(), self.record.id());
        let fields = flattener.flatten(&self.schema, &self.record);
        let requests = merge::build(&fields);
        debug!(%file_name, template_id = %self.template_id, fields = fields.len(), "Flattened record");

        let outcome = match self.ship(documents, &file_name, requests).await {
            Ok((document_id, occurrences)) => {
                info!(%file_name, %document_id, occurrences, "Merged");
                PairOutcome::Merged {
                    document_id,
                    occurrences,
                }
            }
            Err(error) => {
                warn!(
                    model = %self.schema.name(),
                    record_id = self.record.id(),
                    template_id = %self.template_id,
                    %error,
                    "Merge failed"
                );
                PairOutcome::Failed { error }
            }
        };

        PairReport {
            model: self.schema.name().to_string(),
            record_id: self.record.id(),
            template_id: self.template_id,
            file_name,
            outcome,
        }
    }

    async fn ship(
        &self,
        documents: &DocumentClient,
        file_name: &str,
        requests: Vec<MergeRequest>,
    ) -> Result<(DocumentId, usize), ServiceError> {
        let document_id = documents
            .copy_template(&self.folder, file_name, &self.template_id)
            .await?;
        let occurrences = documents.batch_update(&document_id, requests).await?;
        Ok((document_id, occurrences))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::NoTranslation;
    use crate::framework::mock::MockDocumentService;
    use crate::model::{PropertyDescriptor, SchemaRegistry};
    use async_trait::async_trait;

    fn registry() -> Arc<SchemaRegistry> {
        Arc::new(
            SchemaRegistry::builder()
                .schema(Schema::new(
                    "Partner",
                    vec![
                        PropertyDescriptor::scalar("name"),
                        PropertyDescriptor::reference("company", "Company")
                            .with_display_field("name"),
                    ],
                ))
                .schema(Schema::new(
                    "Company",
                    vec![PropertyDescriptor::scalar("name")],
                ))
                .build()
                .unwrap(),
        )
    }

    fn partners() -> InMemoryRecordSource {
        let acme = Record::new("Company", 7).with("name", "Acme");
        InMemoryRecordSource::new()
            .with_record(Record::new("Partner", 2).with("name", "Bob").with("company", acme))
            .with_record(Record::new("Partner", 1).with("name", "Alice"))
    }

    fn driver(source: impl RecordSource + 'static, documents: DocumentClient) -> BatchDriver {
        BatchDriver::new(registry(), Arc::new(NoTranslation), Arc::new(source), documents)
    }

    fn config(templates: &[&str]) -> BatchConfig {
        BatchConfig::new(vec![ConfigGroup::new(
            "Partner",
            "out",
            templates.iter().map(|t| TemplateRef::new(*t)).collect(),
        )])
    }

    struct BrokenSource;

    #[async_trait]
    impl RecordSource for BrokenSource {
        async fn fetch(&self, model: &str, _limit: usize) -> Result<Vec<Arc<Record>>, SourceError> {
            Err(SourceError::new(model, "connection reset"))
        }
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name("SaleOrder", 42), "SaleOrder#42");
    }

    #[test]
    fn test_render_input_uses_model_and_fields() {
        let registry = registry();
        let flattener = FieldFlattener::new(registry.clone(), Arc::new(NoTranslation));
        let schema = registry.require("Partner").unwrap();
        let record = Record::new("Partner", 1).with("name", "Alice");

        let input = render_input(&flattener, &schema, &record);
        assert_eq!(input.report_name, "Partner");
        assert_eq!(input.data.get("name"), Some("Alice"));
        assert_eq!(input.data.get("company.name"), Some(""));
    }

    #[tokio::test]
    async fn test_failed_pair_does_not_stop_the_batch() {
        let mut mock = MockDocumentService::new();
        mock.expect_copy("quote")
            .return_err(ServiceError::Transport("quota exceeded".into()));
        mock.expect_copy("quote").return_ok("doc_2");
        mock.expect_update("doc_2").return_ok(3);

        let report = driver(partners(), mock.client())
            .run(&config(&["quote"]).with_workers(1))
            .await
            .unwrap();

        assert_eq!(report.pairs().len(), 2);
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.occurrences(), 3);
        assert_eq!(report.pairs()[0].file_name, "Partner#1");
        assert!(matches!(
            report.pairs()[0].outcome,
            PairOutcome::Failed {
                error: ServiceError::Transport(_)
            }
        ));
        mock.verify();
    }

    #[tokio::test]
    async fn test_report_order_is_record_then_template() {
        let mut mock = MockDocumentService::new();
        for (template, doc) in [("a", "d1"), ("b", "d2"), ("a", "d3"), ("b", "d4")] {
            mock.expect_copy(template).return_ok(doc);
            mock.expect_update(doc).return_ok(1);
        }

        let report = driver(partners(), mock.client())
            .run(&config(&["a", "b"]))
            .await
            .unwrap();

        let order: Vec<(i64, &str)> = report
            .pairs()
            .iter()
            .map(|p| (p.record_id, p.template_id.as_str()))
            .collect();
        assert_eq!(order, vec![(1, "a"), (1, "b"), (2, "a"), (2, "b")]);
        assert_eq!(report.succeeded(), 4);
        mock.verify();
    }

    #[tokio::test]
    async fn test_unknown_model_is_fatal_before_any_call() {
        let mock = MockDocumentService::new();
        let config = BatchConfig::new(vec![
            ConfigGroup::new("Partner", "out", vec![TemplateRef::new("quote")]),
            ConfigGroup::new("Invoice", "out", vec![TemplateRef::new("quote")]),
        ]);

        let result = driver(partners(), mock.client()).run(&config).await;
        assert!(matches!(
            result,
            Err(DriverError::Schema(SchemaError::UnknownModel(model))) if model == "Invoice"
        ));
        mock.verify();
    }

    #[tokio::test]
    async fn test_source_failure_is_fatal() {
        let mock = MockDocumentService::new();
        let result = driver(BrokenSource, mock.client())
            .run(&config(&["quote"]))
            .await;
        assert!(matches!(result, Err(DriverError::Source(e)) if e.model == "Partner"));
        mock.verify();
    }

    #[tokio::test]
    async fn test_invalid_config_is_rejected() {
        let mock = MockDocumentService::new();
        let result = driver(partners(), mock.client()).run(&config(&[])).await;
        assert!(matches!(result, Err(DriverError::Config(ConfigError::Invalid(_)))));
    }

    #[tokio::test]
    async fn test_page_limit_caps_records() {
        let mut mock = MockDocumentService::new();
        mock.expect_copy("quote").return_ok("doc_1");
        mock.expect_update("doc_1").return_ok(2);

        let report = driver(partners(), mock.client())
            .run(&config(&["quote"]).with_page_limit(1))
            .await
            .unwrap();
        assert_eq!(report.pairs().len(), 1);
        assert_eq!(report.pairs()[0].record_id, 1);
        mock.verify();
    }
}
