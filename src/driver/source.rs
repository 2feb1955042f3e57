//! Record sources.
//!
//! The repository that owns the records lives outside this crate. The driver only needs
//! "the first `limit` records of this model, in id order".

use crate::driver::error::SourceError;
use crate::model::Record;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch(&self, model: &str, limit: usize) -> Result<Vec<Arc<Record>>, SourceError>;
}

/// Records held in memory, grouped by model.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRecordSource {
    records: HashMap<String, Vec<Arc<Record>>>,
}

impl InMemoryRecordSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(mut self, record: Record) -> Self {
        self.insert(record);
        self
    }

    pub fn insert(&mut self, record: Record) {
        self.records
            .entry(record.model().to_string())
            .or_default()
            .push(Arc::new(record));
    }
}

#[async_trait]
impl RecordSource for InMemoryRecordSource {
    async fn fetch(&self, model: &str, limit: usize) -> Result<Vec<Arc<Record>>, SourceError> {
        let mut records = self.records.get(model).cloned().unwrap_or_default();
        records.sort_by_key(|r| r.id());
        records.truncate(limit);
        Ok(records)
    }
}
