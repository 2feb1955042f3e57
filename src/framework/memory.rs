//! In-memory document backend.
//!
//! Templates are plain text bodies. Copies get fresh ids (`doc_1`, `doc_2`, ...) and merge
//! requests are applied with [`merge::apply`](crate::merge::apply), so the occurrence
//! counts match what a real replace-all API would report.

use crate::framework::backend::{DocumentBackend, DocumentId};
use crate::framework::error::ServiceError;
use crate::merge::{self, MergeRequest};
use async_trait::async_trait;
use std::collections::HashMap;

/// A document copied from a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDocument {
    pub folder: String,
    pub name: String,
    pub template_id: String,
    pub body: String,
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryDocuments {
    templates: HashMap<String, String>,
    documents: HashMap<DocumentId, StoredDocument>,
    next_id: u32,
}

impl InMemoryDocuments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(mut self, id: impl Into<String>, body: impl Into<String>) -> Self {
        self.templates.insert(id.into(), body.into());
        self
    }

    pub fn document(&self, id: &str) -> Option<&StoredDocument> {
        self.documents.get(id)
    }

    /// Finds a copy by file name (e.g. `SaleOrder#1`) and template.
    pub fn find(&self, name: &str, template_id: &str) -> Option<&StoredDocument> {
        self.documents
            .values()
            .find(|d| d.name == name && d.template_id == template_id)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[async_trait]
impl DocumentBackend for InMemoryDocuments {
    async fn copy_template(
        &mut self,
        folder: &str,
        name: &str,
        template_id: &str,
    ) -> Result<DocumentId, ServiceError> {
        let body = self
            .templates
            .get(template_id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(template_id.to_string()))?;

        self.next_id += 1;
        let id = format!("doc_{}", self.next_id);
        self.documents.insert(
            id.clone(),
            StoredDocument {
                folder: folder.to_string(),
                name: name.to_string(),
                template_id: template_id.to_string(),
                body,
            },
        );
        Ok(id)
    }

    async fn batch_update(
        &mut self,
        document_id: &str,
        requests: &[MergeRequest],
    ) -> Result<usize, ServiceError> {
        let document = self
            .documents
            .get_mut(document_id)
            .ok_or_else(|| ServiceError::NotFound(document_id.to_string()))?;
        let (body, replaced) = merge::apply(&document.body, requests);
        document.body = body;
        Ok(replaced)
    }
}
