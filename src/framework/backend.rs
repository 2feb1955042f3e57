//! # DocumentBackend Trait
//!
//! The contract a document service must satisfy to be driven by a [`DocumentActor`].
//! It covers exactly the two remote calls a merge needs: copy a template into a destination
//! folder, then apply a batch of merge requests to the copy.
//!
//! Methods take `&mut self`: the actor owns its backend exclusively, so implementations can
//! keep connection state without any locking.
//!
//! [`DocumentActor`]: crate::framework::DocumentActor

use crate::framework::error::ServiceError;
use crate::merge::MergeRequest;
use async_trait::async_trait;

/// Identifier of a document held by the service.
pub type DocumentId = String;

#[async_trait]
pub trait DocumentBackend: Send + 'static {
    /// Copies `template_id` into `folder` under `name` and returns the copy's id.
    async fn copy_template(
        &mut self,
        folder: &str,
        name: &str,
        template_id: &str,
    ) -> Result<DocumentId, ServiceError>;

    /// Applies `requests` to a document and returns how many occurrences were replaced.
    async fn batch_update(
        &mut self,
        document_id: &str,
        requests: &[MergeRequest],
    ) -> Result<usize, ServiceError>;
}
