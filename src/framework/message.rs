//! # Document Messages
//!
//! The messages sent from a [`DocumentClient`](crate::framework::DocumentClient) to the
//! [`DocumentActor`](crate::framework::DocumentActor). Each carries a oneshot sender the
//! actor answers on.

use crate::framework::backend::DocumentId;
use crate::framework::error::ServiceError;
use crate::merge::MergeRequest;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the actor.
pub type Response<T> = oneshot::Sender<Result<T, ServiceError>>;

#[derive(Debug)]
pub enum DocumentRequest {
    CopyTemplate {
        folder: String,
        name: String,
        template_id: String,
        respond_to: Response<DocumentId>,
    },
    BatchUpdate {
        document_id: DocumentId,
        requests: Vec<MergeRequest>,
        respond_to: Response<usize>,
    },
}
