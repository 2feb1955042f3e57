//! # Document Client
//!
//! The cloneable handle merge workers use to reach the [`DocumentActor`].
//!
//! [`DocumentActor`]: crate::framework::DocumentActor

use crate::framework::backend::DocumentId;
use crate::framework::error::ServiceError;
use crate::framework::message::DocumentRequest;
use crate::merge::MergeRequest;
use tokio::sync::{mpsc, oneshot};

/// Async, type-safe access to the document service.
///
/// Holds only a channel sender, so cloning is inexpensive. The service shuts down once the
/// last clone is dropped.
#[derive(Clone)]
pub struct DocumentClient {
    sender: mpsc::Sender<DocumentRequest>,
}

impl DocumentClient {
    pub fn new(sender: mpsc::Sender<DocumentRequest>) -> Self {
        Self { sender }
    }

    pub async fn copy_template(
        &self,
        folder: &str,
        name: &str,
        template_id: &str,
    ) -> Result<DocumentId, ServiceError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(DocumentRequest::CopyTemplate {
                folder: folder.to_string(),
                name: name.to_string(),
                template_id: template_id.to_string(),
                respond_to,
            })
            .await
            .map_err(|_| ServiceError::ServiceClosed)?;
        response.await.map_err(|_| ServiceError::ServiceDropped)?
    }

    pub async fn batch_update(
        &self,
        document_id: &str,
        requests: Vec<MergeRequest>,
    ) -> Result<usize, ServiceError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(DocumentRequest::BatchUpdate {
                document_id: document_id.to_string(),
                requests,
                respond_to,
            })
            .await
            .map_err(|_| ServiceError::ServiceClosed)?;
        response.await.map_err(|_| ServiceError::ServiceDropped)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_closed_service() {
        let (sender, receiver) = mpsc::channel(1);
        drop(receiver);
        let client = DocumentClient::new(sender);
        let result = client.copy_template("f", "n", "t").await;
        assert_eq!(result, Err(ServiceError::ServiceClosed));
    }

    #[tokio::test]
    async fn test_dropped_response() {
        let (sender, mut receiver) = mpsc::channel(1);
        let client = DocumentClient::new(sender);
        let task = tokio::spawn(async move { client.batch_update("doc_1", vec![]).await });

        // Receive the request and drop its responder without answering.
        let request = receiver.recv().await.unwrap();
        drop(request);

        assert_eq!(task.await.unwrap(), Err(ServiceError::ServiceDropped));
    }
}
