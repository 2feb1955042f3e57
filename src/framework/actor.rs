//! # Document Actor
//!
//! The "server" half of the document service. It owns the [`DocumentBackend`] and the
//! receiving end of the request channel, and handles one request at a time. Any number of
//! merge workers can share the service through cloned [`DocumentClient`]s without the
//! backend ever being touched concurrently.
//!
//! Backend calls are therefore serialized: a slow remote backend caps throughput at one
//! call in flight, however many merge workers are running.

use crate::framework::backend::DocumentBackend;
use crate::framework::client::DocumentClient;
use crate::framework::message::DocumentRequest;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Owns a document backend and serves [`DocumentRequest`]s.
///
/// # Usage Pattern
///
/// 1.  **Create**: `DocumentActor::new()` returns the actor and its client.
/// 2.  **Run**: spawn `actor.run()` in a background task.
/// 3.  **Use**: clone the client into every worker.
///
/// ```rust
/// use docmerge::framework::{DocumentActor, InMemoryDocuments};
/// use docmerge::merge::MergeRequest;
///
/// #[tokio::main]
/// async fn main() {
///     let backend = InMemoryDocuments::new().with_template("tpl", "Dear {{name}}");
///     let (actor, client) = DocumentActor::new(8, backend);
///     let handle = tokio::spawn(actor.run());
///
///     let copy = client.copy_template("folder", "Partner#1", "tpl").await.unwrap();
///     let replaced = client
///         .batch_update(&copy, vec![MergeRequest::new("name", "Acme")])
///         .await
///         .unwrap();
///     assert_eq!(replaced, 1);
///
///     drop(client);
///     let backend = handle.await.unwrap();
///     assert_eq!(backend.document(&copy).unwrap().body, "Dear Acme");
/// }
/// ```
pub struct DocumentActor<B: DocumentBackend> {
    receiver: mpsc::Receiver<DocumentRequest>,
    backend: B,
}

impl<B: DocumentBackend> DocumentActor<B> {
    /// Creates the actor and its client.
    ///
    /// `buffer_size` is the channel capacity; when full, client calls wait for room.
    pub fn new(buffer_size: usize, backend: B) -> (Self, DocumentClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self { receiver, backend };
        (actor, DocumentClient::new(sender))
    }

    /// Processes requests until every client has been dropped, then hands the backend
    /// back so callers can inspect or reuse it.
    pub async fn run(mut self) -> B {
        info!("Document service started");
        let mut handled = 0usize;

        while let Some(msg) = self.receiver.recv().await {
            handled += 1;
            match msg {
                DocumentRequest::CopyTemplate {
                    folder,
                    name,
                    template_id,
                    respond_to,
                } => {
                    debug!(%folder, %name, %template_id, "CopyTemplate");
                    let result = self
                        .backend
                        .copy_template(&folder, &name, &template_id)
                        .await;
                    match &result {
                        Ok(document_id) => info!(%name, %document_id, "Template copied"),
                        Err(e) => warn!(%name, %template_id, error = %e, "Copy failed"),
                    }
                    let _ = respond_to.send(result);
                }
                DocumentRequest::BatchUpdate {
                    document_id,
                    requests,
                    respond_to,
                } => {
                    debug!(%document_id, requests = requests.len(), "BatchUpdate");
                    let result = self.backend.batch_update(&document_id, &requests).await;
                    match &result {
                        Ok(replaced) => info!(%document_id, replaced, "Document updated"),
                        Err(e) => warn!(%document_id, error = %e, "Update failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(handled, "Document service shutdown");
        self.backend
    }
}
