//! # Mock Document Service & Testing Guide
//!
//! [`MockDocumentService`] hands out a real [`DocumentClient`], but answers its requests
//! from a list of expectations instead of a backend. Use it to test code *around* the
//! document service (the batch driver, mostly) and to inject failures that are awkward to
//! reproduce with a real service.
//!
//! ## When to use the mock vs the in-memory backend
//!
//! | Feature | MockDocumentService | InMemoryDocuments + DocumentActor |
//! |---------|---------------------|-----------------------------------|
//! | **State** | None (expectations) | Real template copies and bodies |
//! | **Error Injection** | Easy (`return_err`) | Only "template not found" |
//! | **Verification** | `verify()` checks every call happened | Inspect rendered bodies |
//! | **Use Case** | Failure isolation, call accounting | End-to-end rendering |
//!
//! ## Matching
//!
//! Copy requests are matched by template id, update requests by document id, each against
//! the first pending expectation for that id. Jobs can therefore run concurrently and still
//! meet their expectations deterministically. A request with no matching expectation gets a
//! [`ServiceError::Transport`] and makes [`MockDocumentService::verify`] fail.
//!
//! ## Example: simulating a failing template
//!
//! ```rust
//! use docmerge::framework::mock::MockDocumentService;
//! use docmerge::framework::ServiceError;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockDocumentService::new();
//!     mock.expect_copy("broken")
//!         .return_err(ServiceError::Transport("503".into()));
//!     mock.expect_copy("ok").return_ok("doc_1");
//!     mock.expect_update("doc_1").return_ok(4);
//!
//!     let client = mock.client();
//!     assert!(client.copy_template("f", "A#1", "broken").await.is_err());
//!     let id = client.copy_template("f", "A#1", "ok").await.unwrap();
//!     assert_eq!(client.batch_update(&id, vec![]).await.unwrap(), 4);
//!
//!     mock.verify();
//! }
//! ```

use crate::framework::backend::DocumentId;
use crate::framework::client::DocumentClient;
use crate::framework::error::ServiceError;
use crate::framework::message::DocumentRequest;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

enum Expectation {
    Copy {
        template_id: String,
        response: Result<DocumentId, ServiceError>,
    },
    Update {
        document_id: String,
        response: Result<usize, ServiceError>,
    },
}

#[derive(Default)]
struct MockState {
    expectations: Vec<Expectation>,
    unexpected: Vec<String>,
}

type SharedState = Arc<Mutex<MockState>>;

fn lock(state: &SharedState) -> MutexGuard<'_, MockState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A document service that answers from expectations.
pub struct MockDocumentService {
    client: DocumentClient,
    state: SharedState,
    _handle: tokio::task::JoinHandle<()>,
}

impl Default for MockDocumentService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDocumentService {
    /// Creates a mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<DocumentRequest>(100);
        let state: SharedState = Arc::default();
        let task_state = state.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                match request {
                    DocumentRequest::CopyTemplate {
                        template_id,
                        respond_to,
                        ..
                    } => {
                        let response = take(&task_state, |e| match e {
                            Expectation::Copy {
                                template_id: expected,
                                ..
                            } => *expected == template_id,
                            Expectation::Update { .. } => false,
                        })
                        .map_or_else(
                            || Err(unexpected(&task_state, format!("copy of {template_id}"))),
                            |e| match e {
                                Expectation::Copy { response, .. } => response,
                                Expectation::Update { .. } => unreachable!("matched a copy"),
                            },
                        );
                        let _ = respond_to.send(response);
                    }
                    DocumentRequest::BatchUpdate {
                        document_id,
                        respond_to,
                        ..
                    } => {
                        let response = take(&task_state, |e| match e {
                            Expectation::Update {
                                document_id: expected,
                                ..
                            } => *expected == document_id,
                            Expectation::Copy { .. } => false,
                        })
                        .map_or_else(
                            || Err(unexpected(&task_state, format!("update of {document_id}"))),
                            |e| match e {
                                Expectation::Update { response, .. } => response,
                                Expectation::Copy { .. } => unreachable!("matched an update"),
                            },
                        );
                        let _ = respond_to.send(response);
                    }
                }
            }
        });

        Self {
            client: DocumentClient::new(sender),
            state,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> DocumentClient {
        self.client.clone()
    }

    /// Expects a template copy of `template_id`.
    pub fn expect_copy(&mut self, template_id: impl Into<String>) -> CopyExpectationBuilder {
        CopyExpectationBuilder {
            template_id: template_id.into(),
            state: self.state.clone(),
        }
    }

    /// Expects a batch update of `document_id`.
    pub fn expect_update(&mut self, document_id: impl Into<String>) -> UpdateExpectationBuilder {
        UpdateExpectationBuilder {
            document_id: document_id.into(),
            state: self.state.clone(),
        }
    }

    /// Panics unless every expectation was consumed and no unexpected request arrived.
    pub fn verify(&self) {
        let state = lock(&self.state);
        if !state.unexpected.is_empty() {
            panic!("Unexpected requests: {:?}", state.unexpected);
        }
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }
}

fn take(state: &SharedState, matches: impl Fn(&Expectation) -> bool) -> Option<Expectation> {
    let mut state = lock(state);
    let index = state.expectations.iter().position(matches)?;
    Some(state.expectations.remove(index))
}

fn unexpected(state: &SharedState, what: String) -> ServiceError {
    let error = ServiceError::Transport(format!("unexpected {what}"));
    lock(state).unexpected.push(what);
    error
}

/// Builder for copy expectations.
pub struct CopyExpectationBuilder {
    template_id: String,
    state: SharedState,
}

impl CopyExpectationBuilder {
    /// Answers with the given document id.
    pub fn return_ok(self, document_id: impl Into<DocumentId>) {
        self.push(Ok(document_id.into()));
    }

    /// Answers with an error.
    pub fn return_err(self, error: ServiceError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<DocumentId, ServiceError>) {
        lock(&self.state).expectations.push(Expectation::Copy {
            template_id: self.template_id,
            response,
        });
    }
}

/// Builder for batch-update expectations.
pub struct UpdateExpectationBuilder {
    document_id: String,
    state: SharedState,
}

impl UpdateExpectationBuilder {
    /// Answers with the given occurrence count.
    pub fn return_ok(self, replaced: usize) {
        self.push(Ok(replaced));
    }

    /// Answers with an error.
    pub fn return_err(self, error: ServiceError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<usize, ServiceError>) {
        lock(&self.state).expectations.push(Expectation::Update {
            document_id: self.document_id,
            response,
        });
    }
}
