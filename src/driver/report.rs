//! Per-pair results of a batch.

use crate::framework::{DocumentId, ServiceError};

/// What happened to one (record, template) pair.
#[derive(Debug, Clone, PartialEq)]
pub enum PairOutcome {
    Merged {
        document_id: DocumentId,
        occurrences: usize,
    },
    Failed {
        error: ServiceError,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PairReport {
    pub model: String,
    pub record_id: i64,
    pub template_id: String,
    /// Output file name, `<Model>#<id>`.
    pub file_name: String,
    pub outcome: PairOutcome,
}

impl PairReport {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, PairOutcome::Merged { .. })
    }
}

/// Outcomes in (group, record, template) order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pairs: Vec<PairReport>,
}

impl BatchReport {
    pub fn new(pairs: Vec<PairReport>) -> Self {
        Self { pairs }
    }

    pub fn pairs(&self) -> &[PairReport] {
        &self.pairs
    }

    pub fn succeeded(&self) -> usize {
        self.pairs.iter().filter(|p| p.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.pairs.len() - self.succeeded()
    }

    /// Total occurrences replaced across all merged documents.
    pub fn occurrences(&self) -> usize {
        self.pairs
            .iter()
            .map(|p| match p.outcome {
                PairOutcome::Merged { occurrences, .. } => occurrences,
                PairOutcome::Failed { .. } => 0,
            })
            .sum()
    }

    pub fn failures(&self) -> impl Iterator<Item = &PairReport> {
        self.pairs.iter().filter(|p| !p.is_success())
    }
}
