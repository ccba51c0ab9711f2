//! Batch reconciliation of a record store
//!
//! Runs the matching engine over every record of a [`RecordStore`] and
//! collects the outcome in a [`ReconciliationReport`]. Each search is
//! independent: an attachment may be chosen by more than one transaction,
//! mirroring the single-record entry points.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{info, warn};
use uuid::Uuid;

use crate::matching::{find_attachment_match, find_transaction_match, MatchKind};
use crate::traits::RecordStore;
use crate::types::*;
use crate::utils::{validate_attachment, validate_transaction};

/// A transaction paired with an attachment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciledPair {
    /// Position of the transaction in the store
    pub transaction_index: usize,
    /// Position of the attachment in the store
    pub attachment_index: usize,
    /// Why the pair was formed
    pub kind: MatchKind,
}

/// Which side of the store a run searched from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReconcileDirection {
    /// One search per transaction, over the attachments
    Transactions,
    /// One search per attachment, over the transactions
    Attachments,
}

/// Outcome of one reconciliation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    /// Unique identifier of the run
    pub id: Uuid,
    /// Side the searches started from
    pub direction: ReconcileDirection,
    /// Pairs found, in the order the searches ran
    pub matches: Vec<ReconciledPair>,
    /// Transactions without an attachment
    pub unmatched_transactions: Vec<usize>,
    /// Attachments without a transaction
    pub unmatched_attachments: Vec<usize>,
    /// Records with malformed fields
    pub warnings: Vec<String>,
}

impl ReconciliationReport {
    fn new(
        direction: ReconcileDirection,
        transaction_count: usize,
        attachment_count: usize,
        matches: Vec<ReconciledPair>,
    ) -> Self {
        let matched_transactions: HashSet<usize> =
            matches.iter().map(|m| m.transaction_index).collect();
        let matched_attachments: HashSet<usize> =
            matches.iter().map(|m| m.attachment_index).collect();

        let unmatched_transactions = (0..transaction_count)
            .filter(|index| !matched_transactions.contains(index))
            .collect();
        let unmatched_attachments = (0..attachment_count)
            .filter(|index| !matched_attachments.contains(index))
            .collect();

        Self {
            id: Uuid::new_v4(),
            direction,
            matches,
            unmatched_transactions,
            unmatched_attachments,
            warnings: Vec::new(),
        }
    }

    /// Share of searched records that found a counterpart, between 0 and 1.
    ///
    /// Counts transactions for [`ReconcileDirection::Transactions`] runs and
    /// attachments for [`ReconcileDirection::Attachments`] runs.
    pub fn match_rate(&self) -> f64 {
        let (matched, unmatched) = match self.direction {
            ReconcileDirection::Transactions => (
                self.matches
                    .iter()
                    .map(|m| m.transaction_index)
                    .collect::<HashSet<_>>()
                    .len(),
                self.unmatched_transactions.len(),
            ),
            ReconcileDirection::Attachments => (
                self.matches
                    .iter()
                    .map(|m| m.attachment_index)
                    .collect::<HashSet<_>>()
                    .len(),
                self.unmatched_attachments.len(),
            ),
        };
        let total = matched + unmatched;
        if total == 0 {
            return 0.0;
        }
        matched as f64 / total as f64
    }

    /// Pairs decided by reference alone
    pub fn reference_matches(&self) -> impl Iterator<Item = &ReconciledPair> {
        self.matches
            .iter()
            .filter(|m| m.kind == MatchKind::Reference)
    }
}

/// Reconciles every record of a store using the matching engine
pub struct Reconciler<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> Reconciler<S> {
    /// Create a new reconciler over the given store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Access the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Find an attachment for every transaction
    pub async fn reconcile_transactions(&self) -> MatchingResult<ReconciliationReport> {
        let transactions = self.store.list_transactions().await?;
        let attachments = self.store.list_attachments().await?;

        let matches = transactions
            .iter()
            .enumerate()
            .filter_map(|(transaction_index, transaction)| {
                find_attachment_match(transaction, &attachments).map(|found| ReconciledPair {
                    transaction_index,
                    attachment_index: found.index,
                    kind: found.kind,
                })
            })
            .collect();

        let mut report = ReconciliationReport::new(
            ReconcileDirection::Transactions,
            transactions.len(),
            attachments.len(),
            matches,
        );
        report.warnings = collect_warnings(&transactions, &attachments);

        info!(
            run = %report.id,
            transactions = transactions.len(),
            attachments = attachments.len(),
            matched = report.matches.len(),
            "reconciled transactions"
        );
        Ok(report)
    }

    /// Find a transaction for every attachment
    pub async fn reconcile_attachments(&self) -> MatchingResult<ReconciliationReport> {
        let transactions = self.store.list_transactions().await?;
        let attachments = self.store.list_attachments().await?;

        let matches = attachments
            .iter()
            .enumerate()
            .filter_map(|(attachment_index, attachment)| {
                find_transaction_match(attachment, &transactions).map(|found| ReconciledPair {
                    transaction_index: found.index,
                    attachment_index,
                    kind: found.kind,
                })
            })
            .collect();

        let mut report = ReconciliationReport::new(
            ReconcileDirection::Attachments,
            transactions.len(),
            attachments.len(),
            matches,
        );
        report.warnings = collect_warnings(&transactions, &attachments);

        info!(
            run = %report.id,
            transactions = transactions.len(),
            attachments = attachments.len(),
            matched = report.matches.len(),
            "reconciled attachments"
        );
        Ok(report)
    }
}

fn collect_warnings(transactions: &[Transaction], attachments: &[Attachment]) -> Vec<String> {
    let transaction_errors = transactions.iter().enumerate().filter_map(|(index, transaction)| {
        validate_transaction(transaction)
            .err()
            .map(|e| format!("transaction {index}: {e}"))
    });
    let attachment_errors = attachments.iter().enumerate().filter_map(|(index, attachment)| {
        validate_attachment(attachment)
            .err()
            .map(|e| format!("attachment {index}: {e}"))
    });

    transaction_errors
        .chain(attachment_errors)
        .inspect(|warning| warn!("{warning}"))
        .collect()
}
