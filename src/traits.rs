//! Traits for storage abstraction

use async_trait::async_trait;

use crate::types::*;

/// Source of the records to reconcile
///
/// The matching engine does not care where transactions and attachments come
/// from (bank export, OCR pipeline, database, ...). Implement this trait for
/// the backend in use and hand it to a [`Reconciler`](crate::Reconciler).
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All bank transactions, in a stable order
    async fn list_transactions(&self) -> MatchingResult<Vec<Transaction>>;

    /// All attachments, in a stable order
    async fn list_attachments(&self) -> MatchingResult<Vec<Attachment>>;
}
