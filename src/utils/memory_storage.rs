//! In-memory storage implementation for testing

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::traits::*;
use crate::types::*;

/// In-memory record store for testing and development
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    transactions: Arc<RwLock<Vec<Transaction>>>,
    attachments: Arc<RwLock<Vec<Attachment>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with records
    pub fn with_records(transactions: Vec<Transaction>, attachments: Vec<Attachment>) -> Self {
        Self {
            transactions: Arc::new(RwLock::new(transactions)),
            attachments: Arc::new(RwLock::new(attachments)),
        }
    }

    /// Append a transaction
    pub fn add_transaction(&self, transaction: Transaction) -> MatchingResult<()> {
        self.transactions
            .write()
            .map_err(|e| MatchingError::Storage(e.to_string()))?
            .push(transaction);
        Ok(())
    }

    /// Append an attachment
    pub fn add_attachment(&self, attachment: Attachment) -> MatchingResult<()> {
        self.attachments
            .write()
            .map_err(|e| MatchingError::Storage(e.to_string()))?
            .push(attachment);
        Ok(())
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) -> MatchingResult<()> {
        self.transactions
            .write()
            .map_err(|e| MatchingError::Storage(e.to_string()))?
            .clear();
        self.attachments
            .write()
            .map_err(|e| MatchingError::Storage(e.to_string()))?
            .clear();
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list_transactions(&self) -> MatchingResult<Vec<Transaction>> {
        let transactions = self
            .transactions
            .read()
            .map_err(|e| MatchingError::Storage(e.to_string()))?;
        Ok(transactions.clone())
    }

    async fn list_attachments(&self) -> MatchingResult<Vec<Attachment>> {
        let attachments = self
            .attachments
            .read()
            .map_err(|e| MatchingError::Storage(e.to_string()))?;
        Ok(attachments.clone())
    }
}
