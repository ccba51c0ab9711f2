//! Core record types and errors for the matching engine

use bigdecimal::BigDecimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// Amount as it may appear in serialized records
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Integer(i64),
    Float(f64),
    Text(String),
}

/// Deserialize an amount from a number, a decimal string or null.
///
/// Floats go through their shortest decimal text, so `89.9` becomes exactly
/// 89.9 rather than its binary expansion. Null reads as zero.
fn deserialize_amount<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match Option::<RawAmount>::deserialize(deserializer)? {
        None => return Ok(BigDecimal::default()),
        Some(RawAmount::Integer(value)) => return Ok(BigDecimal::from(value)),
        Some(RawAmount::Float(value)) => value.to_string(),
        Some(RawAmount::Text(value)) => value,
    };
    BigDecimal::from_str(text.trim()).map_err(serde::de::Error::custom)
}

/// A bank transaction as delivered by the statement importer
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Transaction {
    /// Free-text payment reference (invoice number, order id, ...)
    #[serde(default)]
    pub reference: Option<String>,
    /// Signed amount; outgoing payments are negative
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub amount: BigDecimal,
    /// Booking date in `YYYY-MM-DD` form
    #[serde(default)]
    pub date: Option<String>,
    /// Counterparty name as printed on the statement
    #[serde(default)]
    pub contact: Option<String>,
}

impl Transaction {
    /// Create a transaction with only an amount set
    pub fn new(amount: BigDecimal) -> Self {
        Self {
            amount,
            ..Self::default()
        }
    }

    /// Set the payment reference
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Set the booking date
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Set the counterparty name
    pub fn with_contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = Some(contact.into());
        self
    }
}

/// Extracted fields of an invoice or receipt
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AttachmentData {
    /// Invoice or receipt number
    #[serde(default)]
    pub reference: Option<String>,
    /// Gross amount of the document
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub total_amount: BigDecimal,
    /// Payment due date
    #[serde(default)]
    pub due_date: Option<String>,
    /// Date the invoice was issued
    #[serde(default)]
    pub invoicing_date: Option<String>,
    /// Date a receipt was received
    #[serde(default)]
    pub receiving_date: Option<String>,
    /// Customer on sales invoices
    #[serde(default)]
    pub recipient: Option<String>,
    /// Issuer on purchase invoices
    #[serde(default)]
    pub issuer: Option<String>,
    /// Supplier on purchase invoices
    #[serde(default)]
    pub supplier: Option<String>,
}

/// A document attached to the books, wrapping its extracted data
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default)]
    pub data: AttachmentData,
}

impl Attachment {
    /// Create an attachment with only a total amount set
    pub fn new(total_amount: BigDecimal) -> Self {
        Self {
            data: AttachmentData {
                total_amount,
                ..AttachmentData::default()
            },
        }
    }

    /// Wrap already extracted data
    pub fn from_data(data: AttachmentData) -> Self {
        Self { data }
    }

    /// Set the document reference
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.data.reference = Some(reference.into());
        self
    }

    pub fn with_due_date(mut self, date: impl Into<String>) -> Self {
        self.data.due_date = Some(date.into());
        self
    }

    pub fn with_invoicing_date(mut self, date: impl Into<String>) -> Self {
        self.data.invoicing_date = Some(date.into());
        self
    }

    pub fn with_receiving_date(mut self, date: impl Into<String>) -> Self {
        self.data.receiving_date = Some(date.into());
        self
    }

    pub fn with_recipient(mut self, name: impl Into<String>) -> Self {
        self.data.recipient = Some(name.into());
        self
    }

    pub fn with_issuer(mut self, name: impl Into<String>) -> Self {
        self.data.issuer = Some(name.into());
        self
    }

    pub fn with_supplier(mut self, name: impl Into<String>) -> Self {
        self.data.supplier = Some(name.into());
        self
    }
}

/// Errors raised by the layers around the matching engine
#[derive(Debug, thiserror::Error)]
pub enum MatchingError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Invalid date in '{field}': {value}")]
    InvalidDate { field: String, value: String },
}

/// Result type for operations around the matching engine
pub type MatchingResult<T> = Result<T, MatchingError>;
