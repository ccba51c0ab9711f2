//! Validation utilities
//!
//! These checks report malformed fields to the caller. The matching engine
//! never depends on them: a bad date simply contributes no date signal.

use crate::matching::parse_date;
use crate::types::*;

/// Validate that a present date field is in `YYYY-MM-DD` form
pub fn validate_date(field: &str, value: Option<&str>) -> MatchingResult<()> {
    match value {
        Some(value) if !value.is_empty() && parse_date(value).is_none() => {
            Err(MatchingError::InvalidDate {
                field: field.to_string(),
                value: value.to_string(),
            })
        }
        _ => Ok(()),
    }
}

/// Validate the fields of a transaction
pub fn validate_transaction(transaction: &Transaction) -> MatchingResult<()> {
    validate_date("date", transaction.date.as_deref())
}

/// Validate the fields of an attachment
pub fn validate_attachment(attachment: &Attachment) -> MatchingResult<()> {
    let data = &attachment.data;
    validate_date("due_date", data.due_date.as_deref())?;
    validate_date("invoicing_date", data.invoicing_date.as_deref())?;
    validate_date("receiving_date", data.receiving_date.as_deref())?;
    Ok(())
}
