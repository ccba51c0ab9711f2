//! Candidate fields pulled out of an attachment

use crate::types::Attachment;

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Counterparty names of an attachment in role order: recipient, issuer, supplier
pub fn counterparty_names(attachment: &Attachment) -> Vec<&str> {
    let data = &attachment.data;
    [&data.recipient, &data.issuer, &data.supplier]
        .into_iter()
        .filter_map(present)
        .collect()
}

/// Dates of an attachment in fixed order: due, invoicing, receiving
pub fn attachment_dates(attachment: &Attachment) -> Vec<&str> {
    let data = &attachment.data;
    [&data.due_date, &data.invoicing_date, &data.receiving_date]
        .into_iter()
        .filter_map(present)
        .collect()
}
