//! # Attachment Matcher
//!
//! Pairs bank transactions with the invoices and receipts that explain them.
//!
//! Neither side is reliable on its own: references are often missing or
//! formatted differently, counterparty names carry typos and abbreviations,
//! and booking dates drift from due dates. The engine combines these noisy
//! signals into a score with fixed accept/reject rules.
//!
//! ## Features
//!
//! - **Reference matching**: whitespace, leading zeros and case are ignored
//! - **Fuzzy names**: partial names and small typos per name token
//! - **Date proximity**: any attachment date within ten days of the booking
//! - **Both directions**: attachment for a transaction and transaction for an attachment
//! - **Batch reconciliation**: run the engine over a whole [`RecordStore`]
//!
//! ## Quick Start
//!
//! ```rust
//! use attachment_matcher::{find_attachment, Attachment, Transaction};
//! use bigdecimal::BigDecimal;
//!
//! let transaction = Transaction::new(BigDecimal::from(-150))
//!     .with_date("2024-03-10")
//!     .with_contact("Acme Corp");
//! let attachments = vec![Attachment::new(BigDecimal::from(150))
//!     .with_due_date("2024-03-09")
//!     .with_recipient("Acme Corporation")];
//!
//! assert!(find_attachment(&transaction, &attachments).is_some());
//! ```

pub mod matching;
pub mod reconciliation;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use matching::*;
pub use reconciliation::*;
pub use traits::*;
pub use types::*;
