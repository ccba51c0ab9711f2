//! Scoring engine pairing bank transactions with attachments
//!
//! Every candidate pair is scored by [`score_pair`] from three signals on top
//! of a mandatory amount match:
//!
//! | Signal | Points |
//! |--------|--------|
//! | Amount (required) | 10 |
//! | Closest date within 10 days | `max(3, 7 - days / 2)` |
//! | Counterparty name | 7 exact, 4 fuzzy |
//!
//! A candidate needs at least two signals, and an amount + date pair without a
//! name only counts when the dates fall on the same day. The best surviving
//! candidate is accepted at [`ACCEPT_THRESHOLD`] points or more. Equal
//! non-empty references bypass scoring entirely.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::dates::{day_difference, DEFAULT_DATE_WINDOW_DAYS};
use super::extract::{attachment_dates, counterparty_names};
use super::names::names_match;
use super::normalize::{normalize_name, normalize_reference};
use crate::types::{Attachment, Transaction};

/// Points for matching absolute amounts
pub const AMOUNT_SCORE: u32 = 10;
/// Points for a same-day date match
pub const MAX_DATE_SCORE: u32 = 7;
/// Floor for any date match inside the window
pub const MIN_DATE_SCORE: u32 = 3;
/// Points for a counterparty name equal after normalization
pub const EXACT_NAME_SCORE: u32 = 7;
/// Points for a fuzzy counterparty name match
pub const PARTIAL_NAME_SCORE: u32 = 4;
/// Minimum number of signals, amount included
pub const MIN_SIGNALS: u32 = 2;
/// Minimum score of an accepted match
pub const ACCEPT_THRESHOLD: u32 = 17;

/// How the counterparty name matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NameSignal {
    /// Equal after normalization
    Exact,
    /// Accepted by the fuzzy name comparison
    Partial,
}

impl NameSignal {
    pub fn score(self) -> u32 {
        match self {
            NameSignal::Exact => EXACT_NAME_SCORE,
            NameSignal::Partial => PARTIAL_NAME_SCORE,
        }
    }
}

/// Score breakdown of a transaction/attachment pair whose amounts agree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairScore {
    /// Total points
    pub score: u32,
    /// Number of signals that contributed, amount included
    pub signals: u32,
    /// Smallest day difference among attachment dates inside the window
    pub date_diff: Option<i64>,
    /// First counterparty name that matched, in role order
    pub name: Option<NameSignal>,
}

impl PairScore {
    /// Whether the signal combination is trustworthy enough to compete.
    ///
    /// Amount plus date without a name is only accepted on the same day.
    pub fn passes_gates(&self) -> bool {
        if self.signals < MIN_SIGNALS {
            return false;
        }
        !(self.name.is_none() && self.date_diff.is_some_and(|diff| diff > 0))
    }

    /// Whether the score reaches the acceptance threshold
    pub fn is_confident(&self) -> bool {
        self.score >= ACCEPT_THRESHOLD
    }
}

/// Points for a date match `diff` days apart, in either direction
pub fn date_score(diff: i64) -> u32 {
    let decay = diff.unsigned_abs() / 2;
    let decayed = u64::from(MAX_DATE_SCORE).saturating_sub(decay);
    decayed.max(u64::from(MIN_DATE_SCORE)) as u32
}

/// Score a pair on amount, date and name.
///
/// Returns `None` when the absolute amounts differ. The result has not been
/// checked against [`PairScore::passes_gates`] yet.
pub fn score_pair(transaction: &Transaction, attachment: &Attachment) -> Option<PairScore> {
    if transaction.amount.abs() != attachment.data.total_amount.abs() {
        return None;
    }

    let mut pair = PairScore {
        score: AMOUNT_SCORE,
        signals: 1,
        date_diff: None,
        name: None,
    };

    pair.date_diff = attachment_dates(attachment)
        .into_iter()
        .filter_map(|date| day_difference(transaction.date.as_deref(), Some(date)))
        .filter(|diff| *diff <= DEFAULT_DATE_WINDOW_DAYS)
        .min();
    if let Some(diff) = pair.date_diff {
        pair.signals += 1;
        pair.score += date_score(diff);
    }

    let contact = transaction.contact.as_deref();
    pair.name = counterparty_names(attachment)
        .into_iter()
        .find(|name| names_match(contact, Some(*name)))
        .map(|name| {
            if normalize_name(contact) == normalize_name(Some(name)) {
                NameSignal::Exact
            } else {
                NameSignal::Partial
            }
        });
    if let Some(name) = pair.name {
        pair.signals += 1;
        pair.score += name.score();
    }

    Some(pair)
}

/// Why a candidate was chosen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchKind {
    /// References were equal after normalization
    Reference,
    /// Best scoring candidate above the threshold
    Scored(PairScore),
}

/// A candidate chosen from a pool
#[derive(Debug, Clone, PartialEq)]
pub struct Match<'a, T> {
    /// The chosen record
    pub record: &'a T,
    /// Position of the record in the pool
    pub index: usize,
    pub kind: MatchKind,
}

/// Search `pool` for the counterpart of a source record.
///
/// Both search directions go through here; they differ only in how the
/// candidate's reference is read and in the argument order handed to
/// [`score_pair`].
fn best_match<'a, T>(
    source_reference: Option<&str>,
    pool: &'a [T],
    reference_of: impl Fn(&T) -> Option<&str>,
    score_of: impl Fn(&T) -> Option<PairScore>,
) -> Option<Match<'a, T>> {
    let source_reference = normalize_reference(source_reference);
    let mut best: Option<(usize, PairScore)> = None;

    for (index, candidate) in pool.iter().enumerate() {
        if !source_reference.is_empty()
            && source_reference == normalize_reference(reference_of(candidate))
        {
            debug!(index, reference = %source_reference, "reference match");
            return Some(Match {
                record: candidate,
                index,
                kind: MatchKind::Reference,
            });
        }

        let Some(pair) = score_of(candidate) else {
            continue;
        };

        if !pair.passes_gates() {
            debug!(index, score = pair.score, signals = pair.signals, "candidate gated out");
            continue;
        }

        if best.as_ref().map_or(true, |(_, current)| pair.score > current.score) {
            debug!(index, score = pair.score, "new best candidate");
            best = Some((index, pair));
        }
    }

    match best {
        Some((index, pair)) if pair.is_confident() => Some(Match {
            record: &pool[index],
            index,
            kind: MatchKind::Scored(pair),
        }),
        Some((index, pair)) => {
            debug!(index, score = pair.score, "best candidate below threshold");
            None
        }
        None => None,
    }
}

/// Find the attachment belonging to a transaction, with the reason it was chosen
pub fn find_attachment_match<'a>(
    transaction: &Transaction,
    attachments: &'a [Attachment],
) -> Option<Match<'a, Attachment>> {
    best_match(
        transaction.reference.as_deref(),
        attachments,
        |attachment| attachment.data.reference.as_deref(),
        |attachment| score_pair(transaction, attachment),
    )
}

/// Find the transaction paying for an attachment, with the reason it was chosen
pub fn find_transaction_match<'a>(
    attachment: &Attachment,
    transactions: &'a [Transaction],
) -> Option<Match<'a, Transaction>> {
    best_match(
        attachment.data.reference.as_deref(),
        transactions,
        |transaction| transaction.reference.as_deref(),
        |transaction| score_pair(transaction, attachment),
    )
}

/// Find the attachment belonging to a transaction
pub fn find_attachment<'a>(
    transaction: &Transaction,
    attachments: &'a [Attachment],
) -> Option<&'a Attachment> {
    find_attachment_match(transaction, attachments).map(|found| found.record)
}

/// Find the transaction paying for an attachment
pub fn find_transaction<'a>(
    attachment: &Attachment,
    transactions: &'a [Transaction],
) -> Option<&'a Transaction> {
    find_transaction_match(attachment, transactions).map(|found| found.record)
}
