//! Fuzzy comparison of counterparty names

use super::distance::edit_distance;
use super::normalize::normalize_name;

/// Typo budget for a name token: one edit for short tokens, two for longer ones
fn max_token_distance(token: &str) -> usize {
    if token.chars().count() <= 5 {
        1
    } else {
        2
    }
}

fn tokens_correspond(short: &str, long: &str) -> bool {
    short.contains(long)
        || long.contains(short)
        || edit_distance(short, long) <= max_token_distance(short)
}

/// Decide whether two free-text names denote the same counterparty.
///
/// Tolerates case and spacing differences, partial names ("John" vs
/// "John Doe") and small typos per name token. A name that is absent or
/// blank never matches.
pub fn names_match(name1: Option<&str>, name2: Option<&str>) -> bool {
    let norm1 = normalize_name(name1);
    let norm2 = normalize_name(name2);
    if norm1.is_empty() || norm2.is_empty() {
        return false;
    }

    if norm1 == norm2 {
        return true;
    }

    if norm1.contains(&norm2) || norm2.contains(&norm1) {
        return true;
    }

    let parts1: Vec<&str> = norm1.split(' ').collect();
    let parts2: Vec<&str> = norm2.split(' ').collect();

    if parts1.len() != parts2.len() {
        let (shorter, longer) = if parts1.len() < parts2.len() {
            (&parts1, &parts2)
        } else {
            (&parts2, &parts1)
        };

        // A longer token may cover several shorter ones.
        return shorter
            .iter()
            .all(|part| longer.iter().any(|other| tokens_correspond(part, other)));
    }

    parts1
        .iter()
        .zip(&parts2)
        .all(|(p1, p2)| edit_distance(p1, p2) <= max_token_distance(p1))
}
