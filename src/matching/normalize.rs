//! Canonical forms for references and counterparty names

/// Normalize a payment or document reference.
///
/// Whitespace is removed, leading zeros are stripped and the result is
/// uppercased. An absent reference normalizes to the empty string.
pub fn normalize_reference(reference: Option<&str>) -> String {
    let Some(reference) = reference else {
        return String::new();
    };

    let compact: String = reference.chars().filter(|c| !c.is_whitespace()).collect();
    compact.trim_start_matches('0').to_uppercase()
}

/// Whether two raw references denote the same document.
///
/// Empty references never match, not even each other.
pub fn references_match(left: Option<&str>, right: Option<&str>) -> bool {
    let left = normalize_reference(left);
    !left.is_empty() && left == normalize_reference(right)
}

/// Normalize a counterparty name: lowercase, single spaces, trimmed
pub fn normalize_name(name: Option<&str>) -> String {
    name.map(|name| {
        name.to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    })
    .unwrap_or_default()
}
