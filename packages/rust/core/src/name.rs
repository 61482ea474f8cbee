//! Name derivation: full name, sort key, ordering, and leading letter.
//!
//! Everything here is computed on demand from a [`ContactRecord`]; nothing is
//! cached on the record itself.

use std::cmp::Ordering;

use contactbook_shared::ContactRecord;

/// Space-joined `first middle last`, skipping absent parts, trimmed.
pub fn full_name(record: &ContactRecord) -> String {
    record
        .name_fields()
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Ordering key: trimmed, lower-cased, with every whitespace character removed.
pub fn sort_key(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Compare two sort keys by code point, character by character.
///
/// When one key is a prefix of the other the shorter one sorts first, so
/// "ana" < "anabela". No locale collation is involved.
pub fn compare_keys(a: &str, b: &str) -> Ordering {
    let mut left = a.chars();
    let mut right = b.chars();
    loop {
        match (left.next(), right.next()) {
            (Some(x), Some(y)) if x != y => return (x as u32).cmp(&(y as u32)),
            (Some(_), Some(_)) => continue,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (None, None) => return Ordering::Equal,
        }
    }
}

/// Upper-cased first character of the first non-empty name field.
///
/// Returns `None` when that character is not an ASCII letter (digits,
/// symbols, accented letters, or no name at all): such contacts stay out of
/// the letter-grouped view.
pub fn leading_letter(record: &ContactRecord) -> Option<char> {
    let first = record
        .name_fields()
        .into_iter()
        .flatten()
        .next()?
        .chars()
        .next()?;

    let mut upper = first.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(c), None) if c.is_ascii_uppercase() => Some(c),
        _ => None,
    }
}

/// Case-insensitive substring match of `query` against a full name.
pub fn matches_query(full_name: &str, query: &str) -> bool {
    query.is_empty() || full_name.to_lowercase().contains(&query.to_lowercase())
}
