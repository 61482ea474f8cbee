//! Display pipeline: snapshot + query → letter-grouped contacts.
//!
//! `render` is pure and re-run in full on every query change. Steps:
//! 1. Drop contacts without phone numbers
//! 2. Derive the full name
//! 3. Keep names containing the query (case-insensitive)
//! 4. Stable sort by normalized name key
//! 5. Derive the leading letter, dropping non A–Z
//! 6. Group by letter, letters ascending

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, instrument};

use contactbook_shared::ContactRecord;

use crate::name::{compare_keys, full_name, leading_letter, matches_query, sort_key};

/// Contacts sharing a leading letter, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayGroup<'a> {
    /// Upper-case ASCII letter `A`–`Z`.
    pub letter: char,
    /// Records borrowed from the snapshot, sorted by normalized name.
    pub contacts: Vec<&'a ContactRecord>,
}

/// A contact that survived filtering, with its derived values.
struct Candidate<'a> {
    record: &'a ContactRecord,
    key: String,
}

/// Filter, sort, and group a snapshot for display.
#[instrument(skip_all, fields(snapshot = snapshot.len(), query_len = query.len()))]
pub fn render<'a>(snapshot: &'a [ContactRecord], query: &str) -> Vec<DisplayGroup<'a>> {
    let mut candidates: Vec<Candidate<'a>> = snapshot
        .iter()
        .filter(|record| record.has_phone_number())
        .filter_map(|record| {
            let name = full_name(record);
            matches_query(&name, query).then(|| Candidate {
                record,
                key: sort_key(&name),
            })
        })
        .collect();

    // Vec::sort_by is stable: equal keys keep snapshot order.
    candidates.sort_by(|a, b| compare_keys(&a.key, &b.key));

    let matched = candidates.len();
    let mut by_letter: BTreeMap<char, Vec<&'a ContactRecord>> = BTreeMap::new();
    for candidate in candidates {
        if let Some(letter) = leading_letter(candidate.record) {
            by_letter.entry(letter).or_default().push(candidate.record);
        }
    }

    let groups: Vec<DisplayGroup<'a>> = by_letter
        .into_iter()
        .map(|(letter, contacts)| DisplayGroup { letter, contacts })
        .collect();

    debug!(
        matched,
        grouped = contact_count(&groups),
        groups = groups.len(),
        "contacts rendered"
    );

    groups
}

/// The flat letter list feeding the jump index.
pub fn letters(groups: &[DisplayGroup<'_>]) -> Vec<char> {
    groups.iter().map(|g| g.letter).collect()
}

/// Total contacts across all groups.
pub fn contact_count(groups: &[DisplayGroup<'_>]) -> usize {
    groups.iter().map(|g| g.contacts.len()).sum()
}

/// Find the group for a letter (case-insensitive).
pub fn group_for_letter<'g, 'a>(
    groups: &'g [DisplayGroup<'a>],
    letter: char,
) -> Option<&'g DisplayGroup<'a>> {
    let letter = letter.to_ascii_uppercase();
    groups.iter().find(|g| g.letter == letter)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use contactbook_shared::PhoneNumber;

    use super::*;

    fn contact(id: &str, first: &str, last: &str, phones: &[&str]) -> ContactRecord {
        ContactRecord {
            id: id.into(),
            first_name: (!first.is_empty()).then(|| first.to_string()),
            last_name: (!last.is_empty()).then(|| last.to_string()),
            phone_numbers: phones.iter().map(|n| PhoneNumber::new(*n)).collect(),
            ..Default::default()
        }
    }

    fn ids(group: &DisplayGroup<'_>) -> Vec<String> {
        group.contacts.iter().map(|c| c.id.to_string()).collect()
    }

    fn sample() -> Vec<ContactRecord> {
        vec![
            contact("1", "Beto", "", &["123"]),
            contact("2", "ana", "", &["456"]),
            contact("3", "Zeca", "", &[]),
            contact("4", "John", "Smith", &["+1 555"]),
            contact("5", "3Com", "", &["0800"]),
            contact("6", "Anabela", "", &["222"]),
            contact("7", "Ana", "", &["111"]),
            contact("8", "", "", &["999"]),
            contact("9", "", "brown", &["333"]),
        ]
    }

    #[test]
    fn end_to_end_example() {
        let snapshot = vec![
            contact("beto", "Beto", "", &["123"]),
            contact("ana", "ana", "", &["456"]),
            contact("zeca", "Zeca", "", &[]),
        ];

        let groups = render(&snapshot, "");
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].letter, 'A');
        assert_eq!(ids(&groups[0]), vec!["ana"]);
        assert_eq!(groups[1].letter, 'B');
        assert_eq!(ids(&groups[1]), vec!["beto"]);
    }

    #[test]
    fn empty_snapshot_renders_nothing() {
        assert!(render(&[], "").is_empty());
        assert!(render(&[], "anything").is_empty());
    }

    #[test]
    fn nameless_contacts_are_excluded() {
        let snapshot = vec![contact("1", "", "", &["1"]), contact("2", "", "", &["2"])];
        assert!(render(&snapshot, "").is_empty());
    }

    #[test]
    fn every_rendered_contact_has_a_phone_number() {
        let snapshot = sample();
        let groups = render(&snapshot, "");
        assert!(
            groups
                .iter()
                .flat_map(|g| &g.contacts)
                .all(|c| !c.phone_numbers.is_empty())
        );
        assert!(group_for_letter(&groups, 'Z').is_none());
    }

    #[test]
    fn groups_are_disjoint() {
        let snapshot = sample();
        let groups = render(&snapshot, "");
        let mut seen = HashSet::new();
        for contact in groups.iter().flat_map(|g| &g.contacts) {
            assert!(seen.insert(contact.id.clone()), "duplicate id {}", contact.id);
        }
        assert_eq!(seen.len(), contact_count(&groups));
    }

    #[test]
    fn groups_ascend_and_members_follow_comparator() {
        let snapshot = sample();
        let groups = render(&snapshot, "");
        assert_eq!(letters(&groups), vec!['A', 'B', 'J']);

        for group in &groups {
            for pair in group.contacts.windows(2) {
                let a = sort_key(&full_name(pair[0]));
                let b = sort_key(&full_name(pair[1]));
                assert_ne!(compare_keys(&a, &b), std::cmp::Ordering::Greater);
            }
        }
    }

    #[test]
    fn prefix_name_sorts_before_longer_name() {
        let snapshot = vec![
            contact("long", "Anabela", "", &["1"]),
            contact("short", "Ana", "", &["2"]),
        ];
        let groups = render(&snapshot, "");
        assert_eq!(ids(&groups[0]), vec!["short", "long"]);
    }

    #[test]
    fn whitespace_is_ignored_when_ordering() {
        // "Ana Z" keys as "anaz", which sorts after "anab".
        let snapshot = vec![
            contact("ana-z", "Ana", "Z", &["1"]),
            contact("anab", "Anab", "", &["2"]),
        ];
        let groups = render(&snapshot, "");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].letter, 'A');
        assert_eq!(ids(&groups[0]), vec!["anab", "ana-z"]);
    }

    #[test]
    fn equal_keys_keep_snapshot_order() {
        let snapshot = sample();
        let groups = render(&snapshot, "");
        let a = group_for_letter(&groups, 'a').expect("A group");
        // "ana" (id 2) and "Ana" (id 7) normalize to the same key.
        assert_eq!(ids(a), vec!["2", "7", "6"]);
    }

    #[test]
    fn search_spans_first_and_last_name() {
        let snapshot = sample();
        let groups = render(&snapshot, "ohn sm");
        assert_eq!(letters(&groups), vec!['J']);
        assert_eq!(ids(&groups[0]), vec!["4"]);
    }

    #[test]
    fn search_is_case_insensitive() {
        let snapshot = sample();
        let groups = render(&snapshot, "ANA");
        assert_eq!(contact_count(&groups), 3);
    }

    #[test]
    fn search_without_matches_is_empty() {
        let snapshot = sample();
        assert!(render(&snapshot, "xyz").is_empty());
    }

    #[test]
    fn non_alphabetic_leading_name_is_in_no_group() {
        let snapshot = sample();
        let groups = render(&snapshot, "");
        assert!(
            groups
                .iter()
                .flat_map(|g| &g.contacts)
                .all(|c| c.id.as_str() != "5")
        );
        // Even when the query selects it directly.
        assert!(render(&snapshot, "3com").is_empty());
    }

    #[test]
    fn lowercase_surname_groups_under_uppercase_letter() {
        let snapshot = sample();
        let groups = render(&snapshot, "brown");
        assert_eq!(letters(&groups), vec!['B']);
        assert_eq!(ids(&groups[0]), vec!["9"]);
    }

    #[test]
    fn render_is_idempotent_and_leaves_input_untouched() {
        let snapshot = sample();
        let before = snapshot.clone();
        let first = render(&snapshot, "a");
        let second = render(&snapshot, "a");
        assert_eq!(first, second);
        assert_eq!(snapshot, before);
    }

    #[test]
    fn fixture_renders_expected_groups() {
        let fixture = std::fs::read_to_string("../../../fixtures/json/contacts.fixture.json")
            .expect("read fixture");
        let snapshot: Vec<ContactRecord> = serde_json::from_str(&fixture).expect("parse fixture");

        let groups = render(&snapshot, "");
        assert_eq!(letters(&groups), vec!['A', 'B', 'J']);
        // ana, Ana, Anabela Maria Costa
        assert_eq!(ids(&groups[0]), vec!["2", "6", "7"]);
    }
}
