//! Jump-to-letter index.
//!
//! The pipeline only fixes group order; anchor offsets depend on how a
//! renderer lays rows out. [`build_letter_index`] covers the common case of
//! fixed-height rows, accumulating offsets group by group.

use serde::Serialize;

use crate::pipeline::DisplayGroup;

/// Where a letter's section starts in the rendered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LetterIndexEntry {
    pub letter: char,
    /// Offset of the section header, in renderer units (rows, pixels, ...).
    pub anchor_offset: usize,
}

/// Fixed-height layout of a grouped list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLayout {
    /// Height of a letter header.
    pub header_rows: usize,
    /// Height of one contact row.
    pub contact_rows: usize,
}

impl Default for RowLayout {
    fn default() -> Self {
        Self {
            header_rows: 1,
            contact_rows: 1,
        }
    }
}

/// Lay groups out top to bottom and record each header's offset.
pub fn build_letter_index(groups: &[DisplayGroup<'_>], layout: RowLayout) -> Vec<LetterIndexEntry> {
    let mut offset = 0;
    groups
        .iter()
        .map(|group| {
            let entry = LetterIndexEntry {
                letter: group.letter,
                anchor_offset: offset,
            };
            offset += layout.header_rows + group.contacts.len() * layout.contact_rows;
            entry
        })
        .collect()
}

/// Offset to scroll to for `letter`, if that letter has a section.
pub fn anchor_for(index: &[LetterIndexEntry], letter: char) -> Option<usize> {
    let letter = letter.to_ascii_uppercase();
    index
        .iter()
        .find(|e| e.letter == letter)
        .map(|e| e.anchor_offset)
}

/// The section containing `offset`: the last entry whose anchor is at or above it.
pub fn letter_at_offset(index: &[LetterIndexEntry], offset: usize) -> Option<char> {
    index
        .iter()
        .take_while(|e| e.anchor_offset <= offset)
        .last()
        .map(|e| e.letter)
}

#[cfg(test)]
mod tests {
    use contactbook_shared::{ContactRecord, PhoneNumber};

    use super::*;
    use crate::pipeline::render;

    fn snapshot() -> Vec<ContactRecord> {
        ["Ana", "Alice", "Bruno", "Davi", "Diana", "Dora"]
            .iter()
            .enumerate()
            .map(|(i, name)| ContactRecord {
                id: i.to_string().into(),
                first_name: Some(name.to_string()),
                phone_numbers: vec![PhoneNumber::new("1")],
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn offsets_accumulate_headers_and_rows() {
        let snapshot = snapshot();
        let groups = render(&snapshot, "");
        let index = build_letter_index(&groups, RowLayout::default());

        assert_eq!(
            index,
            vec![
                LetterIndexEntry { letter: 'A', anchor_offset: 0 },
                LetterIndexEntry { letter: 'B', anchor_offset: 3 },
                LetterIndexEntry { letter: 'D', anchor_offset: 5 },
            ]
        );
    }

    #[test]
    fn custom_row_heights() {
        let snapshot = snapshot();
        let groups = render(&snapshot, "");
        let layout = RowLayout {
            header_rows: 2,
            contact_rows: 3,
        };
        let index = build_letter_index(&groups, layout);
        assert_eq!(anchor_for(&index, 'b'), Some(8));
        assert_eq!(anchor_for(&index, 'D'), Some(13));
        assert_eq!(anchor_for(&index, 'C'), None);
    }

    #[test]
    fn letter_at_offset_finds_enclosing_section() {
        let snapshot = snapshot();
        let groups = render(&snapshot, "");
        let index = build_letter_index(&groups, RowLayout::default());

        assert_eq!(letter_at_offset(&index, 0), Some('A'));
        assert_eq!(letter_at_offset(&index, 2), Some('A'));
        assert_eq!(letter_at_offset(&index, 3), Some('B'));
        assert_eq!(letter_at_offset(&index, 100), Some('D'));
        assert_eq!(letter_at_offset(&[], 0), None);
    }
}
