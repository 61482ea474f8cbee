//! Snapshot file parser.
//!
//! Accepts the two shapes address-book exports come in:
//! - a bare JSON array of contact records
//! - the API response object `{ "data": [ ... ] }`

use std::collections::HashSet;

use serde::Deserialize;

use contactbook_shared::{ContactBookError, ContactRecord, Result};

#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotDocument {
    Records(Vec<ContactRecord>),
    Response { data: Vec<ContactRecord> },
}

/// Parse snapshot JSON and check that contact ids are unique.
pub fn parse_snapshot(content: &str) -> Result<Vec<ContactRecord>> {
    let document: SnapshotDocument = serde_json::from_str(content).map_err(|e| {
        ContactBookError::parse(format!(
            "expected a contact array or {{\"data\": [...]}} object: {e}"
        ))
    })?;

    let records = match document {
        SnapshotDocument::Records(records) => records,
        SnapshotDocument::Response { data } => data,
    };

    let mut seen = HashSet::with_capacity(records.len());
    for record in &records {
        if !seen.insert(&record.id) {
            return Err(ContactBookError::validation(format!(
                "duplicate contact id '{}'",
                record.id
            )));
        }
    }

    Ok(records)
}
