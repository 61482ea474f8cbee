//! Core domain types for ContactBook address-book snapshots.
//!
//! Field names follow the camelCase JSON shape address books export
//! (`firstName`, `phoneNumbers`, ...), so a raw export deserializes directly.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ContactId
// ---------------------------------------------------------------------------

/// Opaque contact identifier, stable across reads of a given snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(pub String);

impl ContactId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContactId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContactId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ContactId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ---------------------------------------------------------------------------
// ContactRecord
// ---------------------------------------------------------------------------

/// A phone number attached to a contact, as stored by the address book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumber {
    /// Raw number text, possibly with spaces, dashes or a leading `+`.
    pub number: String,
    /// Address-book label ("mobile", "home", ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl PhoneNumber {
    pub fn new(number: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            label: None,
        }
    }
}

/// An e-mail address attached to a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddress {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// A single address-book entry. Read-only to the display pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    /// Unique identifier within the snapshot.
    pub id: ContactId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Ordered phone numbers; may be empty.
    #[serde(default)]
    pub phone_numbers: Vec<PhoneNumber>,
    /// Ordered e-mail addresses; display only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub emails: Vec<EmailAddress>,
}

impl ContactRecord {
    /// The three name fields in display order. Empty strings count as absent.
    pub fn name_fields(&self) -> [Option<&str>; 3] {
        [&self.first_name, &self.middle_name, &self.last_name]
            .map(|field| field.as_deref().filter(|s| !s.is_empty()))
    }

    /// Whether the contact can be called at all.
    pub fn has_phone_number(&self) -> bool {
        !self.phone_numbers.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Platform
// ---------------------------------------------------------------------------

/// The two supported mobile platforms. Only affects the call-URI scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Android,
    Ios,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Android => write!(f, "android"),
            Self::Ios => write!(f, "ios"),
        }
    }
}

impl std::str::FromStr for Platform {
    type Err = crate::ContactBookError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "android" => Ok(Self::Android),
            "ios" => Ok(Self::Ios),
            other => Err(crate::ContactBookError::config(format!(
                "unknown platform '{other}': expected 'android' or 'ios'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_deserializes_from_camel_case() {
        let json = r#"{
            "id": "17",
            "firstName": "John",
            "lastName": "Smith",
            "phoneNumbers": [{ "number": "+1 (555) 010-2030", "label": "mobile" }]
        }"#;
        let record: ContactRecord = serde_json::from_str(json).expect("deserialize");
        assert_eq!(record.id.as_str(), "17");
        assert_eq!(record.first_name.as_deref(), Some("John"));
        assert_eq!(record.middle_name, None);
        assert_eq!(record.phone_numbers[0].label.as_deref(), Some("mobile"));
        assert!(record.emails.is_empty());
    }

    #[test]
    fn missing_phone_numbers_default_to_empty() {
        let record: ContactRecord =
            serde_json::from_str(r#"{ "id": "1", "firstName": "Zeca" }"#).expect("deserialize");
        assert!(!record.has_phone_number());
    }

    #[test]
    fn name_fields_treat_empty_as_absent() {
        let record = ContactRecord {
            id: "1".into(),
            first_name: Some(String::new()),
            middle_name: None,
            last_name: Some("Silva".into()),
            ..Default::default()
        };
        assert_eq!(record.name_fields(), [None, None, Some("Silva")]);
    }

    #[test]
    fn platform_parses_case_insensitively() {
        assert_eq!("iOS".parse::<Platform>().expect("parse"), Platform::Ios);
        assert_eq!("android".parse::<Platform>().expect("parse"), Platform::Android);
        assert!("symbian".parse::<Platform>().is_err());
    }

    #[test]
    fn contacts_fixture_validates() {
        let fixture = std::fs::read_to_string("../../../fixtures/json/contacts.fixture.json")
            .expect("read fixture");
        let parsed: Vec<ContactRecord> =
            serde_json::from_str(&fixture).expect("deserialize fixture contacts");
        assert_eq!(parsed.len(), 8);
        assert_eq!(parsed[0].first_name.as_deref(), Some("Beto"));
        assert!(parsed.iter().any(|c| !c.has_phone_number()));
    }
}
