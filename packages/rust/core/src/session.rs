//! Startup session: ask the address book for access, then read it once.
//!
//! The fetch runs to completion before any rendering. Denial and an empty
//! address book are terminal states for the session, reported as text by the
//! renderer; there is no retry loop.

use chrono::{DateTime, Utc};
use tracing::{info, instrument, warn};

use contactbook_shared::{ContactRecord, Result};

/// Shown by renderers while the session is still loading.
pub const LOADING_MESSAGE: &str = "Loading contacts...";

/// Outcome of an access request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessStatus {
    Granted,
    Denied,
}

/// An address-book provider.
pub trait AddressBook {
    /// Ask for permission to read contacts.
    fn request_access(&self) -> impl Future<Output = Result<AccessStatus>> + Send;

    /// Read every contact. Only called after access was granted.
    fn read_all(&self) -> impl Future<Output = Result<Vec<ContactRecord>>> + Send;
}

/// Contacts read at startup, frozen for the session.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub records: Vec<ContactRecord>,
    pub fetched_at: DateTime<Utc>,
}

/// Resolved session state.
#[derive(Debug, Clone)]
pub enum Session {
    /// The provider refused access.
    Denied,
    /// Access was granted but the address book holds no contacts.
    Empty,
    /// Contacts are available for rendering.
    Ready(Snapshot),
}

impl Session {
    /// User-facing text for the terminal states.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::Denied => Some("Permission denied to access contacts"),
            Self::Empty => Some("No contacts found"),
            Self::Ready(_) => None,
        }
    }

    /// The snapshot, when there is one.
    pub fn snapshot(&self) -> Option<&Snapshot> {
        match self {
            Self::Ready(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    /// Snapshot records, or an empty slice for terminal states.
    pub fn records(&self) -> &[ContactRecord] {
        match self {
            Self::Ready(snapshot) => &snapshot.records,
            _ => &[],
        }
    }
}

/// Request access and read the address book once.
#[instrument(skip_all)]
pub async fn load_session<P: AddressBook>(provider: &P) -> Result<Session> {
    if provider.request_access().await? == AccessStatus::Denied {
        warn!("address book access denied");
        return Ok(Session::Denied);
    }

    let records = provider.read_all().await?;
    if records.is_empty() {
        info!("address book is empty");
        return Ok(Session::Empty);
    }

    info!(count = records.len(), "address book loaded");
    Ok(Session::Ready(Snapshot {
        records,
        fetched_at: Utc::now(),
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use contactbook_shared::{ContactBookError, PhoneNumber};

    use super::*;

    struct FakeBook {
        access: AccessStatus,
        records: Vec<ContactRecord>,
        read_called: AtomicBool,
        fail_read: bool,
    }

    impl FakeBook {
        fn new(access: AccessStatus, records: Vec<ContactRecord>) -> Self {
            Self {
                access,
                records,
                read_called: AtomicBool::new(false),
                fail_read: false,
            }
        }
    }

    impl AddressBook for FakeBook {
        async fn request_access(&self) -> Result<AccessStatus> {
            Ok(self.access)
        }

        async fn read_all(&self) -> Result<Vec<ContactRecord>> {
            self.read_called.store(true, Ordering::SeqCst);
            if self.fail_read {
                return Err(ContactBookError::Provider("backend unavailable".into()));
            }
            Ok(self.records.clone())
        }
    }

    fn one_contact() -> Vec<ContactRecord> {
        vec![ContactRecord {
            id: "1".into(),
            first_name: Some("Ana".into()),
            phone_numbers: vec![PhoneNumber::new("123")],
            ..Default::default()
        }]
    }

    #[tokio::test]
    async fn denied_access_skips_read() {
        let book = FakeBook::new(AccessStatus::Denied, one_contact());
        let session = load_session(&book).await.expect("session");
        assert!(matches!(session, Session::Denied));
        assert_eq!(session.message(), Some("Permission denied to access contacts"));
        assert!(session.records().is_empty());
        assert!(!book.read_called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn empty_book_is_distinct_state() {
        let book = FakeBook::new(AccessStatus::Granted, vec![]);
        let session = load_session(&book).await.expect("session");
        assert!(matches!(session, Session::Empty));
        assert_eq!(session.message(), Some("No contacts found"));
    }

    #[tokio::test]
    async fn granted_access_yields_snapshot() {
        let book = FakeBook::new(AccessStatus::Granted, one_contact());
        let session = load_session(&book).await.expect("session");
        assert_eq!(session.message(), None);
        assert_eq!(session.records().len(), 1);
        assert!(session.snapshot().is_some());
    }

    #[tokio::test]
    async fn read_failure_propagates() {
        let mut book = FakeBook::new(AccessStatus::Granted, one_contact());
        book.fail_read = true;
        let err = load_session(&book).await.unwrap_err();
        assert!(err.to_string().contains("backend unavailable"));
    }
}
