//! Address-book providers.
//!
//! [`FileAddressBook`] reads a JSON export of the device address book; access
//! is granted when the file can be opened and denied on an OS permission
//! error. [`StaticAddressBook`] serves an in-memory list for tests and demos.

mod parser;

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use contactbook_core::{AccessStatus, AddressBook};
use contactbook_shared::{ContactBookError, ContactRecord, Result};

pub use parser::parse_snapshot;

// ---------------------------------------------------------------------------
// FileAddressBook
// ---------------------------------------------------------------------------

/// Address book backed by a JSON snapshot file.
#[derive(Debug, Clone)]
pub struct FileAddressBook {
    path: PathBuf,
}

impl FileAddressBook {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AddressBook for FileAddressBook {
    #[instrument(skip_all, fields(path = %self.path.display()))]
    async fn request_access(&self) -> Result<AccessStatus> {
        let file = match tokio::fs::File::open(&self.path).await {
            Ok(file) => file,
            Err(e) => return access_from_open_error(&self.path, e),
        };

        let metadata = file
            .metadata()
            .await
            .map_err(|e| ContactBookError::io(&self.path, e))?;
        if !metadata.is_file() {
            return Err(ContactBookError::Provider(format!(
                "snapshot {} is not a regular file",
                self.path.display()
            )));
        }

        debug!("snapshot readable, access granted");
        Ok(AccessStatus::Granted)
    }

    #[instrument(skip_all, fields(path = %self.path.display()))]
    async fn read_all(&self) -> Result<Vec<ContactRecord>> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| ContactBookError::io(&self.path, e))?;

        let records = parse_snapshot(&content)?;
        info!(count = records.len(), "snapshot parsed");
        Ok(records)
    }
}

/// A permission error is a denial; anything else is a real failure.
fn access_from_open_error(path: &Path, err: std::io::Error) -> Result<AccessStatus> {
    if err.kind() == std::io::ErrorKind::PermissionDenied {
        debug!("snapshot not readable, access denied");
        Ok(AccessStatus::Denied)
    } else {
        Err(ContactBookError::io(path, err))
    }
}

// ---------------------------------------------------------------------------
// StaticAddressBook
// ---------------------------------------------------------------------------

/// In-memory address book with a fixed access answer.
#[derive(Debug, Clone)]
pub struct StaticAddressBook {
    records: Vec<ContactRecord>,
    access: AccessStatus,
}

impl StaticAddressBook {
    /// A book that grants access and returns `records`.
    pub fn granted(records: Vec<ContactRecord>) -> Self {
        Self {
            records,
            access: AccessStatus::Granted,
        }
    }

    /// A book that refuses access.
    pub fn denied() -> Self {
        Self {
            records: Vec::new(),
            access: AccessStatus::Denied,
        }
    }
}

impl AddressBook for StaticAddressBook {
    async fn request_access(&self) -> Result<AccessStatus> {
        Ok(self.access)
    }

    async fn read_all(&self) -> Result<Vec<ContactRecord>> {
        Ok(self.records.clone())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
