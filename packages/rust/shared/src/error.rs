//! Error types for ContactBook.
//!
//! Library crates use [`ContactBookError`] via `thiserror`.
//! App crates (cli/tui) wrap this with `color-eyre` for rich diagnostics.
//!
//! Access denial and an empty address book are not errors: they are
//! session states surfaced by the renderer (see `contactbook_core::session`).

use std::path::PathBuf;

/// Top-level error type for all ContactBook operations.
#[derive(Debug, thiserror::Error)]
pub enum ContactBookError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Snapshot or config content could not be parsed.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Address-book provider failure (other than access denial).
    #[error("address book error: {0}")]
    Provider(String),

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data validation error (duplicate ids, malformed URI, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ContactBookError>;

impl ContactBookError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = ContactBookError::config("unknown platform 'symbian'");
        assert_eq!(err.to_string(), "config error: unknown platform 'symbian'");

        let err = ContactBookError::validation("duplicate contact id 42");
        assert!(err.to_string().contains("duplicate contact id 42"));
    }

    #[test]
    fn io_error_keeps_path() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = ContactBookError::io("/tmp/contacts.json", source);
        let msg = err.to_string();
        assert!(msg.contains("contacts.json"));
        assert!(msg.contains("gone"));
    }
}
