//! Shared types, error model, and configuration for ContactBook.
//!
//! This crate is the foundation depended on by all other ContactBook crates.
//! It provides:
//! - [`ContactBookError`] — the unified error type
//! - Domain types ([`ContactRecord`], [`PhoneNumber`], [`ContactId`], [`Platform`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, DialerConfig, config_dir, config_file_path, expand_home,
    init_config, load_config, load_config_from, validate_config,
};
pub use error::{ContactBookError, Result};
pub use types::{ContactId, ContactRecord, EmailAddress, PhoneNumber, Platform};
