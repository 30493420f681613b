//! Credential store — encrypted local persistence.
//!
//! This module provides:
//! - `CredentialEntry` record type and validation (`entry`)
//! - SQLite persistence with the two collections (`db`)
//! - master-key lifecycle (`key_manager`)
//! - high-level `CredentialStore` orchestration (`credentials`)

pub mod credentials;
pub mod db;
pub mod entry;
pub mod key_manager;

// Re-export the most commonly used items.
pub use credentials::CredentialStore;
pub use db::Database;
pub use entry::CredentialEntry;
pub use key_manager::ensure_master_key;
