//! Credential record type and field validation.

use crate::errors::{FieldError, PassVaultError, Result};

/// A single stored credential in ciphertext form.
///
/// The nonce is not secret and travels as its own field next to the
/// encrypted password bytes.  Entries are immutable once created;
/// there is no update operation.
#[derive(Debug, Clone)]
pub struct CredentialEntry {
    /// Storage-assigned id; monotonic and never reused.
    pub id: i64,

    /// The site this credential belongs to (e.g. "example.com").
    pub website: String,

    /// The account name at that site.
    pub username: String,

    /// 12-byte nonce used for this entry's encryption.
    pub iv: Vec<u8>,

    /// AES-256-GCM output with the 16-byte auth tag appended.
    pub ciphertext: Vec<u8>,
}

/// Check that every field of a new credential is non-empty.
///
/// All failing fields are collected into a single `ValidationFailed`
/// so callers can report them in one pass.
pub fn validate_new_credential(website: &str, username: &str, password: &str) -> Result<()> {
    let mut errors = Vec::new();

    if website.is_empty() {
        errors.push(FieldError::empty("website"));
    }
    if username.is_empty() {
        errors.push(FieldError::empty("username"));
    }
    if password.is_empty() {
        errors.push(FieldError::empty("password"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(PassVaultError::ValidationFailed(errors))
    }
}
