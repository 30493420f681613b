use std::fmt;

use thiserror::Error;

/// All errors that can occur in PassVault.
#[derive(Debug, Error)]
pub enum PassVaultError {
    // --- Storage errors ---
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Storage read failed: {0}")]
    StorageReadFailed(String),

    #[error("Storage write failed: {0}")]
    StorageWriteFailed(String),

    // --- Crypto errors ---
    #[error("Key generation failed: {0}")]
    KeyGenerationFailed(String),

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed — wrong key or corrupted data")]
    DecryptionFailed,

    // --- Input errors ---
    #[error("Validation failed: {}", format_field_errors(.0))]
    ValidationFailed(Vec<FieldError>),

    #[error("No character class selected — enable at least one of uppercase, lowercase, digits, symbols")]
    NoCharacterClassSelected,

    #[error("Invalid password length {0} — must be at least 1")]
    InvalidLength(usize),

    #[error("No credential with id {0}")]
    CredentialNotFound(i64),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Audit error: {0}")]
    AuditError(String),
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub problem: String,
}

impl FieldError {
    pub fn empty(field: &'static str) -> Self {
        Self {
            field,
            problem: "must not be empty".into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.problem)
    }
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(FieldError::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Convenience type alias for PassVault results.
pub type Result<T> = std::result::Result<T, PassVaultError>;
