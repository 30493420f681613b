//! Cryptographic primitives for PassVault.
//!
//! This module provides:
//! - AES-256-GCM encryption and decryption of passwords (`encryption`)
//! - Master key generation and in-memory handling (`keys`)

pub mod encryption;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, MasterKey};
pub use encryption::{decrypt, encrypt, EncryptedPassword, NONCE_LEN};
pub use keys::{MasterKey, KEY_LEN};
