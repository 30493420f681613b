//! AES-256-GCM authenticated encryption of password strings.
//!
//! Each call to `encrypt` generates a fresh random 12-byte nonce and
//! returns it alongside the ciphertext.  The nonce travels as its own
//! record field and is never prepended to the ciphertext blob; the
//! 16-byte auth tag is appended to the ciphertext per standard GCM
//! framing.

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};
use zeroize::Zeroize;

use crate::crypto::keys::MasterKey;
use crate::errors::{PassVaultError, Result};

/// Size of the AES-256-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Output of one encryption call: the nonce and the ciphertext with
/// its appended auth tag, stored as separate record fields.
#[derive(Debug, Clone)]
pub struct EncryptedPassword {
    pub iv: Vec<u8>,
    pub ciphertext: Vec<u8>,
}

/// Encrypt a plaintext password under the master key.
///
/// A random nonce is generated on every call and must never be reused
/// for a second ciphertext under the same key.
pub fn encrypt(key: &MasterKey, plaintext: &str) -> Result<EncryptedPassword> {
    // Build the cipher from the raw key bytes.
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| PassVaultError::EncryptionFailed(format!("invalid key length: {e}")))?;

    // Generate a random 12-byte nonce.
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    // Encrypt and authenticate the UTF-8 bytes of the plaintext.
    let ciphertext = cipher
        .encrypt(&nonce, plaintext.as_bytes())
        .map_err(|e| PassVaultError::EncryptionFailed(format!("encryption error: {e}")))?;

    Ok(EncryptedPassword {
        iv: nonce.to_vec(),
        ciphertext,
    })
}

/// Decrypt a password produced by [`encrypt`].
///
/// Fails with `DecryptionFailed` on a wrong key, a tampered nonce or
/// ciphertext, or truncated input; no partial plaintext is ever
/// returned.
pub fn decrypt(key: &MasterKey, iv: &[u8], ciphertext: &[u8]) -> Result<String> {
    // The nonce is stored separately, so its length is validated here
    // rather than recovered by splitting a combined blob.
    if iv.len() != NONCE_LEN {
        return Err(PassVaultError::DecryptionFailed);
    }
    let nonce = Nonce::from_slice(iv);

    let cipher =
        Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| PassVaultError::DecryptionFailed)?;

    // Decrypt and verify the auth tag.
    let plaintext_bytes = cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| PassVaultError::DecryptionFailed)?;

    // Convert to a string, zeroizing the intermediate buffer if the
    // decrypted bytes are not valid UTF-8.
    match String::from_utf8(plaintext_bytes) {
        Ok(plaintext) => Ok(plaintext),
        Err(e) => {
            let mut bytes = e.into_bytes();
            bytes.zeroize();
            Err(PassVaultError::DecryptionFailed)
        }
    }
}
