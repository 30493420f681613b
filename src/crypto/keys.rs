//! Master key material.
//!
//! The entire store is protected by a single 256-bit symmetric key.
//! It is generated once from the OS random source, persisted in the
//! key table, and held in memory only inside [`MasterKey`], which
//! zeroes its bytes on drop.

use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroize;

use crate::errors::{PassVaultError, Result};

/// Length of the master key in bytes (256 bits).
pub const KEY_LEN: usize = 32;

/// A wrapper around the 32-byte master key that automatically zeroes
/// its memory when dropped.
///
/// There is exactly one logical master key per store; every stored
/// password is encrypted under it.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct MasterKey {
    bytes: [u8; KEY_LEN],
}

impl MasterKey {
    /// Create a `MasterKey` from raw bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Generate a fresh master key from the OS random source.
    pub fn generate() -> Result<Self> {
        let mut bytes = [0u8; KEY_LEN];
        OsRng.try_fill_bytes(&mut bytes).map_err(|e| {
            PassVaultError::KeyGenerationFailed(format!("OS random source unavailable: {e}"))
        })?;
        Ok(Self { bytes })
    }

    /// Access the raw key bytes (e.g. to pass to the cipher).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}
