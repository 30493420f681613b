//! High-level credential store.
//!
//! `CredentialStore` is the composition root the CLI talks to: it owns
//! the database handle and the cached master key, and wires the crypto
//! engine to the persistence layer for each operation.

use std::path::Path;

use tracing::debug;

use crate::crypto::{self, MasterKey};
use crate::errors::Result;
use crate::store::db::Database;
use crate::store::entry::{validate_new_credential, CredentialEntry};
use crate::store::key_manager;

/// Orchestrates key management, encryption, and persistence behind the
/// credential operations.
///
/// Opening the store performs the one-time initialization: storage is
/// created if absent and the master key is loaded or generated, then
/// cached here by value for the life of the handle.  The key is
/// read-only after that point.
pub struct CredentialStore {
    db: Database,
    master_key: MasterKey,
}

impl CredentialStore {
    /// Open the store backed by the database at `db_path`, creating
    /// storage and the master key on first use.  Idempotent across
    /// runs.
    pub async fn open(db_path: &Path) -> Result<Self> {
        let db = Database::open(db_path).await?;
        let master_key = key_manager::ensure_master_key(&db).await?;
        Ok(Self { db, master_key })
    }

    /// Encrypt and store a new credential, returning its assigned id.
    ///
    /// Every field must be non-empty.  Encryption runs before any
    /// write and the insert is a single atomic statement, so a failure
    /// at either step leaves no partial state behind.
    pub async fn add_credential(
        &self,
        website: &str,
        username: &str,
        password: &str,
    ) -> Result<i64> {
        // 1. Validate every field up front.
        validate_new_credential(website, username, password)?;

        // 2. Encrypt under the cached master key.
        let sealed = crypto::encrypt(&self.master_key, password)?;

        // 3. Insert as one atomic write.
        let id = self
            .db
            .insert_password(website, username, &sealed.iv, &sealed.ciphertext)
            .await?;

        debug!(id, website, "stored credential");
        Ok(id)
    }

    /// List every credential in insertion order, ciphertext form only.
    pub async fn list_credentials(&self) -> Result<Vec<CredentialEntry>> {
        self.db.list_passwords().await
    }

    /// Decrypt one entry's password.
    ///
    /// A failure is final: decrypting the same ciphertext with the
    /// same key again cannot give a different outcome, so callers must
    /// not retry `DecryptionFailed`.
    pub fn reveal_password(&self, entry: &CredentialEntry) -> Result<String> {
        debug!(id = entry.id, "revealing credential");
        crypto::decrypt(&self.master_key, &entry.iv, &entry.ciphertext)
    }

    /// Delete a credential by id.  Removing an absent id is a no-op.
    pub async fn remove_credential(&self, id: i64) -> Result<()> {
        self.db.delete_password(id).await?;
        debug!(id, "removed credential");
        Ok(())
    }
}
