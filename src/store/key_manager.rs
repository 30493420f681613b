//! Master-key lifecycle over the persistence layer.

use tracing::debug;
use zeroize::Zeroize;

use crate::crypto::keys::{MasterKey, KEY_LEN};
use crate::errors::{PassVaultError, Result};
use crate::store::db::Database;

/// Load the master key, generating and persisting it on first use.
///
/// An existing record wins unconditionally — generation never
/// overwrites stored key material, so calling this twice returns
/// byte-identical keys.  Call once when the store opens and cache the
/// result for the process lifetime.
pub async fn ensure_master_key(db: &Database) -> Result<MasterKey> {
    if let Some(mut stored) = db.get_key_record().await? {
        if stored.len() != KEY_LEN {
            let len = stored.len();
            stored.zeroize();
            return Err(PassVaultError::StorageReadFailed(format!(
                "master key record has invalid length {len} (expected {KEY_LEN})"
            )));
        }

        let mut bytes = [0u8; KEY_LEN];
        bytes.copy_from_slice(&stored);
        stored.zeroize();

        debug!("loaded existing master key");
        return Ok(MasterKey::new(bytes));
    }

    let key = MasterKey::generate()?;
    db.put_key_record(key.as_bytes()).await?;

    debug!("generated and persisted new master key");
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn first_call_generates_and_persists() {
        let dir = TempDir::new().unwrap();
        let db = Database::open(&dir.path().join("passvault.db")).await.unwrap();

        assert!(db.get_key_record().await.unwrap().is_none());

        let key = ensure_master_key(&db).await.unwrap();
        let stored = db.get_key_record().await.unwrap().unwrap();
        assert_eq!(stored, key.as_bytes().to_vec());
    }

    #[tokio::test]
    async fn second_call_returns_same_key() {
        let dir = TempDir::new().unwrap();
        let db = Database::open(&dir.path().join("passvault.db")).await.unwrap();

        let first = ensure_master_key(&db).await.unwrap();
        let second = ensure_master_key(&db).await.unwrap();
        assert_eq!(first.as_bytes(), second.as_bytes());
    }

    #[tokio::test]
    async fn corrupt_key_record_is_an_error() {
        let dir = TempDir::new().unwrap();
        let db = Database::open(&dir.path().join("passvault.db")).await.unwrap();

        // A record of the wrong length must not be silently replaced.
        db.put_key_record(&[1u8, 2, 3]).await.unwrap();

        // MasterKey has no Debug, so match on the whole result.
        assert!(matches!(
            ensure_master_key(&db).await,
            Err(PassVaultError::StorageReadFailed(_))
        ));
        assert_eq!(
            db.get_key_record().await.unwrap().unwrap(),
            vec![1u8, 2, 3]
        );
    }
}
