//! SQLite persistence layer.
//!
//! One database file holds two collections: the singleton master-key
//! record (`encryption_key_store`) and the credential entries
//! (`passwords`).  The connection is shared behind a mutex and every
//! call runs its SQL on the blocking pool, so the async surface never
//! stalls the runtime thread.  Each call is a single SQLite statement
//! and therefore commits or fails atomically.

use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::{params, Connection, OptionalExtension};
use tokio::task;
use tracing::debug;
use zeroize::Zeroizing;

use crate::errors::{PassVaultError, Result};
use crate::store::entry::CredentialEntry;

/// Fixed row id of the singleton master-key record.
const MASTER_KEY_ID: i64 = 1;

/// Schema version tracked in `PRAGMA user_version`.
const SCHEMA_VERSION: i32 = 1;

/// Handle to the credential database.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) the credential database at `path`.
    ///
    /// Creates the parent directory, both tables, and restrictive file
    /// permissions on first use.  Safe to call repeatedly; a database
    /// with a newer schema version than this build understands is
    /// refused.
    pub async fn open(path: &Path) -> Result<Self> {
        let path = path.to_path_buf();
        let conn = task::spawn_blocking(move || open_connection(&path))
            .await
            .map_err(|e| PassVaultError::StorageUnavailable(format!("storage task failed: {e}")))??;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `op` against the shared connection on the blocking pool.
    async fn with_conn<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        task::spawn_blocking(move || {
            let conn = conn.lock().map_err(|_| {
                PassVaultError::StorageUnavailable("connection mutex poisoned".into())
            })?;
            op(&conn)
        })
        .await
        .map_err(|e| PassVaultError::StorageUnavailable(format!("storage task failed: {e}")))?
    }

    /// Fetch the singleton master-key record, if present.
    pub async fn get_key_record(&self) -> Result<Option<Vec<u8>>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT raw_key FROM encryption_key_store WHERE id = ?1",
                params![MASTER_KEY_ID],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| PassVaultError::StorageReadFailed(format!("key record: {e}")))
        })
        .await
    }

    /// Persist the master-key record under the fixed id.
    ///
    /// Plain INSERT: an existing record is never overwritten, and a
    /// second put fails instead of replacing key material.
    pub async fn put_key_record(&self, raw_key: &[u8]) -> Result<()> {
        let raw_key = Zeroizing::new(raw_key.to_vec());
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO encryption_key_store (id, raw_key) VALUES (?1, ?2)",
                params![MASTER_KEY_ID, &raw_key[..]],
            )
            .map_err(|e| PassVaultError::StorageWriteFailed(format!("key record: {e}")))?;
            Ok(())
        })
        .await
    }

    /// Insert a credential and return its storage-assigned id.
    pub async fn insert_password(
        &self,
        website: &str,
        username: &str,
        iv: &[u8],
        ciphertext: &[u8],
    ) -> Result<i64> {
        let website = website.to_owned();
        let username = username.to_owned();
        let iv = iv.to_vec();
        let ciphertext = ciphertext.to_vec();

        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO passwords (website, username, iv, ciphertext)
                 VALUES (?1, ?2, ?3, ?4)",
                params![website, username, iv, ciphertext],
            )
            .map_err(|e| PassVaultError::StorageWriteFailed(format!("insert credential: {e}")))?;
            Ok(conn.last_insert_rowid())
        })
        .await
    }

    /// List every credential in insertion order.
    pub async fn list_passwords(&self) -> Result<Vec<CredentialEntry>> {
        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT id, website, username, iv, ciphertext
                     FROM passwords
                     ORDER BY id",
                )
                .map_err(|e| PassVaultError::StorageReadFailed(format!("list prepare: {e}")))?;

            let rows = stmt
                .query_map([], |row| {
                    Ok(CredentialEntry {
                        id: row.get(0)?,
                        website: row.get(1)?,
                        username: row.get(2)?,
                        iv: row.get(3)?,
                        ciphertext: row.get(4)?,
                    })
                })
                .map_err(|e| PassVaultError::StorageReadFailed(format!("list exec: {e}")))?;

            let mut entries = Vec::new();
            for row in rows {
                entries.push(
                    row.map_err(|e| PassVaultError::StorageReadFailed(format!("row parse: {e}")))?,
                );
            }
            Ok(entries)
        })
        .await
    }

    /// Delete a credential by id.  Deleting an absent id is a no-op.
    pub async fn delete_password(&self, id: i64) -> Result<()> {
        self.with_conn(move |conn| {
            conn.execute("DELETE FROM passwords WHERE id = ?1", params![id])
                .map_err(|e| {
                    PassVaultError::StorageWriteFailed(format!("delete credential: {e}"))
                })?;
            Ok(())
        })
        .await
    }
}

/// Blocking half of [`Database::open`].
fn open_connection(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                PassVaultError::StorageUnavailable(format!("cannot create data directory: {e}"))
            })?;
        }
    }

    let conn = Connection::open(path)
        .map_err(|e| PassVaultError::StorageUnavailable(format!("cannot open database: {e}")))?;

    // Set restrictive permissions on the database (owner-only).
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        let _ = std::fs::set_permissions(path, perms);
    }

    // WAL keeps a reader consistent while a concurrent write commits.
    conn.pragma_update(None, "journal_mode", "WAL")
        .map_err(|e| PassVaultError::StorageUnavailable(format!("cannot set journal mode: {e}")))?;

    init_schema(&conn)?;

    debug!(path = %path.display(), "opened credential database");
    Ok(conn)
}

/// Create the two collections on first open and enforce the schema
/// version on every subsequent open.
fn init_schema(conn: &Connection) -> Result<()> {
    let version: i32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| {
            PassVaultError::StorageUnavailable(format!("cannot read schema version: {e}"))
        })?;

    match version {
        0 => {
            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS encryption_key_store (
                    id      INTEGER PRIMARY KEY,
                    raw_key BLOB NOT NULL
                );
                CREATE TABLE IF NOT EXISTS passwords (
                    id         INTEGER PRIMARY KEY AUTOINCREMENT,
                    website    TEXT NOT NULL,
                    username   TEXT NOT NULL,
                    iv         BLOB NOT NULL,
                    ciphertext BLOB NOT NULL
                );",
            )
            .map_err(|e| {
                PassVaultError::StorageUnavailable(format!("cannot create schema: {e}"))
            })?;

            conn.pragma_update(None, "user_version", SCHEMA_VERSION)
                .map_err(|e| {
                    PassVaultError::StorageUnavailable(format!("cannot set schema version: {e}"))
                })?;

            debug!("created schema version {SCHEMA_VERSION}");
            Ok(())
        }
        SCHEMA_VERSION => Ok(()),
        other => Err(PassVaultError::StorageUnavailable(format!(
            "unsupported schema version {other} (this build supports up to {SCHEMA_VERSION})"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn db_path(dir: &TempDir) -> std::path::PathBuf {
        dir.path().join("passvault.db")
    }

    #[tokio::test]
    async fn open_creates_database_file() {
        let dir = TempDir::new().unwrap();
        let _db = Database::open(&db_path(&dir)).await.unwrap();
        assert!(db_path(&dir).exists());
    }

    #[tokio::test]
    async fn open_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("data").join("passvault.db");
        let _db = Database::open(&nested).await.unwrap();
        assert!(nested.exists());
    }

    #[tokio::test]
    async fn key_record_roundtrip() {
        let dir = TempDir::new().unwrap();
        let db = Database::open(&db_path(&dir)).await.unwrap();

        assert!(db.get_key_record().await.unwrap().is_none());

        db.put_key_record(&[7u8; 32]).await.unwrap();
        let stored = db.get_key_record().await.unwrap().unwrap();
        assert_eq!(stored, vec![7u8; 32]);
    }

    #[tokio::test]
    async fn key_record_is_never_overwritten() {
        let dir = TempDir::new().unwrap();
        let db = Database::open(&db_path(&dir)).await.unwrap();

        db.put_key_record(&[1u8; 32]).await.unwrap();
        let err = db.put_key_record(&[2u8; 32]).await.unwrap_err();
        assert!(matches!(err, PassVaultError::StorageWriteFailed(_)));

        let stored = db.get_key_record().await.unwrap().unwrap();
        assert_eq!(stored, vec![1u8; 32]);
    }

    #[tokio::test]
    async fn insert_assigns_monotonic_ids() {
        let dir = TempDir::new().unwrap();
        let db = Database::open(&db_path(&dir)).await.unwrap();

        let first = db
            .insert_password("a.com", "alice", &[0u8; 12], b"ct-a")
            .await
            .unwrap();
        let second = db
            .insert_password("b.com", "bob", &[1u8; 12], b"ct-b")
            .await
            .unwrap();
        assert!(second > first);

        // Ids are not reused after a delete.
        db.delete_password(second).await.unwrap();
        let third = db
            .insert_password("c.com", "carol", &[2u8; 12], b"ct-c")
            .await
            .unwrap();
        assert!(third > second);
    }

    #[tokio::test]
    async fn list_returns_insertion_order() {
        let dir = TempDir::new().unwrap();
        let db = Database::open(&db_path(&dir)).await.unwrap();

        db.insert_password("first.com", "u1", &[0u8; 12], b"c1")
            .await
            .unwrap();
        db.insert_password("second.com", "u2", &[1u8; 12], b"c2")
            .await
            .unwrap();

        let entries = db.list_passwords().await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].website, "first.com");
        assert_eq!(entries[1].website, "second.com");
        assert_eq!(entries[0].iv, vec![0u8; 12]);
        assert_eq!(entries[0].ciphertext, b"c1".to_vec());
    }

    #[tokio::test]
    async fn delete_missing_id_is_noop() {
        let dir = TempDir::new().unwrap();
        let db = Database::open(&db_path(&dir)).await.unwrap();

        db.delete_password(999).await.unwrap();
        assert!(db.list_passwords().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reopen_preserves_data() {
        let dir = TempDir::new().unwrap();

        {
            let db = Database::open(&db_path(&dir)).await.unwrap();
            db.insert_password("example.com", "alice", &[3u8; 12], b"ct")
                .await
                .unwrap();
        }

        let db = Database::open(&db_path(&dir)).await.unwrap();
        let entries = db.list_passwords().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].username, "alice");
    }

    #[tokio::test]
    async fn newer_schema_version_is_refused() {
        let dir = TempDir::new().unwrap();
        let path = db_path(&dir);

        {
            let conn = Connection::open(&path).unwrap();
            conn.pragma_update(None, "user_version", 99).unwrap();
        }

        // Matching the whole result avoids needing Debug on Database.
        assert!(matches!(
            Database::open(&path).await,
            Err(PassVaultError::StorageUnavailable(_))
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn database_has_restrictive_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let _db = Database::open(&db_path(&dir)).await.unwrap();

        let perms = std::fs::metadata(db_path(&dir)).unwrap().permissions();
        assert_eq!(
            perms.mode() & 0o777,
            0o600,
            "passvault.db should have 0o600 permissions"
        );
    }
}
