//! Integration tests for the PassVault credential store.
//!
//! These tests exercise the full path from plaintext to SQLite and
//! back: validation, master-key management, encryption, persistence.

use passvault::errors::PassVaultError;
use passvault::store::CredentialStore;
use tempfile::TempDir;

/// Helper: a fresh database path inside its own temp dir.
fn store_path() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("passvault.db");
    (dir, path)
}

// ---------------------------------------------------------------------------
// Full credential lifecycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_list_reveal_remove_lifecycle() {
    let (_dir, path) = store_path();
    let store = CredentialStore::open(&path).await.expect("open store");

    // Add one credential.
    let id = store
        .add_credential("example.com", "alice", "Sw0rd!")
        .await
        .expect("add credential");

    // List shows exactly that entry, with only ciphertext at rest.
    let entries = store.list_credentials().await.expect("list");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, id);
    assert_eq!(entries[0].website, "example.com");
    assert_eq!(entries[0].username, "alice");
    assert_ne!(
        entries[0].ciphertext,
        b"Sw0rd!".to_vec(),
        "the stored ciphertext must not equal the plaintext"
    );

    // Reveal decrypts back to the original password.
    let revealed = store.reveal_password(&entries[0]).expect("reveal");
    assert_eq!(revealed, "Sw0rd!");

    // Remove leaves the store empty.
    store.remove_credential(id).await.expect("remove");
    assert!(store.list_credentials().await.expect("list").is_empty());
}

#[tokio::test]
async fn entries_list_in_insertion_order() {
    let (_dir, path) = store_path();
    let store = CredentialStore::open(&path).await.unwrap();

    store.add_credential("one.com", "u1", "p1").await.unwrap();
    store.add_credential("two.com", "u2", "p2").await.unwrap();
    store.add_credential("three.com", "u3", "p3").await.unwrap();

    let entries = store.list_credentials().await.unwrap();
    let websites: Vec<&str> = entries.iter().map(|e| e.website.as_str()).collect();
    assert_eq!(websites, ["one.com", "two.com", "three.com"]);
}

#[tokio::test]
async fn remove_missing_id_is_noop() {
    let (_dir, path) = store_path();
    let store = CredentialStore::open(&path).await.unwrap();

    store.add_credential("keep.com", "u", "p").await.unwrap();
    store.remove_credential(12345).await.expect("noop remove");

    assert_eq!(store.list_credentials().await.unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Master key is stable across sessions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn reopened_store_decrypts_old_entries() {
    let (_dir, path) = store_path();

    {
        let store = CredentialStore::open(&path).await.expect("first open");
        store
            .add_credential("example.com", "alice", "persisted-pw")
            .await
            .expect("add");
    }

    // A second open must load the same master key, not mint a new one.
    let store = CredentialStore::open(&path).await.expect("second open");
    let entries = store.list_credentials().await.expect("list");
    assert_eq!(entries.len(), 1);

    let revealed = store.reveal_password(&entries[0]).expect("reveal");
    assert_eq!(revealed, "persisted-pw");
}

// ---------------------------------------------------------------------------
// Concurrent adds
// ---------------------------------------------------------------------------

#[tokio::test]
async fn concurrent_adds_both_land() {
    let (_dir, path) = store_path();
    let store = CredentialStore::open(&path).await.unwrap();

    let (a, b) = tokio::join!(
        store.add_credential("a.com", "alice", "pw-a"),
        store.add_credential("b.com", "bob", "pw-b"),
    );

    let id_a = a.expect("first add");
    let id_b = b.expect("second add");
    assert_ne!(id_a, id_b, "concurrent adds must get distinct ids");

    let entries = store.list_credentials().await.unwrap();
    assert_eq!(entries.len(), 2);
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_fields_are_all_reported() {
    let (_dir, path) = store_path();
    let store = CredentialStore::open(&path).await.unwrap();

    let err = store
        .add_credential("", "alice", "")
        .await
        .expect_err("empty fields must be rejected");

    match err {
        PassVaultError::ValidationFailed(fields) => {
            let names: Vec<&str> = fields.iter().map(|f| f.field).collect();
            assert_eq!(names, ["website", "password"]);
        }
        other => panic!("expected ValidationFailed, got {other:?}"),
    }

    // Nothing was written.
    assert!(store.list_credentials().await.unwrap().is_empty());
}

#[tokio::test]
async fn rejected_add_reports_every_empty_field() {
    let (_dir, path) = store_path();
    let store = CredentialStore::open(&path).await.unwrap();

    let err = store.add_credential("", "", "").await.unwrap_err();
    match err {
        PassVaultError::ValidationFailed(fields) => assert_eq!(fields.len(), 3),
        other => panic!("expected ValidationFailed, got {other:?}"),
    }
}
