//! `passvault reveal` — decrypt and print one credential's password.

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{copy_to_clipboard, db_path, Cli};
use crate::errors::{PassVaultError, Result};
use crate::store::CredentialStore;

/// Execute the `reveal` command.
pub async fn execute(cli: &Cli, id: i64, copy: bool) -> Result<()> {
    let path = db_path(cli)?;
    let store = CredentialStore::open(&path).await?;

    let entries = store.list_credentials().await?;
    let entry = entries
        .iter()
        .find(|e| e.id == id)
        .ok_or(PassVaultError::CredentialNotFound(id))?;

    // A decryption failure here is final — retrying with the same key
    // and ciphertext cannot succeed.
    let password = Zeroizing::new(store.reveal_password(entry)?);

    crate::audit::log_audit(cli, "reveal", Some(&entry.website), Some(&format!("id={id}")));

    if copy {
        copy_to_clipboard(&password)?;
        output::success(&format!(
            "Password for '{}' copied to the clipboard",
            entry.website
        ));
    } else {
        // Print to stdout so the value can be piped.
        println!("{}", password.as_str());
    }

    Ok(())
}
