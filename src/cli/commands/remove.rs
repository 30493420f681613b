//! `passvault remove` — delete a stored credential.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{db_path, Cli};
use crate::errors::{PassVaultError, Result};
use crate::store::CredentialStore;

/// Execute the `remove` command.
pub async fn execute(cli: &Cli, id: i64, force: bool) -> Result<()> {
    let path = db_path(cli)?;
    let store = CredentialStore::open(&path).await?;

    // Look the entry up first so the prompt can say what is removed.
    let entries = store.list_credentials().await?;
    let entry = match entries.iter().find(|e| e.id == id) {
        Some(entry) => entry,
        None => {
            // Removing an absent id is a no-op.
            output::info(&format!("No credential with id {id} — nothing to remove."));
            return Ok(());
        }
    };

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Remove credential for '{}' ({})?",
                entry.website, entry.username
            ))
            .default(false)
            .interact()
            .map_err(|e| PassVaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    store.remove_credential(id).await?;

    crate::audit::log_audit(cli, "remove", Some(&entry.website), Some(&format!("id={id}")));
    output::success(&format!("Removed credential for '{}'", entry.website));

    Ok(())
}
