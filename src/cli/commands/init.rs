//! `passvault init` — create credential storage and the master key.

use crate::cli::output;
use crate::cli::{db_path, Cli};
use crate::errors::Result;
use crate::store::CredentialStore;

/// Execute the `init` command.
pub async fn execute(cli: &Cli) -> Result<()> {
    let path = db_path(cli)?;
    let already_initialized = path.exists();

    // Opening the store creates the data directory, the schema, and
    // the master key on first use; existing storage is left untouched.
    let _store = CredentialStore::open(&path).await?;

    if already_initialized {
        output::info(&format!(
            "Credential storage already initialized at {}",
            path.display()
        ));
        output::tip("Run `passvault add <WEBSITE> <USERNAME>` to store a credential.");
        return Ok(());
    }

    crate::audit::log_audit(cli, "init", None, Some("storage created"));

    output::success(&format!(
        "Credential storage initialized at {}",
        path.display()
    ));
    output::tip("Run `passvault add <WEBSITE> <USERNAME>` to store a credential.");
    output::tip("Run `passvault generate` to create a strong password.");
    output::tip("Run `passvault list` to see stored credentials.");

    Ok(())
}
