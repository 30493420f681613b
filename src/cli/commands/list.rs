//! `passvault list` — display stored credentials in a table.

use crate::cli::output;
use crate::cli::{db_path, Cli};
use crate::errors::Result;
use crate::store::CredentialStore;

/// Execute the `list` command.
pub async fn execute(cli: &Cli) -> Result<()> {
    let path = db_path(cli)?;
    let store = CredentialStore::open(&path).await?;

    let entries = store.list_credentials().await?;

    output::info(&format!("{} credential(s)", entries.len()));
    output::print_credentials_table(&entries);

    Ok(())
}
