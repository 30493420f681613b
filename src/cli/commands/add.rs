//! `passvault add` — encrypt and store a new credential.

use std::io::{self, IsTerminal, Read};

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{db_path, prompt_hidden, resolve_generator, Cli, GeneratorArgs};
use crate::config::Settings;
use crate::errors::Result;
use crate::generator;
use crate::store::CredentialStore;

/// Execute the `add` command.
pub async fn execute(
    cli: &Cli,
    website: &str,
    username: &str,
    password: Option<&str>,
    generate: bool,
    gen_args: &GeneratorArgs,
) -> Result<()> {
    // Determine the password from one of four sources.
    let (password_value, generated) = if let Some(p) = password {
        // Source 1: Inline value on the command line.
        output::warning("Password provided on command line — it may appear in shell history.");
        (Zeroizing::new(p.to_string()), false)
    } else if generate {
        // Source 2: Freshly generated.
        let cwd = std::env::current_dir()?;
        let settings = Settings::load(&cwd)?;
        let (length, classes) = resolve_generator(gen_args, &settings);
        (Zeroizing::new(generator::generate(length, classes)?), true)
    } else if !io::stdin().is_terminal() {
        // Source 3: Piped input (stdin is not a terminal).
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        (Zeroizing::new(buf.trim_end().to_string()), false)
    } else {
        // Source 4: Interactive secure prompt (default).
        let prompt = format!("Enter password for {website}");
        (prompt_hidden(&prompt)?, false)
    };

    let path = db_path(cli)?;
    let store = CredentialStore::open(&path).await?;
    let id = store
        .add_credential(website, username, &password_value)
        .await?;

    crate::audit::log_audit(cli, "add", Some(website), Some(&format!("id={id}")));

    output::success(&format!("Credential for '{website}' stored (id {id})"));
    if generated {
        // Show the generated password once so it can be saved elsewhere.
        println!("{}", password_value.as_str());
    }
    output::tip(&format!("Run `passvault reveal {id}` to print the password."));

    Ok(())
}
