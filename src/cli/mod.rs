//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{PassVaultError, Result};
use crate::generator::CharacterClasses;

/// PassVault CLI: encrypted password manager.
#[derive(Parser)]
#[command(
    name = "passvault",
    about = "Local-first encrypted password manager",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory for the credential and audit databases
    /// (default: .passvault, or `data_dir` from .passvault.toml)
    #[arg(long, global = true, env = "PASSVAULT_DATA_DIR")]
    pub data_dir: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Initialize credential storage and the master key
    Init,

    /// Store a new credential
    Add {
        /// Website the credential belongs to (e.g. example.com)
        website: String,
        /// Username at that website
        username: String,
        /// Password value (omit for interactive prompt or piped stdin)
        #[arg(long)]
        password: Option<String>,
        /// Generate the password instead of prompting
        #[arg(short, long)]
        generate: bool,
        #[command(flatten)]
        generator: GeneratorArgs,
    },

    /// List stored credentials (passwords stay encrypted)
    List,

    /// Decrypt and print one credential's password
    Reveal {
        /// Credential id (see `passvault list`)
        id: i64,
        /// Copy to the clipboard instead of printing
        #[arg(short, long)]
        copy: bool,
    },

    /// Remove a credential
    Remove {
        /// Credential id (see `passvault list`)
        id: i64,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Generate a random password
    Generate {
        #[command(flatten)]
        generator: GeneratorArgs,
        /// Copy to the clipboard instead of printing
        #[arg(short, long)]
        copy: bool,
    },

    /// View the audit log of credential operations
    Audit {
        /// Number of entries to show (default: 50)
        #[arg(long, default_value = "50")]
        last: usize,
        /// Show entries since a duration ago (e.g. 7d, 24h, 30m)
        #[arg(long)]
        since: Option<String>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

/// Password generator options shared by `add --generate` and `generate`.
///
/// When no class flag is passed, the defaults from `.passvault.toml`
/// apply (all classes enabled out of the box).  Passing any class flag
/// selects exactly the flagged classes.
#[derive(clap::Args)]
pub struct GeneratorArgs {
    /// Password length (default from settings: 16)
    #[arg(long)]
    pub length: Option<usize>,

    /// Include uppercase letters
    #[arg(long)]
    pub uppercase: bool,

    /// Include lowercase letters
    #[arg(long)]
    pub lowercase: bool,

    /// Include digits
    #[arg(long)]
    pub digits: bool,

    /// Include symbols
    #[arg(long)]
    pub symbols: bool,
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolve the data directory from the CLI arguments.
///
/// `--data-dir` (or `PASSVAULT_DATA_DIR`) wins; otherwise the value
/// from `.passvault.toml` applies, which itself defaults to
/// `.passvault`.
pub fn data_dir(cli: &Cli) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    match &cli.data_dir {
        Some(dir) => Ok(cwd.join(dir)),
        None => {
            let settings = Settings::load(&cwd)?;
            Ok(cwd.join(&settings.data_dir))
        }
    }
}

/// Build the full path to the credential database from the CLI arguments.
///
/// Example: `<cwd>/.passvault/passvault.db`
pub fn db_path(cli: &Cli) -> Result<PathBuf> {
    Ok(data_dir(cli)?.join(Settings::DB_FILE_NAME))
}

/// Prompt for a password with hidden input.
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_hidden(prompt: &str) -> Result<Zeroizing<String>> {
    let pw = dialoguer::Password::new()
        .with_prompt(prompt)
        .with_confirmation("Confirm password", "Passwords do not match, try again")
        .interact()
        .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Combine generator flags with the settings defaults.
///
/// The length flag overrides the configured length; any class flag
/// switches to explicit class selection, otherwise the configured
/// classes apply.
pub fn resolve_generator(args: &GeneratorArgs, settings: &Settings) -> (usize, CharacterClasses) {
    let length = args.length.unwrap_or(settings.generator_length);

    let any_flag = args.uppercase || args.lowercase || args.digits || args.symbols;
    let classes = if any_flag {
        CharacterClasses {
            uppercase: args.uppercase,
            lowercase: args.lowercase,
            digits: args.digits,
            symbols: args.symbols,
        }
    } else {
        settings.generator_classes()
    };

    (length, classes)
}

/// Copy `text` to the system clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new()
        .map_err(|e| PassVaultError::CommandFailed(format!("clipboard unavailable: {e}")))?;
    clipboard
        .set_text(text.to_string())
        .map_err(|e| PassVaultError::CommandFailed(format!("clipboard copy: {e}")))?;
    Ok(())
}
