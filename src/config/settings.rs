use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{PassVaultError, Result};
use crate::generator::CharacterClasses;

/// Project-level configuration, loaded from `.passvault.toml`.
///
/// Every field has a sensible default so PassVault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory (relative to the working directory) where the
    /// credential and audit databases are stored.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Default length for generated passwords.
    #[serde(default = "default_generator_length")]
    pub generator_length: usize,

    /// Include uppercase letters in generated passwords by default.
    #[serde(default = "default_class_enabled")]
    pub generator_uppercase: bool,

    /// Include lowercase letters in generated passwords by default.
    #[serde(default = "default_class_enabled")]
    pub generator_lowercase: bool,

    /// Include digits in generated passwords by default.
    #[serde(default = "default_class_enabled")]
    pub generator_digits: bool,

    /// Include symbols in generated passwords by default.
    #[serde(default = "default_class_enabled")]
    pub generator_symbols: bool,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_data_dir() -> String {
    ".passvault".to_string()
}

fn default_generator_length() -> usize {
    16
}

fn default_class_enabled() -> bool {
    true
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            generator_length: default_generator_length(),
            generator_uppercase: default_class_enabled(),
            generator_lowercase: default_class_enabled(),
            generator_digits: default_class_enabled(),
            generator_symbols: default_class_enabled(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the working directory.
    const FILE_NAME: &'static str = ".passvault.toml";

    /// File name of the credential database inside the data directory.
    pub const DB_FILE_NAME: &'static str = "passvault.db";

    /// Load settings from `<project_dir>/.passvault.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            PassVaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Build the full path to the credential database.
    ///
    /// Example: `project_dir/.passvault/passvault.db`
    pub fn db_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.data_dir).join(Self::DB_FILE_NAME)
    }

    /// The default character classes for the password generator.
    pub fn generator_classes(&self) -> CharacterClasses {
        CharacterClasses {
            uppercase: self.generator_uppercase,
            lowercase: self.generator_lowercase,
            digits: self.generator_digits,
            symbols: self.generator_symbols,
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────
