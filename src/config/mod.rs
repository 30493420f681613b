//! Configuration — `.passvault.toml` project settings.

pub mod settings;

pub use settings::Settings;
