//! Configuration loaded from `.pocketvault.toml`.

pub mod settings;

pub use settings::Settings;
