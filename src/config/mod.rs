//! Configuration — optional TOML settings with built-in defaults.

pub mod settings;

pub use settings::Settings;
