//! Configuration loading, credential resolution and persistence.
//!
//! Handles the global and local `config.toml` layers, environment
//! variable overrides, and the fail-fast API key check.

pub mod loader;

pub use loader::{
    Config, ConfigError, ConfigPaths, MessageConfig, ProviderConfig, ResolvedCredentials,
    ReviewConfig, global_config_path, mask_key, save_credentials,
};
