//! App-wide constants.
//!
//! Centralises the tool name, config paths, environment variable names,
//! and generation defaults so a rename only requires changing this file.

/// Display name of the tool (lowercase).
pub const APP_NAME: &str = "diffscribe";

/// CLI version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Local config filename (e.g. `.diffscribe.toml` in the working directory).
pub const CONFIG_FILENAME: &str = ".diffscribe.toml";

/// Directory name under the platform config dir for the global config.
pub const CONFIG_DIR: &str = "diffscribe";

/// Filename of the global config inside [`CONFIG_DIR`].
pub const GLOBAL_CONFIG_FILENAME: &str = "config.toml";

/// Model used when neither config nor environment names one.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default OpenAI-compatible API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

// ── Environment variable names ──────────────────────────────────────

pub const ENV_API_KEY: &str = "DIFFSCRIBE_API_KEY";
/// Fallback key variable, checked after [`ENV_API_KEY`].
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_MODEL: &str = "DIFFSCRIBE_MODEL";
pub const ENV_BASE_URL: &str = "DIFFSCRIBE_BASE_URL";
pub const ENV_LOG: &str = "DIFFSCRIBE_LOG";

// ── Review defaults ─────────────────────────────────────────────────

pub const REVIEW_CONTEXT_LINES: u32 = 10;
pub const REVIEW_CHUNK_SIZE: usize = 4000;
pub const REVIEW_CHUNK_OVERLAP: usize = 500;
pub const REVIEW_MAX_TOKENS: u32 = 4000;
pub const REVIEW_LANGUAGE: &str = "English";

// ── Commit message defaults ─────────────────────────────────────────

pub const MESSAGE_CONTEXT_LINES: u32 = 3;
pub const MESSAGE_CHUNK_SIZE: usize = 3000;
pub const MESSAGE_CHUNK_OVERLAP: usize = 400;
pub const MESSAGE_MAX_TOKENS: u32 = 500;

/// Sampling temperature for review, summary and message calls.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Sampling temperature and output cap for the `--explain` intent call.
pub const EXPLAIN_TEMPERATURE: f32 = 0.3;
pub const EXPLAIN_MAX_TOKENS: u32 = 100;
