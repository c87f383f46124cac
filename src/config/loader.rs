//! Config struct and loading logic.
//!
//! Priority (highest to lowest):
//! 1. Environment variables
//! 2. `.diffscribe.toml` in the working directory
//! 3. `<config dir>/diffscribe/config.toml` (global, written by `config`)
//! 4. Built-in defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants;
use crate::env::Env;

/// Errors during config loading, resolution and persistence.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "no API key configured. Set {} (or {}) or run `{} config --api-key <KEY>`",
        constants::ENV_API_KEY,
        constants::ENV_OPENAI_API_KEY,
        constants::APP_NAME
    )]
    MissingApiKey,

    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to write config file {path}: {source}")]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("could not determine the user config directory")]
    NoConfigDir,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub provider: ProviderConfig,
    pub review: ReviewConfig,
    pub message: MessageConfig,
}

/// Credential and model settings for the generation backend.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    #[serde(alias = "apiKey", skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(alias = "baseUrl", skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Settings for the chunked `review` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Natural language the review and summary are written in.
    pub language: String,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            chunk_size: constants::REVIEW_CHUNK_SIZE,
            chunk_overlap: constants::REVIEW_CHUNK_OVERLAP,
            temperature: constants::DEFAULT_TEMPERATURE,
            max_tokens: constants::REVIEW_MAX_TOKENS,
            language: constants::REVIEW_LANGUAGE.to_string(),
        }
    }
}

/// Settings for the single-shot `message` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            chunk_size: constants::MESSAGE_CHUNK_SIZE,
            chunk_overlap: constants::MESSAGE_CHUNK_OVERLAP,
            temperature: constants::DEFAULT_TEMPERATURE,
            max_tokens: constants::MESSAGE_MAX_TOKENS,
        }
    }
}

/// Credentials after layering, ready to hand to a backend.
#[derive(Clone, PartialEq)]
pub struct ResolvedCredentials {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl std::fmt::Debug for ResolvedCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedCredentials")
            .field("api_key", &mask_key(&self.api_key))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Locations the loader reads from. `None` skips that layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    pub global: Option<PathBuf>,
    pub local: Option<PathBuf>,
}

impl ConfigPaths {
    /// The standard global file plus a `.diffscribe.toml` under `cwd`.
    pub fn discover(cwd: &Path) -> Self {
        Self {
            global: global_config_path(),
            local: Some(cwd.join(constants::CONFIG_FILENAME)),
        }
    }
}

/// Get the global config file path.
pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| {
        d.join(constants::CONFIG_DIR)
            .join(constants::GLOBAL_CONFIG_FILENAME)
    })
}

impl Config {
    /// Load configuration with layering: global file, local file, then env.
    pub fn load(paths: &ConfigPaths, env: &Env) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        for path in [&paths.global, &paths.local].into_iter().flatten() {
            if path.exists() {
                let layer = Self::load_file(path)?;
                config.merge(layer);
            }
        }

        config.apply_env_vars(env);
        Ok(config)
    }

    /// Load a config from a specific file.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Merge another config into this one. Values in `other` win when set
    /// or when they differ from the built-in default.
    fn merge(&mut self, other: Config) {
        if other.provider.api_key.is_some() {
            self.provider.api_key = other.provider.api_key;
        }
        if other.provider.model.is_some() {
            self.provider.model = other.provider.model;
        }
        if other.provider.base_url.is_some() {
            self.provider.base_url = other.provider.base_url;
        }

        let review = ReviewConfig::default();
        if other.review.chunk_size != review.chunk_size {
            self.review.chunk_size = other.review.chunk_size;
        }
        if other.review.chunk_overlap != review.chunk_overlap {
            self.review.chunk_overlap = other.review.chunk_overlap;
        }
        if other.review.temperature != review.temperature {
            self.review.temperature = other.review.temperature;
        }
        if other.review.max_tokens != review.max_tokens {
            self.review.max_tokens = other.review.max_tokens;
        }
        if other.review.language != review.language {
            self.review.language = other.review.language;
        }

        let message = MessageConfig::default();
        if other.message.chunk_size != message.chunk_size {
            self.message.chunk_size = other.message.chunk_size;
        }
        if other.message.chunk_overlap != message.chunk_overlap {
            self.message.chunk_overlap = other.message.chunk_overlap;
        }
        if other.message.temperature != message.temperature {
            self.message.temperature = other.message.temperature;
        }
        if other.message.max_tokens != message.max_tokens {
            self.message.max_tokens = other.message.max_tokens;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_vars(&mut self, env: &Env) {
        if let Some(key) = env.first_of(&[constants::ENV_API_KEY, constants::ENV_OPENAI_API_KEY]) {
            self.provider.api_key = Some(key);
        }
        if let Some(model) = env.var(constants::ENV_MODEL) {
            self.provider.model = Some(model);
        }
        if let Some(url) = env.var(constants::ENV_BASE_URL) {
            self.provider.base_url = Some(url);
        }
    }

    /// Resolve the credential and model, failing when no key is available.
    pub fn resolve(&self) -> Result<ResolvedCredentials, ConfigError> {
        let api_key = non_blank(self.provider.api_key.as_deref()).ok_or(ConfigError::MissingApiKey)?;
        let model = non_blank(self.provider.model.as_deref())
            .unwrap_or(constants::DEFAULT_MODEL)
            .to_string();
        let base_url = non_blank(self.provider.base_url.as_deref())
            .unwrap_or(constants::DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        Ok(ResolvedCredentials {
            api_key: api_key.to_string(),
            model,
            base_url,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Persist credentials into the config file at `path`.
///
/// Fields passed as `None` keep their stored value; other sections of
/// the file survive the rewrite. Returns the provider section as written.
pub fn save_credentials(
    path: &Path,
    api_key: Option<String>,
    model: Option<String>,
) -> Result<ProviderConfig, ConfigError> {
    let mut stored = if path.exists() {
        Config::load_file(path)?
    } else {
        Config::default()
    };

    if let Some(key) = api_key {
        stored.provider.api_key = Some(key);
    }
    if let Some(model) = model {
        stored.provider.model = Some(model);
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::WriteFile {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    let content = toml::to_string_pretty(&stored)?;
    std::fs::write(path, content).map_err(|e| ConfigError::WriteFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(stored.provider)
}

/// Mask an API key for display, keeping a short prefix and suffix.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 10 {
        return "****".to_string();
    }
    let head: String = chars[..3].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn default_config() {
        let config = Config::default();
        assert!(config.provider.api_key.is_none());
        assert_eq!(config.review.chunk_size, 4000);
        assert_eq!(config.review.chunk_overlap, 500);
        assert_eq!(config.message.chunk_size, 3000);
        assert_eq!(config.message.chunk_overlap, 400);
        assert_eq!(config.message.max_tokens, 500);
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
[provider]
api_key = "sk-file"
model = "gpt-4o"

[review]
chunk_size = 2000
language = "Traditional Chinese"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.provider.api_key.as_deref(), Some("sk-file"));
        assert_eq!(config.provider.model.as_deref(), Some("gpt-4o"));
        assert_eq!(config.review.chunk_size, 2000);
        assert_eq!(config.review.chunk_overlap, 500);
        assert_eq!(config.review.language, "Traditional Chinese");
    }

    #[test]
    fn camel_case_api_key_is_accepted() {
        let config: Config = toml::from_str("[provider]\napiKey = \"sk-camel\"\n").unwrap();
        assert_eq!(config.provider.api_key.as_deref(), Some("sk-camel"));
    }

    #[test]
    fn local_file_overrides_global() {
        let dir = tempfile::tempdir().unwrap();
        let global = write(
            dir.path(),
            "global.toml",
            "[provider]\napi_key = \"sk-global\"\nmodel = \"gpt-4o\"\n",
        );
        let local = write(dir.path(), "local.toml", "[provider]\nmodel = \"gpt-4.1\"\n");
        let paths = ConfigPaths {
            global: Some(global),
            local: Some(local),
        };

        let config = Config::load(&paths, &Env::empty()).unwrap();
        assert_eq!(config.provider.api_key.as_deref(), Some("sk-global"));
        assert_eq!(config.provider.model.as_deref(), Some("gpt-4.1"));
    }

    #[test]
    fn env_key_overrides_file_key() {
        let dir = tempfile::tempdir().unwrap();
        let global = write(dir.path(), "config.toml", "[provider]\napi_key = \"sk-file\"\n");
        let paths = ConfigPaths {
            global: Some(global),
            local: None,
        };
        let env = Env::mock([("OPENAI_API_KEY", "sk-env")]);

        let resolved = Config::load(&paths, &env).unwrap().resolve().unwrap();
        assert_eq!(resolved.api_key, "sk-env");
    }

    #[test]
    fn diffscribe_key_takes_precedence_over_openai_key() {
        let env = Env::mock([("OPENAI_API_KEY", "sk-openai"), ("DIFFSCRIBE_API_KEY", "sk-own")]);
        let resolved = Config::load(&ConfigPaths::default(), &env)
            .unwrap()
            .resolve()
            .unwrap();
        assert_eq!(resolved.api_key, "sk-own");
    }

    #[test]
    fn resolve_defaults_model_and_base_url() {
        let env = Env::mock([("DIFFSCRIBE_API_KEY", "sk-test")]);
        let resolved = Config::load(&ConfigPaths::default(), &env)
            .unwrap()
            .resolve()
            .unwrap();
        assert_eq!(resolved.model, "gpt-4o-mini");
        assert_eq!(resolved.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn resolve_env_model_and_trims_base_url() {
        let env = Env::mock([
            ("DIFFSCRIBE_API_KEY", "sk-test"),
            ("DIFFSCRIBE_MODEL", "gpt-4.1-mini"),
            ("DIFFSCRIBE_BASE_URL", "http://localhost:11434/v1/"),
        ]);
        let resolved = Config::load(&ConfigPaths::default(), &env)
            .unwrap()
            .resolve()
            .unwrap();
        assert_eq!(resolved.model, "gpt-4.1-mini");
        assert_eq!(resolved.base_url, "http://localhost:11434/v1");
    }

    #[test]
    fn resolve_without_key_fails() {
        let config = Config::load(&ConfigPaths::default(), &Env::empty()).unwrap();
        let err = config.resolve().unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
        assert!(err.to_string().contains("DIFFSCRIBE_API_KEY"));
    }

    #[test]
    fn blank_key_in_file_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let global = write(dir.path(), "config.toml", "[provider]\napi_key = \"  \"\n");
        let paths = ConfigPaths {
            global: Some(global),
            local: None,
        };
        let config = Config::load(&paths, &Env::empty()).unwrap();
        assert!(matches!(config.resolve(), Err(ConfigError::MissingApiKey)));
    }

    #[test]
    fn missing_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ConfigPaths::discover(dir.path());
        let config = Config::load(
            &ConfigPaths {
                global: None,
                local: paths.local,
            },
            &Env::empty(),
        )
        .unwrap();
        assert_eq!(config.review, ReviewConfig::default());
    }

    #[test]
    fn load_file_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "bad.toml", "not valid {{ toml");
        let err = Config::load_file(&path).unwrap_err();
        assert!(err.to_string().contains("parse"));
    }

    #[test]
    fn save_credentials_creates_and_updates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        save_credentials(&path, Some("sk-first".into()), None).unwrap();
        let provider = save_credentials(&path, None, Some("gpt-4o".into())).unwrap();

        assert_eq!(provider.api_key.as_deref(), Some("sk-first"));
        assert_eq!(provider.model.as_deref(), Some("gpt-4o"));

        let reloaded = Config::load_file(&path).unwrap();
        assert_eq!(reloaded.provider, provider);
    }

    #[test]
    fn save_credentials_keeps_other_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "config.toml", "[review]\nlanguage = \"German\"\n");

        save_credentials(&path, Some("sk-new".into()), None).unwrap();

        let reloaded = Config::load_file(&path).unwrap();
        assert_eq!(reloaded.review.language, "German");
        assert_eq!(reloaded.provider.api_key.as_deref(), Some("sk-new"));
    }

    #[test]
    fn debug_output_redacts_key() {
        let provider = ProviderConfig {
            api_key: Some("sk-very-secret-value".into()),
            model: None,
            base_url: None,
        };
        let debug = format!("{provider:?}");
        assert!(!debug.contains("sk-very-secret-value"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn mask_key_hides_middle() {
        assert_eq!(mask_key("sk-abcdefghijklmnop"), "sk-...mnop");
        assert_eq!(mask_key("short"), "****");
    }
}
