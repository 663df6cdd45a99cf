use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Default Generative Language REST endpoint (model name is appended).
pub const DEFAULT_ADVISOR_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct GardenConfig {
    pub logging: LoggingConfig,
    pub storage: StorageConfig,
    pub advisor: AdvisorConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AdvisorConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let db_path = default_garden_dir()
            .join("garden.db")
            .to_string_lossy()
            .into_owned();
        Self { db_path }
    }
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.5-flash".into(),
            base_url: DEFAULT_ADVISOR_BASE_URL.into(),
        }
    }
}

impl AdvisorConfig {
    /// The configured credential, if one is present and non-blank.
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

/// Returns `~/.lifegarden/`, or `./.lifegarden/` when no home directory is known.
pub fn default_garden_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".lifegarden")
}

/// Returns the default config file path: `~/.lifegarden/config.toml`
pub fn default_config_path() -> PathBuf {
    default_garden_dir().join("config.toml")
}

impl GardenConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            GardenConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides (LIFEGARDEN_DB, LIFEGARDEN_LOG_LEVEL,
    /// GEMINI_API_KEY, falling back to API_KEY).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("LIFEGARDEN_DB") {
            self.storage.db_path = val;
        }
        if let Ok(val) = std::env::var("LIFEGARDEN_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = std::env::var("GEMINI_API_KEY").or_else(|_| std::env::var("API_KEY")) {
            self.advisor.api_key = Some(val);
        }
    }

    /// Resolve the database path, expanding `~` if needed.
    pub fn resolved_db_path(&self) -> PathBuf {
        expand_tilde(&self.storage.db_path)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = GardenConfig::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.advisor.model, "gemini-2.5-flash");
        assert_eq!(config.advisor.base_url, DEFAULT_ADVISOR_BASE_URL);
        assert!(config.advisor.api_key.is_none());
        assert!(config.storage.db_path.ends_with("garden.db"));
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
[logging]
level = "debug"

[storage]
db_path = "/tmp/garden-test.db"

[advisor]
api_key = "abc123"
"#;
        let config: GardenConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.storage.db_path, "/tmp/garden-test.db");
        assert_eq!(config.advisor.credential(), Some("abc123"));
        // defaults still apply for unset fields
        assert_eq!(config.advisor.model, "gemini-2.5-flash");
    }

    #[test]
    fn blank_api_key_is_no_credential() {
        let config = AdvisorConfig {
            api_key: Some("   ".into()),
            ..AdvisorConfig::default()
        };
        assert_eq!(config.credential(), None);
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = GardenConfig::default();
        std::env::set_var("LIFEGARDEN_DB", "/tmp/override.db");
        std::env::set_var("LIFEGARDEN_LOG_LEVEL", "trace");
        std::env::set_var("GEMINI_API_KEY", "from-env");

        config.apply_env_overrides();

        assert_eq!(config.storage.db_path, "/tmp/override.db");
        assert_eq!(config.logging.level, "trace");
        assert_eq!(config.advisor.credential(), Some("from-env"));

        // Clean up
        std::env::remove_var("LIFEGARDEN_DB");
        std::env::remove_var("LIFEGARDEN_LOG_LEVEL");
        std::env::remove_var("GEMINI_API_KEY");
    }

    #[test]
    fn tilde_expands_to_home() {
        let expanded = expand_tilde("~/garden.db");
        if dirs::home_dir().is_some() {
            assert!(!expanded.starts_with("~"));
        }
        assert_eq!(expand_tilde("/abs/garden.db"), PathBuf::from("/abs/garden.db"));
    }
}
