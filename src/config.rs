//! Console Configuration
//!
//! Where the backend lives, where the session is kept between runs, how
//! often the dashboard refreshes and how the console logs. Read from a TOML
//! file; `SITE_ADMIN_*` environment variables win over the file.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default REST API base URL
pub const DEFAULT_API_URL: &str = "https://backend-landingpage-zs9q.onrender.com/api";

/// Everything the console reads at startup
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// REST backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Local persistence configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("site-admin").to_string_lossy().to_string())
        .unwrap_or_else(|| "./site-admin-data".to_string())
}

impl StorageConfig {
    /// Data directory with a leading `~/` expanded
    pub fn data_dir(&self) -> PathBuf {
        match (self.data_dir.strip_prefix("~/"), dirs::home_dir()) {
            (Some(rest), Some(home)) => home.join(rest),
            _ => PathBuf::from(&self.data_dir),
        }
    }

    /// File holding the session token and theme preference
    pub fn storage_file(&self) -> PathBuf {
        self.data_dir().join("storage.json")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Dashboard refresh configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_ms: u64,
}

fn default_refresh_interval() -> u64 {
    5123
}

impl DashboardConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms.max(1))
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            refresh_interval_ms: default_refresh_interval(),
        }
    }
}

/// Log verbosity and output shape (`pretty` or `json`)
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Parse `path` as-is, without environment overrides
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Defaults plus `SITE_ADMIN_*` variables
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Parse `path`, then let the environment override it
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// First config file found in the usual places, else the environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("site-admin").join("config.toml")),
            Some(PathBuf::from("./site-admin.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("SITE_ADMIN_API_URL") {
            self.api.base_url = url;
        }

        if let Some(data_dir) = lookup("SITE_ADMIN_DATA_DIR") {
            self.storage.data_dir = data_dir;
        }

        if let Some(interval) = lookup("SITE_ADMIN_REFRESH_MS") {
            match interval.parse() {
                Ok(ms) => self.dashboard.refresh_interval_ms = ms,
                Err(_) => tracing::warn!("Ignoring invalid SITE_ADMIN_REFRESH_MS: {}", interval),
            }
        }

        if let Some(level) = lookup("SITE_ADMIN_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("SITE_ADMIN_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Reading or parsing a config file failed
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Commented TOML written by `site-admin config`
pub fn generate_default_config() -> String {
    format!(
        r#"# Site Admin Configuration
#
# Environment variables override these settings:
# - SITE_ADMIN_API_URL
# - SITE_ADMIN_DATA_DIR
# - SITE_ADMIN_REFRESH_MS
# - SITE_ADMIN_LOG_LEVEL
# - SITE_ADMIN_LOG_FORMAT

[api]
# REST backend base URL (paths such as /reviews are appended)
base_url = "{}"

# Request timeout in seconds
request_timeout_secs = 30

[storage]
# Directory holding storage.json (session token, theme)
data_dir = "~/.local/share/site-admin"

[dashboard]
# How often `dashboard --watch` refreshes the counts (ms)
refresh_interval_ms = 5123

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for terminals) or json (for log collectors)
format = "pretty"
"#,
        DEFAULT_API_URL
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, DEFAULT_API_URL);
        assert_eq!(config.dashboard.refresh_interval(), Duration::from_millis(5123));
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api]\nbase_url = \"http://localhost:5000/api\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:5000/api");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.dashboard.refresh_interval_ms, 5123);
    }

    #[test]
    fn test_generated_default_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.api.base_url, DEFAULT_API_URL);
        assert_eq!(config.storage.data_dir, "~/.local/share/site-admin");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_parse_error_names_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[api\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("SITE_ADMIN_API_URL", "http://127.0.0.1:9000/api"),
            ("SITE_ADMIN_DATA_DIR", "/tmp/site-admin"),
            ("SITE_ADMIN_REFRESH_MS", "250"),
            ("SITE_ADMIN_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "http://127.0.0.1:9000/api");
        assert_eq!(
            config.storage.storage_file(),
            PathBuf::from("/tmp/site-admin/storage.json")
        );
        assert_eq!(config.dashboard.refresh_interval_ms, 250);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_home_relative_data_dir() {
        let config = StorageConfig {
            data_dir: "~/.local/share/site-admin".to_string(),
        };
        if let Some(home) = dirs::home_dir() {
            assert_eq!(
                config.storage_file(),
                home.join(".local/share/site-admin/storage.json")
            );
        }
    }

    #[test]
    fn test_invalid_refresh_override_is_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|name| {
            (name == "SITE_ADMIN_REFRESH_MS").then(|| "soon".to_string())
        });
        assert_eq!(config.dashboard.refresh_interval_ms, 5123);
    }
}
