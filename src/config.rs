use folio_core::SchedulerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Longest accepted auto-save delay. Anything above this is almost certainly
/// a value meant in seconds.
pub const MAX_DEBOUNCE_MS: u64 = 60_000;

/// Where a setting came from, shown by `folio config show`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ConfigSource::Default => "default",
            ConfigSource::File => "file",
            ConfigSource::Environment => "environment",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    fn set(&mut self, value: T, source: ConfigSource) {
        self.value = value;
        self.source = source;
    }
}

/// Remote portfolio store. Both values must be set for it to be used.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreConfig {
    pub server_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl StoreConfig {
    /// Server URL and API key, when both are present and non-blank.
    pub fn remote(&self) -> Option<(&str, &str)> {
        let url = non_blank(&self.server_url)?;
        let key = non_blank(&self.api_key)?;
        Some((url, key))
    }

    pub fn is_configured(&self) -> bool {
        self.remote().is_some()
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Resolved settings for one `folio` invocation.
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Directory holding one `<slug>.json` per portfolio.
    pub data_dir: ConfigValue<PathBuf>,
    /// Quiet period after the last edit before a save starts.
    pub debounce_ms: ConfigValue<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
    pub store: StoreConfig,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    debounce_ms: Option<u64>,
    store: Option<StoreConfig>,
}

impl Config {
    /// Builds the configuration from defaults, then the YAML file (when it
    /// exists), then `FOLIO_*` environment variables.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self {
            data_dir: ConfigValue::new(Self::default_data_dir(), ConfigSource::Default),
            debounce_ms: ConfigValue::new(DEFAULT_DEBOUNCE_MS, ConfigSource::Default),
            config_file: None,
            store: StoreConfig::default(),
        };

        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            config.merge_file(&path)?;
        }
        config.merge_env(|name| std::env::var(name).ok())?;

        Ok(config)
    }

    fn merge_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        let file: ConfigFile = serde_yaml::from_str(&contents)
            .map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        self.config_file = Some(path.to_path_buf());

        if let Some(dir) = file.data_dir {
            // Relative to the directory of the config file
            let dir = match path.parent() {
                Some(parent) if dir.is_relative() => parent.join(dir),
                _ => dir,
            };
            self.data_dir.set(dir, ConfigSource::File);
        }
        if let Some(ms) = file.debounce_ms {
            let ms = checked_debounce("debounce_ms", ms)?;
            self.debounce_ms.set(ms, ConfigSource::File);
        }
        if let Some(store) = file.store {
            self.store = store;
        }
        Ok(())
    }

    fn merge_env(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(dir) = var("FOLIO_DATA_DIR") {
            self.data_dir
                .set(PathBuf::from(dir), ConfigSource::Environment);
        }
        if let Some(raw) = var("FOLIO_DEBOUNCE_MS") {
            let ms = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("FOLIO_DEBOUNCE_MS".to_string(), raw))?;
            let ms = checked_debounce("FOLIO_DEBOUNCE_MS", ms)?;
            self.debounce_ms.set(ms, ConfigSource::Environment);
        }
        if let Some(url) = var("FOLIO_SERVER_URL") {
            self.store.server_url = Some(url);
        }
        if let Some(key) = var("FOLIO_API_KEY") {
            self.store.api_key = Some(key);
        }
        Ok(())
    }

    pub fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig::with_debounce_ms(self.debounce_ms.value)
    }

    /// `<platform config dir>/folio`, e.g. `~/.config/folio` on Linux.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("folio")
    }

    /// `<platform data dir>/folio`, e.g. `~/.local/share/folio` on Linux.
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("folio")
    }

    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

fn checked_debounce(name: &str, ms: u64) -> Result<u64, ConfigError> {
    if ms > MAX_DEBOUNCE_MS {
        return Err(ConfigError::InvalidValue(name.to_string(), ms.to_string()));
    }
    Ok(ms)
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {}", .0.display(), .1)]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse config file '{}': {}", .0.display(), .1)]
    Parse(PathBuf, #[source] serde_yaml::Error),

    #[error("Invalid value for {0}: '{1}'")]
    InvalidValue(String, String),
}
