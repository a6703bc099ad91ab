//! Runtime configuration for task list hosts.
//!
//! # Responsibility
//! - Resolve storage key, storage backend and logging settings.
//! - Apply precedence: explicit value, then `TASKLIST_*` environment
//!   variable, then built-in default.
//!
//! # Invariants
//! - `storage_key` is non-empty after trimming.
//! - `log_dir`, when set, is an absolute, valid UTF-8 path.

use crate::logging::{default_log_level, LogLevel};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Storage key used when nothing else is configured.
pub const DEFAULT_STORAGE_KEY: &str = "tasks";
/// Database file name used under the temp dir when no path is configured.
pub const DEFAULT_DB_FILE_NAME: &str = "tasklist.sqlite3";

pub const ENV_STORAGE_KEY: &str = "TASKLIST_STORAGE_KEY";
pub const ENV_DB_PATH: &str = "TASKLIST_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "TASKLIST_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "TASKLIST_LOG_DIR";

/// Configuration error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyStorageKey,
    InvalidLogLevel(String),
    RelativeLogDir(PathBuf),
    NonUtf8LogDir(PathBuf),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyStorageKey => write!(f, "storage key cannot be empty"),
            Self::InvalidLogLevel(message) => write!(f, "{message}"),
            Self::RelativeLogDir(path) => {
                write!(f, "log dir must be an absolute path, got `{}`", path.display())
            }
            Self::NonUtf8LogDir(path) => {
                write!(f, "log dir must be valid UTF-8, got `{}`", path.display())
            }
        }
    }
}

impl Error for ConfigError {}

/// Where the task sequence is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// Process memory only; nothing survives exit.
    Memory,
    /// SQLite key-value file.
    Sqlite(PathBuf),
}

/// Resolved host configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub storage_key: String,
    pub backend: StorageBackend,
    pub log_level: LogLevel,
    /// Logging stays off when `None`.
    pub log_dir: Option<String>,
}

/// Explicit settings, usually from command-line flags.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub storage_key: Option<String>,
    pub db_path: Option<PathBuf>,
    pub in_memory: bool,
    pub log_level: Option<String>,
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            backend: StorageBackend::Sqlite(default_db_path()),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Resolves configuration from overrides and the process environment.
    pub fn resolve(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        Self::resolve_with(overrides, |name| std::env::var(name).ok())
    }

    /// Resolves configuration with a caller-provided environment lookup.
    pub fn resolve_with(
        overrides: ConfigOverrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let lookup = |name: &str| env(name).filter(|value| !value.trim().is_empty());

        let storage_key = match overrides.storage_key.or_else(|| lookup(ENV_STORAGE_KEY)) {
            Some(key) if key.trim().is_empty() => return Err(ConfigError::EmptyStorageKey),
            Some(key) => key.trim().to_string(),
            None => DEFAULT_STORAGE_KEY.to_string(),
        };

        let backend = if overrides.in_memory {
            StorageBackend::Memory
        } else {
            let path = overrides
                .db_path
                .or_else(|| lookup(ENV_DB_PATH).map(|raw| PathBuf::from(raw.trim())))
                .unwrap_or_else(default_db_path);
            StorageBackend::Sqlite(path)
        };

        let log_level = match overrides.log_level.or_else(|| lookup(ENV_LOG_LEVEL)) {
            Some(raw) => LogLevel::parse(&raw).map_err(ConfigError::InvalidLogLevel)?,
            None => default_log_level(),
        };

        let log_dir = match overrides
            .log_dir
            .or_else(|| lookup(ENV_LOG_DIR).map(|raw| PathBuf::from(raw.trim())))
        {
            Some(dir) if !dir.is_absolute() => return Err(ConfigError::RelativeLogDir(dir)),
            Some(dir) => match dir.to_str() {
                Some(text) => Some(text.to_string()),
                None => return Err(ConfigError::NonUtf8LogDir(dir)),
            },
            None => None,
        };

        Ok(Self {
            storage_key,
            backend,
            log_level,
            log_dir,
        })
    }
}

fn default_db_path() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::{
        AppConfig, ConfigError, ConfigOverrides, StorageBackend, DEFAULT_STORAGE_KEY, ENV_DB_PATH,
        ENV_LOG_LEVEL, ENV_STORAGE_KEY,
    };
    use crate::logging::LogLevel;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_without_overrides_or_env() {
        let config = AppConfig::resolve_with(ConfigOverrides::default(), env_of(&[])).unwrap();
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert!(matches!(config.backend, StorageBackend::Sqlite(_)));
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn env_fills_in_missing_overrides() {
        let env = env_of(&[
            (ENV_STORAGE_KEY, "work"),
            (ENV_DB_PATH, "/var/tmp/work.sqlite3"),
            (ENV_LOG_LEVEL, "warning"),
        ]);
        let config = AppConfig::resolve_with(ConfigOverrides::default(), env).unwrap();
        assert_eq!(config.storage_key, "work");
        assert_eq!(
            config.backend,
            StorageBackend::Sqlite(PathBuf::from("/var/tmp/work.sqlite3"))
        );
        assert_eq!(config.log_level, LogLevel::Warn);
    }

    #[test]
    fn overrides_win_over_env() {
        let overrides = ConfigOverrides {
            storage_key: Some("home".to_string()),
            in_memory: true,
            ..ConfigOverrides::default()
        };
        let env = env_of(&[(ENV_STORAGE_KEY, "work"), (ENV_DB_PATH, "/tmp/x.db")]);
        let config = AppConfig::resolve_with(overrides, env).unwrap();
        assert_eq!(config.storage_key, "home");
        assert_eq!(config.backend, StorageBackend::Memory);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let blank_key = ConfigOverrides {
            storage_key: Some("   ".to_string()),
            ..ConfigOverrides::default()
        };
        assert_eq!(
            AppConfig::resolve_with(blank_key, env_of(&[])),
            Err(ConfigError::EmptyStorageKey)
        );

        let relative_dir = ConfigOverrides {
            log_dir: Some(PathBuf::from("logs")),
            ..ConfigOverrides::default()
        };
        assert!(matches!(
            AppConfig::resolve_with(relative_dir, env_of(&[])),
            Err(ConfigError::RelativeLogDir(_))
        ));

        let env = env_of(&[(ENV_LOG_LEVEL, "loud")]);
        assert!(matches!(
            AppConfig::resolve_with(ConfigOverrides::default(), env),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn absolute_log_dir_is_kept_as_text() {
        let overrides = ConfigOverrides {
            log_dir: Some(PathBuf::from("/var/log/tasklist")),
            ..ConfigOverrides::default()
        };
        let config = AppConfig::resolve_with(overrides, env_of(&[])).unwrap();
        assert_eq!(config.log_dir.as_deref(), Some("/var/log/tasklist"));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_log_dir_is_rejected() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = PathBuf::from(OsStr::from_bytes(b"/var/log/task\xfflist"));
        let overrides = ConfigOverrides {
            log_dir: Some(dir.clone()),
            ..ConfigOverrides::default()
        };
        assert_eq!(
            AppConfig::resolve_with(overrides, env_of(&[])),
            Err(ConfigError::NonUtf8LogDir(dir))
        );
    }
}
