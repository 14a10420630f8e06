//! Board configuration.
//!
//! # Responsibility
//! - Load host settings (storage, logging, resolution timing, schedule) from
//!   an optional JSON file.
//! - Validate values before any component is built from them.
//!
//! # Invariants
//! - Every field has a default; an empty `{}` file is a valid config.
//! - `breakfast_end_hour` is within `0..=24`; `refresh_interval_secs > 0`;
//!   `slide_interval_ms > 0`.

use crate::logging::default_log_level;
use crate::model::schedule::PromoSchedule;
use crate::resolver::daypart_resolver::{
    ResolverSettings, DEFAULT_BREAKFAST_END_HOUR, DEFAULT_REFRESH_INTERVAL_SECS,
};
use crate::resolver::slide_rotator::DEFAULT_SLIDE_INTERVAL_MS;
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Default config file name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "menuboard.json";
const CLIENT_STORAGE_FILE: &str = "client-storage.json";

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "invalid config `{}`: {source}", path.display())
            }
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Invalid(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoardConfig {
    /// Directory holding menu documents and client storage.
    pub data_dir: PathBuf,
    /// Log directory; `None` means `<data_dir>/logs`.
    pub log_dir: Option<PathBuf>,
    pub log_level: String,
    pub breakfast_end_hour: u32,
    pub refresh_interval_secs: u32,
    /// Time each slide of a multi-slide screen stays up.
    pub slide_interval_ms: u32,
    pub schedule: PromoSchedule,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            log_dir: None,
            log_level: default_log_level().to_string(),
            breakfast_end_hour: DEFAULT_BREAKFAST_END_HOUR,
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            slide_interval_ms: DEFAULT_SLIDE_INTERVAL_MS,
            schedule: PromoSchedule::default(),
        }
    }
}

impl BoardConfig {
    /// Reads and validates a config file.
    ///
    /// # Errors
    /// - `Io` when the file cannot be read, `Parse` when it is not valid
    ///   config JSON, `Invalid` when a value is out of range.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Like `load`, but a missing file yields the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.breakfast_end_hour > 24 {
            return Err(ConfigError::Invalid(format!(
                "breakfast_end_hour must be within 0..=24, got {}",
                self.breakfast_end_hour
            )));
        }
        if self.refresh_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "refresh_interval_secs must be greater than zero".to_string(),
            ));
        }
        if self.slide_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "slide_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("data_dir cannot be empty".to_string()));
        }
        Ok(())
    }

    pub fn resolver_settings(&self) -> ResolverSettings {
        ResolverSettings {
            breakfast_end_hour: self.breakfast_end_hour,
            refresh_interval: TimeDelta::seconds(i64::from(self.refresh_interval_secs)),
        }
    }

    pub fn slide_interval(&self) -> TimeDelta {
        TimeDelta::milliseconds(i64::from(self.slide_interval_ms))
    }

    pub fn client_storage_path(&self) -> PathBuf {
        self.data_dir.join(CLIENT_STORAGE_FILE)
    }

    /// Effective log directory, made absolute against `base`.
    pub fn resolved_log_dir(&self, base: &Path) -> PathBuf {
        let dir = self
            .log_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.join("logs"));
        if dir.is_absolute() {
            dir
        } else {
            base.join(dir)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BoardConfig, ConfigError};
    use crate::model::daypart::DayOfWeek;
    use std::path::{Path, PathBuf};

    #[test]
    fn empty_object_is_default_config() {
        let config = BoardConfig::from_json("{}").unwrap();
        assert_eq!(config, BoardConfig::default());
        assert_eq!(config.breakfast_end_hour, 11);
        assert_eq!(config.refresh_interval_secs, 60);
        assert_eq!(config.slide_interval(), chrono::TimeDelta::seconds(5));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let err = BoardConfig::from_json(r#"{ "breakfast_end_hour": 25 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        let err = BoardConfig::from_json(r#"{ "refresh_interval_secs": 0 }"#).unwrap_err();
        assert!(err.to_string().contains("refresh_interval_secs"));
        let err = BoardConfig::from_json(r#"{ "slide_interval_ms": 0 }"#).unwrap_err();
        assert!(err.to_string().contains("slide_interval_ms"));
    }

    #[test]
    fn unknown_fields_are_parse_errors() {
        let err = BoardConfig::from_json(r#"{ "breakfast_end": 10 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn schedule_can_be_overridden() {
        let config =
            BoardConfig::from_json(r#"{ "schedule": { "pizza_promo_days": ["saturday"] } }"#)
                .unwrap();
        assert!(config.schedule.is_pizza_promo_day(DayOfWeek::Saturday));
        assert!(config.schedule.special_for(DayOfWeek::Monday).is_some());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = BoardConfig::load_or_default(dir.path().join("absent.json")).unwrap();
        assert_eq!(config, BoardConfig::default());
        assert!(BoardConfig::load(dir.path().join("absent.json")).is_err());
    }

    #[test]
    fn log_dir_defaults_under_data_dir() {
        let config = BoardConfig::default();
        assert_eq!(
            config.resolved_log_dir(Path::new("/srv/board")),
            PathBuf::from("/srv/board/data/logs")
        );
    }
}
