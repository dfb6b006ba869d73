//! TOML-based configuration.
//!
//! Stored at `<data_dir>/config.toml`:
//!
//! ```toml
//! [day]
//! start = "08:00"
//! end = "18:00"
//!
//! [confirmation]
//! timeout_secs = 120
//!
//! [storage]
//! database = "dayplan.db"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::clock::{DayBounds, TimeOfDay};
use crate::error::{ConfigError, ValidationError};

/// Returns `~/.config/dayplan[-dev]/`, creating it if needed.
///
/// `DAYPLAN_DATA_DIR` overrides the location entirely; `DAYPLAN_ENV=dev`
/// selects the development directory.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("DAYPLAN_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("DAYPLAN_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("dayplan-dev")
            } else {
                base_dir.join("dayplan")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}

/// Window in which flexible events may be relocated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayConfig {
    #[serde(default = "default_day_start")]
    pub start: TimeOfDay,
    #[serde(default = "default_day_end")]
    pub end: TimeOfDay,
}

/// Interactive confirmation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmationConfig {
    /// Seconds to wait for an answer; 0 waits indefinitely.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Database file name, relative to the data directory.
    #[serde(default = "default_database")]
    pub database: String,
}

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub day: DayConfig,
    #[serde(default)]
    pub confirmation: ConfirmationConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

fn default_day_start() -> TimeOfDay {
    TimeOfDay::MIDNIGHT
}
fn default_day_end() -> TimeOfDay {
    TimeOfDay::END_OF_DAY
}
fn default_timeout_secs() -> u64 {
    120
}
fn default_database() -> String {
    "dayplan.db".into()
}

impl Default for DayConfig {
    fn default() -> Self {
        Self {
            start: default_day_start(),
            end: default_day_end(),
        }
    }
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database: default_database(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let (parent_path, leaf) = match key.rsplit_once('.') {
            Some((parent, leaf)) => (Some(parent), leaf),
            None => (None, key),
        };
        if leaf.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        if let Some(parent_path) = parent_path {
            for part in parent_path.split('.') {
                current = current.get_mut(part).ok_or_else(unknown)?;
            }
        }

        let obj = current.as_object_mut().ok_or_else(unknown)?;
        let existing = obj.get(leaf).ok_or_else(unknown)?;
        let new_value = match existing {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(
                value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
            ),
            serde_json::Value::Number(_) => serde_json::Value::Number(
                value
                    .parse::<u64>()
                    .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?
                    .into(),
            ),
            serde_json::Value::Object(_) => return Err(unknown()),
            _ => serde_json::Value::String(value.into()),
        };

        obj.insert(leaf.to_string(), new_value);
        Ok(())
    }

    /// Default location of the config file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if the file is missing.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be parsed, or if the
    /// default config cannot be written.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.day_bounds().map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key without saving.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value does not fit the
    /// field, including day bounds that would end before they start.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut json = serde_json::to_value(&*self).map_err(|e| invalid(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| invalid(e.to_string()))?;
        updated.day_bounds().map_err(|e| invalid(e.to_string()))?;
        *self = updated;
        Ok(())
    }

    pub fn day_bounds(&self) -> Result<DayBounds, ValidationError> {
        DayBounds::new(self.day.start, self.day.end)
    }

    /// `None` means wait for an answer indefinitely.
    pub fn confirmation_timeout(&self) -> Option<Duration> {
        match self.confirmation.timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    /// Database location inside the data directory.
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join(&self.storage.database))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.day.start, TimeOfDay::MIDNIGHT);
        assert_eq!(parsed.day.end, TimeOfDay::END_OF_DAY);
        assert_eq!(parsed.confirmation.timeout_secs, 120);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let cfg: Config = toml::from_str("[day]\nstart = \"9\"\n").unwrap();
        assert_eq!(cfg.day.start, TimeOfDay::from_hm(9, 0).unwrap());
        assert_eq!(cfg.day.end, TimeOfDay::END_OF_DAY);
        assert_eq!(cfg.storage.database, "dayplan.db");
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("day.end").as_deref(), Some("24:00"));
        assert_eq!(cfg.get("confirmation.timeout_secs").as_deref(), Some("120"));
        assert!(cfg.get("day").is_none());
        assert!(cfg.get("day.missing").is_none());
    }

    #[test]
    fn set_updates_values() {
        let mut cfg = Config::default();
        cfg.set("day.start", "0830").unwrap();
        cfg.set("confirmation.timeout_secs", "0").unwrap();
        assert_eq!(cfg.day.start, TimeOfDay::from_hm(8, 30).unwrap());
        assert_eq!(cfg.confirmation_timeout(), None);
    }

    #[test]
    fn set_rejects_unknown_keys_and_bad_values() {
        let mut cfg = Config::default();
        assert!(matches!(cfg.set("day.lunch", "12"), Err(ConfigError::UnknownKey(_))));
        assert!(matches!(cfg.set("day", "12"), Err(ConfigError::UnknownKey(_))));
        assert!(cfg.set("confirmation.timeout_secs", "soon").is_err());
        assert!(cfg.set("day.start", "25").is_err());
    }

    #[test]
    fn set_rejects_inverted_bounds() {
        let mut cfg = Config::default();
        cfg.set("day.end", "17").unwrap();
        assert!(cfg.set("day.start", "18").is_err());
        assert_eq!(cfg.day.start, TimeOfDay::MIDNIGHT);
    }

    #[test]
    fn load_from_writes_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let cfg = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.confirmation.timeout_secs, 120);

        let mut edited = cfg.clone();
        edited.set("day.start", "7").unwrap();
        edited.save_to(&path).unwrap();
        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.day.start, TimeOfDay::from_hm(7, 0).unwrap());
    }

    #[test]
    fn load_from_rejects_inverted_bounds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[day]\nstart = \"18:00\"\nend = \"08:00\"\n").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }
}
