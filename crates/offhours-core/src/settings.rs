//! TOML settings for the remote endpoint.
//!
//! Stored at `~/.config/offhours/settings.toml`. Set OFFHOURS_ENV=dev to use
//! `~/.config/offhours-dev/` instead.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::adapter::OperationTimeouts;

const SETTINGS_FILE: &str = "settings.toml";

fn default_api_version() -> String {
    "2024-06-01".to_string()
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("serializing settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("endpoint is not configured; run `offhours config set --endpoint <url>`")]
    EndpointUnset,

    #[error("endpoint {endpoint:?} is not a valid url: {source}")]
    EndpointInvalid {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    #[error("resolving settings directory: {0}")]
    Dir(String),
}

/// Optional per-operation deadline overrides, in minutes. Unset fields fall
/// back to the built-in defaults.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TimeoutSettings {
    pub create_min: Option<u64>,
    pub read_min: Option<u64>,
    pub update_min: Option<u64>,
    pub delete_min: Option<u64>,
}

impl TimeoutSettings {
    pub fn operation_timeouts(&self) -> OperationTimeouts {
        let base = OperationTimeouts::default();
        OperationTimeouts {
            create: self.create_min.map(minutes).unwrap_or(base.create),
            read: self.read_min.map(minutes).unwrap_or(base.read),
            update: self.update_min.map(minutes).unwrap_or(base.update),
            delete: self.delete_min.map(minutes).unwrap_or(base.delete),
        }
    }
}

fn minutes(m: u64) -> Duration {
    Duration::from_secs(m * 60)
}

/// Remote endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Base URL of the management endpoint.
    #[serde(default)]
    pub endpoint: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default)]
    pub timeouts: TimeoutSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_version: default_api_version(),
            timeouts: TimeoutSettings::default(),
        }
    }
}

impl Settings {
    /// Load from the default location, falling back to defaults when the
    /// file does not exist yet.
    pub fn load_or_default() -> Result<Self, SettingsError> {
        Self::load_from(&settings_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<(), SettingsError> {
        self.save_to(&settings_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(path, raw).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The configured endpoint as a parsed URL.
    pub fn endpoint_url(&self) -> Result<Url, SettingsError> {
        if self.endpoint.is_empty() {
            return Err(SettingsError::EndpointUnset);
        }
        Url::parse(&self.endpoint).map_err(|source| SettingsError::EndpointInvalid {
            endpoint: self.endpoint.clone(),
            source,
        })
    }
}

/// Returns `~/.config/offhours[-dev]/`, creating it if needed.
pub fn config_dir() -> Result<PathBuf, SettingsError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("OFFHOURS_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("offhours-dev")
    } else {
        base_dir.join("offhours")
    };

    std::fs::create_dir_all(&dir).map_err(|e| SettingsError::Dir(e.to_string()))?;
    Ok(dir)
}

fn settings_path() -> Result<PathBuf, SettingsError> {
    Ok(config_dir()?.join(SETTINGS_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.endpoint, "");
        assert_eq!(settings.api_version, default_api_version());
        assert!(matches!(settings.endpoint_url(), Err(SettingsError::EndpointUnset)));
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);

        let mut settings = Settings::default();
        settings.endpoint = "https://management.contoso.example".to_string();
        settings.timeouts.read_min = Some(2);
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded.endpoint, settings.endpoint);
        assert_eq!(loaded.timeouts.read_min, Some(2));
        assert_eq!(
            loaded.timeouts.operation_timeouts().read,
            Duration::from_secs(120)
        );
        assert_eq!(
            loaded.timeouts.operation_timeouts().create,
            Duration::from_secs(30 * 60)
        );
        assert_eq!(loaded.endpoint_url().unwrap().as_str(), "https://management.contoso.example/");
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Settings::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded.endpoint, "");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, "endpoint = \"https://mgmt.example\"\n").unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded.api_version, default_api_version());
        assert_eq!(loaded.timeouts.create_min, None);
    }

    #[test]
    fn test_invalid_endpoint_is_reported() {
        let mut settings = Settings::default();
        settings.endpoint = "not a url".to_string();
        assert!(matches!(
            settings.endpoint_url(),
            Err(SettingsError::EndpointInvalid { .. })
        ));
    }
}
