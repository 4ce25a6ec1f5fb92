use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::error::Error;

/// Environment variable consulted before the config file.
pub const API_KEY_ENV: &str = "SKYCAST_API_KEY";

/// On-disk shape of the config file.
///
/// Example TOML:
/// api_key = "..."
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct ConfigFile {
    api_key: Option<String>,
}

/// Resolved application configuration: the WeatherAPI.com key.
///
/// Resolved once at startup and injected into the provider; there is no
/// module-level key anywhere. Resolution fails fast when no key can be
/// found, before any request is issued.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
}

impl Config {
    /// Resolve the API key: environment first, then the config file.
    pub fn load() -> Result<Self, Error> {
        let env_key = std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty());
        let file = Self::read_config_file()?;
        resolve(env_key, file)
    }

    /// Store an API key in the platform config file (used by `skycast configure`).
    pub fn save_api_key(api_key: &str) -> Result<PathBuf, Error> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Configuration(format!(
                    "Failed to create config directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let contents = toml::to_string_pretty(&ConfigFile { api_key: Some(api_key.to_string()) })
            .map_err(|e| Error::Configuration(format!("Failed to serialize configuration: {e}")))?;

        fs::write(&path, contents).map_err(|e| {
            Error::Configuration(format!("Failed to write config file {}: {e}", path.display()))
        })?;

        Ok(path)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf, Error> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast").ok_or_else(|| {
            Error::Configuration("Could not determine platform config directory".to_string())
        })?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    fn read_config_file() -> Result<Option<ConfigFile>, Error> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            Error::Configuration(format!("Failed to read config file {}: {e}", path.display()))
        })?;

        let file: ConfigFile = toml::from_str(&contents).map_err(|e| {
            Error::Configuration(format!("Failed to parse config file {}: {e}", path.display()))
        })?;

        Ok(Some(file))
    }
}

/// Pick the key from the two sources, environment winning.
fn resolve(env_key: Option<String>, file: Option<ConfigFile>) -> Result<Config, Error> {
    let api_key = env_key
        .or_else(|| file.and_then(|f| f.api_key).filter(|k| !k.is_empty()))
        .ok_or_else(|| {
            Error::Configuration(format!(
                "No WeatherAPI.com key configured.\n\
                 Hint: set {API_KEY_ENV} or run `skycast configure`."
            ))
        })?;

    Ok(Config { api_key })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_key_wins_over_file() {
        let file = ConfigFile { api_key: Some("FILE_KEY".into()) };
        let cfg = resolve(Some("ENV_KEY".into()), Some(file)).expect("key must resolve");
        assert_eq!(cfg.api_key, "ENV_KEY");
    }

    #[test]
    fn file_key_used_when_env_absent() {
        let file = ConfigFile { api_key: Some("FILE_KEY".into()) };
        let cfg = resolve(None, Some(file)).expect("key must resolve");
        assert_eq!(cfg.api_key, "FILE_KEY");
    }

    #[test]
    fn missing_key_fails_fast_with_hint() {
        let err = resolve(None, None).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("No WeatherAPI.com key configured"));
        assert!(msg.contains(API_KEY_ENV));
        assert!(msg.contains("skycast configure"));
    }

    #[test]
    fn empty_file_key_is_treated_as_missing() {
        let file = ConfigFile { api_key: Some(String::new()) };
        let err = resolve(None, Some(file)).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn config_file_parses() {
        let file: ConfigFile = toml::from_str("api_key = \"ABC\"").expect("valid toml");
        assert_eq!(file.api_key.as_deref(), Some("ABC"));
    }
}
