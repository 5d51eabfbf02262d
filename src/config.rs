//! Runtime configuration.
//!
//! Everything is read from the environment at startup; a `.env` file in the
//! working directory is honoured for local development.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.edubridge.jaybrown.xyz/api";
pub const DEFAULT_USER_URL: &str = "https://api.edubridge.jaybrown.xyz";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the processing endpoints (`/process-text`, `/demo`, ...).
    pub api_url: String,
    /// Base URL of the account endpoints (`/user/...`).
    pub user_url: String,
    pub timeout: Duration,
    pub log_path: PathBuf,
    pub export_dir: PathBuf,
    pub db_path: PathBuf,
    pub tts_command: String,
    pub voices: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            user_url: DEFAULT_USER_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_path: PathBuf::from("studybridge.log"),
            export_dir: PathBuf::from("."),
            db_path: crate::db::default_db_path(),
            tts_command: "espeak".to_string(),
            voices: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let timeout = match lookup("STUDYBRIDGE_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|_| {
                    ConfigError::InvalidValue(
                        "STUDYBRIDGE_TIMEOUT_SECS".to_string(),
                        format!("'{}' is not a number of seconds", raw),
                    )
                })?;
                if secs == 0 {
                    return Err(ConfigError::InvalidValue(
                        "STUDYBRIDGE_TIMEOUT_SECS".to_string(),
                        "timeout must be at least one second".to_string(),
                    ));
                }
                Duration::from_secs(secs)
            }
            None => defaults.timeout,
        };

        let voices = lookup("STUDYBRIDGE_VOICES")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            api_url: lookup("STUDYBRIDGE_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_url),
            user_url: lookup("STUDYBRIDGE_USER_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.user_url),
            timeout,
            log_path: lookup("STUDYBRIDGE_LOG")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_path),
            export_dir: lookup("STUDYBRIDGE_EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.export_dir),
            db_path: lookup("STUDYBRIDGE_DB")
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            tts_command: lookup("STUDYBRIDGE_TTS_COMMAND").unwrap_or(defaults.tts_command),
            voices,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.voices.is_empty());
    }

    #[test]
    fn test_overrides_and_trailing_slash() {
        let config = Config::from_lookup(lookup_from(&[
            ("STUDYBRIDGE_API_URL", "http://localhost:8080/api/"),
            ("STUDYBRIDGE_TIMEOUT_SECS", "5"),
            ("STUDYBRIDGE_VOICES", "Alex, Samantha Female ,"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "http://localhost:8080/api");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.voices, vec!["Alex", "Samantha Female"]);
    }

    #[test]
    fn test_invalid_timeout() {
        let result = Config::from_lookup(lookup_from(&[("STUDYBRIDGE_TIMEOUT_SECS", "soon")]));
        assert!(matches!(result, Err(ConfigError::InvalidValue(name, _)) if name == "STUDYBRIDGE_TIMEOUT_SECS"));

        let zero = Config::from_lookup(lookup_from(&[("STUDYBRIDGE_TIMEOUT_SECS", "0")]));
        assert!(zero.is_err());
    }
}
