//src/config.rs
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use thiserror::Error;

const CONFIG_FILE_NAME: &str = "config.toml";
const LOG_FILE_NAME: &str = "workout-logger.log";
const APP_CONFIG_DIR: &str = "workout-logger";
const CONFIG_ENV_VAR: &str = "WORKOUT_LOGGER_CONFIG_DIR"; // Environment variable name
pub const API_URL_ENV_VAR: &str = "WORKOUT_LOGGER_API_URL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine configuration directory.")]
    CannotDetermineConfigDir,
    #[error("I/O error accessing config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file (TOML): {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Failed to serialize config data (TOML): {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("Invalid color name: {0}")]
    InvalidColor(String),
    #[error("No API URL configured. Pass --api-url, set WORKOUT_LOGGER_API_URL, or add api_url to {0:?}.")]
    MissingApiUrl(PathBuf),
    #[error("Invalid API URL '{0}': expected an http:// or https:// address.")]
    InvalidApiUrl(String),
}

// Define standard colors using strum for easy iteration/parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum StandardColor {
    Black, Red, Green, Yellow, Blue, Magenta, Cyan, White,
    DarkGrey, DarkRed, DarkGreen, DarkYellow, DarkBlue, DarkMagenta, DarkCyan, Grey,
}

// Helper to parse a string into our StandardColor enum
pub fn parse_color(color_str: &str) -> Result<StandardColor, ConfigError> {
    for color in StandardColor::iter() {
        if format!("{:?}", color).eq_ignore_ascii_case(color_str) {
            return Ok(color);
        }
    }
    Err(ConfigError::InvalidColor(color_str.to_string()))
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)] // Ensure defaults are used if fields are missing
pub struct ThemeConfig {
    pub accent_color: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig { accent_color: "Yellow".to_string() }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Base URL of the workout API, e.g. `http://localhost:5000/api`.
    pub api_url: Option<String>,
    pub request_timeout_secs: u64,
    pub log_level: String,
    pub theme: ThemeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: None,
            request_timeout_secs: 10,
            log_level: "info".to_string(),
            theme: ThemeConfig::default(),
        }
    }
}

impl Config {
    /// Picks the API base URL: explicit override, then the environment, then
    /// the config file.
    pub fn resolve_api_url(&self, cli_override: Option<&str>, config_path: &Path) -> Result<String, ConfigError> {
        let from_env = std::env::var(API_URL_ENV_VAR).ok();
        pick_api_url(cli_override, from_env.as_deref(), self.api_url.as_deref())
            .ok_or_else(|| ConfigError::MissingApiUrl(config_path.to_path_buf()))
            .and_then(validate_api_url)
    }

    pub fn accent_color(&self) -> Result<StandardColor, ConfigError> {
        parse_color(&self.theme.accent_color)
    }
}

fn pick_api_url<'a>(cli: Option<&'a str>, env: Option<&'a str>, file: Option<&'a str>) -> Option<&'a str> {
    [cli, env, file]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|url| !url.is_empty())
}

fn validate_api_url(url: &str) -> Result<String, ConfigError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(url.trim_end_matches('/').to_string())
    } else {
        Err(ConfigError::InvalidApiUrl(url.to_string()))
    }
}

/// Loads `.env` from the working directory, if there is one.
pub fn load_environment() {
    dotenvy::dotenv().ok();
}

fn get_config_dir() -> Result<PathBuf, ConfigError> {
    let config_dir_override = std::env::var(CONFIG_ENV_VAR).ok();

    let config_dir_path = match config_dir_override {
        Some(path_str) => PathBuf::from(path_str),
        None => {
            let base_config_dir = dirs::config_dir().ok_or(ConfigError::CannotDetermineConfigDir)?;
            base_config_dir.join(APP_CONFIG_DIR)
        }
    };

    if !config_dir_path.exists() {
        fs::create_dir_all(&config_dir_path)?;
    }
    Ok(config_dir_path)
}

/// Determines the path to the configuration file.
pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    Ok(get_config_dir()?.join(CONFIG_FILE_NAME))
}

/// Default location of the log file, next to the config file.
pub fn get_log_path() -> Result<PathBuf, ConfigError> {
    Ok(get_config_dir()?.join(LOG_FILE_NAME))
}

/// Loads the configuration, writing the defaults out first if the file does
/// not exist yet.
pub fn load_config(config_path: &Path) -> Result<Config, ConfigError> {
    if !config_path.exists() {
        let default_config = Config::default();
        save_config(config_path, &default_config)?;
        Ok(default_config)
    } else {
        let config_content = fs::read_to_string(config_path)?;
        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }
}

pub fn save_config(config_path: &Path, config: &Config) -> Result<(), ConfigError> {
    if let Some(parent_dir) = config_path.parent() {
        if !parent_dir.exists() {
            fs::create_dir_all(parent_dir)?;
        }
    }
    let config_content = toml::to_string_pretty(config)?;
    fs::write(config_path, config_content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_api_url_precedence() {
        assert_eq!(pick_api_url(Some("http://cli"), Some("http://env"), Some("http://file")), Some("http://cli"));
        assert_eq!(pick_api_url(None, Some("http://env"), Some("http://file")), Some("http://env"));
        assert_eq!(pick_api_url(Some("  "), None, Some("http://file")), Some("http://file"));
        assert_eq!(pick_api_url(None, None, None), None);
    }

    #[test]
    fn test_validate_api_url() {
        assert_eq!(validate_api_url("http://localhost:5000/api/").unwrap(), "http://localhost:5000/api");
        assert!(matches!(validate_api_url("localhost:5000"), Err(ConfigError::InvalidApiUrl(_))));
    }

    #[test]
    fn test_load_creates_default_file() -> Result<(), ConfigError> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let config = load_config(&path)?;
        assert_eq!(config, Config::default());
        assert!(path.exists());
        Ok(())
    }

    #[test]
    fn test_partial_file_uses_defaults() -> Result<(), ConfigError> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "api_url = \"https://lifts.example.com/api\"\n")?;

        let config = load_config(&path)?;
        assert_eq!(config.api_url.as_deref(), Some("https://lifts.example.com/api"));
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.theme.accent_color, "Yellow");
        Ok(())
    }

    #[test]
    fn test_save_then_load() -> Result<(), ConfigError> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(CONFIG_FILE_NAME);
        let config = Config {
            api_url: Some("http://127.0.0.1:5000/api".to_string()),
            log_level: "debug".to_string(),
            ..Default::default()
        };
        save_config(&path, &config)?;
        assert_eq!(load_config(&path)?, config);
        Ok(())
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("darkcyan").unwrap(), StandardColor::DarkCyan);
        assert!(matches!(parse_color("mauve"), Err(ConfigError::InvalidColor(_))));
    }
}
