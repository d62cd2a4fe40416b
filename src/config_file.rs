//! Configuration file handling for the terminal runner

use std::path::{Path, PathBuf};

use crossterm::style::Color;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::theme;

/// Errors that can occur while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No config file found: {0}")]
    ConfigNotFound(PathBuf),
    #[error("Unknown working directory: {0}")]
    UnknownWorkingDirectory(String),
    #[error("Unable to parse YAML config file {path}: {source}")]
    Yaml {
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("Unable to parse JSON config file {path}: {source}")]
    Json {
        source: serde_json::Error,
        path: PathBuf,
    },
    #[error("Unknown color name: {0}")]
    UnknownColor(String),
}

/// On-disk representation of the runner configuration
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct ConfigFile {
    pub title: Option<String>,
    pub prompt: Option<String>,
    pub terminal_color: Option<String>,
    pub command_color: Option<String>,
    pub error_color: Option<String>,
}

/// Resolved appearance settings for the terminal runner
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub title: String,
    pub prompt: String,
    pub terminal_color: Color,
    pub command_color: Color,
    pub error_color: Color,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            title: env!("CARGO_PKG_NAME").to_string(),
            prompt: "Command>".to_string(),
            terminal_color: theme::TERMINAL,
            command_color: theme::COMMAND,
            error_color: theme::ERROR,
        }
    }
}

impl TryFrom<ConfigFile> for RunnerConfig {
    type Error = ConfigError;

    fn try_from(config: ConfigFile) -> Result<Self, ConfigError> {
        let defaults = RunnerConfig::default();
        Ok(RunnerConfig {
            title: config.title.unwrap_or(defaults.title),
            prompt: config.prompt.unwrap_or(defaults.prompt),
            terminal_color: resolve_color(config.terminal_color, defaults.terminal_color)?,
            command_color: resolve_color(config.command_color, defaults.command_color)?,
            error_color: resolve_color(config.error_color, defaults.error_color)?,
        })
    }
}

fn resolve_color(name: Option<String>, default: Color) -> Result<Color, ConfigError> {
    name.map_or(Ok(default), |name| parse_color(&name))
}

/// Parse a color name into a terminal color.
///
/// # Errors
///
/// Returns `ConfigError::UnknownColor` for names outside the 16-color set.
pub fn parse_color(name: &str) -> Result<Color, ConfigError> {
    match name.to_ascii_lowercase().as_str() {
        "black" => Ok(Color::Black),
        "dark_grey" | "dark_gray" => Ok(Color::DarkGrey),
        "red" => Ok(Color::Red),
        "dark_red" => Ok(Color::DarkRed),
        "green" => Ok(Color::Green),
        "dark_green" => Ok(Color::DarkGreen),
        "yellow" => Ok(Color::Yellow),
        "dark_yellow" => Ok(Color::DarkYellow),
        "blue" => Ok(Color::Blue),
        "dark_blue" => Ok(Color::DarkBlue),
        "magenta" => Ok(Color::Magenta),
        "dark_magenta" => Ok(Color::DarkMagenta),
        "cyan" => Ok(Color::Cyan),
        "dark_cyan" => Ok(Color::DarkCyan),
        "white" => Ok(Color::White),
        "grey" | "gray" => Ok(Color::Grey),
        _ => Err(ConfigError::UnknownColor(name.to_string())),
    }
}

/// List of supported configuration file names
const FILENAMES: [&str; 3] = [".termenu.json", ".termenu.yaml", ".termenu.yml"];

impl ConfigFile {
    /// Loads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigNotFound` if the file cannot be read, or
    /// `ConfigError::Yaml`/`ConfigError::Json` if parsing fails.
    pub fn from_file(file: &Path) -> Result<ConfigFile, ConfigError> {
        let contents = std::fs::read_to_string(file)
            .map_err(|_| ConfigError::ConfigNotFound(file.to_path_buf()))?;
        let config: ConfigFile = if file.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&contents).map_err(|e| ConfigError::Json {
                source: e,
                path: file.to_path_buf(),
            })?
        } else {
            serde_yaml::from_str(&contents).map_err(|e| ConfigError::Yaml {
                source: e,
                path: file.to_path_buf(),
            })?
        };
        Ok(config)
    }

    /// Searches for a configuration file in the current directory and its parents.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownWorkingDirectory` if the cwd cannot be
    /// determined, or `ConfigError::ConfigNotFound` if no config file exists.
    pub fn find_config() -> Result<PathBuf, ConfigError> {
        let cwd = std::env::current_dir()
            .map_err(|e| ConfigError::UnknownWorkingDirectory(e.to_string()))?;
        let mut path = cwd.clone();
        debug!("Searching for config file in {}", cwd.display());
        loop {
            for file in &FILENAMES {
                let config_path = path.join(file);
                if config_path.exists() {
                    info!("Found config file: {}", config_path.display());
                    return Ok(config_path);
                }
            }
            if !path.pop() {
                return Err(ConfigError::ConfigNotFound(cwd));
            }
        }
    }
}

/// Load the runner configuration.
///
/// An explicitly given path must exist; without one the directory tree is
/// searched and defaults apply when no file is found.
///
/// # Errors
///
/// Returns `ConfigError` if an explicit path is missing, the file cannot be
/// parsed, or a color name is unknown.
pub fn load_config(config_file: Option<&str>) -> Result<RunnerConfig, ConfigError> {
    let config_path = match config_file {
        Some(file) => {
            let config_path = PathBuf::from(file);
            if !config_path.exists() {
                return Err(ConfigError::ConfigNotFound(config_path));
            }
            config_path
        }
        None => match ConfigFile::find_config() {
            Ok(path) => path,
            Err(ConfigError::ConfigNotFound(_)) => {
                debug!("No config file found, using defaults");
                return Ok(RunnerConfig::default());
            }
            Err(e) => return Err(e),
        },
    };
    ConfigFile::from_file(&config_path)?.try_into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_file_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".termenu.yaml");
        std::fs::write(&path, "title: demo console\nprompt: '>'\nerror_color: dark_red\n")
            .unwrap();
        let config: RunnerConfig = ConfigFile::from_file(&path).unwrap().try_into().unwrap();
        assert_eq!(config.title, "demo console");
        assert_eq!(config.prompt, ">");
        assert_eq!(config.error_color, Color::DarkRed);
    }

    #[test]
    fn test_from_file_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".termenu.json");
        std::fs::write(&path, r#"{"title": "demo", "command_color": "cyan"}"#).unwrap();
        let config: RunnerConfig = ConfigFile::from_file(&path).unwrap().try_into().unwrap();
        assert_eq!(config.title, "demo");
        assert_eq!(config.command_color, Color::Cyan);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config: RunnerConfig = ConfigFile::default().try_into().unwrap();
        assert_eq!(config.prompt, "Command>");
        assert_eq!(config.terminal_color, crate::theme::TERMINAL);
    }

    #[test]
    fn test_unknown_color_is_rejected() {
        let result = parse_color("mauve");
        match result {
            Err(ConfigError::UnknownColor(name)) => assert_eq!(name, "mauve"),
            other => panic!("Expected ConfigError::UnknownColor, got: {other:?}"),
        }
    }

    #[test]
    fn test_explicit_missing_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml").to_string_lossy().to_string();
        assert!(matches!(
            load_config(Some(&path)),
            Err(ConfigError::ConfigNotFound(_))
        ));
    }
}
