//src/config.rs
use comfy_table::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use thiserror::Error;

use crate::ids::IdStrategy;
use crate::text::{self, DEFAULT_DATE_FORMAT};

const CONFIG_FILE_NAME: &str = "config.toml";
const APP_CONFIG_DIR: &str = "gymtext";
const CONFIG_ENV_VAR: &str = "GYMTEXT_CONFIG_DIR"; // Environment variable name

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
    #[error("Invalid date format '{0}'. Use chrono strftime syntax, e.g. %d.%m.%Y")]
    InvalidDateFormat(String),
    #[error("Summary limit '{0}' must be greater than zero.")]
    InvalidSummaryLimit(&'static str),
}

// Define standard colors using strum for easy iteration/parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum StandardColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    DarkGrey,
    DarkRed,
    DarkGreen,
    DarkYellow,
    DarkBlue,
    DarkMagenta,
    DarkCyan,
    Grey,
}

impl From<StandardColor> for Color {
    fn from(value: StandardColor) -> Self {
        match value {
            StandardColor::Black => Self::Black,
            StandardColor::Red => Self::Red,
            StandardColor::Green => Self::Green,
            StandardColor::Yellow => Self::Yellow,
            StandardColor::Blue => Self::Blue,
            StandardColor::Magenta => Self::Magenta,
            StandardColor::Cyan => Self::Cyan,
            StandardColor::White => Self::White,
            StandardColor::DarkGrey => Self::DarkGrey,
            StandardColor::DarkRed => Self::DarkRed,
            StandardColor::DarkGreen => Self::DarkGreen,
            StandardColor::DarkYellow => Self::DarkYellow,
            StandardColor::DarkBlue => Self::DarkBlue,
            StandardColor::DarkMagenta => Self::DarkMagenta,
            StandardColor::DarkCyan => Self::DarkCyan,
            StandardColor::Grey => Self::Grey,
        }
    }
}

/// Case-insensitive lookup of a color name.
/// # Errors
/// Returns `ConfigError::InvalidColor` for unknown names.
pub fn parse_color(color_str: &str) -> Result<StandardColor, ConfigError> {
    StandardColor::iter()
        .find(|color| format!("{color:?}").eq_ignore_ascii_case(color_str.trim()))
        .ok_or_else(|| ConfigError::InvalidColor(color_str.to_string()))
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)] // Ensure defaults are used if fields are missing
pub struct ThemeConfig {
    pub header_color: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            header_color: "Green".to_string(),
        }
    }
}

impl ThemeConfig {
    /// Header color for tables, falling back to green for unknown names.
    #[must_use]
    pub fn header_color(&self) -> Color {
        parse_color(&self.header_color).map_or(Color::Green, Color::from)
    }
}

/// Limits for the history digest fed to the suggestion prompt.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct SummaryConfig {
    pub lookback_months: u32,
    pub max_records_per_exercise: usize,
    pub max_recent_workouts: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            lookback_months: 2,
            max_records_per_exercise: 5,
            max_recent_workouts: 10,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)] // Ensure defaults are used if fields are missing
pub struct Config {
    pub id_strategy: IdStrategy,
    pub date_format: String,
    pub theme: ThemeConfig,
    pub summary: SummaryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            id_strategy: IdStrategy::default(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            theme: ThemeConfig::default(),
            summary: SummaryConfig::default(),
        }
    }
}

impl Config {
    /// Checks values serde cannot check on its own.
    /// # Errors
    /// - `ConfigError::InvalidDateFormat` if `date_format` is not valid strftime.
    /// - `ConfigError::InvalidSummaryLimit` if a summary limit is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !text::is_valid_date_format(&self.date_format) {
            return Err(ConfigError::InvalidDateFormat(self.date_format.clone()));
        }
        if self.summary.lookback_months == 0 {
            return Err(ConfigError::InvalidSummaryLimit("lookback_months"));
        }
        if self.summary.max_records_per_exercise == 0 {
            return Err(ConfigError::InvalidSummaryLimit("max_records_per_exercise"));
        }
        if self.summary.max_recent_workouts == 0 {
            return Err(ConfigError::InvalidSummaryLimit("max_recent_workouts"));
        }
        Ok(())
    }
}

/// Determines the path to the configuration file, creating its directory.
/// `GYMTEXT_CONFIG_DIR` overrides the platform config directory.
/// # Errors
/// Returns `ConfigError` if no directory can be determined or created.
pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let config_dir_path = match std::env::var(CONFIG_ENV_VAR).ok() {
        Some(path_str) => PathBuf::from(path_str),
        None => dirs::config_dir()
            .ok_or(ConfigError::CannotDetermineConfigDir)?
            .join(APP_CONFIG_DIR),
    };

    if !config_dir_path.exists() {
        tracing::debug!(path = %config_dir_path.display(), "Creating config directory");
        fs::create_dir_all(&config_dir_path)?;
    }

    Ok(config_dir_path.join(CONFIG_FILE_NAME))
}

/// Loads the configuration, writing the defaults first if the file is missing.
/// # Errors
/// Returns `ConfigError` on IO, TOML, or validation failures.
pub fn load(config_path: &Path) -> Result<Config, ConfigError> {
    if config_path.exists() {
        let config_content = fs::read_to_string(config_path)?;
        let config: Config = toml::from_str(&config_content)?;
        config.validate()?;
        Ok(config)
    } else {
        let default_config = Config::default();
        save(config_path, &default_config)?;
        Ok(default_config)
    }
}

/// Saves the configuration to the TOML file.
/// # Errors
/// Returns `ConfigError` on IO or serialization failures.
pub fn save(config_path: &Path, config: &Config) -> Result<(), ConfigError> {
    if let Some(parent_dir) = config_path.parent() {
        if !parent_dir.exists() {
            fs::create_dir_all(parent_dir)?;
        }
    }
    let config_content = toml::to_string_pretty(config)?;
    fs::write(config_path, config_content)?;
    Ok(())
}
