use crate::errors::ConfigError;
use chrono::Duration;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use subsurface_toolbox_core::parse_duration;
use subsurface_toolbox_core::subsurface::DEFAULT_INDENT;

pub const APPLICATION_NAME: &str = "subsurface-toolbox";
const CONFIG_FILE: &str = "config.yml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub timeshift: TimeshiftConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TimeshiftConfig {
    /// Shift applied when none is given on the command line
    pub duration: Option<String>,
    pub dive_computers: bool,
    /// Spaces per nesting level in the written XML
    pub indent: usize,
}

impl Default for TimeshiftConfig {
    fn default() -> Self {
        Self {
            duration: None,
            dive_computers: false,
            indent: DEFAULT_INDENT,
        }
    }
}

impl TimeshiftConfig {
    pub fn duration(&self) -> Result<Option<Duration>, ConfigError> {
        Ok(self.duration.as_deref().map(parse_duration).transpose()?)
    }
}

/// `<config dir>/subsurface-toolbox/config.yml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(APPLICATION_NAME).join(CONFIG_FILE))
}

impl Config {
    /// Load the given configuration file, or the default one if it exists
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => match default_config_path() {
                Some(path) if path.is_file() => Self::from_file(&path),
                _ => {
                    tracing::debug!("No configuration file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let name = path.display().to_string();
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Read(name.clone(), e))?;

        tracing::debug!(path = name.as_str(), "Loading configuration");
        Self::from_yaml(&contents).map_err(|e| ConfigError::Parse(name, e))
    }

    fn from_yaml(contents: &str) -> Result<Self, serde_yml::Error> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yml::from_str(contents)
    }
}
