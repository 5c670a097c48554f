//! Session configuration loading, repair, and persistence.
//!
//! The configuration lives in a small YAML file owned by the host. It is
//! read once at session start and treated as immutable afterwards. A
//! missing, unreadable, or structurally invalid file is never fatal:
//! [`SessionConfig::load_or_init`] substitutes defaults, repairs
//! out-of-range hour fields, and writes the resulting record back, so
//! the file on disk always reflects what the session actually runs with.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Errors that can occur when loading or saving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read or write the configuration file.
    #[error("failed to access config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse or serialize YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Night-skip session configuration.
///
/// All fields have defaults, so a partial (or empty) YAML file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Whether the night skip also clears every participant's resting
    /// flag. When false, the clock still moves but participants stay
    /// flagged as resting.
    #[serde(default = "default_true")]
    pub autowake: bool,

    /// Whether entering the resting state requires standing on a rest
    /// site (bed or sleeping bag).
    #[serde(default = "default_true")]
    pub require_rest_site: bool,

    /// Whether the status banner may be rendered at all.
    #[serde(default = "default_true")]
    pub show_banner: bool,

    /// Hour the world is set to when the night is skipped; also the
    /// start of the window during which resting is blocked. Valid open
    /// interval (0, 24).
    #[serde(default = "default_day_start_hour")]
    pub day_start_hour: f64,

    /// Hour at which resting becomes allowed again. Valid open interval
    /// (0, 24).
    #[serde(default = "default_night_start_hour")]
    pub night_start_hour: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            autowake: true,
            require_rest_site: true,
            show_banner: true,
            day_start_hour: default_day_start_hour(),
            night_start_hour: default_night_start_hour(),
        }
    }
}

impl SessionConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_yml::from_str(&contents)?;
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }

    /// Serialize the configuration back to a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if serialization fails, or
    /// [`ConfigError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let yaml = serde_yml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Load the session configuration, recovering from any failure.
    ///
    /// A missing, unreadable, or invalid file is logged as a warning and
    /// replaced by defaults; out-of-range hour fields are silently
    /// repaired. The resulting record is always written back to `path`,
    /// so after this call the file matches the running configuration.
    ///
    /// # Errors
    ///
    /// Only the final write-back can fail; load and parse failures are
    /// recovered locally and never surface.
    pub fn load_or_init(path: &Path) -> Result<Self, ConfigError> {
        let mut config = match Self::from_file(path) {
            Ok(config) => config,
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to load config, creating default configuration"
                );
                Self::default()
            }
        };
        config.normalize();
        config.save(path)?;
        Ok(config)
    }

    /// Repair hour fields that fall outside the open interval (0, 24).
    ///
    /// Corrupt values are replaced by their defaults rather than treated
    /// as errors; each repair is logged as a warning.
    pub fn normalize(&mut self) {
        if !hour_in_range(self.day_start_hour) {
            warn!(
                hour = self.day_start_hour,
                "day_start_hour out of range, restoring default"
            );
            self.day_start_hour = default_day_start_hour();
        }
        if !hour_in_range(self.night_start_hour) {
            warn!(
                hour = self.night_start_hour,
                "night_start_hour out of range, restoring default"
            );
            self.night_start_hour = default_night_start_hour();
        }
    }
}

/// True when an hour field is inside the valid open interval (0, 24).
fn hour_in_range(hour: f64) -> bool {
    hour > 0.0 && hour < 24.0
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

const fn default_day_start_hour() -> f64 {
    8.0
}

const fn default_night_start_hour() -> f64 {
    20.0
}

const fn default_true() -> bool {
    true
}
