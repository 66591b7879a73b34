//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use mandi_aggregator::AggregatorConfig;
use mandi_domain::{Location, UserId};
use mandi_extractor::ExtractorConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
///
/// Stored at `~/.mandi/config.toml`. Every table is optional; a missing
/// file or table means defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Where the user is, used as the proximity origin
    #[serde(default)]
    pub home: Home,

    /// Detection rules and weights
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Promotion thresholds
    #[serde(default)]
    pub aggregator: AggregatorConfig,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// SQLite database file; defaults to `~/.mandi/mandi.db`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,

    /// Default identity for posts and votes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

/// The user's own location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Home {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub city: String,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Directory holding the config file and the default database.
    pub fn dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".mandi"))
    }

    /// Get the configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(Self::dir()?.join("config.toml"))
    }

    /// Load configuration from the default path, or defaults if absent.
    pub fn load() -> Result<Self> {
        Self::load_from(Self::path()?)
    }

    /// Load configuration from `path`, or defaults if absent.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Check the embedded extractor and aggregator tables.
    pub fn validate(&self) -> Result<()> {
        self.extractor
            .validate()
            .map_err(|e| CliError::Config(format!("[extractor] {}", e)))?;
        self.aggregator
            .validate()
            .map_err(|e| CliError::Config(format!("[aggregator] {}", e)))?;
        if !self.home.to_location().is_valid() {
            return Err(CliError::Config(format!(
                "[home] invalid coordinates ({}, {})",
                self.home.latitude, self.home.longitude
            )));
        }
        Ok(())
    }

    /// Resolve the database path, falling back to `~/.mandi/mandi.db`.
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.settings.database {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::dir()?.join("mandi.db")),
        }
    }

    /// Identity to act as: the explicit one, else the configured default.
    pub fn user(&self, explicit: Option<&str>) -> Result<UserId> {
        explicit
            .or(self.settings.user.as_deref())
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(UserId::new)
            .ok_or_else(|| {
                CliError::InvalidInput(
                    "No user given. Pass --user or set settings.user in the config".to_string(),
                )
            })
    }
}

impl Home {
    /// The home location as a domain value.
    pub fn to_location(&self) -> Location {
        Location::new(self.latitude, self.longitude, "", &self.area, &self.city)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            database: None,
            user: None,
        }
    }
}

impl Default for Home {
    /// Central Delhi
    fn default() -> Self {
        Self {
            latitude: 28.6129,
            longitude: 77.2295,
            area: "Delhi".to_string(),
            city: "Delhi".to_string(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
