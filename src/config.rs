//! Configuration loading and management
//!
//! Handles parsing of `.gigdash.toml` configuration files.

use std::path::{Path, PathBuf};

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Config file name looked up in the working directory
pub const CONFIG_FILE: &str = ".gigdash.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Snapshot location and scoping
    #[serde(default)]
    pub data: DataConfig,

    /// Rollup parameters
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Calendar convention
    #[serde(default)]
    pub time: TimeConfig,
}

/// Snapshot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Snapshot file, relative to the config directory
    #[serde(default = "default_snapshot")]
    pub snapshot: PathBuf,

    /// Only roll up projects owned by this user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

fn default_snapshot() -> PathBuf {
    PathBuf::from("gigdash.json")
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            snapshot: default_snapshot(),
            user: None,
        }
    }
}

/// Rollup configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Number of calendar months in the monthly series
    #[serde(default = "default_window_months")]
    pub window_months: u32,

    /// Number of clients kept in the ranking
    #[serde(default = "default_top_clients")]
    pub top_clients: usize,

    /// Horizon for the "due this week" count
    #[serde(default = "default_due_soon_days")]
    pub due_soon_days: u32,
}

fn default_window_months() -> u32 {
    6
}

fn default_top_clients() -> usize {
    5
}

fn default_due_soon_days() -> u32 {
    7
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            window_months: default_window_months(),
            top_clients: default_top_clients(),
            due_soon_days: default_due_soon_days(),
        }
    }
}

/// Time configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeConfig {
    /// UTC offset defining calendar days and months
    #[serde(default = "default_utc_offset")]
    pub utc_offset: String,
}

fn default_utc_offset() -> String {
    "+00:00".to_string()
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            utc_offset: default_utc_offset(),
        }
    }
}

impl TimeConfig {
    /// Parsed calendar offset
    pub fn offset(&self) -> Result<FixedOffset> {
        parse_utc_offset(&self.utc_offset)
    }
}

/// Parse `Z`, `UTC`, `+HH:MM`, `-HH:MM` or `+HHMM`.
pub fn parse_utc_offset(value: &str) -> Result<FixedOffset> {
    let trimmed = value.trim();
    let invalid = || {
        Error::InvalidConfig(format!(
            "time.utc_offset: invalid offset '{value}' (expected Z, UTC or +HH:MM)"
        ))
    };

    if trimmed.eq_ignore_ascii_case("z") || trimmed.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).ok_or_else(invalid);
    }

    trimmed.parse::<FixedOffset>().map_err(|_| invalid())
}

impl AnalyticsConfig {
    fn validate(&self) -> Result<()> {
        if self.window_months == 0 || self.window_months > 120 {
            return Err(Error::InvalidConfig(
                "analytics.window_months must be between 1 and 120".to_string(),
            ));
        }
        if self.top_clients == 0 {
            return Err(Error::InvalidConfig(
                "analytics.top_clients must be >= 1".to_string(),
            ));
        }
        if self.due_soon_days == 0 || self.due_soon_days > 365 {
            return Err(Error::InvalidConfig(
                "analytics.due_soon_days must be between 1 and 365".to_string(),
            ));
        }
        Ok(())
    }
}

impl DataConfig {
    fn validate(&self) -> Result<()> {
        if self.snapshot.as_os_str().is_empty() {
            return Err(Error::InvalidConfig(
                "data.snapshot cannot be empty".to_string(),
            ));
        }
        if let Some(user) = &self.user {
            if user.trim().is_empty() {
                return Err(Error::InvalidConfig(
                    "data.user cannot be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from a `.gigdash.toml` file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a directory, or return defaults when absent
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            tracing::debug!(path = %config_path.display(), "loading config");
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Snapshot path resolved against the config directory
    pub fn snapshot_path(&self, dir: &Path) -> PathBuf {
        if self.data.snapshot.is_absolute() {
            self.data.snapshot.clone()
        } else {
            dir.join(&self.data.snapshot)
        }
    }

    fn validate(&self) -> Result<()> {
        self.data.validate()?;
        self.analytics.validate()?;
        self.time.offset()?;
        Ok(())
    }
}
