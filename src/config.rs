//! Configuration loading and management
//!
//! Handles parsing of `.taskboard.toml` configuration files.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::calendar::DisplayLocale;
use crate::error::{Error, Result};
use crate::notify::{NotificationRules, DEFAULT_DEADLINE_WINDOW_DAYS};
use crate::rules::OverdueRule;

pub const CONFIG_FILE: &str = ".taskboard.toml";

const MAX_DEADLINE_WINDOW_DAYS: u32 = 365;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Task file used when `--tasks` is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks_file: Option<PathBuf>,

    /// Notification configuration
    #[serde(default)]
    pub notifications: NotificationsConfig,

    /// Display configuration
    #[serde(default)]
    pub display: DisplayConfig,

    /// Optional status rules
    #[serde(default)]
    pub rules: RulesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Open tasks due within this many days get a deadline notification
    #[serde(default = "default_deadline_window_days")]
    pub deadline_window_days: u32,

    /// Notifications shown in the dashboard panel
    #[serde(default = "default_preview_limit")]
    pub preview_limit: usize,
}

fn default_deadline_window_days() -> u32 {
    DEFAULT_DEADLINE_WINDOW_DAYS
}

fn default_preview_limit() -> usize {
    3
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            deadline_window_days: default_deadline_window_days(),
            preview_limit: default_preview_limit(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Locale used to format due dates
    #[serde(default)]
    pub locale: DisplayLocale,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Treat open tasks past their due day as overdue
    #[serde(default)]
    pub auto_overdue: bool,
}

impl Config {
    /// Load configuration from a `.taskboard.toml` file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load configuration from a directory, or return defaults
    pub fn load_from_dir(dir: &Path) -> Self {
        let config_path = dir.join(CONFIG_FILE);
        if !config_path.exists() {
            return Self::default();
        }
        match Self::load(&config_path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(
                    path = %config_path.display(),
                    error = %err,
                    "ignoring invalid config"
                );
                Self::default()
            }
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// `tasks_file` with a relative path resolved against `config_dir`,
    /// the directory holding the config file it was read from.
    pub fn resolve_tasks_file(&self, config_dir: &Path) -> Option<PathBuf> {
        self.tasks_file.as_ref().map(|path| {
            if path.is_absolute() {
                path.clone()
            } else {
                config_dir.join(path)
            }
        })
    }

    pub fn notification_rules(&self) -> NotificationRules {
        NotificationRules {
            deadline_window_days: self.notifications.deadline_window_days,
            overdue: OverdueRule::from_flag(self.rules.auto_overdue),
        }
    }

    fn validate(&self) -> Result<()> {
        self.notifications.validate()?;
        if let Some(path) = &self.tasks_file {
            if path.as_os_str().is_empty() {
                return Err(Error::InvalidConfig("tasks_file cannot be empty".to_string()));
            }
        }
        Ok(())
    }
}

impl NotificationsConfig {
    fn validate(&self) -> Result<()> {
        if self.deadline_window_days > MAX_DEADLINE_WINDOW_DAYS {
            return Err(Error::InvalidConfig(format!(
                "notifications.deadline_window_days must be <= {MAX_DEADLINE_WINDOW_DAYS}"
            )));
        }
        if self.preview_limit == 0 {
            return Err(Error::InvalidConfig(
                "notifications.preview_limit must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}
