//! Configuration file support

use murmur_core::{DelayRange, SEED_MESSAGE, SessionConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::theme::ThemeMode;

/// Configuration for murmur
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Saved theme preference; absent until the user toggles it
    pub theme: Option<ThemeMode>,
    /// Override for the opening assistant message
    pub seed_message: Option<String>,
    /// Lower bound of the reply delay, inclusive
    pub reply_delay_min_ms: u64,
    /// Upper bound of the reply delay, exclusive
    pub reply_delay_max_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        let delay = DelayRange::default();
        Self {
            theme: None,
            seed_message: None,
            reply_delay_min_ms: delay.min.as_millis() as u64,
            reply_delay_max_ms: delay.max.as_millis() as u64,
        }
    }
}

impl Config {
    /// Get the config directory
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("murmur")
    }

    /// Get the config file path
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("MURMUR_CONFIG_PATH") {
            return PathBuf::from(path);
        }
        Self::config_dir().join("config.toml")
    }

    /// Load config from the default location
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load config from a file, falling back to defaults on any failure
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to parse config file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let content = toml::to_string_pretty(self).map_err(std::io::Error::other)?;
        fs::write(path, content)
    }

    /// Create a default config file if it doesn't exist
    pub fn init() -> std::io::Result<PathBuf> {
        let path = Self::config_path();
        if path.exists() {
            return Ok(path);
        }
        Self::default().save_to(&path)?;
        Ok(path)
    }

    /// Persist only the theme preference, keeping everything else on disk as-is
    pub fn store_theme(path: &Path, mode: ThemeMode) -> std::io::Result<()> {
        let mut config = Self::load_from(path);
        config.theme = Some(mode);
        config.save_to(path)
    }

    /// Session settings derived from this config
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            seed_message: self
                .seed_message
                .clone()
                .unwrap_or_else(|| SEED_MESSAGE.to_string()),
            reply_delay: DelayRange::from_millis(
                self.reply_delay_min_ms,
                self.reply_delay_max_ms,
            ),
        }
    }
}

/// Example config file contents
pub fn example_config() -> &'static str {
    r#"# murmur configuration

# Saved theme: "light" or "dark". Written by /theme.
# theme = "dark"

# Opening assistant message
# seed_message = "Hello! I'm your AI assistant. How can I help you today?"

# Reply delay window in milliseconds, [min, max)
reply_delay_min_ms = 1500
reply_delay_max_ms = 3000
"#
}
