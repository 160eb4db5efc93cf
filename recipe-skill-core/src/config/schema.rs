//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Root configuration for recipe-skill
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Recipe API configuration
    #[serde(default)]
    pub api: ApiConfig,
    /// Session store configuration
    #[serde(default)]
    pub sessions: SessionsConfig,
    /// Speech output configuration
    #[serde(default)]
    pub speech: SpeechConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// TheMealDB API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API root, without the key segment
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
    /// API key path segment ("1" is the public demo key)
    #[serde(default = "default_api_key")]
    pub api_key: String,
    /// Request timeout in seconds
    #[serde(default = "default_api_timeout")]
    pub timeout_secs: u64,
}

fn default_api_base_url() -> String {
    "https://www.themealdb.com/api/json/v1".to_string()
}

fn default_api_key() -> String {
    "1".to_string()
}

fn default_api_timeout() -> u64 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            api_key: default_api_key(),
            timeout_secs: default_api_timeout(),
        }
    }
}

/// Session store configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SessionsConfig {
    /// Maximum number of users kept in memory; unbounded when unset
    #[serde(default)]
    pub max_sessions: Option<usize>,
}

/// Speech output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Name spoken when a recipe has no display name
    #[serde(default = "default_meal_label")]
    pub default_meal_label: String,
    /// Spell out unit abbreviations in ingredient measures
    #[serde(default)]
    pub beautify_units: bool,
    /// Template text overrides keyed by template name
    #[serde(default)]
    pub dialogs: HashMap<String, String>,
}

fn default_meal_label() -> String {
    "the meal".to_string()
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            default_meal_label: default_meal_label(),
            beautify_units: false,
            dialogs: HashMap::new(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (text, json)
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Directory for log files
    #[serde(default = "default_log_dir")]
    pub dir: String,
    /// Days to keep rotated log files
    #[serde(default = "default_retention_days")]
    pub retention_days: u64,
    /// Module-specific overrides
    #[serde(default)]
    pub overrides: HashMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_retention_days() -> u64 {
    7
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            dir: default_log_dir(),
            retention_days: default_retention_days(),
            overrides: HashMap::new(),
        }
    }
}
