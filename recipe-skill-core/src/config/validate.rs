//! Configuration validation rules.

use super::schema::Config;
use crate::dialog::DialogTemplate;

/// Upper bound on `logging.retention_days` (100 years)
pub const MAX_RETENTION_DAYS: u64 = 36_500;

/// Validate configuration and return aggregated validation errors.
pub fn validate_config(config: &Config) -> crate::Result<()> {
    let mut errors = Vec::new();

    let base_url = config.api.base_url.trim();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        errors.push("api.base_url must be an http(s) URL".to_string());
    }
    if config.api.api_key.trim().is_empty() {
        errors.push("api.api_key must not be empty".to_string());
    }
    if config.api.timeout_secs == 0 {
        errors.push("api.timeout_secs must be > 0".to_string());
    }

    if config.sessions.max_sessions == Some(0) {
        errors.push("sessions.max_sessions must be > 0 when set".to_string());
    }

    if config.speech.default_meal_label.trim().is_empty() {
        errors.push("speech.default_meal_label must not be empty".to_string());
    }
    for name in config.speech.dialogs.keys() {
        if name.parse::<DialogTemplate>().is_err() {
            errors.push(format!("speech.dialogs.{} is not a known dialog template", name));
        }
    }

    if !matches!(config.logging.format.to_lowercase().as_str(), "text" | "json") {
        errors.push("logging.format must be 'text' or 'json'".to_string());
    }
    if config.logging.retention_days > MAX_RETENTION_DAYS {
        errors.push(format!("logging.retention_days must be <= {}", MAX_RETENTION_DAYS));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(crate::Error::Validation(errors.join("; ")))
    }
}
