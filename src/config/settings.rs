//! User settings for fxpro
//!
//! Manages preferences such as the default currency pair, the trend window,
//! remote API endpoints and session lifetime.

use serde::{Deserialize, Serialize};

use super::paths::FxPaths;
use crate::error::FxError;
use crate::models::{currency, CurrencyCode};

/// Environment variable that forces offline mode when set to `1` or `true`
pub const OFFLINE_ENV: &str = "FXPRO_OFFLINE";

/// Longest allowed session, one year
pub const MAX_SESSION_TTL_HOURS: u32 = 24 * 365;

/// Keys accepted by [`Settings::set`]
pub const SETTING_KEYS: &[&str] = &[
    "default_from",
    "default_to",
    "trend_days",
    "request_timeout_secs",
    "exchange_rate_api_url",
    "frankfurter_api_url",
    "offline",
    "session_ttl_hours",
    "history_limit",
    "min_password_length",
];

/// User settings for fxpro
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency converted from when none is given
    #[serde(default = "default_from")]
    pub default_from: String,

    /// Currency converted to when none is given
    #[serde(default = "default_to")]
    pub default_to: String,

    /// Number of days shown in the trend chart
    #[serde(default = "default_trend_days")]
    pub trend_days: u32,

    /// Connect and read timeout for API requests
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Base URL of exchangerate-api.com (latest rates)
    #[serde(default = "default_exchange_rate_api_url")]
    pub exchange_rate_api_url: String,

    /// Base URL of frankfurter.app (timeseries)
    #[serde(default = "default_frankfurter_api_url")]
    pub frankfurter_api_url: String,

    /// Skip the network and always use the mock rate table
    #[serde(default)]
    pub offline: bool,

    /// How long a login session stays valid
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: u32,

    /// Number of conversions shown by `history`
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Minimum accepted password length at registration
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_from() -> String {
    "USD".to_string()
}

fn default_to() -> String {
    "INR".to_string()
}

fn default_trend_days() -> u32 {
    30
}

fn default_request_timeout_secs() -> u64 {
    5
}

fn default_exchange_rate_api_url() -> String {
    "https://api.exchangerate-api.com/v4".to_string()
}

fn default_frankfurter_api_url() -> String {
    "https://api.frankfurter.app".to_string()
}

fn default_session_ttl_hours() -> u32 {
    12
}

fn default_history_limit() -> usize {
    20
}

fn default_min_password_length() -> usize {
    6
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            default_from: default_from(),
            default_to: default_to(),
            trend_days: default_trend_days(),
            request_timeout_secs: default_request_timeout_secs(),
            exchange_rate_api_url: default_exchange_rate_api_url(),
            frankfurter_api_url: default_frankfurter_api_url(),
            offline: false,
            session_ttl_hours: default_session_ttl_hours(),
            history_limit: default_history_limit(),
            min_password_length: default_min_password_length(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if the file doesn't exist
    pub fn load_or_create(paths: &FxPaths) -> Result<Self, FxError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| FxError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents)
                .map_err(|e| FxError::Config(format!("Failed to parse settings file: {}", e)))?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FxPaths) -> Result<(), FxError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| FxError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FxError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Check the settings for values the rest of the application cannot use
    pub fn validate(&self) -> Result<(), FxError> {
        currency::supported(&self.default_from)
            .map_err(|e| FxError::Config(format!("default_from: {}", e)))?;
        currency::supported(&self.default_to)
            .map_err(|e| FxError::Config(format!("default_to: {}", e)))?;

        if !(2..=365).contains(&self.trend_days) {
            return Err(FxError::Config(format!(
                "trend_days must be between 2 and 365, got {}",
                self.trend_days
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(FxError::Config("request_timeout_secs must be positive".into()));
        }
        for (name, url) in [
            ("exchange_rate_api_url", &self.exchange_rate_api_url),
            ("frankfurter_api_url", &self.frankfurter_api_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(FxError::Config(format!(
                    "{} must be an http(s) URL, got '{}'",
                    name, url
                )));
            }
        }
        if !(1..=MAX_SESSION_TTL_HOURS).contains(&self.session_ttl_hours) {
            return Err(FxError::Config(format!(
                "session_ttl_hours must be between 1 and {}, got {}",
                MAX_SESSION_TTL_HOURS, self.session_ttl_hours
            )));
        }
        if self.min_password_length == 0 {
            return Err(FxError::Config("min_password_length must be positive".into()));
        }

        Ok(())
    }

    /// Update a single setting by name, validating the result
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), FxError> {
        let mut updated = self.clone();
        let invalid = |e: &dyn std::fmt::Display| {
            FxError::Config(format!("Invalid value '{}' for {}: {}", value, key, e))
        };

        match key {
            "default_from" => updated.default_from = currency::supported(value)?.to_string(),
            "default_to" => updated.default_to = currency::supported(value)?.to_string(),
            "trend_days" => updated.trend_days = value.parse().map_err(|e| invalid(&e))?,
            "request_timeout_secs" => {
                updated.request_timeout_secs = value.parse().map_err(|e| invalid(&e))?
            }
            "exchange_rate_api_url" => {
                updated.exchange_rate_api_url = value.trim_end_matches('/').to_string()
            }
            "frankfurter_api_url" => {
                updated.frankfurter_api_url = value.trim_end_matches('/').to_string()
            }
            "offline" => updated.offline = value.parse().map_err(|e| invalid(&e))?,
            "session_ttl_hours" => {
                updated.session_ttl_hours = value.parse().map_err(|e| invalid(&e))?
            }
            "history_limit" => updated.history_limit = value.parse().map_err(|e| invalid(&e))?,
            "min_password_length" => {
                updated.min_password_length = value.parse().map_err(|e| invalid(&e))?
            }
            _ => {
                return Err(FxError::Config(format!(
                    "Unknown setting '{}'. Valid keys: {}",
                    key,
                    SETTING_KEYS.join(", ")
                )))
            }
        }

        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Whether rates should come from the mock table only
    ///
    /// True when the setting is on or `FXPRO_OFFLINE` is `1`/`true`.
    pub fn is_offline(&self) -> bool {
        self.offline
            || std::env::var(OFFLINE_ENV)
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false)
    }

    /// The default currency pair as parsed codes
    pub fn default_pair(&self) -> Result<(CurrencyCode, CurrencyCode), FxError> {
        Ok((
            currency::supported(&self.default_from)?,
            currency::supported(&self.default_to)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.default_from, "USD");
        assert_eq!(settings.default_to, "INR");
        assert_eq!(settings.trend_days, 30);
        assert_eq!(settings.request_timeout_secs, 5);
        assert_eq!(settings.min_password_length, 6);
        assert!(!settings.offline);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FxPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.default_to = "EUR".into();
        settings.trend_days = 14;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.default_to, "EUR");
        assert_eq!(loaded.trend_days, 14);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"default_to": "GBP"}"#).unwrap();
        assert_eq!(settings.default_to, "GBP");
        assert_eq!(settings.default_from, "USD");
        assert_eq!(settings.history_limit, 20);
    }

    #[test]
    fn test_set_valid_values() {
        let mut settings = Settings::default();
        settings.set("default_from", "eur").unwrap();
        settings.set("trend_days", "7").unwrap();
        settings.set("offline", "true").unwrap();
        settings.set("frankfurter_api_url", "http://localhost:9000/").unwrap();

        assert_eq!(settings.default_from, "EUR");
        assert_eq!(settings.trend_days, 7);
        assert!(settings.offline);
        assert_eq!(settings.frankfurter_api_url, "http://localhost:9000");
    }

    #[test]
    fn test_set_rejects_invalid_values() {
        let mut settings = Settings::default();
        assert!(settings.set("trend_days", "1").is_err());
        assert!(settings.set("trend_days", "abc").is_err());
        assert!(settings.set("default_to", "EURO").is_err());
        assert!(settings.set("exchange_rate_api_url", "ftp://x").is_err());
        assert!(settings.set("colour", "blue").is_err());
        assert!(settings.set("session_ttl_hours", "0").is_err());
        assert!(settings.set("session_ttl_hours", "4294967295").is_err());

        // Failed updates leave the settings untouched
        assert_eq!(settings.trend_days, 30);
        assert_eq!(settings.default_to, "INR");
        assert_eq!(settings.session_ttl_hours, 12);
    }

    #[test]
    fn test_default_pair_must_be_in_catalog() {
        let mut settings = Settings::default();
        let err = settings.set("default_to", "XAU").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(settings.default_to, "INR");

        settings.default_from = "XAU".into();
        assert!(settings.validate().is_err());
        assert!(settings.default_pair().is_err());
    }

    #[test]
    fn test_session_ttl_upper_bound() {
        let mut settings = Settings::default();
        settings
            .set("session_ttl_hours", &MAX_SESSION_TTL_HOURS.to_string())
            .unwrap();
        assert_eq!(settings.session_ttl_hours, MAX_SESSION_TTL_HOURS);
    }
}
