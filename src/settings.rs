//! Settings form model.
//!
//! Holds what the settings page edits. Saving only validates, logs and
//! serializes; there is no backend to send it to.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Settings validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: u8,
        min: u8,
        max: u8,
    },

    #[error("{field} must be a multiple of {step}, got {value}")]
    OffStep {
        field: &'static str,
        value: u8,
        step: u8,
    },

    #[error("{field} must be one of the offered options, got {value}")]
    NotAnOption {
        field: &'static str,
        value: String,
    },

    #[error("Invalid email recipient: {0}")]
    InvalidRecipient(String),

    #[error("Settings JSON error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        SettingsError::Serialization(err.to_string())
    }
}

/// Slider bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderRange {
    pub min: u8,
    pub max: u8,
    pub step: u8,
}

pub const RISK_THRESHOLD_RANGE: SliderRange = SliderRange {
    min: 0,
    max: 100,
    step: 5,
};

pub const AI_SENSITIVITY_RANGE: SliderRange = SliderRange {
    min: 50,
    max: 100,
    step: 5,
};

impl SliderRange {
    fn check(&self, field: &'static str, value: u8) -> Result<(), SettingsError> {
        if value < self.min || value > self.max {
            return Err(SettingsError::OutOfRange {
                field,
                value,
                min: self.min,
                max: self.max,
            });
        }
        if (value - self.min) % self.step != 0 {
            return Err(SettingsError::OffStep {
                field,
                value,
                step: self.step,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ModelVersion {
    #[default]
    #[serde(rename = "v2.1")]
    V2_1,
    #[serde(rename = "v2.0")]
    V2_0,
    #[serde(rename = "v1.9")]
    V1_9,
}

impl ModelVersion {
    pub fn label(&self) -> &'static str {
        match self {
            ModelVersion::V2_1 => "v2.1 (Latest)",
            ModelVersion::V2_0 => "v2.0 (Stable)",
            ModelVersion::V1_9 => "v1.9 (Legacy)",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AlertFrequency {
    #[default]
    Immediate,
    Hourly,
    Daily,
    Weekly,
}

impl AlertFrequency {
    pub fn label(&self) -> &'static str {
        match self {
            AlertFrequency::Immediate => "Immediate",
            AlertFrequency::Hourly => "Hourly Digest",
            AlertFrequency::Daily => "Daily Summary",
            AlertFrequency::Weekly => "Weekly Report",
        }
    }
}

/// A dropdown whose options are either a number or "unlimited"
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Limit {
    Value(u32),
    Unlimited,
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Value(value) => write!(f, "{value}"),
            Limit::Unlimited => f.write_str("unlimited"),
        }
    }
}

fn check_option<T>(field: &'static str, value: T, options: &[T]) -> Result<(), SettingsError>
where
    T: PartialEq + fmt::Display,
{
    if options.contains(&value) {
        Ok(())
    } else {
        Err(SettingsError::NotAnOption {
            field,
            value: value.to_string(),
        })
    }
}

pub const SESSION_TIMEOUT_OPTIONS: [u32; 5] = [15, 30, 60, 120, 480];
pub const DATA_RETENTION_OPTIONS: [Limit; 5] = [
    Limit::Value(30),
    Limit::Value(90),
    Limit::Value(180),
    Limit::Value(365),
    Limit::Unlimited,
];
pub const API_RATE_LIMIT_OPTIONS: [Limit; 5] = [
    Limit::Value(100),
    Limit::Value(500),
    Limit::Value(1000),
    Limit::Value(5000),
    Limit::Unlimited,
];

/// Everything on the settings page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    // Detection
    pub model_version: ModelVersion,
    pub risk_threshold: u8,
    pub ai_sensitivity: u8,
    pub auto_block: bool,

    // Notifications
    pub alert_frequency: AlertFrequency,
    pub email_alerts: bool,
    pub sms_alerts: bool,
    pub push_notifications: bool,
    pub email_recipients: String,

    // Security
    pub two_factor_auth: bool,
    pub session_timeout_minutes: u32,
    pub ip_whitelist: bool,
    pub allowed_ips: String,

    // System
    pub data_retention_days: Limit,
    pub api_rate_limit_per_hour: Limit,
    pub maintenance_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model_version: ModelVersion::V2_1,
            risk_threshold: 75,
            ai_sensitivity: 85,
            auto_block: true,
            alert_frequency: AlertFrequency::Immediate,
            email_alerts: true,
            sms_alerts: false,
            push_notifications: true,
            email_recipients: String::new(),
            two_factor_auth: true,
            session_timeout_minutes: 30,
            ip_whitelist: true,
            allowed_ips: String::new(),
            data_retention_days: Limit::Value(90),
            api_rate_limit_per_hour: Limit::Value(1000),
            maintenance_mode: false,
        }
    }
}

impl Settings {
    /// Comma-separated recipients, trimmed, blanks dropped
    pub fn recipients(&self) -> Vec<&str> {
        self.email_recipients
            .split(',')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .collect()
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        RISK_THRESHOLD_RANGE.check("risk_threshold", self.risk_threshold)?;
        AI_SENSITIVITY_RANGE.check("ai_sensitivity", self.ai_sensitivity)?;
        check_option(
            "session_timeout_minutes",
            self.session_timeout_minutes,
            &SESSION_TIMEOUT_OPTIONS,
        )?;
        check_option("data_retention_days", self.data_retention_days, &DATA_RETENTION_OPTIONS)?;
        check_option(
            "api_rate_limit_per_hour",
            self.api_rate_limit_per_hour,
            &API_RATE_LIMIT_OPTIONS,
        )?;
        if let Some(bad) = self.recipients().into_iter().find(|r| !r.contains('@')) {
            return Err(SettingsError::InvalidRecipient(bad.to_string()));
        }
        Ok(())
    }

    /// Restore every field to its default
    pub fn reset(&mut self) {
        log::info!("resetting settings to defaults");
        *self = Settings::default();
    }

    /// Validate and serialize for saving
    pub fn save(&self) -> Result<String, SettingsError> {
        self.validate()?;
        let json = serde_json::to_string_pretty(self)?;
        log::info!("saving settings ({} bytes)", json.len());
        Ok(json)
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.risk_threshold, 75);
        assert_eq!(settings.ai_sensitivity, 85);
        assert_eq!(settings.model_version.label(), "v2.1 (Latest)");
    }

    #[test]
    fn test_slider_bounds() {
        let mut settings = Settings::default();
        settings.ai_sensitivity = 45;
        assert_eq!(
            settings.validate(),
            Err(SettingsError::OutOfRange {
                field: "ai_sensitivity",
                value: 45,
                min: 50,
                max: 100,
            })
        );

        settings.ai_sensitivity = 50;
        settings.risk_threshold = 72;
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::OffStep { field: "risk_threshold", .. })
        ));

        settings.risk_threshold = 0;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_recipients() {
        let mut settings = Settings::default();
        settings.email_recipients = "admin@company.com, , security@company.com".to_string();
        assert_eq!(
            settings.recipients(),
            vec!["admin@company.com", "security@company.com"]
        );
        assert!(settings.validate().is_ok());

        settings.email_recipients = "admin@company.com, security".to_string();
        assert_eq!(
            settings.validate(),
            Err(SettingsError::InvalidRecipient("security".to_string()))
        );
    }

    #[test]
    fn test_save_and_reload() {
        let mut settings = Settings::default();
        settings.sms_alerts = true;
        settings.data_retention_days = Limit::Unlimited;
        settings.model_version = ModelVersion::V1_9;

        let json = settings.save().unwrap();
        assert!(json.contains("\"v1.9\""));
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_save_rejects_invalid() {
        let mut settings = Settings::default();
        settings.risk_threshold = 101;
        assert!(settings.save().is_err());
        assert!(matches!(
            Settings::from_json("{not json"),
            Err(SettingsError::Serialization(_))
        ));
    }

    #[test]
    fn test_reset() {
        let mut settings = Settings::default();
        settings.maintenance_mode = true;
        settings.session_timeout_minutes = 480;
        settings.reset();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_dropdown_values_must_be_offered() {
        let mut settings = Settings::default();
        settings.session_timeout_minutes = 17;
        assert_eq!(
            settings.validate(),
            Err(SettingsError::NotAnOption {
                field: "session_timeout_minutes",
                value: "17".to_string(),
            })
        );

        settings.session_timeout_minutes = 480;
        settings.data_retention_days = Limit::Value(45);
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::NotAnOption { field: "data_retention_days", .. })
        ));

        settings.data_retention_days = Limit::Unlimited;
        settings.api_rate_limit_per_hour = Limit::Value(250);
        assert!(settings.save().is_err());

        settings.api_rate_limit_per_hour = Limit::Unlimited;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_from_json_rejects_unoffered_timeout() {
        let mut json: serde_json::Value =
            serde_json::from_str(&Settings::default().save().unwrap()).unwrap();
        json["session_timeout_minutes"] = serde_json::json!(17);
        let err = Settings::from_json(&json.to_string()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "session_timeout_minutes must be one of the offered options, got 17"
        );
        assert_eq!(Limit::Unlimited.to_string(), "unlimited");
    }

    #[test]
    fn test_option_lists_contain_defaults() {
        let settings = Settings::default();
        assert!(SESSION_TIMEOUT_OPTIONS.contains(&settings.session_timeout_minutes));
        assert!(DATA_RETENTION_OPTIONS.contains(&settings.data_retention_days));
        assert!(API_RATE_LIMIT_OPTIONS.contains(&settings.api_rate_limit_per_hour));
        assert_eq!(AlertFrequency::Hourly.label(), "Hourly Digest");
    }
}
