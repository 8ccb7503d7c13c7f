//! Service configuration loaded from environment variables.

use std::env;

use crate::schedule::{ApiLevel, LaunchSchedule};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Server bind address (e.g., "127.0.0.1:8080")
    pub bind_address: String,

    /// Level assumed for requests that declare none
    pub default_api_level: ApiLevel,

    /// Replaces the built-in launch schedule when set
    pub launch_schedule: Option<LaunchSchedule>,

    /// Allow cross-origin requests from anywhere
    pub cors_allow_any: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".into(),
            default_api_level: 1,
            launch_schedule: None,
            cors_allow_any: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            bind_address: lookup("BIND_ADDRESS").unwrap_or(defaults.bind_address),
            default_api_level: match lookup("DEFAULT_API_LEVEL") {
                Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
                    var: "DEFAULT_API_LEVEL",
                    value: value.clone(),
                    reason: "expected a non-negative integer".into(),
                })?,
                None => defaults.default_api_level,
            },
            launch_schedule: lookup("LAUNCH_SCHEDULE")
                .map(|value| parse_schedule(&value))
                .transpose()?,
            cors_allow_any: match lookup("CORS_ALLOW_ANY") {
                Some(value) => parse_bool("CORS_ALLOW_ANY", &value)?,
                None => defaults.cors_allow_any,
            },
        })
    }
}

/// Parses `Name=Level;Name=Level`.
pub fn parse_schedule(value: &str) -> Result<LaunchSchedule, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        var: "LAUNCH_SCHEDULE",
        value: value.to_string(),
        reason,
    };

    let mut entries = Vec::new();
    for entry in value.split(';').map(str::trim).filter(|e| !e.is_empty()) {
        let (name, level) = entry
            .split_once('=')
            .ok_or_else(|| invalid(format!("entry '{}' is not Name=Level", entry)))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(invalid(format!("entry '{}' has no variant name", entry)));
        }
        let level: ApiLevel = level
            .trim()
            .parse()
            .map_err(|_| invalid(format!("level '{}' is not a non-negative integer", level.trim())))?;
        entries.push((name.to_string(), level));
    }
    Ok(LaunchSchedule::new(entries))
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var,
            value: value.to_string(),
            reason: "expected a boolean".into(),
        }),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}
