//! Configuration management for excess-watch
//!
//! The configuration file is a flat JSON object of credentials and
//! identifiers, with two optional nested sections (`endpoints`, `logging`).
//! Files ending in `.yaml`/`.yml` are read as YAML instead. Every field is
//! optional and falls back to its default, which for the credentials is the
//! empty string; an empty credential disables the feature that needs it.

use crate::error::{ExcessError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

mod defaults;

pub use defaults::{DEFAULT_PORTAL_ROOT, DEFAULT_SESSION_EXPIRED_CODE, DEFAULT_TELEGRAM_ROOT};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Portal identifier of the monitored station
    pub station_id: String,

    /// Telegram bot token (the part after `/bot` in API URLs)
    pub bot_id: String,

    /// Telegram chat id receiving notifications
    pub recipient: String,

    /// Spreadsheet webhook URL; empty disables forwarding
    pub sheety_url: String,

    /// Raw `Authorization` header value for the webhook
    pub sheety_auth: String,

    /// Portal account email
    pub email: String,

    /// Portal account password, as the portal's login form submits it
    pub password: String,

    /// Login salt value expected by the portal
    pub salt: String,

    /// Remote endpoints and HTTP behavior
    pub endpoints: EndpointsConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Remote endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointsConfig {
    /// Base URL of the monitoring portal
    pub portal_root: String,

    /// Base URL of the Telegram bot API
    pub telegram_root: String,

    /// Timeout applied to every HTTP request, in seconds
    pub http_timeout_secs: u64,

    /// Portal response codes meaning the session token is no longer valid
    pub session_expired_codes: Vec<String>,

    /// Channel identifier sent with the login request
    pub login_channel: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    pub level: String,

    /// Log file path or directory; empty logs to console only.
    ///
    /// With an extension, the file stem becomes the rotation prefix
    /// (`solar.log` rotates as `solar.<date>.log`). Without one, the path is
    /// a directory holding `excess-watch.<date>.log`.
    pub file: String,

    /// Number of rotated log files to keep
    pub backup_count: u32,

    /// Whether to log to console when file logging is enabled
    pub console_output: bool,

    /// Whether to use JSON format
    pub json_format: bool,
}

impl Config {
    /// Load configuration from a JSON or YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ExcessError::config(format!(
                "Cannot open configuration file {}: {}",
                path.display(),
                e
            ))
        })?;

        if contents.trim().is_empty() {
            return Ok(Config::default());
        }

        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

        let config: Config = if is_yaml {
            serde_yaml::from_str(&contents)?
        } else {
            serde_json::from_str(&contents)?
        };
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.station_id.trim().is_empty() {
            return Err(ExcessError::validation(
                "station_id",
                "Station id cannot be empty",
            ));
        }

        if self.endpoints.portal_root.trim().is_empty() {
            return Err(ExcessError::validation(
                "endpoints.portal_root",
                "Portal root URL cannot be empty",
            ));
        }

        if self.endpoints.http_timeout_secs == 0 {
            return Err(ExcessError::validation(
                "endpoints.http_timeout_secs",
                "Must be greater than 0",
            ));
        }

        Ok(())
    }

    /// Whether readings should be forwarded to the spreadsheet webhook
    pub fn forwarding_enabled(&self) -> bool {
        !self.sheety_url.is_empty()
    }

    /// Whether change notifications can be delivered
    pub fn notifications_enabled(&self) -> bool {
        !self.bot_id.is_empty() && !self.recipient.is_empty()
    }
}

impl EndpointsConfig {
    /// HTTP timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Whether a portal response code signals an expired session
    pub fn is_session_expired(&self, code: &str) -> bool {
        self.session_expired_codes.iter().any(|c| c == code)
    }
}

/// Build the HTTP client shared by every outbound call of a cycle
pub fn build_http_client(endpoints: &EndpointsConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(endpoints.timeout())
        .user_agent(concat!("excess-watch/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ExcessError::config(format!("Failed to build HTTP client: {}", e)))
}
