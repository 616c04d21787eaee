//! Error types for excess-watch
//!
//! One error enum covers every stage of a polling cycle. The variants double
//! as the failure taxonomy the cycle uses to decide whether a run aborts,
//! is skipped, or carries on.

use thiserror::Error;

/// Result type alias for excess-watch operations
pub type Result<T> = std::result::Result<T, ExcessError>;

/// Main error type for excess-watch
#[derive(Debug, Error)]
pub enum ExcessError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Validation errors
    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    /// File I/O errors
    #[error("I/O error: {message}")]
    Io { message: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Transport-level HTTP failures
    #[error("Network error: {message}")]
    Network { message: String },

    /// Remote API answered with an unexpected status or body
    #[error("API error: {message}")]
    Api { message: String },

    /// Portal replied with a code we do not handle and no overview payload
    #[error("Portal error: code {code} - {message}")]
    Portal { code: String, message: String },

    /// Login against the portal failed
    #[error("Login failed: {message}")]
    LoginFailed { message: String },

    /// Portal rejected the session token
    #[error("Session expired (portal code {code})")]
    SessionExpired { code: String },

    /// Every inverter of the station reports offline
    #[error("Station {station_id} offline: all inverters report offline")]
    Offline { station_id: String },
}

impl ExcessError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        ExcessError::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        ExcessError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        ExcessError::Io {
            message: message.into(),
        }
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        ExcessError::Network {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        ExcessError::Api {
            message: message.into(),
        }
    }

    /// Create a new portal error
    pub fn portal<S: Into<String>>(code: S, message: S) -> Self {
        ExcessError::Portal {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Create a new login error
    pub fn login_failed<S: Into<String>>(message: S) -> Self {
        ExcessError::LoginFailed {
            message: message.into(),
        }
    }

    /// Create a new session expiry error
    pub fn session_expired<S: Into<String>>(code: S) -> Self {
        ExcessError::SessionExpired { code: code.into() }
    }

    /// Create a new offline error
    pub fn offline<S: Into<String>>(station_id: S) -> Self {
        ExcessError::Offline {
            station_id: station_id.into(),
        }
    }

    /// Whether the next scheduled run is expected to clear this condition
    /// without intervention.
    pub fn is_transient(&self) -> bool {
        matches!(self, ExcessError::Offline { .. })
    }
}

impl From<std::io::Error> for ExcessError {
    fn from(err: std::io::Error) -> Self {
        ExcessError::io(err.to_string())
    }
}

impl From<serde_yaml::Error> for ExcessError {
    fn from(err: serde_yaml::Error) -> Self {
        ExcessError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ExcessError {
    fn from(err: serde_json::Error) -> Self {
        ExcessError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for ExcessError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ExcessError::Serialization {
                message: err.to_string(),
            }
        } else {
            ExcessError::network(err.to_string())
        }
    }
}
