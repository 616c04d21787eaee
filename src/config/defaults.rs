use super::*;

/// Monitoring portal the station is registered with
pub const DEFAULT_PORTAL_ROOT: &str = "https://www.sunways-portal.com";

/// Telegram bot API
pub const DEFAULT_TELEGRAM_ROOT: &str = "https://api.telegram.org";

/// Code the portal answers with once a session token stops being accepted
pub const DEFAULT_SESSION_EXPIRED_CODE: &str = "3010022";

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            portal_root: DEFAULT_PORTAL_ROOT.to_string(),
            telegram_root: DEFAULT_TELEGRAM_ROOT.to_string(),
            http_timeout_secs: 10,
            session_expired_codes: vec![DEFAULT_SESSION_EXPIRED_CODE.to_string()],
            login_channel: "1".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "INFO".to_string(),
            file: String::new(),
            backup_count: 5,
            console_output: true,
            json_format: false,
        }
    }
}
