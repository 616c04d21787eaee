//! Change notifications
//!
//! A [`Notifier`] delivers the one-line status message when the excess flag
//! flips between runs. The Telegram bot API is the only backend.

use crate::config::Config;
use crate::error::{ExcessError, Result};
use crate::logging::get_logger;
use serde::{Deserialize, Serialize};

/// Message delivery backend
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &str) -> Result<()>;
}

#[derive(Debug, Clone, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
    disable_web_page_preview: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BotResponse {
    ok: Option<bool>,
    description: Option<String>,
}

/// Telegram bot notifier
pub struct TelegramNotifier {
    http: reqwest::Client,
    api_root: String,
    bot_id: String,
    chat_id: String,
    logger: crate::logging::StructuredLogger,
}

impl TelegramNotifier {
    pub fn new(
        http: reqwest::Client,
        api_root: impl Into<String>,
        bot_id: impl Into<String>,
        chat_id: impl Into<String>,
    ) -> Self {
        Self {
            http,
            api_root: api_root.into(),
            bot_id: bot_id.into(),
            chat_id: chat_id.into(),
            logger: get_logger("notify"),
        }
    }

    /// Notifier for the configured bot, or `None` when bot or recipient is unset
    pub fn from_config(http: reqwest::Client, config: &Config) -> Option<Self> {
        config.notifications_enabled().then(|| {
            Self::new(
                http,
                config.endpoints.telegram_root.clone(),
                config.bot_id.clone(),
                config.recipient.clone(),
            )
        })
    }

    fn send_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_root.trim_end_matches('/'),
            self.bot_id
        )
    }
}

#[async_trait::async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, message: &str) -> Result<()> {
        let body = SendMessage {
            chat_id: &self.chat_id,
            text: message,
            parse_mode: "markdown",
            disable_web_page_preview: true,
        };

        let resp = self.http.post(self.send_url()).json(&body).send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(ExcessError::api(format!(
                "telegram sendMessage returned {}: {}",
                status, text
            )));
        }

        // Telegram reports delivery problems in the body as well
        if let Ok(parsed) = serde_json::from_str::<BotResponse>(&text)
            && parsed.ok == Some(false)
        {
            return Err(ExcessError::api(format!(
                "telegram rejected message: {}",
                parsed.description.unwrap_or_default()
            )));
        }

        self.logger.info(&format!("Sent notification: {}", message));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    #[test]
    fn test_requires_bot_and_recipient() {
        let mut config = Config::default();
        config.bot_id = "123:abc".to_string();
        assert!(TelegramNotifier::from_config(reqwest::Client::new(), &config).is_none());
        config.recipient = "42".to_string();
        assert!(TelegramNotifier::from_config(reqwest::Client::new(), &config).is_some());
    }

    #[tokio::test]
    async fn test_send_message_payload() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/bot123:abc/sendMessage")
            .match_body(Matcher::Json(json!({
                "chat_id": "42",
                "text": "☀️ Excess",
                "parse_mode": "markdown",
                "disable_web_page_preview": true
            })))
            .with_status(200)
            .with_body(json!({"ok": true, "result": {}}).to_string())
            .create_async()
            .await;

        let notifier = TelegramNotifier::new(reqwest::Client::new(), server.url(), "123:abc", "42");
        notifier.notify("☀️ Excess").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_rejected_message_is_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/bot123:abc/sendMessage")
            .with_status(200)
            .with_body(json!({"ok": false, "description": "chat not found"}).to_string())
            .create_async()
            .await;

        let notifier = TelegramNotifier::new(reqwest::Client::new(), server.url(), "123:abc", "42");
        let err = notifier.notify("hi").await.unwrap_err();
        assert!(err.to_string().contains("chat not found"));
    }

    #[tokio::test]
    async fn test_http_error_is_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/bot123:abc/sendMessage")
            .with_status(403)
            .with_body(json!({"ok": false, "description": "Forbidden"}).to_string())
            .create_async()
            .await;

        let notifier = TelegramNotifier::new(reqwest::Client::new(), server.url(), "123:abc", "42");
        assert!(matches!(
            notifier.notify("hi").await,
            Err(ExcessError::Api { .. })
        ));
    }
}
