//! Spreadsheet webhook forwarding
//!
//! Appends each reading as a row through a Sheety-style webhook. Forwarding is
//! best effort: the caller logs failures and moves on.

use crate::config::Config;
use crate::error::{ExcessError, Result};
use crate::logging::get_logger;
use crate::reading::Reading;
use reqwest::header::AUTHORIZATION;
use serde::Serialize;

/// One spreadsheet row. Values are in kW despite the column names.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetRow<'a> {
    pub date: &'a str,
    pub excess_watts: f64,
    pub usage_watts: f64,
    pub solar_watts: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SheetPayload<'a> {
    pub sheet1: SheetRow<'a>,
}

impl<'a> From<&'a Reading> for SheetPayload<'a> {
    fn from(reading: &'a Reading) -> Self {
        Self {
            sheet1: SheetRow {
                date: &reading.date,
                excess_watts: reading.excess,
                usage_watts: reading.usage,
                solar_watts: reading.solar,
            },
        }
    }
}

/// Webhook forwarder
pub struct SheetForwarder {
    http: reqwest::Client,
    url: String,
    auth: String,
    logger: crate::logging::StructuredLogger,
}

impl SheetForwarder {
    pub fn new(http: reqwest::Client, url: impl Into<String>, auth: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
            auth: auth.into(),
            logger: get_logger("sheet"),
        }
    }

    /// Forwarder for the configured webhook, or `None` when no URL is set
    pub fn from_config(http: reqwest::Client, config: &Config) -> Option<Self> {
        config
            .forwarding_enabled()
            .then(|| Self::new(http, config.sheety_url.clone(), config.sheety_auth.clone()))
    }

    /// Post one reading as a row
    pub async fn forward(&self, reading: &Reading) -> Result<()> {
        let mut req = self.http.post(&self.url).json(&SheetPayload::from(reading));
        if !self.auth.is_empty() {
            req = req.header(AUTHORIZATION, self.auth.as_str());
        }

        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ExcessError::api(format!(
                "sheet webhook returned {}: {}",
                status, body
            )));
        }

        self.logger.debug(&format!("Forwarded reading {}", reading.date));
        Ok(())
    }
}
