use crate::config::{Config, EndpointsConfig};
use crate::error::{ExcessError, Result};
use crate::logging::get_logger;
use crate::portal::types::{LoginRequest, LoginResponse, StationOverview};
use crate::reading::Reading;
use reqwest::header::AUTHORIZATION;

const OVERVIEW_PATH: &str = "/api/sys/curve/station/getSingleStationOverview";
const LOGIN_PATH: &str = "/api/sys/login/manager";

/// Monitoring portal client for a single station
pub struct PortalClient {
    http: reqwest::Client,
    endpoints: EndpointsConfig,
    station_id: String,
    email: String,
    password: String,
    salt: String,
    logger: crate::logging::StructuredLogger,
}

impl PortalClient {
    /// Create a portal client from configuration
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        let logger = get_logger("portal");
        Self {
            http,
            endpoints: config.endpoints.clone(),
            station_id: config.station_id.clone(),
            email: config.email.clone(),
            password: config.password.clone(),
            salt: config.salt.clone(),
            logger,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoints.portal_root.trim_end_matches('/'), path)
    }

    /// Fetch the current station reading.
    ///
    /// When the portal rejects `token` as expired, logs in once and repeats
    /// the fetch once with the fresh token. A second rejection is returned as
    /// [`ExcessError::SessionExpired`]. The reading carries whichever token
    /// produced it.
    pub async fn fetch_reading(&self, token: &str) -> Result<Reading> {
        let (overview, token) = match self.fetch_overview(token).await {
            Err(ExcessError::SessionExpired { code }) => {
                self.logger.info(&format!(
                    "Session token rejected (code {}), logging in again",
                    code
                ));
                let fresh = self.login().await?;
                let overview = self.fetch_overview(&fresh).await?;
                (overview, fresh)
            }
            other => (other?, token.to_string()),
        };

        let reading = Reading::try_from(&overview)?.with_token(token);
        self.logger.debug(&format!(
            "Reading at {}: usage={:.3}kW solar={:.3}kW excess={:.3}kW",
            reading.date, reading.usage, reading.solar, reading.excess
        ));
        Ok(reading)
    }

    /// Fetch the raw station overview with the given session token
    pub async fn fetch_overview(&self, token: &str) -> Result<StationOverview> {
        let resp = self
            .http
            .get(self.url(OVERVIEW_PATH))
            .query(&[("id", self.station_id.as_str())])
            .header(AUTHORIZATION, token)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            self.logger
                .error(&format!("Portal overview request failed: {}", status));
            return Err(ExcessError::api(format!(
                "station overview returned {}: {}",
                status, body
            )));
        }

        let body = resp.text().await?;
        self.logger.trace(&format!("Station overview body: {}", body));
        let overview: StationOverview = serde_json::from_str(&body)?;

        if overview.data.as_ref().is_some_and(|d| d.is_offline()) {
            return Err(ExcessError::offline(self.station_id.as_str()));
        }
        if self.endpoints.is_session_expired(&overview.code) {
            return Err(ExcessError::session_expired(overview.code));
        }
        Ok(overview)
    }

    /// Log into the portal and return a fresh session token
    pub async fn login(&self) -> Result<String> {
        let body = LoginRequest {
            channel: &self.endpoints.login_channel,
            email: &self.email,
            password: &self.password,
            salt: &self.salt,
        };

        let resp = self
            .http
            .post(self.url(LOGIN_PATH))
            .json(&body)
            .send()
            .await
            .map_err(|e| ExcessError::login_failed(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ExcessError::login_failed(format!(
                "login returned {}",
                status
            )));
        }

        let text = resp
            .text()
            .await
            .map_err(|e| ExcessError::login_failed(e.to_string()))?;
        let parsed: LoginResponse = serde_json::from_str(&text)
            .map_err(|e| ExcessError::login_failed(format!("undecodable response: {}", e)))?;

        match parsed.token() {
            Some(token) => {
                self.logger.info("Obtained new portal session token");
                Ok(token.to_string())
            }
            None => Err(ExcessError::login_failed(format!(
                "no token in response (code {:?}: {})",
                parsed.code, parsed.msg
            ))),
        }
    }
}
