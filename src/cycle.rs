//! One polling cycle
//!
//! Load the previous reading, fetch a new one, persist it, forward it and
//! notify when the excess flag flipped. Every step is awaited before the
//! next one starts.

use crate::config::{Config, build_http_client};
use crate::error::Result;
use crate::logging::{LogContext, StructuredLogger, get_logger_with_context};
use crate::notify::{Notifier, TelegramNotifier};
use crate::persistence::StateStore;
use crate::portal::PortalClient;
use crate::reading::Reading;
use crate::sheet::SheetForwarder;
use std::path::Path;

/// How a cycle ended
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// Station offline; nothing was written or sent
    Offline,
    /// A new reading was stored
    Updated {
        reading: Reading,
        /// Whether a change notification was delivered
        notified: bool,
    },
}

/// Polling cycle wiring
pub struct Cycle {
    state: StateStore,
    portal: PortalClient,
    forwarder: Option<SheetForwarder>,
    notifier: Option<Box<dyn Notifier>>,
    logger: StructuredLogger,
}

impl Cycle {
    /// Wire a cycle from configuration and the state file path
    pub fn from_config<P: AsRef<Path>>(config: &Config, state_path: P) -> Result<Self> {
        config.validate()?;

        let http = build_http_client(&config.endpoints)?;
        let portal = PortalClient::new(http.clone(), config);
        let forwarder = SheetForwarder::from_config(http.clone(), config);
        let notifier = TelegramNotifier::from_config(http, config)
            .map(|n| Box::new(n) as Box<dyn Notifier>);

        let mut cycle = Self::new(StateStore::new(state_path), portal, forwarder, notifier);
        cycle.logger = get_logger_with_context(
            LogContext::new("cycle")
                .with_run_id(uuid::Uuid::new_v4().to_string())
                .with_station_id(config.station_id.clone()),
        );
        Ok(cycle)
    }

    pub fn new(
        state: StateStore,
        portal: PortalClient,
        forwarder: Option<SheetForwarder>,
        notifier: Option<Box<dyn Notifier>>,
    ) -> Self {
        Self {
            state,
            portal,
            forwarder,
            notifier,
            logger: get_logger_with_context(LogContext::new("cycle")),
        }
    }

    /// Replace the notifier
    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Run one cycle.
    ///
    /// An offline station ends the cycle early with [`CycleOutcome::Offline`].
    /// Any other fetch failure, and a failure to save the new reading, is
    /// returned as an error before anything is forwarded or sent. Forwarding
    /// and notification failures are logged only.
    pub async fn run(&self) -> Result<CycleOutcome> {
        let previous = self.state.load()?;

        let reading = match self.portal.fetch_reading(&previous.token).await {
            Ok(reading) => reading,
            Err(e) if e.is_transient() => {
                self.logger.warn(&format!("No new reading this cycle: {}", e));
                return Ok(CycleOutcome::Offline);
            }
            Err(e) => {
                self.logger.error(&format!("Failed to fetch reading: {}", e));
                return Err(e);
            }
        };

        self.logger.info(&format!(
            "usage={:.2}kW solar={:.2}kW excess={:.2}kW is_excess={}",
            reading.usage, reading.solar, reading.excess, reading.is_excess
        ));

        if let Err(e) = self.state.save(&reading) {
            self.logger.error(&format!(
                "Failed to save state to {}: {}",
                self.state.path().display(),
                e
            ));
            return Err(e);
        }

        if let Some(forwarder) = &self.forwarder
            && let Err(e) = forwarder.forward(&reading).await
        {
            self.logger
                .warn(&format!("Failed to forward reading to sheet: {}", e));
        }

        let notified = self.notify_change(&previous, &reading).await;
        Ok(CycleOutcome::Updated { reading, notified })
    }

    async fn notify_change(&self, previous: &Reading, reading: &Reading) -> bool {
        if !reading.changed_from(previous) {
            self.logger.debug("Excess state unchanged");
            return false;
        }

        let Some(notifier) = &self.notifier else {
            self.logger
                .debug("Excess state changed but notifications are not configured");
            return false;
        };

        match notifier.notify(&reading.message()).await {
            Ok(()) => true,
            Err(e) => {
                self.logger.error(&format!("Failed to send notification: {}", e));
                false
            }
        }
    }
}
