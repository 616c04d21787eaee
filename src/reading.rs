//! Normalized station readings
//!
//! A [`Reading`] is both the result of one poll and the state carried to the
//! next run. Only `is_excess`, `excess` and `token` are persisted; the other
//! fields live for the duration of a single run.

use crate::error::{ExcessError, Result};
use crate::portal::types::StationOverview;
use serde::{Deserialize, Serialize};

/// Excess above this value (kW) counts as running on solar
pub const EXCESS_TOLERANCE_KW: f64 = -0.1;

/// Unit tag the portal uses for watts
const WATT_UNIT: &str = "W";

/// One normalized power reading
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reading {
    /// Solar output covers usage (within [`EXCESS_TOLERANCE_KW`])
    pub is_excess: bool,

    /// Solar minus usage in kW; negative when drawing from the grid
    pub excess: f64,

    /// Portal session token that produced this reading
    pub token: String,

    /// Portal timestamp of the overview
    #[serde(skip)]
    pub date: String,

    /// Load power in kW
    #[serde(skip)]
    pub usage: f64,

    /// PV power in kW
    #[serde(skip)]
    pub solar: f64,
}

impl Reading {
    /// Build a reading from load and PV power already in kW
    pub fn from_kilowatts(usage: f64, solar: f64, date: impl Into<String>) -> Self {
        let excess = solar - usage;
        Self {
            is_excess: is_excess(excess),
            excess,
            token: String::new(),
            date: date.into(),
            usage,
            solar,
        }
    }

    /// Attach the session token the reading was fetched with
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    /// Human-readable chat message for this reading
    pub fn message(&self) -> String {
        if self.is_excess {
            "☀️ Excess".to_string()
        } else {
            format!("🔌 Insufficient: {:.2}kW", self.excess.abs())
        }
    }

    /// Whether the excess/deficit state differs from `previous`
    pub fn changed_from(&self, previous: &Reading) -> bool {
        self.is_excess != previous.is_excess
    }
}

impl TryFrom<&StationOverview> for Reading {
    type Error = ExcessError;

    fn try_from(overview: &StationOverview) -> Result<Self> {
        let data = overview.data.as_ref().ok_or_else(|| {
            ExcessError::portal(overview.code.as_str(), overview.msg.as_str())
        })?;

        let usage = to_kilowatts(data.pload, &data.pload_unit);
        let solar = to_kilowatts(data.pac, &data.pac_unit);

        let date = if overview.time.is_empty() {
            chrono::Local::now().to_rfc3339()
        } else {
            overview.time.clone()
        };

        Ok(Reading::from_kilowatts(usage, solar, date))
    }
}

/// Excess flag for a given excess magnitude
pub fn is_excess(excess: f64) -> bool {
    excess > EXCESS_TOLERANCE_KW
}

fn to_kilowatts(value: f64, unit: &str) -> f64 {
    if unit == WATT_UNIT {
        value / 1000.0
    } else {
        value
    }
}
