//! # excess-watch - solar excess watcher for Sunways stations
//!
//! Polls one station's live power flow from the Sunways monitoring portal,
//! works out whether the site runs on solar surplus or draws from the grid,
//! keeps the latest reading in a small JSON state file and sends a Telegram
//! message whenever that state flips. Meant to be run from cron or a systemd
//! timer; each invocation performs exactly one cycle.
//!
//! ## Architecture
//!
//! - `config`: JSON/YAML configuration and validation
//! - `logging`: Structured logging and tracing
//! - `portal`: Portal login and station overview client
//! - `reading`: Normalized readings and status messages
//! - `persistence`: State file load/save
//! - `sheet`: Spreadsheet webhook forwarding
//! - `notify`: Change notifications (Telegram)
//! - `cycle`: Orchestration of one polling cycle
//! - `cli`: Command line arguments

pub mod cli;
pub mod config;
pub mod cycle;
pub mod error;
pub mod logging;
pub mod notify;
pub mod persistence;
pub mod portal;
pub mod reading;
pub mod sheet;

// Re-export commonly used types
pub use config::Config;
pub use cycle::{Cycle, CycleOutcome};
pub use error::{ExcessError, Result};
pub use reading::Reading;
