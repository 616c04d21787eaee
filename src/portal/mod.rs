//! Monitoring portal integration
//!
//! Session login and station overview retrieval against the Sunways portal
//! HTTP API.

pub mod client;
pub mod types;

pub use client::PortalClient;
pub use types::{OverviewData, StationOverview};
