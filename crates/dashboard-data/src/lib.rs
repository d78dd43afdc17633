//! Data-loading layer for the inbound productivity dashboard.
//!
//! Responsible for fetching the published CSV export over HTTP, normalizing
//! it into the typed hour-sorted table, and assembling the per-area
//! [`snapshot::DashboardSnapshot`] consumed by the runtime and UI layers.

pub mod error;
pub mod fetch;
pub mod normalize;
pub mod snapshot;

pub use dashboard_core as core;
