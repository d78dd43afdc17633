//! Terminal UI layer for the inbound productivity dashboard.
//!
//! Provides themes, the header, per-hour bar charts, totals rows, the area
//! panel grid, and the main application event loop built on top of
//! [`ratatui`] for rendering the dashboard in the terminal.

pub mod app;
pub mod area_view;
pub mod components;
pub mod themes;

pub use dashboard_core as core;
