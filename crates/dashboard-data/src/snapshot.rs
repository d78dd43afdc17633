//! Snapshot assembly for the dashboard.
//!
//! Derives the per-area chart payloads and totals from a normalized table,
//! returning a [`DashboardSnapshot`] ready for the UI layer.

use chrono::Utc;
use dashboard_core::derive::ChartDeriver;
use dashboard_core::models::{Area, ChartPayload, NormalizedTable, TotalsSummary};
use serde::{Deserialize, Serialize};
use tracing::warn;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    /// ISO-8601 timestamp when this snapshot was generated.
    pub generated_at: String,
    /// Rows kept in the normalized table.
    pub rows_fetched: usize,
    /// Source rows dropped during normalization (invalid `Hora`).
    pub rows_dropped: usize,
    /// Wall-clock seconds spent downloading the CSV.
    pub fetch_seconds: f64,
    /// Wall-clock seconds spent normalizing and deriving.
    pub normalize_seconds: f64,
}

/// Derived chart data and totals for a single area panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaDashboard {
    /// The area this panel shows.
    pub area: Area,
    /// Number of records in this area's slice; zero means a degraded panel.
    pub record_count: usize,
    /// Realized / target totals shown above the charts.
    pub totals: TotalsSummary,
    /// Payload for the cumulative chart (hidden axis, trend line).
    pub cumulative: ChartPayload,
    /// Payload for the hourly chart (bounded axis).
    pub hourly: ChartPayload,
}

/// The complete output of one fetch cycle: five area panels plus metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// One entry per [`Area::ALL`] member, in fixed display order.
    pub areas: Vec<AreaDashboard>,
    /// Metadata about this snapshot.
    pub metadata: SnapshotMetadata,
}

impl DashboardSnapshot {
    /// Look up the panel for `area`. Panels exist for every area.
    pub fn area(&self, area: Area) -> Option<&AreaDashboard> {
        self.areas.iter().find(|a| a.area == area)
    }
}

// ── Public function ───────────────────────────────────────────────────────────

/// Derive a [`DashboardSnapshot`] from a normalized table.
///
/// Always succeeds: an area with no records gets a zeroed totals summary and
/// empty-but-valid chart payloads (logged as a warning, not an error).
/// Timing figures are supplied by the caller, which owns the fetch.
pub fn build_snapshot(
    table: &NormalizedTable,
    fetch_seconds: f64,
    normalize_seconds: f64,
) -> DashboardSnapshot {
    let areas = Area::ALL
        .iter()
        .map(|&area| {
            let slice = table.slice(area);
            if slice.is_empty() {
                warn!(area = area.display_name(), "no records for area");
            }

            AreaDashboard {
                area,
                record_count: slice.len(),
                totals: ChartDeriver::totals(&slice),
                cumulative: ChartDeriver::cumulative_payload(&slice),
                hourly: ChartDeriver::hourly_payload(&slice),
            }
        })
        .collect();

    DashboardSnapshot {
        areas,
        metadata: SnapshotMetadata {
            generated_at: Utc::now().to_rfc3339(),
            rows_fetched: table.len(),
            rows_dropped: table.dropped_rows,
            fetch_seconds,
            normalize_seconds,
        },
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
