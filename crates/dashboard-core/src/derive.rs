//! Chart-data derivation for the productivity dashboard.
//!
//! Pure, stateless transforms from an area's record slice to the color tags,
//! totals and axis bound consumed by the rendering layer. No function here
//! can fail: an empty slice yields zeroed totals and empty-but-valid
//! payloads.

use crate::models::{ChartPayload, ChartVariant, ColorTag, ProductionRecord, TotalsSummary};

/// Headroom applied above the tallest hourly bar or target point.
const HOURLY_AXIS_HEADROOM: f64 = 1.10;

/// Stateless collection of chart-data derivations.
pub struct ChartDeriver;

impl ChartDeriver {
    // ── Color classification ──────────────────────────────────────────────

    /// Classify cumulative bars against the running within-window counts.
    ///
    /// Element *i* is `OnTrack` when both values are present and
    /// `realized[i] >= threshold[i]`, otherwise `Behind`. A blank on either
    /// side classifies as `Behind`; the cumulative variant has no neutral
    /// tag. This asymmetry with [`Self::classify_hourly`] is inherited
    /// behavior and must not be unified silently.
    pub fn classify_cumulative(
        realized: &[Option<f64>],
        threshold: &[Option<f64>],
    ) -> Vec<ColorTag> {
        realized
            .iter()
            .zip(threshold.iter())
            .map(|pair| match pair {
                (Some(r), Some(t)) if r >= t => ColorTag::OnTrack,
                _ => ColorTag::Behind,
            })
            .collect()
    }

    /// Classify hourly bars against the planned hourly targets.
    ///
    /// Element *i* is `OnTrack`/`Behind` by `realized[i] >= target[i]` when
    /// both values are present, and `Neutral` when either is blank.
    pub fn classify_hourly(realized: &[Option<f64>], target: &[Option<f64>]) -> Vec<ColorTag> {
        realized
            .iter()
            .zip(target.iter())
            .map(|pair| match pair {
                (Some(r), Some(t)) => {
                    if r >= t {
                        ColorTag::OnTrack
                    } else {
                        ColorTag::Behind
                    }
                }
                _ => ColorTag::Neutral,
            })
            .collect()
    }

    // ── Totals ────────────────────────────────────────────────────────────

    /// Compute the totals summary for an area slice.
    ///
    /// Blanks count as zero in the sums. The deviation fraction is absent
    /// when the target total is not positive, so an empty slice produces
    /// `0 / 0 / 0 / None` rather than an error.
    pub fn totals(records: &[ProductionRecord]) -> TotalsSummary {
        let realized_total: f64 = records.iter().filter_map(|r| r.hourly_realized).sum();
        let target_total: f64 = records.iter().filter_map(|r| r.planned_target).sum();
        let deviation = realized_total - target_total;
        let deviation_fraction = if target_total > 0.0 {
            Some(deviation / target_total)
        } else {
            None
        };

        TotalsSummary {
            realized_total,
            target_total,
            deviation,
            deviation_fraction,
        }
    }

    // ── Axis bound ────────────────────────────────────────────────────────

    /// Upper y-axis bound for the hourly chart.
    ///
    /// `max_value * 1.10` over both series (blanks ignored, empty series
    /// count as 0), or `1.0` when nothing positive was seen so the axis
    /// never collapses to zero height.
    pub fn hourly_upper_bound(realized: &[Option<f64>], target: &[Option<f64>]) -> f64 {
        let max_value = realized
            .iter()
            .chain(target.iter())
            .filter_map(|v| *v)
            .fold(0.0_f64, f64::max);

        if max_value > 0.0 {
            max_value * HOURLY_AXIS_HEADROOM
        } else {
            1.0
        }
    }

    // ── Payload assembly ──────────────────────────────────────────────────

    /// Build the cumulative-chart payload for an area slice.
    ///
    /// Bars are the running realized units, colored against the running
    /// within-window counts; the target and trend lines ride along. No axis
    /// bound is computed; the cumulative y-axis is hidden by design.
    pub fn cumulative_payload(records: &[ProductionRecord]) -> ChartPayload {
        let bars: Vec<Option<f64>> = records.iter().map(|r| r.cumulative_realized).collect();
        let thresholds: Vec<Option<f64>> = records.iter().map(|r| r.cumulative_within).collect();
        let colors = Self::classify_cumulative(&bars, &thresholds);

        ChartPayload {
            variant: ChartVariant::Cumulative,
            hour_labels: hour_labels(records),
            colors,
            bars,
            target_line: records.iter().map(|r| r.cumulative_target).collect(),
            trend_line: Some(records.iter().map(|r| r.trend).collect()),
            axis_upper_bound: None,
        }
    }

    /// Build the hourly-chart payload for an area slice.
    pub fn hourly_payload(records: &[ProductionRecord]) -> ChartPayload {
        let bars: Vec<Option<f64>> = records.iter().map(|r| r.hourly_realized).collect();
        let targets: Vec<Option<f64>> = records.iter().map(|r| r.planned_target).collect();
        let colors = Self::classify_hourly(&bars, &targets);
        let upper = Self::hourly_upper_bound(&bars, &targets);

        ChartPayload {
            variant: ChartVariant::Hourly,
            hour_labels: hour_labels(records),
            colors,
            bars,
            target_line: targets,
            trend_line: None,
            axis_upper_bound: Some(upper),
        }
    }
}

// ── Private helpers ───────────────────────────────────────────────────────────

/// X-axis labels: the hour of each record, in slice order.
fn hour_labels(records: &[ProductionRecord]) -> Vec<String> {
    records.iter().map(|r| r.hora.to_string()).collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
