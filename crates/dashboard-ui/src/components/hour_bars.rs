//! Horizontal per-hour bar rows for one chart payload.
//!
//! Each record renders as one terminal row: the hour label, a bar whose fill
//! is styled by the payload's color tag, a marker at the target position
//! inside the track, and the value text. Blank values draw no fill and show
//! an em dash, never a zero. The hourly variant appends a numeric axis
//! footer scaled to the payload's upper bound; the cumulative variant shows
//! no numeric axis by design.

use dashboard_core::formatting::{format_count, format_opt_count};
use dashboard_core::models::{ChartPayload, ChartVariant, ColorTag};
use ratatui::text::{Line, Span};

use crate::themes::Theme;

/// Configuration controlling visual appearance of the bar rows.
pub struct HourBarsConfig {
    /// Width in terminal columns of the bar track (excluding label and value).
    pub width: u16,
    /// Character used to fill the completed portion of a bar.
    pub filled_char: char,
    /// Character used for the unfilled portion of the track.
    pub track_char: char,
}

impl Default for HourBarsConfig {
    fn default() -> Self {
        Self {
            width: 24,
            filled_char: '\u{2588}', // █  FULL BLOCK
            track_char: '\u{2591}',  // ░  LIGHT SHADE
        }
    }
}

/// Marker drawn at the target position inside a bar track.
const TARGET_MARKER: char = '│';

// ── HourBars ──────────────────────────────────────────────────────────────────

/// Renders a [`ChartPayload`] as one bar row per hour.
pub struct HourBars<'a> {
    pub payload: &'a ChartPayload,
    pub theme: &'a Theme,
    pub config: HourBarsConfig,
}

impl<'a> HourBars<'a> {
    /// Construct with the default bar width.
    pub fn new(payload: &'a ChartPayload, theme: &'a Theme) -> Self {
        Self {
            payload,
            theme,
            config: HourBarsConfig::default(),
        }
    }

    /// Render all bar rows (plus the axis footer for the hourly variant).
    ///
    /// Returns no lines for an empty payload; the caller decides how to show
    /// the degraded state.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        if self.payload.bars.is_empty() {
            return Vec::new();
        }

        let scale = self.scale();
        // Right-align the value column across rows.
        let value_width = self
            .payload
            .bars
            .iter()
            .map(|v| format_opt_count(*v).chars().count())
            .max()
            .unwrap_or(0);

        let mut lines: Vec<Line<'a>> = (0..self.payload.bars.len())
            .map(|i| self.bar_row(i, scale, value_width))
            .collect();

        if self.payload.variant == ChartVariant::Hourly {
            if let Some(bound) = self.payload.axis_upper_bound {
                lines.push(self.axis_footer(bound));
            }
        }

        lines
    }

    // ── Private helpers ───────────────────────────────────────────────────

    /// Value that maps to a full-width bar.
    ///
    /// The hourly variant uses the derived axis bound. The cumulative chart
    /// has no axis, so bars scale against the largest value of any of its
    /// series; the scale is purely internal and never displayed.
    fn scale(&self) -> f64 {
        if let Some(bound) = self.payload.axis_upper_bound {
            return bound;
        }

        let series_max = self
            .payload
            .bars
            .iter()
            .chain(self.payload.target_line.iter())
            .chain(self.payload.trend_line.iter().flatten())
            .filter_map(|v| *v)
            .fold(0.0_f64, f64::max);

        if series_max > 0.0 {
            series_max
        } else {
            1.0
        }
    }

    /// Build the row for record `idx`.
    fn bar_row(&self, idx: usize, scale: f64, value_width: usize) -> Line<'a> {
        let width = self.config.width as usize;
        let value = self.payload.bars[idx];
        let tag = self.payload.colors[idx];
        let bar_style = self.theme.bar_style(tag);

        let filled = match value {
            Some(v) => cell_count(v, scale, width),
            None => 0,
        };
        let marker = self.payload.target_line[idx]
            .map(|t| cell_count(t, scale, width).min(width.saturating_sub(1)));

        let mut spans: Vec<Span<'a>> = Vec::with_capacity(8);
        spans.push(Span::styled(
            format!("{:>2} ", self.payload.hour_labels[idx]),
            self.theme.dim,
        ));

        let fill = |n: usize| repeat_char(self.config.filled_char, n);
        let track = |n: usize| repeat_char(self.config.track_char, n);

        let marker_span = || Span::styled(TARGET_MARKER.to_string(), self.theme.target_marker);
        match marker {
            Some(m) if m < filled => {
                spans.push(Span::styled(fill(m), bar_style));
                spans.push(marker_span());
                spans.push(Span::styled(fill(filled - m - 1), bar_style));
                spans.push(Span::styled(track(width - filled), self.theme.bar_track));
            }
            Some(m) => {
                spans.push(Span::styled(fill(filled), bar_style));
                spans.push(Span::styled(track(m - filled), self.theme.bar_track));
                spans.push(marker_span());
                spans.push(Span::styled(
                    track(width.saturating_sub(m + 1)),
                    self.theme.bar_track,
                ));
            }
            None => {
                spans.push(Span::styled(fill(filled), bar_style));
                spans.push(Span::styled(track(width - filled), self.theme.bar_track));
            }
        }

        // Value text: blanks render as an em dash, dimmed like the bar.
        let value_style = match tag {
            ColorTag::Neutral => self.theme.dim,
            _ => self.theme.value,
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!("{:>value_width$}", format_opt_count(value)),
            value_style,
        ));

        // Cumulative rows append the projected trend figure.
        if let Some(trend) = self.payload.trend_line.as_ref().and_then(|t| t[idx]) {
            spans.push(Span::styled(
                format!("  tend. {}", format_count(trend)),
                self.theme.trend,
            ));
        }

        Line::from(spans)
    }

    /// Numeric axis footer: `0` on the left, the upper bound on the right.
    fn axis_footer(&self, bound: f64) -> Line<'a> {
        let width = self.config.width as usize;
        let bound_str = format_count(bound);
        let pad = width.saturating_sub(1 + bound_str.chars().count());
        Line::from(Span::styled(
            format!("   0{}{}", " ".repeat(pad), bound_str),
            self.theme.axis,
        ))
    }
}

// ── Small helpers ─────────────────────────────────────────────────────────────

/// Number of bar cells `value` occupies at `scale`, capped to `width`.
fn cell_count(value: f64, scale: f64, width: usize) -> usize {
    if scale <= 0.0 {
        return 0;
    }
    let cells = ((value / scale) * width as f64).round();
    (cells.max(0.0) as usize).min(width)
}

fn repeat_char(c: char, n: usize) -> String {
    std::iter::repeat_n(c, n).collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
