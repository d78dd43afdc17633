//! Totals row shown above each area's chart.

use dashboard_core::formatting::{format_count, format_fraction_percent, format_signed_count};
use dashboard_core::models::TotalsSummary;
use ratatui::text::{Line, Span};

use crate::themes::Theme;

/// Renders one area's [`TotalsSummary`] as a single line:
///
/// ```text
/// Realizado 1.234   Meta 1.100   Desvio +134 (+12.2%)
/// ```
///
/// The deviation (and its percentage) is colored by sign; the percentage is
/// omitted entirely when the target total is zero.
pub struct TotalsRow<'a> {
    pub totals: &'a TotalsSummary,
    pub theme: &'a Theme,
}

impl<'a> TotalsRow<'a> {
    /// Construct a new totals row.
    pub fn new(totals: &'a TotalsSummary, theme: &'a Theme) -> Self {
        Self { totals, theme }
    }

    /// Render the row as a [`Line`].
    pub fn to_line(&self) -> Line<'a> {
        let deviation_style = self.theme.deviation_style(self.totals.deviation);

        let mut spans = vec![
            Span::styled("Realizado ", self.theme.label),
            Span::styled(format_count(self.totals.realized_total), self.theme.value),
            Span::raw("   "),
            Span::styled("Meta ", self.theme.label),
            Span::styled(format_count(self.totals.target_total), self.theme.value),
            Span::raw("   "),
            Span::styled("Desvio ", self.theme.label),
            Span::styled(format_signed_count(self.totals.deviation), deviation_style),
        ];

        if let Some(fraction) = self.totals.deviation_fraction {
            spans.push(Span::styled(
                format!(" ({})", format_fraction_percent(fraction)),
                deviation_style,
            ));
        }

        Line::from(spans)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn totals(realized: f64, target: f64) -> TotalsSummary {
        let deviation = realized - target;
        TotalsSummary {
            realized_total: realized,
            target_total: target,
            deviation,
            deviation_fraction: if target > 0.0 {
                Some(deviation / target)
            } else {
                None
            },
        }
    }

    #[test]
    fn test_totals_row_contains_all_three_figures() {
        let t = totals(1_234.0, 1_100.0);
        let theme = Theme::dark();
        let text = line_text(&TotalsRow::new(&t, &theme).to_line());

        assert!(text.contains("Realizado 1.234"), "was: {text}");
        assert!(text.contains("Meta 1.100"), "was: {text}");
        assert!(text.contains("Desvio +134"), "was: {text}");
    }

    #[test]
    fn test_totals_row_percentage_for_negative_deviation() {
        let t = totals(100.0, 130.0);
        let theme = Theme::dark();
        let text = line_text(&TotalsRow::new(&t, &theme).to_line());

        assert!(text.contains("Desvio -30"), "was: {text}");
        assert!(text.contains("(-23.1%)"), "was: {text}");
    }

    #[test]
    fn test_totals_row_zero_target_omits_percentage() {
        let t = totals(100.0, 0.0);
        let theme = Theme::dark();
        let text = line_text(&TotalsRow::new(&t, &theme).to_line());

        assert!(!text.contains('%'), "no percentage without a target: {text}");
    }

    #[test]
    fn test_totals_row_deviation_colored_by_sign() {
        let theme = Theme::dark();

        let behind = totals(100.0, 130.0);
        let line = TotalsRow::new(&behind, &theme).to_line();
        let deviation_span = line
            .spans
            .iter()
            .find(|s| s.content.contains("-30"))
            .expect("deviation span");
        assert_eq!(deviation_span.style.fg, Some(Color::Red));

        let ahead = totals(130.0, 100.0);
        let line = TotalsRow::new(&ahead, &theme).to_line();
        let deviation_span = line
            .spans
            .iter()
            .find(|s| s.content.contains("+30"))
            .expect("deviation span");
        assert_eq!(deviation_span.style.fg, Some(Color::Green));
    }

    #[test]
    fn test_totals_row_zeroed_summary() {
        let t = TotalsSummary::default();
        let theme = Theme::dark();
        let text = line_text(&TotalsRow::new(&t, &theme).to_line());

        assert!(text.contains("Realizado 0"));
        assert!(text.contains("Meta 0"));
        assert!(text.contains("Desvio 0"));
    }
}
