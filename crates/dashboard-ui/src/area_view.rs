//! Area panel grid for the dashboard TUI.
//!
//! Lays the five area panels out three per row (matching the Streamlit
//! dashboard's column grid) and renders each panel as a bordered block:
//! totals row, then the chart of the active tab. Areas without records show
//! the Streamlit warning text instead of an empty chart.

use dashboard_core::models::ChartVariant;
use dashboard_runtime::data::snapshot::{AreaDashboard, DashboardSnapshot};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::components::hour_bars::HourBars;
use crate::components::metrics::TotalsRow;
use crate::themes::Theme;

// ── Grid ──────────────────────────────────────────────────────────────────────

/// Render the five area panels for the active chart variant into `area`.
pub fn render_grid(
    frame: &mut Frame,
    area: Rect,
    snapshot: &DashboardSnapshot,
    variant: ChartVariant,
    theme: &Theme,
) {
    let rows = Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let columns = [
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ];
    let top = Layout::horizontal(columns).split(rows[0]);
    let bottom = Layout::horizontal(columns).split(rows[1]);

    let cells = [top[0], top[1], top[2], bottom[0], bottom[1]];
    for (panel, cell) in snapshot.areas.iter().zip(cells.iter()) {
        render_area_panel(frame, *cell, panel, variant, theme);
    }

    render_key_hints(frame, bottom[2], theme);
}

// ── Panels ────────────────────────────────────────────────────────────────────

/// Render one bordered area panel.
pub fn render_area_panel(
    frame: &mut Frame,
    area: Rect,
    panel: &AreaDashboard,
    variant: ChartVariant,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.panel_border)
        .title(Span::styled(
            format!(" {} ", panel.area.display_name().to_uppercase()),
            theme.area_title,
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let paragraph = Paragraph::new(Text::from(build_panel_lines(panel, variant, theme)));
    frame.render_widget(paragraph, inner);
}

/// Build the lines of one panel body (extracted for testability).
pub fn build_panel_lines<'a>(
    panel: &'a AreaDashboard,
    variant: ChartVariant,
    theme: &'a Theme,
) -> Vec<Line<'a>> {
    let mut lines = vec![TotalsRow::new(&panel.totals, theme).to_line(), Line::from("")];

    if panel.record_count == 0 {
        lines.push(Line::from(Span::styled(
            format!(
                "Nenhum dado disponível para {}.",
                panel.area.display_name()
            ),
            theme.warning,
        )));
        return lines;
    }

    let payload = match variant {
        ChartVariant::Cumulative => &panel.cumulative,
        ChartVariant::Hourly => &panel.hourly,
    };
    lines.extend(HourBars::new(payload, theme).to_lines());
    lines
}

/// Key hints shown in the unused sixth grid cell.
fn render_key_hints(frame: &mut Frame, area: Rect, theme: &Theme) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("tab / ← →   alternar visão", theme.dim)),
        Line::from(Span::styled("1 / 2       acumulado / hora a hora", theme.dim)),
        Line::from(Span::styled("q           sair", theme.dim)),
    ];
    let paragraph = Paragraph::new(Text::from(lines)).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

// ── Degraded screens ──────────────────────────────────────────────────────────

/// Render the waiting screen shown before the first snapshot arrives.
pub fn render_waiting(frame: &mut Frame, area: Rect, theme: &Theme) {
    let paragraph = Paragraph::new(Text::from(build_waiting_lines(theme)))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Lines of the waiting screen (extracted for testability).
pub fn build_waiting_lines(theme: &Theme) -> Vec<Line<'_>> {
    vec![
        Line::from(""),
        Line::from(Span::styled("Aguardando dados...", theme.info)),
        Line::from(""),
        Line::from(Span::styled("pressione q para sair", theme.dim)),
    ]
}

/// Render the error screen shown when no fetch has ever succeeded.
pub fn render_load_error(frame: &mut Frame, area: Rect, error: &str, theme: &Theme) {
    let paragraph = Paragraph::new(Text::from(build_load_error_lines(error, theme)))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Lines of the error screen (extracted for testability).
pub fn build_load_error_lines<'a>(error: &'a str, theme: &'a Theme) -> Vec<Line<'a>> {
    vec![
        Line::from(""),
        Line::from(Span::styled("Falha ao carregar os dados", theme.error)),
        Line::from(Span::styled(error, theme.dim)),
        Line::from(""),
        Line::from(Span::styled("nova tentativa no próximo ciclo", theme.dim)),
    ]
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::models::{Area, NormalizedTable, ProductionRecord};
    use dashboard_runtime::data::snapshot::build_snapshot;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn snapshot_with_shipping_rows() -> DashboardSnapshot {
        let records = vec![
            ProductionRecord {
                hora: 1,
                area: Area::Shipping.csv_name().to_string(),
                hourly_realized: Some(100.0),
                planned_target: Some(80.0),
                cumulative_realized: Some(100.0),
                cumulative_within: Some(90.0),
                cumulative_target: Some(80.0),
                trend: Some(1_000.0),
                ..Default::default()
            },
            ProductionRecord {
                hora: 2,
                area: Area::Shipping.csv_name().to_string(),
                hourly_realized: None,
                planned_target: Some(50.0),
                ..Default::default()
            },
        ];
        build_snapshot(
            &NormalizedTable {
                records,
                dropped_rows: 0,
            },
            0.0,
            0.0,
        )
    }

    #[test]
    fn test_panel_lines_start_with_totals() {
        let snapshot = snapshot_with_shipping_rows();
        let panel = snapshot.area(Area::Shipping).unwrap();
        let theme = Theme::dark();

        let lines = build_panel_lines(panel, ChartVariant::Hourly, &theme);
        let totals = line_text(&lines[0]);
        assert!(totals.contains("Realizado 100"), "was: {totals}");
        assert!(totals.contains("Meta 130"), "was: {totals}");
        assert!(totals.contains("Desvio -30"), "was: {totals}");
    }

    #[test]
    fn test_panel_lines_hourly_has_axis_footer() {
        let snapshot = snapshot_with_shipping_rows();
        let panel = snapshot.area(Area::Shipping).unwrap();
        let theme = Theme::dark();

        let lines = build_panel_lines(panel, ChartVariant::Hourly, &theme);
        // totals + blank + 2 bar rows + axis footer
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_panel_lines_cumulative_has_no_axis_footer() {
        let snapshot = snapshot_with_shipping_rows();
        let panel = snapshot.area(Area::Shipping).unwrap();
        let theme = Theme::dark();

        let lines = build_panel_lines(panel, ChartVariant::Cumulative, &theme);
        // totals + blank + 2 bar rows, nothing appended.
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_empty_panel_shows_warning_text() {
        let snapshot = snapshot_with_shipping_rows();
        let panel = snapshot.area(Area::PackingMr).unwrap();
        let theme = Theme::dark();

        let lines = build_panel_lines(panel, ChartVariant::Hourly, &theme);
        let text: String = lines.iter().map(line_text).collect();
        assert!(
            text.contains("Nenhum dado disponível para Packing MR."),
            "was: {text}"
        );
    }

    #[test]
    fn test_empty_panel_still_shows_zeroed_totals() {
        let snapshot = snapshot_with_shipping_rows();
        let panel = snapshot.area(Area::PackingMr).unwrap();
        let theme = Theme::dark();

        let lines = build_panel_lines(panel, ChartVariant::Hourly, &theme);
        let totals = line_text(&lines[0]);
        assert!(totals.contains("Realizado 0"), "was: {totals}");
    }

    #[test]
    fn test_waiting_lines() {
        let theme = Theme::dark();
        let text: String = build_waiting_lines(&theme).iter().map(line_text).collect();
        assert!(text.contains("Aguardando dados"));
    }

    #[test]
    fn test_load_error_lines_include_cause() {
        let theme = Theme::dark();
        let lines = build_load_error_lines("HTTP 503", &theme);
        let text: String = lines.iter().map(line_text).collect();
        assert!(text.contains("Falha ao carregar os dados"));
        assert!(text.contains("HTTP 503"));
    }
}
