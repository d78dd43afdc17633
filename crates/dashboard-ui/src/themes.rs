use dashboard_core::models::ColorTag;
use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
    Unknown,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`.  Background values
/// 0–6 are considered dark; 7–15 are considered light.  If the variable is
/// absent or unparseable, `BackgroundType::Dark` is returned as the safe
/// default.
pub fn detect_background() -> BackgroundType {
    if let Ok(val) = std::env::var("COLORFGBG") {
        if let Some(bg) = val.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                return if bg_num <= 6 {
                    BackgroundType::Dark
                } else {
                    BackgroundType::Light
                };
            }
        }
    }
    BackgroundType::Dark
}

/// Complete theme definition carrying all UI styles used by dashboard-ui
/// components.
///
/// The bar palette mirrors the Streamlit dashboard: teal bars for on-track
/// hours, red for behind, gray for hours without data, a lime target marker
/// and an orange trend figure.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub header_sparkle: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub bold: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub info: Style,
    pub success: Style,
    pub warning: Style,
    pub error: Style,

    // ── Tabs ─────────────────────────────────────────────────────────────────
    pub tab_active: Style,
    pub tab_inactive: Style,

    // ── Area panels ──────────────────────────────────────────────────────────
    /// Panel title (the area name, upper-cased).
    pub area_title: Style,
    pub panel_border: Style,

    // ── Chart bars ───────────────────────────────────────────────────────────
    /// Bar fill when the hour met its target.
    pub bar_on_track: Style,
    /// Bar fill when the hour fell short.
    pub bar_behind: Style,
    /// Bar fill for hours without data.
    pub bar_neutral: Style,
    /// Unfilled portion of a bar track.
    pub bar_track: Style,
    /// Marker placed at the target position inside a bar track.
    pub target_marker: Style,
    /// Trend figures on the cumulative chart.
    pub trend: Style,
    /// Axis footer of the hourly chart.
    pub axis: Style,

    // ── Totals ───────────────────────────────────────────────────────────────
    pub metric_positive: Style,
    pub metric_negative: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            header_sparkle: Style::default().fg(Color::Yellow),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Cyan),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            tab_active: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),

            area_title: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            panel_border: Style::default().fg(Color::DarkGray),

            bar_on_track: Style::default().fg(Color::Cyan),
            bar_behind: Style::default().fg(Color::Red),
            bar_neutral: Style::default().fg(Color::DarkGray),
            bar_track: Style::default().fg(Color::DarkGray),
            target_marker: Style::default().fg(Color::Green),
            trend: Style::default().fg(Color::Yellow),
            axis: Style::default().fg(Color::Gray),

            metric_positive: Style::default().fg(Color::Green),
            metric_negative: Style::default().fg(Color::Red),
        }
    }

    /// Light-background terminal theme.
    ///
    /// Uses dark colours for text and stronger accent colours so that content
    /// remains legible against a white/light-grey terminal canvas.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            header_sparkle: Style::default().fg(Color::Magenta),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            bold: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Blue),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            tab_active: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),

            area_title: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            panel_border: Style::default().fg(Color::Gray),

            bar_on_track: Style::default().fg(Color::Blue),
            bar_behind: Style::default().fg(Color::Red),
            bar_neutral: Style::default().fg(Color::Gray),
            bar_track: Style::default().fg(Color::Gray),
            target_marker: Style::default().fg(Color::Green),
            trend: Style::default().fg(Color::Magenta),
            axis: Style::default().fg(Color::DarkGray),

            metric_positive: Style::default().fg(Color::Green),
            metric_negative: Style::default().fg(Color::Red),
        }
    }

    /// Classic terminal theme using only the basic 8-colour ANSI palette.
    ///
    /// Avoids bold modifiers to maintain a retro aesthetic and maximise
    /// compatibility with minimal terminal emulators.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),
            header_sparkle: Style::default().fg(Color::White),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default().fg(Color::White),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),

            info: Style::default().fg(Color::Cyan),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            tab_active: Style::default().fg(Color::Cyan),
            tab_inactive: Style::default().fg(Color::Gray),

            area_title: Style::default().fg(Color::Yellow),
            panel_border: Style::default().fg(Color::DarkGray),

            bar_on_track: Style::default().fg(Color::Cyan),
            bar_behind: Style::default().fg(Color::Red),
            bar_neutral: Style::default().fg(Color::DarkGray),
            bar_track: Style::default().fg(Color::DarkGray),
            target_marker: Style::default().fg(Color::Green),
            trend: Style::default().fg(Color::Yellow),
            axis: Style::default().fg(Color::Gray),

            metric_positive: Style::default().fg(Color::Green),
            metric_negative: Style::default().fg(Color::Red),
        }
    }

    /// Choose a theme automatically based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Construct a theme by name.  Falls back to `auto_detect` for unknown
    /// names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    /// Bar fill style for a color tag.
    pub fn bar_style(&self, tag: ColorTag) -> Style {
        match tag {
            ColorTag::OnTrack => self.bar_on_track,
            ColorTag::Behind => self.bar_behind,
            ColorTag::Neutral => self.bar_neutral,
        }
    }

    /// Style for a signed deviation figure: green at-or-above zero, red below.
    pub fn deviation_style(&self, deviation: f64) -> Style {
        if deviation < 0.0 {
            self.metric_negative
        } else {
            self.metric_positive
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
