use crate::themes::Theme;
use ratatui::text::{Line, Span};

/// Decorative sparkle string placed either side of the dashboard title.
pub const SPARKLES: &str = "✦ ✧ ✦ ✧";

/// Dashboard header rendering four lines:
///
/// 1. Application title with sparkle decorations (ALL CAPS).
/// 2. A 60-column `=` separator.
/// 3. View and last-refresh information in `[ view | atualizado HH:MM:SS ]`
///    format.
/// 4. A fetch warning when the latest refresh failed, otherwise an empty
///    line.
pub struct Header<'a> {
    /// Active tab / view label (e.g. "acumulado").
    pub view: &'a str,
    /// Wall-clock time of the last successful refresh, already formatted.
    pub updated: Option<&'a str>,
    /// Description of the most recent fetch failure, if any.
    pub warning: Option<&'a str>,
    /// Theme providing colour styles for each part of the header.
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    /// Construct a new header.
    pub fn new(
        view: &'a str,
        updated: Option<&'a str>,
        warning: Option<&'a str>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            view,
            updated,
            warning,
            theme,
        }
    }

    /// Render the header as a `Vec<Line>` containing exactly four lines.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let separator = "=".repeat(60);

        let info_line = Line::from(vec![
            Span::styled("[ ", self.theme.label),
            Span::styled(self.view.to_lowercase(), self.theme.value),
            Span::styled(" | ", self.theme.label),
            match self.updated {
                Some(ts) => Span::styled(format!("atualizado {ts}"), self.theme.value),
                None => Span::styled("aguardando dados", self.theme.dim),
            },
            Span::styled(" ]", self.theme.label),
        ]);

        let status_line = match self.warning {
            Some(msg) => Line::from(Span::styled(
                format!("falha na atualização: {msg}"),
                self.theme.warning,
            )),
            None => Line::from(""),
        };

        vec![
            Line::from(vec![
                Span::styled(SPARKLES, self.theme.header_sparkle),
                Span::styled(" DASHBOARD DE PRODUTIVIDADE INBOUND ", self.theme.header),
                Span::styled(SPARKLES, self.theme.header_sparkle),
            ]),
            Line::from(Span::styled(separator, self.theme.separator)),
            info_line,
            status_line,
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
