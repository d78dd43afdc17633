use serde::{Deserialize, Serialize};

// ── Area ──────────────────────────────────────────────────────────────────────

/// One of the five fixed operational zones tracked by the dashboard.
///
/// The order of [`Area::ALL`] is the order in which area panels are laid out
/// on screen, matching the Streamlit dashboard this replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Area {
    PackingAutostore,
    PickingAutostore,
    Shipping,
    PackingMr,
    ConsolidacaoMr,
}

impl Area {
    /// All areas in fixed display order.
    pub const ALL: [Area; 5] = [
        Area::PackingAutostore,
        Area::PickingAutostore,
        Area::Shipping,
        Area::PackingMr,
        Area::ConsolidacaoMr,
    ];

    /// The exact value carried by the `Área` column for rows of this area.
    pub fn csv_name(&self) -> &'static str {
        match self {
            Area::PackingAutostore => "Packing Autostore",
            Area::PickingAutostore => "Picking Autostore",
            Area::Shipping => "Shipping",
            Area::PackingMr => "Packing MR",
            Area::ConsolidacaoMr => "Consolidação MR",
        }
    }

    /// Human-facing panel title.
    ///
    /// The AutoStore areas are spelled with a capital S in titles while the
    /// source data spells them `Autostore`; both spellings are kept.
    pub fn display_name(&self) -> &'static str {
        match self {
            Area::PackingAutostore => "Packing AutoStore",
            Area::PickingAutostore => "Picking AutoStore",
            Area::Shipping => "Shipping",
            Area::PackingMr => "Packing MR",
            Area::ConsolidacaoMr => "Consolidação MR",
        }
    }
}

// ── Records and table ─────────────────────────────────────────────────────────

/// A single cleaned row of the productivity sheet.
///
/// Every numeric metric is `Option<f64>`: `None` is a genuine blank in the
/// source (or an unparseable cell) and must never be conflated with `0.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductionRecord {
    /// Hour label of the row; rows without a valid integer hour are dropped.
    pub hora: i64,
    /// Raw `Área` value of the row.
    pub area: String,
    /// `Meta Planejada` – planned hourly target.
    pub planned_target: Option<f64>,
    /// `Meta Acumulada` – running target.
    pub cumulative_target: Option<f64>,
    /// `Realizado Hora` – realized units in the hour.
    pub hourly_realized: Option<f64>,
    /// `Realizado Acumulado` – running realized units.
    pub cumulative_realized: Option<f64>,
    /// `Tendência` – projected end-of-shift trend.
    pub trend: Option<f64>,
    /// `Dentro` – units within the service window for the hour.
    pub within: Option<f64>,
    /// `Fora` – units outside the service window for the hour.
    pub outside: Option<f64>,
    /// `Dentro Acumulado` – running within-window units.
    pub cumulative_within: Option<f64>,
    /// `Fora Acumulado` – running outside-window units.
    pub cumulative_outside: Option<f64>,
}

/// The validated, typed, hour-sorted table produced by one fetch cycle.
///
/// Invariants: every record has a valid integer `hora`, and records are in
/// ascending `hora` order (stable with respect to the source row order).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NormalizedTable {
    /// Records in ascending `hora` order.
    pub records: Vec<ProductionRecord>,
    /// Source rows discarded because their `Hora` did not parse.
    pub dropped_rows: usize,
}

impl NormalizedTable {
    /// Number of records kept after normalization.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// `true` when no record survived normalization.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records belonging to `area`, in table order.
    ///
    /// The slice is an owned copy so each area panel can be derived
    /// independently of the table's lifetime.
    pub fn slice(&self, area: Area) -> Vec<ProductionRecord> {
        self.records
            .iter()
            .filter(|r| r.area == area.csv_name())
            .cloned()
            .collect()
    }
}

// ── Chart derivation output ───────────────────────────────────────────────────

/// Which of the two chart renderings a payload feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartVariant {
    /// Running totals across the shift; y-axis hidden by design.
    Cumulative,
    /// Per-hour realized vs. planned; y-axis bounded with 10 % headroom.
    Hourly,
}

/// Per-bar classification driving the bar color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorTag {
    /// Realized met or beat the comparison value.
    OnTrack,
    /// Realized fell short (or, for the cumulative variant, a value is blank).
    Behind,
    /// Hourly variant only: realized or target is blank.
    Neutral,
}

/// Everything the rendering layer needs to draw one chart for one area.
///
/// All sequences are positionally aligned with the area slice they were
/// derived from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartPayload {
    pub variant: ChartVariant,
    /// Hour labels for the x axis.
    pub hour_labels: Vec<String>,
    /// Bar heights; `None` renders as a blank, never as zero.
    pub bars: Vec<Option<f64>>,
    /// Color classification per bar.
    pub colors: Vec<ColorTag>,
    /// Target line values.
    pub target_line: Vec<Option<f64>>,
    /// Trend line values; only the cumulative variant carries one.
    pub trend_line: Option<Vec<Option<f64>>>,
    /// Upper y-axis bound; `None` means the axis is hidden.
    pub axis_upper_bound: Option<f64>,
}

/// Realized/target totals for one area, shown above its charts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TotalsSummary {
    /// Sum of hourly realized values, blanks counted as zero.
    pub realized_total: f64,
    /// Sum of planned hourly targets, blanks counted as zero.
    pub target_total: f64,
    /// `realized_total - target_total`.
    pub deviation: f64,
    /// `deviation / target_total`, absent when the target total is zero.
    pub deviation_fraction: Option<f64>,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
