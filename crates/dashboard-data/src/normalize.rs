//! CSV-to-table normalization for the productivity export.
//!
//! Turns the raw delimited text of the published sheet into a
//! [`NormalizedTable`]: numeric cells are cleaned (literal `None` stripped,
//! `.` treated as a thousands separator), rows without a valid integer
//! `Hora` are dropped, and the result is stably sorted by hour.

use dashboard_core::models::{NormalizedTable, ProductionRecord};
use tracing::debug;

use crate::error::{LoadError, Result};

// ── Column names ──────────────────────────────────────────────────────────────

/// Required: hour label of each row.
const COL_HORA: &str = "Hora";
/// Required: operational area of each row.
const COL_AREA: &str = "Área";

const COL_META_PLANEJADA: &str = "Meta Planejada";
const COL_META_ACUMULADA: &str = "Meta Acumulada";
const COL_REALIZADO_HORA: &str = "Realizado Hora";
const COL_REALIZADO_ACUMULADO: &str = "Realizado Acumulado";
const COL_TENDENCIA: &str = "Tendência";
const COL_DENTRO: &str = "Dentro";
const COL_FORA: &str = "Fora";
const COL_DENTRO_ACUMULADO: &str = "Dentro Acumulado";
const COL_FORA_ACUMULADO: &str = "Fora Acumulado";

// ── Public API ────────────────────────────────────────────────────────────────

/// Parse and normalize the raw CSV text of the export.
///
/// Fails when the text is not parseable as delimited records or when the
/// `Hora` / `Área` headers are missing entirely. Optional metric columns may
/// be absent; their field is then blank on every record. Rows whose `Hora`
/// cell does not clean up to an integer are dropped and counted in
/// [`NormalizedTable::dropped_rows`].
pub fn normalize(csv_text: &str) -> Result<NormalizedTable> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(csv_text.as_bytes());

    let headers = reader.headers()?.clone();
    let hora_idx =
        column_index(&headers, COL_HORA).ok_or(LoadError::MissingColumn(COL_HORA))?;
    let area_idx =
        column_index(&headers, COL_AREA).ok_or(LoadError::MissingColumn(COL_AREA))?;
    let metrics = MetricColumns::locate(&headers);

    let mut records: Vec<ProductionRecord> = Vec::new();
    let mut dropped = 0usize;

    for row in reader.records() {
        let row = row?;

        // Rows without a valid integer hour carry no plottable position.
        let hora = match row.get(hora_idx).and_then(parse_hour) {
            Some(h) => h,
            None => {
                dropped += 1;
                continue;
            }
        };

        let area = row.get(area_idx).unwrap_or("").to_string();

        records.push(ProductionRecord {
            hora,
            area,
            planned_target: metric(&row, metrics.planned_target),
            cumulative_target: metric(&row, metrics.cumulative_target),
            hourly_realized: metric(&row, metrics.hourly_realized),
            cumulative_realized: metric(&row, metrics.cumulative_realized),
            trend: metric(&row, metrics.trend),
            within: metric(&row, metrics.within),
            outside: metric(&row, metrics.outside),
            cumulative_within: metric(&row, metrics.cumulative_within),
            cumulative_outside: metric(&row, metrics.cumulative_outside),
        });
    }

    // Stable: rows sharing an hour keep their source order.
    records.sort_by_key(|r| r.hora);

    debug!(
        kept = records.len(),
        dropped, "normalized export rows"
    );

    Ok(NormalizedTable {
        records,
        dropped_rows: dropped,
    })
}

// ── Cell parsing ──────────────────────────────────────────────────────────────

/// Clean and parse a numeric metric cell.
///
/// The literal substring `None` is stripped, whitespace trimmed, and `.` is
/// treated as a thousands separator (`1.234` → `1234`). Anything that still
/// fails to parse (including an empty cell) is absence, never zero.
fn parse_metric(raw: &str) -> Option<f64> {
    let cleaned = raw.replace("None", "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.replace('.', "").parse::<f64>().ok()
}

/// Clean and parse an `Hora` cell as an integer.
///
/// Hours are small labels (no thousands grouping); the same `None` stripping
/// applies before the integer parse.
fn parse_hour(raw: &str) -> Option<i64> {
    let cleaned = raw.replace("None", "");
    cleaned.trim().parse::<i64>().ok()
}

// ── Column lookup ─────────────────────────────────────────────────────────────

/// Position of `name` in the header record, if present.
fn column_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

/// Read a metric cell by optional column index.
fn metric(row: &csv::StringRecord, idx: Option<usize>) -> Option<f64> {
    idx.and_then(|i| row.get(i)).and_then(parse_metric)
}

/// Header positions of the nine metric columns; any of them may be absent.
struct MetricColumns {
    planned_target: Option<usize>,
    cumulative_target: Option<usize>,
    hourly_realized: Option<usize>,
    cumulative_realized: Option<usize>,
    trend: Option<usize>,
    within: Option<usize>,
    outside: Option<usize>,
    cumulative_within: Option<usize>,
    cumulative_outside: Option<usize>,
}

impl MetricColumns {
    fn locate(headers: &csv::StringRecord) -> Self {
        Self {
            planned_target: column_index(headers, COL_META_PLANEJADA),
            cumulative_target: column_index(headers, COL_META_ACUMULADA),
            hourly_realized: column_index(headers, COL_REALIZADO_HORA),
            cumulative_realized: column_index(headers, COL_REALIZADO_ACUMULADO),
            trend: column_index(headers, COL_TENDENCIA),
            within: column_index(headers, COL_DENTRO),
            outside: column_index(headers, COL_FORA),
            cumulative_within: column_index(headers, COL_DENTRO_ACUMULADO),
            cumulative_outside: column_index(headers, COL_FORA_ACUMULADO),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_HEADER: &str = "Área,Hora,Meta Planejada,Meta Acumulada,Realizado Hora,Realizado Acumulado,Tendência,Dentro,Fora,Dentro Acumulado,Fora Acumulado";

    fn table_from(rows: &[&str]) -> NormalizedTable {
        let text = format!("{FULL_HEADER}\n{}", rows.join("\n"));
        normalize(&text).expect("normalize")
    }

    // ── numeric cleaning ──────────────────────────────────────────────────────

    #[test]
    fn test_thousands_separator_parses_as_grouping() {
        let table = table_from(&["Shipping,1,1.234,,,,,,,,"]);
        assert_eq!(table.records[0].planned_target, Some(1_234.0));
    }

    #[test]
    fn test_literal_none_is_absence() {
        let table = table_from(&["Shipping,1,None,,,,,,,,"]);
        assert_eq!(table.records[0].planned_target, None);
    }

    #[test]
    fn test_empty_cell_is_absence_not_zero() {
        let table = table_from(&["Shipping,1,,,,,,,,,"]);
        assert_eq!(table.records[0].planned_target, None);
        assert_ne!(table.records[0].planned_target, Some(0.0));
    }

    #[test]
    fn test_unparseable_cell_is_absence_not_error() {
        let table = table_from(&["Shipping,1,n/a,,,,,,,,"]);
        assert_eq!(table.records[0].planned_target, None);
    }

    #[test]
    fn test_none_substring_is_stripped_not_matched_whole() {
        // The cleaning rule strips the substring, so "1.234None" → "1.234".
        let table = table_from(&["Shipping,1,1.234None,,,,,,,,"]);
        assert_eq!(table.records[0].planned_target, Some(1_234.0));
    }

    #[test]
    fn test_negative_values_parse() {
        let table = table_from(&["Shipping,1,-30,,,,,,,,"]);
        assert_eq!(table.records[0].planned_target, Some(-30.0));
    }

    // ── hour handling ─────────────────────────────────────────────────────────

    #[test]
    fn test_rows_without_hour_are_dropped_and_counted() {
        let table = table_from(&[
            "Shipping,1,10,,,,,,,,",
            "Shipping,,20,,,,,,,,",
            "Shipping,None,30,,,,,,,,",
            "Shipping,abc,40,,,,,,,,",
        ]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.dropped_rows, 3);
        assert_eq!(table.records[0].hora, 1);
    }

    #[test]
    fn test_hour_parses_as_integer() {
        let table = table_from(&["Shipping,14,,,,,,,,,"]);
        assert_eq!(table.records[0].hora, 14);
    }

    #[test]
    fn test_fractional_hour_is_dropped() {
        let table = table_from(&["Shipping,7.5,,,,,,,,,"]);
        assert!(table.is_empty());
        assert_eq!(table.dropped_rows, 1);
    }

    // ── ordering ──────────────────────────────────────────────────────────────

    #[test]
    fn test_records_sorted_ascending_by_hour() {
        let table = table_from(&[
            "Shipping,3,,,,,,,,,",
            "Shipping,1,,,,,,,,,",
            "Shipping,2,,,,,,,,,",
        ]);
        let hours: Vec<i64> = table.records.iter().map(|r| r.hora).collect();
        assert_eq!(hours, vec![1, 2, 3]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_hours() {
        // Two areas share hour 1; their relative source order must survive.
        let table = table_from(&[
            "Packing Autostore,1,10,,,,,,,,",
            "Shipping,1,20,,,,,,,,",
        ]);
        assert_eq!(table.records[0].area, "Packing Autostore");
        assert_eq!(table.records[1].area, "Shipping");
    }

    // ── header handling ───────────────────────────────────────────────────────

    #[test]
    fn test_missing_hora_header_is_an_error() {
        let err = normalize("Área,Meta Planejada\nShipping,100\n").unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("Hora")));
    }

    #[test]
    fn test_missing_area_header_is_an_error() {
        let err = normalize("Hora,Meta Planejada\n1,100\n").unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("Área")));
    }

    #[test]
    fn test_missing_metric_column_tolerated() {
        // Only Hora + Área present: every metric is absent on every record.
        let table = normalize("Área,Hora\nShipping,1\n").expect("normalize");
        assert_eq!(table.len(), 1);
        let rec = &table.records[0];
        assert_eq!(rec.planned_target, None);
        assert_eq!(rec.cumulative_outside, None);
    }

    #[test]
    fn test_header_only_input_is_a_valid_empty_table() {
        let table = normalize(&format!("{FULL_HEADER}\n")).expect("normalize");
        assert!(table.is_empty());
        assert_eq!(table.dropped_rows, 0);
    }

    #[test]
    fn test_short_rows_tolerated() {
        // Ragged row: cells past the row length read as absent.
        let table = table_from(&["Shipping,1,500"]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.records[0].planned_target, Some(500.0));
        assert_eq!(table.records[0].hourly_realized, None);
    }

    // ── all nine metrics mapped ───────────────────────────────────────────────

    #[test]
    fn test_all_metric_columns_mapped() {
        let table = table_from(&["Shipping,1,10,20,30,40,50,60,70,80,90"]);
        let rec = &table.records[0];
        assert_eq!(rec.planned_target, Some(10.0));
        assert_eq!(rec.cumulative_target, Some(20.0));
        assert_eq!(rec.hourly_realized, Some(30.0));
        assert_eq!(rec.cumulative_realized, Some(40.0));
        assert_eq!(rec.trend, Some(50.0));
        assert_eq!(rec.within, Some(60.0));
        assert_eq!(rec.outside, Some(70.0));
        assert_eq!(rec.cumulative_within, Some(80.0));
        assert_eq!(rec.cumulative_outside, Some(90.0));
    }

    // ── end-to-end scenario ───────────────────────────────────────────────────

    #[test]
    fn test_two_row_scenario() {
        let table = table_from(&[
            "Shipping,1,80,,100,,,,,,",
            "Shipping,2,50,,None,,,,,,",
        ]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.records[0].hourly_realized, Some(100.0));
        assert_eq!(table.records[1].hourly_realized, None);
        assert_eq!(table.records[1].planned_target, Some(50.0));
    }
}
