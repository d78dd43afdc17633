mod bootstrap;

use std::time::Duration;

use anyhow::Result;
use dashboard_core::error::DashboardError;
use dashboard_core::formatting::{format_count, format_fraction_percent, format_signed_count};
use dashboard_core::settings::Settings;
use dashboard_data::fetch::HttpSource;
use dashboard_data::snapshot::DashboardSnapshot;
use dashboard_runtime::data_manager::DataManager;
use dashboard_runtime::orchestrator::RefreshOrchestrator;
use dashboard_ui::app::App;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("Inbound dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "View: {}, Theme: {}, TTL: {}s, Refresh: {}s",
        settings.view,
        settings.theme,
        settings.cache_ttl,
        settings.refresh_rate
    );

    let source = HttpSource::new(
        settings.source_url.clone(),
        Duration::from_secs(settings.fetch_timeout),
    )?;

    match settings.view.as_str() {
        "live" => {
            tracing::info!("Starting live dashboard...");

            let orchestrator =
                RefreshOrchestrator::new(source, settings.refresh_rate, settings.cache_ttl);
            let (rx, handle) = orchestrator.start();

            let app = App::new(&settings.theme);

            // Run the TUI event loop. The loop exits on 'q' / Ctrl+C inside the TUI.
            // We also listen for Ctrl+C at the OS level so that signals received
            // while the terminal is in raw mode are handled cleanly.
            tokio::select! {
                result = app.run_live(rx) => {
                    handle.abort();
                    result.map_err(|e| DashboardError::Terminal(e.to_string()))?;
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Ctrl+C received; shutting down refresh task");
                    handle.abort();
                }
            }
        }

        "summary" => {
            tracing::info!("Running one-shot summary...");

            let manager = DataManager::new(source, settings.cache_ttl);
            let snapshot = match manager.get(true).await {
                Some(s) => s,
                None => {
                    let reason = manager
                        .last_error()
                        .await
                        .unwrap_or_else(|| "unknown".to_string());
                    anyhow::bail!("failed to load dashboard data: {reason}");
                }
            };

            match settings.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&snapshot)?),
                _ => print!("{}", render_summary(&snapshot)),
            }
        }

        // The CLI restricts --view, but a hand-edited last-used file can
        // carry anything.
        unknown => {
            return Err(DashboardError::Config(format!("unknown view mode: {unknown}")).into());
        }
    }

    Ok(())
}

// ── Summary rendering ──────────────────────────────────────────────────────────

/// Plain-text per-area totals table for the `summary` view.
fn render_summary(snapshot: &DashboardSnapshot) -> String {
    let mut out = String::new();
    out.push_str("Produtividade Inbound: resumo por área\n\n");
    out.push_str(&format!(
        "{:<20} {:>10} {:>10} {:>10} {:>9}\n",
        "Área", "Realizado", "Meta", "Desvio", "Desvio %"
    ));

    for panel in &snapshot.areas {
        let fraction = panel
            .totals
            .deviation_fraction
            .map(format_fraction_percent)
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "{:<20} {:>10} {:>10} {:>10} {:>9}\n",
            panel.area.display_name(),
            format_count(panel.totals.realized_total),
            format_count(panel.totals.target_total),
            format_signed_count(panel.totals.deviation),
            fraction,
        ));
    }

    out.push_str(&format!(
        "\n{} linhas ({} descartadas), gerado em {}\n",
        snapshot.metadata.rows_fetched,
        snapshot.metadata.rows_dropped,
        snapshot.metadata.generated_at,
    ));
    out
}

// ── Tests ──────────────────────────────────────────────────────────────────────
