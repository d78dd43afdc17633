//! Background refresh orchestrator.
//!
//! Runs the fetch → normalize → derive pipeline in a tokio task on a fixed
//! interval, sending [`RefreshEvent`] snapshots through an `mpsc` channel so
//! the TUI event loop can consume them without any shared mutable state.
//! Rendering happens once per event; there is no implicit reactivity.

use std::time::Duration;

use chrono::{DateTime, Utc};
use dashboard_data::fetch::SnapshotSource;
use dashboard_data::snapshot::DashboardSnapshot;
use tokio::sync::mpsc;
use tokio::time;

use crate::data_manager::DataManager;

// ── Public types ──────────────────────────────────────────────────────────────

/// A single refresh result forwarded to the UI layer.
///
/// This is the primary data contract between the background runtime and the
/// presentation layer. `snapshot` is `None` only when no fetch has ever
/// succeeded; `last_error` is set whenever the most recent fetch failed,
/// even if a stale snapshot is still being shown.
#[derive(Debug, Clone)]
pub struct RefreshEvent {
    /// Latest snapshot, possibly stale after a fetch failure.
    pub snapshot: Option<DashboardSnapshot>,
    /// When this event was emitted.
    pub emitted_at: DateTime<Utc>,
    /// Age of the cached snapshot at emission time, in seconds.
    pub cache_age_secs: Option<u64>,
    /// Description of the most recent fetch failure, if any.
    pub last_error: Option<String>,
}

// ── RefreshOrchestrator ───────────────────────────────────────────────────────

/// Background refresh coordinator.
///
/// Call [`RefreshOrchestrator::start`] to spin up the refresh loop in a
/// dedicated tokio task and receive a channel endpoint for [`RefreshEvent`]
/// updates.
pub struct RefreshOrchestrator<S> {
    /// How often the dashboard asks for data (the cache TTL decides whether
    /// a tick actually refetches).
    refresh_interval: Duration,
    manager: DataManager<S>,
}

impl<S: SnapshotSource + 'static> RefreshOrchestrator<S> {
    /// Create a new orchestrator.
    ///
    /// # Parameters
    /// - `source`        – snapshot source to poll.
    /// - `refresh_secs`  – seconds between refresh events.
    /// - `cache_ttl_secs` – seconds the fetched table stays fresh.
    pub fn new(source: S, refresh_secs: u64, cache_ttl_secs: u64) -> Self {
        Self {
            refresh_interval: Duration::from_secs(refresh_secs),
            manager: DataManager::new(source, cache_ttl_secs),
        }
    }

    /// Start the refresh loop.
    ///
    /// Spawns a tokio task that runs the loop. Returns:
    /// - An `mpsc::Receiver<RefreshEvent>` for the caller to poll.
    /// - A [`RefreshHandle`] that can be used to abort the loop.
    pub fn start(self) -> (mpsc::Receiver<RefreshEvent>, RefreshHandle) {
        // Buffer a modest number of events so slow consumers don't stall the loop.
        let (tx, rx) = mpsc::channel(16);

        let handle = tokio::spawn(async move {
            self.refresh_loop(tx).await;
        });

        (rx, RefreshHandle { handle })
    }

    // ── Private implementation ────────────────────────────────────────────

    /// The main refresh loop.
    ///
    /// Performs an immediate forced fetch on startup, then repeats on
    /// `refresh_interval`. The loop exits when the receiver side of the
    /// channel is closed.
    async fn refresh_loop(self, tx: mpsc::Sender<RefreshEvent>) {
        // Initial fetch (force refresh to populate immediately).
        self.fetch_and_send(&tx, true).await;

        let mut interval = time::interval(self.refresh_interval);
        // Consume the first tick which fires immediately; we already fetched above.
        interval.tick().await;

        loop {
            interval.tick().await;

            if tx.is_closed() {
                tracing::debug!("refresh channel closed; exiting loop");
                break;
            }

            self.fetch_and_send(&tx, false).await;
        }
    }

    /// Fetch via the manager and send a [`RefreshEvent`] to the channel.
    async fn fetch_and_send(&self, tx: &mpsc::Sender<RefreshEvent>, force: bool) {
        let snapshot = self.manager.get(force).await;
        if snapshot.is_none() {
            tracing::warn!("no snapshot available; emitting degraded event");
        }

        let event = RefreshEvent {
            snapshot,
            emitted_at: Utc::now(),
            cache_age_secs: self.manager.cache_age().await.map(|d| d.as_secs()),
            last_error: self.manager.last_error().await,
        };

        if let Err(e) = tx.send(event).await {
            tracing::warn!(error = %e, "failed to send refresh event; receiver dropped");
        }
    }
}

// ── RefreshHandle ─────────────────────────────────────────────────────────────

/// A handle to the background refresh task.
///
/// Drop or call [`RefreshHandle::abort`] to stop the loop.
pub struct RefreshHandle {
    handle: tokio::task::JoinHandle<()>,
}

impl RefreshHandle {
    /// Immediately abort the refresh loop.
    pub fn abort(&self) {
        self.handle.abort();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::models::NormalizedTable;
    use dashboard_data::error::{LoadError, Result as LoadResult};
    use dashboard_data::snapshot::build_snapshot;

    // ── helpers ───────────────────────────────────────────────────────────

    struct EmptySource;

    impl SnapshotSource for EmptySource {
        async fn load(&self) -> LoadResult<DashboardSnapshot> {
            Ok(build_snapshot(&NormalizedTable::default(), 0.0, 0.0))
        }
    }

    struct FailingSource;

    impl SnapshotSource for FailingSource {
        async fn load(&self) -> LoadResult<DashboardSnapshot> {
            Err(LoadError::MissingColumn("Hora"))
        }
    }

    // ── orchestrator creation ─────────────────────────────────────────────

    #[test]
    fn test_orchestrator_creation() {
        let orch = RefreshOrchestrator::new(EmptySource, 60, 300);
        assert_eq!(orch.refresh_interval, Duration::from_secs(60));
    }

    // ── async: start / abort ──────────────────────────────────────────────

    #[tokio::test]
    async fn test_orchestrator_start_and_abort() {
        let orch = RefreshOrchestrator::new(EmptySource, 60, 300);
        let (_rx, handle) = orch.start();

        // Give the task a moment to start, then abort it.
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.abort();
    }

    // ── async: receives initial snapshot ──────────────────────────────────

    #[tokio::test]
    async fn test_orchestrator_sends_initial_event() {
        let orch = RefreshOrchestrator::new(EmptySource, 60, 300);
        let (mut rx, handle) = orch.start();

        let event = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for event")
            .expect("channel closed before receiving event");

        let snapshot = event.snapshot.expect("snapshot present");
        assert_eq!(snapshot.areas.len(), 5);
        assert!(event.last_error.is_none());
        assert!(event.cache_age_secs.is_some());

        handle.abort();
    }

    #[tokio::test]
    async fn test_orchestrator_degraded_event_on_failure() {
        let orch = RefreshOrchestrator::new(FailingSource, 60, 300);
        let (mut rx, handle) = orch.start();

        // The failing source retries three times before the first event.
        let event = tokio::time::timeout(Duration::from_secs(10), rx.recv())
            .await
            .expect("timed out waiting for event")
            .expect("channel closed before receiving event");

        assert!(event.snapshot.is_none());
        let err = event.last_error.expect("error is surfaced to the UI");
        assert!(err.contains("Hora"), "error was: {err}");

        handle.abort();
    }
}
