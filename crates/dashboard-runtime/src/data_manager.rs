//! TTL-cached data manager for the dashboard runtime.
//!
//! Wraps a [`SnapshotSource`] with a time-to-live cache and transparent
//! retry logic. Callers use [`DataManager::get`] to obtain a fresh-or-cached
//! [`DashboardSnapshot`]; the manager handles staleness checks, up to three
//! fetch attempts with back-off, and graceful fallback to the previous cache
//! on transient failure.
//!
//! The cache slot sits behind an async mutex held for the whole
//! check-then-fetch sequence, so concurrent callers sharing one manager
//! trigger at most one underlying fetch per TTL window; late arrivals block
//! and then observe the freshly cached snapshot.

use std::time::{Duration, Instant};

use dashboard_data::fetch::SnapshotSource;
use dashboard_data::snapshot::DashboardSnapshot;
use tokio::sync::Mutex;

// ── Defaults ──────────────────────────────────────────────────────────────────

/// Default cache TTL in seconds (the source sheet updates every few minutes).
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Maximum number of fetch attempts before giving up and returning stale data.
const MAX_RETRY_ATTEMPTS: u32 = 3;

/// Back-off step between fetch attempts.
const RETRY_BACKOFF_MS: u64 = 500;

// ── CacheState ────────────────────────────────────────────────────────────────

/// Observable lifecycle of the cached table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// Nothing has been fetched yet.
    Empty,
    /// Cached snapshot is within its TTL.
    Fresh,
    /// Cached snapshot has outlived its TTL.
    Stale,
    /// An exclusive fetch is currently in flight.
    Fetching,
}

// ── DataManager ───────────────────────────────────────────────────────────────

/// What the manager knows between fetches.
struct CacheSlot {
    snapshot: Option<DashboardSnapshot>,
    fetched_at: Option<Instant>,
    last_error: Option<String>,
}

/// TTL-cached wrapper around a snapshot source.
///
/// One manager caches one source; the source identity (its URL) is the cache
/// key by construction.
pub struct DataManager<S> {
    source: S,
    /// Maximum age of cached data before it is considered stale.
    ttl: Duration,
    slot: Mutex<CacheSlot>,
}

impl<S: SnapshotSource> DataManager<S> {
    /// Create a new manager around `source` with a TTL in seconds.
    pub fn new(source: S, ttl_secs: u64) -> Self {
        Self {
            source,
            ttl: Duration::from_secs(ttl_secs),
            slot: Mutex::new(CacheSlot {
                snapshot: None,
                fetched_at: None,
                last_error: None,
            }),
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Return a snapshot, using the cache when it is still valid.
    ///
    /// When `force_refresh` is `true` the cache is bypassed and a fresh fetch
    /// is always attempted. On fetch failure the previous snapshot (if any)
    /// is returned as a best-effort fallback and the error is recorded for
    /// [`Self::last_error`].
    pub async fn get(&self, force_refresh: bool) -> Option<DashboardSnapshot> {
        let mut slot = self.slot.lock().await;

        if !force_refresh && is_fresh(&slot, self.ttl) {
            tracing::debug!("returning cached snapshot");
            return slot.snapshot.clone();
        }

        match self.fetch_with_retry().await {
            Ok(snapshot) => {
                tracing::debug!(
                    rows = snapshot.metadata.rows_fetched,
                    dropped = snapshot.metadata.rows_dropped,
                    "snapshot cache updated"
                );
                slot.snapshot = Some(snapshot);
                slot.fetched_at = Some(Instant::now());
                slot.last_error = None;
                slot.snapshot.clone()
            }
            Err(e) => {
                tracing::warn!(error = %e, "fetch failed; falling back to cached snapshot");
                slot.last_error = Some(e);
                // Return whatever we have, even if stale.
                slot.snapshot.clone()
            }
        }
    }

    /// Discard the current cache, forcing the next [`Self::get`] to fetch.
    pub async fn invalidate(&self) {
        let mut slot = self.slot.lock().await;
        slot.snapshot = None;
        slot.fetched_at = None;
        tracing::debug!("cache invalidated");
    }

    /// Age of the current cache entry, or `None` if nothing has been fetched.
    pub async fn cache_age(&self) -> Option<Duration> {
        self.slot.lock().await.fetched_at.map(|ts| ts.elapsed())
    }

    /// Human-readable description of the last fetch error, or `None`.
    pub async fn last_error(&self) -> Option<String> {
        self.slot.lock().await.last_error.clone()
    }

    /// Current cache state without waiting on an in-flight fetch.
    ///
    /// A locked slot means a fetch holds the exclusive lock right now.
    pub fn state(&self) -> CacheState {
        match self.slot.try_lock() {
            Err(_) => CacheState::Fetching,
            Ok(slot) => match (slot.snapshot.as_ref(), slot.fetched_at) {
                (Some(_), Some(ts)) if ts.elapsed() < self.ttl => CacheState::Fresh,
                (Some(_), Some(_)) => CacheState::Stale,
                _ => CacheState::Empty,
            },
        }
    }

    // ── Private helpers ───────────────────────────────────────────────────

    /// Attempt up to [`MAX_RETRY_ATTEMPTS`] fetches with linear back-off.
    ///
    /// Back-off schedule: attempt 1 → 0 ms, attempt 2 → 500 ms,
    /// attempt 3 → 1000 ms.
    async fn fetch_with_retry(&self) -> Result<DashboardSnapshot, String> {
        let mut last_err = String::new();

        for attempt in 0..MAX_RETRY_ATTEMPTS {
            if attempt > 0 {
                let sleep_ms = u64::from(attempt) * RETRY_BACKOFF_MS;
                tracing::debug!(attempt, sleep_ms, "retrying fetch after back-off");
                tokio::time::sleep(Duration::from_millis(sleep_ms)).await;
            }

            match self.source.load().await {
                Ok(snapshot) => return Ok(snapshot),
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "fetch attempt failed");
                    last_err = e.to_string();
                }
            }
        }

        Err(last_err)
    }
}

/// `true` when the slot holds data that is still within its TTL.
fn is_fresh(slot: &CacheSlot, ttl: Duration) -> bool {
    match (slot.snapshot.as_ref(), slot.fetched_at) {
        (Some(_), Some(ts)) => ts.elapsed() < ttl,
        _ => false,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
