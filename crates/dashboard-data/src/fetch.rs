//! HTTP retrieval of the published CSV export.
//!
//! [`HttpSource`] is the production [`SnapshotSource`]: one GET against the
//! configured export URL with a bounded timeout, then normalization and
//! snapshot assembly. The trait seam exists so the runtime cache can be
//! exercised against in-memory sources in tests.

use std::future::Future;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::{LoadError, Result};
use crate::normalize::normalize;
use crate::snapshot::{build_snapshot, DashboardSnapshot};

// ── SnapshotSource ────────────────────────────────────────────────────────────

/// Anything that can produce a fresh [`DashboardSnapshot`].
///
/// The returned future must be `Send` so the runtime can drive a load from a
/// spawned task.
pub trait SnapshotSource: Send + Sync {
    /// Produce a fresh snapshot, failing loudly on fetch or parse problems.
    fn load(&self) -> impl Future<Output = Result<DashboardSnapshot>> + Send;
}

// ── HttpSource ────────────────────────────────────────────────────────────────

/// Fetches the CSV export over HTTP(S) and assembles a snapshot from it.
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    /// Build a source for `url` with a bounded per-request `timeout`.
    ///
    /// The published-sheet endpoint answers redirects, which reqwest follows
    /// by default.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }

    /// The export URL this source polls; doubles as the cache key identity.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl SnapshotSource for HttpSource {
    async fn load(&self) -> Result<DashboardSnapshot> {
        let fetch_start = Instant::now();
        let body = fetch_csv(&self.client, &self.url).await?;
        let fetch_seconds = fetch_start.elapsed().as_secs_f64();

        let normalize_start = Instant::now();
        let table = normalize(&body)?;
        let normalize_seconds = normalize_start.elapsed().as_secs_f64();

        debug!(
            bytes = body.len(),
            rows = table.len(),
            fetch_seconds,
            "export fetched"
        );

        Ok(build_snapshot(&table, fetch_seconds, normalize_seconds))
    }
}

// ── Fetch ─────────────────────────────────────────────────────────────────────

/// Download the CSV body from `url`.
///
/// A transport failure maps to [`LoadError::Fetch`]; a non-success status to
/// [`LoadError::HttpStatus`]. Neither is ever swallowed into an empty table.
pub async fn fetch_csv(client: &reqwest::Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| LoadError::Fetch {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|source| LoadError::Fetch {
        url: url.to_string(),
        source,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
