//! Error types for fetching and normalizing the productivity export.

use thiserror::Error;

/// Result type for data-loading operations.
pub type Result<T> = std::result::Result<T, LoadError>;

/// Errors that can occur while loading the normalized table.
///
/// Every failure here must surface to the caller: the loader never returns
/// a silently empty table.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The HTTP request to the export URL failed at the transport level.
    #[error("Failed to fetch {url}: {source}")]
    Fetch {
        /// URL that was requested.
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The export URL answered with a non-success status code.
    #[error("Unexpected HTTP status {status} from {url}")]
    HttpStatus {
        /// URL that was requested.
        url: String,
        /// Numeric status code of the response.
        status: u16,
    },

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    /// The response body is not parseable as delimited text.
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the export header.
    #[error("Required column '{0}' is missing from the export")]
    MissingColumn(&'static str),
}
