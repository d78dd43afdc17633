use std::path::PathBuf;
use thiserror::Error;

/// All errors produced outside the data-loading layer.
///
/// Loading failures (network, CSV shape) have their own taxonomy in the data
/// crate; this enum covers configuration, terminal and I/O concerns shared
/// by the runtime, UI and binary layers.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A persisted settings file could not be written.
    #[error("Failed to write settings file {path}: {source}")]
    SettingsWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An error originating from the terminal / TUI layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Pass-through for raw I/O errors that do not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_config() {
        let err = DashboardError::Config("missing source url".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing source url");
    }

    #[test]
    fn test_error_display_settings_write() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = DashboardError::SettingsWrite {
            path: PathBuf::from("/etc/last_used.json"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to write settings file"));
        assert!(msg.contains("/etc/last_used.json"));
    }

    #[test]
    fn test_error_display_terminal() {
        let err = DashboardError::Terminal("crossterm failure".to_string());
        assert_eq!(err.to_string(), "Terminal error: crossterm failure");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: DashboardError = io_err.into();
        assert!(err.to_string().contains("no such file"));
    }

    #[test]
    fn test_error_from_anyhow() {
        let err: DashboardError = anyhow::anyhow!("boom").into();
        assert_eq!(err.to_string(), "boom");
    }
}
