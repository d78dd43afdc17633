use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{DashboardError, Result};

/// Published CSV export polled when no `--source-url` is given.
pub const DEFAULT_SOURCE_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vQc7pTiScl6n_M9hRk1xrTBPUVdG6jtErnsS3skoZiC-49NdFyQd5D3877D3M4wM8kXf27gZvCjY5vo/pub?gid=390048025&single=true&output=csv";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Terminal dashboard for inbound productivity tracking
#[derive(Parser, Debug, Clone)]
#[command(
    name = "inbound-dashboard",
    about = "Terminal dashboard for planned-vs-actual inbound productivity",
    version
)]
pub struct Settings {
    /// URL of the published CSV export
    #[arg(long, env = "DASHBOARD_SOURCE_URL", default_value = DEFAULT_SOURCE_URL)]
    pub source_url: String,

    /// View mode
    #[arg(long, default_value = "live", value_parser = ["live", "summary"])]
    pub view: String,

    /// Output format for the summary view
    #[arg(long, default_value = "table", value_parser = ["table", "json"])]
    pub format: String,

    /// Seconds the fetched table stays fresh before a refetch (60-3600)
    #[arg(long, default_value = "300", value_parser = clap::value_parser!(u64).range(60..=3600))]
    pub cache_ttl: u64,

    /// Seconds between dashboard refreshes (10-600)
    #[arg(long, default_value = "60", value_parser = clap::value_parser!(u64).range(10..=600))]
    pub refresh_rate: u64,

    /// HTTP request timeout in seconds (1-120)
    #[arg(long, default_value = "30", value_parser = clap::value_parser!(u64).range(1..=120))]
    pub fetch_timeout: u64,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used parameters saved to `~/.inbound-dashboard/last_used.json`.
///
/// The source URL is deliberately never persisted: pointing the dashboard at
/// a different sheet must always be an explicit choice.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_rate: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_ttl: Option<u64>,
}

impl LastUsedParams {
    /// Return the default path to the persisted config file.
    /// Uses `~/.inbound-dashboard/last_used.json`.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Return the config path rooted at `base_dir` (used for testing).
    pub fn config_path_in(base_dir: &std::path::Path) -> PathBuf {
        base_dir.join(".inbound-dashboard").join("last_used.json")
    }

    /// Load persisted params from the default path.
    /// Returns `Default` when the file is absent or cannot be parsed.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load persisted params from an explicit path.
    pub fn load_from(path: &std::path::Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Atomically write params to the default path, creating parent directories
    /// if needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Atomically write params to an explicit path.
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        self.write_atomic(path)
            .map_err(|source| DashboardError::SettingsWrite {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Write to a temp file then rename for atomicity.
    fn write_atomic(&self, path: &std::path::Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the default config file if it exists.
    pub fn clear() -> Result<()> {
        Self::clear_at(&Self::config_path())
    }

    /// Delete the config file at an explicit path if it exists.
    pub fn clear_at(path: &std::path::Path) -> Result<()> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments, merge with last-used params where no explicit CLI
    /// value was provided, apply the `--debug` override, and persist the
    /// result.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Same as [`Self::load_with_last_used`] but accepts an explicit argument
    /// list, enabling unit-testing without spawning subprocesses.
    pub fn load_with_last_used_from_args(args: Vec<std::ffi::OsString>) -> Self {
        Self::load_with_last_used_impl(args, &LastUsedParams::config_path())
    }

    /// Full implementation – accepts args and an explicit config path so that
    /// tests can redirect to a temporary directory.
    pub fn load_with_last_used_impl(
        args: Vec<std::ffi::OsString>,
        config_path: &std::path::Path,
    ) -> Self {
        // Build raw ArgMatches so we can query ValueSource.
        let matches = Settings::command().get_matches_from(args.clone());

        // Parse into the typed struct using the same args.
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            let _ = LastUsedParams::clear_at(config_path);
            return Self::apply_debug_override(settings);
        }

        let last = LastUsedParams::load_from(config_path);

        // Merge last-used values for fields that were NOT explicitly set on the
        // command line (CLI always wins). The source URL is never merged.
        // NOTE: clap stores the arg id using the *field name* (underscores),
        // not the long-flag spelling (hyphens).
        if !is_arg_explicitly_set(&matches, "theme") {
            if let Some(v) = last.theme {
                settings.theme = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "view") {
            if let Some(v) = last.view {
                settings.view = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "refresh_rate") {
            if let Some(v) = last.refresh_rate {
                settings.refresh_rate = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "cache_ttl") {
            if let Some(v) = last.cache_ttl {
                settings.cache_ttl = v;
            }
        }

        settings = Self::apply_debug_override(settings);

        // Persist current settings for next run.
        let params = LastUsedParams::from(&settings);
        let _ = params.save_to(config_path);

        settings
    }

    /// `--debug` overrides the log level.
    fn apply_debug_override(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────────

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            theme: Some(s.theme.clone()),
            view: Some(s.view.clone()),
            refresh_rate: Some(s.refresh_rate),
            cache_ttl: Some(s.cache_ttl),
        }
    }
}

// ── Helper: check if an arg was explicitly set on the command line ─────────────

/// Returns `true` when `name` was supplied explicitly on the command line
/// (not via default value or environment variable).
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    // ── Helpers ───────────────────────────────────────────────────────────────

    /// Build the config path inside `tmp`.
    fn tmp_config_path(tmp: &TempDir) -> PathBuf {
        LastUsedParams::config_path_in(tmp.path())
    }

    /// Save `params` to `tmp`, then load them back.
    fn round_trip(tmp: &TempDir, params: &LastUsedParams) -> LastUsedParams {
        let path = tmp_config_path(tmp);
        params.save_to(&path).expect("save");
        LastUsedParams::load_from(&path)
    }

    // ── test_last_used_params_save_load ───────────────────────────────────────

    #[test]
    fn test_last_used_params_save_load() {
        let tmp = TempDir::new().expect("tempdir");
        let params = LastUsedParams {
            theme: Some("dark".to_string()),
            view: Some("summary".to_string()),
            refresh_rate: Some(30),
            cache_ttl: Some(600),
        };

        let loaded = round_trip(&tmp, &params);

        assert_eq!(loaded.theme, Some("dark".to_string()));
        assert_eq!(loaded.view, Some("summary".to_string()));
        assert_eq!(loaded.refresh_rate, Some(30));
        assert_eq!(loaded.cache_ttl, Some(600));
    }

    // ── test_last_used_params_clear ───────────────────────────────────────────

    #[test]
    fn test_last_used_params_clear() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp_config_path(&tmp);

        let params = LastUsedParams {
            theme: Some("light".to_string()),
            ..Default::default()
        };
        params.save_to(&path).expect("save");
        assert!(path.exists(), "file must exist after save");

        LastUsedParams::clear_at(&path).expect("clear");
        assert!(!path.exists(), "file must be gone after clear");
    }

    // ── test_save_to_unwritable_path ──────────────────────────────────────────

    #[test]
    fn test_save_to_unwritable_path_is_settings_write_error() {
        let tmp = TempDir::new().expect("tempdir");
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, "x").expect("write blocker");

        // The parent path is a regular file, so directory creation fails.
        let path = blocker.join("sub").join("last_used.json");
        let err = LastUsedParams::default().save_to(&path).unwrap_err();
        assert!(
            err.to_string().contains("Failed to write settings file"),
            "was: {err}"
        );
    }

    // ── test_last_used_params_default_when_missing ────────────────────────────

    #[test]
    fn test_last_used_params_default_when_missing() {
        let tmp = TempDir::new().expect("tempdir");
        // No file created – load should return default.
        let loaded = LastUsedParams::load_from(&tmp_config_path(&tmp));
        assert!(loaded.theme.is_none());
        assert!(loaded.view.is_none());
        assert!(loaded.refresh_rate.is_none());
        assert!(loaded.cache_ttl.is_none());
    }

    // ── test_settings_default_values ─────────────────────────────────────────

    #[test]
    fn test_settings_default_values() {
        // Parse with only the binary name (no flags) to get all defaults.
        let settings = Settings::parse_from(["inbound-dashboard"]);

        assert_eq!(settings.source_url, DEFAULT_SOURCE_URL);
        assert_eq!(settings.view, "live");
        assert_eq!(settings.format, "table");
        assert_eq!(settings.cache_ttl, 300);
        assert_eq!(settings.refresh_rate, 60);
        assert_eq!(settings.fetch_timeout, 30);
        assert_eq!(settings.theme, "auto");
        assert_eq!(settings.log_level, "INFO");
        assert!(settings.log_file.is_none());
        assert!(!settings.debug);
        assert!(!settings.clear);
    }

    // ── test_from_settings_to_last_used ──────────────────────────────────────

    #[test]
    fn test_from_settings_to_last_used() {
        let settings = Settings {
            source_url: "https://example.com/export.csv".to_string(),
            view: "summary".to_string(),
            format: "table".to_string(),
            cache_ttl: 600,
            refresh_rate: 120,
            fetch_timeout: 15,
            theme: "dark".to_string(),
            log_level: "INFO".to_string(),
            log_file: None,
            debug: false,
            clear: false,
        };

        let last = LastUsedParams::from(&settings);

        assert_eq!(last.theme, Some("dark".to_string()));
        assert_eq!(last.view, Some("summary".to_string()));
        assert_eq!(last.refresh_rate, Some(120));
        assert_eq!(last.cache_ttl, Some(600));
        // The source URL is NOT stored in LastUsedParams.
    }

    // ── test_settings_cli_parsing ─────────────────────────────────────────────

    #[test]
    fn test_settings_cli_explicit_source_url() {
        let settings = Settings::parse_from([
            "inbound-dashboard",
            "--source-url",
            "https://example.com/data.csv",
        ]);
        assert_eq!(settings.source_url, "https://example.com/data.csv");
    }

    #[test]
    fn test_settings_cli_debug_flag() {
        let settings = Settings::parse_from(["inbound-dashboard", "--debug"]);
        assert!(settings.debug);
    }

    #[test]
    fn test_settings_cli_cache_ttl() {
        let settings = Settings::parse_from(["inbound-dashboard", "--cache-ttl", "600"]);
        assert_eq!(settings.cache_ttl, 600);
    }

    #[test]
    fn test_settings_cli_log_file() {
        let settings =
            Settings::parse_from(["inbound-dashboard", "--log-file", "/tmp/dashboard.log"]);
        assert_eq!(settings.log_file, Some(PathBuf::from("/tmp/dashboard.log")));
    }

    // ── test_load_with_last_used (uses config path injection) ─────────────────

    #[test]
    fn test_load_with_last_used_merges_persisted_theme() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);

        let params = LastUsedParams {
            theme: Some("dark".to_string()),
            view: Some("live".to_string()),
            ..Default::default()
        };
        params.save_to(&config_path).expect("save");

        // Parse without --theme flag → should use persisted value.
        let settings =
            Settings::load_with_last_used_impl(vec!["inbound-dashboard".into()], &config_path);
        assert_eq!(settings.theme, "dark");
    }

    #[test]
    fn test_load_with_last_used_cli_overrides_persisted() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);

        let params = LastUsedParams {
            theme: Some("dark".to_string()),
            ..Default::default()
        };
        params.save_to(&config_path).expect("save");

        // Explicit --theme light on CLI must win.
        let settings = Settings::load_with_last_used_impl(
            vec!["inbound-dashboard".into(), "--theme".into(), "light".into()],
            &config_path,
        );
        assert_eq!(settings.theme, "light");
    }

    #[test]
    fn test_load_with_last_used_clear_removes_file() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);

        let params = LastUsedParams {
            theme: Some("classic".to_string()),
            ..Default::default()
        };
        params.save_to(&config_path).expect("save");
        assert!(config_path.exists(), "file must exist before clear");

        Settings::load_with_last_used_impl(
            vec!["inbound-dashboard".into(), "--clear".into()],
            &config_path,
        );

        assert!(!config_path.exists(), "file must be gone after --clear");
    }

    #[test]
    fn test_load_with_last_used_debug_overrides_log_level() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);

        let settings = Settings::load_with_last_used_impl(
            vec!["inbound-dashboard".into(), "--debug".into()],
            &config_path,
        );
        assert_eq!(settings.log_level, "DEBUG");
    }

    #[test]
    fn test_load_with_last_used_source_url_not_loaded_from_persisted() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);

        // Even with persisted params present, the default source URL applies
        // unless given on the command line.
        let params = LastUsedParams {
            theme: Some("dark".to_string()),
            ..Default::default()
        };
        params.save_to(&config_path).expect("save");

        let settings =
            Settings::load_with_last_used_impl(vec!["inbound-dashboard".into()], &config_path);
        assert_eq!(settings.source_url, DEFAULT_SOURCE_URL);
    }

    #[test]
    fn test_load_with_last_used_persists_after_run() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);

        Settings::load_with_last_used_impl(
            vec![
                "inbound-dashboard".into(),
                "--theme".into(),
                "classic".into(),
            ],
            &config_path,
        );

        // After a run the file should have been created.
        assert!(
            config_path.exists(),
            "config file must be persisted after run"
        );
        let loaded = LastUsedParams::load_from(&config_path);
        assert_eq!(loaded.theme, Some("classic".to_string()));
    }

    #[test]
    fn test_load_with_last_used_refresh_rate_merged() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);

        let params = LastUsedParams {
            refresh_rate: Some(120),
            ..Default::default()
        };
        params.save_to(&config_path).expect("save");

        let settings =
            Settings::load_with_last_used_impl(vec!["inbound-dashboard".into()], &config_path);
        assert_eq!(settings.refresh_rate, 120);
    }
}
