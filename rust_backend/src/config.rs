//! Report configuration file support.
//!
//! This module reads the ticket source, report defaults and column aliases
//! from a TOML file. Every section is optional.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::algorithms::sla::{SlaPolicy, DEFAULT_SLA_THRESHOLD_DAYS};
use crate::error::{TicketError, TicketResult};
use crate::io::loaders::{ColumnAliases, TicketLoader};
use crate::io::source::{CsvFileSource, TicketSource};
use crate::time::window::View;

/// File name searched by [`ReportConfig::from_default_location`].
pub const DEFAULT_CONFIG_FILE: &str = "pmp_report.toml";

/// Report configuration from file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub source: SourceSettings,
    #[serde(default)]
    pub report: ReportSettings,
    #[serde(default)]
    pub columns: ColumnAliases,
}

/// Where the ticket sheet is read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSettings {
    /// Local CSV export
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Remote CSV export (requires the `remote-source` feature)
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Report defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSettings {
    #[serde(default = "default_view_name")]
    pub default_view: String,
    #[serde(default = "default_sla_threshold_days")]
    pub sla_threshold_days: i64,
}

fn default_cache_ttl_secs() -> u64 {
    60
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_view_name() -> String {
    View::ThisWeek.label().to_string()
}

fn default_sla_threshold_days() -> i64 {
    DEFAULT_SLA_THRESHOLD_DAYS
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            path: None,
            url: None,
            cache_ttl_secs: default_cache_ttl_secs(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            default_view: default_view_name(),
            sla_threshold_days: default_sla_threshold_days(),
        }
    }
}

impl ReportConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(ReportConfig)` if successful
    /// * `Err(TicketError::Configuration)` if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> TicketResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            TicketError::Configuration(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_str(&content)
    }

    /// Parse configuration from TOML text.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> TicketResult<Self> {
        toml::from_str(content).map_err(|e| {
            TicketError::Configuration(format!("Failed to parse config file: {}", e))
        })
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `pmp_report.toml` in:
    /// 1. Current directory
    /// 2. `rust_backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> TicketResult<Self> {
        let search_paths = vec![
            PathBuf::from(DEFAULT_CONFIG_FILE),
            PathBuf::from("rust_backend").join(DEFAULT_CONFIG_FILE),
            PathBuf::from("..").join(DEFAULT_CONFIG_FILE),
        ];

        for path in search_paths {
            if path.exists() {
                log::debug!("Using config file {}", path.display());
                return Self::from_file(&path);
            }
        }

        Err(TicketError::Configuration(format!(
            "No {} found in standard locations",
            DEFAULT_CONFIG_FILE
        )))
    }

    /// The configured default view.
    pub fn default_view(&self) -> TicketResult<View> {
        self.report.default_view.parse().map_err(|_| {
            TicketError::Configuration(format!(
                "Unknown report.default_view '{}'",
                self.report.default_view
            ))
        })
    }

    pub fn sla_policy(&self) -> SlaPolicy {
        SlaPolicy::new(self.report.sla_threshold_days)
    }

    pub fn loader(&self) -> TicketLoader {
        TicketLoader::with_columns(self.columns.clone())
    }

    /// Lifetime of fetched rows.
    ///
    /// Fails when `source.cache_ttl_secs` is too large for a duration.
    pub fn cache_ttl(&self) -> TicketResult<chrono::Duration> {
        i64::try_from(self.source.cache_ttl_secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .ok_or_else(|| {
                TicketError::Configuration(format!(
                    "source.cache_ttl_secs = {} is out of range",
                    self.source.cache_ttl_secs
                ))
            })
    }

    /// Point the configuration at `location`, replacing any configured source.
    ///
    /// Values starting with `http://` or `https://` are treated as URLs.
    pub fn override_source(&mut self, location: &str) {
        if location.starts_with("http://") || location.starts_with("https://") {
            self.source.url = Some(location.to_string());
            self.source.path = None;
        } else {
            self.source.path = Some(PathBuf::from(location));
            self.source.url = None;
        }
    }

    /// Build the configured ticket source.
    ///
    /// Exactly one of `source.path` and `source.url` must be set.
    pub fn build_source(&self) -> TicketResult<Box<dyn TicketSource>> {
        match (&self.source.path, &self.source.url) {
            (Some(path), None) => Ok(Box::new(CsvFileSource::new(path.clone()))),
            (None, Some(url)) => self.build_remote_source(url),
            (Some(_), Some(_)) => Err(TicketError::Configuration(
                "Set only one of 'source.path' and 'source.url'".to_string(),
            )),
            (None, None) => Err(TicketError::Configuration(
                "A ticket source requires 'source.path' or 'source.url'".to_string(),
            )),
        }
    }

    #[cfg(feature = "remote-source")]
    fn build_remote_source(&self, url: &str) -> TicketResult<Box<dyn TicketSource>> {
        let timeout = std::time::Duration::from_secs(self.source.timeout_secs);
        let source = crate::io::source::HttpCsvSource::new(url, timeout)?;
        Ok(Box::new(source))
    }

    #[cfg(not(feature = "remote-source"))]
    fn build_remote_source(&self, url: &str) -> TicketResult<Box<dyn TicketSource>> {
        Err(TicketError::Configuration(format!(
            "Cannot read {}: built without the 'remote-source' feature",
            url
        )))
    }
}
