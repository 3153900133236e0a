//! Where raw ticket rows come from.
//!
//! The loader and aggregator never perform I/O themselves; a refresh asks a
//! [`TicketSource`] for the current rows once and works on the in-memory copy.

use std::path::{Path, PathBuf};

use crate::error::TicketResult;
use crate::parsing::csv_parser::{self, RawRow};

/// Produces the raw rows of the ticket sheet.
pub trait TicketSource {
    /// Fetch the current rows. Blocking.
    fn fetch(&self) -> TicketResult<Vec<RawRow>>;

    /// Short human-readable description used in logs.
    fn describe(&self) -> String;
}

impl<S: TicketSource + ?Sized> TicketSource for Box<S> {
    fn fetch(&self) -> TicketResult<Vec<RawRow>> {
        (**self).fetch()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// A local CSV export of the sheet.
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TicketSource for CsvFileSource {
    fn fetch(&self) -> TicketResult<Vec<RawRow>> {
        log::debug!("Reading tickets from {}", self.path.display());
        csv_parser::parse_rows_from_path(&self.path)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// Rows held in memory, for embedding callers and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    rows: Vec<RawRow>,
}

impl StaticSource {
    pub fn new(rows: Vec<RawRow>) -> Self {
        Self { rows }
    }
}

impl TicketSource for StaticSource {
    fn fetch(&self) -> TicketResult<Vec<RawRow>> {
        Ok(self.rows.clone())
    }

    fn describe(&self) -> String {
        format!("{} in-memory rows", self.rows.len())
    }
}

/// A remote CSV export, e.g. a published spreadsheet's `export?format=csv` URL.
#[cfg(feature = "remote-source")]
#[derive(Debug, Clone)]
pub struct HttpCsvSource {
    url: String,
    client: reqwest::blocking::Client,
}

#[cfg(feature = "remote-source")]
impl HttpCsvSource {
    pub fn new(url: impl Into<String>, timeout: std::time::Duration) -> TicketResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                crate::error::TicketError::Source(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[cfg(feature = "remote-source")]
impl TicketSource for HttpCsvSource {
    fn fetch(&self) -> TicketResult<Vec<RawRow>> {
        use crate::error::TicketError;

        log::debug!("Fetching tickets from {}", self.url);
        let body = self
            .client
            .get(&self.url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.text())
            .map_err(|e| TicketError::Source(format!("Failed to fetch {}: {}", self.url, e)))?;

        csv_parser::parse_rows_from_str(&body)
    }

    fn describe(&self) -> String {
        format!("url {}", self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TicketError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_static_source_returns_rows() {
        let source = StaticSource::new(vec![RawRow::from_pairs([("Status", "Open")])]);
        let rows = source.fetch().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(source.describe(), "1 in-memory rows");
    }

    #[test]
    fn test_csv_file_source() {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        write!(file, "Request Date,Status\n2024-06-10,Open\n2024-06-11,Closed\n").unwrap();

        let source = CsvFileSource::new(file.path());
        assert_eq!(source.fetch().unwrap().len(), 2);
        assert!(source.describe().starts_with("file "));
    }

    #[test]
    fn test_csv_file_source_missing_file() {
        let source = CsvFileSource::new("/nonexistent/tickets.csv");
        assert!(matches!(source.fetch(), Err(TicketError::Source(_))));
    }

    #[test]
    fn test_boxed_source() {
        let source: Box<dyn TicketSource> = Box::new(StaticSource::default());
        assert!(source.fetch().unwrap().is_empty());
    }
}
