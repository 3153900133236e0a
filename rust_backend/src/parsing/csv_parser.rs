use std::io::Read;
use std::path::Path;

use crate::error::{TicketError, TicketResult};

/// Normalize a column header for lookup.
///
/// Trims the name and collapses every whitespace run (including embedded
/// newlines from wrapped header cells) to a single space.
///
/// # Examples
///
/// ```
/// use pmp_tickets::parsing::csv_parser::normalize_header;
///
/// assert_eq!(normalize_header("  Request\nDate "), "Request Date");
/// assert_eq!(normalize_header("L1/L2/L3"), "L1/L2/L3");
/// ```
pub fn normalize_header(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// One raw sheet row: column name to cell value, in source column order.
///
/// Column names are kept as they appear in the source; lookups go through
/// [`normalize_header`] and are case-insensitive. Absent cells are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    cells: Vec<(String, Option<String>)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row from `(column, value)` pairs.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            cells: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), Some(v.into())))
                .collect(),
        }
    }

    pub fn insert(&mut self, column: impl Into<String>, value: Option<String>) {
        self.cells.push((column.into(), value));
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether any column matches `name` after header normalization.
    pub fn has_column(&self, name: &str) -> bool {
        let wanted = normalize_header(name);
        self.columns()
            .any(|c| normalize_header(c).eq_ignore_ascii_case(&wanted))
    }

    /// Look up a cell by column name.
    ///
    /// Returns `None` when the column is missing or the cell is absent. The
    /// first matching column wins when a sheet repeats a header.
    pub fn get(&self, name: &str) -> Option<&str> {
        let wanted = normalize_header(name);
        self.cells
            .iter()
            .find(|(k, _)| normalize_header(k).eq_ignore_ascii_case(&wanted))
            .and_then(|(_, v)| v.as_deref())
    }

    /// Look up the first of several alias names that is present in this row.
    pub fn get_any<S: AsRef<str>>(&self, names: &[S]) -> Option<&str> {
        names
            .iter()
            .find(|n| self.has_column(n.as_ref()))
            .and_then(|n| self.get(n.as_ref()))
    }
}

/// Parse CSV text (first line = headers) into raw rows.
pub fn parse_rows_from_str(content: &str) -> TicketResult<Vec<RawRow>> {
    parse_rows_from_reader(content.as_bytes())
}

/// Parse a CSV file into raw rows.
pub fn parse_rows_from_path(csv_path: &Path) -> TicketResult<Vec<RawRow>> {
    let file = std::fs::File::open(csv_path).map_err(|e| {
        TicketError::Source(format!("Failed to open {}: {}", csv_path.display(), e))
    })?;
    parse_rows_from_reader(file)
}

/// Parse CSV from any reader into raw rows.
///
/// Records may be shorter than the header row; the missing trailing cells are
/// absent. Empty cells are kept as empty strings so the loader can tell a blank
/// date from a missing column. Bytes that are not valid UTF-8 (Latin-1 exports)
/// are replaced with U+FFFD instead of failing the batch.
pub fn parse_rows_from_reader<R: Read>(reader: R) -> TicketResult<Vec<RawRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::None)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .byte_headers()?
        .iter()
        .map(decode_cell)
        .collect();
    let mut rows = Vec::new();
    let mut lossy_rows = 0usize;

    for record in csv_reader.byte_records() {
        let record = record?;
        let cells: Vec<String> = record.iter().map(decode_cell).collect();
        // Blank spacer lines at the bottom of exported sheets
        if cells.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        if record.iter().any(|cell| std::str::from_utf8(cell).is_err()) {
            lossy_rows += 1;
        }

        let mut row = RawRow::new();
        for (idx, header) in headers.iter().enumerate() {
            row.insert(header.as_str(), cells.get(idx).cloned());
        }
        rows.push(row);
    }

    if lossy_rows > 0 {
        log::warn!("{} rows contained invalid UTF-8; bytes were replaced", lossy_rows);
    }
    log::debug!("Parsed {} raw rows with {} columns", rows.len(), headers.len());
    Ok(rows)
}

fn decode_cell(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
