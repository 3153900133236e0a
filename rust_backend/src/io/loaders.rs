use serde::{Deserialize, Serialize};

use crate::core::domain::{normalize_category, Level, Status, TicketRecord};
use crate::error::{TicketError, TicketResult};
use crate::parsing::csv_parser::RawRow;
use crate::parsing::dates::parse_sheet_date;

/// Accepted header names for each ticket field.
///
/// Names are matched after header normalization and case-insensitively; the
/// first alias present in a row wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnAliases {
    pub request_date: Vec<String>,
    pub category: Vec<String>,
    pub status: Vec<String>,
    pub level: Vec<String>,
    pub id: Vec<String>,
    pub closed_date: Vec<String>,
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for ColumnAliases {
    fn default() -> Self {
        Self {
            request_date: names(&["Request Date", "Date"]),
            category: names(&["Category", "PMP Category"]),
            status: names(&["Status"]),
            level: names(&["L1/L2/L3", "Level"]),
            id: names(&["Ticket ID", "ID", "Ticket No"]),
            closed_date: names(&["Closed Date", "Resolved Date"]),
        }
    }
}

/// A source row that did not become a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowRejection {
    /// 1-based position of the row in the input sequence
    pub row: usize,
    pub reason: String,
}

/// Result of loading a batch of raw rows
#[derive(Debug, Clone, Default)]
pub struct LoadResult {
    pub records: Vec<TicketRecord>,
    pub rejected: Vec<RowRejection>,
    pub total_rows: usize,
}

impl LoadResult {
    pub fn accepted(&self) -> usize {
        self.records.len()
    }

    pub fn dropped(&self) -> usize {
        self.rejected.len()
    }
}

/// Turns raw sheet rows into normalized [`TicketRecord`]s.
#[derive(Debug, Clone, Default)]
pub struct TicketLoader {
    columns: ColumnAliases,
}

impl TicketLoader {
    /// Create a loader with the default column aliases
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a loader with custom column aliases
    pub fn with_columns(columns: ColumnAliases) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &ColumnAliases {
        &self.columns
    }

    /// Load a batch of rows.
    ///
    /// Rows whose request date is missing or unparsable are dropped and
    /// reported in [`LoadResult::rejected`]; they never fail the batch. The
    /// batch fails only when no row carries a request date column at all.
    /// Accepted records keep the relative order of the input.
    pub fn load_rows(&self, rows: &[RawRow]) -> TicketResult<LoadResult> {
        self.ensure_required_columns(rows)?;

        let mut result = LoadResult {
            total_rows: rows.len(),
            ..LoadResult::default()
        };

        for (idx, row) in rows.iter().enumerate() {
            match self.parse_row(idx + 1, row) {
                Ok(record) => result.records.push(record),
                Err(TicketError::InvalidRecord { row, reason }) => {
                    log::debug!("Dropping row {}: {}", row, reason);
                    result.rejected.push(RowRejection { row, reason });
                }
                Err(other) => return Err(other),
            }
        }

        if !result.rejected.is_empty() {
            log::warn!(
                "Dropped {} of {} rows with an invalid request date",
                result.dropped(),
                result.total_rows
            );
        }
        log::info!("Loaded {} tickets", result.accepted());

        Ok(result)
    }

    /// Convert a single row, failing with [`TicketError::InvalidRecord`].
    ///
    /// `row_number` is only used for error reporting and the derived id.
    pub fn parse_row(&self, row_number: usize, row: &RawRow) -> TicketResult<TicketRecord> {
        let raw_date = row.get_any(&self.columns.request_date).unwrap_or("");
        let request_date = parse_sheet_date(raw_date).map_err(|e| TicketError::InvalidRecord {
            row: row_number,
            reason: format!("request date: {}", e),
        })?;

        let id = row
            .get_any(&self.columns.id)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("row-{}", row_number));

        let closed_date = row
            .get_any(&self.columns.closed_date)
            .and_then(|raw| parse_sheet_date(raw).ok());

        Ok(TicketRecord {
            id: Some(id),
            request_date,
            category: normalize_category(row.get_any(&self.columns.category).unwrap_or("")),
            status: Status::parse(row.get_any(&self.columns.status).unwrap_or("")),
            level: Level::parse(row.get_any(&self.columns.level).unwrap_or("")),
            closed_date,
        })
    }

    fn ensure_required_columns(&self, rows: &[RawRow]) -> TicketResult<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let present = rows.iter().any(|row| {
            self.columns
                .request_date
                .iter()
                .any(|name| row.has_column(name))
        });

        if present {
            Ok(())
        } else {
            Err(TicketError::MissingColumn(self.columns.request_date.join(" | ")))
        }
    }
}

/// Load rows with the default column aliases, keeping only the accepted tickets.
///
/// # Examples
///
/// ```
/// use pmp_tickets::io::loaders::load;
/// use pmp_tickets::parsing::csv_parser::RawRow;
///
/// let rows = vec![
///     RawRow::from_pairs([("Request Date", "10/06/2024"), ("Status", "Closed")]),
///     RawRow::from_pairs([("Request Date", "not a date"), ("Status", "Open")]),
/// ];
/// let tickets = load(&rows).unwrap();
/// assert_eq!(tickets.len(), 1);
/// ```
pub fn load(rows: &[RawRow]) -> TicketResult<Vec<TicketRecord>> {
    TicketLoader::new().load_rows(rows).map(|r| r.records)
}
