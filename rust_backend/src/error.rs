//! Error types for ticket loading, windowing and reporting.

/// Result type for ticket operations
pub type TicketResult<T> = Result<T, TicketError>;

/// Error type for ticket operations.
///
/// `InvalidRecord` is row-scoped: the loader recovers from it by dropping the
/// row. Every other variant is call-scoped and aborts the operation that
/// produced it.
#[derive(Debug, thiserror::Error)]
pub enum TicketError {
    #[error("Invalid record at row {row}: {reason}")]
    InvalidRecord { row: usize, reason: String },

    #[error("Invalid view: {0}. Must be 'This Week', 'Last Week', 'This Month', or 'This Year'")]
    InvalidView(String),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Source error: {0}")]
    Source(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl TicketError {
    /// Returns `true` for errors that only affect a single row.
    pub fn is_row_scoped(&self) -> bool {
        matches!(self, TicketError::InvalidRecord { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_scoped_classification() {
        let row = TicketError::InvalidRecord {
            row: 3,
            reason: "empty request date".to_string(),
        };
        assert!(row.is_row_scoped());
        assert!(!TicketError::InvalidView("Next Week".to_string()).is_row_scoped());
        assert!(!TicketError::MissingColumn("Request Date".to_string()).is_row_scoped());
    }

    #[test]
    fn test_error_messages() {
        let err = TicketError::InvalidRecord {
            row: 7,
            reason: "unparsable request date '31/02/2024'".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid record at row 7: unparsable request date '31/02/2024'"
        );

        let err = TicketError::MissingColumn("Request Date".to_string());
        assert_eq!(err.to_string(), "Missing required column: Request Date");
    }
}
