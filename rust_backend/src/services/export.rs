//! CSV export of a filtered ticket set.

use std::io::Write;

use crate::core::domain::TicketRecord;
use crate::error::TicketResult;

/// Column headers written by [`write_records_csv`].
pub const EXPORT_HEADERS: [&str; 6] = [
    "Ticket ID",
    "Request Date",
    "Category",
    "Status",
    "L1/L2/L3",
    "Closed Date",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Write `records` as CSV with a header row. Dates are written as `YYYY-MM-DD`;
/// a ticket without a closed date gets an empty cell.
///
/// Returns the number of records written.
pub fn write_records_csv<W: Write>(writer: W, records: &[TicketRecord]) -> TicketResult<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(EXPORT_HEADERS)?;

    for record in records {
        let request_date = record.request_date.format(DATE_FORMAT).to_string();
        let closed_date = record
            .closed_date
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default();
        csv_writer.write_record([
            record.id.as_deref().unwrap_or(""),
            request_date.as_str(),
            record.category.as_str(),
            record.status.as_str(),
            record.level.as_str(),
            closed_date.as_str(),
        ])?;
    }

    csv_writer.flush()?;
    log::debug!("Exported {} tickets", records.len());
    Ok(records.len())
}
