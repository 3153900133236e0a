use chrono::NaiveDate;

use crate::core::domain::TicketRecord;
use crate::error::TicketResult;
use crate::time::window::{date_window, DateWindow, View};

/// Keep the tickets whose request date lies inside `window` (both bounds inclusive).
pub fn filter_by_window(records: &[TicketRecord], window: &DateWindow) -> Vec<TicketRecord> {
    records
        .iter()
        .filter(|r| window.contains(r.request_date))
        .cloned()
        .collect()
}

/// Compute the window for `view` and filter `records` to it.
///
/// Returns `(start, end, filtered)`; input order is preserved.
pub fn filter_window(
    records: &[TicketRecord],
    view: View,
    today: NaiveDate,
) -> (NaiveDate, NaiveDate, Vec<TicketRecord>) {
    let window = date_window(view, today);
    let filtered = filter_by_window(records, &window);
    log::debug!(
        "{} window {}: {} of {} tickets",
        view,
        window,
        filtered.len(),
        records.len()
    );
    (window.start, window.end, filtered)
}

/// Like [`filter_window`] but with the view given by name.
///
/// Fails with [`crate::error::TicketError::InvalidView`] for an unknown name.
pub fn filter_window_str(
    records: &[TicketRecord],
    view: &str,
    today: NaiveDate,
) -> TicketResult<(NaiveDate, NaiveDate, Vec<TicketRecord>)> {
    let view: View = view.parse()?;
    Ok(filter_window(records, view, today))
}
