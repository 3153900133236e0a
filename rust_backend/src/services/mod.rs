//! Service layer: report orchestration and presentation.
//!
//! [`report`] wires a ticket source, the loader, the window filter, the
//! aggregator and the SLA check into one refresh. [`render`] and [`export`]
//! turn the result into console text and CSV.

pub mod export;
pub mod render;
pub mod report;


pub use export::{write_records_csv, EXPORT_HEADERS};
pub use render::render_text;
pub use report::{ReportPipeline, TicketReport};
