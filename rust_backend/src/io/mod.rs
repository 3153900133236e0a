//! Ticket data loading.
//!
//! This module connects raw sheet rows to normalized tickets and owns the
//! data-source side of a refresh: where rows come from and how long a fetched
//! copy may be reused.
//!
//! # Example
//!
//! ```no_run
//! use pmp_tickets::io::{CsvFileSource, TicketLoader, TicketSource};
//!
//! let rows = CsvFileSource::new("data/tickets.csv").fetch().expect("Failed to read");
//! let result = TicketLoader::new().load_rows(&rows).expect("Failed to load");
//! println!("Loaded {} tickets, dropped {}", result.accepted(), result.dropped());
//! ```

pub mod cache;
pub mod loaders;
pub mod source;


pub use cache::CachedSource;
pub use loaders::{load, ColumnAliases, LoadResult, RowRejection, TicketLoader};
#[cfg(feature = "remote-source")]
pub use source::HttpCsvSource;
pub use source::{CsvFileSource, StaticSource, TicketSource};
