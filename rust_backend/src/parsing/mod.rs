//! Parsers for ticket sheet exports.
//!
//! # Parsers
//!
//! - [`csv_parser`]: Read a CSV export into column-keyed [`RawRow`]s
//! - [`dates`]: Parse the request/closed date formats found in the sheets
//!
//! # Example
//!
//! ```no_run
//! use pmp_tickets::parsing::csv_parser::parse_rows_from_path;
//! use std::path::Path;
//!
//! let rows = parse_rows_from_path(Path::new("data/tickets.csv"))
//!     .expect("Failed to parse tickets");
//! println!("{} raw rows", rows.len());
//! ```

pub mod csv_parser;
pub mod dates;


pub use csv_parser::{normalize_header, RawRow};
pub use dates::{parse_sheet_date, DateParseError};
