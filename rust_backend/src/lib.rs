//! # PMP Ticket Reporting
//!
//! Weekly and monthly reporting over a support-ticket sheet.
//!
//! The crate turns rows of a tabular ticket export into normalized tickets,
//! selects the tickets raised in a named reporting window and computes the
//! counts a support team reviews: status totals, a level by status grid,
//! per-category shares with level splits, and tickets waiting longer than
//! the SLA allows.
//!
//! ## Architecture
//!
//! - [`core`]: Ticket record, status and level types
//! - [`parsing`]: CSV rows and sheet date formats
//! - [`io`]: Row sources, the refresh cache and the ticket loader
//! - [`time`]: Injectable clock and reporting windows
//! - [`transformations`]: Window filtering
//! - [`algorithms`]: Aggregation, percentages and SLA checks
//! - [`preprocessing`]: Data-quality validation of a loaded sheet
//! - [`services`]: Report pipeline, console rendering and CSV export
//! - [`config`]: TOML configuration
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use pmp_tickets::parsing::csv_parser::parse_rows_from_str;
//! use pmp_tickets::{aggregate, filter_window, load, View};
//!
//! let csv = "Request Date,Category,Status,L1/L2/L3\n\
//!            2024-06-10,Billing,Closed,L1\n\
//!            2024-06-11,Access,In-Progress,L2\n\
//!            2024-05-02,Billing,Open,L1\n";
//!
//! let tickets = load(&parse_rows_from_str(csv).unwrap()).unwrap();
//! let today = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap();
//! let (_, _, this_week) = filter_window(&tickets, View::ThisWeek, today);
//!
//! let report = aggregate(&this_week);
//! assert_eq!(report.total, 2);
//! assert_eq!(report.category("Billing").unwrap().percentage, 50);
//! ```

pub mod algorithms;
pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod parsing;
pub mod preprocessing;
pub mod services;
pub mod time;
pub mod transformations;

pub use algorithms::{aggregate, AggregateReport};
pub use config::ReportConfig;
pub use self::core::{Level, Status, TicketRecord};
pub use error::{TicketError, TicketResult};
pub use io::load;
pub use services::{ReportPipeline, TicketReport};
pub use time::{DateWindow, View};
pub use transformations::filter_window;
