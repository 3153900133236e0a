//! Record filtering.
//!
//! - [`filtering`]: Select the tickets that fall inside a reporting window
//!
//! # Example
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use pmp_tickets::time::View;
//! use pmp_tickets::transformations::filter_window;
//!
//! # fn example(tickets: &[pmp_tickets::core::TicketRecord]) {
//! let today = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap();
//! let (start, end, this_week) = filter_window(tickets, View::ThisWeek, today);
//! println!("{} tickets from {} to {}", this_week.len(), start, end);
//! # }
//! ```

pub mod filtering;

pub use filtering::{filter_by_window, filter_window, filter_window_str};
