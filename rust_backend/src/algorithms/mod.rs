//! Report aggregation.
//!
//! # Components
//!
//! - [`analysis`]: Status, level and category aggregation of a filtered ticket set
//! - [`percentages`]: Largest-remainder integer percentages
//! - [`sla`]: Ageing checks for tickets still waiting on support
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use pmp_tickets::algorithms::aggregate;
//! use pmp_tickets::core::{Status, TicketRecord};
//!
//! let day = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
//! let tickets = vec![
//!     TicketRecord::new(day, "Billing", "Closed", "L1"),
//!     TicketRecord::new(day, "Billing", "Open", "L2"),
//! ];
//! let report = aggregate(&tickets);
//! assert_eq!(report.total, 2);
//! assert_eq!(report.status_count(&Status::Closed), 1);
//! assert_eq!(report.category("Billing").unwrap().percentage, 100);
//! ```

pub mod analysis;
pub mod percentages;
pub mod sla;


pub use analysis::{
    aggregate, AggregateReport, CategoryBreakdown, LevelCount, LevelStatusCounts,
    StatusBreakdown, StatusCounts,
};
pub use percentages::largest_remainder_percentages;
pub use sla::{evaluate_sla, SlaBreach, SlaPolicy, SlaSummary};
