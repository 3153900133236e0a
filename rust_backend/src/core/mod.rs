//! Core domain models for ticket reporting.
//!
//! This module defines the normalized ticket record and the enumerated status
//! and support-level values every report is computed from.

pub mod domain;


pub use domain::{normalize_category, Level, Status, TicketRecord, UNCATEGORIZED};
