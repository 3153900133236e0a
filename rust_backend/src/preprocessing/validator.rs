//! Data-quality checks on a loaded ticket sheet.
//!
//! The loader already drops rows without a usable request date; the validator
//! reports on what was dropped and on values that loaded but will be left out
//! of some counts (unknown statuses or levels), duplicate ticket ids and
//! tickets dated in the future.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::io::loaders::LoadResult;

/// How many individual issues of one kind are listed before summarizing.
const MAX_LISTED: usize = 5;

/// Validation result with categorized issues and statistics.
///
/// Errors make `is_valid` false; warnings are informational.
///
/// # Examples
///
/// ```
/// use pmp_tickets::preprocessing::validator::ValidationResult;
///
/// let mut result = ValidationResult::new();
/// assert!(result.is_valid);
///
/// result.add_warning("2 rows dropped".to_string());
/// assert!(result.is_valid);
///
/// result.add_error("No usable rows".to_string());
/// assert!(!result.is_valid);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub stats: ValidationStats,
}

/// Summary statistics computed during validation.
///
/// # Fields
///
/// * `total_rows` - Raw rows handed to the loader
/// * `accepted_rows` - Rows that became tickets
/// * `dropped_rows` - Rows rejected for an invalid request date
/// * `unknown_statuses` - Tickets whose status is not Open/Closed/In-Progress
/// * `unknown_levels` - Tickets whose level is not L1/L2/L3
/// * `duplicate_ids` - Repeated ticket ids (derived `row-N` ids never repeat)
/// * `future_dated` - Tickets with a request date after the reference date
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationStats {
    pub total_rows: usize,
    pub accepted_rows: usize,
    pub dropped_rows: usize,
    pub unknown_statuses: usize,
    pub unknown_levels: usize,
    pub duplicate_ids: usize,
    pub future_dated: usize,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            stats: ValidationStats::default(),
        }
    }

    pub fn add_error(&mut self, error: String) {
        self.is_valid = false;
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for loaded ticket sheets.
pub struct TicketValidator;

impl TicketValidator {
    /// Validate a load result against the reference date `today`.
    ///
    /// The result is invalid only when rows were supplied and none of them
    /// could be loaded; everything else is reported as a warning.
    pub fn validate(load: &LoadResult, today: NaiveDate) -> ValidationResult {
        let mut result = ValidationResult::new();

        result.stats.total_rows = load.total_rows;
        result.stats.accepted_rows = load.accepted();
        result.stats.dropped_rows = load.dropped();

        if load.total_rows > 0 && load.accepted() == 0 {
            result.add_error(format!(
                "None of the {} rows has a valid request date",
                load.total_rows
            ));
        }

        for (listed, rejection) in load.rejected.iter().enumerate() {
            if listed < MAX_LISTED {
                result.add_warning(format!("Row {} dropped: {}", rejection.row, rejection.reason));
            }
        }
        if load.dropped() > MAX_LISTED {
            result.add_warning(format!(
                "Total dropped rows: {} (showing first {})",
                load.dropped(),
                MAX_LISTED
            ));
        }

        let mut seen = HashSet::new();
        for record in &load.records {
            if !record.status.is_known() {
                result.stats.unknown_statuses += 1;
            }
            if !record.level.is_known() {
                result.stats.unknown_levels += 1;
            }
            if record.request_date > today {
                result.stats.future_dated += 1;
            }
            if let Some(id) = &record.id {
                if !seen.insert(id.as_str()) {
                    result.stats.duplicate_ids += 1;
                    if result.stats.duplicate_ids <= MAX_LISTED {
                        result.add_warning(format!("Duplicate ticket ID: {}", id));
                    }
                }
            }
        }

        if result.stats.unknown_statuses > 0 {
            result.add_warning(format!(
                "{} tickets have an unrecognized status and are excluded from status counts",
                result.stats.unknown_statuses
            ));
        }
        if result.stats.unknown_levels > 0 {
            result.add_warning(format!(
                "{} tickets have an unrecognized level and are excluded from level counts",
                result.stats.unknown_levels
            ));
        }
        if result.stats.future_dated > 0 {
            result.add_warning(format!(
                "{} tickets are dated after {}",
                result.stats.future_dated, today
            ));
        }

        result
    }
}
