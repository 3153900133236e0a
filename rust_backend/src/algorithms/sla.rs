//! SLA ageing for tickets still waiting on support.
//!
//! A ticket breaches the SLA when it is Open or In-Progress and more than
//! `threshold_days` whole days have passed since its request date. Closed
//! tickets and tickets with an unrecognized status are never flagged.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::domain::{Level, Status, TicketRecord};

pub const DEFAULT_SLA_THRESHOLD_DAYS: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlaPolicy {
    pub threshold_days: i64,
}

impl Default for SlaPolicy {
    fn default() -> Self {
        Self {
            threshold_days: DEFAULT_SLA_THRESHOLD_DAYS,
        }
    }
}

impl SlaPolicy {
    pub fn new(threshold_days: i64) -> Self {
        Self { threshold_days }
    }

    pub fn is_breached(&self, record: &TicketRecord, today: NaiveDate) -> bool {
        record.status.is_active() && record.age_days(today) > self.threshold_days
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlaBreach {
    pub id: Option<String>,
    pub category: String,
    pub status: Status,
    pub level: Level,
    pub request_date: NaiveDate,
    pub age_days: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlaSummary {
    pub threshold_days: i64,
    /// Active (Open / In-Progress) tickets that were evaluated
    pub checked: usize,
    /// Oldest first
    pub breaches: Vec<SlaBreach>,
}

impl SlaSummary {
    pub fn breached(&self) -> usize {
        self.breaches.len()
    }
}

/// Flag the active tickets in `records` that are older than the policy allows.
pub fn evaluate_sla(records: &[TicketRecord], today: NaiveDate, policy: &SlaPolicy) -> SlaSummary {
    let checked = records.iter().filter(|r| r.status.is_active()).count();

    let mut breaches: Vec<SlaBreach> = records
        .iter()
        .filter(|r| policy.is_breached(r, today))
        .map(|r| SlaBreach {
            id: r.id.clone(),
            category: r.category.clone(),
            status: r.status.clone(),
            level: r.level.clone(),
            request_date: r.request_date,
            age_days: r.age_days(today),
        })
        .collect();
    breaches.sort_by(|a, b| b.age_days.cmp(&a.age_days));

    if !breaches.is_empty() {
        log::info!(
            "{} of {} active tickets older than {} days",
            breaches.len(),
            checked,
            policy.threshold_days
        );
    }

    SlaSummary {
        threshold_days: policy.threshold_days,
        checked,
        breaches,
    }
}
