//! Domain models for support tickets.
//!
//! A [`TicketRecord`] is produced once by the loader and never mutated
//! afterwards. Its text fields are normalized on the way in so that grouping
//! by category, status or level is stable regardless of how the sheet was
//! typed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category label used when the source cell is missing or blank.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Ticket workflow status.
///
/// Parsing is trim-, case- and separator-insensitive, so `"in progress"`,
/// `"IN_PROGRESS"` and `"In-Progress"` all map to [`Status::InProgress`].
/// Anything unrecognized is preserved (trimmed) in [`Status::Other`] and is
/// excluded from status-specific counts.
///
/// # Examples
///
/// ```
/// use pmp_tickets::core::domain::Status;
///
/// assert_eq!(Status::parse(" closed "), Status::Closed);
/// assert_eq!(Status::parse("in progress"), Status::InProgress);
/// assert_eq!(Status::parse("On Hold"), Status::Other("On Hold".to_string()));
/// assert_eq!(Status::InProgress.to_string(), "In-Progress");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Status {
    Open,
    Closed,
    InProgress,
    Other(String),
}

impl Status {
    /// The statuses with dedicated counters, in report order.
    pub const KNOWN: [Status; 3] = [Status::Open, Status::Closed, Status::InProgress];

    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let key: String = trimmed
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "open" => Status::Open,
            "closed" => Status::Closed,
            "inprogress" => Status::InProgress,
            _ => Status::Other(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Status::Open => "Open",
            Status::Closed => "Closed",
            Status::InProgress => "In-Progress",
            Status::Other(s) => s,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Status::Other(_))
    }

    /// Open and in-progress tickets are the ones still waiting on support.
    pub fn is_active(&self) -> bool {
        matches!(self, Status::Open | Status::InProgress)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Status {
    fn from(s: String) -> Self {
        Status::parse(&s)
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        status.to_string()
    }
}

/// Support escalation tier.
///
/// Normalization strips all whitespace, upper-cases, and repairs the common
/// letter confusions in the prefix position (`I2`, `l2`, `|2`). A bare digit
/// is accepted as the tier number and a `LEVEL` prefix is dropped.
///
/// # Examples
///
/// ```
/// use pmp_tickets::core::domain::Level;
///
/// assert_eq!(Level::parse(" l 1"), Level::L1);
/// assert_eq!(Level::parse("I2"), Level::L2);
/// assert_eq!(Level::parse("Level 3"), Level::L3);
/// assert_eq!(Level::parse("L4"), Level::Other("L4".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Level {
    L1,
    L2,
    L3,
    Other(String),
}

impl Level {
    /// The full defined level set, always reported even when empty.
    pub const ALL: [Level; 3] = [Level::L1, Level::L2, Level::L3];

    pub fn parse(raw: &str) -> Self {
        let compact: String = raw
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_uppercase)
            .collect();

        let tier = compact.strip_prefix("LEVEL").unwrap_or(&compact);
        let digits = match tier.chars().next() {
            Some('L' | 'I' | '|') => &tier[1..],
            _ => tier,
        };

        match digits {
            "1" => Level::L1,
            "2" => Level::L2,
            "3" => Level::L3,
            _ => Level::Other(raw.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Level::L1 => "L1",
            Level::L2 => "L2",
            Level::L3 => "L3",
            Level::Other(s) => s,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Level::Other(_))
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Level {
    fn from(s: String) -> Self {
        Level::parse(&s)
    }
}

impl From<Level> for String {
    fn from(level: Level) -> Self {
        level.to_string()
    }
}

/// Normalize a free-text category label for grouping.
///
/// Trims, collapses internal whitespace runs to a single space and title-cases
/// every word. Blank input becomes [`UNCATEGORIZED`]. Applying it twice yields
/// the same string.
///
/// # Examples
///
/// ```
/// use pmp_tickets::core::domain::normalize_category;
///
/// assert_eq!(normalize_category("  billing   ISSUES\n"), "Billing Issues");
/// assert_eq!(normalize_category(""), "Uncategorized");
/// ```
pub fn normalize_category(raw: &str) -> String {
    let words: Vec<String> = raw.split_whitespace().map(title_case_word).collect();
    if words.is_empty() {
        return UNCATEGORIZED.to_string();
    }
    words.join(" ")
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let mut out = String::with_capacity(word.len());
    // Multi-char uppercase mappings (e.g. 'ß') would not survive a second pass.
    let mut upper = first.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => out.push(u),
        _ => out.push(first),
    }
    out.extend(chars.flat_map(char::to_lowercase));
    out
}

/// A single normalized support ticket.
///
/// # Fields
///
/// * `id` - Ticket identifier from the sheet, or `row-<n>` when the sheet has none
/// * `request_date` - Calendar date the ticket was raised (always valid)
/// * `category` - Normalized category label
/// * `status` - Workflow status
/// * `level` - Support tier that owns the ticket
/// * `closed_date` - Resolution date when the sheet carries one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketRecord {
    pub id: Option<String>,
    pub request_date: NaiveDate,
    pub category: String,
    pub status: Status,
    pub level: Level,
    pub closed_date: Option<NaiveDate>,
}

impl TicketRecord {
    /// Builds a record, normalizing the text fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use pmp_tickets::core::domain::{Level, Status, TicketRecord};
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
    /// let ticket = TicketRecord::new(date, "billing", "closed", "l1");
    ///
    /// assert_eq!(ticket.category, "Billing");
    /// assert_eq!(ticket.status, Status::Closed);
    /// assert_eq!(ticket.level, Level::L1);
    /// ```
    pub fn new(request_date: NaiveDate, category: &str, status: &str, level: &str) -> Self {
        Self {
            id: None,
            request_date,
            category: normalize_category(category),
            status: Status::parse(status),
            level: Level::parse(level),
            closed_date: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_closed_date(mut self, closed_date: NaiveDate) -> Self {
        self.closed_date = Some(closed_date);
        self
    }

    /// Whole days between the request date and `today` (negative if future-dated).
    pub fn age_days(&self, today: NaiveDate) -> i64 {
        (today - self.request_date).num_days()
    }
}
