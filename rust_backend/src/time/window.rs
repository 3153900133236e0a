//! Named relative reporting windows.
//!
//! A window is a pure function of the selected [`View`] and the reference
//! date. Weeks run Monday to Sunday and are computed from the weekday offset
//! of the reference date, never from ISO week numbers, so "Last Week" across
//! a year boundary is simply the seven days before this week's Monday.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TicketError;

/// Reporting window selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum View {
    ThisWeek,
    LastWeek,
    ThisMonth,
    ThisYear,
}

impl View {
    pub const ALL: [View; 4] = [View::ThisWeek, View::LastWeek, View::ThisMonth, View::ThisYear];

    pub fn label(&self) -> &'static str {
        match self {
            View::ThisWeek => "This Week",
            View::LastWeek => "Last Week",
            View::ThisMonth => "This Month",
            View::ThisYear => "This Year",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for View {
    type Err = TicketError;

    /// Accepts the display labels case-insensitively, with spaces, `_` or `-`
    /// between the words (`"This Week"`, `"last_week"`, `"this-month"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "thisweek" => Ok(View::ThisWeek),
            "lastweek" => Ok(View::LastWeek),
            "thismonth" => Ok(View::ThisMonth),
            "thisyear" => Ok(View::ThisYear),
            _ => Err(TicketError::InvalidView(s.to_string())),
        }
    }
}

impl From<View> for String {
    fn from(view: View) -> Self {
        view.label().to_string()
    }
}

impl TryFrom<String> for View {
    type Error = TicketError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Inclusive calendar-date range `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Both bounds are inclusive.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of calendar days covered.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Compute the window for `view` relative to `today`.
///
/// | view       | start                   | end            |
/// |------------|-------------------------|----------------|
/// | This Week  | Monday of this week     | start + 6 days |
/// | Last Week  | Monday of this week − 7 | start + 6 days |
/// | This Month | first of the month      | today          |
/// | This Year  | January 1st             | today          |
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use pmp_tickets::time::window::{date_window, View};
///
/// let wednesday = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap();
/// let window = date_window(View::ThisWeek, wednesday);
///
/// assert_eq!(window.start, NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
/// assert_eq!(window.end, NaiveDate::from_ymd_opt(2024, 6, 16).unwrap());
/// ```
pub fn date_window(view: View, today: NaiveDate) -> DateWindow {
    match view {
        View::ThisWeek => {
            let start = week_start(today);
            DateWindow::new(start, start + Duration::days(6))
        }
        View::LastWeek => {
            let start = week_start(today) - Duration::days(7);
            DateWindow::new(start, start + Duration::days(6))
        }
        View::ThisMonth => {
            DateWindow::new(today - Duration::days(i64::from(today.day0())), today)
        }
        View::ThisYear => {
            DateWindow::new(today - Duration::days(i64::from(today.ordinal0())), today)
        }
    }
}
