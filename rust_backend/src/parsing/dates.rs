//! Calendar date parsing for sheet cells.
//!
//! Sheets in the wild carry day-first slash dates (`10/06/2024`), ISO dates
//! (`2024-06-10`) and the occasional timestamp exported by a spreadsheet
//! (`2024-06-10 14:30:00`). All of them are reduced to a timezone-naive
//! [`NaiveDate`]; the time-of-day part is discarded so that window filtering
//! compares whole days.

use chrono::NaiveDate;

/// Reason a date cell could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateParseError {
    #[error("empty date")]
    Empty,

    #[error("unrecognized date format '{0}'")]
    UnrecognizedFormat(String),

    #[error("invalid calendar date '{0}'")]
    InvalidDate(String),
}

/// Parse a date cell.
///
/// Accepted shapes, with or without a trailing time component:
///
/// | shape        | example      |
/// |--------------|--------------|
/// | `YYYY-MM-DD` | `2024-06-10` |
/// | `YYYY/MM/DD` | `2024/06/10` |
/// | `DD/MM/YYYY` | `10/06/2024` |
/// | `DD-MM-YYYY` | `10-06-2024` |
///
/// Day and month may be written without zero padding. Two-digit years are
/// rejected rather than guessed.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use pmp_tickets::parsing::dates::parse_sheet_date;
///
/// let expected = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
/// assert_eq!(parse_sheet_date("10/06/2024").unwrap(), expected);
/// assert_eq!(parse_sheet_date("2024-06-10").unwrap(), expected);
/// assert_eq!(parse_sheet_date("2024-06-10 23:59:59").unwrap(), expected);
/// assert!(parse_sheet_date("").is_err());
/// ```
pub fn parse_sheet_date(raw: &str) -> Result<NaiveDate, DateParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DateParseError::Empty);
    }

    let date_part = trimmed
        .split(|c: char| c == ' ' || c == 'T')
        .next()
        .unwrap_or(trimmed);

    let format = detect_format(date_part)
        .ok_or_else(|| DateParseError::UnrecognizedFormat(trimmed.to_string()))?;

    NaiveDate::parse_from_str(date_part, format)
        .map_err(|_| DateParseError::InvalidDate(trimmed.to_string()))
}

/// Pick the chrono format for a date token by its separator and the position
/// of the four-digit year.
fn detect_format(token: &str) -> Option<&'static str> {
    let separator = if token.contains('/') {
        '/'
    } else if token.contains('-') {
        '-'
    } else {
        return None;
    };

    let parts: Vec<&str> = token.split(separator).collect();
    if parts.len() != 3 || !parts.iter().all(|p| is_digits(p)) {
        return None;
    }

    let year_first = parts[0].len() == 4 && parts[1].len() <= 2 && parts[2].len() <= 2;
    let year_last = parts[2].len() == 4 && parts[0].len() <= 2 && parts[1].len() <= 2;

    match (separator, year_first, year_last) {
        ('-', true, _) => Some("%Y-%m-%d"),
        ('/', true, _) => Some("%Y/%m/%d"),
        ('/', _, true) => Some("%d/%m/%Y"),
        ('-', _, true) => Some("%d-%m-%Y"),
        _ => None,
    }
}

fn is_digits(part: &str) -> bool {
    !part.is_empty() && part.chars().all(|c| c.is_ascii_digit())
}
