//! Console rendering of a [`TicketReport`].

use std::fmt;

use crate::core::domain::{Level, Status};
use crate::services::report::TicketReport;

const SEPARATOR_WIDTH: usize = 45;

/// Render the console report: window header, top summary, level movement,
/// per-category breakdowns and SLA breaches.
///
/// An empty window renders the header followed by `No tickets in this window`.
pub fn render_text(report: &TicketReport) -> String {
    TextReport(report).to_string()
}

/// [`fmt::Display`] adapter behind [`render_text`].
pub struct TextReport<'a>(pub &'a TicketReport);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let TicketReport {
            view,
            window,
            report,
            sla,
            ..
        } = self.0;

        writeln!(f, "PMP REPORT: {}", view)?;
        writeln!(f, "From: {} To: {}", window.start, window.end)?;

        if report.is_empty() {
            writeln!(f)?;
            return writeln!(f, "No tickets in this window");
        }

        writeln!(f)?;
        writeln!(f, "TOP SUMMARY")?;
        writeln!(f, "Total = {}", report.total)?;
        writeln!(f, "Open = {}", report.status_count(&Status::Open))?;
        writeln!(f, "Closed = {}", report.status_count(&Status::Closed))?;
        writeln!(f, "In Progress = {}", report.status_count(&Status::InProgress))?;
        let other = report.status_counts.other_total();
        if other > 0 {
            writeln!(f, "Other = {}", other)?;
        }

        writeln!(f)?;
        writeln!(f, "LEVEL MOVEMENT SUMMARY")?;
        for level in Level::ALL.iter() {
            writeln!(f)?;
            writeln!(f, "{} SUMMARY", level)?;
            writeln!(f, "Closed = {}", report.level_status_count(level, &Status::Closed))?;
            writeln!(f, "Open = {}", report.level_status_count(level, &Status::Open))?;
            writeln!(
                f,
                "In Progress = {}",
                report.level_status_count(level, &Status::InProgress)
            )?;
        }

        writeln!(f)?;
        writeln!(f, "PMP CATEGORIES")?;
        writeln!(f, "Total tickets = {}", report.total)?;
        writeln!(f)?;
        for category in report.category_breakdown() {
            writeln!(
                f,
                "Category: {} ({} tickets, {}%)",
                category.category, category.count, category.percentage
            )?;
            match category.breakdown_for(&Status::Closed) {
                Some(closed) => {
                    writeln!(f, "Closed = {}", closed.count)?;
                    writeln!(f, "Closed Levels: {}", closed.levels_text())?;
                }
                None => writeln!(f, "Closed = 0")?,
            }
            match category.breakdown_for(&Status::InProgress) {
                Some(in_progress) => {
                    writeln!(f, "In Progress = {}", in_progress.count)?;
                    writeln!(f, "In-Progress Levels: {}", in_progress.levels_text())?;
                }
                None => writeln!(f, "In Progress = 0")?,
            }
            writeln!(f, "{}", "-".repeat(SEPARATOR_WIDTH))?;
        }

        writeln!(f)?;
        writeln!(f, "SLA (older than {} days)", sla.threshold_days)?;
        writeln!(f, "Breached = {} of {} active", sla.breached(), sla.checked)?;
        for breach in &sla.breaches {
            writeln!(
                f,
                "{} | {} | {} | {} | {} days",
                breach.id.as_deref().unwrap_or("-"),
                breach.category,
                breach.status,
                breach.level,
                breach.age_days
            )?;
        }

        Ok(())
    }
}
