use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::core::domain::{Level, Status, TicketRecord};
use crate::algorithms::percentages::largest_remainder_percentages;

/// Statuses that get a per-level breakdown inside each category.
const BREAKDOWN_STATUSES: [Status; 2] = [Status::Closed, Status::InProgress];

/// Ticket counts per status.
///
/// Unrecognized statuses are tallied separately under their verbatim label so
/// that the known counters plus [`StatusCounts::other_total`] always add up to
/// the number of tickets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub open: usize,
    pub closed: usize,
    pub in_progress: usize,
    pub other: BTreeMap<String, usize>,
}

impl StatusCounts {
    fn add(&mut self, status: &Status) {
        match status {
            Status::Open => self.open += 1,
            Status::Closed => self.closed += 1,
            Status::InProgress => self.in_progress += 1,
            Status::Other(label) => *self.other.entry(label.clone()).or_insert(0) += 1,
        }
    }

    pub fn get(&self, status: &Status) -> usize {
        match status {
            Status::Open => self.open,
            Status::Closed => self.closed,
            Status::InProgress => self.in_progress,
            Status::Other(label) => self.other.get(label).copied().unwrap_or(0),
        }
    }

    pub fn other_total(&self) -> usize {
        self.other.values().sum()
    }

    pub fn total(&self) -> usize {
        self.open + self.closed + self.in_progress + self.other_total()
    }
}

/// Open/closed/in-progress counts for one support level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelStatusCounts {
    pub level: Level,
    pub open: usize,
    pub closed: usize,
    pub in_progress: usize,
}

impl LevelStatusCounts {
    fn empty(level: Level) -> Self {
        Self {
            level,
            open: 0,
            closed: 0,
            in_progress: 0,
        }
    }

    pub fn get(&self, status: &Status) -> usize {
        match status {
            Status::Open => self.open,
            Status::Closed => self.closed,
            Status::InProgress => self.in_progress,
            Status::Other(_) => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCount {
    pub level: Level,
    pub count: usize,
}

/// Tickets of one status inside a category, split by level.
///
/// `levels` lists only the levels with at least one ticket, in L1..L3 order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBreakdown {
    pub status: Status,
    pub count: usize,
    pub levels: Vec<LevelCount>,
}

impl StatusBreakdown {
    /// Render the level split as `"L1 = 2 / L3 = 1"`.
    pub fn levels_text(&self) -> String {
        self.levels
            .iter()
            .map(|lc| format!("{} = {}", lc.level, lc.count))
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

/// Aggregates for one category of the filtered set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category: String,
    pub count: usize,
    /// Share of the filtered total; all categories together sum to 100
    pub percentage: u32,
    pub open: usize,
    pub closed: usize,
    pub in_progress: usize,
    /// Closed and in-progress level splits; statuses without tickets are omitted
    pub level_breakdown: Vec<StatusBreakdown>,
}

impl CategoryBreakdown {
    fn empty(category: String) -> Self {
        Self {
            category,
            count: 0,
            percentage: 0,
            open: 0,
            closed: 0,
            in_progress: 0,
            level_breakdown: Vec::new(),
        }
    }

    pub fn breakdown_for(&self, status: &Status) -> Option<&StatusBreakdown> {
        self.level_breakdown.iter().find(|b| &b.status == status)
    }
}

/// Everything the presentation layer shows for one filtered ticket set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateReport {
    pub total: usize,
    pub status_counts: StatusCounts,
    /// Always one entry per level in L1, L2, L3 order, zero-filled
    pub level_status: Vec<LevelStatusCounts>,
    /// Categories present in the set, in order of first appearance
    pub categories: Vec<CategoryBreakdown>,
}

impl AggregateReport {
    /// `true` when the filtered set had no tickets.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn status_count(&self, status: &Status) -> usize {
        self.status_counts.get(status)
    }

    /// Count for a (level, status) pair; zero for pairs outside the L1..L3 ×
    /// {Open, Closed, In-Progress} grid.
    pub fn level_status_count(&self, level: &Level, status: &Status) -> usize {
        self.level_status
            .iter()
            .find(|ls| &ls.level == level)
            .map(|ls| ls.get(status))
            .unwrap_or(0)
    }

    pub fn category_breakdown(&self) -> &[CategoryBreakdown] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&CategoryBreakdown> {
        self.categories.iter().find(|c| c.category == name)
    }
}

/// Aggregate a filtered ticket set.
///
/// An empty set is a valid input: every counter is zero, the level grid is
/// still present and the category list is empty.
pub fn aggregate(records: &[TicketRecord]) -> AggregateReport {
    let mut status_counts = StatusCounts::default();
    let mut level_status: Vec<LevelStatusCounts> =
        Level::ALL.iter().cloned().map(LevelStatusCounts::empty).collect();

    let mut categories: Vec<CategoryBreakdown> = Vec::new();
    let mut category_index: HashMap<&str, usize> = HashMap::new();
    // (category, status, level) -> count, for the per-status level splits
    let mut split: HashMap<(usize, Status, Level), usize> = HashMap::new();

    for record in records {
        status_counts.add(&record.status);

        if let Some(ls) = level_status.iter_mut().find(|ls| ls.level == record.level) {
            match record.status {
                Status::Open => ls.open += 1,
                Status::Closed => ls.closed += 1,
                Status::InProgress => ls.in_progress += 1,
                Status::Other(_) => {}
            }
        }

        let idx = *category_index
            .entry(record.category.as_str())
            .or_insert_with(|| {
                categories.push(CategoryBreakdown::empty(record.category.clone()));
                categories.len() - 1
            });

        let category = &mut categories[idx];
        category.count += 1;
        match record.status {
            Status::Open => category.open += 1,
            Status::Closed => category.closed += 1,
            Status::InProgress => category.in_progress += 1,
            Status::Other(_) => {}
        }

        if record.level.is_known() {
            *split
                .entry((idx, record.status.clone(), record.level.clone()))
                .or_insert(0) += 1;
        }
    }

    let total = records.len();
    if total > 0 {
        let counts: Vec<usize> = categories.iter().map(|c| c.count).collect();
        let percentages = largest_remainder_percentages(&counts);

        for (idx, (category, percentage)) in categories.iter_mut().zip(percentages).enumerate() {
            category.percentage = percentage;

            let mut level_breakdown = Vec::new();
            for status in BREAKDOWN_STATUSES {
                let count = match status {
                    Status::Closed => category.closed,
                    _ => category.in_progress,
                };
                if count == 0 {
                    continue;
                }

                let levels = Level::ALL
                    .into_iter()
                    .filter_map(|level| {
                        let key = (idx, status.clone(), level);
                        split.get(&key).map(|&count| LevelCount { level: key.2, count })
                    })
                    .collect();
                level_breakdown.push(StatusBreakdown {
                    status,
                    count,
                    levels,
                });
            }
            category.level_breakdown = level_breakdown;
        }
    }

    AggregateReport {
        total,
        status_counts,
        level_status,
        categories,
    }
}
