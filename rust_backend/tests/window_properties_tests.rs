//! Property tests for window selection and aggregation over arbitrary sheets.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use proptest::prelude::*;

use pmp_tickets::core::{Status, TicketRecord};
use pmp_tickets::time::{date_window, View};
use pmp_tickets::{aggregate, filter_window};

const CATEGORIES: [&str; 4] = ["Billing", "Access", "Network", ""];
const STATUSES: [&str; 4] = ["Open", "Closed", "In-Progress", "On Hold"];
const LEVELS: [&str; 4] = ["L1", "L2", "L3", "L9"];

fn any_date() -> impl Strategy<Value = NaiveDate> {
    (0i64..3650).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Duration::days(offset)
    })
}

fn any_view() -> impl Strategy<Value = View> {
    prop::sample::select(View::ALL.to_vec())
}

fn any_ticket() -> impl Strategy<Value = TicketRecord> {
    (any_date(), 0usize..4, 0usize..4, 0usize..4).prop_map(|(d, c, s, l)| {
        TicketRecord::new(d, CATEGORIES[c], STATUSES[s], LEVELS[l])
    })
}

proptest! {
    #[test]
    fn window_is_well_formed(view in any_view(), today in any_date()) {
        let window = date_window(view, today);
        prop_assert!(window.start <= window.end);

        match view {
            View::ThisWeek | View::LastWeek => {
                prop_assert_eq!(window.start.weekday(), Weekday::Mon);
                prop_assert_eq!(window.days(), 7);
            }
            View::ThisMonth => {
                prop_assert_eq!(window.start.day(), 1);
                prop_assert_eq!(window.end, today);
            }
            View::ThisYear => {
                prop_assert_eq!(window.start.ordinal(), 1);
                prop_assert_eq!(window.end, today);
            }
        }
    }

    #[test]
    fn filter_keeps_exactly_the_window(
        tickets in prop::collection::vec(any_ticket(), 0..60),
        view in any_view(),
        today in any_date(),
    ) {
        let (start, end, kept) = filter_window(&tickets, view, today);
        let expected: Vec<_> = tickets
            .iter()
            .filter(|t| start <= t.request_date && t.request_date <= end)
            .cloned()
            .collect();
        prop_assert_eq!(kept, expected);
    }

    #[test]
    fn aggregate_is_consistent(tickets in prop::collection::vec(any_ticket(), 0..80)) {
        let report = aggregate(&tickets);
        prop_assert_eq!(report.total, tickets.len());
        prop_assert_eq!(report.status_counts.total(), tickets.len());

        let known: usize = Status::KNOWN.iter().map(|s| report.status_count(s)).sum();
        prop_assert_eq!(known + report.status_counts.other_total(), tickets.len());

        let by_category: usize = report.category_breakdown().iter().map(|c| c.count).sum();
        prop_assert_eq!(by_category, tickets.len());

        if !tickets.is_empty() {
            let pct: u32 = report.category_breakdown().iter().map(|c| c.percentage).sum();
            prop_assert_eq!(pct, 100);
        }
    }
}
