//! End-to-end tests: CSV file on disk through config, pipeline and outputs.

mod support;

use chrono::Duration;
use pmp_tickets::config::ReportConfig;
use pmp_tickets::core::{Level, Status};
use pmp_tickets::io::{CachedSource, CsvFileSource, TicketLoader, TicketSource};
use pmp_tickets::services::{render_text, write_records_csv, ReportPipeline};
use pmp_tickets::time::{Clock, FixedClock, View};
use pmp_tickets::TicketError;

use support::*;

fn pipeline_for(
    file: &tempfile::NamedTempFile,
    clock: FixedClock,
) -> ReportPipeline<Box<dyn TicketSource>, FixedClock> {
    let mut config = ReportConfig::default();
    config.override_source(&file.path().to_string_lossy());
    ReportPipeline::from_config(&config, clock).unwrap()
}

#[test]
fn test_weekly_report_from_file() {
    let file = write_sheet(SAMPLE_SHEET);
    let mut pipeline = pipeline_for(&file, FixedClock::at_date(wednesday()));

    let result = pipeline.run(View::ThisWeek).unwrap();
    let report = &result.report;

    assert_eq!(report.total, 3);
    assert_eq!(report.status_count(&Status::Closed), 2);
    assert_eq!(report.status_count(&Status::InProgress), 1);
    assert_eq!(report.level_status_count(&Level::L2, &Status::InProgress), 1);

    let categories: Vec<(&str, u32)> = report
        .category_breakdown()
        .iter()
        .map(|c| (c.category.as_str(), c.percentage))
        .collect();
    assert_eq!(categories, vec![("Billing", 67), ("Access", 33)]);

    assert_eq!(result.validation.stats.total_rows, 7);
    assert_eq!(result.validation.stats.dropped_rows, 1);
}

#[test]
fn test_every_view_sums_to_one_hundred() {
    let file = write_sheet(SAMPLE_SHEET);
    let mut pipeline = pipeline_for(&file, FixedClock::at_date(wednesday()));

    for view in View::ALL {
        let result = pipeline.run(view).unwrap();
        assert!(result
            .records
            .iter()
            .all(|r| result.window.contains(r.request_date)));

        if result.report.is_empty() {
            assert!(result.report.category_breakdown().is_empty());
        } else {
            let sum: u32 = result
                .report
                .category_breakdown()
                .iter()
                .map(|c| c.percentage)
                .sum();
            assert_eq!(sum, 100, "{}", view);
        }
    }
}

#[test]
fn test_this_year_report() {
    let file = write_sheet(SAMPLE_SHEET);
    let mut pipeline = pipeline_for(&file, FixedClock::at_date(wednesday()));

    let result = pipeline.run(View::ThisYear).unwrap();
    assert_eq!(result.window.start, date(2024, 1, 1));
    assert_eq!(result.window.end, wednesday());
    assert_eq!(result.report.total, 6);

    // T-1 (9 days) and T-6 (23 days) are open past the three-day threshold
    let overdue: Vec<_> = result
        .sla
        .breaches
        .iter()
        .filter_map(|b| b.id.as_deref())
        .collect();
    assert_eq!(overdue, vec!["T-6", "T-1"]);
}

#[test]
fn test_cache_reuses_file_until_ttl() {
    let file = write_sheet(SAMPLE_SHEET);
    let clock = FixedClock::at_date(wednesday());
    let mut cache = CachedSource::new(CsvFileSource::new(file.path()), Duration::seconds(60));

    let first = cache.get(clock.now()).unwrap().len();
    std::fs::write(file.path(), sheet(&[("X", "2024-06-12", "Billing", "Open", "L1")]))
        .unwrap();

    clock.advance(Duration::seconds(59));
    assert_eq!(cache.get(clock.now()).unwrap().len(), first);

    clock.advance(Duration::seconds(1));
    assert_eq!(cache.get(clock.now()).unwrap().len(), 1);
}

#[test]
fn test_custom_column_aliases() {
    let file = write_sheet(
        "Opened On,Team,State,Tier\n\
         2024-06-11,Billing,Open,L1\n",
    );
    let mut config = ReportConfig::from_str(
        r#"
[report]
default_view = "this_week"

[columns]
request_date = ["Opened On"]
category = ["Team"]
status = ["State"]
level = ["Tier"]
"#,
    )
    .unwrap();
    config.override_source(&file.path().to_string_lossy());

    let view = config.default_view().unwrap();
    let mut pipeline =
        ReportPipeline::from_config(&config, FixedClock::at_date(wednesday())).unwrap();
    let result = pipeline.run(view).unwrap();

    assert_eq!(result.report.total, 1);
    assert_eq!(result.report.level_status_count(&Level::L1, &Status::Open), 1);
}

#[test]
fn test_sheet_without_date_column() {
    let file = write_sheet("Category,Status\nBilling,Open\n");
    let mut pipeline = pipeline_for(&file, FixedClock::at_date(wednesday()));

    assert!(matches!(
        pipeline.run(View::ThisWeek),
        Err(TicketError::MissingColumn(_))
    ));
}

#[test]
fn test_render_and_export_agree() {
    let file = write_sheet(SAMPLE_SHEET);
    let mut pipeline = pipeline_for(&file, FixedClock::at_date(wednesday()));
    let result = pipeline.run(View::ThisWeek).unwrap();

    let text = render_text(&result);
    assert!(text.contains("From: 2024-06-10 To: 2024-06-16"));
    assert!(text.contains("Total = 3"));

    let mut buf = Vec::new();
    write_records_csv(&mut buf, &result.records).unwrap();
    let exported = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = exported.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[3], "T-4,2024-06-12,Billing,Closed,L3,");

    let reloaded = TicketLoader::new()
        .load_rows(&pmp_tickets::parsing::csv_parser::parse_rows_from_str(&exported).unwrap())
        .unwrap();
    assert_eq!(reloaded.records, result.records);
}

#[test]
fn test_default_config_location() {
    let dir = temp_dir();
    std::fs::write(
        dir.path().join("pmp_report.toml"),
        "[report]\ndefault_view = \"This Month\"\nsla_threshold_days = 7\n",
    )
    .unwrap();

    let config = with_current_dir(dir.path(), ReportConfig::from_default_location).unwrap();
    assert_eq!(config.default_view().unwrap(), View::ThisMonth);
    assert_eq!(config.report.sla_threshold_days, 7);

    let empty = temp_dir();
    let missing = with_current_dir(empty.path(), ReportConfig::from_default_location);
    assert!(matches!(missing, Err(TicketError::Configuration(_))));
}
