use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::algorithms::analysis::{aggregate, AggregateReport};
use crate::algorithms::sla::{evaluate_sla, SlaPolicy, SlaSummary};
use crate::config::ReportConfig;
use crate::core::domain::TicketRecord;
use crate::error::TicketResult;
use crate::io::cache::CachedSource;
use crate::io::loaders::TicketLoader;
use crate::io::source::TicketSource;
use crate::preprocessing::validator::{TicketValidator, ValidationResult};
use crate::time::clock::Clock;
use crate::time::window::{DateWindow, View};
use crate::transformations::filtering::filter_window;

/// Default lifetime of fetched rows.
const DEFAULT_CACHE_TTL_SECS: i64 = 60;

/// Result of one report refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketReport {
    pub view: View,
    pub today: chrono::NaiveDate,
    pub window: DateWindow,
    /// Tickets inside the window, in sheet order
    pub records: Vec<TicketRecord>,
    pub report: AggregateReport,
    /// SLA check over the tickets inside the window
    pub sla: SlaSummary,
    /// Data quality of the whole sheet, not only the window
    pub validation: ValidationResult,
}

/// Fetch, load, validate, filter, aggregate and check SLA in one call.
///
/// The only state kept between runs is the row cache of the source.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use pmp_tickets::io::source::StaticSource;
/// use pmp_tickets::parsing::csv_parser::RawRow;
/// use pmp_tickets::services::ReportPipeline;
/// use pmp_tickets::time::{FixedClock, View};
///
/// let rows = vec![RawRow::from_pairs([
///     ("Request Date", "2024-06-11"),
///     ("Category", "billing"),
///     ("Status", "Open"),
///     ("L1/L2/L3", "L1"),
/// ])];
/// let clock = FixedClock::at_date(NaiveDate::from_ymd_opt(2024, 6, 12).unwrap());
/// let mut pipeline = ReportPipeline::new(StaticSource::new(rows), clock);
///
/// let result = pipeline.run(View::ThisWeek).unwrap();
/// assert_eq!(result.report.total, 1);
/// assert_eq!(result.report.category_breakdown()[0].category, "Billing");
/// ```
pub struct ReportPipeline<S, C> {
    source: CachedSource<S>,
    clock: C,
    loader: TicketLoader,
    sla_policy: SlaPolicy,
}

impl<S: TicketSource, C: Clock> ReportPipeline<S, C> {
    /// Pipeline with default aliases, SLA policy and cache lifetime.
    pub fn new(source: S, clock: C) -> Self {
        Self {
            source: CachedSource::new(source, Duration::seconds(DEFAULT_CACHE_TTL_SECS)),
            clock,
            loader: TicketLoader::new(),
            sla_policy: SlaPolicy::default(),
        }
    }

    pub fn with_loader(mut self, loader: TicketLoader) -> Self {
        self.loader = loader;
        self
    }

    pub fn with_sla_policy(mut self, policy: SlaPolicy) -> Self {
        self.sla_policy = policy;
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.source = CachedSource::new(self.source.into_inner(), ttl);
        self
    }

    pub fn source(&self) -> &CachedSource<S> {
        &self.source
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Drop cached rows so the next run refetches.
    pub fn refresh(&mut self) {
        self.source.invalidate();
    }

    /// Produce the report for `view` as of the clock's current date.
    ///
    /// Fails when the source cannot be read or the sheet has no request date
    /// column. An empty window is not an error; see [`AggregateReport::is_empty`].
    pub fn run(&mut self, view: View) -> TicketResult<TicketReport> {
        let now = self.clock.now();
        let today = now.date();

        let rows = self.source.get(now)?;
        let load = self.loader.load_rows(rows)?;
        let validation = TicketValidator::validate(&load, today);
        for warning in &validation.warnings {
            log::debug!("{}", warning);
        }

        let (start, end, records) = filter_window(&load.records, view, today);
        let report = aggregate(&records);
        let sla = evaluate_sla(&records, today, &self.sla_policy);

        log::info!(
            "{} ({} to {}): {} tickets, {} SLA breaches",
            view,
            start,
            end,
            report.total,
            sla.breached()
        );

        Ok(TicketReport {
            view,
            today,
            window: DateWindow::new(start, end),
            records,
            report,
            sla,
            validation,
        })
    }
}

impl<C: Clock> ReportPipeline<Box<dyn TicketSource>, C> {
    /// Build a pipeline from configuration.
    ///
    /// Fails with a configuration error when no usable source is configured.
    pub fn from_config(config: &ReportConfig, clock: C) -> TicketResult<Self> {
        let ttl = config.cache_ttl()?;
        let source = config.build_source()?;
        log::info!("Reading tickets from {}", source.describe());

        Ok(Self {
            source: CachedSource::new(source, ttl),
            clock,
            loader: config.loader(),
            sla_policy: config.sla_policy(),
        })
    }
}
