//! Time-to-live cache around a [`TicketSource`].
//!
//! The cache is an explicit object owned by whoever owns the source. Callers
//! pass the current time in, so expiry is deterministic under a fixed clock.

use chrono::{Duration, NaiveDateTime};

use crate::error::TicketResult;
use crate::io::source::TicketSource;
use crate::parsing::csv_parser::RawRow;

#[derive(Debug, Clone)]
struct CachedRows {
    rows: Vec<RawRow>,
    fetched_at: NaiveDateTime,
}

/// Wraps a source and reuses its rows until `ttl` has elapsed.
///
/// A zero `ttl` disables caching: every [`CachedSource::get`] fetches.
#[derive(Debug)]
pub struct CachedSource<S> {
    inner: S,
    ttl: Duration,
    cached: Option<CachedRows>,
}

impl<S: TicketSource> CachedSource<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            cached: None,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Unwrap the source, discarding any cached rows.
    pub fn into_inner(self) -> S {
        self.inner
    }

    /// When the cached rows were fetched, if any are held.
    pub fn fetched_at(&self) -> Option<NaiveDateTime> {
        self.cached.as_ref().map(|c| c.fetched_at)
    }

    /// `true` when nothing is cached or the cached rows are at least `ttl` old.
    ///
    /// A `now` earlier than the fetch time (local clock set back, e.g. at a
    /// DST change) also counts as expired.
    pub fn is_expired(&self, now: NaiveDateTime) -> bool {
        match &self.cached {
            Some(cached) => {
                let age = now - cached.fetched_at;
                age < Duration::zero() || age >= self.ttl
            }
            None => true,
        }
    }

    /// Return the cached rows, refetching first if they have expired.
    ///
    /// On a fetch error the previous rows are kept and the error is returned.
    pub fn get(&mut self, now: NaiveDateTime) -> TicketResult<&[RawRow]> {
        if self.is_expired(now) {
            let rows = self.inner.fetch()?;
            log::debug!(
                "Refreshed {} rows from {}",
                rows.len(),
                self.inner.describe()
            );
            self.cached = Some(CachedRows {
                rows,
                fetched_at: now,
            });
        } else {
            log::debug!("Serving cached rows from {}", self.inner.describe());
        }

        Ok(self
            .cached
            .as_ref()
            .map(|c| c.rows.as_slice())
            .unwrap_or(&[]))
    }

    /// Drop the cached rows so the next `get` fetches.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TicketError;
    use chrono::NaiveDate;
    use std::cell::Cell;

    /// Source that counts fetches and can be switched to fail
    struct CountingSource {
        fetches: Cell<usize>,
        fail: Cell<bool>,
    }

    impl CountingSource {
        fn new() -> Self {
            Self {
                fetches: Cell::new(0),
                fail: Cell::new(false),
            }
        }
    }

    impl TicketSource for CountingSource {
        fn fetch(&self) -> TicketResult<Vec<RawRow>> {
            if self.fail.get() {
                return Err(TicketError::Source("offline".to_string()));
            }
            self.fetches.set(self.fetches.get() + 1);
            Ok(vec![RawRow::from_pairs([(
                "Fetch",
                self.fetches.get().to_string(),
            )])])
        }

        fn describe(&self) -> String {
            "counting".to_string()
        }
    }

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 12)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_empty_cache_is_expired() {
        let cache = CachedSource::new(CountingSource::new(), Duration::seconds(60));
        assert!(cache.is_expired(at(9, 0, 0)));
        assert_eq!(cache.fetched_at(), None);
    }

    #[test]
    fn test_rows_reused_within_ttl() {
        let mut cache = CachedSource::new(CountingSource::new(), Duration::seconds(60));

        assert_eq!(cache.get(at(9, 0, 0)).unwrap()[0].get("Fetch"), Some("1"));
        assert_eq!(cache.get(at(9, 0, 59)).unwrap()[0].get("Fetch"), Some("1"));
        assert_eq!(cache.inner().fetches.get(), 1);
        assert_eq!(cache.fetched_at(), Some(at(9, 0, 0)));
        assert!(!cache.is_expired(at(9, 0, 30)));
    }

    #[test]
    fn test_refetch_after_ttl() {
        let mut cache = CachedSource::new(CountingSource::new(), Duration::seconds(60));

        cache.get(at(9, 0, 0)).unwrap();
        assert!(cache.is_expired(at(9, 1, 0)));
        assert_eq!(cache.get(at(9, 1, 0)).unwrap()[0].get("Fetch"), Some("2"));
        assert_eq!(cache.fetched_at(), Some(at(9, 1, 0)));
    }

    #[test]
    fn test_clock_moving_backwards_refetches() {
        let mut cache = CachedSource::new(CountingSource::new(), Duration::seconds(60));

        cache.get(at(2, 59, 0)).unwrap();
        // Local time falls back an hour; nine minutes earlier on the wall clock
        assert!(cache.is_expired(at(2, 50, 0)));
        assert_eq!(cache.get(at(2, 50, 0)).unwrap()[0].get("Fetch"), Some("2"));
        assert_eq!(cache.fetched_at(), Some(at(2, 50, 0)));

        assert!(!cache.is_expired(at(2, 50, 30)));
    }

    #[test]
    fn test_zero_ttl_always_fetches() {
        let mut cache = CachedSource::new(CountingSource::new(), Duration::zero());

        cache.get(at(9, 0, 0)).unwrap();
        cache.get(at(9, 0, 0)).unwrap();
        assert_eq!(cache.inner().fetches.get(), 2);
    }

    #[test]
    fn test_invalidate_forces_fetch() {
        let mut cache = CachedSource::new(CountingSource::new(), Duration::seconds(60));

        cache.get(at(9, 0, 0)).unwrap();
        cache.invalidate();
        assert!(cache.is_expired(at(9, 0, 1)));
        cache.get(at(9, 0, 1)).unwrap();
        assert_eq!(cache.inner().fetches.get(), 2);
    }

    #[test]
    fn test_fetch_error_keeps_previous_rows() {
        let mut cache = CachedSource::new(CountingSource::new(), Duration::seconds(60));

        cache.get(at(9, 0, 0)).unwrap();
        cache.inner().fail.set(true);

        assert!(cache.get(at(9, 5, 0)).is_err());
        assert_eq!(cache.fetched_at(), Some(at(9, 0, 0)));
    }
}
