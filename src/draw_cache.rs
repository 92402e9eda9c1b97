//! In-memory cache of winning numbers keyed by draw date.
//!
//! The cache refetches the complete draw history from its [`DrawDataSource`]
//! whenever a new draw day has started since the last attempt, and keeps
//! retrying (at most once per cooldown, and at least once per UTC day) while
//! the most recent Wednesday or Saturday draw is still missing.

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc, Weekday};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::api::DrawDataSource;
use crate::clock::Clock;
use crate::types::{DrawResultIndex, RawDrawRecord};
use crate::utils::{format_draw_date, normalize_draw_date, start_of_day};
use crate::winning_numbers::parse_winning_numbers;

#[derive(Debug, Clone, Default)]
pub struct CacheState {
    pub index: Option<Arc<DrawResultIndex>>,
    pub last_fetch_attempt: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Attempted since the latest draw day began and both latest draws are cached.
    Fresh,
    /// Latest draws missing, but the last attempt is inside the cooldown and from today.
    StaleAwaitingRetry,
    StaleRetryEligible,
}

impl Freshness {
    pub fn assess(state: &CacheState, now: DateTime<Utc>, cooldown: Duration) -> Self {
        let Some(last_attempt) = state.last_fetch_attempt else {
            return Self::StaleRetryEligible;
        };

        let today = now.date_naive();
        let last_wednesday = last_occurrence(today, Weekday::Wed);
        let last_saturday = last_occurrence(today, Weekday::Sat);

        if last_attempt < start_of_day(last_wednesday)
            || last_attempt < start_of_day(last_saturday)
        {
            return Self::StaleRetryEligible;
        }

        let has_latest_draws = state.index.as_ref().is_some_and(|index| {
            index.contains(&last_wednesday) && index.contains(&last_saturday)
        });
        if has_latest_draws {
            return Self::Fresh;
        }

        let cooled_down = (now - last_attempt)
            .to_std()
            .is_ok_and(|elapsed| elapsed > cooldown);
        if cooled_down || last_attempt < start_of_day(today) {
            Self::StaleRetryEligible
        } else {
            Self::StaleAwaitingRetry
        }
    }

    pub fn requires_refresh(self) -> bool {
        self == Self::StaleRetryEligible
    }
}

/// Most recent date, `today` included, falling on `weekday`, counting weeks from Monday.
pub fn last_occurrence(today: NaiveDate, weekday: Weekday) -> NaiveDate {
    let today_number = today.weekday().number_from_monday();
    let wanted = weekday.number_from_monday();
    let days_back = if today_number >= wanted {
        today_number - wanted
    } else {
        today_number + 7 - wanted
    };
    today - Days::new(u64::from(days_back))
}

/// Builds an index from raw records. Records with an unreadable date or
/// malformed winning numbers are skipped; a repeated date keeps the last record.
pub fn parse_raw_records(records: &[RawDrawRecord]) -> DrawResultIndex {
    let mut index = DrawResultIndex::new();

    for record in records {
        let Some(draw_date) = normalize_draw_date(&record.draw_date) else {
            warn!("skipping draw record with unreadable date '{}'", record.draw_date);
            continue;
        };

        match parse_winning_numbers(&record.winning_numbers) {
            Ok(result) => index.insert(draw_date, result),
            Err(e) => warn!(
                "skipping draw {} with winning numbers '{}': {}",
                format_draw_date(draw_date),
                record.winning_numbers,
                e
            ),
        }
    }

    index
}

pub struct DrawResultCache {
    source: Arc<dyn DrawDataSource>,
    clock: Arc<dyn Clock>,
    fetch_cooldown: Duration,
    state: Mutex<CacheState>,
}

impl DrawResultCache {
    pub fn new(
        source: Arc<dyn DrawDataSource>,
        clock: Arc<dyn Clock>,
        fetch_cooldown: Duration,
    ) -> Self {
        Self::with_state(source, clock, fetch_cooldown, CacheState::default())
    }

    pub fn with_state(
        source: Arc<dyn DrawDataSource>,
        clock: Arc<dyn Clock>,
        fetch_cooldown: Duration,
        state: CacheState,
    ) -> Self {
        Self {
            source,
            clock,
            fetch_cooldown,
            state: Mutex::new(state),
        }
    }

    /// Refreshes when required, then returns whatever index is held. A failed
    /// refresh leaves the previous index (possibly none) in place.
    pub async fn current_index(&self) -> Option<Arc<DrawResultIndex>> {
        self.refresh_if_required().await;
        self.state.lock().await.index.clone()
    }

    pub async fn freshness(&self) -> Freshness {
        let state = self.state.lock().await;
        Freshness::assess(&state, self.clock.now(), self.fetch_cooldown)
    }

    pub async fn is_refresh_required(&self) -> bool {
        self.freshness().await.requires_refresh()
    }

    pub async fn snapshot(&self) -> CacheState {
        self.state.lock().await.clone()
    }

    /// The lock is held for the whole check-fetch-swap so concurrent callers
    /// wait for the in-flight refresh instead of starting their own.
    pub async fn refresh_if_required(&self) {
        let mut state = self.state.lock().await;

        let now = self.clock.now();
        let freshness = Freshness::assess(&state, now, self.fetch_cooldown);
        if !freshness.requires_refresh() {
            debug!("draw cache is {:?}, skipping refresh", freshness);
            return;
        }

        state.last_fetch_attempt = Some(now);
        info!("refreshing draw results");

        let records = self.fetch_raw_records().await;
        if records.is_empty() {
            return;
        }

        let index = parse_raw_records(&records);
        if index.is_empty() {
            warn!(
                "none of the {} fetched draw records could be parsed, keeping cached index",
                records.len()
            );
            return;
        }

        info!(
            "cached {} draws, latest {}",
            index.len(),
            index
                .latest_draw_date()
                .map(format_draw_date)
                .unwrap_or_default()
        );
        state.index = Some(Arc::new(index));
    }

    /// One logical call to the source; failures are logged and come back empty.
    pub async fn fetch_raw_records(&self) -> Vec<RawDrawRecord> {
        match self.source.fetch_draws().await {
            Ok(records) if !records.is_empty() => records,
            Ok(_) => {
                error!("draw source returned no records");
                Vec::new()
            }
            Err(e) => {
                error!("fetching draw results failed: {:#}", e);
                Vec::new()
            }
        }
    }
}
