//! Plank history: fetch, cache, offline fallback.
//!
//! Online, `load` pulls recent planks from the platform and refreshes the
//! local cache. Offline (by flag or because the platform is unreachable)
//! it serves the last cached page instead.

pub mod cache;

use chrono::NaiveDate;
use serde::Serialize;

use crate::core::{day_label_on, format_clock, today_local};
use crate::error::PlankrError;
use crate::platform::PlankRecord;

pub use cache::{CachedPlank, PlankCache};

/// Where a history page came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HistorySource {
    /// Fetched live from the platform
    Platform,
    /// Served from the local cache
    Cache,
}

/// One plank, ready for display.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub plank_date: NaiveDate,
    pub duration_s: i64,
    /// Human day label ("Today", "Yesterday", weekday, or date)
    pub day_label: String,
    /// MM:SS readout
    pub clock: String,
}

impl HistoryEntry {
    fn with_today(id: i64, plank_date: NaiveDate, duration_s: i64, today: NaiveDate) -> Self {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let seconds = duration_s.max(0) as u32;
        Self {
            id,
            plank_date,
            duration_s,
            day_label: day_label_on(plank_date, today),
            clock: format_clock(seconds),
        }
    }

    /// Build an entry from a freshly fetched platform row.
    #[must_use]
    pub fn from_record(record: &PlankRecord) -> Self {
        Self::with_today(
            record.id,
            record.plank_date,
            record.duration_s,
            today_local(),
        )
    }

    /// Build an entry from a cached row.
    #[must_use]
    pub fn from_cached(plank: &CachedPlank) -> Self {
        Self::with_today(plank.id, plank.plank_date, plank.duration_s, today_local())
    }
}

/// A page of history entries and where they came from.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryPage {
    pub entries: Vec<HistoryEntry>,
    pub source: HistorySource,
}

/// Load recent planks, falling back to the cache when the platform is out
/// of reach.
///
/// `fetch` performs the live request; it is skipped entirely in offline
/// mode. A successful fetch refreshes the cache. A retryable fetch error
/// degrades to the cached page; any other error is returned as-is.
///
/// # Errors
///
/// Returns an error if the fetch fails with a non-retryable error or the
/// cache cannot be read or written.
pub fn load<F>(
    cache: &PlankCache,
    limit: u32,
    offline: bool,
    fetch: F,
) -> Result<HistoryPage, PlankrError>
where
    F: FnOnce() -> Result<Vec<PlankRecord>, PlankrError>,
{
    if offline {
        return page_from_cache(cache, limit);
    }

    match fetch() {
        Ok(records) => {
            cache.replace(&records)?;
            Ok(HistoryPage {
                entries: records.iter().map(HistoryEntry::from_record).collect(),
                source: HistorySource::Platform,
            })
        }
        Err(e) if e.is_retryable() => page_from_cache(cache, limit),
        Err(e) => Err(e),
    }
}

fn page_from_cache(cache: &PlankCache, limit: u32) -> Result<HistoryPage, PlankrError> {
    let entries = cache
        .recent(limit)?
        .iter()
        .map(HistoryEntry::from_cached)
        .collect();
    Ok(HistoryPage {
        entries,
        source: HistorySource::Cache,
    })
}
