use super::clock::Clock;
use super::types::ForecastSeries;
use chrono::{DateTime, Utc};
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct CacheEntry {
    pub series: Arc<ForecastSeries>,
    pub captured_at: DateTime<Utc>,
}

/// Normalized forecasts keyed by coordinate.
///
/// Entries are never evicted. Freshness is checked on read against the
/// injected clock; a stale entry stays in place until the next successful
/// fetch for that coordinate overwrites it.
pub struct ForecastCache {
    entries: Cache<String, CacheEntry>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl ForecastCache {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Cache::builder().build(),
            ttl,
            clock,
        }
    }

    /// Raw coordinates, no rounding: `10.0` and `10.0001` are separate keys.
    pub fn key(lat: f64, lon: f64) -> String {
        format!("{},{}", lat, lon)
    }

    pub async fn get_fresh(&self, lat: f64, lon: f64) -> Option<Arc<ForecastSeries>> {
        let key = Self::key(lat, lon);
        let entry = self.entries.get(&key).await?;

        let age = self.clock.now() - entry.captured_at;
        // A clock that stepped backwards gives a negative age; still fresh
        let fresh = age.to_std().map_or(true, |age| age < self.ttl);
        if fresh {
            tracing::debug!(%key, age_secs = age.num_seconds(), "Forecast cache hit");
            Some(entry.series)
        } else {
            tracing::debug!(%key, age_secs = age.num_seconds(), "Forecast cache entry stale");
            None
        }
    }

    pub async fn store(&self, lat: f64, lon: f64, series: Arc<ForecastSeries>) {
        let entry = CacheEntry {
            series,
            captured_at: self.clock.now(),
        };
        self.entries.insert(Self::key(lat, lon), entry).await;
    }

    /// Entry regardless of freshness.
    #[cfg(test)]
    pub async fn peek(&self, lat: f64, lon: f64) -> Option<CacheEntry> {
        self.entries.get(&Self::key(lat, lon)).await
    }
}
