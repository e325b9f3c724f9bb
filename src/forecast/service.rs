use super::cache::ForecastCache;
use super::clock::DisplayZone;
use super::error::WeatherError;
use super::mock::MockGenerator;
use super::normalize::normalize_onecall;
use super::openweather::ForecastFetcher;
use super::random::{SeededRandom, StdRandom};
use super::types::ForecastSeries;
use crate::config::MockReason;
use std::sync::Arc;

/// Entry point for forecast lookups: mock mode, cache, live fetch, and the
/// fallback to synthetic data when the live path fails.
pub struct WeatherService<R = StdRandom> {
    mock_reason: Option<MockReason>,
    fetcher: Arc<dyn ForecastFetcher>,
    cache: ForecastCache,
    mock: MockGenerator<R>,
    zone: DisplayZone,
}

impl<R: SeededRandom> WeatherService<R> {
    pub fn new(
        mock_reason: Option<MockReason>,
        fetcher: Arc<dyn ForecastFetcher>,
        cache: ForecastCache,
        mock: MockGenerator<R>,
        zone: DisplayZone,
    ) -> Self {
        Self {
            mock_reason,
            fetcher,
            cache,
            mock,
            zone,
        }
    }

    pub fn mock_reason(&self) -> Option<MockReason> {
        self.mock_reason
    }

    /// Never fails: any live-path error degrades to mock data.
    pub async fn get_weather(&self, lat: f64, lon: f64) -> Arc<ForecastSeries> {
        if let Some(reason) = self.mock_reason {
            tracing::debug!(lat, lon, reason = reason.as_str(), "Serving mock forecast");
            return Arc::new(self.mock.generate(lat, lon));
        }

        if let Some(series) = self.cache.get_fresh(lat, lon).await {
            return series;
        }

        match self.fetch_live(lat, lon).await {
            Ok(series) => {
                let series = Arc::new(series);
                self.cache.store(lat, lon, series.clone()).await;
                tracing::info!(lat, lon, hours = series.len(), "Cached live forecast");
                series
            }
            Err(e) => {
                tracing::warn!(lat, lon, error = %e, "Live forecast failed, using mock data");
                Arc::new(self.mock.generate(lat, lon))
            }
        }
    }

    /// One upstream attempt, no cache and no fallback.
    pub async fn fetch_live(&self, lat: f64, lon: f64) -> Result<ForecastSeries, WeatherError> {
        let raw = self.fetcher.fetch(lat, lon).await?;
        normalize_onecall(raw, &self.zone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::clock::{Clock, ManualClock};
    use crate::forecast::random::ConstantRandom;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    const UTC: DisplayZone = DisplayZone::Named(chrono_tz::UTC);

    enum Reply {
        Hours(usize),
        Fail,
        Malformed,
    }

    /// Counts calls and answers with a canned document.
    struct SpyFetcher {
        calls: AtomicUsize,
        reply: Reply,
    }

    impl SpyFetcher {
        fn new(reply: Reply) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                reply,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ForecastFetcher for SpyFetcher {
        async fn fetch(&self, _lat: f64, _lon: f64) -> Result<Value, WeatherError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.reply {
                Reply::Hours(n) => {
                    let hourly: Vec<Value> = (0..n)
                        .map(|i| json!({ "dt": 1_717_200_000 + i as i64 * 3600, "wind_speed": 6.5 }))
                        .collect();
                    Ok(json!({ "hourly": hourly }))
                }
                Reply::Fail => Err(WeatherError::ApiError {
                    status: 500,
                    body: "upstream down".to_string(),
                }),
                Reply::Malformed => Ok(json!({ "daily": [] })),
            }
        }
    }

    fn build_service(
        mock_reason: Option<MockReason>,
        fetcher: Arc<SpyFetcher>,
    ) -> (Arc<ManualClock>, WeatherService<ConstantRandom>) {
        let clock = Arc::new(ManualClock::at(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()));
        let shared: Arc<dyn Clock> = clock.clone();
        let service = WeatherService::new(
            mock_reason,
            fetcher,
            ForecastCache::new(Duration::from_secs(3600), shared.clone()),
            MockGenerator::new(shared, UTC),
            UTC,
        );
        (clock, service)
    }

    fn assert_mock_series(series: &ForecastSeries) {
        assert_eq!(series.len(), 240);
        assert!(series.iter().all(|r| r.mock == Some(true)));
    }

    #[tokio::test]
    async fn test_second_call_within_ttl_served_from_cache() {
        let fetcher = SpyFetcher::new(Reply::Hours(48));
        let (clock, service) = build_service(None, fetcher.clone());

        let first = service.get_weather(59.9, 10.75).await;
        clock.advance(chrono::Duration::minutes(59));
        let second = service.get_weather(59.9, 10.75).await;

        assert_eq!(fetcher.calls(), 1);
        assert_eq!(first.len(), 48);
        assert_eq!(first, second);
        assert!(second.iter().all(|r| r.mock.is_none()));
    }

    #[tokio::test]
    async fn test_refetch_after_ttl() {
        let fetcher = SpyFetcher::new(Reply::Hours(24));
        let (clock, service) = build_service(None, fetcher.clone());

        service.get_weather(59.9, 10.75).await;
        clock.advance(chrono::Duration::seconds(3600));
        service.get_weather(59.9, 10.75).await;

        assert_eq!(fetcher.calls(), 2);
    }

    #[tokio::test]
    async fn test_each_coordinate_fetched_separately() {
        let fetcher = SpyFetcher::new(Reply::Hours(24));
        let (_clock, service) = build_service(None, fetcher.clone());

        service.get_weather(59.9, 10.75).await;
        service.get_weather(60.0, 10.75).await;
        service.get_weather(59.9, 10.75).await;

        assert_eq!(fetcher.calls(), 2);
    }

    #[tokio::test]
    async fn test_mock_mode_never_fetches() {
        for reason in [MockReason::Forced, MockReason::MissingKey, MockReason::PlaceholderKey] {
            let fetcher = SpyFetcher::new(Reply::Hours(24));
            let (_clock, service) = build_service(Some(reason), fetcher.clone());

            let series = service.get_weather(1.0, 2.0).await;

            assert_eq!(fetcher.calls(), 0);
            assert_mock_series(&series);
        }
    }

    #[tokio::test]
    async fn test_fetch_failure_falls_back_to_mock() {
        let fetcher = SpyFetcher::new(Reply::Fail);
        let (_clock, service) = build_service(None, fetcher.clone());

        let series = service.get_weather(1.0, 2.0).await;
        assert_mock_series(&series);

        // Fallback data is not cached, so the next call tries upstream again
        service.get_weather(1.0, 2.0).await;
        assert_eq!(fetcher.calls(), 2);
    }

    #[tokio::test]
    async fn test_malformed_response_falls_back_to_mock() {
        let fetcher = SpyFetcher::new(Reply::Malformed);
        let (_clock, service) = build_service(None, fetcher.clone());

        let series = service.get_weather(1.0, 2.0).await;
        assert_mock_series(&series);
    }

    #[tokio::test]
    async fn test_fetch_live_surfaces_errors() {
        let fetcher = SpyFetcher::new(Reply::Fail);
        let (_clock, service) = build_service(None, fetcher);

        let result = service.fetch_live(1.0, 2.0).await;
        assert!(matches!(result, Err(WeatherError::ApiError { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_live_readings_normalized() {
        let fetcher = SpyFetcher::new(Reply::Hours(300));
        let (_clock, service) = build_service(None, fetcher);

        let series = service.get_weather(1.0, 2.0).await;
        assert_eq!(series.len(), 240);
        assert_eq!(series[0].timestamp, "2024-06-01T00:00:00Z");
        assert_eq!(series[0].wind_speed_ms, 6.5);
    }
}
