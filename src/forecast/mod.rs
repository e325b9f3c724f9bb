pub mod cache;
pub mod clock;
pub mod error;
pub mod mock;
pub mod normalize;
pub mod openweather;
pub mod random;
pub mod service;
pub mod types;

use crate::config::Config;
use cache::ForecastCache;
use clock::{Clock, SystemClock};
use mock::MockGenerator;
use openweather::OpenWeatherClient;
use service::WeatherService;
use std::sync::Arc;

/// Wires the live client, cache and mock generator from configuration.
pub fn build_service(config: &Config) -> Result<WeatherService, error::WeatherError> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let fetcher = Arc::new(OpenWeatherClient::new(config.clone())?);

    Ok(WeatherService::new(
        config.mock_reason(),
        fetcher,
        ForecastCache::new(config.cache_ttl, clock.clone()),
        MockGenerator::new(clock, config.display_zone),
        config.display_zone,
    ))
}
