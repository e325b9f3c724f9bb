use super::error::WeatherError;
use crate::config::Config;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

/// Source of raw one-call documents.
#[async_trait]
pub trait ForecastFetcher: Send + Sync {
    async fn fetch(&self, lat: f64, lon: f64) -> Result<Value, WeatherError>;
}

pub struct OpenWeatherClient {
    client: Client,
    config: Config,
}

impl OpenWeatherClient {
    pub fn new(config: Config) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .user_agent("MarineWeatherIngest/1.0")
            .timeout(config.http_timeout)
            .build()
            .map_err(WeatherError::ClientSetup)?;

        Ok(Self { client, config })
    }

    /// Single GET against the one-call endpoint. No retries.
    pub async fn get_onecall(&self, lat: f64, lon: f64) -> Result<Value, WeatherError> {
        let api_key = self
            .config
            .owm_key
            .as_deref()
            .ok_or(WeatherError::MissingApiKey)?;

        let url = format!(
            "{}{}",
            self.config.openweather_base_url, self.config.openweather_onecall_path
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", lat.to_string().as_str()),
                ("lon", lon.to_string().as_str()),
                ("appid", api_key),
                ("units", "metric"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WeatherError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl ForecastFetcher for OpenWeatherClient {
    async fn fetch(&self, lat: f64, lon: f64) -> Result<Value, WeatherError> {
        self.get_onecall(lat, lon).await
    }
}
