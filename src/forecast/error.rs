use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("OpenWeather API key not configured")]
    MissingApiKey,
    #[error("HTTP client setup failed: {0}")]
    ClientSetup(reqwest::Error),
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("API error: HTTP {status}: {body}")]
    ApiError { status: u16, body: String },
    #[error("Malformed upstream response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
    #[error("Upstream timestamp out of range: {0}")]
    InvalidTimestamp(i64),
}

impl WeatherError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, WeatherError::RequestFailed(e) if e.is_timeout())
    }
}
