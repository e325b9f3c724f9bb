use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::forecast::{error::WeatherError, service::WeatherService, types::ForecastSeries};

// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub weather: Arc<WeatherService>,
}

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: String,
    pub mode: String,
}

// Route handlers
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let mode = match state.weather.mock_reason() {
        Some(reason) => format!("mock ({})", reason.as_str()),
        None => "live".to_string(),
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        mode,
    })
}

pub async fn get_weather(
    State(state): State<AppState>,
    Query(params): Query<WeatherQuery>,
) -> Json<Arc<ForecastSeries>> {
    Json(state.weather.get_weather(params.lat, params.lon).await)
}

pub async fn get_live_weather(
    State(state): State<AppState>,
    Query(params): Query<WeatherQuery>,
) -> Result<Json<ForecastSeries>, StatusCode> {
    match state.weather.fetch_live(params.lat, params.lon).await {
        Ok(series) => Ok(Json(series)),
        Err(e) => {
            tracing::error!("Live forecast request failed: {}", e);
            Err(status_for(&e))
        }
    }
}

fn status_for(error: &WeatherError) -> StatusCode {
    match error {
        WeatherError::MissingApiKey | WeatherError::ClientSetup(_) => StatusCode::SERVICE_UNAVAILABLE,
        e if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
        WeatherError::RequestFailed(_)
        | WeatherError::ApiError { .. }
        | WeatherError::MalformedResponse(_)
        | WeatherError::InvalidTimestamp(_) => StatusCode::BAD_GATEWAY,
    }
}

// Create the router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/weather", get(get_weather))
        .route("/weather/live", get(get_live_weather))
        .with_state(state)
}
