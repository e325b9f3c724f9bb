use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod forecast;
mod routes;

use config::Config;
use routes::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marine_weather_ingest=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    match config.mock_reason() {
        Some(reason) => tracing::warn!("Serving mock forecasts only ({})", reason.as_str()),
        None => tracing::info!(
            "Live forecasts from {}{}, cache TTL {}s",
            config.openweather_base_url,
            config.openweather_onecall_path,
            config.cache_ttl.as_secs()
        ),
    }

    let weather = Arc::new(forecast::build_service(&config)?);
    let state = AppState { weather };

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(config.bind_addr.as_str()).await?;
    tracing::info!("Server starting on http://{}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
