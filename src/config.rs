use crate::forecast::clock::DisplayZone;
use std::env;
use std::time::Duration;

/// Key shipped in sample env files; never valid upstream.
pub const PLACEHOLDER_API_KEY: &str = "demo_key_12345";

#[derive(Clone, Debug)]
pub struct Config {
    pub owm_key: Option<String>,
    pub use_mock: bool,
    pub openweather_base_url: String,
    pub openweather_onecall_path: String,
    pub http_timeout: Duration,
    pub cache_ttl: Duration,
    pub display_zone: DisplayZone,
    pub bind_addr: String,
}

/// Why the service answers with synthetic data instead of calling upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockReason {
    Forced,
    MissingKey,
    PlaceholderKey,
}

impl MockReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            MockReason::Forced => "forced",
            MockReason::MissingKey => "missing_key",
            MockReason::PlaceholderKey => "placeholder_key",
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let http_timeout_secs = parse_secs(&lookup, "HTTP_TIMEOUT_SECS", 10)?;
        let cache_ttl_secs = parse_secs(&lookup, "CACHE_TTL_SECS", 3600)?;

        let display_zone = match lookup("APP_TIMEZONE").filter(|tz| !tz.trim().is_empty()) {
            Some(tz) => DisplayZone::Named(
                tz.trim()
                    .parse::<chrono_tz::Tz>()
                    .map_err(|e| anyhow::anyhow!("APP_TIMEZONE is invalid: {}", e))?,
            ),
            None => DisplayZone::Local,
        };

        Ok(Config {
            owm_key: lookup("OWM_KEY").filter(|key| !key.is_empty()),
            use_mock: lookup("USE_MOCK")
                .map(|v| is_truthy(&v))
                .unwrap_or(false),
            openweather_base_url: lookup("OPENWEATHER_BASE_URL")
                .unwrap_or_else(|| "https://api.openweathermap.org".to_string()),
            openweather_onecall_path: lookup("OPENWEATHER_ONECALL_PATH")
                .unwrap_or_else(|| "/data/2.5/onecall".to_string()),
            http_timeout: Duration::from_secs(http_timeout_secs),
            cache_ttl: Duration::from_secs(cache_ttl_secs),
            display_zone,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string()),
        })
    }

    /// `Some` when every request should be served from the mock generator.
    pub fn mock_reason(&self) -> Option<MockReason> {
        if self.use_mock {
            return Some(MockReason::Forced);
        }
        match self.owm_key.as_deref() {
            None => Some(MockReason::MissingKey),
            Some(PLACEHOLDER_API_KEY) => Some(MockReason::PlaceholderKey),
            Some(_) => None,
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes")
}

fn parse_secs<F>(lookup: &F, name: &str, default: u64) -> anyhow::Result<u64>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|e| anyhow::anyhow!("{} must be a whole number of seconds: {}", name, e)),
        None => Ok(default),
    }
}
