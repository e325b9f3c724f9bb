use serde::{Deserialize, Serialize};

/// Normalized hourly marine reading served to downstream consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyReading {
    /// Wall-clock time in the display zone with a literal `Z` suffix.
    #[serde(rename = "t_iso")]
    pub timestamp: String,
    pub wind_speed_ms: f64,
    pub wind_deg: f64,
    pub waves: WaveReading,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mock: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveReading {
    #[serde(rename = "Hs_m")]
    pub significant_height_m: f64,
    #[serde(rename = "Tp_s")]
    pub peak_period_s: f64,
}

pub type ForecastSeries = Vec<HourlyReading>;

/// Ten days of hourly data.
pub const MAX_HOURS: usize = 240;

// Upstream one-call document. Only the fields we read are modelled; anything
// missing below `hourly` falls back to zero. Hours stay raw until they are
// known to fall inside the kept window.

#[derive(Debug, Clone, Deserialize)]
pub struct OneCallResponse {
    pub hourly: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OneCallHourly {
    pub dt: i64,
    #[serde(default)]
    pub wind_speed: f64,
    #[serde(default)]
    pub wind_deg: f64,
    #[serde(default)]
    pub waves: OneCallWaves,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OneCallWaves {
    #[serde(rename = "Hs_m", default)]
    pub hs_m: f64,
    #[serde(rename = "Tp_s", default)]
    pub tp_s: f64,
}
