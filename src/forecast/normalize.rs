use super::clock::DisplayZone;
use super::error::WeatherError;
use super::types::*;
use chrono::DateTime;
use serde_json::Value;

/// Reshapes a raw one-call document into at most [`MAX_HOURS`] readings,
/// keeping upstream order.
pub fn normalize_onecall(raw: Value, zone: &DisplayZone) -> Result<ForecastSeries, WeatherError> {
    let onecall: OneCallResponse = serde_json::from_value(raw)?;

    onecall
        .hourly
        .into_iter()
        .take(MAX_HOURS)
        .map(|raw_hour| {
            let hourly: OneCallHourly = serde_json::from_value(raw_hour)?;
            HourlyReading::from_onecall(&hourly, zone)
        })
        .collect()
}

impl HourlyReading {
    pub fn from_onecall(hourly: &OneCallHourly, zone: &DisplayZone) -> Result<Self, WeatherError> {
        let instant =
            DateTime::from_timestamp(hourly.dt, 0).ok_or(WeatherError::InvalidTimestamp(hourly.dt))?;

        Ok(Self {
            timestamp: zone.format_timestamp(instant),
            wind_speed_ms: hourly.wind_speed,
            wind_deg: hourly.wind_deg,
            waves: WaveReading {
                significant_height_m: hourly.waves.hs_m,
                peak_period_s: hourly.waves.tp_s,
            },
            mock: None,
        })
    }
}
