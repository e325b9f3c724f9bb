use super::clock::{Clock, DisplayZone};
use super::random::{SeededRandom, StdRandom};
use super::types::*;
use chrono::{DateTime, Duration, Timelike, Utc};
use std::marker::PhantomData;
use std::sync::Arc;

/// Synthetic marine forecast used when the live provider is off or failing.
///
/// Output is a pure function of the clock reading, the coordinate and the
/// random source, so two calls within the same second agree.
pub struct MockGenerator<R = StdRandom> {
    clock: Arc<dyn Clock>,
    zone: DisplayZone,
    _source: PhantomData<fn() -> R>,
}

impl<R: SeededRandom> MockGenerator<R> {
    pub fn new(clock: Arc<dyn Clock>, zone: DisplayZone) -> Self {
        Self {
            clock,
            zone,
            _source: PhantomData,
        }
    }

    pub fn generate(&self, lat: f64, lon: f64) -> ForecastSeries {
        let start = self.clock.now();
        (0..MAX_HOURS)
            .map(|hour| self.mock_hour(start, hour, lat, lon))
            .collect()
    }

    fn mock_hour(&self, start: DateTime<Utc>, hour: usize, lat: f64, lon: f64) -> HourlyReading {
        let time = start + Duration::hours(hour as i64);
        let mut rng = R::from_seed(hour_seed(time, hour, lat, lon));

        let hour_of_day = self.zone.wall_clock(time).hour() as f64;
        let day = hour / 24;

        // Fronts roll through every 3 days; gusts peak around noon and midnight
        let base_wind = 8.0 + 3.0 * (day % 3) as f64;
        let wind_variation = 2.0 * (1.0 + 0.5 * (hour_of_day - 12.0).abs() / 12.0);
        let wind_speed = (base_wind + rng.uniform(-wind_variation, wind_variation)).clamp(2.0, 25.0);

        let base_direction = 200.0 + 30.0 * (day % 5) as f64;
        let direction_variation = 40.0 + 20.0 * rng.next_f64();
        let wind_deg = (base_direction + direction_variation) % 360.0;

        let wave_base = (wind_speed * 0.15).min(4.0);
        let wave_height = (wave_base + rng.uniform(-0.3, 0.8)).clamp(0.5, 6.0);

        let wave_period = (4.0 + wave_height * 0.8 + rng.uniform(-1.0, 2.0)).clamp(3.0, 12.0);

        HourlyReading {
            timestamp: self.zone.format_timestamp(time),
            wind_speed_ms: round1(wind_speed),
            wind_deg: round1(wind_deg) % 360.0,
            waves: WaveReading {
                significant_height_m: round1(wave_height),
                peak_period_s: round1(wave_period),
            },
            mock: Some(true),
        }
    }
}

fn hour_seed(time: DateTime<Utc>, hour: usize, lat: f64, lon: f64) -> u64 {
    let time_seed = time.timestamp().rem_euclid(10_000);
    let location_seed = (((lat + lon) * 1000.0).trunc() as i64).rem_euclid(1000);
    (time_seed + location_seed + hour as i64) as u64
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
