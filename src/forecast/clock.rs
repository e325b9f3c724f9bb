use chrono::{DateTime, Local, NaiveDateTime, Utc};
use chrono_tz::Tz;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Zone whose wall-clock time is written into reading timestamps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayZone {
    /// Host timezone of the running process.
    Local,
    Named(Tz),
}

impl DisplayZone {
    pub fn wall_clock(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        match self {
            DisplayZone::Local => instant.with_timezone(&Local).naive_local(),
            DisplayZone::Named(tz) => instant.with_timezone(tz).naive_local(),
        }
    }

    /// Formats `instant` as wall-clock ISO-8601 and appends a literal `Z`.
    ///
    /// The suffix is written regardless of the zone's offset, so the string
    /// only denotes UTC when the zone is UTC. Consumers already parse this
    /// shape, so it is kept as is.
    pub fn format_timestamp(&self, instant: DateTime<Utc>) -> String {
        format!("{}Z", self.wall_clock(instant).format("%Y-%m-%dT%H:%M:%S"))
    }
}

#[cfg(test)]
pub use manual::ManualClock;
