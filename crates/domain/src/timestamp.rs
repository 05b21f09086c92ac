use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use derive_more::{AsRef, Display};

/// Completion time as written by the logging device.
///
/// The stored text is kept, because legacy records do not agree on a single
/// format. Offsets are honoured when present, otherwise the wall-clock value is
/// read on a UTC clock.
#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, Hash)]
pub struct Timestamp(String);

const NAIVE_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

impl Timestamp {
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.trim().to_string())
    }

    #[must_use]
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        if let Ok(date_time) = DateTime::parse_from_rfc3339(&self.0) {
            return Some(date_time.with_timezone(&Utc));
        }
        NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(&self.0, format).ok())
            .map(|date_time| date_time.and_utc())
    }

    /// Date portion of the text, ignoring time of day and offset.
    #[must_use]
    pub fn date(&self) -> Option<NaiveDate> {
        let date = self.0.split(['T', 't', ' ']).next()?;
        NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
    }

    /// Both instants are known and at most `window` apart.
    #[must_use]
    pub fn is_within(&self, other: &Timestamp, window: TimeDelta) -> bool {
        match (self.instant(), other.instant()) {
            (Some(a), Some(b)) => {
                let delta = a - b;
                -window <= delta && delta <= window
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn is_same_day(&self, other: &Timestamp) -> bool {
        match (self.date(), other.date()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl From<&str> for Timestamp {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
