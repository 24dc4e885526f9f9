//! Calendar date keys and times of day.
//!
//! Both serialize as plain strings: `DateKey` as `YYYY-MM-DD` (used as map
//! keys in the persisted aggregate), `TimeOfDay` as zero-padded `HH:MM`.

use chrono::{DateTime, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Locale-stable calendar date key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Date key of `at` as seen in the timezone `tz`.
    pub fn of<Tz: TimeZone>(at: &DateTime<Tz>) -> Self {
        Self(at.date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_KEY_FORMAT))
    }
}

impl FromStr for DateKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // chrono accepts unpadded fields; the key format does not.
        if s.len() != 10 {
            return Err(invalid_date(s));
        }
        NaiveDate::parse_from_str(s, DATE_KEY_FORMAT)
            .map(Self)
            .map_err(|_| invalid_date(s))
    }
}

impl TryFrom<String> for DateKey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DateKey> for String {
    fn from(key: DateKey) -> Self {
        key.to_string()
    }
}

fn invalid_date(s: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: "date".into(),
        message: format!("'{s}' is not a YYYY-MM-DD date"),
    }
}

/// Minutes since midnight, `00:00` through `23:59`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const MINUTES_PER_DAY: u16 = 24 * 60;

    pub fn new(hour: u16, minute: u16) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self(hour * 60 + minute))
        } else {
            None
        }
    }

    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes < Self::MINUTES_PER_DAY).then_some(Self(minutes))
    }

    pub fn minutes(&self) -> u16 {
        self.0
    }

    pub fn hour(&self) -> u16 {
        self.0 / 60
    }

    pub fn minute(&self) -> u16 {
        self.0 % 60
    }

    /// Add minutes, saturating at `23:59`.
    pub fn saturating_add_minutes(&self, minutes: u16) -> Self {
        Self(self.0.saturating_add(minutes).min(Self::MINUTES_PER_DAY - 1))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidValue {
            field: "time".into(),
            message: format!("'{s}' is not an HH:MM time"),
        };
        let (h, m) = s.split_once(':').ok_or_else(invalid)?;
        if h.len() != 2 || m.len() != 2 {
            return Err(invalid());
        }
        let hour: u16 = h.parse().map_err(|_| invalid())?;
        let minute: u16 = m.parse().map_err(|_| invalid())?;
        Self::new(hour, minute).ok_or_else(invalid)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(time: TimeOfDay) -> Self {
        time.to_string()
    }
}

/// Timestamps written as RFC 3339 and read from either RFC 3339 strings or
/// epoch milliseconds, the form older dashboard payloads used.
pub mod timestamp {
    use chrono::{DateTime, TimeZone, Utc};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(DateTime<Utc>),
        Millis(i64),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Raw::deserialize(deserializer)? {
            Raw::Text(at) => Ok(at),
            Raw::Millis(ms) => Utc
                .timestamp_millis_opt(ms)
                .single()
                .ok_or_else(|| D::Error::custom(format!("timestamp {ms} out of range"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::BTreeMap;

    #[test]
    fn date_key_formats_zero_padded() {
        let key = DateKey::from_ymd(2024, 1, 5).unwrap();
        assert_eq!(key.to_string(), "2024-01-05");
        assert_eq!("2024-01-05".parse::<DateKey>().unwrap(), key);
    }

    #[test]
    fn date_key_rejects_unpadded_and_garbage() {
        assert!("2024-1-5".parse::<DateKey>().is_err());
        assert!("01/15/2024".parse::<DateKey>().is_err());
        assert!("2024-02-30".parse::<DateKey>().is_err());
    }

    #[test]
    fn date_key_works_as_json_map_key() {
        let mut map = BTreeMap::new();
        map.insert(DateKey::from_ymd(2024, 1, 15).unwrap(), true);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"2024-01-15":true}"#);
        let back: BTreeMap<DateKey, bool> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn date_key_of_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 23, 59, 0).unwrap();
        assert_eq!(DateKey::of(&at).to_string(), "2024-03-09");
    }

    #[test]
    fn time_of_day_parses_and_orders() {
        let nine: TimeOfDay = "09:00".parse().unwrap();
        let half_ten: TimeOfDay = "10:30".parse().unwrap();
        assert!(nine < half_ten);
        assert_eq!(half_ten.minutes(), 630);
        assert_eq!(serde_json::to_string(&half_ten).unwrap(), "\"10:30\"");
    }

    #[test]
    fn time_of_day_rejects_out_of_range() {
        assert!("24:00".parse::<TimeOfDay>().is_err());
        assert!("09:60".parse::<TimeOfDay>().is_err());
        assert!("9:00".parse::<TimeOfDay>().is_err());
        assert!(serde_json::from_str::<TimeOfDay>("\"noon\"").is_err());
    }

    #[derive(Deserialize)]
    struct Stamped {
        #[serde(deserialize_with = "timestamp::deserialize")]
        at: DateTime<Utc>,
    }

    #[test]
    fn timestamps_accept_rfc3339_and_epoch_millis() {
        let text: Stamped = serde_json::from_str(r#"{"at":"2024-01-15T09:30:00Z"}"#).unwrap();
        let millis: Stamped = serde_json::from_str(r#"{"at":1705311000000}"#).unwrap();
        assert_eq!(text.at, millis.at);
        assert!(serde_json::from_str::<Stamped>(r#"{"at":true}"#).is_err());
    }

    #[test]
    fn saturating_add_stops_at_end_of_day() {
        let t = TimeOfDay::new(23, 45).unwrap();
        assert_eq!(t.saturating_add_minutes(30).to_string(), "23:59");
        assert_eq!(TimeOfDay::new(10, 0).unwrap().saturating_add_minutes(30).to_string(), "10:30");
    }
}
