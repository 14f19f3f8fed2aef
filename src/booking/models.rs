//! Value types for booking windows.
//!
//! Everything here is transient: a window is re-derived from form input on
//! every edit and never persisted.

use std::fmt;
use std::str::FromStr;

use chrono::{
    DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Timelike,
    Weekday,
};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use super::error::BookingError;

const TIME_POINT_FORMAT: &str = "%Y-%m-%dT%H:%M";
const TIME_POINT_FORMAT_WITH_SECONDS: &str = "%Y-%m-%dT%H:%M:%S";

/// Wall-clock date and time in the resident's local timezone, at minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimePoint(NaiveDateTime);

impl TimePoint {
    /// Build from calendar fields. Fails only for dates or times that do not exist.
    pub fn from_ymd_hm(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
    ) -> Result<Self, BookingError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, 0))
            .map(Self)
            .ok_or_else(|| {
                BookingError::InvalidTimePoint(format!(
                    "{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}"
                ))
            })
    }

    /// Build from a wall-clock value, dropping seconds.
    pub fn from_naive(value: NaiveDateTime) -> Self {
        let date = value.date();
        let time = NaiveTime::from_hms_opt(value.hour(), value.minute(), 0)
            .unwrap_or(NaiveTime::MIN);
        Self(date.and_time(time))
    }

    /// Build from a raw timestamp, taking its local wall-clock reading.
    pub fn from_timestamp<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> Self {
        Self::from_naive(timestamp.naive_local())
    }

    pub fn naive(&self) -> NaiveDateTime {
        self.0
    }

    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    pub fn time(&self) -> NaiveTime {
        self.0.time()
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Minutes elapsed since midnight of this point's date.
    pub fn minutes_since_midnight(&self) -> u32 {
        self.0.hour() * 60 + self.0.minute()
    }

    /// Midnight of `date` shifted by `minutes`.
    ///
    /// Values of 1440 or more land on following days.
    pub fn at_minutes_past_midnight(date: NaiveDate, minutes: i64) -> Self {
        Self(date.and_time(NaiveTime::MIN) + TimeDelta::minutes(minutes))
    }

    /// Resolve the wall-clock reading to an instant in `tz`.
    ///
    /// Ambiguous readings (clocks going back) take the earlier instant;
    /// readings inside a gap (clocks going forward) are pushed past the gap.
    pub fn to_zoned<Tz: TimeZone>(&self, tz: &Tz) -> DateTime<Tz> {
        tz.from_local_datetime(&self.0)
            .earliest()
            .or_else(|| tz.from_local_datetime(&(self.0 + TimeDelta::hours(1))).earliest())
            .unwrap_or_else(|| tz.from_utc_datetime(&self.0))
    }

    pub fn parse(value: &str) -> Result<Self, BookingError> {
        let trimmed = value.trim();
        NaiveDateTime::parse_from_str(trimmed, TIME_POINT_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(trimmed, TIME_POINT_FORMAT_WITH_SECONDS))
            .map(Self::from_naive)
            .map_err(|_| BookingError::InvalidTimePoint(value.to_string()))
    }
}

impl FromStr for TimePoint {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TimePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIME_POINT_FORMAT))
    }
}

impl Serialize for TimePoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimePoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(de::Error::custom)
    }
}

/// Start and end of a booking.
///
/// `end` is not required to come after `start`; ordering is checked by the
/// backend on submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingWindow {
    pub start: TimePoint,
    pub end: TimePoint,
}

impl BookingWindow {
    pub const fn new(start: TimePoint, end: TimePoint) -> Self {
        Self { start, end }
    }

    /// Signed wall-clock length; negative when `end` precedes `start`.
    pub fn duration(&self) -> TimeDelta {
        self.end.naive() - self.start.naive()
    }
}

/// What the elevator is booked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingKind {
    #[default]
    #[serde(alias = "delivery", alias = "disposal")]
    DeliveryDisposal,
    Move,
}

impl BookingKind {
    /// Only moves are charged.
    pub fn charges_fee(self) -> bool {
        matches!(self, BookingKind::Move)
    }
}

/// Length of the booking grid in minutes. Always a positive divisor of 60.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotInterval(u32);

impl SlotInterval {
    pub const QUARTER_HOUR: Self = Self(15);

    pub fn minutes(self) -> u32 {
        self.0
    }
}

impl Default for SlotInterval {
    fn default() -> Self {
        Self::QUARTER_HOUR
    }
}

impl TryFrom<u32> for SlotInterval {
    type Error = BookingError;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        if minutes == 0 || 60 % minutes != 0 {
            return Err(BookingError::InvalidInterval(minutes));
        }
        Ok(Self(minutes))
    }
}
