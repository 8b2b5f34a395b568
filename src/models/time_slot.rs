use std::{fmt::Display, str::FromStr};

use strum::{EnumIter, EnumString};
use time::{Duration, OffsetDateTime, UtcOffset, Weekday};

use crate::matching::parse_slot_item;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, EnumString, EnumIter, strum::Display,
)]
#[strum(ascii_case_insensitive)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    /// Monday is 0, Sunday is 6.
    pub fn index(self) -> u8 {
        self as u8
    }
}

impl From<Day> for Weekday {
    fn from(value: Day) -> Self {
        match value {
            Day::Monday => Weekday::Monday,
            Day::Tuesday => Weekday::Tuesday,
            Day::Wednesday => Weekday::Wednesday,
            Day::Thursday => Weekday::Thursday,
            Day::Friday => Weekday::Friday,
            Day::Saturday => Weekday::Saturday,
            Day::Sunday => Weekday::Sunday,
        }
    }
}

/// One hour of weekly availability, always in UTC.
///
/// Ordered by weekday (Monday first), then by hour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot {
    day: Day,
    hour: u8,
}

impl TimeSlot {
    pub fn new(day: Day, hour: u8) -> Option<TimeSlot> {
        (hour < 24).then_some(TimeSlot { day, hour })
    }

    pub fn day(&self) -> Day {
        self.day
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// The first instant at or after `now` that falls on this weekday and hour.
    ///
    /// If the slot has already started this week, the occurrence of the next week is returned.
    pub fn next_occurrence(&self, now: OffsetDateTime) -> OffsetDateTime {
        let now = now.to_offset(UtcOffset::UTC);

        let days_ahead = (i64::from(self.day.index())
            - i64::from(now.weekday().number_days_from_monday()))
        .rem_euclid(7);

        let candidate = ((now.date() + Duration::days(days_ahead)).midnight()
            + Duration::hours(self.hour.into()))
        .assume_utc();

        if candidate < now {
            candidate + Duration::weeks(1)
        } else {
            candidate
        }
    }
}

impl Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {:02}:00 UTC", self.day, self.hour)
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("Invalid time slot: `{0}`. It should look like `Monday 18:00 UTC`.")]
pub struct InvalidTimeSlot(String);

impl FromStr for TimeSlot {
    type Err = InvalidTimeSlot;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_slot_item(s).as_slice() {
            [slot] => Ok(*slot),
            _ => Err(InvalidTimeSlot(s.trim().to_string())),
        }
    }
}
