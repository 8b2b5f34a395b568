use lazy_regex::regex_captures;
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time};

use crate::commands::CommandError;

pub const DATE_EXAMPLE: &str = "2025-06-15";
pub const TIME_EXAMPLE: &str = "18:00";

fn invalid_argument(message: String) -> CommandError {
    super::invalid_argument(format!(
        "{message}\nUse a date like `{DATE_EXAMPLE}` and a 24-hour UTC time like `{TIME_EXAMPLE}`."
    ))
}

/// A date and a time typed separately by a player, always meant as UTC.
#[derive(PartialEq, Eq, Debug)]
pub struct ManualDateTime {
    date: Date,
    time: Time,
}

impl ManualDateTime {
    pub fn parse(date: &str, time: &str) -> Result<ManualDateTime, CommandError> {
        Ok(ManualDateTime {
            date: parse_date(date.trim())?,
            time: parse_time(time.trim())?,
        })
    }

    pub fn to_utc(&self) -> OffsetDateTime {
        PrimitiveDateTime::new(self.date, self.time).assume_utc()
    }
}

fn parse_date(token: &str) -> Result<Date, CommandError> {
    let Some((_, year, month, day)) = regex_captures!(r"^(\d{4})-(\d{2})-(\d{2})$", token) else {
        return Err(invalid_argument(format!("Invalid date: `{token}`.")));
    };

    let year = year
        .parse()
        .map_err(|_| invalid_argument(format!("Invalid year: `{year}`.")))?;
    let month: u8 = month
        .parse()
        .map_err(|_| invalid_argument(format!("Invalid month: `{month}`.")))?;
    let day = day
        .parse()
        .map_err(|_| invalid_argument(format!("Invalid day: `{day}`.")))?;

    Date::from_calendar_date(
        year,
        Month::try_from(month)
            .map_err(|_| invalid_argument(format!("Invalid month: `{month}`.")))?,
        day,
    )
    .map_err(|_| invalid_argument(format!("Invalid date: `{token}`.")))
}

fn parse_time(token: &str) -> Result<Time, CommandError> {
    let Some((_, hour, minute)) = regex_captures!(r"^(\d{2}):(\d{2})$", token) else {
        return Err(invalid_argument(format!("Invalid time: `{token}`.")));
    };

    let hour = hour
        .parse()
        .map_err(|_| invalid_argument(format!("Invalid hour: `{hour}`.")))?;
    let minute = minute
        .parse()
        .map_err(|_| invalid_argument(format!("Invalid minute: `{minute}`.")))?;

    Time::from_hms(hour, minute, 0).map_err(|_| invalid_argument(format!("Invalid time: `{token}`.")))
}
