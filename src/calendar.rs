use std::fmt;

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Duration, Month, OffsetDateTime, Weekday};


// Dates are shown and typed the Brazilian way.
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[day]/[month]/[year]");

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum DateError {
    Unparsable { input: String },
}

impl fmt::Display for DateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateError::Unparsable { input } => {
                write!(f, "cannot parse '{input}' as a dd/mm/yyyy date")
            }
        }
    }
}

impl std::error::Error for DateError {}

pub fn today_utc() -> Date { OffsetDateTime::now_utc().date() }

pub fn format_date(date: Date) -> String {
    // The format only has numeric components, so it cannot fail for a valid `Date`.
    date.format(DATE_FORMAT).unwrap_or_else(|_| date.to_string())
}

pub fn parse_date(input: &str) -> Result<Date, DateError> {
    Date::parse(input.trim(), DATE_FORMAT)
        .map_err(|_| DateError::Unparsable { input: input.to_owned() })
}

// `today` if a session happens today, otherwise the next session day. `None` past the last
// representable date.
pub fn next_session_date(today: Date, weekday: Weekday) -> Option<Date> {
    (0..7)
        .map_while(|days| today.checked_add(Duration::days(days)))
        .find(|date| date.weekday() == weekday)
}

// Every `weekday` from `today` (inclusive) through December 31 of `last_year`.
pub fn session_dates(today: Date, weekday: Weekday, last_year: i32) -> Vec<Date> {
    let Ok(last_day) = Date::from_calendar_date(last_year, Month::December, 31) else {
        return Vec::new();
    };
    if today > last_day {
        return Vec::new();
    }
    let Some(mut next) = next_session_date(today, weekday) else {
        return Vec::new();
    };
    let mut dates = Vec::new();
    while next <= last_day {
        dates.push(next);
        match next.checked_add(Duration::weeks(1)) {
            Some(date) => next = date,
            None => break,
        }
    }
    dates
}
