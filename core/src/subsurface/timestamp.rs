//! Subsurface stores the start of a dive as two attributes: a calendar date
//! (`date="2023-06-15"`) and a time of day (`time="10:00:00"`). Both have to be
//! present and valid to describe an instant.

use crate::errors::TimestampError;
use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime};
use nom::bytes::complete::take_while_m_n;
use nom::character::complete::char;
use nom::combinator::{all_consuming, map, map_res};
use nom::{Finish, IResult, Parser};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M:%S";
/// Date and time joined by a dash, e.g. `2023-06-15-10:00:00`
pub const COMPACT_FORMAT: &str = "%Y-%m-%d-%H:%M:%S";

/// The date a bare time of day is anchored at before the calendar date is
/// added: January 1st of year 0.
const REFERENCE_DATE: NaiveDate = match NaiveDate::from_ymd_opt(0, 1, 1) {
    Some(date) => date,
    None => panic!("year 0 is outside of the supported calendar range"),
};

/// Between `min` and `max` ASCII digits
fn digits(min: usize, max: usize) -> impl FnMut(&str) -> IResult<&str, u32> {
    move |input| {
        map_res(
            take_while_m_n(min, max, |c: char| c.is_ascii_digit()),
            str::parse::<u32>,
        )
        .parse(input)
    }
}

/// `YYYY-MM-DD`, with exactly four digits for the year and two for the others
fn date_fields(input: &str) -> IResult<&str, (u32, u32, u32)> {
    all_consuming(map(
        (digits(4, 4), char('-'), digits(2, 2), char('-'), digits(2, 2)),
        |(year, _, month, _, day)| (year, month, day),
    ))
    .parse(input)
}

/// `HH:MM:SS`, where the hour may be written with a single digit
fn time_fields(input: &str) -> IResult<&str, (u32, u32, u32)> {
    all_consuming(map(
        (digits(1, 2), char(':'), digits(2, 2), char(':'), digits(2, 2)),
        |(hour, _, minute, _, second)| (hour, minute, second),
    ))
    .parse(input)
}

fn parse_date(date: &str) -> Result<NaiveDate, TimestampError> {
    date_fields(date)
        .finish()
        .ok()
        .and_then(|(_, (year, month, day))| {
            NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)
        })
        .ok_or_else(|| TimestampError::InvalidDate {
            value: date.to_owned(),
        })
}

/// Leap seconds (`:60`) are rejected
fn parse_time(time: &str) -> Result<NaiveTime, TimestampError> {
    time_fields(time)
        .finish()
        .ok()
        .and_then(|(_, (hour, minute, second))| NaiveTime::from_hms_opt(hour, minute, second))
        .ok_or_else(|| TimestampError::InvalidTime {
            value: time.to_owned(),
        })
}

/// Combine a parsed date and time of day into one instant
///
/// The time of day is placed on the reference date and then moved forward by
/// the years, months and days of `date` using calendar arithmetic.
fn anchor(date: NaiveDate, time: NaiveTime) -> Result<NaiveDateTime, TimestampError> {
    let years = u32::try_from(date.year()).map_err(|_| TimestampError::OutOfRange)?;
    let months = years
        .checked_mul(12)
        .and_then(|months| months.checked_add(date.month0()))
        .ok_or(TimestampError::OutOfRange)?;

    REFERENCE_DATE
        .and_time(time)
        .checked_add_months(Months::new(months))
        .and_then(|instant| instant.checked_add_days(Days::new(u64::from(date.day0()))))
        .ok_or(TimestampError::OutOfRange)
}

/// Decode a `date`/`time` attribute pair into an instant
///
/// Both values have to match their fixed layout exactly. Anything else, like
/// `2023-6-5` or `10:0:0`, is rejected rather than normalized.
pub fn decode(date: &str, time: &str) -> Result<NaiveDateTime, TimestampError> {
    anchor(parse_date(date)?, parse_time(time)?)
}

/// Like [`decode`], for attributes that might be missing from the document
pub fn decode_fields(
    date: Option<&str>,
    time: Option<&str>,
) -> Result<NaiveDateTime, TimestampError> {
    let date = date.ok_or(TimestampError::MissingDate)?;
    let time = time.ok_or(TimestampError::MissingTime)?;

    decode(date, time)
}

/// Split an instant back into its `date` and `time` attribute values
pub fn encode(instant: &NaiveDateTime) -> (String, String) {
    (
        instant.format(DATE_FORMAT).to_string(),
        instant.format(TIME_FORMAT).to_string(),
    )
}

/// Parse a timestamp in [`COMPACT_FORMAT`]
pub fn parse_compact(value: &str) -> Result<NaiveDateTime, TimestampError> {
    NaiveDateTime::parse_from_str(value, COMPACT_FORMAT).map_err(|source| {
        TimestampError::InvalidTimestamp {
            value: value.to_owned(),
            source,
        }
    })
}
