//! Duration strings in the notation Subsurface tooling has always used for the
//! shift amount: an optional sign followed by decimal numbers with unit
//! suffixes, e.g. `2h30m`, `-1h`, `1.5s` or `300ms`.

use crate::errors::DurationError;
use chrono::Duration;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{char, digit0, one_of};
use nom::combinator::{all_consuming, eof, map, opt, recognize, value, verify};
use nom::multi::fold_many1;
use nom::{Finish, IResult, Parser};

const NANOSECOND: u64 = 1;
const MICROSECOND: u64 = 1_000 * NANOSECOND;
const MILLISECOND: u64 = 1_000 * MICROSECOND;
const SECOND: u64 = 1_000 * MILLISECOND;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;

/// Fractional digits past this point are below nanosecond resolution
const MAX_FRACTION_DIGITS: usize = 18;

fn sign(input: &str) -> IResult<&str, bool> {
    map(opt(one_of("+-")), |sign| sign == Some('-')).parse(input)
}

fn unit(input: &str) -> IResult<&str, u64> {
    alt((
        value(NANOSECOND, tag("ns")),
        value(MICROSECOND, tag("us")),
        // U+00B5 (micro sign) and U+03BC (greek small letter mu)
        value(MICROSECOND, tag("µs")),
        value(MICROSECOND, tag("μs")),
        value(MILLISECOND, tag("ms")),
        value(SECOND, tag("s")),
        value(MINUTE, tag("m")),
        value(HOUR, tag("h")),
    ))
    .parse(input)
}

fn decimal(input: &str) -> IResult<&str, &str> {
    verify(
        recognize((digit0, opt((char('.'), digit0)))),
        |digits: &str| digits.bytes().any(|b| b.is_ascii_digit()),
    )
    .parse(input)
}

/// A single `<decimal><unit>` term in nanoseconds, `None` on overflow
fn component(input: &str) -> IResult<&str, Option<u64>> {
    map((decimal, unit), |(decimal, unit)| {
        let (whole, fraction) = decimal.split_once('.').unwrap_or((decimal, ""));
        scale(whole, fraction, unit)
    })
    .parse(input)
}

fn duration(input: &str) -> IResult<&str, (bool, Option<u64>)> {
    all_consuming((
        sign,
        alt((
            value(Some(0), (tag("0"), eof)),
            fold_many1(
                component,
                || Some(0u64),
                |total: Option<u64>, nanos| {
                    total
                        .zip(nanos)
                        .and_then(|(total, nanos)| total.checked_add(nanos))
                },
            ),
        )),
    ))
    .parse(input)
}

fn scale(whole: &str, fraction: &str, unit: u64) -> Option<u64> {
    let whole = match whole {
        "" => 0,
        digits => digits.parse::<u64>().ok()?,
    };
    let mut nanos = whole.checked_mul(unit)?;

    let digits = &fraction[..fraction.len().min(MAX_FRACTION_DIGITS)];
    if !digits.is_empty() {
        let numerator = digits.parse::<u128>().ok()? * u128::from(unit);
        let denominator = 10u128.pow(digits.len() as u32);
        nanos = nanos.checked_add(u64::try_from(numerator / denominator).ok()?)?;
    }

    Some(nanos)
}

/// Parse a signed duration like `2h30m`, `-1h` or `1.5s`
///
/// Valid units are `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h`. A bare `0` is
/// accepted without a unit. The total has to fit into 64 bits of nanoseconds.
pub fn parse_duration(input: &str) -> Result<Duration, DurationError> {
    let (negative, nanos) = match duration(input).finish() {
        Ok((_remaining, parsed)) => parsed,
        Err(_) => return Err(DurationError::Invalid(input.to_owned())),
    };

    let nanos = nanos
        .map(i128::from)
        .map(|nanos| if negative { -nanos } else { nanos })
        .and_then(|nanos| i64::try_from(nanos).ok())
        .ok_or_else(|| DurationError::OutOfRange(input.to_owned()))?;

    Ok(Duration::nanoseconds(nanos))
}

fn split_fraction(value: u64, precision: u32) -> (u64, String) {
    let scale = 10u64.pow(precision);
    let fraction = value % scale;
    let digits = match fraction {
        0 => String::new(),
        _ => {
            let padded = format!("{:0width$}", fraction, width = precision as usize);
            format!(".{}", padded.trim_end_matches('0'))
        }
    };

    (value / scale, digits)
}

/// Format a duration in the notation accepted by [`parse_duration`]
///
/// Durations of a second or more are written as hours, minutes and seconds
/// (`2h30m0s`), shorter ones with the largest fitting sub-second unit.
pub fn format_duration(duration: &Duration) -> Result<String, DurationError> {
    let nanos = duration
        .num_nanoseconds()
        .ok_or_else(|| DurationError::OutOfRange(duration.to_string()))?;
    let magnitude = nanos.unsigned_abs();

    let formatted = match magnitude {
        0 => "0s".to_string(),
        n if n < MICROSECOND => format!("{n}ns"),
        n if n < MILLISECOND => {
            let (whole, fraction) = split_fraction(n, 3);
            format!("{whole}{fraction}µs")
        }
        n if n < SECOND => {
            let (whole, fraction) = split_fraction(n, 6);
            format!("{whole}{fraction}ms")
        }
        n => {
            let (seconds, fraction) = split_fraction(n, 9);
            let (hours, minutes, seconds) = (seconds / 3600, seconds / 60 % 60, seconds % 60);

            if hours > 0 {
                format!("{hours}h{minutes}m{seconds}{fraction}s")
            } else if minutes > 0 {
                format!("{minutes}m{seconds}{fraction}s")
            } else {
                format!("{seconds}{fraction}s")
            }
        }
    };

    match nanos < 0 {
        true => Ok(format!("-{formatted}")),
        false => Ok(formatted),
    }
}
