use crate::errors::TimestampError;
use crate::parsers::duration::parse_duration;
use crate::subsurface::timestamp;
use crate::subsurface::types::Element;
use chrono::{Duration, NaiveDateTime};

/// Root of a Subsurface XML document (`<divelog>`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiveLog {
    pub program: Option<String>,
    pub version: Option<String>,
    /// Application settings, passed through untouched
    pub settings: Option<Element>,
    pub dives: Option<Dives>,
}

impl DiveLog {
    pub fn dives(&self) -> impl Iterator<Item = &Dive> {
        self.dives.iter().flat_map(|dives| dives.dives.iter())
    }

    pub fn dives_mut(&mut self) -> impl Iterator<Item = &mut Dive> {
        self.dives.iter_mut().flat_map(|dives| dives.dives.iter_mut())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dives {
    /// `<dive>` children in document order
    pub dives: Vec<Dive>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dive {
    pub number: Option<i32>,
    pub date: Option<String>,
    /// Time of day on `date`
    pub time: Option<String>,
    /// Dive time as written by Subsurface, e.g. `45:30 min`
    pub raw_duration: Option<String>,
    pub rating: Option<i32>,
    pub visibility: Option<i32>,
    pub location: Option<Location>,
    /// One `<divecomputer>` per device that recorded the dive
    pub computers: Vec<ComputerDive>,
    pub notes: Option<String>,
    pub suit: Option<String>,
    pub buddy: Option<String>,
}

impl Dive {
    /// Start of the dive, combined from the `date` and `time` attributes
    pub fn timestamp(&self) -> Result<NaiveDateTime, TimestampError> {
        timestamp::decode_fields(self.date.as_deref(), self.time.as_deref())
    }

    pub fn set_timestamp(&mut self, instant: &NaiveDateTime) {
        let (date, time) = timestamp::encode(instant);
        self.date = Some(date);
        self.time = Some(time);
    }

    /// Dive time parsed from the raw `duration` attribute
    ///
    /// Only the first word is considered. `12:34 min` becomes 12 minutes and
    /// 34 seconds. Missing or unreadable values yield a zero duration.
    pub fn duration(&self) -> Duration {
        self.raw_duration
            .as_deref()
            .and_then(|raw| raw.split_whitespace().next())
            .map(|minutes| format!("{}s", minutes.replacen(':', "m", 2)))
            .and_then(|value| parse_duration(&value).ok())
            .unwrap_or_else(Duration::zero)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Location {
    pub gps: Option<String>,
    /// Text content of `<location>`, kept exactly as written
    pub name: String,
}

/// The record a single dive computer kept of the dive
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComputerDive {
    pub model: String,
    /// `deviceid` attribute
    pub device_id: String,
    /// `diveid` attribute
    pub dive_id: String,
    pub date: Option<String>,
    pub time: Option<String>,
    /// `<notes>` child
    pub note: Option<String>,
    pub depth: Option<DepthStatistics>,
    pub temperature: Option<Temperature>,
    pub samples: Vec<Sample>,
}

impl ComputerDive {
    pub fn timestamp(&self) -> Result<NaiveDateTime, TimestampError> {
        timestamp::decode_fields(self.date.as_deref(), self.time.as_deref())
    }

    pub fn set_timestamp(&mut self, instant: &NaiveDateTime) {
        let (date, time) = timestamp::encode(instant);
        self.date = Some(date);
        self.time = Some(time);
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DepthStatistics {
    pub max: Option<String>,
    pub mean: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Temperature {
    pub water: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sample {
    pub time: Option<String>,
    pub depth: Option<String>,
    pub temp: Option<String>,
}
