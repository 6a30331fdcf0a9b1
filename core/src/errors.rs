use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Error parsing the Subsurface dive log: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("Invalid value `{value}` for attribute `{name}`")]
    InvalidNumber {
        name: String,
        value: String,
        source: std::num::ParseIntError,
    },
    #[error("The Subsurface dive log has no root element")]
    MissingRoot,
}

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("Error serializing the Subsurface dive log: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("Error writing the Subsurface dive log")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimestampError {
    #[error("The dive is missing a date")]
    MissingDate,
    #[error("The dive is missing a time of day")]
    MissingTime,
    #[error("Invalid date `{value}`, expected YYYY-MM-DD")]
    InvalidDate { value: String },
    #[error("Invalid time of day `{value}`, expected HH:MM:SS")]
    InvalidTime { value: String },
    #[error("Invalid timestamp `{value}`: {source}")]
    InvalidTimestamp {
        value: String,
        source: chrono::ParseError,
    },
    #[error("The timestamp is outside of the supported calendar range")]
    OutOfRange,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DurationError {
    #[error("Invalid duration `{0}`")]
    Invalid(String),
    #[error("Duration `{0}` is out of range")]
    OutOfRange(String),
}
