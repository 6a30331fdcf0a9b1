pub mod models;
pub mod timestamp;
pub mod types;

mod reader;
mod writer;

use crate::errors::{DecodeError, EncodeError};
use std::io::{BufRead, Write};

pub use models::{
    ComputerDive, DepthStatistics, Dive, DiveLog, Dives, Location, Sample, Temperature,
};
pub use types::{Element, Node};

/// Indentation Subsurface itself uses for its XML files
pub const DEFAULT_INDENT: usize = 3;

/// Read a Subsurface XML dive log
pub fn decode<R: BufRead>(input: R) -> Result<DiveLog, DecodeError> {
    let log = reader::DiveLogReader::new(input).read_divelog()?;

    tracing::debug!(
        program = log.program.as_deref().unwrap_or_default(),
        version = log.version.as_deref().unwrap_or_default(),
        dives = log.dives().count(),
        "Decoded dive log"
    );

    Ok(log)
}

/// Write a dive log indented by [`DEFAULT_INDENT`] spaces
pub fn encode<W: Write>(log: &DiveLog, writer: W) -> Result<(), EncodeError> {
    encode_indented(log, writer, DEFAULT_INDENT)
}

pub fn encode_indented<W: Write>(
    log: &DiveLog,
    writer: W,
    indent: usize,
) -> Result<(), EncodeError> {
    let mut xml = quick_xml::Writer::new_with_indent(writer, b' ', indent);
    writer::write_divelog(&mut xml, log)?;

    let mut output = xml.into_inner();
    output.write_all(b"\n")?;
    output.flush()?;

    Ok(())
}
