use crate::arguments::TimeshiftOptions;
use crate::errors::PathError;
use crate::helpers::fs::{create_output, open_input};
use crate::types::TimeshiftConfig;
use anyhow::{Context, Result};
use chrono::Duration;
use std::io::{BufRead, Write};
use subsurface_toolbox_core::{ShiftReport, TimeShift, decode, encode_indented, format_duration};

/// Command line flags win over the configuration file
fn resolve(options: &TimeshiftOptions, config: &TimeshiftConfig) -> Result<TimeShift> {
    let duration = match options.duration {
        Some(duration) => duration,
        None => config.duration()?.unwrap_or_else(Duration::zero),
    };

    let dive_computers = options.dive_computers || config.dive_computers;
    Ok(TimeShift::new(duration).with_dive_computers(dive_computers))
}

/// Decode, shift and encode a dive log
///
/// `output` is only opened once the input has been fully decoded.
fn run<R, W, F>(shift: &TimeShift, input: R, output: F, indent: usize) -> Result<ShiftReport>
where
    R: BufRead,
    W: Write,
    F: FnOnce() -> Result<W, PathError>,
{
    let mut log = decode(input)?;
    let report = shift.apply(&mut log);
    encode_indented(&log, output()?, indent)?;

    Ok(report)
}

pub(crate) fn timeshift(options: &TimeshiftOptions, config: &TimeshiftConfig) -> Result<()> {
    let shift = resolve(options, config)?;
    let input_name = options
        .input
        .as_ref()
        .map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string());

    // Input and output may be the same file
    let input = open_input(options.input.as_deref())?;
    let report = run(
        &shift,
        input,
        || create_output(options.output.as_deref()),
        config.indent,
    )
    .with_context(|| format!("Failed to shift dive log {input_name}"))?;

    tracing::info!(
        input = input_name.as_str(),
        shifted = report.shifted,
        skipped = report.skipped,
        "Shifted dives by {}",
        format_duration(&shift.duration())?
    );
    if report.skipped > 0 {
        tracing::warn!(
            "{} dive(s) had no valid date and time and were left unchanged",
            report.skipped
        );
    }

    Ok(())
}
