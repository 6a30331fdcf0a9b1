use crate::errors::ConfigError;
use crate::types::Config;
use chrono::{Duration, NaiveDateTime};
use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};
use std::path::PathBuf;
use subsurface_toolbox_core::parse_duration;
use subsurface_toolbox_core::subsurface::timestamp::parse_compact;

#[derive(Parser, Debug)]
#[command(author, version, about, name = "Subsurface Toolbox")]
pub struct Cli {
    /// Verbose mode (-v, -vv, -vvv, etc.)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    /// Path to the configuration file
    #[arg(short, long, value_hint = ValueHint::FilePath, global = true)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Move the date and time of every dive in a Subsurface XML log
    Timeshift(TimeshiftOptions),
    /// Print the shift between two timestamps (YYYY-MM-DD-HH:MM:SS)
    Offset(OffsetOptions),
}

#[derive(Args, Debug, Clone)]
pub struct TimeshiftOptions {
    /// Shift to apply, e.g. 2h30m or -1h
    #[arg(short, long, value_parser = parse_duration, allow_hyphen_values = true)]
    pub duration: Option<Duration>,
    /// Shift the timestamps recorded by the dive computers as well
    #[arg(long)]
    pub dive_computers: bool,
    /// Subsurface XML file to read, defaults to standard input
    #[arg(value_hint = ValueHint::FilePath)]
    pub input: Option<PathBuf>,
    /// File to write the shifted log to, defaults to standard output
    #[arg(value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct OffsetOptions {
    /// Time the dive computer was set to
    #[arg(value_parser = parse_compact)]
    pub from: NaiveDateTime,
    /// Actual local time
    #[arg(value_parser = parse_compact)]
    pub to: NaiveDateTime,
}

impl Cli {
    pub fn config(&self) -> Result<Config, ConfigError> {
        Config::load(self.config.as_deref())
    }
}
