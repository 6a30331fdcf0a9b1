use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod arguments;
mod commands;
mod errors;
mod helpers;
mod types;

use arguments::{Cli, Commands};

fn setup_logging(verbose: u8) -> Result<()> {
    let log_level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    // Logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .with(
            Targets::default()
                .with_target("subsurface_toolbox", log_level)
                .with_target("subsurface_toolbox_core", log_level),
        )
        .try_init()?;

    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();
    setup_logging(args.verbose)?;

    match &args.command {
        Commands::Timeshift(options) => {
            commands::timeshift::timeshift(options, &args.config()?.timeshift)?
        }
        Commands::Offset(options) => commands::offset::offset(options)?,
    }

    Ok(())
}
