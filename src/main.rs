//! Beat Clock - command line entry point
//!
//! Prints the clock for now, for a given calendar date, or continuously.

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use beat_clock::clock::{convert_gregorian_reading, read_now, ClockReading, LunarCache};
use beat_clock::core::error::Result;
use beat_clock::core::types::truncate_to_millis;
use beat_clock::core::ClockConfig;
use beat_clock::ephemeris::SunCalc;
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

/// Holocene year, lunation, day since equinox, beat and solar phase
#[derive(Parser, Debug)]
#[command(name = "beat-clock")]
#[command(about = "Print the Holocene/lunar/beat clock")]
struct Args {
    /// TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Observer latitude in decimal degrees (north positive)
    #[arg(long, global = true, allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Observer longitude in decimal degrees (east positive)
    #[arg(long, global = true, allow_negative_numbers = true)]
    lon: Option<f64>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the clock for the current time (default)
    Now,
    /// Print the clock for a calendar date, e.g. 2025-03-21T00:00:00Z
    Convert { date: String },
    /// Redraw the clock every refresh interval
    Watch {
        /// Stop after this many readings
        #[arg(long)]
        ticks: Option<u64>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ClockConfig::load(path)?,
        None => ClockConfig::new(),
    }
    .with_env_overrides()?
    .with_overrides(args.lat, args.lon)?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let position = config.position();
    if position.is_none() {
        tracing::info!("No position configured, solar phase will read S??");
    }

    match args.command.unwrap_or(Command::Now) {
        Command::Now => print_reading(&read_now(position, &SunCalc), args.format)?,
        Command::Convert { date } => {
            let reading =
                convert_gregorian_reading(&date, config.latitude, config.longitude, &SunCalc);
            match reading {
                Some(reading) => print_reading(&reading, args.format)?,
                None => std::process::exit(1),
            }
        }
        Command::Watch { ticks } => {
            let interval = Duration::from_millis(config.refresh_interval_ms);
            let mut cache = LunarCache::new();
            let mut count = 0u64;

            tracing::info!(interval_ms = config.refresh_interval_ms, ?ticks, "Watching clock");
            while ticks.map_or(true, |limit| count < limit) {
                let now = truncate_to_millis(Utc::now());
                print_reading(&cache.read(now, position, &SunCalc), args.format)?;
                count += 1;
                if ticks.map_or(true, |limit| count < limit) {
                    std::thread::sleep(interval);
                }
            }
        }
    }

    Ok(())
}

fn print_reading(reading: &ClockReading, format: OutputFormat) -> Result<()> {
    let mut stdout = io::stdout().lock();
    match format {
        OutputFormat::Text => writeln!(stdout, "{}", reading)?,
        OutputFormat::Json => writeln!(stdout, "{}", serde_json::to_string(reading)?)?,
    }
    stdout.flush()?;
    Ok(())
}
