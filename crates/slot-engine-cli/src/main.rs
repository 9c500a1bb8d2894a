mod input;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use slot_engine::{AvailabilityQuery, CandidateSlot, HoursPreset};
use tracing_subscriber::EnvFilter;

/// Query appointment availability and reserve slots for a business.
#[derive(Parser, Debug)]
#[command(name = "slots", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List bookable start times for a service on a date
    Available {
        /// Business JSON file
        #[arg(short, long)]
        business: PathBuf,

        /// Existing appointments JSON file (array)
        #[arg(long)]
        bookings: Option<PathBuf>,

        /// Date to query (YYYY-MM-DD)
        #[arg(short, long)]
        date: NaiveDate,

        /// Service name
        #[arg(short, long)]
        service: String,

        /// Current instant (RFC 3339); defaults to the system clock
        #[arg(long, value_parser = parse_rfc3339)]
        now: Option<DateTime<Utc>>,
    },

    /// Check a booking request and print the appointment record to store
    Book {
        /// Business JSON file
        #[arg(short, long)]
        business: PathBuf,

        /// Existing appointments JSON file (array)
        #[arg(long)]
        bookings: Option<PathBuf>,

        /// Booking request JSON file
        #[arg(short, long)]
        request: PathBuf,

        /// Current instant (RFC 3339); defaults to the system clock
        #[arg(long, value_parser = parse_rfc3339)]
        now: Option<DateTime<Utc>>,
    },

    /// Print the weekly hours for a preset
    Hours {
        /// One of: default, standard, retail, salon
        #[arg(short, long, default_value = "default")]
        preset: HoursPreset,
    },
}

#[derive(Serialize)]
struct AvailableOutput<'a> {
    business: &'a str,
    date: NaiveDate,
    service: &'a str,
    available: bool,
    slots: Vec<CandidateSlot>,
}

fn main() -> std::process::ExitCode {
    init_tracing();

    match run() {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Available {
            business,
            bookings,
            date,
            service,
            now,
        } => {
            let business = input::load_business(&business)?;
            let bookings = input::load_bookings(bookings.as_deref(), &business, date)?;
            let now = now.unwrap_or_else(Utc::now);

            let availability = AvailabilityQuery::new(&business, date, &service)
                .run(&bookings, now)
                .context("availability query failed")?;
            let output = AvailableOutput {
                business: &business.id,
                date,
                service: &service,
                available: availability.is_available(),
                slots: availability.into_slots(),
            };
            print_json(&output)
        }
        Commands::Book {
            business,
            bookings,
            request,
            now,
        } => {
            let business = input::load_business(&business)?;
            let request = input::load_request(&request)?;
            let bookings = input::load_bookings(bookings.as_deref(), &business, request.date)?;
            let now = now.unwrap_or_else(Utc::now);

            let appointment = business.reserve(&request, &bookings, now)?;
            eprintln!("{}", appointment.confirmation_message(&business.name));
            print_json(&appointment)
        }
        Commands::Hours { preset } => print_json(&preset.hours()),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{json}");
    Ok(())
}

fn parse_rfc3339(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("'{s}': {e}"))
}

/// Logs go to stderr so stdout stays machine-readable JSON.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("SLOTS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

