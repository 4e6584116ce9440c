//! # Attendance Inspector
//!
//! Developer tool for checking how an event window is bucketed and how an
//! attendance array reads back as English, without going through the web UI.
//!
//! ```text
//! attendance --begin 2024-03-01T18:00 --end 2024-03-03T12:00 --attendance 1,0,0,0,1,0,0,1
//! attendance --begin 2024-03-01T18:00 --end 2024-03-03T12:00 --json
//! ```


use anyhow::{anyhow, bail, Context};
use attendance_lib::{
    config::{Config, CONFIG_FILE},
    default_attendance, describe_attendance, parse, AttendanceArray, Bucket, Interval,
};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::env;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Command line options.
#[derive(Debug, Default, PartialEq)]
pub struct Args {
    pub begin: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub attendance: Option<AttendanceArray>,
    pub config: Option<String>,
    pub json: bool,
}

impl Args {
    /// Parse arguments, excluding the program name.
    pub fn parse<I: IntoIterator<Item = String>>(args: I) -> anyhow::Result<Self> {
        let mut parsed = Args::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            let mut value = || {
                args.next()
                    .ok_or_else(|| anyhow!("missing value for {arg}"))
            };
            match arg.as_str() {
                "--begin" => parsed.begin = Some(parse::parse_timestamp(&value()?)?),
                "--end" => parsed.end = Some(parse::parse_timestamp(&value()?)?),
                "--attendance" => parsed.attendance = Some(parse::parse_attendance(&value()?)?),
                "--config" => parsed.config = Some(value()?),
                "--json" => parsed.json = true,
                other => bail!("unknown argument: {other}"),
            }
        }

        Ok(parsed)
    }
}

/// Everything the inspector prints for one event.
#[derive(Debug, Serialize)]
pub struct Report {
    pub buckets: Vec<Bucket>,
    pub attendance: AttendanceArray,
    pub description: String,
}

/// Validate the event window and build the report.
pub fn build_report(args: &Args, config: &Config) -> anyhow::Result<Report> {
    let begin = args.begin.context("--begin is required")?;
    let end = args.end.context("--end is required")?;
    let interval = Interval::new(begin, end, config.event.max_duration_days)
        .context("invalid event window")?;

    let buckets = interval.buckets();
    let attendance = args
        .attendance
        .clone()
        .unwrap_or_else(|| default_attendance(begin, end));
    if attendance.len() != buckets.len() {
        tracing::warn!(
            attendance = attendance.len(),
            buckets = buckets.len(),
            "attendance length does not match the event's buckets"
        );
    }
    let description = describe_attendance(Some(attendance.as_slice()), begin, end);

    Ok(Report {
        buckets,
        attendance,
        description,
    })
}

fn print_text(report: &Report) {
    for (index, bucket) in report.buckets.iter().enumerate() {
        let mark = if report.attendance.get(index) == Some(&1) {
            'x'
        } else {
            ' '
        };
        println!(
            "[{mark}] {index:>2}  slot {:>2}  {:<9} {}",
            bucket.slot(),
            bucket.day_name,
            bucket.period
        );
    }
    println!();
    println!("{}", report.description);
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    let args = Args::parse(env::args().skip(1))?;

    let config_path = Path::new(args.config.as_deref().unwrap_or(CONFIG_FILE));
    let (config, source) = Config::read_from_path(config_path);

    // Logs go to stderr so --json output stays machine-readable
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Reported only now that a subscriber is installed
    source.log(config_path);

    let report = build_report(&args, &config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text(&report);
    }

    Ok(())
}
