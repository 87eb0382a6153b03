//! `hangout` CLI — compare weekly availability schedules from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Where do two schedules collide?
//! hangout conflicts -i ana.json -i ben.json
//!
//! # Free hours everyone shares on Saturday
//! hangout free --day saturday -i ana.json -i ben.json
//!
//! # Same, but count "Maybe Free" as available and take the first slot only
//! hangout free --day sat --maybe-is-free --first -i ana.json -i ben.json
//!
//! # Every day of the week, at least two hours
//! hangout week --min-duration 120 -i ana.json -i ben.json
//!
//! # Schedules can also arrive on stdin, one document or an array of them
//! cat everyone.json | hangout grid --day friday --from 17 --to 24
//!
//! # Merge overlapping same-status ranges and print the cleaned schedule
//! hangout merge -i ana.json --format json
//! ```

mod render;

use anyhow::{bail, Context, Result};
use chrono::Datelike;
use clap::{Parser, Subcommand, ValueEnum};
use hangout_engine::availability::availability_grid;
use hangout_engine::freebusy::{
    find_common_free_time_with, find_first_common_free_slot_with, find_weekly_common_free_time,
};
use hangout_engine::time::generate_time_slots;
use hangout_engine::{
    find_conflicts_on_days, find_schedule_conflicts, group_status_at, merge_schedule,
    schedule_stats, status_at, DayOfWeek, OccupancyPolicy, ScheduleRef, TimeOfDay,
};
use serde::Serialize;
use std::io::{self, Read};
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::render::Clock;

#[derive(Parser)]
#[command(
    name = "hangout",
    version,
    about = "Compare weekly availability schedules"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Schedule document file; repeat for several (reads stdin if omitted)
    #[arg(short, long = "input", global = true)]
    inputs: Vec<String>,

    /// Output file (writes to stdout if omitted)
    #[arg(short, long, global = true)]
    output: Option<String>,

    /// Output format
    #[arg(
        long,
        global = true,
        value_enum,
        env = "HANGOUT_FORMAT",
        default_value_t = Format::Text
    )]
    format: Format,

    /// Show times as "9:00 AM" instead of "09:00" in text output
    #[arg(long, global = true)]
    twelve_hour: bool,

    /// Log filter for diagnostics on stderr, e.g. "debug" or "hangout_engine=debug"
    #[arg(long, global = true, env = "HANGOUT_LOG", default_value = "warn")]
    log_level: String,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge overlapping same-status ranges on every day of each schedule
    Merge,
    /// List ranges from different schedules that overlap
    Conflicts {
        /// Only check these days (all seven if omitted)
        #[arg(long = "day")]
        days: Vec<DayOfWeek>,
    },
    /// Free time shared by every schedule on one day
    Free {
        /// Day to check (today if omitted)
        #[arg(long)]
        day: Option<DayOfWeek>,
        /// Shortest slot worth reporting, in minutes
        #[arg(long, env = "HANGOUT_MIN_DURATION", default_value_t = 60)]
        min_duration: u32,
        /// Only report the earliest slot
        #[arg(long)]
        first: bool,
        /// Treat "Maybe Free" ranges as available
        #[arg(long)]
        maybe_is_free: bool,
    },
    /// Free time shared by every schedule on each day of the week
    Week {
        /// Shortest slot worth reporting, in minutes
        #[arg(long, env = "HANGOUT_MIN_DURATION", default_value_t = 60)]
        min_duration: u32,
        /// Treat "Maybe Free" ranges as available
        #[arg(long)]
        maybe_is_free: bool,
    },
    /// Status at one moment: a single schedule's, or the group's for several
    Status {
        /// Day to check (today if omitted)
        #[arg(long)]
        day: Option<DayOfWeek>,
        /// Time of day, "HH:MM"
        #[arg(long)]
        at: TimeOfDay,
    },
    /// Group status at regular intervals through a day
    Grid {
        /// Day to check (today if omitted)
        #[arg(long)]
        day: Option<DayOfWeek>,
        /// Minutes between rows
        #[arg(long, default_value_t = 60)]
        interval: u32,
        /// First hour shown
        #[arg(long, default_value_t = 0)]
        from: u32,
        /// Hour the grid stops before
        #[arg(long, default_value_t = 24)]
        to: u32,
    },
    /// Status distribution and activity statistics for each schedule
    Stats,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    let refs = load_schedules(&cli.inputs)?;
    debug!(schedules = refs.len(), "loaded schedules");

    let clock = Clock::new(cli.twelve_hour);
    let json = cli.format == Format::Json;

    let out = match cli.command {
        Commands::Merge => {
            let merged: Vec<_> = refs.iter().map(|r| merge_schedule(&r.schedule)).collect();
            if json {
                one_or_many(&merged)?
            } else {
                merged
                    .iter()
                    .map(|s| render::schedule(s, clock))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
        Commands::Conflicts { days } => {
            let report = if days.is_empty() {
                find_schedule_conflicts(&refs)
            } else {
                find_conflicts_on_days(&refs, &days)
            };
            if json {
                to_json(&report)?
            } else {
                render::conflicts(&report, clock)
            }
        }
        Commands::Free {
            day,
            min_duration,
            first,
            maybe_is_free,
        } => {
            require_schedules(&refs)?;
            let day = day.unwrap_or_else(today);
            let occupancy = policy(maybe_is_free);
            let slots: Vec<_> = if first {
                find_first_common_free_slot_with(&refs, day, min_duration, occupancy)
                    .into_iter()
                    .collect()
            } else {
                find_common_free_time_with(&refs, day, min_duration, occupancy)
            };
            if json {
                to_json(&slots)?
            } else {
                render::free_slots(day, &slots, clock)
            }
        }
        Commands::Week {
            min_duration,
            maybe_is_free,
        } => {
            require_schedules(&refs)?;
            let week = find_weekly_common_free_time(&refs, min_duration, policy(maybe_is_free));
            if json {
                to_json(&week)?
            } else {
                render::week(&week, clock)
            }
        }
        Commands::Status { day, at } => {
            require_schedules(&refs)?;
            let day = day.unwrap_or_else(today);
            let report = StatusReport {
                day,
                at,
                group: group_status_at(&refs, day, at),
                schedules: refs
                    .iter()
                    .map(|r| ScheduleStatus {
                        name: render::label(r),
                        status: status_at(&r.schedule, day, at),
                    })
                    .collect(),
            };
            if json {
                to_json(&report)?
            } else {
                render::status(&report, clock)
            }
        }
        Commands::Grid {
            day,
            interval,
            from,
            to,
        } => {
            require_schedules(&refs)?;
            if interval == 0 {
                bail!("--interval must be at least 1 minute");
            }
            if from >= to || to > 24 {
                bail!(
                    "--from and --to must satisfy 0 <= from < to <= 24 (got {} and {})",
                    from,
                    to
                );
            }
            let day = day.unwrap_or_else(today);
            let cells = availability_grid(&refs, day, &generate_time_slots(from, to, interval));
            if json {
                to_json(&cells)?
            } else {
                render::grid(day, &cells, refs.len(), clock)
            }
        }
        Commands::Stats => {
            let stats: Vec<_> = refs.iter().map(|r| schedule_stats(&r.schedule)).collect();
            if json {
                one_or_many(&stats)?
            } else {
                refs.iter()
                    .zip(&stats)
                    .map(|(r, s)| render::stats(&render::label(r), s, clock))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
    };

    write_output(cli.output.as_deref(), &out)
}

/// Point-in-time status of each schedule and of the group.
#[derive(Serialize)]
struct StatusReport {
    day: DayOfWeek,
    at: TimeOfDay,
    group: hangout_engine::GroupStatus,
    schedules: Vec<ScheduleStatus>,
}

#[derive(Serialize)]
struct ScheduleStatus {
    name: String,
    status: hangout_engine::Status,
}

fn init_tracing(filter: &str) -> Result<()> {
    let filter =
        EnvFilter::try_new(filter).with_context(|| format!("Invalid log filter: {}", filter))?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn today() -> DayOfWeek {
    chrono::Local::now().weekday().into()
}

fn policy(maybe_is_free: bool) -> OccupancyPolicy {
    if maybe_is_free {
        OccupancyPolicy::NotFreeOnly
    } else {
        OccupancyPolicy::NotFreeAndMaybe
    }
}

fn require_schedules(refs: &[ScheduleRef]) -> Result<()> {
    if refs.is_empty() {
        bail!("No schedules given. Pass documents with -i or pipe them on stdin.");
    }
    Ok(())
}

/// Read every input (or stdin) and parse the schedule documents it holds.
fn load_schedules(inputs: &[String]) -> Result<Vec<ScheduleRef>> {
    let mut refs = Vec::new();
    if inputs.is_empty() {
        refs.extend(parse_documents(&read_input(None)?, "stdin")?);
    } else {
        for path in inputs {
            refs.extend(parse_documents(&read_input(Some(path))?, path)?);
        }
    }
    Ok(refs)
}

/// A source holds either one schedule document or an array of them.
fn parse_documents(text: &str, source: &str) -> Result<Vec<ScheduleRef>> {
    let value: serde_json::Value =
        serde_json::from_str(text).with_context(|| format!("{} is not valid JSON", source))?;

    let documents = match value {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(_) => vec![value],
        _ => bail!(
            "{} must hold a schedule document or an array of them",
            source
        ),
    };

    documents
        .into_iter()
        .enumerate()
        .map(|(i, doc)| {
            serde_json::from_value::<ScheduleRef>(doc)
                .with_context(|| format!("Invalid schedule document #{} in {}", i + 1, source))
        })
        .collect()
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    text.push('\n');
    Ok(text)
}

/// A lone schedule is printed as itself rather than a one-element array.
fn one_or_many<T: Serialize>(items: &[T]) -> Result<String> {
    match items {
        [only] => to_json(only),
        _ => to_json(items),
    }
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
