//! Command-line front end: reads an instance, searches, prints the schedule.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use u_tardiness::dispatching::Priority;
use u_tardiness::io::{format_json, read_instance, write_plain};
use u_tardiness::models::{Instance, Schedule, Time};
use u_tardiness::scheduler::ScheduleKpi;
use u_tardiness::search::{solve, SearchConfig, SearchStats, SearchStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Per-processor task counts followed by `task,start` lines
    Plain,
    /// Pretty-printed JSON report
    Json,
}

/// Minimizes total tardiness of precedence-constrained tasks on identical
/// processors. Always prints a complete schedule, even on timeout.
#[derive(Parser, Debug)]
#[command(name = "u-tardiness", author, version, about, long_about = None)]
struct Args {
    /// Wall-clock budget in seconds (fractions allowed)
    #[arg(env = "U_TARDINESS_BUDGET", value_parser = parse_budget)]
    budget: Duration,
    /// Instance file; standard input when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Plain)]
    format: OutputFormat,
    /// Disable the predecessor lookahead check
    #[arg(long)]
    no_lookahead: bool,
    /// Try candidates in stored order instead of topological layers
    #[arg(long)]
    no_layering: bool,
    /// Keep processor order instead of sorting by end time
    #[arg(long)]
    no_processor_sort: bool,
    /// Urgency rule after the topological layer: edd, slack, atc, spt, lpt
    #[arg(short, long, default_value_t = Priority::Edd)]
    priority: Priority,
}

impl Args {
    fn config(&self) -> SearchConfig {
        SearchConfig::default()
            .with_time_budget(self.budget)
            .with_lookahead(!self.no_lookahead)
            .with_layering(!self.no_layering)
            .with_processor_sort(!self.no_processor_sort)
            .with_priority(self.priority)
    }
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    cost: Time,
    baseline_cost: Time,
    status: SearchStatus,
    stats: SearchStats,
    elapsed_ms: u64,
    kpi: ScheduleKpi,
    schedule: &'a Schedule,
}

fn parse_budget(value: &str) -> Result<Duration, String> {
    let seconds: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("`{value}` is not a number of seconds"))?;
    Duration::try_from_secs_f64(seconds).map_err(|e| format!("invalid budget `{value}`: {e}"))
}

fn load(args: &Args) -> u_tardiness::Result<Instance> {
    match &args.input {
        Some(path) => read_instance(BufReader::new(File::open(path)?)),
        None => read_instance(io::stdin().lock()),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = args.config();

    let instance = match load(&args) {
        Ok(instance) => instance,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    info!(
        tasks = instance.task_count(),
        processors = instance.processors,
        budget_ms = config.time_budget.as_millis() as u64,
        "instance loaded"
    );

    let outcome = solve(&instance, config);
    let kpi = ScheduleKpi::calculate(&outcome.schedule, &instance.graph);
    info!(
        makespan = kpi.makespan,
        tardy_tasks = kpi.tardy_tasks,
        max_tardiness = kpi.max_tardiness,
        "schedule ready"
    );

    let written = match args.format {
        OutputFormat::Plain => write_plain(&outcome.schedule, io::stdout().lock()),
        OutputFormat::Json => {
            let report = Report {
                cost: outcome.cost,
                baseline_cost: outcome.baseline_cost,
                status: outcome.status,
                stats: outcome.stats,
                elapsed_ms: outcome.elapsed.as_millis() as u64,
                kpi,
                schedule: &outcome.schedule,
            };
            format_json(&report)
                .map_err(io::Error::from)
                .map(|json| println!("{json}"))
        }
    };

    if let Err(e) = written {
        eprintln!("error: failed to write schedule: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
