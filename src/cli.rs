//! Command line configuration

use std::{
    io,
    path::{Path, PathBuf},
    time::Instant,
};

use clap::{Args, Parser, ValueEnum};
use humanize_duration::{Truncate, prelude::DurationExt};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::{
    EnvFilter,
    util::{SubscriberInitExt, TryInitError},
};

use knapsack::{
    catalog::{self, CatalogError},
    items::{BoundedItem, KnapsackItem, UnboundedItem},
    knapsack::{Knapsack, KnapsackError},
    report::{Report, ReportError},
    solvers::{
        Solver, SolverError, Strategy, brute_force::BruteForceSolver, dynamic::DynamicSolver,
    },
};

/// Errors reported by the command line.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// The item catalog path does not exist.
    #[error("file does not exist: {}", .0.display())]
    MissingCatalog(PathBuf),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Knapsack(#[from] KnapsackError),

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Kind of knapsack described by the item catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum KnapsackKind {
    /// Items carry a number of available pieces (default 1).
    Bounded,

    /// Items may be taken any number of times.
    Unbounded,
}

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub(crate) struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub(crate) log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub(crate) log_format: LogFormat,
}

impl LoggingConfig {
    /// Install the global tracing subscriber. Logs go to stderr so the report
    /// on stdout stays clean.
    pub(crate) fn init(&self) -> Result<(), TryInitError> {
        let filter =
            EnvFilter::try_new(&self.log_level).unwrap_or_else(|_err| EnvFilter::new("info"));

        match self.log_format {
            LogFormat::Compact => tracing_subscriber::fmt()
                .compact()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .with_target(true)
                .finish()
                .try_init(),
            LogFormat::Json => tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .with_current_span(true)
                .with_span_list(true)
                .finish()
                .try_init(),
        }
    }
}

/// Knapsack solver
#[derive(Debug, Parser)]
#[command(name = "knapsack", about = "Exact knapsack solver", long_about = None)]
pub(crate) struct Cli {
    /// YAML file with an array of items
    #[arg(short, long, env = "KNAPSACK_ITEMS")]
    pub(crate) items: PathBuf,

    /// Knapsack capacity
    #[arg(short, long, env = "KNAPSACK_CAPACITY", allow_negative_numbers = true)]
    pub(crate) capacity: i64,

    /// Knapsack type
    #[arg(short, long, value_enum, default_value_t = KnapsackKind::Bounded)]
    pub(crate) knapsack: KnapsackKind,

    /// Solving strategy
    #[arg(short, long, value_enum, default_value_t = Strategy::Dynamic)]
    pub(crate) strategy: Strategy,

    /// Logging output settings.
    #[command(flatten)]
    pub(crate) logging: LoggingConfig,
}

impl Cli {
    /// Solve the configured knapsack and write the report to stdout.
    pub(crate) fn run(&self) -> Result<(), CliError> {
        let stdout = io::stdout();

        match self.knapsack {
            KnapsackKind::Bounded => self.solve::<BoundedItem>(stdout.lock()),
            KnapsackKind::Unbounded => self.solve::<UnboundedItem>(stdout.lock()),
        }
    }

    fn solve<I>(&self, out: impl io::Write) -> Result<(), CliError>
    where
        I: KnapsackItem + DeserializeOwned,
        BruteForceSolver: Solver<I>,
        DynamicSolver: Solver<I>,
    {
        let items: Vec<I> = load_catalog(&self.items)?;
        let knapsack = Knapsack::new(self.capacity, items)?;

        let start = Instant::now();
        let solution = knapsack.pack_with(self.strategy)?;
        let elapsed = start.elapsed();

        info!(
            strategy = %self.strategy,
            kind = ?self.knapsack,
            value = solution.value(),
            weight = solution.weight(),
            elapsed = %elapsed.human(Truncate::Micro),
            "solved knapsack"
        );

        Report::new(&knapsack, &solution)?.write_to(out)?;

        Ok(())
    }
}

fn load_catalog<I: DeserializeOwned>(path: &Path) -> Result<Vec<I>, CliError> {
    if !path.exists() {
        return Err(CliError::MissingCatalog(path.to_path_buf()));
    }

    Ok(catalog::load(path)?)
}
