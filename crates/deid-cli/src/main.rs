//! deid CLI - generalize raw attendance extracts and synthesize data.
//!
//! # Commands
//!
//! - `deid run` - run the de-identification pipeline over a raw table
//! - `deid synth-pair` - draw correlated integer pairs
//! - `deid mock` - generate a mock raw table from a reference table
//! - `deid schema` - describe a table for a synthetic-data engine
//! - `deid synthesize` - regenerate a table with the independent engine
//!
//! # Examples
//!
//! ```bash
//! deid run --input raw.csv --reference postcodes.csv --output deidentified.csv --seed 42
//! deid synth-pair --output pairs.csv --rows 100000 --rho 0.95
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use deid_core::config::{CliOverrides, JoinMissPolicy};
use deid_core::tracing::init_tracing;
use deid_core::DeidConfig;

mod commands;
mod error;

/// Record generalization, pseudonymization and synthetic data
#[derive(Parser)]
#[command(name = "deid")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Seed for every random draw
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log level when DEID_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the de-identification pipeline
    Run {
        /// Raw event table (CSV)
        #[arg(short, long)]
        input: PathBuf,

        /// Reference lookup table (CSV)
        #[arg(short, long)]
        reference: PathBuf,

        /// Where to write the generalized table (CSV)
        #[arg(short, long)]
        output: PathBuf,

        /// Join-miss policy: drop, fail or impute
        #[arg(long, value_parser = parse_join_miss)]
        join_miss: Option<JoinMissPolicy>,

        /// Keep each row with this probability, in (0, 1]
        #[arg(long)]
        sample: Option<f64>,

        /// Write the run report as JSON
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Draw correlated integer pairs
    SynthPair {
        #[arg(short, long)]
        output: PathBuf,

        #[arg(long)]
        rows: Option<usize>,

        #[arg(long)]
        rho: Option<f64>,

        /// Column names of the two attributes
        #[arg(long, num_args = 2, default_values_t = ["Age".to_string(), "Time in A&E (mins)".to_string()])]
        names: Vec<String>,
    },

    /// Generate a mock raw table
    Mock {
        /// Reference lookup table (CSV) to draw postcodes from
        #[arg(short, long)]
        reference: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        #[arg(long)]
        rows: Option<usize>,

        /// Draw age and time in A&E jointly
        #[arg(long)]
        correlated: bool,
    },

    /// Describe a table for a synthetic-data engine
    Schema {
        #[arg(short, long)]
        input: PathBuf,

        /// Write the schema here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Distinct-value limit for categorical columns
        #[arg(long)]
        threshold: Option<usize>,
    },

    /// Regenerate a table with the independent-attribute engine
    Synthesize {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        /// Rows to generate (default: as many as the input)
        #[arg(long)]
        rows: Option<usize>,

        /// Write the engine's description as JSON
        #[arg(long)]
        description: Option<PathBuf>,

        #[arg(long)]
        threshold: Option<usize>,
    },
}

fn parse_join_miss(value: &str) -> Result<JoinMissPolicy, String> {
    JoinMissPolicy::from_name(value).ok_or_else(|| format!("`{value}` is not one of drop, fail, impute"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let sample_fraction = match &cli.command {
        Commands::Run { sample, .. } => *sample,
        _ => None,
    };
    let join_miss = match &cli.command {
        Commands::Run { join_miss, .. } => *join_miss,
        _ => None,
    };
    let overrides = CliOverrides {
        seed: cli.seed,
        join_miss,
        sample_fraction,
        log_level: cli.log_level.clone(),
        json_logs: cli.json_logs.then_some(true),
    };

    let config = match DeidConfig::load(cli.config.as_deref(), Some(&overrides)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", error::coded(&anyhow::Error::from(e)));
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.observability);

    let result = match cli.command {
        Commands::Run {
            input,
            reference,
            output,
            report,
            ..
        } => commands::run::execute(&config, &input, &reference, &output, report.as_deref()),

        Commands::SynthPair {
            output,
            rows,
            rho,
            names,
        } => commands::synth_pair::execute(&config, &output, rows, rho, &names),

        Commands::Mock {
            reference,
            output,
            rows,
            correlated,
        } => commands::mock::execute(&config, &reference, &output, rows, correlated),

        Commands::Schema {
            input,
            output,
            threshold,
        } => commands::schema::execute(&config, &input, output.as_deref(), threshold),

        Commands::Synthesize {
            input,
            output,
            rows,
            description,
            threshold,
        } => commands::synthesize::execute(
            &config,
            &input,
            &output,
            rows,
            description.as_deref(),
            threshold,
        ),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", error::coded(&e));
            ExitCode::FAILURE
        }
    }
}
