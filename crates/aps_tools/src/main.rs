//! APS shell workbench command line.
//!
//! # Usage
//!
//! ```bash
//! # Best shells for a 2 m loader, up to 6 modules
//! cargo run -p aps_tools -- optimize --loader-length 2 --max-modules 6
//!
//! # Same, from a job file, as a forum table
//! cargo run -p aps_tools -- optimize --job jobs/railgun.ron --format bbcode
//!
//! # Every computed field of one shell
//! cargo run -p aps_tools -- evaluate --shell HE,HE,bleeder,gunpowder --diameter 0.5
//!
//! # Compare the formulas with in-game measurements
//! cargo run -p aps_tools -- verify --tolerance 2
//! ```
//!
//! Results go to stdout, logs to stderr. `RUST_LOG` refines the log filter.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use aps_core::blueprint::Blueprint;
use aps_core::cannon::evaluate;
use aps_core::context::CannonContext;
use aps_core::reference::DEFAULT_TOLERANCE_PCT;
use aps_tools::job::{load_ron, resolve_job, JobOverrides};
use aps_tools::report::{self, ReportFormat, DEFAULT_BBCODE_COLUMNS, DEFAULT_COLUMNS};
use aps_tools::verify;

#[derive(Parser)]
#[command(name = "aps-tools")]
#[command(about = "Shell calculator and optimizer for advanced cannons")]
#[command(version)]
struct Cli {
    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for the highest-scoring shells
    Optimize {
        /// RON job file; flags override its values
        #[arg(short, long)]
        job: Option<PathBuf>,

        /// Loader length in metres
        #[arg(short, long)]
        loader_length: Option<f64>,

        /// Longest shell to try, in modules
        #[arg(short, long)]
        max_modules: Option<u32>,

        /// Number of shells to keep
        #[arg(short, long)]
        results: Option<usize>,

        /// Fixed diameter in metres instead of filling the loader
        #[arg(short, long)]
        diameter: Option<f64>,

        /// Reject shells slower than this
        #[arg(long)]
        min_velocity: Option<f64>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Table)]
        format: ReportFormat,
    },

    /// Print every computed field of one shell
    Evaluate {
        /// Comma-separated parts, front to back
        #[arg(short, long)]
        shell: Blueprint,

        /// Diameter in metres
        #[arg(short, long)]
        diameter: f64,

        /// RON cannon context file
        #[arg(short, long)]
        context: Option<PathBuf>,
    },

    /// Compare computed values with in-game measurements
    Verify {
        /// Allowed relative difference in percent
        #[arg(short, long, default_value_t = DEFAULT_TOLERANCE_PCT)]
        tolerance: f64,

        /// Exit with an error when any shell differs
        #[arg(long)]
        strict: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the report
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let outcome = match cli.command {
        Commands::Optimize {
            job,
            loader_length,
            max_modules,
            results,
            diameter,
            min_velocity,
            format,
        } => {
            let overrides = JobOverrides {
                loader_length,
                max_modules,
                max_results: results,
                diameter,
                min_velocity,
            };
            cmd_optimize(job, &overrides, format)
        }
        Commands::Evaluate {
            shell,
            diameter,
            context,
        } => cmd_evaluate(&shell, diameter, context),
        Commands::Verify { tolerance, strict } => cmd_verify(tolerance, strict),
    };

    if let Err(e) = outcome {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

/// Run a search and print the report
fn cmd_optimize(
    job_path: Option<PathBuf>,
    overrides: &JobOverrides,
    format: ReportFormat,
) -> aps_tools::Result<()> {
    let job = resolve_job(job_path.as_deref(), overrides)?;
    let outcome = job.run()?;
    tracing::info!(
        generated = outcome.generated,
        accepted = outcome.accepted,
        "Search complete"
    );

    // Best first
    let rows: Vec<_> = outcome.shells.iter().rev().map(|s| s.item.clone()).collect();
    let columns: Vec<String> = if job.columns.is_empty() {
        let defaults: &[&str] = match format {
            ReportFormat::Bbcode => &DEFAULT_BBCODE_COLUMNS,
            _ => &DEFAULT_COLUMNS,
        };
        defaults.iter().map(ToString::to_string).collect()
    } else {
        job.columns.clone()
    };

    let rendered = match format {
        ReportFormat::Table => report::text_table(rows.as_slice(), columns.as_slice())?,
        ReportFormat::Html => report::html_table(rows.as_slice(), columns.as_slice())?,
        ReportFormat::Bbcode => report::bbcode_table(rows.as_slice(), columns.as_slice())?,
        ReportFormat::Json => serde_json::to_string_pretty(&outcome)?,
    };
    println!("{rendered}");
    Ok(())
}

/// Evaluate one shell and list its fields
fn cmd_evaluate(
    shell: &Blueprint,
    diameter: f64,
    context_path: Option<PathBuf>,
) -> aps_tools::Result<()> {
    let context = match context_path {
        Some(path) => load_ron(path)?,
        None => CannonContext::default(),
    };
    let config = evaluate(shell, diameter, &context)?;
    println!("{}", report::field_listing(&config));
    Ok(())
}

/// Check the formulas against the shipped measurements
fn cmd_verify(tolerance: f64, strict: bool) -> aps_tools::Result<()> {
    let shells = verify::reference_shells()?;
    let outcome = verify::run(&shells, tolerance)?;
    print!("{}", outcome.render());
    if strict && !outcome.all_passed() {
        tracing::error!("Reference shells differ beyond {tolerance}%");
        std::process::exit(1);
    }
    Ok(())
}
