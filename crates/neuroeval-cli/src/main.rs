//! neuroeval CLI: fuzzy student performance evaluation from the command line.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

#[derive(Parser)]
#[command(
    name = "neuroeval",
    version,
    about = "Fuzzy-logic student performance evaluator"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a single student
    Evaluate {
        /// Attendance percentage
        #[arg(long, allow_hyphen_values = true)]
        attendance: f64,

        /// Assignment score
        #[arg(long, allow_hyphen_values = true)]
        assignment: f64,

        /// Exam score
        #[arg(long, allow_hyphen_values = true)]
        exam: f64,

        /// Participation percentage
        #[arg(long, allow_hyphen_values = true)]
        participation: f64,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Record the evaluation in this history file (JSON)
        #[arg(long)]
        history: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Evaluate a cohort file or directory
    Batch {
        /// Path to .toml cohort file or directory
        #[arg(long)]
        cohort: PathBuf,

        /// Output directory (defaults to the configured output_dir)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: json, html, markdown, all
        #[arg(long)]
        format: Option<String>,

        /// Only evaluate students with one of these tags (comma-separated)
        #[arg(long)]
        filter: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Compare two cohort reports
    Compare {
        /// Baseline report JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Current report JSON
        #[arg(long)]
        current: PathBuf,

        /// Score points a student must move to count (defaults to the configured threshold)
        #[arg(long)]
        threshold: Option<f64>,

        /// Exit code 1 if regressions found
        #[arg(long)]
        fail_on_regression: bool,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate cohort TOML files
    Validate {
        /// Path to cohort file or directory
        #[arg(long)]
        cohort: PathBuf,
    },

    /// Print the sampled membership curves of a variable
    Curves {
        /// Variable name: attendance, assignment, exam, participation, performance
        #[arg(long)]
        variable: String,

        /// Sampling step
        #[arg(long, default_value = "10")]
        step: f64,
    },

    /// Create starter config and example cohort
    Init,
}

fn main() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("neuroeval=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Evaluate {
            attendance,
            assignment,
            exam,
            participation,
            format,
            history,
            config,
        } => commands::evaluate::execute(
            [attendance, assignment, exam, participation],
            format,
            history,
            config,
        ),
        Commands::Batch {
            cohort,
            output,
            format,
            filter,
            config,
        } => commands::batch::execute(cohort, output, format, filter, config),
        Commands::Compare {
            baseline,
            current,
            threshold,
            fail_on_regression,
            format,
            config,
        } => commands::compare::execute(
            baseline,
            current,
            threshold,
            fail_on_regression,
            format,
            config,
        ),
        Commands::Validate { cohort } => commands::validate::execute(cohort),
        Commands::Curves { variable, step } => commands::curves::execute(variable, step),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
