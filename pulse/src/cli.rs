// pulse/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pulse")]
#[command(about = "Field-level validation & cleaning policies for retail data feeds", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🔎 Validates one dataset file and writes its issue log
    Validate {
        /// Dataset kind: sales | inventory | products
        #[arg(long, short)]
        kind: String,

        /// Input file (.csv, .json, .jsonl)
        #[arg(long, short)]
        input: PathBuf,

        /// Output directory for issues.* and validation_report.json
        #[arg(long, short, default_value = "target")]
        output: PathBuf,

        /// Issue log format: json | csv | both
        #[arg(long, default_value = "both")]
        format: String,

        /// Number of parallel validation workers
        #[arg(long, env = "PULSE_WORKERS")]
        workers: Option<usize>,

        /// Rows per validation chunk
        #[arg(long)]
        chunk_size: Option<usize>,

        /// Project directory (optional pulse.yaml for policies and settings)
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Exit with error if any issue is found
        #[arg(long)]
        fail_on_issues: bool,
    },

    /// 🚀 Validates every dataset declared in pulse.yaml
    Run {
        /// Project directory
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Issue log format: json | csv | both
        #[arg(long, default_value = "both")]
        format: String,

        /// Exit with error if any issue is found
        #[arg(long)]
        fail_on_issues: bool,
    },

    /// 📜 Shows the cleaning policy table, or the policy for one issue type
    Policy {
        /// Issue type (ex: "OUTLIER_VALUE")
        issue_type: Option<String>,

        /// Project directory (optional pulse.yaml / config/policies.yml)
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Print as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}
