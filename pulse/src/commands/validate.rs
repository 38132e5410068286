// pulse/src/commands/validate.rs
//
// USE CASE: Validate a single dataset file.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use pulse_core::application::{ValidationRequest, validate_file};
use pulse_core::domain::quality::{DatasetKind, PolicyTable};
use pulse_core::infrastructure::adapters::source_for;
use pulse_core::infrastructure::issue_log::LogFormat;

use super::{load_config_or_default, print_report};

pub struct ValidateArgs {
    pub kind: String,
    pub input: PathBuf,
    pub output: PathBuf,
    pub format: String,
    pub workers: Option<usize>,
    pub chunk_size: Option<usize>,
    pub project_dir: PathBuf,
    pub fail_on_issues: bool,
}

pub async fn execute(args: ValidateArgs) -> anyhow::Result<()> {
    let start = std::time::Instant::now();

    let format = LogFormat::from_str(&args.format).map_err(|e| anyhow::anyhow!(e))?;
    let config = load_config_or_default(&args.project_dir)?;
    let policies = PolicyTable::with_overrides(&config.policy_overrides)
        .context("Invalid cleaning policy overrides")?;

    let mut settings = config.validation;
    if let Some(workers) = args.workers {
        settings.workers = workers.max(1);
    }
    if let Some(chunk_size) = args.chunk_size {
        settings.chunk_size = chunk_size.max(1);
    }

    if let Err(e) = DatasetKind::from_str(&args.kind) {
        println!("⚠️  {}: no rules will be applied", e);
    }

    println!("🔎 Validating {} as '{}'...", args.input.display(), args.kind);

    let source = source_for(&args.input)?;
    let name = args
        .input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.kind.clone());

    let request = ValidationRequest {
        name: &name,
        kind: &args.kind,
        input: &args.input,
        output_dir: &args.output,
        format,
        settings,
    };

    let outcome = validate_file(&request, source.as_ref(), &policies)
        .await
        .with_context(|| format!("Validation of {} failed", args.input.display()))?;

    print_report(&outcome.report);
    for path in &outcome.written {
        println!("   📝 {}", path.display());
    }
    println!("✨ Done in {:.2?}", start.elapsed());

    if args.fail_on_issues && !outcome.report.is_clean() {
        eprintln!(
            "\n❌ FAILURE. {} issues found in {}.",
            outcome.report.issue_count, name
        );
        std::process::exit(1);
    }

    Ok(())
}
