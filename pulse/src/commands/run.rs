// pulse/src/commands/run.rs
//
// USE CASE: Validate every dataset of the project.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use pulse_core::application::run_project;
use pulse_core::infrastructure::config::load_project_config;
use pulse_core::infrastructure::issue_log::LogFormat;

use super::print_report;

pub async fn execute(project_dir: PathBuf, format: String, fail_on_issues: bool) -> anyhow::Result<()> {
    let start = std::time::Instant::now();
    let format = LogFormat::from_str(&format).map_err(|e| anyhow::anyhow!(e))?;

    println!("⚙️  Loading configuration...");
    let config = load_project_config(&project_dir).with_context(|| {
        format!(
            "Failed to load project configuration from {:?}",
            project_dir
        )
    })?;
    println!("   Project: {} (v{})", config.name, config.version);

    if config.datasets.is_empty() {
        println!("⚠️  No datasets declared in the project file. Nothing to do.");
        return Ok(());
    }

    println!(
        "🟢 Validating {} datasets ({} workers, chunks of {})...",
        config.datasets.len(),
        config.validation.workers,
        config.validation.chunk_size
    );

    let outcomes = match run_project(&project_dir, &config, format).await {
        Ok(outcomes) => outcomes,
        Err(e) => {
            eprintln!("\n💥 CRITICAL VALIDATION ERROR: {}", e);
            std::process::exit(1);
        }
    };

    for outcome in &outcomes {
        print_report(&outcome.report);
    }

    let total: usize = outcomes.iter().map(|o| o.report.issue_count).sum();
    println!(
        "\n✨ Done in {:.2?}. {} issues across {} datasets.",
        start.elapsed(),
        total,
        outcomes.len()
    );

    if fail_on_issues && total > 0 {
        eprintln!("❌ FAILURE. Issues found and --fail-on-issues is set.");
        std::process::exit(1);
    }

    Ok(())
}
