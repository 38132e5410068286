// pulse/src/commands/mod.rs

pub mod policy;
pub mod run;
pub mod validate;

use std::path::Path;

use anyhow::Context;
use comfy_table::{Table, presets::UTF8_FULL};
use pulse_core::application::ValidationReport;
use pulse_core::domain::project::ProjectConfig;
use pulse_core::infrastructure::config::{find_main_config, load_project_config};

/// Project config when a pulse.yaml exists, built-in defaults otherwise.
pub fn load_config_or_default(project_dir: &Path) -> anyhow::Result<ProjectConfig> {
    if find_main_config(project_dir).is_err() {
        tracing::debug!(dir = ?project_dir, "No project file, using defaults");
        return Ok(ProjectConfig::default());
    }
    load_project_config(project_dir).with_context(|| {
        format!(
            "Failed to load project configuration from {:?}",
            project_dir
        )
    })
}

pub fn print_report(report: &ValidationReport) {
    println!(
        "   {} ({}): {} rows scanned, {} issues on {} records",
        report.dataset,
        report.kind,
        report.rows_scanned,
        report.issue_count,
        report.records_with_issues
    );

    if report.is_clean() {
        println!("   ✅ No issues found");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Issue type", "Count", "Action", "Justification"]);
    for step in &report.remediation {
        table.add_row(vec![
            step.issue_type.to_string(),
            step.occurrences.to_string(),
            step.action.to_string(),
            step.justification.clone(),
        ]);
    }
    println!("{table}");
}
