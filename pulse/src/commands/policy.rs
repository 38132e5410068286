// pulse/src/commands/policy.rs
//
// USE CASE: Show cleaning policies.

use std::path::PathBuf;

use anyhow::Context;
use comfy_table::{Table, presets::UTF8_FULL};
use pulse_core::domain::quality::PolicyTable;

use super::load_config_or_default;

pub fn execute(issue_type: Option<String>, project_dir: PathBuf, json: bool) -> anyhow::Result<()> {
    let config = load_config_or_default(&project_dir)?;
    let policies = PolicyTable::with_overrides(&config.policy_overrides)
        .context("Invalid cleaning policy overrides")?;

    if let Some(issue_type) = issue_type {
        let policy = policies.get_policy(&issue_type);
        if json {
            println!("{}", serde_json::to_string_pretty(&policy)?);
        } else {
            println!("{} ➜ {}: {}", issue_type, policy.action, policy.justification);
        }
        return Ok(());
    }

    if json {
        let entries: Vec<_> = policies
            .iter()
            .map(|(t, p)| {
                serde_json::json!({
                    "issue_type": t,
                    "action": p.action,
                    "justification": p.justification,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Issue type", "Action", "Justification"]);
    for (issue_type, policy) in policies.iter() {
        table.add_row(vec![
            issue_type.to_string(),
            policy.action.to_string(),
            policy.justification.clone(),
        ]);
    }
    println!("📜 Cleaning policies ({} categories)", policies.len());
    println!("{table}");
    Ok(())
}
