// pulse-core/src/infrastructure/issue_log.rs
//
// Persists the issue sequence unchanged: same four fields, same order.

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

use crate::domain::quality::Issue;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::atomic_write;

pub const CSV_HEADER: [&str; 4] = [
    "record_identifier",
    "issue_type",
    "issue_detail",
    "action_taken",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Csv,
    Both,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "both" => Ok(Self::Both),
            _ => Err(format!("Unknown log format: {} (expected json | csv | both)", s)),
        }
    }
}

pub fn issues_to_json(issues: &[Issue]) -> Result<String, InfrastructureError> {
    to_pretty_json(issues, "issues.json")
}

pub fn issues_to_csv(issues: &[Issue]) -> String {
    let mut out = CSV_HEADER.join(",");
    out.push('\n');
    for issue in issues {
        let cells = [
            issue.record_identifier.as_str(),
            issue.issue_type.as_str(),
            issue.issue_detail.as_str(),
            issue.action_taken.as_str(),
        ];
        let line: Vec<String> = cells.iter().map(|c| csv_escape(c)).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }
    out
}

/// RFC 4180: quote when the cell holds a comma, quote, or line break; double inner quotes.
fn csv_escape(cell: &str) -> String {
    if cell.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

pub(crate) fn to_pretty_json<T: Serialize + ?Sized>(
    value: &T,
    label: &str,
) -> Result<String, InfrastructureError> {
    serde_json::to_string_pretty(value).map_err(|source| InfrastructureError::Json {
        path: label.to_string(),
        source,
    })
}

/// Writes `issues.json` and/or `issues.csv` into `dir`. Returns the written paths.
pub fn write_issue_log(
    dir: &Path,
    issues: &[Issue],
    format: LogFormat,
) -> Result<Vec<PathBuf>, InfrastructureError> {
    let mut written = Vec::new();

    if matches!(format, LogFormat::Json | LogFormat::Both) {
        let path = dir.join("issues.json");
        atomic_write(&path, issues_to_json(issues)?)?;
        written.push(path);
    }
    if matches!(format, LogFormat::Csv | LogFormat::Both) {
        let path = dir.join("issues.csv");
        atomic_write(&path, issues_to_csv(issues))?;
        written.push(path);
    }

    info!(dir = ?dir, issues = issues.len(), files = written.len(), "Issue log written");
    Ok(written)
}
