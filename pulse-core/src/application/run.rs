// pulse-core/src/application/run.rs
//
// USE CASES: validate one file, or every dataset declared in the project.

use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::application::report::ValidationReport;
use crate::application::validation::DatasetValidator;
use crate::domain::project::{ProjectConfig, ValidationSettings};
use crate::domain::quality::{Issue, PolicyTable};
use crate::error::PulseError;
use crate::infrastructure::adapters::source_for;
use crate::infrastructure::fs::atomic_write;
use crate::infrastructure::issue_log::{LogFormat, to_pretty_json, write_issue_log};
use crate::ports::source::DatasetSource;

pub const REPORT_FILE: &str = "validation_report.json";

#[derive(Debug, Clone)]
pub struct ValidationRequest<'a> {
    pub name: &'a str,
    pub kind: &'a str,
    pub input: &'a Path,
    pub output_dir: &'a Path,
    pub format: LogFormat,
    pub settings: ValidationSettings,
}

#[derive(Debug, Clone)]
pub struct DatasetOutcome {
    pub issues: Vec<Issue>,
    pub report: ValidationReport,
    pub written: Vec<PathBuf>,
}

/// Load -> validate -> persist issue log and report.
#[instrument(skip_all, fields(dataset = request.name, kind = request.kind))]
pub async fn validate_file(
    request: &ValidationRequest<'_>,
    source: &dyn DatasetSource,
    policies: &PolicyTable,
) -> Result<DatasetOutcome, PulseError> {
    let rows = source.load(request.input).await?;
    info!(rows = rows.len(), format = source.format_name(), "Dataset loaded");

    let mut validator = DatasetValidator::new();
    let issues = validator
        .validate_dataset_concurrent(&rows, request.kind, request.settings)
        .await?;

    let report = ValidationReport::build(request.name, request.kind, rows.len(), &issues, policies);

    let mut written = write_issue_log(request.output_dir, &issues, request.format)?;
    let report_path = request.output_dir.join(REPORT_FILE);
    atomic_write(&report_path, to_pretty_json(&report, REPORT_FILE)?)?;
    written.push(report_path);

    Ok(DatasetOutcome {
        issues,
        report,
        written,
    })
}

/// Validates every dataset of `pulse.yaml`, each into `<target>/<dataset>/`.
pub async fn run_project(
    project_dir: &Path,
    config: &ProjectConfig,
    format: LogFormat,
) -> Result<Vec<DatasetOutcome>, PulseError> {
    // Built once, read-only for the rest of the run.
    let policies = PolicyTable::with_overrides(&config.policy_overrides)?;
    let target_dir = project_dir.join(&config.target_path);

    let mut outcomes = Vec::with_capacity(config.datasets.len());
    for dataset in &config.datasets {
        let raw_path = Path::new(&dataset.path);
        let input = if raw_path.is_absolute() {
            raw_path.to_path_buf()
        } else {
            project_dir.join(raw_path)
        };
        let output_dir = target_dir.join(&dataset.name);

        let source = source_for(&input)?;
        let request = ValidationRequest {
            name: &dataset.name,
            kind: dataset.kind.as_str(),
            input: &input,
            output_dir: &output_dir,
            format,
            settings: config.validation,
        };
        outcomes.push(validate_file(&request, source.as_ref(), &policies).await?);
    }

    Ok(outcomes)
}
