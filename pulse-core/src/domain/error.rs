// pulse-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Unsupported dataset kind: '{0}'")]
    #[diagnostic(
        code(pulse::domain::dataset_kind),
        help("Supported kinds are: sales, inventory, products.")
    )]
    UnsupportedDatasetKind(String),

    #[error("Unknown issue type: '{0}'")]
    #[diagnostic(
        code(pulse::domain::issue_type),
        help("Policies can only be configured for known issue types (e.g. OUTLIER_VALUE).")
    )]
    UnknownIssueType(String),

    #[error("Invalid policy configuration: {0}")]
    #[diagnostic(code(pulse::domain::policy))]
    PolicyConfiguration(String),
}
