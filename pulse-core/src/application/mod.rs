// pulse-core/src/application/mod.rs

pub mod report;
pub mod run;
pub mod validation;

// --- RE-EXPORTS (FACADE PATTERN) ---
// `use pulse_core::application::{DatasetValidator, run_project};`

pub use report::{RemediationStep, ValidationReport};
pub use run::{DatasetOutcome, ValidationRequest, run_project, validate_file};
pub use validation::DatasetValidator;
