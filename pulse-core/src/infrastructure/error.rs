// pulse-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DatabaseError {
    #[error("DuckDB Engine Error: {0}")]
    #[diagnostic(
        code(pulse::infra::database::duckdb),
        help("DuckDB could not read the source file. Check that it is a well-formed CSV.")
    )]
    DuckDB(#[from] duckdb::Error),

    #[error("DuckDB connection lock poisoned")]
    #[diagnostic(code(pulse::infra::database::poisoned))]
    Poisoned,
}

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- DATABASE (Abstracted) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Database(#[from] DatabaseError),

    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(pulse::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error in '{path}': {source}")]
    #[diagnostic(
        code(pulse::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Configuration Error: {0}")]
    #[diagnostic(code(pulse::infra::config))]
    ConfigError(String),

    #[error("Project configuration not found at '{0}'")]
    #[diagnostic(code(pulse::infra::config_missing))]
    ConfigNotFound(String),

    // --- DATASETS / JSON ---
    #[error("JSON Error in '{path}': {source}")]
    #[diagnostic(code(pulse::infra::json))]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported dataset format for '{0}'")]
    #[diagnostic(
        code(pulse::infra::format),
        help("Supported extensions are .csv, .json and .jsonl.")
    )]
    UnsupportedFormat(String),

    #[error("Malformed dataset '{path}': {reason}")]
    #[diagnostic(code(pulse::infra::dataset))]
    MalformedDataset { path: String, reason: String },
}

// Manual implementation for shortcuts (e.g. `?` operator on duckdb calls)
impl From<duckdb::Error> for InfrastructureError {
    fn from(err: duckdb::Error) -> Self {
        InfrastructureError::Database(DatabaseError::DuckDB(err))
    }
}
