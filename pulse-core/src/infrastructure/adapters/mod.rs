// pulse-core/src/infrastructure/adapters/mod.rs

pub mod duckdb;
pub mod json;

use std::path::Path;

use crate::infrastructure::error::InfrastructureError;
use crate::ports::source::DatasetSource;

/// Picks the reader from the file extension.
pub fn source_for(path: &Path) -> Result<Box<dyn DatasetSource>, InfrastructureError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match ext.as_deref() {
        Some("csv") => Ok(Box::new(duckdb::DuckDBSource::new(":memory:")?)),
        Some("json") | Some("jsonl") | Some("ndjson") => Ok(Box::new(json::JsonSource)),
        _ => Err(InfrastructureError::UnsupportedFormat(
            path.display().to_string(),
        )),
    }
}
