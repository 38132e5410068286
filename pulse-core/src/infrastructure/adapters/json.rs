// pulse-core/src/infrastructure/adapters/json.rs

use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;

use crate::domain::quality::{RawRecord, RawValue};
use crate::error::PulseError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::source::DatasetSource;

/// `.json` (array of objects) or `.jsonl` (one object per line). Keys missing from an object
/// are absent fields; explicit `null`s are kept as nulls.
pub struct JsonSource;

impl JsonSource {
    pub fn parse(path: &Path, content: &str) -> Result<Vec<RawRecord>, InfrastructureError> {
        let is_lines = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("jsonl") || e.eq_ignore_ascii_case("ndjson"));

        let json_err = |source| InfrastructureError::Json {
            path: path.display().to_string(),
            source,
        };

        let values: Vec<Value> = if is_lines {
            content
                .lines()
                .filter(|l| !l.trim().is_empty())
                .map(serde_json::from_str::<Value>)
                .collect::<Result<_, _>>()
                .map_err(json_err)?
        } else {
            match serde_json::from_str(content).map_err(json_err)? {
                Value::Array(items) => items,
                _ => {
                    return Err(InfrastructureError::MalformedDataset {
                        path: path.display().to_string(),
                        reason: "expected a top-level array of objects".to_string(),
                    });
                }
            }
        };

        values
            .iter()
            .enumerate()
            .map(|(idx, value)| match value {
                Value::Object(map) => Ok(map
                    .iter()
                    .map(|(k, v)| (k.clone(), RawValue::from(v)))
                    .collect()),
                _ => Err(InfrastructureError::MalformedDataset {
                    path: path.display().to_string(),
                    reason: format!("row {} is not an object", idx),
                }),
            })
            .collect()
    }
}

#[async_trait]
impl DatasetSource for JsonSource {
    async fn load(&self, path: &Path) -> Result<Vec<RawRecord>, PulseError> {
        let content = tokio::fs::read_to_string(path).await?;
        Ok(Self::parse(path, &content)?)
    }

    fn format_name(&self) -> &str {
        "json"
    }
}
