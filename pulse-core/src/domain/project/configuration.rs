// src/domain/project/configuration.rs

use crate::domain::quality::{DatasetKind, PolicyOverride};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
pub struct ProjectConfig {
    pub name: String,
    pub version: String,

    #[serde(rename = "config-paths", default = "default_config_paths")]
    pub config_paths: Vec<String>,

    #[serde(rename = "target-path", default = "default_target_path")]
    pub target_path: String,

    #[validate(nested)]
    #[serde(default)]
    pub validation: ValidationSettings,

    #[validate(nested)]
    #[serde(default)]
    pub datasets: Vec<DatasetConfig>,

    /// Filled from `<config-path>/policies.yml`, not from the main file.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub policy_overrides: Vec<PolicyOverride>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: "pulse".to_string(),
            version: "0.1.0".to_string(),
            config_paths: default_config_paths(),
            target_path: default_target_path(),
            validation: ValidationSettings::default(),
            datasets: Vec::new(),
            policy_overrides: Vec::new(),
        }
    }
}

/// Knobs for the chunked validation pass.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Validate)]
pub struct ValidationSettings {
    #[validate(range(min = 1, max = 256))]
    #[serde(default = "default_workers")]
    pub workers: usize,

    #[validate(range(min = 1))]
    #[serde(rename = "chunk-size", default = "default_chunk_size")]
    pub chunk_size: usize,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            chunk_size: default_chunk_size(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
pub struct DatasetConfig {
    #[validate(length(min = 1, message = "Dataset name cannot be empty"))]
    pub name: String,
    pub kind: DatasetKind,
    #[validate(length(min = 1, message = "Dataset path cannot be empty"))]
    pub path: String,
}

fn default_config_paths() -> Vec<String> {
    vec!["config".to_string()]
}
fn default_target_path() -> String {
    "target".to_string()
}
fn default_workers() -> usize {
    4
}
fn default_chunk_size() -> usize {
    1000
}
