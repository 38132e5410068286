pub mod configuration;

pub use configuration::{DatasetConfig, ProjectConfig, ValidationSettings};
