// pulse-core/src/ports/source.rs

// Contract for anything that can hand raw rows to the validator. The engine does not care
// whether rows came from a CSV scanned by DuckDB or a JSON export.

use crate::domain::quality::RawRecord;
use crate::error::PulseError;
use async_trait::async_trait;
use std::path::Path;

#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Rows in file order.
    async fn load(&self, path: &Path) -> Result<Vec<RawRecord>, PulseError>;

    fn format_name(&self) -> &str;
}
