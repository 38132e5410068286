// pulse-core/src/application/validation.rs

use futures::StreamExt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::domain::project::ValidationSettings;
use crate::domain::quality::{DatasetKind, Issue, RawRecord, Record, RecordValidator};
use crate::error::PulseError;

/// Walks a dataset in row order and collects the issue log.
///
/// The last result is kept for `last_issues()` until the next call replaces it.
#[derive(Debug, Default)]
pub struct DatasetValidator {
    last_issues: Vec<Issue>,
}

impl DatasetValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loose entry point: `kind` comes straight from the caller. An unsupported kind is
    /// not an error, it just yields no issues.
    #[instrument(skip(self, rows), fields(rows = rows.len()))]
    pub fn validate_dataset(&mut self, rows: &[RawRecord], kind: &str) -> Vec<Issue> {
        match DatasetKind::from_str(kind) {
            Ok(kind) => self.validate_kind(rows, kind),
            Err(e) => {
                warn!(error = %e, "No rules applied");
                self.remember(Vec::new())
            }
        }
    }

    pub fn validate_kind(&mut self, rows: &[RawRecord], kind: DatasetKind) -> Vec<Issue> {
        let records: Vec<Record> = rows.iter().map(|r| Record::from_raw(kind, r)).collect();
        self.validate_records(&records)
    }

    pub fn validate_records(&mut self, records: &[Record]) -> Vec<Issue> {
        let issues = validate_slice(records, 0);
        info!(records = records.len(), issues = issues.len(), "Validation pass complete");
        self.remember(issues)
    }

    /// Same result as `validate_dataset`, computed on contiguous chunks in parallel.
    /// Chunks are yielded back in submission order, so concatenation restores row order.
    #[instrument(skip(self, rows, settings), fields(rows = rows.len()))]
    pub async fn validate_dataset_concurrent(
        &mut self,
        rows: &[RawRecord],
        kind: &str,
        settings: ValidationSettings,
    ) -> Result<Vec<Issue>, PulseError> {
        let kind = match DatasetKind::from_str(kind) {
            Ok(kind) => kind,
            Err(e) => {
                warn!(error = %e, "No rules applied");
                return Ok(self.remember(Vec::new()));
            }
        };

        let records: Arc<Vec<Record>> =
            Arc::new(rows.iter().map(|r| Record::from_raw(kind, r)).collect());
        let chunk_size = settings.chunk_size.max(1);
        let workers = settings.workers.max(1);
        let total = records.len();

        debug!(chunk_size, workers, "Dispatching validation chunks");

        let tasks = (0..total).step_by(chunk_size).map(|start| {
            let records = Arc::clone(&records);
            let end = (start + chunk_size).min(total);
            tokio::task::spawn_blocking(move || validate_slice(&records[start..end], start))
        });

        // `buffered` (not `buffer_unordered`): results come back in chunk order.
        let chunks: Vec<_> = futures::stream::iter(tasks)
            .buffered(workers)
            .collect()
            .await;

        let mut issues = Vec::new();
        for chunk in chunks {
            let chunk = chunk.map_err(|e| {
                PulseError::InternalError(format!("Validation worker failed: {}", e))
            })?;
            issues.extend(chunk);
        }

        info!(records = total, issues = issues.len(), "Validation pass complete");
        Ok(self.remember(issues))
    }

    /// Issues from the most recent pass, without re-validating.
    pub fn last_issues(&self) -> &[Issue] {
        &self.last_issues
    }

    fn remember(&mut self, issues: Vec<Issue>) -> Vec<Issue> {
        self.last_issues = issues.clone();
        issues
    }
}

/// `offset` is the global index of `records[0]`, used for `ROW_<index>` identifiers.
fn validate_slice(records: &[Record], offset: usize) -> Vec<Issue> {
    let mut issues = Vec::new();
    for (local, record) in records.iter().enumerate() {
        let findings = RecordValidator::validate(record);
        if findings.is_empty() {
            continue;
        }
        let record_id = record.key().resolve(offset + local);
        for finding in findings {
            debug!(record = %record_id, issue_type = %finding.issue_type, detail = %finding.detail, "Issue");
            issues.push(finding.into_issue(record_id.clone()));
        }
    }
    issues
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::quality::{Action, IssueType, RawValue};

    fn clean_sale(id: &str) -> RawRecord {
        RawRecord::new()
            .with("order_id", id)
            .with("order_time", "2024-10-01 09:30:00")
            .with("selling_price_aed", 120.0)
            .with("qty", 2.0)
            .with("city", "Sharjah")
            .with("channel", "Web")
            .with("payment_status", "Paid")
            .with("unit_cost_aed", 40.0)
            .with("base_price_aed", 150.0)
            .with("discount_pct", 0.0)
    }

    fn messy_sales(n: usize) -> Vec<RawRecord> {
        (0..n)
            .map(|i| {
                let row = clean_sale(&format!("ORD{:06}", i));
                match i % 5 {
                    0 => row.with("selling_price_aed", 15000.0),
                    1 => row.with("city", "Dubayy").with("discount_pct", RawValue::Null),
                    2 => row.with("order_id", RawValue::Null).with("qty", 500.0),
                    3 => row.with("order_time", "yesterday"),
                    _ => row,
                }
            })
            .collect()
    }

    #[test]
    fn test_identifiers_and_order() {
        let rows = vec![
            clean_sale("ORD000001").with("qty", 0.0),
            clean_sale("ORD000002"),
            clean_sale("ORD000003").with("order_id", RawValue::Null).with("channel", "Fax"),
        ];
        let mut validator = DatasetValidator::new();
        let issues = validator.validate_dataset(&rows, "sales");

        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].record_identifier, "ORD000001");
        assert_eq!(issues[0].issue_type, IssueType::OutlierValue);
        assert_eq!(issues[0].action_taken, Action::Cap);
        assert_eq!(issues[1].record_identifier, "ROW_2");
        assert_eq!(issues[1].issue_type, IssueType::InvalidChannel);
    }

    #[test]
    fn test_product_id_fallback() {
        let rows = vec![
            RawRecord::new()
                .with("product_id", "P0007")
                .with("stock_on_hand", -3.0),
        ];
        let issues = DatasetValidator::new().validate_dataset(&rows, "inventory");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].record_identifier, "P0007");
        assert_eq!(issues[0].issue_type, IssueType::ImpossibleValue);
        assert_eq!(issues[0].action_taken, Action::Correct);
    }

    #[test]
    fn test_unknown_kind_yields_nothing() {
        let mut validator = DatasetValidator::new();
        validator.validate_dataset(&messy_sales(5), "sales");
        assert!(!validator.last_issues().is_empty());

        let issues = validator.validate_dataset(&messy_sales(5), "stores");
        assert!(issues.is_empty());
        assert!(validator.last_issues().is_empty());

        let inventory = vec![RawRecord::new().with("stock_on_hand", -5.0)];
        assert_eq!(validator.validate_dataset(&inventory, "inventory").len(), 1);
        for near_miss in ["Inventory", " inventory", "INVENTORY"] {
            assert!(validator.validate_dataset(&inventory, near_miss).is_empty());
        }
    }

    #[test]
    fn test_repeat_runs_are_identical() {
        let rows = messy_sales(40);
        let mut validator = DatasetValidator::new();
        let first = validator.validate_dataset(&rows, "sales");
        let second = validator.validate_dataset(&rows, "sales");
        assert_eq!(first, second);
        assert_eq!(validator.last_issues(), second.as_slice());
    }

    #[test]
    fn test_row_order_preserved() {
        let rows = messy_sales(25);
        let issues = DatasetValidator::new().validate_dataset(&rows, "sales");
        let position = |id: &str| issues.iter().position(|i| i.record_identifier == id);
        assert!(position("ORD000000").unwrap() < position("ORD000001").unwrap());
        assert!(position("ROW_2").unwrap() < position("ORD000003").unwrap());
        assert!(position("ORD000020").unwrap() < position("ORD000021").unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_matches_sequential() -> anyhow::Result<()> {
        let rows = messy_sales(103);
        let sequential = DatasetValidator::new().validate_dataset(&rows, "sales");

        for (workers, chunk_size) in [(1, 1), (3, 10), (8, 7), (4, 1000)] {
            let mut validator = DatasetValidator::new();
            let concurrent = validator
                .validate_dataset_concurrent(&rows, "sales", ValidationSettings { workers, chunk_size })
                .await?;
            assert_eq!(concurrent, sequential, "workers={} chunk={}", workers, chunk_size);
            assert_eq!(validator.last_issues(), sequential.as_slice());
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_concurrent_row_fallback_uses_global_index() -> anyhow::Result<()> {
        let rows: Vec<RawRecord> = (0..6)
            .map(|_| RawRecord::new().with("stock_on_hand", -1.0))
            .collect();
        let issues = DatasetValidator::new()
            .validate_dataset_concurrent(
                &rows,
                "inventory",
                ValidationSettings { workers: 2, chunk_size: 4 },
            )
            .await?;
        let ids: Vec<&str> = issues.iter().map(|i| i.record_identifier.as_str()).collect();
        assert_eq!(ids, vec!["ROW_0", "ROW_1", "ROW_2", "ROW_3", "ROW_4", "ROW_5"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_concurrent_empty_and_unknown() -> anyhow::Result<()> {
        let mut validator = DatasetValidator::new();
        let none = validator
            .validate_dataset_concurrent(&[], "sales", ValidationSettings::default())
            .await?;
        assert!(none.is_empty());
        let unknown = validator
            .validate_dataset_concurrent(&messy_sales(3), "returns", ValidationSettings::default())
            .await?;
        assert!(unknown.is_empty());
        Ok(())
    }
}
