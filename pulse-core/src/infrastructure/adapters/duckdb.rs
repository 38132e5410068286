// pulse-core/src/infrastructure/adapters/duckdb.rs

use async_trait::async_trait;
use duckdb::{Config, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::debug;

// Imports Hexagonaux
use crate::domain::quality::{RawRecord, RawValue};
use crate::error::PulseError;
use crate::infrastructure::error::{DatabaseError, InfrastructureError};
use crate::ports::source::DatasetSource;

/// Reads CSV files through DuckDB's scanner. Every column is read as VARCHAR so nothing is
/// coerced before the rules see it; empty cells come back as NULL.
pub struct DuckDBSource {
    conn: Arc<Mutex<Connection>>,
}

impl DuckDBSource {
    pub fn new(db_path: &str) -> Result<Self, InfrastructureError> {
        let config = Config::default();

        let conn = if db_path == ":memory:" {
            Connection::open_in_memory_with_flags(config)?
        } else {
            Connection::open_with_flags(db_path, config)?
        };

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn read_csv(&self, path: &Path) -> Result<Vec<RawRecord>, InfrastructureError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| InfrastructureError::Database(DatabaseError::Poisoned))?;

        let escaped = path.to_string_lossy().replace('\'', "''");
        let sql = format!(
            "SELECT * FROM read_csv('{}', header = true, all_varchar = true)",
            escaped
        );
        debug!(%sql, "Scanning CSV source");

        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;
        let column_names: Vec<String> = rows
            .as_ref()
            .map(|s| s.column_names())
            .unwrap_or_default();

        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            let mut record = RawRecord::new();
            for (i, name) in column_names.iter().enumerate() {
                let cell: Option<String> = row.get(i)?;
                record.insert(name, RawValue::from(cell));
            }
            records.push(record);
        }

        Ok(records)
    }
}

#[async_trait]
impl DatasetSource for DuckDBSource {
    async fn load(&self, path: &Path) -> Result<Vec<RawRecord>, PulseError> {
        if !path.exists() {
            return Err(InfrastructureError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Dataset not found: {}", path.display()),
            ))
            .into());
        }
        Ok(self.read_csv(path)?)
    }

    fn format_name(&self) -> &str {
        "csv"
    }
}
