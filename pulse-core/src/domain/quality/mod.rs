// pulse-core/src/domain/quality/mod.rs

pub mod issue;
pub mod policy;
pub mod record;
pub mod record_validator;
pub mod rules;
pub mod value;

// Re-exports
pub use issue::{Action, Finding, Issue, IssueType};
pub use policy::{Policy, PolicyOverride, PolicyTable};
pub use record::{DatasetKind, InventoryRecord, ProductRecord, Record, RecordKey, SalesRecord};
pub use record_validator::RecordValidator;
pub use rules::Verdict;
pub use value::{RawRecord, RawValue};
