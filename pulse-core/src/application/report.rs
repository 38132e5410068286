// pulse-core/src/application/report.rs

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::domain::quality::{Action, Issue, IssueType, PolicyTable};

/// What the cleaner will have to do for one issue category, with the business reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemediationStep {
    pub issue_type: IssueType,
    pub occurrences: usize,
    pub action: Action,
    pub justification: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub dataset: String,
    /// As requested by the caller, even when unsupported.
    pub kind: String,
    pub rows_scanned: usize,
    pub issue_count: usize,
    pub records_with_issues: usize,
    pub by_issue_type: BTreeMap<IssueType, usize>,
    pub by_action: BTreeMap<Action, usize>,
    pub remediation: Vec<RemediationStep>,
}

impl ValidationReport {
    pub fn build(
        dataset: &str,
        kind: &str,
        rows_scanned: usize,
        issues: &[Issue],
        policies: &PolicyTable,
    ) -> Self {
        let mut by_issue_type: BTreeMap<IssueType, usize> = BTreeMap::new();
        let mut by_action: BTreeMap<Action, usize> = BTreeMap::new();
        let mut records = BTreeSet::new();

        for issue in issues {
            *by_issue_type.entry(issue.issue_type).or_default() += 1;
            *by_action.entry(issue.action_taken).or_default() += 1;
            records.insert(issue.record_identifier.as_str());
        }

        let remediation = by_issue_type
            .iter()
            .map(|(issue_type, count)| {
                let policy = policies.policy_for(*issue_type);
                RemediationStep {
                    issue_type: *issue_type,
                    occurrences: *count,
                    action: policy.action,
                    justification: policy.justification,
                }
            })
            .collect();

        Self {
            dataset: dataset.to_string(),
            kind: kind.to_string(),
            rows_scanned,
            issue_count: issues.len(),
            records_with_issues: records.len(),
            by_issue_type,
            by_action,
            remediation,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.issue_count == 0
    }
}
