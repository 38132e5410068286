// pulse-core/src/domain/quality/policy.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use validator::Validate;

use super::issue::{Action, IssueType};
use crate::domain::error::DomainError;

pub const NO_POLICY_JUSTIFICATION: &str = "No policy defined";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    pub action: Action,
    pub justification: String,
}

impl Policy {
    pub fn skip() -> Self {
        Self {
            action: Action::Skip,
            justification: NO_POLICY_JUSTIFICATION.to_string(),
        }
    }
}

/// Entry of the `policies.yml` satellite file. Only the justification can be reworded:
/// the action of a category is fixed by the category itself.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct PolicyOverride {
    pub issue_type: String,
    #[validate(length(min = 1, message = "Justification cannot be empty"))]
    pub justification: String,
}

/// Issue category -> (action, justification). Built once at start-up, read-only afterwards.
/// The table is read-only after construction, so workers share it by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyTable {
    policies: BTreeMap<IssueType, Policy>,
}

impl PolicyTable {
    /// The built-in business decisions.
    pub fn standard() -> Self {
        let policies = IssueType::ALL
            .into_iter()
            .map(|t| {
                let policy = Policy {
                    action: t.recommended_action(),
                    justification: default_justification(t).to_string(),
                };
                (t, policy)
            })
            .collect();
        Self { policies }
    }

    /// Standard table with configured justifications layered on top.
    pub fn with_overrides(overrides: &[PolicyOverride]) -> Result<Self, DomainError> {
        let mut table = Self::standard();
        for entry in overrides {
            entry
                .validate()
                .map_err(|e| DomainError::PolicyConfiguration(format!("{}: {}", entry.issue_type, e)))?;
            let issue_type = IssueType::from_str(&entry.issue_type)
                .map_err(|_| DomainError::UnknownIssueType(entry.issue_type.clone()))?;
            if let Some(policy) = table.policies.get_mut(&issue_type) {
                policy.justification = entry.justification.clone();
            }
        }
        Ok(table)
    }

    /// Lenient lookup by wire name. Unknown categories get the SKIP fallback, never an error.
    pub fn get_policy(&self, issue_type: &str) -> Policy {
        IssueType::from_str(issue_type)
            .map(|t| self.policy_for(t))
            .unwrap_or_else(|_| Policy::skip())
    }

    pub fn policy_for(&self, issue_type: IssueType) -> Policy {
        self.policies
            .get(&issue_type)
            .cloned()
            .unwrap_or_else(Policy::skip)
    }

    pub fn iter(&self) -> impl Iterator<Item = (IssueType, &Policy)> {
        self.policies.iter().map(|(t, p)| (*t, p))
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn default_justification(issue_type: IssueType) -> &'static str {
    match issue_type {
        IssueType::InvalidTimestamp => "corrupted timestamps cannot be inferred",
        IssueType::OutlierValue => {
            "cap at a chosen percentile bound, preserving row while fixing anomaly"
        }
        IssueType::MissingValue => "discount_pct→0; unit_cost→50% of base_price",
        IssueType::InvalidCity => "standardize to a default valid city",
        IssueType::InvalidChannel => "standardize to a default valid channel",
        IssueType::InvalidValue => "payment_status defaults to Paid",
        IssueType::ConstraintViolation => "cap unit_cost at base_price",
        IssueType::ImpossibleValue => "negative stock→0; excessive stock capped",
    }
}
