// pulse-core/src/domain/quality/issue.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Remedial operation a downstream cleaner should perform. The engine only recommends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Drop,
    Cap,
    Correct,
    Impute,
    Skip,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Drop => "DROP",
            Self::Cap => "CAP",
            Self::Correct => "CORRECT",
            Self::Impute => "IMPUTE",
            Self::Skip => "SKIP",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DROP" => Ok(Self::Drop),
            "CAP" => Ok(Self::Cap),
            "CORRECT" => Ok(Self::Correct),
            "IMPUTE" => Ok(Self::Impute),
            "SKIP" => Ok(Self::Skip),
            _ => Err(format!("Unknown action: {}", s)),
        }
    }
}

/// Defect category. Several rules can share one category (price and quantity are both outliers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueType {
    InvalidTimestamp,
    OutlierValue,
    MissingValue,
    InvalidCity,
    InvalidChannel,
    InvalidValue,
    ConstraintViolation,
    ImpossibleValue,
}

impl IssueType {
    pub const ALL: [IssueType; 8] = [
        Self::InvalidTimestamp,
        Self::OutlierValue,
        Self::MissingValue,
        Self::InvalidCity,
        Self::InvalidChannel,
        Self::InvalidValue,
        Self::ConstraintViolation,
        Self::ImpossibleValue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidTimestamp => "INVALID_TIMESTAMP",
            Self::OutlierValue => "OUTLIER_VALUE",
            Self::MissingValue => "MISSING_VALUE",
            Self::InvalidCity => "INVALID_CITY",
            Self::InvalidChannel => "INVALID_CHANNEL",
            Self::InvalidValue => "INVALID_VALUE",
            Self::ConstraintViolation => "CONSTRAINT_VIOLATION",
            Self::ImpossibleValue => "IMPOSSIBLE_VALUE",
        }
    }

    /// The action stamped on every issue of this category.
    pub fn recommended_action(&self) -> Action {
        match self {
            Self::InvalidTimestamp => Action::Drop,
            Self::OutlierValue | Self::ConstraintViolation => Action::Cap,
            Self::MissingValue => Action::Impute,
            Self::InvalidCity | Self::InvalidChannel | Self::InvalidValue | Self::ImpossibleValue => {
                Action::Correct
            }
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IssueType {
    type Err = String;

    /// Exact match on the wire spelling (`OUTLIER_VALUE`), no case folding.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unknown issue type: {}", s))
    }
}

/// A defect found in one record, before it is labelled with the record identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub issue_type: IssueType,
    pub detail: String,
}

impl Finding {
    pub fn new(issue_type: IssueType, detail: impl Into<String>) -> Self {
        Self {
            issue_type,
            detail: detail.into(),
        }
    }

    pub fn into_issue(self, record_identifier: String) -> Issue {
        Issue {
            record_identifier,
            action_taken: self.issue_type.recommended_action(),
            issue_type: self.issue_type,
            issue_detail: self.detail,
        }
    }
}

/// One line of the issue log. This four-field shape is what gets persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub record_identifier: String,
    pub issue_type: IssueType,
    pub issue_detail: String,
    pub action_taken: Action,
}
