// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 adflint contributors

//! Validation issues and the rule ids that produce them

use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};

/// Issue severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Fails the run
    Error,
    /// Reported, never affects the exit status
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// Identifies the rule behind an issue
///
/// Every rule has a fixed severity and a stable kebab-case id used by
/// `adflint explain` and the JSON report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleId {
    // Documents
    ParseFailure,
    BlobFolderWithoutFile,
    MissingFileSystem,
    DuplicateDataset,

    // Nesting and control flow
    NestingViolation,
    BatchCountExceeded,
    BatchCountNearLimit,
    SetVariableInParallelForEach,
    UnboundedLookup,

    // Resource limits
    TooManyActivities,
    ActivitiesNearLimit,
    TooManyParameters,
    TooManyVariables,
    EmptyPipeline,

    // Cross references
    TypeMismatch,
    BlobDependency,
    UnknownDependency,
    CircularDependency,
    DuplicateActivityName,
}

impl RuleId {
    /// All rules, in documentation order
    pub const ALL: [RuleId; 19] = [
        Self::ParseFailure,
        Self::BlobFolderWithoutFile,
        Self::MissingFileSystem,
        Self::DuplicateDataset,
        Self::NestingViolation,
        Self::BatchCountExceeded,
        Self::BatchCountNearLimit,
        Self::SetVariableInParallelForEach,
        Self::UnboundedLookup,
        Self::TooManyActivities,
        Self::ActivitiesNearLimit,
        Self::TooManyParameters,
        Self::TooManyVariables,
        Self::EmptyPipeline,
        Self::TypeMismatch,
        Self::BlobDependency,
        Self::UnknownDependency,
        Self::CircularDependency,
        Self::DuplicateActivityName,
    ];

    /// Stable identifier
    pub fn id(&self) -> &'static str {
        match self {
            Self::ParseFailure => "parse-failure",
            Self::BlobFolderWithoutFile => "blob-folder-without-file",
            Self::MissingFileSystem => "missing-file-system",
            Self::DuplicateDataset => "duplicate-dataset",
            Self::NestingViolation => "nesting-violation",
            Self::BatchCountExceeded => "batch-count-exceeded",
            Self::BatchCountNearLimit => "batch-count-near-limit",
            Self::SetVariableInParallelForEach => "set-variable-in-parallel-foreach",
            Self::UnboundedLookup => "unbounded-lookup",
            Self::TooManyActivities => "too-many-activities",
            Self::ActivitiesNearLimit => "activities-near-limit",
            Self::TooManyParameters => "too-many-parameters",
            Self::TooManyVariables => "too-many-variables",
            Self::EmptyPipeline => "empty-pipeline",
            Self::TypeMismatch => "type-mismatch",
            Self::BlobDependency => "blob-dependency",
            Self::UnknownDependency => "unknown-dependency",
            Self::CircularDependency => "circular-dependency",
            Self::DuplicateActivityName => "duplicate-activity-name",
        }
    }

    /// Severity of every issue raised under this rule
    pub fn severity(&self) -> Severity {
        match self {
            Self::BlobFolderWithoutFile
            | Self::DuplicateDataset
            | Self::BatchCountNearLimit
            | Self::UnboundedLookup
            | Self::ActivitiesNearLimit
            | Self::EmptyPipeline
            | Self::BlobDependency => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// One-line description
    pub fn summary(&self) -> &'static str {
        match self {
            Self::ParseFailure => "Document could not be read or parsed",
            Self::BlobFolderWithoutFile => "Blob dataset points at a folder, not a file",
            Self::MissingFileSystem => "ADLS Gen2 dataset has no fileSystem",
            Self::DuplicateDataset => "Two datasets share a name",
            Self::NestingViolation => "Control-flow activity nested in an unsupported parent",
            Self::BatchCountExceeded => "ForEach batchCount above the platform maximum",
            Self::BatchCountNearLimit => "ForEach batchCount close to the platform maximum",
            Self::SetVariableInParallelForEach => "SetVariable inside a parallel ForEach",
            Self::UnboundedLookup => "Lookup returns all rows",
            Self::TooManyActivities => "Pipeline exceeds the activity limit",
            Self::ActivitiesNearLimit => "Pipeline is close to the activity limit",
            Self::TooManyParameters => "Pipeline exceeds the parameter limit",
            Self::TooManyVariables => "Pipeline exceeds the variable limit",
            Self::EmptyPipeline => "Pipeline has no activities",
            Self::TypeMismatch => "Copy connector type does not match the dataset type",
            Self::BlobDependency => "Pipeline needs a pre-existing file in blob storage",
            Self::UnknownDependency => "dependsOn names an activity outside its sibling list",
            Self::CircularDependency => "dependsOn edges form a cycle",
            Self::DuplicateActivityName => "Activity name used more than once in a pipeline",
        }
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl std::str::FromStr for RuleId {
    type Err = crate::AdflintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|rule| rule.id() == wanted)
            .ok_or_else(|| crate::AdflintError::UnknownRule {
                rule: s.to_string(),
            })
    }
}

impl Serialize for RuleId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

/// A single rule violation found in a pipeline or dataset document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub rule: RuleId,
    /// Pipeline or dataset name (file name for unparseable documents)
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity: Option<String>,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(rule: RuleId, source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: rule.severity(),
            rule,
            source: source.into(),
            file: None,
            activity: None,
            message: message.into(),
        }
    }

    pub fn with_activity(mut self, activity: impl Into<String>) -> Self {
        self.activity = Some(activity.into());
        self
    }

    /// Attach the document path, keeping any path already set
    pub fn in_file(mut self, path: &Path) -> Self {
        if self.file.is_none() {
            self.file = Some(path.to_path_buf());
        }
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.rule, self.source)?;
        if let Some(ref activity) = self.activity {
            write!(f, " / {}", activity)?;
        }
        write!(f, ": {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_ids_round_trip_through_from_str() {
        for rule in RuleId::ALL {
            assert_eq!(rule.id().parse::<RuleId>().unwrap(), rule);
        }
        assert!("no-such-rule".parse::<RuleId>().is_err());
    }

    #[test]
    fn test_issue_takes_rule_severity() {
        let issue = ValidationIssue::new(RuleId::UnboundedLookup, "PL_Load", "lookup");
        assert_eq!(issue.severity, Severity::Warning);
        assert!(!issue.is_error());

        let issue = ValidationIssue::new(RuleId::NestingViolation, "PL_Load", "nested");
        assert!(issue.is_error());
    }

    #[test]
    fn test_display_includes_activity() {
        let issue = ValidationIssue::new(RuleId::TypeMismatch, "PL_Load", "bad type")
            .with_activity("Copy_Orders");
        assert_eq!(
            issue.to_string(),
            "[type-mismatch] PL_Load / Copy_Orders: bad type"
        );
    }

    #[test]
    fn test_in_file_keeps_existing_path() {
        let issue = ValidationIssue::new(RuleId::ParseFailure, "a.json", "broken")
            .in_file(Path::new("pipeline/a.json"))
            .in_file(Path::new("other.json"));
        assert_eq!(issue.file.as_deref(), Some(Path::new("pipeline/a.json")));
    }
}
