// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 adflint contributors

//! Issue collection for a validation run
//!
//! Checkers return issue sequences; [`ValidationReport`] folds them into
//! run-wide totals. Nothing here renders text, see `cli::validate`.

mod issue;

pub use issue::{RuleId, Severity, ValidationIssue};

use serde::Serialize;
use std::collections::BTreeSet;

use crate::rules::BlobDependency;

/// Totals and issues for a whole run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub datasets_checked: usize,
    pub pipelines_checked: usize,
    pub errors: usize,
    pub warnings: usize,
    /// Issues in the order they were produced
    pub issues: Vec<ValidationIssue>,
    /// Distinct storage paths pipelines expect to exist
    pub blob_dependencies: BTreeSet<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single issue
    pub fn push(&mut self, issue: ValidationIssue) {
        match issue.severity {
            Severity::Error => self.errors += 1,
            Severity::Warning => self.warnings += 1,
        }
        self.issues.push(issue);
    }

    /// Add a sequence of issues, preserving order
    pub fn extend<I>(&mut self, issues: I)
    where
        I: IntoIterator<Item = ValidationIssue>,
    {
        for issue in issues {
            self.push(issue);
        }
    }

    pub fn record_blob_dependencies<'a, I>(&mut self, dependencies: I)
    where
        I: IntoIterator<Item = &'a BlobDependency>,
    {
        self.blob_dependencies
            .extend(dependencies.into_iter().map(|d| d.path.clone()));
    }

    /// True when any error-severity issue was recorded
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }

    /// Serialize the report as pretty JSON
    pub fn to_json(&self) -> Result<String, crate::AdflintError> {
        serde_json::to_string_pretty(self).map_err(Into::into)
    }
}
