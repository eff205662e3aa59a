// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 adflint contributors

//! Implicit blob file dependencies
//!
//! A narrow heuristic, not a general rule: a Copy activity that adds
//! `additionalColumns` and reads the `Blob_Staging` dataset with a literal
//! `path` is logging metadata, not moving that file's content. The file
//! still has to exist in storage or the pipeline cannot run.

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::LazyLock;

use crate::pipeline::{for_each_activity, PipelineDocument};
use crate::report::{RuleId, ValidationIssue};

use super::tables::STAGING_DATASET;

/// `@expr`, or `@{...}` interpolation anywhere
static EXPRESSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@($|[^@])|@\{").expect("Invalid expression pattern"));

/// A storage file a pipeline expects to exist
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlobDependency {
    pub pipeline: String,
    pub activity: String,
    /// `container/path`, or just `path` when no literal container is given
    pub path: String,
}

impl BlobDependency {
    pub fn to_issue(&self) -> ValidationIssue {
        ValidationIssue::new(
            RuleId::BlobDependency,
            self.pipeline.clone(),
            format!(
                "Requires '{}' to exist in blob storage before the pipeline runs",
                self.path
            ),
        )
        .with_activity(self.activity.clone())
    }
}

/// Find implicit blob dependencies anywhere in the activity tree
pub fn scan_blob_dependencies(pipeline: &PipelineDocument) -> Vec<BlobDependency> {
    let mut dependencies = Vec::new();

    for_each_activity(&pipeline.activities, |visit| {
        let Some(copy) = visit.activity.as_copy() else {
            return;
        };
        if !copy.source.has_additional_columns() {
            return;
        }
        let Some(input) = copy.inputs.first() else {
            return;
        };
        if input.reference_name != STAGING_DATASET {
            return;
        }

        if let Some(path) = staging_path(&input.parameters) {
            dependencies.push(BlobDependency {
                pipeline: pipeline.name.clone(),
                activity: visit.activity.name.clone(),
                path,
            });
        }
    });

    dependencies
}

fn staging_path(parameters: &Map<String, Value>) -> Option<String> {
    let path = parameters.get("path").and_then(literal)?;
    let path = path.trim_start_matches('/');

    match parameters.get("container").and_then(literal) {
        Some(container) => Some(format!("{}/{}", container.trim_end_matches('/'), path)),
        None => Some(path.to_string()),
    }
}

/// The value as a literal string, `None` for expressions and non-strings
///
/// `@@text` evaluates to `@text`.
fn literal(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) if s.starts_with("@@") => Some(&s[1..]),
        Value::String(s) if !s.is_empty() && !is_expression(s) => Some(s.as_str()),
        _ => None,
    }
}

/// True when Data Factory evaluates `value` at run time
///
/// A leading `@@` escapes the whole string, interpolations included.
pub fn is_expression(value: &str) -> bool {
    !value.starts_with("@@") && EXPRESSION.is_match(value)
}
