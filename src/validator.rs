// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 adflint contributors

//! Validation run
//!
//! Loads datasets into the registry, then runs every checker over each
//! pipeline and folds the results into a [`ValidationReport`].

use std::path::Path;
use tracing::{debug, info};

use crate::dataset::DatasetRegistry;
use crate::errors::{AdflintError, AdflintResult};
use crate::loader;
use crate::pipeline::PipelineDocument;
use crate::report::{ValidationIssue, ValidationReport};
use crate::rules::{self, BlobDependency};

/// Issues found in a single pipeline
#[derive(Debug, Clone, Default)]
pub struct PipelineOutcome {
    pub issues: Vec<ValidationIssue>,
    pub blob_dependencies: Vec<BlobDependency>,
}

/// Runs the rule checkers
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    strict: bool,
}

impl Validator {
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }

    /// Run every checker over one pipeline
    ///
    /// Issue order: limits, nesting, types, blob dependencies, `dependsOn`.
    pub fn validate_pipeline(
        &self,
        pipeline: &PipelineDocument,
        registry: &DatasetRegistry,
    ) -> PipelineOutcome {
        let mut issues = rules::check_limits(pipeline);
        issues.extend(rules::nesting::validate(pipeline, self.strict));
        issues.extend(rules::check_types(pipeline, registry));

        let blob_dependencies = rules::scan_blob_dependencies(pipeline);
        issues.extend(blob_dependencies.iter().map(BlobDependency::to_issue));
        issues.extend(rules::check_dependencies(pipeline));

        PipelineOutcome {
            issues,
            blob_dependencies,
        }
    }

    /// Validate the dataset and pipeline directories
    pub fn run(&self, pipelines_dir: &Path, datasets_dir: &Path) -> AdflintResult<ValidationReport> {
        self.run_with_progress(pipelines_dir, datasets_dir, |_, _| {})
    }

    /// Like [`Validator::run`], calling `on_pipeline(done, total)` after each
    /// pipeline file
    pub fn run_with_progress<F>(
        &self,
        pipelines_dir: &Path,
        datasets_dir: &Path,
        mut on_pipeline: F,
    ) -> AdflintResult<ValidationReport>
    where
        F: FnMut(usize, usize),
    {
        if !datasets_dir.is_dir() {
            return Err(AdflintError::datasets_not_found(datasets_dir.to_path_buf()));
        }
        if !pipelines_dir.is_dir() {
            return Err(AdflintError::pipelines_not_found(pipelines_dir.to_path_buf()));
        }

        let mut report = ValidationReport::new();

        let datasets = DatasetRegistry::load(datasets_dir)?;
        report.datasets_checked = datasets.files_read;
        report.extend(datasets.issues);

        let registry = datasets.registry;
        debug!("Dataset registry holds {} datasets", registry.len());

        let pipelines = loader::load_pipelines(pipelines_dir)?;
        let total = pipelines.documents.len() + pipelines.issues.len();
        report.pipelines_checked = total;
        report.extend(pipelines.issues);

        let mut done = total - pipelines.documents.len();
        for loaded in &pipelines.documents {
            let outcome = self.validate_pipeline(&loaded.document, &registry);
            debug!(
                "Validated {} ({} issues)",
                loaded.document.name,
                outcome.issues.len()
            );

            report.record_blob_dependencies(&outcome.blob_dependencies);
            report.extend(outcome.issues.into_iter().map(|i| i.in_file(&loaded.path)));

            done += 1;
            on_pipeline(done, total);
        }

        info!(
            "Checked {} datasets and {} pipelines: {} errors, {} warnings",
            report.datasets_checked, report.pipelines_checked, report.errors, report.warnings
        );

        Ok(report)
    }
}
