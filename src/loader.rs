// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 adflint contributors

//! Document loading
//!
//! Reads every `*.json` file of an input directory. A file that cannot be
//! read or parsed becomes a single `parse-failure` issue and the batch
//! continues; only a missing directory is fatal.

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::dataset::DatasetDocument;
use crate::errors::{AdflintError, AdflintResult};
use crate::pipeline::PipelineDocument;
use crate::report::{RuleId, ValidationIssue};

/// A JSON document kind the loader understands
pub trait Document: DeserializeOwned {
    /// Singular name used in messages ("pipeline", "dataset")
    const KIND: &'static str;

    fn name_mut(&mut self) -> &mut String;
}

impl Document for PipelineDocument {
    const KIND: &'static str = "pipeline";

    fn name_mut(&mut self) -> &mut String {
        &mut self.name
    }
}

impl Document for DatasetDocument {
    const KIND: &'static str = "dataset";

    fn name_mut(&mut self) -> &mut String {
        &mut self.name
    }
}

/// A parsed document and where it came from
#[derive(Debug, Clone)]
pub struct Loaded<T> {
    pub path: PathBuf,
    pub document: T,
}

/// Everything read from one directory
#[derive(Debug)]
pub struct LoadOutcome<T> {
    pub documents: Vec<Loaded<T>>,
    /// One `parse-failure` issue per unreadable file
    pub issues: Vec<ValidationIssue>,
}

/// List `dir/*.json`, sorted by path
pub fn json_files(dir: &Path) -> AdflintResult<Vec<PathBuf>> {
    let pattern = format!(
        "{}/*.json",
        glob::Pattern::escape(&dir.to_string_lossy())
    );

    let mut files = Vec::new();
    for entry in glob::glob(&pattern)? {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            // Unreadable entries still get a parse-failure issue when read
            Err(e) => files.push(e.path().to_path_buf()),
        }
    }

    files.sort();
    Ok(files)
}

/// Read and parse a single document
///
/// A document without a `name` takes the file stem.
pub fn load_document<T: Document>(path: &Path) -> AdflintResult<T> {
    let content = std::fs::read_to_string(path).map_err(|e| AdflintError::FileReadError {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;

    let mut document: T = serde_json::from_str(&content)?;

    let name = document.name_mut();
    if name.trim().is_empty() {
        *name = file_stem(path);
    }

    Ok(document)
}

/// Load every document of a directory
pub fn load_documents<T: Document>(dir: &Path) -> AdflintResult<LoadOutcome<T>> {
    if !dir.is_dir() {
        return Err(AdflintError::DirectoryNotFound {
            kind: T::KIND,
            path: dir.to_path_buf(),
        });
    }

    let mut outcome = LoadOutcome {
        documents: Vec::new(),
        issues: Vec::new(),
    };

    for path in json_files(dir)? {
        match load_document::<T>(&path) {
            Ok(document) => {
                debug!("Loaded {} {}", T::KIND, path.display());
                outcome.documents.push(Loaded { path, document });
            }
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                outcome.issues.push(
                    ValidationIssue::new(
                        RuleId::ParseFailure,
                        file_name(&path),
                        format!("Failed to parse {} file: {}", T::KIND, e),
                    )
                    .in_file(&path),
                );
            }
        }
    }

    Ok(outcome)
}

pub fn load_pipelines(dir: &Path) -> AdflintResult<LoadOutcome<PipelineDocument>> {
    load_documents(dir)
}

pub fn load_datasets(dir: &Path) -> AdflintResult<LoadOutcome<DatasetDocument>> {
    load_documents(dir)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
