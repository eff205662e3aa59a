// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 adflint contributors

//! Dataset registry
//!
//! Built once before any pipeline is validated and read-only afterwards.

use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use super::DatasetDocument;
use crate::errors::AdflintResult;
use crate::loader::{self, Loaded};
use crate::report::{RuleId, ValidationIssue};
use crate::rules::tables::{ADLS_GEN2_LOCATION, BLOB_LOCATION, FILE_FORMATS};

/// Datasets by name
#[derive(Debug, Clone, Default)]
pub struct DatasetRegistry {
    datasets: BTreeMap<String, DatasetDocument>,
}

/// Result of loading a dataset directory
#[derive(Debug)]
pub struct LoadedRegistry {
    pub registry: DatasetRegistry,
    /// Parse failures followed by dataset check issues
    pub issues: Vec<ValidationIssue>,
    /// `*.json` files read, unparseable ones included
    pub files_read: usize,
}

impl DatasetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every dataset in `dir` along with the parse and structure
    /// issues found while loading
    pub fn load(dir: &Path) -> AdflintResult<LoadedRegistry> {
        let outcome = loader::load_datasets(dir)?;
        let files_read = outcome.documents.len() + outcome.issues.len();
        let (registry, mut issues) = Self::from_documents(outcome.documents);

        let mut all = outcome.issues;
        all.append(&mut issues);
        Ok(LoadedRegistry {
            registry,
            issues: all,
            files_read,
        })
    }

    /// Register already-parsed datasets, checking each one
    ///
    /// A later dataset with an already registered name is reported and
    /// ignored.
    pub fn from_documents<I>(documents: I) -> (Self, Vec<ValidationIssue>)
    where
        I: IntoIterator<Item = Loaded<DatasetDocument>>,
    {
        let mut registry = Self::new();
        let mut issues = Vec::new();

        for Loaded { path, document } in documents {
            issues.extend(
                check_dataset(&document)
                    .into_iter()
                    .map(|issue| issue.in_file(&path)),
            );

            if registry.datasets.contains_key(&document.name) {
                issues.push(
                    ValidationIssue::new(
                        RuleId::DuplicateDataset,
                        document.name.clone(),
                        format!(
                            "Dataset name '{}' is already defined; this definition is ignored",
                            document.name
                        ),
                    )
                    .in_file(&path),
                );
                continue;
            }

            debug!("Registered dataset {} ({})", document.name, document.dataset_type);
            registry.datasets.insert(document.name.clone(), document);
        }

        (registry, issues)
    }

    /// Register a single dataset without checks, replacing any previous one
    pub fn insert(&mut self, dataset: DatasetDocument) {
        self.datasets.insert(dataset.name.clone(), dataset);
    }

    pub fn get(&self, name: &str) -> Option<&DatasetDocument> {
        self.datasets.get(name)
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

/// Structural checks on a single dataset
pub fn check_dataset(dataset: &DatasetDocument) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    let Some(location) = dataset.location.as_ref() else {
        return issues;
    };

    if location.location_type == BLOB_LOCATION
        && FILE_FORMATS.contains(&dataset.dataset_type.as_str())
        && location.has_folder_path()
        && !location.names_a_file()
    {
        issues.push(ValidationIssue::new(
            RuleId::BlobFolderWithoutFile,
            dataset.name.clone(),
            format!(
                "{} dataset sets folderPath but neither fileName nor wildcardFileName; \
                 the path resolves to a folder and activities may fail at runtime",
                dataset.dataset_type
            ),
        ));
    }

    if location.location_type == ADLS_GEN2_LOCATION && !location.has_file_system() {
        issues.push(ValidationIssue::new(
            RuleId::MissingFileSystem,
            dataset.name.clone(),
            format!("{} requires location.fileSystem", ADLS_GEN2_LOCATION),
        ));
    }

    issues
}
