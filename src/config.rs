// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 adflint contributors

//! Configuration loading
//!
//! Optional `.adflint.yaml` in the working directory. Command-line flags
//! override it. Rule tables are not configurable.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::{AdflintError, AdflintResult};

/// Configuration file name
pub const CONFIG_FILE: &str = ".adflint.yaml";

/// Settings for a validation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LintConfig {
    /// Directory of pipeline JSON files
    #[serde(default = "default_pipelines")]
    pub pipelines: PathBuf,

    /// Directory of dataset JSON files
    #[serde(default = "default_datasets")]
    pub datasets: PathBuf,

    /// Enable near-limit warnings
    #[serde(default)]
    pub strict: bool,
}

fn default_pipelines() -> PathBuf {
    PathBuf::from("pipeline")
}

fn default_datasets() -> PathBuf {
    PathBuf::from("dataset")
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            pipelines: default_pipelines(),
            datasets: default_datasets(),
            strict: false,
        }
    }
}

impl LintConfig {
    /// Load `.adflint.yaml` from `dir`, or defaults when there is none
    ///
    /// Relative directories are resolved against `dir`.
    pub fn load(dir: &Path) -> AdflintResult<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default().resolved(dir));
        }

        let content = std::fs::read_to_string(&path).map_err(|e| AdflintError::FileReadError {
            path: path.clone(),
            error: e.to_string(),
        })?;

        let config = Self::from_yaml(&content).map_err(|e| AdflintError::InvalidConfig {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        Ok(config.resolved(dir))
    }

    /// Parse configuration from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }

    /// Apply command-line overrides
    pub fn with_overrides(
        mut self,
        pipelines: Option<PathBuf>,
        datasets: Option<PathBuf>,
        strict: bool,
    ) -> Self {
        if let Some(p) = pipelines {
            self.pipelines = p;
        }
        if let Some(d) = datasets {
            self.datasets = d;
        }
        self.strict |= strict;
        self
    }

    fn resolved(mut self, base: &Path) -> Self {
        self.pipelines = base.join(&self.pipelines);
        self.datasets = base.join(&self.datasets);
        self
    }
}
