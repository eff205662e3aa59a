// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 adflint contributors

//! Error types with educational messages
//!
//! Fatal errors (bad input directories, unreadable configuration) are
//! `AdflintError`s. Rule violations found in documents are never errors:
//! they are `ValidationIssue` values, see [`crate::report`].

mod educational;
mod recovery;

pub use educational::EducationalMessage;
pub use recovery::RecoverySuggestion;

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for adflint operations
pub type AdflintResult<T> = Result<T, AdflintError>;

/// Main error type for adflint
#[derive(Error, Debug, Diagnostic)]
pub enum AdflintError {
    // ─────────────────────────────────────────────────────────────────────────
    // Input Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("{kind} directory not found: {path}")]
    #[diagnostic(
        code(adflint::directory_not_found),
        help("Pass --{kind}s <DIR> or set '{kind}s' in .adflint.yaml")
    )]
    DirectoryNotFound { kind: &'static str, path: PathBuf },

    #[error("Failed to read file '{path}': {error}")]
    #[diagnostic(code(adflint::file_read_error))]
    FileReadError { path: PathBuf, error: String },

    #[error("Invalid configuration in '{path}': {reason}")]
    #[diagnostic(
        code(adflint::invalid_config),
        help("Allowed keys: pipelines, datasets, strict")
    )]
    InvalidConfig { path: PathBuf, reason: String },

    #[error("Unknown rule: {rule}")]
    #[diagnostic(
        code(adflint::unknown_rule),
        help("Run 'adflint rules' to list every rule id")
    )]
    UnknownRule { rule: String },

    // ─────────────────────────────────────────────────────────────────────────
    // IO/System Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("IO error: {message}")]
    #[diagnostic(code(adflint::io_error))]
    Io { message: String },

    #[error("YAML parsing error: {message}")]
    #[diagnostic(code(adflint::yaml_error))]
    Yaml { message: String },

    #[error("JSON parsing error: {message}")]
    #[diagnostic(code(adflint::json_error))]
    Json { message: String },

    #[error("Glob pattern error: {message}")]
    #[diagnostic(code(adflint::glob_error))]
    GlobPattern { message: String },
}

impl From<std::io::Error> for AdflintError {
    fn from(e: std::io::Error) -> Self {
        Self::Io { message: e.to_string() }
    }
}

impl From<serde_yaml::Error> for AdflintError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Yaml { message: e.to_string() }
    }
}

impl From<serde_json::Error> for AdflintError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json { message: e.to_string() }
    }
}

impl From<glob::PatternError> for AdflintError {
    fn from(e: glob::PatternError) -> Self {
        Self::GlobPattern { message: e.to_string() }
    }
}

impl AdflintError {
    /// Missing pipeline input directory
    pub fn pipelines_not_found(path: PathBuf) -> Self {
        Self::DirectoryNotFound {
            kind: "pipeline",
            path,
        }
    }

    /// Missing dataset input directory
    pub fn datasets_not_found(path: PathBuf) -> Self {
        Self::DirectoryNotFound {
            kind: "dataset",
            path,
        }
    }
}
