// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 adflint contributors

//! # adflint - Azure Data Factory pipeline validator
//!
//! `adflint` checks pipeline and dataset JSON for problems that pass schema
//! validation but fail on deployment or at run time.
//!
//! ## Features
//!
//! - **Nesting rules** - control-flow activities the platform cannot nest
//! - **Resource limits** - activity, parameter, variable and batch counts
//! - **Type compatibility** - Copy connectors against their datasets
//! - **Blob dependencies** - files a pipeline expects to already exist
//! - **Dependency graphs** - unknown `dependsOn` names and cycles
//!
//! ## Quick Start
//!
//! ```bash
//! # Validate ./pipeline against ./dataset
//! adflint validate
//!
//! # Learn about a rule
//! adflint explain set-variable-in-parallel-foreach
//! ```
//!
//! ## Library use
//!
//! ```no_run
//! use adflint::Validator;
//! use std::path::Path;
//!
//! let report = Validator::new(false)
//!     .run(Path::new("pipeline"), Path::new("dataset"))
//!     .unwrap();
//! println!("{} errors", report.errors);
//! ```

pub mod cli;
pub mod config;
pub mod dataset;
pub mod errors;
pub mod loader;
pub mod pipeline;
pub mod report;
pub mod rules;
pub mod utils;
pub mod validator;

// Re-export commonly used types
pub use config::LintConfig;
pub use dataset::{DatasetDocument, DatasetRegistry};
pub use errors::{AdflintError, AdflintResult};
pub use pipeline::{Activity, ActivityKind, PipelineDocument};
pub use report::{RuleId, Severity, ValidationIssue, ValidationReport};
pub use validator::Validator;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
