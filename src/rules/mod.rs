// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 adflint contributors

//! Pipeline rule checkers
//!
//! Every checker is a pure function of one pipeline (plus the read-only
//! dataset registry where needed) returning the issues it found.

pub mod blob;
pub mod dependencies;
pub mod limits;
pub mod nesting;
pub mod tables;
pub mod types;

pub use blob::{scan_blob_dependencies, BlobDependency};
pub use dependencies::{check_dependencies, ActivityGraph};
pub use limits::check_limits;
pub use types::check_types;
