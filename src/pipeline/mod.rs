// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 adflint contributors

//! Pipeline documents
//!
//! Typed model of pipeline JSON plus the shared activity tree walker.

mod definition;
pub mod walk;

pub use definition::*;
pub use walk::{for_each_activity, walk, ActivityVisitor, Visit};
