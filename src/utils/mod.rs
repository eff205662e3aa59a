// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 adflint contributors

//! Utility modules
//!
//! Terminal styling and progress reporting for the adflint CLI.

pub mod colors;
pub mod progress;

pub use colors::*;
pub use progress::*;
