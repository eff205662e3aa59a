// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 adflint contributors

//! Dataset documents and the name → dataset registry

mod definition;
mod registry;

pub use definition::{DatasetDocument, DatasetLocation};
pub use registry::{check_dataset, DatasetRegistry, LoadedRegistry};
