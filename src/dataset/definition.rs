// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 adflint contributors

//! Dataset definition structures

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A dataset document
///
/// Accepts `{ "name", "properties": { "type", "typeProperties": { "location" } } }`
/// as written by Data Factory, and the flat `{ "name", "type", "location" }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawDataset")]
pub struct DatasetDocument {
    pub name: String,

    /// Format or connector type, e.g. `DelimitedText`, `AzureSqlTable`
    pub dataset_type: String,

    pub location: Option<DatasetLocation>,
}

/// Storage location of a file-based dataset
///
/// Path fields stay as raw JSON: they can be literals or expression objects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetLocation {
    #[serde(rename = "type", default)]
    pub location_type: String,
    #[serde(default)]
    pub folder_path: Option<Value>,
    #[serde(default)]
    pub file_name: Option<Value>,
    #[serde(default)]
    pub wildcard_file_name: Option<Value>,
    #[serde(default)]
    pub file_system: Option<Value>,
    #[serde(default)]
    pub container: Option<Value>,
}

impl DatasetLocation {
    pub fn has_folder_path(&self) -> bool {
        is_set(&self.folder_path)
    }

    /// True when either `fileName` or `wildcardFileName` is set
    pub fn names_a_file(&self) -> bool {
        is_set(&self.file_name) || is_set(&self.wildcard_file_name)
    }

    pub fn has_file_system(&self) -> bool {
        is_set(&self.file_system)
    }
}

/// Present, non-null and not an empty string
fn is_set(value: &Option<Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(_) => true,
    }
}

#[derive(Deserialize)]
struct RawDataset {
    #[serde(default)]
    name: String,
    #[serde(default)]
    properties: Option<DatasetBody>,
    #[serde(flatten)]
    body: DatasetBody,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DatasetBody {
    #[serde(rename = "type", default)]
    dataset_type: String,
    #[serde(default)]
    location: Option<DatasetLocation>,
    #[serde(default)]
    type_properties: Option<DatasetTypeProperties>,
}

#[derive(Default, Deserialize)]
struct DatasetTypeProperties {
    #[serde(default)]
    location: Option<DatasetLocation>,
}

impl From<RawDataset> for DatasetDocument {
    fn from(raw: RawDataset) -> Self {
        let body = raw.properties.unwrap_or(raw.body);
        let location = body
            .location
            .or_else(|| body.type_properties.and_then(|tp| tp.location));

        Self {
            name: raw.name,
            dataset_type: body.dataset_type,
            location,
        }
    }
}

impl DatasetDocument {
    /// Parse a dataset from a JSON string
    pub fn from_json(json: &str) -> Result<Self, crate::AdflintError> {
        serde_json::from_str(json).map_err(Into::into)
    }

    pub fn location_type(&self) -> Option<&str> {
        self.location.as_ref().map(|l| l.location_type.as_str())
    }
}
