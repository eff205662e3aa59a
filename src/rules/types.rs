// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 adflint contributors

//! Copy connector / dataset type compatibility

use crate::dataset::DatasetRegistry;
use crate::pipeline::{for_each_activity, CopyEndpoint, DatasetReference, PipelineDocument};
use crate::report::{RuleId, ValidationIssue};

use super::tables::compatible_dataset_types;

/// Check every Copy activity's source and sink against its datasets
///
/// Unknown datasets and unmapped connector types are skipped.
pub fn check_types(pipeline: &PipelineDocument, registry: &DatasetRegistry) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for_each_activity(&pipeline.activities, |visit| {
        let activity = visit.activity;
        let Some(copy) = activity.as_copy() else {
            return;
        };

        let bindings = [
            ("source", &copy.source, copy.inputs.first()),
            ("sink", &copy.sink, copy.outputs.first()),
        ];

        for (role, endpoint, reference) in bindings {
            if let Some(message) = mismatch(role, endpoint, reference, registry) {
                issues.push(
                    ValidationIssue::new(RuleId::TypeMismatch, pipeline.name.clone(), message)
                        .with_activity(activity.name.clone()),
                );
            }
        }
    });

    issues
}

fn mismatch(
    role: &str,
    endpoint: &CopyEndpoint,
    reference: Option<&DatasetReference>,
    registry: &DatasetRegistry,
) -> Option<String> {
    let dataset = registry.get(&reference?.reference_name)?;
    let accepted = compatible_dataset_types(&endpoint.connector_type)?;

    if accepted.contains(&dataset.dataset_type.as_str()) {
        return None;
    }

    Some(format!(
        "{} type {} does not match dataset '{}' of type {} (expected {}); change the \
         dataset or the activity so they agree",
        role,
        endpoint.connector_type,
        dataset.name,
        dataset.dataset_type,
        accepted.join(" or ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DatasetDocument;
    use serde_json::{json, Value};

    fn registry(datasets: &[(&str, &str)]) -> DatasetRegistry {
        let mut registry = DatasetRegistry::new();
        for (name, dataset_type) in datasets {
            let dataset: DatasetDocument =
                serde_json::from_value(json!({ "name": name, "type": dataset_type })).unwrap();
            registry.insert(dataset);
        }
        registry
    }

    fn copy(source: &str, input: &str, sink: &str, output: &str) -> Value {
        json!({
            "name": "CopyData",
            "type": "Copy",
            "inputs": [{ "referenceName": input }],
            "outputs": [{ "referenceName": output }],
            "typeProperties": { "source": { "type": source }, "sink": { "type": sink } }
        })
    }

    fn pipeline(activities: Value) -> PipelineDocument {
        serde_json::from_value(json!({ "name": "PL_Copy", "activities": activities })).unwrap()
    }

    #[test]
    fn test_parquet_source_on_json_dataset() {
        let registry = registry(&[("DS_Json", "Json"), ("DS_Parquet", "Parquet")]);

        let bad = pipeline(json!([copy("ParquetSource", "DS_Json", "ParquetSink", "DS_Parquet")]));
        let issues = check_types(&bad, &registry);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].rule, RuleId::TypeMismatch);
        assert!(issues[0].message.contains("ParquetSource"));
        assert!(issues[0].message.contains("DS_Json"));
        assert_eq!(issues[0].activity.as_deref(), Some("CopyData"));

        let good = pipeline(json!([copy("ParquetSource", "DS_Parquet", "ParquetSink", "DS_Parquet")]));
        assert!(check_types(&good, &registry).is_empty());
    }

    #[test]
    fn test_sink_mismatch() {
        let registry = registry(&[("DS_Csv", "DelimitedText"), ("DS_Sql", "Parquet")]);
        let p = pipeline(json!([copy("DelimitedTextSource", "DS_Csv", "AzureSqlSink", "DS_Sql")]));

        let issues = check_types(&p, &registry);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.starts_with("sink"));
    }

    #[test]
    fn test_unknown_dataset_and_connector_are_skipped() {
        let registry = registry(&[("DS_Json", "Json")]);

        let missing = pipeline(json!([copy("ParquetSource", "DS_Missing", "JsonSink", "DS_Json")]));
        assert!(check_types(&missing, &registry).is_empty());

        let unmapped = pipeline(json!([copy("SapTableSource", "DS_Json", "JsonSink", "DS_Json")]));
        assert!(check_types(&unmapped, &registry).is_empty());
    }

    #[test]
    fn test_copy_inside_control_flow_is_checked() {
        let registry = registry(&[("DS_Json", "Json")]);
        let p = pipeline(json!([{
            "name": "Loop",
            "type": "ForEach",
            "typeProperties": { "activities": [{
                "name": "Poll",
                "type": "Until",
                "typeProperties": { "activities": [
                    copy("ParquetSource", "DS_Json", "JsonSink", "DS_Json")
                ]}
            }]}
        }]));

        assert_eq!(check_types(&p, &registry).len(), 1);
    }
}
