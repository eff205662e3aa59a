// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 adflint contributors

//! Pipeline definition structures
//!
//! Models Data Factory pipeline JSON. Both the on-disk shape
//! (`{ "name", "properties": { "activities", ... } }`) and a flat shape
//! with the fields at the top level are accepted.

use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A pipeline document
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawPipeline")]
pub struct PipelineDocument {
    /// Pipeline name (file stem when the document has none)
    pub name: String,

    /// Top-level activities in document order
    pub activities: Vec<Activity>,

    /// Parameter definitions by name
    pub parameters: Map<String, Value>,

    /// Variable definitions by name
    pub variables: Map<String, Value>,
}

#[derive(Deserialize)]
struct RawPipeline {
    #[serde(default)]
    name: String,
    #[serde(default)]
    properties: Option<PipelineBody>,
    #[serde(flatten)]
    body: PipelineBody,
}

#[derive(Default, Deserialize)]
struct PipelineBody {
    #[serde(default)]
    activities: Vec<Activity>,
    #[serde(default)]
    parameters: Map<String, Value>,
    #[serde(default)]
    variables: Map<String, Value>,
}

impl From<RawPipeline> for PipelineDocument {
    fn from(raw: RawPipeline) -> Self {
        let body = raw.properties.unwrap_or(raw.body);
        Self {
            name: raw.name,
            activities: body.activities,
            parameters: body.parameters,
            variables: body.variables,
        }
    }
}

impl PipelineDocument {
    /// Parse a pipeline from a JSON string
    pub fn from_json(json: &str) -> Result<Self, crate::AdflintError> {
        serde_json::from_str(json).map_err(Into::into)
    }
}

/// A single pipeline activity
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawActivity")]
pub struct Activity {
    pub name: String,

    /// Activity type as written in the document (`ForEach`, `Copy`, ...)
    pub activity_type: String,

    /// Sibling activities that must finish first
    pub depends_on: Vec<ActivityDependency>,

    /// Type-specific payload
    pub kind: ActivityKind,
}

/// Type-specific activity payload
#[derive(Debug, Clone, PartialEq)]
pub enum ActivityKind {
    ForEach(ForEachActivity),
    IfCondition(IfConditionActivity),
    Switch(SwitchActivity),
    Until(UntilActivity),
    Copy(CopyActivity),
    Lookup(LookupActivity),
    SetVariable,
    /// Any other type, treated as an opaque leaf
    Other,
}

/// A `typeProperties` scalar that may be written as a literal or as an
/// expression (`"@..."` or `{ "value": "@...", "type": "Expression" }`)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Setting<T> {
    Literal(T),
    /// Resolved only at run time
    Expression(Value),
}

impl<T> Setting<T> {
    /// The literal value, `None` for expressions
    pub fn literal(&self) -> Option<&T> {
        match self {
            Self::Literal(value) => Some(value),
            Self::Expression(_) => None,
        }
    }
}

impl<T: Default> Default for Setting<T> {
    fn default() -> Self {
        Self::Literal(T::default())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForEachActivity {
    /// Defaults to parallel
    #[serde(default)]
    pub is_sequential: Setting<bool>,
    #[serde(default)]
    pub batch_count: Option<Setting<i64>>,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IfConditionActivity {
    #[serde(default)]
    pub if_true_activities: Vec<Activity>,
    #[serde(default)]
    pub if_false_activities: Vec<Activity>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchActivity {
    #[serde(default)]
    pub cases: Vec<SwitchCase>,
    #[serde(default)]
    pub default_activities: Vec<Activity>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SwitchCase {
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UntilActivity {
    #[serde(default)]
    pub activities: Vec<Activity>,
}

/// Copy activity: typeProperties plus the activity-level dataset bindings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CopyActivity {
    pub source: CopyEndpoint,
    pub sink: CopyEndpoint,
    pub inputs: Vec<DatasetReference>,
    pub outputs: Vec<DatasetReference>,
}

#[derive(Default, Deserialize)]
struct CopyProperties {
    #[serde(default)]
    source: CopyEndpoint,
    #[serde(default)]
    sink: CopyEndpoint,
}

/// Copy source or sink
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyEndpoint {
    /// Connector type, e.g. `DelimitedTextSource`
    #[serde(rename = "type", default)]
    pub connector_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_columns: Option<Value>,
}

impl CopyEndpoint {
    /// True when `additionalColumns` holds at least one entry
    pub fn has_additional_columns(&self) -> bool {
        match &self.additional_columns {
            Some(Value::Array(columns)) => !columns.is_empty(),
            Some(Value::Object(columns)) => !columns.is_empty(),
            Some(Value::String(columns)) => !columns.is_empty(),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupActivity {
    #[serde(default)]
    pub first_row_only: Option<Setting<bool>>,
}

/// Reference from an activity to a dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetReference {
    pub reference_name: String,
    #[serde(default)]
    pub parameters: Map<String, Value>,
}

/// One `dependsOn` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDependency {
    pub activity: String,
    #[serde(default)]
    pub dependency_conditions: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawActivity {
    name: String,
    #[serde(rename = "type")]
    activity_type: String,
    #[serde(default)]
    depends_on: Vec<ActivityDependency>,
    #[serde(default)]
    type_properties: Value,
    #[serde(default)]
    inputs: Vec<DatasetReference>,
    #[serde(default)]
    outputs: Vec<DatasetReference>,
}

impl TryFrom<RawActivity> for Activity {
    type Error = serde_json::Error;

    fn try_from(raw: RawActivity) -> Result<Self, Self::Error> {
        let props = match raw.type_properties {
            Value::Null => Value::Object(Map::new()),
            other => other,
        };

        let kind = parse_kind(&raw.activity_type, props, raw.inputs, raw.outputs).map_err(|e| {
            serde_json::Error::custom(format!("activity '{}': {}", raw.name, e))
        })?;

        Ok(Self {
            name: raw.name,
            activity_type: raw.activity_type,
            depends_on: raw.depends_on,
            kind,
        })
    }
}

fn parse_kind(
    activity_type: &str,
    props: Value,
    inputs: Vec<DatasetReference>,
    outputs: Vec<DatasetReference>,
) -> Result<ActivityKind, serde_json::Error> {
    let kind = match activity_type {
        "ForEach" => ActivityKind::ForEach(serde_json::from_value(props)?),
        "IfCondition" => ActivityKind::IfCondition(serde_json::from_value(props)?),
        "Switch" => ActivityKind::Switch(serde_json::from_value(props)?),
        "Until" => ActivityKind::Until(serde_json::from_value(props)?),
        "Copy" => {
            let copy: CopyProperties = serde_json::from_value(props)?;
            ActivityKind::Copy(CopyActivity {
                source: copy.source,
                sink: copy.sink,
                inputs,
                outputs,
            })
        }
        "Lookup" => ActivityKind::Lookup(serde_json::from_value(props)?),
        "SetVariable" => ActivityKind::SetVariable,
        _ => ActivityKind::Other,
    };
    Ok(kind)
}

impl Activity {
    /// Every nested activity list, in document order
    ///
    /// IfCondition yields the true branch then the false branch; Switch
    /// yields each case in order then the default branch.
    pub fn nested(&self) -> Vec<&[Activity]> {
        match &self.kind {
            ActivityKind::ForEach(for_each) => vec![for_each.activities.as_slice()],
            ActivityKind::IfCondition(branch) => vec![
                branch.if_true_activities.as_slice(),
                branch.if_false_activities.as_slice(),
            ],
            ActivityKind::Switch(switch) => switch
                .cases
                .iter()
                .map(|case| case.activities.as_slice())
                .chain(std::iter::once(switch.default_activities.as_slice()))
                .collect(),
            ActivityKind::Until(until) => vec![until.activities.as_slice()],
            _ => Vec::new(),
        }
    }

    pub fn as_copy(&self) -> Option<&CopyActivity> {
        match &self.kind {
            ActivityKind::Copy(copy) => Some(copy),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_properties_wrapper() {
        let json = r#"{
            "name": "PL_Orders",
            "properties": {
                "activities": [
                    { "name": "Wait1", "type": "Wait", "typeProperties": { "waitTimeInSeconds": 1 } }
                ],
                "parameters": { "env": { "type": "string" } },
                "variables": { "rows": { "type": "Array" } }
            }
        }"#;

        let pipeline = PipelineDocument::from_json(json).unwrap();
        assert_eq!(pipeline.name, "PL_Orders");
        assert_eq!(pipeline.activities.len(), 1);
        assert_eq!(pipeline.activities[0].kind, ActivityKind::Other);
        assert_eq!(pipeline.parameters.len(), 1);
        assert_eq!(pipeline.variables.len(), 1);
    }

    #[test]
    fn test_parse_flat_shape() {
        let pipeline: PipelineDocument = serde_json::from_value(json!({
            "name": "PL_Flat",
            "activities": [{ "name": "Set", "type": "SetVariable" }]
        }))
        .unwrap();

        assert_eq!(pipeline.activities[0].kind, ActivityKind::SetVariable);
        assert_eq!(pipeline.activities[0].name, "Set");
    }

    #[test]
    fn test_parse_nested_foreach() {
        let pipeline: PipelineDocument = serde_json::from_value(json!({
            "name": "PL_Loop",
            "properties": { "activities": [{
                "name": "Loop",
                "type": "ForEach",
                "typeProperties": {
                    "isSequential": false,
                    "batchCount": 20,
                    "items": { "value": "@pipeline().parameters.items", "type": "Expression" },
                    "activities": [{ "name": "Inner", "type": "Wait" }]
                }
            }]}
        }))
        .unwrap();

        match &pipeline.activities[0].kind {
            ActivityKind::ForEach(for_each) => {
                assert_eq!(for_each.is_sequential, Setting::Literal(false));
                assert_eq!(for_each.batch_count, Some(Setting::Literal(20)));
                assert_eq!(for_each.activities[0].name, "Inner");
            }
            other => panic!("Expected ForEach, got {:?}", other),
        }
    }

    #[test]
    fn test_expression_settings_parse() {
        let pipeline: PipelineDocument = serde_json::from_value(json!({
            "name": "PL_Params",
            "activities": [
                {
                    "name": "Get",
                    "type": "Lookup",
                    "typeProperties": {
                        "firstRowOnly": { "value": "@pipeline().parameters.one", "type": "Expression" }
                    }
                },
                {
                    "name": "Loop",
                    "type": "ForEach",
                    "typeProperties": { "isSequential": "@pipeline().parameters.serial", "batchCount": 10 }
                }
            ]
        }))
        .unwrap();

        match &pipeline.activities[0].kind {
            ActivityKind::Lookup(lookup) => {
                let setting = lookup.first_row_only.as_ref().unwrap();
                assert!(matches!(setting, Setting::Expression(_)));
                assert_eq!(setting.literal(), None);
            }
            other => panic!("Expected Lookup, got {:?}", other),
        }
        match &pipeline.activities[1].kind {
            ActivityKind::ForEach(for_each) => {
                assert_eq!(for_each.is_sequential.literal(), None);
                assert_eq!(for_each.batch_count, Some(Setting::Literal(10)));
            }
            other => panic!("Expected ForEach, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_copy_bindings() {
        let pipeline: PipelineDocument = serde_json::from_value(json!({
            "name": "PL_Copy",
            "activities": [{
                "name": "CopyOrders",
                "type": "Copy",
                "inputs": [{ "referenceName": "DS_In", "type": "DatasetReference" }],
                "outputs": [{ "referenceName": "DS_Out", "parameters": { "table": "orders" } }],
                "typeProperties": {
                    "source": { "type": "DelimitedTextSource" },
                    "sink": { "type": "AzureSqlSink" }
                }
            }]
        }))
        .unwrap();

        let copy = pipeline.activities[0].as_copy().unwrap();
        assert_eq!(copy.source.connector_type, "DelimitedTextSource");
        assert_eq!(copy.sink.connector_type, "AzureSqlSink");
        assert_eq!(copy.inputs[0].reference_name, "DS_In");
        assert_eq!(copy.outputs[0].parameters["table"], "orders");
        assert!(!copy.source.has_additional_columns());
    }

    #[test]
    fn test_nested_lists_order() {
        let activity: Activity = serde_json::from_value(json!({
            "name": "Route",
            "type": "Switch",
            "typeProperties": {
                "cases": [
                    { "value": "a", "activities": [{ "name": "A", "type": "Wait" }] },
                    { "value": "b", "activities": [{ "name": "B", "type": "Wait" }] }
                ],
                "defaultActivities": [{ "name": "D", "type": "Wait" }]
            }
        }))
        .unwrap();

        let names: Vec<&str> = activity
            .nested()
            .iter()
            .map(|list| list[0].name.as_str())
            .collect();
        assert_eq!(names, vec!["A", "B", "D"]);
    }

    #[test]
    fn test_bad_type_properties_names_activity() {
        let err = serde_json::from_value::<Activity>(json!({
            "name": "Loop",
            "type": "ForEach",
            "typeProperties": { "batchCount": "many" }
        }))
        .unwrap_err();

        assert!(err.to_string().contains("activity 'Loop'"));
    }

    #[test]
    fn test_additional_columns_detection() {
        let endpoint: CopyEndpoint = serde_json::from_value(json!({
            "type": "DelimitedTextSource",
            "additionalColumns": [{ "name": "run_id", "value": "$$FILEPATH" }]
        }))
        .unwrap();
        assert!(endpoint.has_additional_columns());

        let endpoint: CopyEndpoint = serde_json::from_value(json!({
            "type": "DelimitedTextSource",
            "additionalColumns": []
        }))
        .unwrap();
        assert!(!endpoint.has_additional_columns());
    }
}
