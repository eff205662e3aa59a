// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 adflint contributors

//! Pipeline resource limits
//!
//! Only top-level counts are limited by the platform, so nothing here
//! descends into nested activities.

use crate::pipeline::PipelineDocument;
use crate::report::{RuleId, ValidationIssue};

use super::tables::{MAX_ACTIVITIES, MAX_PARAMETERS, MAX_VARIABLES, WARN_ACTIVITIES};

/// Check activity, parameter and variable counts
pub fn check_limits(pipeline: &PipelineDocument) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let name = pipeline.name.as_str();

    let activities = pipeline.activities.len();
    if activities == 0 {
        issues.push(ValidationIssue::new(
            RuleId::EmptyPipeline,
            name,
            "Pipeline has no activities",
        ));
    } else if activities > MAX_ACTIVITIES {
        issues.push(ValidationIssue::new(
            RuleId::TooManyActivities,
            name,
            format!(
                "{} activities exceed the limit of {} per pipeline; split it and chain the \
                 parts with Execute Pipeline",
                activities, MAX_ACTIVITIES
            ),
        ));
    } else if activities > WARN_ACTIVITIES {
        issues.push(ValidationIssue::new(
            RuleId::ActivitiesNearLimit,
            name,
            format!(
                "{} activities, close to the limit of {} per pipeline",
                activities, MAX_ACTIVITIES
            ),
        ));
    }

    let parameters = pipeline.parameters.len();
    if parameters > MAX_PARAMETERS {
        issues.push(ValidationIssue::new(
            RuleId::TooManyParameters,
            name,
            format!(
                "{} parameters exceed the limit of {} per pipeline",
                parameters, MAX_PARAMETERS
            ),
        ));
    }

    let variables = pipeline.variables.len();
    if variables > MAX_VARIABLES {
        issues.push(ValidationIssue::new(
            RuleId::TooManyVariables,
            name,
            format!(
                "{} variables exceed the limit of {} per pipeline",
                variables, MAX_VARIABLES
            ),
        ));
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map, Value};

    fn pipeline_with(activities: usize, parameters: usize, variables: usize) -> PipelineDocument {
        let activities: Vec<Value> = (0..activities)
            .map(|i| json!({ "name": format!("Wait{}", i), "type": "Wait" }))
            .collect();
        let named = |n: usize, prefix: &str| -> Map<String, Value> {
            (0..n)
                .map(|i| (format!("{}{}", prefix, i), json!({ "type": "String" })))
                .collect()
        };

        serde_json::from_value(json!({
            "name": "PL_Big",
            "properties": {
                "activities": activities,
                "parameters": named(parameters, "p"),
                "variables": named(variables, "v")
            }
        }))
        .unwrap()
    }

    fn rules(pipeline: &PipelineDocument) -> Vec<RuleId> {
        check_limits(pipeline).iter().map(|i| i.rule).collect()
    }

    #[test]
    fn test_activity_thresholds() {
        assert_eq!(rules(&pipeline_with(121, 0, 0)), vec![RuleId::TooManyActivities]);
        assert!(rules(&pipeline_with(120, 0, 0)).contains(&RuleId::ActivitiesNearLimit));
        assert!(!rules(&pipeline_with(120, 0, 0)).contains(&RuleId::TooManyActivities));
        assert_eq!(rules(&pipeline_with(101, 0, 0)), vec![RuleId::ActivitiesNearLimit]);
        assert!(rules(&pipeline_with(100, 0, 0)).is_empty());
    }

    #[test]
    fn test_exactly_120_has_no_error() {
        let issues = check_limits(&pipeline_with(120, 0, 0));
        assert!(issues.iter().all(|i| !i.is_error()));
    }

    #[test]
    fn test_parameter_and_variable_limits() {
        assert_eq!(rules(&pipeline_with(1, 51, 0)), vec![RuleId::TooManyParameters]);
        assert_eq!(rules(&pipeline_with(1, 0, 51)), vec![RuleId::TooManyVariables]);
        assert!(rules(&pipeline_with(1, 50, 50)).is_empty());
    }

    #[test]
    fn test_empty_pipeline_warns() {
        let issues = check_limits(&pipeline_with(0, 0, 0));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].rule, RuleId::EmptyPipeline);
        assert!(!issues[0].is_error());
    }

    #[test]
    fn test_nested_activities_are_not_counted() {
        let nested: Vec<Value> = (0..130)
            .map(|i| json!({ "name": format!("Inner{}", i), "type": "Wait" }))
            .collect();
        let pipeline: PipelineDocument = serde_json::from_value(json!({
            "name": "PL_Nested",
            "activities": [{
                "name": "Loop",
                "type": "ForEach",
                "typeProperties": { "activities": nested }
            }]
        }))
        .unwrap();

        assert!(check_limits(&pipeline).is_empty());
    }
}
