// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 adflint contributors

//! Nesting and control-flow rules
//!
//! Walks the whole activity tree. The parent check for an activity runs
//! before its children are visited, so a violation never hides the ones
//! nested below it. Loop restrictions also reach through intermediate
//! branches: ForEach > IfCondition > ForEach is still a violation.
//!
//! Settings written as expressions are unknown until run time and are
//! not checked.

use crate::pipeline::{
    walk, Activity, ActivityKind, ActivityVisitor, PipelineDocument, Setting, Visit,
};
use crate::report::{RuleId, ValidationIssue};

use super::tables::{
    is_forbidden_nesting, LOOKUP_MAX_MB, LOOKUP_MAX_ROWS, MAX_BATCH_COUNT, TRANSITIVE_PARENTS,
    WARN_BATCH_COUNT,
};

/// Validate nesting, ForEach and Lookup rules for a pipeline
pub fn validate(pipeline: &PipelineDocument, strict: bool) -> Vec<ValidationIssue> {
    let mut validator = NestingValidator {
        pipeline: &pipeline.name,
        strict,
        path: Vec::new(),
        issues: Vec::new(),
    };
    walk(&pipeline.activities, &mut validator);
    validator.issues
}

struct NestingValidator<'a> {
    pipeline: &'a str,
    strict: bool,
    /// Ancestors of the activity being visited, outermost first
    path: Vec<&'a Activity>,
    issues: Vec<ValidationIssue>,
}

impl<'a> NestingValidator<'a> {
    fn issue(&mut self, rule: RuleId, activity: &str, message: String) {
        self.issues
            .push(ValidationIssue::new(rule, self.pipeline, message).with_activity(activity));
    }

    fn check_parent(&mut self, visit: &Visit<'_>) {
        let (Some(parent_type), Some(parent_name)) = (visit.parent_type(), visit.parent_name())
        else {
            return;
        };

        let child = visit.activity;
        if is_forbidden_nesting(parent_type, &child.activity_type) {
            self.nesting_violation(child, parent_type, parent_name);
            return;
        }

        // Nearest loop-like ancestor above the direct parent
        let ancestors = &self.path[..self.path.len().saturating_sub(1)];
        let Some(ancestor) = ancestors
            .iter()
            .rev()
            .find(|a| TRANSITIVE_PARENTS.contains(&a.activity_type.as_str()))
            .copied()
        else {
            return;
        };

        if is_forbidden_nesting(&ancestor.activity_type, &child.activity_type) {
            self.nesting_violation(child, &ancestor.activity_type, &ancestor.name);
        }
    }

    fn nesting_violation(&mut self, child: &Activity, parent_type: &str, parent_name: &str) {
        self.issue(
            RuleId::NestingViolation,
            &child.name,
            format!(
                "{} '{}' cannot be nested inside {} '{}'; move it into a child pipeline \
                 and call that with an Execute Pipeline activity",
                child.activity_type, child.name, parent_type, parent_name
            ),
        );
    }

    fn check_activity(&mut self, visit: &Visit<'_>) {
        let activity = visit.activity;

        match &activity.kind {
            ActivityKind::ForEach(for_each) => {
                let batch_count = for_each.batch_count.as_ref().and_then(Setting::literal);
                if let Some(&batch_count) = batch_count {
                    if batch_count > MAX_BATCH_COUNT {
                        self.issue(
                            RuleId::BatchCountExceeded,
                            &activity.name,
                            format!(
                                "batchCount {} exceeds the maximum of {}",
                                batch_count, MAX_BATCH_COUNT
                            ),
                        );
                    } else if self.strict && batch_count > WARN_BATCH_COUNT {
                        self.issue(
                            RuleId::BatchCountNearLimit,
                            &activity.name,
                            format!(
                                "batchCount {} is close to the maximum of {}",
                                batch_count, MAX_BATCH_COUNT
                            ),
                        );
                    }
                }

                if for_each.is_sequential.literal() == Some(&false) {
                    for child in &for_each.activities {
                        if matches!(child.kind, ActivityKind::SetVariable) {
                            self.issue(
                                RuleId::SetVariableInParallelForEach,
                                &child.name,
                                format!(
                                    "SetVariable '{}' runs inside parallel ForEach '{}'; \
                                     iterations race on the variable. Use AppendVariable \
                                     or set isSequential to true",
                                    child.name, activity.name
                                ),
                            );
                        }
                    }
                }
            }
            ActivityKind::Lookup(lookup) => {
                let unbounded = match &lookup.first_row_only {
                    None => true,
                    Some(setting) => setting.literal() == Some(&false),
                };
                if unbounded {
                    self.issue(
                        RuleId::UnboundedLookup,
                        &activity.name,
                        format!(
                            "Lookup returns all rows; output is capped at {} rows / {} MB, \
                             paginate if the source can grow past that",
                            LOOKUP_MAX_ROWS, LOOKUP_MAX_MB
                        ),
                    );
                }
            }
            _ => {}
        }
    }
}

impl<'a> ActivityVisitor<'a> for NestingValidator<'a> {
    fn visit(&mut self, visit: Visit<'a>) {
        // Pre-order: everything deeper than this activity's parent is done
        self.path.truncate(visit.depth);
        self.check_parent(&visit);
        self.check_activity(&visit);
        self.path.push(visit.activity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn pipeline(activities: Value) -> PipelineDocument {
        serde_json::from_value(json!({ "name": "PL_Test", "activities": activities })).unwrap()
    }

    fn for_each(name: &str, props: Value) -> Value {
        json!({ "name": name, "type": "ForEach", "typeProperties": props })
    }

    fn rules(issues: &[ValidationIssue]) -> Vec<RuleId> {
        issues.iter().map(|i| i.rule).collect()
    }

    #[test]
    fn test_foreach_in_foreach_is_one_error() {
        let p = pipeline(json!([for_each(
            "Outer",
            json!({ "isSequential": true, "activities": [
                for_each("Inner", json!({ "isSequential": true }))
            ]})
        )]));

        let issues = validate(&p, false);
        assert_eq!(rules(&issues), vec![RuleId::NestingViolation]);
        assert!(issues[0].message.contains("ForEach 'Inner'"));
        assert!(issues[0].message.contains("ForEach 'Outer'"));
        assert_eq!(issues[0].activity.as_deref(), Some("Inner"));
    }

    #[test]
    fn test_foreach_in_until_is_error() {
        let p = pipeline(json!([{
            "name": "Poll",
            "type": "Until",
            "typeProperties": { "activities": [ for_each("Inner", json!({ "isSequential": true })) ] }
        }]));

        let issues = validate(&p, false);
        assert_eq!(rules(&issues), vec![RuleId::NestingViolation]);
        assert!(issues[0].message.contains("Until 'Poll'"));
    }

    #[test]
    fn test_foreach_in_if_condition_is_allowed() {
        let p = pipeline(json!([{
            "name": "Check",
            "type": "IfCondition",
            "typeProperties": {
                "ifTrueActivities": [ for_each("Loop", json!({ "isSequential": true })) ]
            }
        }]));

        assert!(validate(&p, false).is_empty());
    }

    #[test]
    fn test_foreach_through_if_condition_in_foreach() {
        let p = pipeline(json!([for_each(
            "Outer",
            json!({ "isSequential": true, "activities": [{
                "name": "Check",
                "type": "IfCondition",
                "typeProperties": {
                    "ifFalseActivities": [ for_each("Inner", json!({ "isSequential": true })) ]
                }
            }]})
        )]));

        let issues = validate(&p, false);
        assert_eq!(rules(&issues), vec![RuleId::NestingViolation]);
        assert_eq!(issues[0].activity.as_deref(), Some("Inner"));
        assert!(issues[0].message.contains("ForEach 'Outer'"));
    }

    #[test]
    fn test_until_through_switch_in_until() {
        let p = pipeline(json!([{
            "name": "Poll",
            "type": "Until",
            "typeProperties": { "activities": [{
                "name": "Route",
                "type": "Switch",
                "typeProperties": { "defaultActivities": [{
                    "name": "Retry",
                    "type": "Until",
                    "typeProperties": { "activities": [] }
                }]}
            }]}
        }]));

        let issues = validate(&p, false);
        assert_eq!(rules(&issues), vec![RuleId::NestingViolation]);
        assert!(issues[0].message.contains("Until 'Poll'"));
    }

    #[test]
    fn test_if_condition_through_foreach_is_allowed() {
        // Branch restrictions only apply to direct children
        let p = pipeline(json!([{
            "name": "Check",
            "type": "IfCondition",
            "typeProperties": { "ifTrueActivities": [ for_each("Loop", json!({
                "isSequential": true,
                "activities": [{ "name": "Inner", "type": "IfCondition", "typeProperties": {} }]
            })) ]}
        }]));

        assert!(validate(&p, false).is_empty());
    }

    #[test]
    fn test_siblings_do_not_inherit_ancestors() {
        let p = pipeline(json!([
            for_each("Loop", json!({ "isSequential": true, "activities": [
                { "name": "Wait1", "type": "Wait" }
            ]})),
            {
                "name": "Check",
                "type": "IfCondition",
                "typeProperties": { "ifTrueActivities": [ for_each("Later", json!({ "isSequential": true })) ] }
            }
        ]));

        assert!(validate(&p, false).is_empty());
    }

    #[test]
    fn test_violation_does_not_hide_deeper_violation() {
        // ForEach > ForEach > Until: both inner activities are flagged
        let p = pipeline(json!([for_each(
            "L1",
            json!({ "isSequential": true, "activities": [
                for_each("L2", json!({ "isSequential": true, "activities": [
                    { "name": "L3", "type": "Until", "typeProperties": { "activities": [] } }
                ]}))
            ]})
        )]));

        let issues = validate(&p, false);
        assert_eq!(
            rules(&issues),
            vec![RuleId::NestingViolation, RuleId::NestingViolation]
        );
        assert_eq!(issues[0].activity.as_deref(), Some("L2"));
        assert_eq!(issues[1].activity.as_deref(), Some("L3"));
    }

    #[test]
    fn test_switch_cases_and_default_are_walked() {
        let p = pipeline(json!([{
            "name": "Route",
            "type": "Switch",
            "typeProperties": {
                "cases": [{ "value": "a", "activities": [
                    { "name": "NestedIf", "type": "IfCondition", "typeProperties": {} }
                ]}],
                "defaultActivities": [
                    { "name": "NestedSwitch", "type": "Switch", "typeProperties": {} }
                ]
            }
        }]));

        let issues = validate(&p, false);
        let names: Vec<_> = issues.iter().filter_map(|i| i.activity.as_deref()).collect();
        assert_eq!(names, vec!["NestedIf", "NestedSwitch"]);
    }

    #[test]
    fn test_set_variable_in_parallel_foreach() {
        let body = json!([{ "name": "SetFlag", "type": "SetVariable" }]);

        let parallel = pipeline(json!([for_each(
            "Loop",
            json!({ "isSequential": false, "activities": body.clone() })
        )]));
        let issues = validate(&parallel, false);
        assert_eq!(rules(&issues), vec![RuleId::SetVariableInParallelForEach]);
        assert_eq!(issues[0].activity.as_deref(), Some("SetFlag"));

        let sequential = pipeline(json!([for_each(
            "Loop",
            json!({ "isSequential": true, "activities": body })
        )]));
        assert!(validate(&sequential, false).is_empty());
    }

    #[test]
    fn test_is_sequential_defaults_to_parallel() {
        let p = pipeline(json!([for_each(
            "Loop",
            json!({ "activities": [{ "name": "SetFlag", "type": "SetVariable" }] })
        )]));

        assert_eq!(
            rules(&validate(&p, false)),
            vec![RuleId::SetVariableInParallelForEach]
        );
    }

    #[test]
    fn test_append_variable_in_parallel_foreach_is_fine() {
        let p = pipeline(json!([for_each(
            "Loop",
            json!({ "isSequential": false, "activities": [{ "name": "Add", "type": "AppendVariable" }] })
        )]));

        assert!(validate(&p, false).is_empty());
    }

    #[test]
    fn test_batch_count_limits() {
        let with_batch = |n: i64| {
            pipeline(json!([for_each(
                "Loop",
                json!({ "isSequential": false, "batchCount": n })
            )]))
        };

        assert_eq!(
            rules(&validate(&with_batch(51), false)),
            vec![RuleId::BatchCountExceeded]
        );
        assert!(validate(&with_batch(50), false).is_empty());
        assert_eq!(
            rules(&validate(&with_batch(31), true)),
            vec![RuleId::BatchCountNearLimit]
        );
        assert!(validate(&with_batch(31), false).is_empty());
        assert!(validate(&with_batch(30), true).is_empty());
    }

    #[test]
    fn test_lookup_first_row_only() {
        let lookup = |props: Value| {
            pipeline(json!([{ "name": "GetRows", "type": "Lookup", "typeProperties": props }]))
        };

        let issues = validate(&lookup(json!({})), false);
        assert_eq!(rules(&issues), vec![RuleId::UnboundedLookup]);
        assert!(issues[0].message.contains("5000"));

        assert_eq!(
            rules(&validate(&lookup(json!({ "firstRowOnly": false })), false)),
            vec![RuleId::UnboundedLookup]
        );
        assert!(validate(&lookup(json!({ "firstRowOnly": true })), false).is_empty());
        assert_eq!(
            rules(&validate(&lookup(json!({ "firstRowOnly": null })), false)),
            vec![RuleId::UnboundedLookup]
        );
    }

    #[test]
    fn test_expression_settings_are_not_checked() {
        let p = pipeline(json!([
            {
                "name": "Get",
                "type": "Lookup",
                "typeProperties": {
                    "firstRowOnly": { "value": "@pipeline().parameters.one", "type": "Expression" }
                }
            },
            for_each("Outer", json!({
                "isSequential": "@pipeline().parameters.serial",
                "batchCount": "@pipeline().parameters.batch",
                "activities": [
                    { "name": "SetFlag", "type": "SetVariable" },
                    for_each("Inner", json!({ "isSequential": true }))
                ]
            }))
        ]));

        // The ForEach-in-ForEach is still found next to the expressions
        let issues = validate(&p, true);
        assert_eq!(rules(&issues), vec![RuleId::NestingViolation]);
        assert_eq!(issues[0].activity.as_deref(), Some("Inner"));
    }
}
