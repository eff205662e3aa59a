// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 adflint contributors

//! Error recovery suggestions
//!
//! Actionable steps for fixing each kind of validation issue.

use crate::report::RuleId;

/// A recovery suggestion with concrete steps
#[derive(Debug, Clone)]
pub struct RecoverySuggestion {
    /// Brief description of what to do
    pub action: String,
    /// Detailed steps
    pub steps: Vec<String>,
    /// Commands to run
    pub commands: Vec<String>,
}

impl RecoverySuggestion {
    /// Suggestion for an issue raised by `rule`
    pub fn for_rule(rule: RuleId) -> Self {
        match rule {
            RuleId::ParseFailure => Self {
                action: "Fix the JSON document".into(),
                steps: vec![
                    "Check for trailing commas and unbalanced brackets".into(),
                    "Every activity needs a name and a type".into(),
                ],
                commands: vec![],
            },
            RuleId::BlobFolderWithoutFile => Self {
                action: "Point the dataset at a file".into(),
                steps: vec![
                    "Set location.fileName, or use a wildcard in the Copy source".into(),
                    "Parameterise fileName if it changes per run".into(),
                ],
                commands: vec![],
            },
            RuleId::MissingFileSystem => Self {
                action: "Set location.fileSystem".into(),
                steps: vec!["ADLS Gen2 locations need the container name in fileSystem".into()],
                commands: vec![],
            },
            RuleId::DuplicateDataset => Self {
                action: "Rename or remove one of the datasets".into(),
                steps: vec!["Only the first definition is used for type checks".into()],
                commands: vec![],
            },
            RuleId::NestingViolation => Self {
                action: "Move the inner activity into a child pipeline".into(),
                steps: vec![
                    "Create a pipeline holding the nested control-flow activity".into(),
                    "Replace it with an Execute Pipeline activity".into(),
                    "Pass values through pipeline parameters".into(),
                ],
                commands: vec![],
            },
            RuleId::BatchCountExceeded | RuleId::BatchCountNearLimit => Self {
                action: "Lower batchCount".into(),
                steps: vec![
                    "The platform caps parallel ForEach iterations at 50".into(),
                    "Leave headroom for throttling on the sink".into(),
                ],
                commands: vec![],
            },
            RuleId::SetVariableInParallelForEach => Self {
                action: "Make the ForEach sequential or drop the SetVariable".into(),
                steps: vec![
                    "Variables are pipeline-scoped and shared by all iterations".into(),
                    "Set isSequential to true, or move the work to a child pipeline".into(),
                ],
                commands: vec![],
            },
            RuleId::UnboundedLookup => Self {
                action: "Set firstRowOnly to true".into(),
                steps: vec![
                    "Lookup output is capped at 5000 rows and 4 MB".into(),
                    "Page through larger results in a ForEach".into(),
                ],
                commands: vec![],
            },
            RuleId::TooManyActivities | RuleId::ActivitiesNearLimit => Self {
                action: "Split the pipeline".into(),
                steps: vec![
                    "Group related activities into child pipelines".into(),
                    "Call them with Execute Pipeline activities".into(),
                ],
                commands: vec![],
            },
            RuleId::TooManyParameters | RuleId::TooManyVariables => Self {
                action: "Consolidate values into objects".into(),
                steps: vec!["Pass one Object-typed parameter instead of many scalars".into()],
                commands: vec![],
            },
            RuleId::EmptyPipeline => Self {
                action: "Add activities or delete the pipeline".into(),
                steps: vec![],
                commands: vec![],
            },
            RuleId::TypeMismatch => Self {
                action: "Match the connector to the dataset".into(),
                steps: vec![
                    "Source and sink types must fit the dataset they reference".into(),
                    "Either change the connector type or point at another dataset".into(),
                ],
                commands: vec![
                    "# List compatible types:".into(),
                    "adflint rules".into(),
                ],
            },
            RuleId::BlobDependency => Self {
                action: "Make sure the file exists before deploying".into(),
                steps: vec!["Upload it to the staging container in every environment".into()],
                commands: vec![],
            },
            RuleId::UnknownDependency => Self {
                action: "Fix the dependsOn reference".into(),
                steps: vec![
                    "dependsOn can only name activities in the same list".into(),
                    "Activities inside a container cannot depend on ones outside it".into(),
                ],
                commands: vec![],
            },
            RuleId::CircularDependency => Self {
                action: "Remove circular dependency".into(),
                steps: vec![
                    "Review your activity dependencies".into(),
                    "Ensure activities form a directed acyclic graph (DAG)".into(),
                ],
                commands: vec![
                    "# Visualize your pipeline:".into(),
                    "adflint graph pipeline/<name>.json --format mermaid".into(),
                ],
            },
            RuleId::DuplicateActivityName => Self {
                action: "Give every activity a unique name".into(),
                steps: vec!["Names must be unique across the whole pipeline, nested ones included".into()],
                commands: vec![],
            },
        }
    }
}

impl std::fmt::Display for RecoverySuggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "→ {}", self.action)?;

        for step in &self.steps {
            writeln!(f, "  {}", step)?;
        }

        if !self.commands.is_empty() {
            writeln!(f)?;
            for cmd in &self.commands {
                writeln!(f, "  {}", cmd)?;
            }
        }

        Ok(())
    }
}
