// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 adflint contributors

//! Educational rule explanations
//!
//! Longer background for each rule, shown by `adflint explain <rule>`.

use crate::report::RuleId;
use crate::rules::tables::{
    LOOKUP_MAX_MB, LOOKUP_MAX_ROWS, MAX_ACTIVITIES, MAX_BATCH_COUNT, MAX_PARAMETERS,
    MAX_VARIABLES, STAGING_DATASET, WARN_ACTIVITIES, WARN_BATCH_COUNT,
};

const DOCS: &str = "https://learn.microsoft.com/azure/data-factory";

/// Educational message with explanation and examples
#[derive(Debug, Clone)]
pub struct EducationalMessage {
    /// Short summary of the issue
    pub summary: String,
    /// Detailed explanation
    pub explanation: String,
    /// Example of correct usage
    pub example: Option<String>,
    /// Link to documentation
    pub docs_url: Option<String>,
}

impl EducationalMessage {
    /// Explanation of `rule`
    pub fn for_rule(rule: RuleId) -> Self {
        let summary = format!("{} ({}, {})", rule.summary(), rule, rule.severity());
        let (explanation, example, page) = match rule {
            RuleId::ParseFailure => (
                "The file is not valid JSON, or it lacks a field every document needs.\n\
                 Each activity must have a name and a type. The rest of the run\n\
                 continues without this document."
                    .to_string(),
                None,
                None,
            ),
            RuleId::BlobFolderWithoutFile => (
                "A file-format dataset on Azure Blob Storage sets folderPath but neither\n\
                 fileName nor wildcardFileName. Copy activities reading it pick up every\n\
                 file in the folder, which is rarely intended."
                    .to_string(),
                Some(
                    "\"location\": {\n  \
                       \"type\": \"AzureBlobStorageLocation\",\n  \
                       \"folderPath\": \"landing/orders\",\n  \
                       \"fileName\": \"orders.csv\"\n\
                     }"
                    .to_string(),
                ),
                Some("connector-azure-blob-storage"),
            ),
            RuleId::MissingFileSystem => (
                "AzureBlobFSLocation names the ADLS Gen2 container in fileSystem.\n\
                 Without it the dataset cannot be resolved at run time."
                    .to_string(),
                None,
                Some("connector-azure-data-lake-storage"),
            ),
            RuleId::DuplicateDataset => (
                "Two dataset files declare the same name. The first one loaded (by\n\
                 file name order) is used; the other is ignored."
                    .to_string(),
                None,
                None,
            ),
            RuleId::NestingViolation => (
                "Data Factory restricts which control-flow activities can contain each\n\
                 other:\n  \
                 • ForEach and Until cannot contain ForEach or Until\n  \
                 • IfCondition and Switch cannot contain IfCondition or Switch\n  \
                 • Validation cannot contain any of them\n\n\
                 Loop restrictions also hold through branches: a ForEach inside an\n\
                 IfCondition inside a ForEach is rejected.\n\n\
                 The usual fix is an Execute Pipeline activity calling a child pipeline\n\
                 that holds the inner loop or branch."
                    .to_string(),
                Some(
                    "{\n  \
                       \"name\": \"ForEachFile\",\n  \
                       \"type\": \"ForEach\",\n  \
                       \"typeProperties\": {\n    \
                         \"activities\": [\n      \
                           { \"name\": \"ProcessFile\", \"type\": \"ExecutePipeline\" }\n    \
                         ]\n  \
                       }\n\
                     }"
                    .to_string(),
                ),
                Some("concepts-nested-activities"),
            ),
            RuleId::BatchCountExceeded | RuleId::BatchCountNearLimit => (
                format!(
                    "A parallel ForEach runs at most {} iterations at once. batchCount\n\
                     above that is rejected on deployment. With --strict, values above\n\
                     {} are also flagged.",
                    MAX_BATCH_COUNT, WARN_BATCH_COUNT
                ),
                Some("\"typeProperties\": { \"isSequential\": false, \"batchCount\": 20 }".into()),
                Some("control-flow-for-each-activity"),
            ),
            RuleId::SetVariableInParallelForEach => (
                "Pipeline variables are shared by all iterations of a ForEach. When the\n\
                 loop runs in parallel, SetVariable calls race and the final value is\n\
                 whichever iteration wrote last."
                    .to_string(),
                Some("\"typeProperties\": { \"isSequential\": true, \"activities\": [ ... ] }".into()),
                Some("control-flow-set-variable-activity"),
            ),
            RuleId::UnboundedLookup => (
                format!(
                    "A Lookup without firstRowOnly returns every row, up to {} rows or\n\
                     {} MB. Larger results fail the activity.",
                    LOOKUP_MAX_ROWS, LOOKUP_MAX_MB
                ),
                Some("\"typeProperties\": { \"firstRowOnly\": true, ... }".into()),
                Some("control-flow-lookup-activity"),
            ),
            RuleId::TooManyActivities | RuleId::ActivitiesNearLimit => (
                format!(
                    "A pipeline can hold at most {} activities, nested ones included.\n\
                     Pipelines above {} are reported as close to the limit.",
                    MAX_ACTIVITIES, WARN_ACTIVITIES
                ),
                None,
                Some("concepts-pipelines-activities"),
            ),
            RuleId::TooManyParameters | RuleId::TooManyVariables => (
                format!(
                    "A pipeline can declare at most {} parameters and {} variables.",
                    MAX_PARAMETERS, MAX_VARIABLES
                ),
                None,
                Some("concepts-pipelines-activities"),
            ),
            RuleId::EmptyPipeline => (
                "The pipeline has no activities. It deploys but does nothing.".to_string(),
                None,
                None,
            ),
            RuleId::TypeMismatch => (
                "Each Copy source and sink type works with a fixed set of dataset types.\n\
                 The source is checked against the first input dataset and the sink\n\
                 against the first output dataset. Run 'adflint rules' for the table."
                    .to_string(),
                Some(
                    "\"inputs\": [{ \"referenceName\": \"DS_Orders_Csv\" }],\n\
                     \"typeProperties\": { \"source\": { \"type\": \"DelimitedTextSource\" } }"
                        .to_string(),
                ),
                Some("copy-activity-overview"),
            ),
            RuleId::BlobDependency => (
                format!(
                    "A Copy activity reads {} with a literal path only to attach\n\
                     additionalColumns. The file content is not used, but the file must\n\
                     exist or the activity fails.",
                    STAGING_DATASET
                ),
                None,
                Some("copy-activity-overview#add-additional-columns-during-copy"),
            ),
            RuleId::UnknownDependency => (
                "dependsOn resolves only against activities in the same list. An\n\
                 activity inside a ForEach cannot depend on one outside it."
                    .to_string(),
                None,
                Some("concepts-pipelines-activities#activity-dependency"),
            ),
            RuleId::CircularDependency => (
                "Activities that depend on each other in a loop can never start.\n\
                 Data Factory rejects the pipeline on deployment."
                    .to_string(),
                None,
                Some("concepts-pipelines-activities#activity-dependency"),
            ),
            RuleId::DuplicateActivityName => (
                "Activity names identify outputs in expressions such as\n\
                 @activity('Name').output, so they must be unique in a pipeline."
                    .to_string(),
                None,
                None,
            ),
        };

        Self {
            summary,
            explanation,
            example,
            docs_url: page.map(|p| format!("{}/{}", DOCS, p)),
        }
    }
}

impl std::fmt::Display for EducationalMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.summary)?;
        writeln!(f)?;
        writeln!(f, "{}", self.explanation)?;

        if let Some(ref example) = self.example {
            writeln!(f)?;
            writeln!(f, "Example:")?;
            writeln!(f, "────────")?;
            writeln!(f, "{}", example)?;
        }

        if let Some(ref url) = self.docs_url {
            writeln!(f)?;
            writeln!(f, "Learn more: {}", url)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_names_rule() {
        let msg = EducationalMessage::for_rule(RuleId::NestingViolation);
        assert!(msg.summary.contains("nesting-violation"));
        assert!(msg.summary.contains("error"));
        assert!(msg.explanation.contains("Execute Pipeline"));
    }

    #[test]
    fn test_docs_url() {
        let msg = EducationalMessage::for_rule(RuleId::UnboundedLookup);
        assert_eq!(
            msg.docs_url.as_deref(),
            Some("https://learn.microsoft.com/azure/data-factory/control-flow-lookup-activity")
        );
        assert!(msg.explanation.contains("5000"));
    }

    #[test]
    fn test_display_sections() {
        let text = EducationalMessage::for_rule(RuleId::BlobFolderWithoutFile).to_string();
        assert!(text.contains("Example:"));
        assert!(text.contains("Learn more:"));

        let text = EducationalMessage::for_rule(RuleId::EmptyPipeline).to_string();
        assert!(!text.contains("Learn more:"));
    }
}
