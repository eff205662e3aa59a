// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 adflint contributors

//! Static rule tables
//!
//! Rules are data: adding a nesting restriction or a connector mapping is
//! an edit to one of these tables, never to the checkers.

/// Maximum top-level activities per pipeline
pub const MAX_ACTIVITIES: usize = 120;
/// Activity count above which a warning is raised
pub const WARN_ACTIVITIES: usize = 100;
pub const MAX_PARAMETERS: usize = 50;
pub const MAX_VARIABLES: usize = 50;

/// Maximum ForEach `batchCount`
pub const MAX_BATCH_COUNT: i64 = 50;
/// `batchCount` above which strict mode warns
pub const WARN_BATCH_COUNT: i64 = 30;

/// Platform cap on a Lookup that returns all rows
pub const LOOKUP_MAX_ROWS: usize = 5000;
pub const LOOKUP_MAX_MB: usize = 4;

/// Parent activity type → child types it cannot contain directly
pub const NESTING_RULES: &[(&str, &[&str])] = &[
    ("ForEach", &["ForEach", "Until"]),
    ("Until", &["ForEach", "Until"]),
    ("IfCondition", &["IfCondition", "Switch"]),
    ("Switch", &["IfCondition", "Switch"]),
    ("Validation", &["ForEach", "Until", "IfCondition", "Switch"]),
];

/// Parents whose restrictions also apply through intermediate branches
/// (ForEach > IfCondition > ForEach is rejected like ForEach > ForEach)
pub const TRANSITIVE_PARENTS: &[&str] = &["ForEach", "Until", "Validation"];

/// Child types forbidden under `parent_type` (empty when unrestricted)
pub fn forbidden_children(parent_type: &str) -> &'static [&'static str] {
    NESTING_RULES
        .iter()
        .find(|(parent, _)| *parent == parent_type)
        .map(|(_, children)| *children)
        .unwrap_or(&[])
}

pub fn is_forbidden_nesting(parent_type: &str, child_type: &str) -> bool {
    forbidden_children(parent_type).contains(&child_type)
}

/// Copy source/sink type → dataset types it can read or write
pub const TYPE_COMPATIBILITY: &[(&str, &[&str])] = &[
    // File formats
    ("DelimitedTextSource", &["DelimitedText"]),
    ("DelimitedTextSink", &["DelimitedText"]),
    ("JsonSource", &["Json"]),
    ("JsonSink", &["Json"]),
    ("ParquetSource", &["Parquet"]),
    ("ParquetSink", &["Parquet"]),
    ("AvroSource", &["Avro"]),
    ("AvroSink", &["Avro"]),
    ("OrcSource", &["Orc"]),
    ("OrcSink", &["Orc"]),
    ("XmlSource", &["Xml"]),
    ("ExcelSource", &["Excel"]),
    ("BinarySource", &["Binary"]),
    ("BinarySink", &["Binary"]),
    // Databases
    ("AzureSqlSource", &["AzureSqlTable"]),
    ("AzureSqlSink", &["AzureSqlTable"]),
    ("SqlServerSource", &["SqlServerTable"]),
    ("SqlServerSink", &["SqlServerTable"]),
    ("SqlDWSource", &["AzureSqlDWTable"]),
    ("SqlDWSink", &["AzureSqlDWTable"]),
    ("AzureMySqlSource", &["AzureMySqlTable"]),
    ("AzurePostgreSqlSource", &["AzurePostgreSqlTable"]),
    ("CosmosDbSqlApiSource", &["CosmosDbSqlApiCollection"]),
    ("CosmosDbSqlApiSink", &["CosmosDbSqlApiCollection"]),
    ("AzureTableSource", &["AzureTable"]),
    ("AzureTableSink", &["AzureTable"]),
    // Services
    ("RestSource", &["RestResource"]),
    ("RestSink", &["RestResource"]),
    ("ODataSource", &["ODataResource"]),
];

/// Dataset types accepted by a connector, `None` when the connector is unmapped
pub fn compatible_dataset_types(connector_type: &str) -> Option<&'static [&'static str]> {
    TYPE_COMPATIBILITY
        .iter()
        .find(|(connector, _)| *connector == connector_type)
        .map(|(_, datasets)| *datasets)
}

/// Blob storage location type
pub const BLOB_LOCATION: &str = "AzureBlobStorageLocation";
/// ADLS Gen2 location type
pub const ADLS_GEN2_LOCATION: &str = "AzureBlobFSLocation";

/// Dataset formats that resolve to individual files
pub const FILE_FORMATS: &[&str] = &["DelimitedText", "Json", "Xml", "Parquet", "Avro", "Orc"];

/// Staging dataset whose literal `path` marks an implicit blob dependency
pub const STAGING_DATASET: &str = "Blob_Staging";
