// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 adflint contributors

//! CLI command definitions and handlers
//!
//! Defines the command-line interface for adflint.

pub mod explain;
pub mod graph;
pub mod rules;
pub mod validate;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Semantic validator for Azure Data Factory pipelines
///
/// Catches deployment-time and run-time failures that schema validation misses.
#[derive(Parser, Debug)]
#[clap(
    name = "adflint",
    version,
    about = "Semantic validator for Azure Data Factory pipeline and dataset JSON",
    long_about = None,
    after_help = "Examples:\n\
        adflint validate                       Validate ./pipeline against ./dataset\n\
        adflint validate --strict              Also warn when close to platform limits\n\
        adflint explain nesting-violation      Explain a rule\n\
        adflint graph pipeline/PL_Load.json    Show activity execution order\n\n\
        See 'adflint <command> --help' for more information on a specific command."
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[clap(short, long, global = true)]
    pub verbose: bool,

    /// Change to directory before executing
    #[clap(short = 'C', long, global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate pipelines and datasets
    Validate {
        /// Pipeline directory (default: pipeline)
        #[clap(short, long, value_name = "DIR")]
        pipelines: Option<PathBuf>,

        /// Dataset directory (default: dataset)
        #[clap(short, long, value_name = "DIR")]
        datasets: Option<PathBuf>,

        /// Warn when values approach platform limits
        #[clap(long)]
        strict: bool,

        /// Output format
        #[clap(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List rules, limits and type mappings
    Rules,

    /// Explain a rule in detail
    Explain {
        /// Rule id, e.g. nesting-violation
        rule: String,
    },

    /// Show a pipeline's activities as a graph
    Graph {
        /// Pipeline JSON file
        pipeline: PathBuf,

        /// Output format
        #[clap(short, long, value_enum, default_value_t = GraphFormat::Text)]
        format: GraphFormat,
    },
}

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Graph output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GraphFormat {
    Text,
    Dot,
    Mermaid,
}
