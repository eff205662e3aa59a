// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 adflint contributors

//! Graph command - visualize a pipeline's activities as a graph

use miette::Result;
use std::path::PathBuf;

use super::GraphFormat;
use crate::loader;
use crate::pipeline::PipelineDocument;
use crate::rules::ActivityGraph;

/// Run the graph command
///
/// Only the top-level activity list is drawn; nested activities are
/// summarized in text output.
pub fn run(pipeline_path: PathBuf, format: GraphFormat, verbose: bool) -> Result<()> {
    if !pipeline_path.is_file() {
        return Err(miette::miette!(
            "Pipeline file not found: {}",
            pipeline_path.display()
        ));
    }

    let pipeline: PipelineDocument = loader::load_document(&pipeline_path)?;
    let graph = ActivityGraph::build(&pipeline.activities);

    let output = match format {
        GraphFormat::Text => graph.to_text(),
        GraphFormat::Dot => graph.to_dot(),
        GraphFormat::Mermaid => graph.to_mermaid(),
    };

    if verbose {
        for cycle in graph.cycles() {
            eprintln!("Circular dependency: {}", cycle.join(" → "));
        }
    }

    print!("{}", output);

    Ok(())
}
