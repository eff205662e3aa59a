// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 adflint contributors

//! adflint - Azure Data Factory pipeline validator

use clap::Parser;
use miette::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use adflint::cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "adflint=debug"
    } else {
        "adflint=warn"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    if !adflint::utils::should_use_colors() {
        colored::control::set_override(false);
    }

    // Change to specified directory if provided
    if let Some(ref dir) = cli.directory {
        std::env::set_current_dir(dir).map_err(|e| {
            miette::miette!("Failed to change to directory '{}': {}", dir.display(), e)
        })?;
    }

    match cli.command {
        Commands::Validate {
            pipelines,
            datasets,
            strict,
            format,
        } => adflint::cli::validate::run(pipelines, datasets, strict, format, cli.verbose),
        Commands::Rules => adflint::cli::rules::run(cli.verbose),
        Commands::Explain { rule } => adflint::cli::explain::run(&rule),
        Commands::Graph { pipeline, format } => {
            adflint::cli::graph::run(pipeline, format, cli.verbose)
        }
    }
}
