// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 adflint contributors

//! Validate command - check pipelines and datasets

use colored::Colorize;
use miette::Result;
use std::path::PathBuf;

use super::OutputFormat;
use crate::config::LintConfig;
use crate::errors::RecoverySuggestion;
use crate::report::{ValidationIssue, ValidationReport};
use crate::utils::{self, create_progress_bar};
use crate::validator::Validator;

/// Run the validate command
pub fn run(
    pipelines: Option<PathBuf>,
    datasets: Option<PathBuf>,
    strict: bool,
    format: OutputFormat,
    verbose: bool,
) -> Result<()> {
    let cwd = std::env::current_dir()
        .map_err(|e| miette::miette!("Failed to get current directory: {}", e))?;
    let config = LintConfig::load(&cwd)?.with_overrides(pipelines, datasets, strict);
    tracing::debug!("Using configuration: {:?}", config);

    let validator = Validator::new(config.strict);

    let report = match format {
        OutputFormat::Text => {
            let pb = create_progress_bar(0, "Validating pipelines");
            let report = validator.run_with_progress(
                &config.pipelines,
                &config.datasets,
                |done, total| {
                    pb.set_length(total as u64);
                    pb.set_position(done as u64);
                },
            );
            pb.finish_and_clear();

            let report = report?;
            print_text_report(&report, verbose);
            report
        }
        OutputFormat::Json => {
            let report = validator.run(&config.pipelines, &config.datasets)?;
            println!("{}", report.to_json()?);
            report
        }
    };

    if report.has_errors() {
        Err(miette::miette!(
            "Validation failed with {} error(s)",
            report.errors
        ))
    } else {
        Ok(())
    }
}

fn print_text_report(report: &ValidationReport, verbose: bool) {
    utils::print_header("ADF Validation Report");

    let errors: Vec<&ValidationIssue> = report.errors().collect();
    if !errors.is_empty() {
        utils::print_section(&format!("{} ({})", "Errors".red(), errors.len()));
        for issue in &errors {
            print_issue(issue, verbose);
        }
    }

    let warnings: Vec<&ValidationIssue> = report.warnings().collect();
    if !warnings.is_empty() {
        utils::print_section(&format!("{} ({})", "Warnings".yellow(), warnings.len()));
        for issue in &warnings {
            print_issue(issue, verbose);
        }
    }

    if !report.blob_dependencies.is_empty() {
        utils::print_section("Blob dependencies");
        for path in &report.blob_dependencies {
            utils::print_bullet(&utils::code(path).to_string());
        }
    }

    utils::print_section("Summary");
    println!("  Datasets checked:  {}", report.datasets_checked);
    println!("  Pipelines checked: {}", report.pipelines_checked);
    println!("  Errors:            {}", report.errors);
    println!("  Warnings:          {}", report.warnings);
    println!();

    if report.has_errors() {
        println!("{}", "Validation failed.".red().bold());
    } else if report.warnings > 0 {
        println!("{}", "Validation passed with warnings.".yellow().bold());
    } else {
        println!("{}", utils::success("All checks passed!").bold());
    }
}

fn print_issue(issue: &ValidationIssue, verbose: bool) {
    let line = issue.to_string();
    if issue.is_error() {
        utils::print_error(&line);
    } else {
        utils::print_warning(&line);
    }

    if verbose {
        if let Some(ref file) = issue.file {
            println!("      {}", utils::dimmed(&file.display().to_string()));
        }
        for line in RecoverySuggestion::for_rule(issue.rule).to_string().lines() {
            println!("      {}", line);
        }
    }
}
