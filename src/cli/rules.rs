// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 adflint contributors

//! Rules command - list rules, limits and type mappings

use colored::Colorize;
use miette::Result;

use crate::report::RuleId;
use crate::rules::tables;
use crate::utils;

/// Run the rules command
pub fn run(verbose: bool) -> Result<()> {
    utils::print_header("adflint rules");

    utils::print_section("Rules");
    for rule in RuleId::ALL {
        println!(
            "  {:<34} {:<8} {}",
            utils::code(rule.id()),
            utils::severity(rule.severity()),
            rule.summary()
        );
    }

    utils::print_section("Nesting restrictions");
    for (parent, children) in tables::NESTING_RULES {
        utils::print_bullet(&format!("{} cannot contain {}", parent.bold(), children.join(", ")));
    }
    utils::print_bullet(&format!(
        "{} restrictions also apply through IfCondition and Switch branches",
        tables::TRANSITIVE_PARENTS.join(", ")
    ));

    utils::print_section("Limits");
    utils::print_bullet(&format!(
        "Activities per pipeline: {} (warning above {})",
        tables::MAX_ACTIVITIES,
        tables::WARN_ACTIVITIES
    ));
    utils::print_bullet(&format!("Parameters per pipeline: {}", tables::MAX_PARAMETERS));
    utils::print_bullet(&format!("Variables per pipeline: {}", tables::MAX_VARIABLES));
    utils::print_bullet(&format!(
        "ForEach batchCount: {} (strict warning above {})",
        tables::MAX_BATCH_COUNT,
        tables::WARN_BATCH_COUNT
    ));
    utils::print_bullet(&format!(
        "Lookup without firstRowOnly: {} rows / {} MB",
        tables::LOOKUP_MAX_ROWS,
        tables::LOOKUP_MAX_MB
    ));

    if verbose {
        utils::print_section("Copy connector types");
        for (connector, datasets) in tables::TYPE_COMPATIBILITY {
            println!("  {:<36} {}", connector, utils::dimmed(&datasets.join(", ")));
        }
    } else {
        println!();
        println!(
            "{}",
            utils::dimmed("Run with --verbose to list Copy connector type mappings.")
        );
    }

    println!();
    println!(
        "{}",
        utils::dimmed("Run 'adflint explain <rule>' for details on a rule.")
    );

    Ok(())
}
