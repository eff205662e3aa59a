// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 adflint contributors

//! Explain command - describe a rule

use miette::Result;

use crate::errors::{EducationalMessage, RecoverySuggestion};
use crate::report::RuleId;

/// Run the explain command
pub fn run(rule: &str) -> Result<()> {
    let rule: RuleId = rule.parse()?;

    println!("{}", EducationalMessage::for_rule(rule));
    println!("How to fix:");
    print!("{}", RecoverySuggestion::for_rule(rule));

    Ok(())
}
