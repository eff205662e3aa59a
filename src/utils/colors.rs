// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 adflint contributors

//! Terminal color utilities
//!
//! Provides consistent color schemes across the CLI.

use colored::{ColoredString, Colorize};

use crate::report::Severity;

/// Style for success messages
pub fn success(msg: &str) -> ColoredString {
    msg.green()
}

/// Style for dimmed/secondary text
pub fn dimmed(msg: &str) -> ColoredString {
    msg.dimmed()
}

/// Style for code/commands
pub fn code(msg: &str) -> ColoredString {
    msg.cyan()
}

/// Label for a severity, colored by level
pub fn severity(level: Severity) -> ColoredString {
    match level {
        Severity::Error => "error".red().bold(),
        Severity::Warning => "warning".yellow().bold(),
    }
}

/// Check if colors should be used on stdout
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    console::Term::stdout().is_term()
}

/// Print a styled header
pub fn print_header(title: &str) {
    println!("{}", title.bold());
    println!("{}", "═".repeat(title.chars().count().max(40)));
}

/// Print a styled section
pub fn print_section(title: &str) {
    println!();
    println!("{}:", title.bold());
}

/// Print a bullet point
pub fn print_bullet(content: &str) {
    println!("  • {}", content);
}

/// Print an error cross
pub fn print_error(msg: &str) {
    println!("  {} {}", "✗".red(), msg);
}

/// Print a warning
pub fn print_warning(msg: &str) {
    println!("  {} {}", "⚠".yellow(), msg);
}
