//! Unified output formatting for the CLI front-end.
//!
//! Colors: red for errors, blue for headers and usage, bright_black for muted detail.
//! Every command prints through these helpers so log entries, errors and listings share
//! one look.

use crate::core::colors::color_diff_line;
use crate::core::log_sink::{LogEntry, LogLevel};
use colored::*;

/// Formats and prints an error message with consistent styling
///
/// # Format
/// ```text
///
/// ✕ Error: <message>
///
/// ```
pub fn print_error(message: &str) {
    println!("\n{} {}\n", "✕ Error:".red(), message.white());
}

/// Formats and prints an error with structured usage information
///
/// # Format
/// ```text
///
/// ✕ Error: <message>.
/// Usage:
///   <usage_pattern1>
///
/// Options:
///   <option1>  <description1>
///
/// ```
pub fn print_error_with_structured_usage(
    message: &str,
    usage_patterns: &[&str],
    options: &[(&str, &str)],
) {
    println!("\n{} {}.\n", "✕ Error:".red(), message.white());
    println!("{}", "Usage:".blue());

    for pattern in usage_patterns {
        println!("  {}", pattern.white());
    }

    if !options.is_empty() {
        println!("\n{}", "Options:".blue());
        for (flag, description) in options {
            println!("  {}  {}", flag.bright_black(), description.bright_black());
        }
    }

    println!();
}

pub fn print_success(message: &str) {
    println!("\n{} {}", "✓".green(), message.white());
}

pub fn print_info(message: &str) {
    println!("\n{}\n", message.white());
}

pub fn print_section_header(header: &str) {
    println!("\n{}:\n", header.white());
}

/// Print command log entries; errors in the error style, the rest muted
pub fn print_log_entries(entries: &[LogEntry]) {
    for entry in entries {
        match entry.level {
            LogLevel::Error => print_error(&entry.text),
            LogLevel::Info => println!("{}", entry.text.bright_black()),
        }
    }
}

/// Print a diff with one-based line numbers in a gutter, as hunk commands expect them
pub fn print_numbered_diff(info: &str, text: &str) {
    if !info.is_empty() {
        println!("{}", info.blue());
    }
    for (index, line) in text.lines().enumerate() {
        println!("{} {}", format!("{:>5} │", index + 1).bright_black(), color_diff_line(line));
    }
}

/// Print plain text output (diffstat, grep matches) under an optional header
pub fn print_block(info: &str, text: &str) {
    if !info.is_empty() {
        println!("{}", info.blue());
    }
    if text.trim().is_empty() {
        println!("{}", "(nothing)".bright_black());
    } else {
        println!("{}", text.trim_end());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_error_does_not_panic() {
        print_error("Test error message");
    }

    #[test]
    fn test_print_log_entries_does_not_panic() {
        print_log_entries(&[
            LogEntry {
                level: LogLevel::Info,
                text: "git version 2.43.0".to_string(),
            },
            LogEntry {
                level: LogLevel::Error,
                text: "git commit failed".to_string(),
            },
        ]);
    }

    #[test]
    fn test_print_numbered_diff_does_not_panic() {
        print_numbered_diff("Modified, not staged", "@@ -1 +1 @@\n-a\n+b\n");
        print_block("Diffstat", "");
    }
}
