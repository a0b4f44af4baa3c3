//! Status and diff colouring for terminal output.
//!
//! # Public API
//! - [`get_status_color_style`]: Get color function for a git status
//! - [`get_aligned_status`]: Get properly aligned colored status text
//! - [`get_colored_path`]: Apply status color to file paths
//! - [`format_row`]: Complete numbered list row
//! - [`color_diff_line`]: Colour one line of a unified diff
//!
//! # Color Scheme
//! - **Modified**: Yellow for both staged and unstaged modifications
//! - **Added**: Green for new files in index
//! - **Deleted**: Red for removed files
//! - **Renamed/Copied**: Blue for file operations
//! - **Untracked**: Cyan for new untracked files
//! - **Unmerged**: Red bold for conflict resolution needed

use crate::core::git_status::GitStatus;
use colored::*;

/// Returns a closure that colours any text the way `status` is coloured
pub fn get_status_color_style(status: GitStatus) -> Box<dyn Fn(&str) -> ColoredString> {
    match status {
        GitStatus::Modified => Box::new(|text: &str| text.yellow()),
        GitStatus::Untracked => Box::new(|text: &str| text.cyan()),
        GitStatus::Deleted => Box::new(|text: &str| text.red()),
        GitStatus::Added => Box::new(|text: &str| text.green()),
        GitStatus::Renamed => Box::new(|text: &str| text.blue()),
        GitStatus::Copied => Box::new(|text: &str| text.blue()),
        GitStatus::TypeChanged => Box::new(|text: &str| text.magenta()),
        GitStatus::Unmerged => Box::new(|text: &str| text.red().bold()),
    }
}

/// Colored status symbol padded to two columns
pub fn get_aligned_status(status: GitStatus) -> ColoredString {
    let color_fn = get_status_color_style(status);
    let status_str = status.as_str();
    match status_str {
        s if s.len() == 2 => color_fn(status_str),
        _ => color_fn(&format!("{status_str} ")),
    }
}

pub fn get_colored_path(status: GitStatus, path: &str) -> ColoredString {
    let color_fn = get_status_color_style(status);
    color_fn(path)
}

/// `[n] XY path` line of a numbered file list; `row` is one-based
pub fn format_row(row: usize, status: Option<GitStatus>, path: &str) -> String {
    let row_colored = format!("[{row}]").cyan().bold();
    match status {
        Some(status) => format!(
            "{} {} {}",
            row_colored,
            get_aligned_status(status),
            get_colored_path(status, path)
        ),
        None => format!("{row_colored}    {path}"),
    }
}

/// Colour a diff line by its first character
pub fn color_diff_line(line: &str) -> ColoredString {
    if line.starts_with("+++") || line.starts_with("---") {
        line.bold()
    } else if line.starts_with('+') {
        line.green()
    } else if line.starts_with('-') {
        line.red()
    } else if line.starts_with("@@") {
        line.cyan()
    } else {
        line.normal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_row_contains_parts() {
        let result = format_row(1, Some(GitStatus::Modified), "src/main.rs");
        assert!(result.contains("[1]"));
        assert!(result.contains("M"));
        assert!(result.contains("src/main.rs"));
    }

    #[test]
    fn test_format_row_without_status() {
        let result = format_row(12, None, "notes.txt");
        assert!(result.contains("[12]"));
        assert!(result.contains("notes.txt"));
    }

    #[test]
    fn test_get_aligned_status() {
        let result_m = get_aligned_status(GitStatus::Modified);
        assert!(result_m.to_string().contains("M "));

        let result_untracked = get_aligned_status(GitStatus::Untracked);
        assert!(result_untracked.to_string().contains("??"));
        assert!(!result_untracked.to_string().contains("?? "));
    }

    #[test]
    fn test_color_diff_line_keeps_text() {
        for line in ["+added", "-removed", "@@ -1 +1 @@", " context", "--- a/x"] {
            assert!(color_diff_line(line).to_string().contains(line));
        }
    }
}
