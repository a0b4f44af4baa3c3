//! Unified diff parsing and patch construction.
//!
//! The diff pane shows the raw output of `git diff` for one file. [`UnifiedDiff`]
//! splits that text into the file header and its hunks while remembering which
//! display line every diff line came from, so a cursor position or a selected line
//! range in the pane maps straight back onto hunk lines.
//!
//! Patches come in three scopes (see [`PatchScope`]): the hunk under the cursor, the
//! change lines inside a selected range, or the whole file. Partial patches are
//! rewritten per direction of application:
//!
//! - forward: unselected `-` lines turn into context, unselected `+` lines are dropped
//! - reverse: unselected `+` lines turn into context, unselected `-` lines are dropped
//!
//! Hunk headers are recounted after the rewrite.

use crate::core::error::{Result, StagehandError};
use std::fmt::Write;

/// Which part of the displayed diff a patch covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchScope {
    /// Hunk containing the given display line
    Hunk { line: usize },
    /// Change lines inside the inclusive display range
    Lines { start: usize, end: usize },
    WholeFile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Context,
    Added,
    Removed,
    /// `\ No newline at end of file`
    NoNewline,
}

impl LineKind {
    fn prefix(&self) -> char {
        match self {
            LineKind::Context => ' ',
            LineKind::Added => '+',
            LineKind::Removed => '-',
            LineKind::NoNewline => '\\',
        }
    }

    fn is_change(&self) -> bool {
        matches!(self, LineKind::Added | LineKind::Removed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub kind: LineKind,
    /// Text after the one-character prefix
    pub content: String,
    /// Position of this line in the displayed diff
    pub display_line: usize,
}

impl DiffLine {
    fn render(&self, kind: LineKind) -> String {
        format!("{}{}", kind.prefix(), self.content)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    pub old_start: usize,
    pub old_count: usize,
    pub new_start: usize,
    pub new_count: usize,
    /// Function context git prints after the closing `@@`
    pub section: String,
    /// Display line of the `@@` header
    pub header_line: usize,
    pub lines: Vec<DiffLine>,
}

impl Hunk {
    fn last_line(&self) -> usize {
        self.lines
            .last()
            .map(|line| line.display_line)
            .unwrap_or(self.header_line)
    }

    pub fn contains(&self, display_line: usize) -> bool {
        (self.header_line..=self.last_line()).contains(&display_line)
    }

    fn header(&self) -> String {
        format_header(
            self.old_start,
            self.old_count,
            self.new_start,
            self.new_count,
            &self.section,
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnifiedDiff {
    /// `diff --git`, `index`, mode lines and the `---`/`+++` pair
    pub header: Vec<String>,
    pub hunks: Vec<Hunk>,
}

impl UnifiedDiff {
    pub fn parse(text: &str) -> Result<Self> {
        let mut diff = UnifiedDiff::default();

        for (index, raw) in text.lines().enumerate() {
            if raw.starts_with("@@") {
                let hunk = parse_hunk_header(raw, index).ok_or(StagehandError::MissingDiffHeader)?;
                diff.hunks.push(hunk);
                continue;
            }
            let Some(hunk) = diff.hunks.last_mut() else {
                diff.header.push(raw.to_string());
                continue;
            };
            let kind = match raw.chars().next() {
                Some('+') => LineKind::Added,
                Some('-') => LineKind::Removed,
                Some('\\') => LineKind::NoNewline,
                Some(' ') | None => LineKind::Context,
                // A second file section starts; stagehand only patches single files
                Some(_) => break,
            };
            hunk.lines.push(DiffLine {
                kind,
                content: raw.get(1..).unwrap_or_default().to_string(),
                display_line: index,
            });
        }

        let has_file_header = diff.header.iter().any(|line| line.starts_with("--- "))
            && diff.header.iter().any(|line| line.starts_with("+++ "));
        if !diff.hunks.is_empty() && !has_file_header {
            return Err(StagehandError::MissingDiffHeader);
        }
        Ok(diff)
    }

    pub fn is_empty(&self) -> bool {
        self.hunks.is_empty()
    }

    pub fn hunk_at(&self, display_line: usize) -> Option<&Hunk> {
        self.hunks.iter().find(|hunk| hunk.contains(display_line))
    }

    /// Build a patch for `scope`; `None` when the scope selects no change
    pub fn patch(&self, scope: PatchScope, reverse: bool) -> Result<Option<String>> {
        match scope {
            PatchScope::Hunk { line } => {
                let hunk = self
                    .hunk_at(line)
                    .ok_or(StagehandError::NoHunkAtLine { line })?;
                Ok(Some(self.render(std::iter::once(hunk))))
            }
            PatchScope::WholeFile => {
                if self.hunks.is_empty() {
                    return Ok(None);
                }
                Ok(Some(self.render(self.hunks.iter())))
            }
            PatchScope::Lines { start, end } => {
                let (start, end) = if start <= end { (start, end) } else { (end, start) };
                Ok(self.selected_lines_patch(start, end, reverse))
            }
        }
    }

    fn render<'a>(&self, hunks: impl Iterator<Item = &'a Hunk>) -> String {
        let mut patch = self.header_text();
        for hunk in hunks {
            let _ = writeln!(patch, "{}", hunk.header());
            for line in &hunk.lines {
                let _ = writeln!(patch, "{}", line.render(line.kind));
            }
        }
        patch
    }

    fn header_text(&self) -> String {
        let mut text = String::new();
        for line in &self.header {
            let _ = writeln!(text, "{line}");
        }
        text
    }

    /// Path named by the non-null side of the `---`/`+++` pair
    fn path(&self) -> Option<&str> {
        self.header.iter().find_map(|line| {
            line.strip_prefix("+++ b/")
                .or_else(|| line.strip_prefix("--- a/"))
        })
    }

    fn creates_or_deletes(&self) -> bool {
        self.header
            .iter()
            .any(|line| line.starts_with("new file mode") || line.starts_with("deleted file mode"))
    }

    /// Header for a partial patch. A partial patch of a created or deleted file
    /// leaves content on both sides, so it is written as a plain modification.
    fn partial_header_text(&self) -> String {
        let Some(path) = self.path().filter(|_| self.creates_or_deletes()) else {
            return self.header_text();
        };
        let mut text = String::new();
        for line in &self.header {
            if line.starts_with("new file mode")
                || line.starts_with("deleted file mode")
                || line.starts_with("index ")
            {
                continue;
            }
            let _ = match line.as_str() {
                "--- /dev/null" => writeln!(text, "--- a/{path}"),
                "+++ /dev/null" => writeln!(text, "+++ b/{path}"),
                _ => writeln!(text, "{line}"),
            };
        }
        text
    }

    fn selected_lines_patch(&self, start: usize, end: usize, reverse: bool) -> Option<String> {
        let selected = |line: &DiffLine| (start..=end).contains(&line.display_line);
        let mut patch = self.partial_header_text();
        let mut emitted = false;
        // Net line shift introduced by earlier hunks of this patch
        let mut offset: isize = 0;

        for hunk in &self.hunks {
            if !hunk.lines.iter().any(|line| line.kind.is_change() && selected(line)) {
                continue;
            }

            let mut body = Vec::new();
            let mut kept_previous = false;
            for line in &hunk.lines {
                let kind = match (line.kind, selected(line), reverse) {
                    (LineKind::NoNewline, _, _) => {
                        if kept_previous {
                            body.push(line.render(LineKind::NoNewline));
                        }
                        continue;
                    }
                    (LineKind::Context, _, _) => Some(LineKind::Context),
                    (kind, true, _) => Some(kind),
                    (LineKind::Removed, false, false) => Some(LineKind::Context),
                    (LineKind::Added, false, false) => None,
                    (LineKind::Added, false, true) => Some(LineKind::Context),
                    (LineKind::Removed, false, true) => None,
                };
                kept_previous = kind.is_some();
                if let Some(kind) = kind {
                    body.push(line.render(kind));
                }
            }

            let old_count = count_side(&body, '-');
            let new_count = count_side(&body, '+');
            let (old_start, new_start) = if reverse {
                let new_start = hunk.new_start;
                (shift(new_start, -offset), new_start)
            } else {
                let old_start = hunk.old_start;
                (old_start, shift(old_start, offset))
            };
            offset += new_count as isize - old_count as isize;

            let _ = writeln!(
                patch,
                "{}",
                format_header(old_start, old_count, new_start, new_count, &hunk.section)
            );
            for line in body {
                let _ = writeln!(patch, "{line}");
            }
            emitted = true;
        }

        emitted.then_some(patch)
    }
}

fn shift(start: usize, offset: isize) -> usize {
    start.saturating_add_signed(offset)
}

/// Lines present on one side: context plus lines carrying `side`
fn count_side(body: &[String], side: char) -> usize {
    body.iter()
        .filter(|line| line.starts_with(' ') || line.starts_with(side))
        .count()
}

fn format_header(old_start: usize, old_count: usize, new_start: usize, new_count: usize, section: &str) -> String {
    format!("@@ -{old_start},{old_count} +{new_start},{new_count} @@{section}")
}

/// Parse `@@ -l[,s] +l[,s] @@ section`
fn parse_hunk_header(line: &str, header_line: usize) -> Option<Hunk> {
    let rest = line.strip_prefix("@@ ")?;
    let close = rest.find(" @@")?;
    let ranges = &rest[..close];
    let section = rest[close + 3..].to_string();

    let mut parts = ranges.split_whitespace();
    let (old_start, old_count) = parse_range(parts.next()?.strip_prefix('-')?)?;
    let (new_start, new_count) = parse_range(parts.next()?.strip_prefix('+')?)?;

    Some(Hunk {
        old_start,
        old_count,
        new_start,
        new_count,
        section,
        header_line,
        lines: Vec::new(),
    })
}

fn parse_range(range: &str) -> Option<(usize, usize)> {
    match range.split_once(',') {
        Some((start, count)) => Some((start.parse().ok()?, count.parse().ok()?)),
        None => Some((range.parse().ok()?, 1)),
    }
}
