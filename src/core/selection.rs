//! List and diff-pane view models plus the selection memory used across rescans.
//!
//! A rescan rebuilds list contents from scratch, so rows carry no identity beyond
//! their path string. [`SelectionSnapshot`] records selected paths and the focused
//! path before the rebuild and maps them back onto whatever rows those paths occupy
//! afterwards. Duplicate paths resolve to the first matching row.

use std::collections::BTreeSet;

/// Selectable list of paths, the headless counterpart of a list widget
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListView {
    items: Vec<String>,
    selected: BTreeSet<usize>,
    current: Option<usize>,
}

impl ListView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents; selection and focus do not survive
    pub fn set_items(&mut self, items: Vec<String>) {
        self.items = items;
        self.selected.clear();
        self.current = None;
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Single click: select only `row` and focus it
    pub fn click(&mut self, row: usize) -> bool {
        if row >= self.items.len() {
            return false;
        }
        self.selected.clear();
        self.selected.insert(row);
        self.current = Some(row);
        true
    }

    /// Extend the selection without moving focus
    pub fn select_row(&mut self, row: usize) -> bool {
        if row >= self.items.len() {
            return false;
        }
        self.selected.insert(row);
        true
    }

    /// Select several rows and focus the first of them
    pub fn select_rows(&mut self, rows: &[usize]) {
        self.clear_selection();
        for &row in rows {
            self.select_row(row);
        }
        self.current = rows.iter().copied().find(|row| *row < self.items.len());
    }

    pub fn set_current(&mut self, row: usize) -> bool {
        if row >= self.items.len() {
            return false;
        }
        self.current = Some(row);
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
        self.current = None;
    }

    pub fn selected_rows(&self) -> Vec<usize> {
        self.selected.iter().copied().collect()
    }

    pub fn selected_items(&self) -> Vec<String> {
        self.selected
            .iter()
            .filter_map(|&row| self.items.get(row).cloned())
            .collect()
    }

    pub fn has_selection(&self) -> bool {
        !self.selected.is_empty()
    }

    /// Focused row, only when it is also selected
    pub fn focused_row(&self) -> Option<usize> {
        self.current.filter(|row| self.selected.contains(row))
    }

    pub fn focused_item(&self) -> Option<&str> {
        self.focused_row()
            .and_then(|row| self.items.get(row))
            .map(String::as_str)
    }

    pub fn position_of(&self, path: &str) -> Option<usize> {
        self.items.iter().position(|item| item == path)
    }
}

/// What a list looked like before a rescan, keyed by path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSnapshot {
    pub previous_items: Vec<String>,
    pub focused_item: Option<String>,
}

/// Result of mapping a snapshot back onto a rebuilt list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Restored {
    pub any_selected: bool,
    pub focused_row: Option<usize>,
}

impl SelectionSnapshot {
    pub fn capture(list: &ListView) -> Self {
        Self {
            previous_items: list.selected_items(),
            focused_item: list.focused_item().map(str::to_string),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.previous_items.is_empty() && self.focused_item.is_none()
    }

    /// Reselect remembered paths that still exist and refocus the focused one
    pub fn restore(&self, list: &mut ListView) -> Restored {
        let mut restored = Restored::default();
        for item in &self.previous_items {
            if let Some(row) = list.position_of(item) {
                restored.any_selected |= list.select_row(row);
            }
        }
        if !restored.any_selected {
            return restored;
        }
        if let Some(row) = self
            .focused_item
            .as_deref()
            .and_then(|item| list.position_of(item))
        {
            list.set_current(row);
            restored.focused_row = Some(row);
        }
        restored
    }
}

/// Text pane showing a diff or summary, with cursor, line selection and scroll
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffPane {
    text: String,
    info: String,
    scroll_offset: usize,
    cursor_line: usize,
    selection: Option<(usize, usize)>,
}

impl DiffPane {
    /// Show new content; cursor, selection and scroll reset to the top
    pub fn set_display(&mut self, text: impl Into<String>, info: impl Into<String>) {
        self.text = text.into();
        self.info = info.into();
        self.scroll_offset = 0;
        self.cursor_line = 0;
        self.selection = None;
    }

    pub fn clear(&mut self) {
        self.set_display(String::new(), String::new());
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn info(&self) -> &str {
        &self.info
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn scroll_to(&mut self, offset: usize) {
        self.scroll_offset = offset.min(self.line_count().saturating_sub(1));
    }

    pub fn cursor_line(&self) -> usize {
        self.cursor_line
    }

    pub fn place_cursor(&mut self, line: usize) {
        self.cursor_line = line;
        self.selection = None;
    }

    /// Select an inclusive line range; the cursor ends on the last line
    pub fn select_lines(&mut self, start: usize, end: usize) {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        self.selection = Some((start, end));
        self.cursor_line = end;
    }

    pub fn selection(&self) -> Option<(usize, usize)> {
        self.selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> ListView {
        let mut list = ListView::new();
        list.set_items(items.iter().map(|s| s.to_string()).collect());
        list
    }

    #[test]
    fn test_click_selects_and_focuses() {
        let mut view = list(&["a", "b", "c"]);
        assert!(view.click(1));
        assert_eq!(view.focused_item(), Some("b"));
        assert_eq!(view.selected_items(), vec!["b"]);
        assert!(!view.click(7));
    }

    #[test]
    fn test_restore_follows_paths_not_rows() {
        let mut view = list(&["a", "b", "c"]);
        view.select_rows(&[2, 0]);
        let snapshot = SelectionSnapshot::capture(&view);
        assert_eq!(snapshot.focused_item.as_deref(), Some("c"));

        view.set_items(vec!["c".into(), "x".into(), "a".into()]);
        let restored = snapshot.restore(&mut view);

        assert!(restored.any_selected);
        assert_eq!(restored.focused_row, Some(0));
        assert_eq!(view.selected_items(), vec!["c", "a"]);
        assert_eq!(view.focused_item(), Some("c"));
    }

    #[test]
    fn test_vanished_focus_becomes_none() {
        let mut view = list(&["a", "b"]);
        view.select_rows(&[1, 0]);
        let snapshot = SelectionSnapshot::capture(&view);

        view.set_items(vec!["a".into()]);
        let restored = snapshot.restore(&mut view);

        assert!(restored.any_selected);
        assert_eq!(restored.focused_row, None);
        assert_eq!(view.focused_item(), None);
        assert_eq!(view.selected_items(), vec!["a"]);
    }

    #[test]
    fn test_duplicate_paths_select_first_match() {
        let mut view = list(&["dup"]);
        view.click(0);
        let snapshot = SelectionSnapshot::capture(&view);

        view.set_items(vec!["other".into(), "dup".into(), "dup".into()]);
        let restored = snapshot.restore(&mut view);

        assert_eq!(restored.focused_row, Some(1));
        assert_eq!(view.selected_rows(), vec![1]);
    }

    #[test]
    fn test_empty_snapshot_restores_nothing() {
        let view = list(&["a"]);
        let snapshot = SelectionSnapshot::capture(&view);
        assert!(snapshot.is_empty());

        let mut rebuilt = list(&["a"]);
        assert_eq!(snapshot.restore(&mut rebuilt), Restored::default());
    }

    #[test]
    fn test_focus_requires_selection() {
        let mut view = list(&["a", "b"]);
        view.set_current(1);
        assert_eq!(view.focused_item(), None);
    }

    #[test]
    fn test_diff_pane_resets_on_new_display() {
        let mut pane = DiffPane::default();
        pane.set_display("one\ntwo\nthree\n", "Modified, not staged");
        pane.scroll_to(2);
        pane.select_lines(2, 1);
        assert_eq!(pane.selection(), Some((1, 2)));
        assert_eq!(pane.cursor_line(), 2);

        pane.set_display("four\n", "Staged for commit");
        assert_eq!(pane.scroll_offset(), 0);
        assert_eq!(pane.selection(), None);
    }

    #[test]
    fn test_scroll_is_clamped_to_content() {
        let mut pane = DiffPane::default();
        pane.set_display("a\nb\n", "");
        pane.scroll_to(40);
        assert_eq!(pane.scroll_offset(), 1);
    }
}
