//! Bottom-bar output retention.
//!
//! Tasks routed to the bottom bar keep their most recent distinct output
//! lines here across ticks. Each entry is trimmed to its capacity when a
//! snapshot is taken and removed when its task finishes.

use lantern_core::{BottomBar, TaskId};
use tracing::trace;

#[derive(Debug)]
struct BottomBarEntry {
    task: TaskId,
    lines: Vec<String>,
    capacity: usize,
}

/// Retained bottom-bar lines, in entry creation order
#[derive(Debug, Default)]
pub struct BottomBarStore {
    entries: Vec<BottomBarEntry>,
}

impl BottomBarStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the lines not already retained for `task`.
    ///
    /// The entry is created on first use with a capacity taken from `hint`;
    /// later hints are ignored.
    pub fn append(&mut self, task: TaskId, lines: Vec<String>, hint: BottomBar) {
        let index = if let Some(index) = self.position(task) {
            index
        } else {
            trace!(%task, capacity = hint.capacity(), "Creating bottom bar entry");
            self.entries.push(BottomBarEntry {
                task,
                lines: Vec::new(),
                capacity: hint.capacity(),
            });
            self.entries.len() - 1
        };

        let entry = &mut self.entries[index];
        let fresh: Vec<String> = lines
            .into_iter()
            .filter(|line| !entry.lines.contains(line))
            .collect();
        entry.lines.extend(fresh);
    }

    /// Trims every entry to its capacity and returns all retained lines.
    ///
    /// The result starts with one blank separator line; `None` when no entry exists.
    pub fn snapshot(&mut self) -> Option<Vec<String>> {
        if self.entries.is_empty() {
            return None;
        }

        let mut rendered = vec![String::new()];
        for entry in &mut self.entries {
            let overflow = entry.lines.len().saturating_sub(entry.capacity);
            entry.lines.drain(..overflow);
            rendered.extend(entry.lines.iter().cloned());
        }
        Some(rendered)
    }

    /// Deletes the entry of `task`, if any
    pub fn remove(&mut self, task: TaskId) {
        if let Some(index) = self.position(task) {
            trace!(%task, "Removing bottom bar entry");
            self.entries.remove(index);
        }
    }

    /// Retained lines of `task`
    pub fn lines(&self, task: TaskId) -> Option<&[String]> {
        self.position(task)
            .map(|index| self.entries[index].lines.as_slice())
    }

    /// Whether `task` has an entry
    pub fn contains(&self, task: TaskId) -> bool {
        self.position(task).is_some()
    }

    /// Whether no entry exists
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, task: TaskId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.task == task)
    }
}
