use std::collections::{HashMap, HashSet};

use lantern_core::TaskId;

const UNICODE_FRAMES: &[&str] = &["◜", "◠", "◝", "◞", "◡", "◟"];
const FALLBACK_FRAMES: &[&str] = &["-", "\\", "|", "/"];

/// Animation cursor for one task
#[derive(Debug, Clone, Copy)]
pub struct Spinner {
    frames: &'static [&'static str],
    index: usize,
}

impl Spinner {
    /// Creates a spinner at its first frame
    pub fn new(unicode: bool) -> Self {
        Self {
            frames: if unicode { UNICODE_FRAMES } else { FALLBACK_FRAMES },
            index: 0,
        }
    }

    /// Returns the current frame and advances by one step
    pub fn next_frame(&mut self) -> &'static str {
        let frame = self.frames[self.index % self.frames.len()];
        self.index = (self.index + 1) % self.frames.len();
        frame
    }
}

/// Renderer-owned spinners keyed by task, so tasks never carry animation state
#[derive(Debug, Default)]
pub struct SpinnerStore {
    unicode: bool,
    spinners: HashMap<TaskId, Spinner>,
    seen: HashSet<TaskId>,
}

impl SpinnerStore {
    /// Creates an empty store
    pub fn new(unicode: bool) -> Self {
        Self {
            unicode,
            ..Self::default()
        }
    }

    /// Advances the task's spinner, creating it on first use
    pub fn next_frame(&mut self, task: TaskId) -> &'static str {
        self.seen.insert(task);
        let unicode = self.unicode;
        self.spinners
            .entry(task)
            .or_insert_with(|| Spinner::new(unicode))
            .next_frame()
    }

    /// Forgets which spinners were used
    pub fn begin_tick(&mut self) {
        self.seen.clear();
    }

    /// Drops spinners of tasks that did not spin during the tick
    pub fn end_tick(&mut self) {
        let seen = &self.seen;
        self.spinners.retain(|task, _| seen.contains(task));
    }

    /// Number of live spinners
    pub fn len(&self) -> usize {
        self.spinners.len()
    }

    /// Whether no spinner is live
    pub fn is_empty(&self) -> bool {
        self.spinners.is_empty()
    }
}
