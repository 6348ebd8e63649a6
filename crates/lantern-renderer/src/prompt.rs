use lantern_core::TaskId;

/// Holds the output of the running prompt task, if any.
///
/// The tree pass brackets itself with [`begin_tick`](Self::begin_tick) and
/// [`end_tick`](Self::end_tick). Content not offered again during a tick
/// belongs to a task that has left the pending state and is dropped.
#[derive(Debug, Default)]
pub struct PromptSlot {
    current: Option<(TaskId, String)>,
    offered: bool,
}

impl PromptSlot {
    /// Creates an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a tree pass
    pub fn begin_tick(&mut self) {
        self.offered = false;
    }

    /// Stores the output of a pending prompt task
    pub fn offer(&mut self, task: TaskId, content: String) {
        self.current = Some((task, content));
        self.offered = true;
    }

    /// Called for every finished task; clears content not refreshed this tick
    pub fn release(&mut self) {
        if !self.offered {
            self.current = None;
        }
    }

    /// Ends a tree pass, dropping stale content
    pub fn end_tick(&mut self) {
        self.release();
    }

    /// Current prompt text
    pub fn content(&self) -> Option<&str> {
        self.current.as_ref().map(|(_, content)| content.as_str())
    }

    /// Task owning the current prompt text
    pub fn owner(&self) -> Option<TaskId> {
        self.current.as_ref().map(|&(task, _)| task)
    }

    /// Lines of the prompt region: a blank separator, then the prompt text
    pub fn render(&self) -> Vec<String> {
        self.content().map_or_else(Vec::new, |content| {
            let mut lines = vec![String::new()];
            lines.extend(content.split('\n').map(str::to_owned));
            lines
        })
    }
}
