//! Thread-safe task handle.
//!
//! The execution engine owns the lifecycle of a [`Task`] and mutates it from
//! any thread; the renderer only reads it through [`TaskNode`].

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::options::TaskRenderOptions;
use crate::task::{TaskId, TaskNode, TaskState};

#[derive(Debug)]
struct TaskFields {
    title: Option<String>,
    state: TaskState,
    output: Option<String>,
    enabled: bool,
    prompt: bool,
    exit_on_error: bool,
    collapse: Option<bool>,
    options: TaskRenderOptions,
    subtasks: Vec<Task>,
}

#[derive(Debug)]
struct TaskInner {
    id: TaskId,
    fields: RwLock<TaskFields>,
}

/// Shared handle to a task; clones refer to the same task.
#[derive(Debug, Clone)]
pub struct Task {
    inner: Arc<TaskInner>,
}

impl Task {
    fn with_title(title: Option<String>) -> Self {
        Self {
            inner: Arc::new(TaskInner {
                id: TaskId::new(),
                fields: RwLock::new(TaskFields {
                    title,
                    state: TaskState::Waiting,
                    output: None,
                    enabled: true,
                    prompt: false,
                    exit_on_error: true,
                    collapse: None,
                    options: TaskRenderOptions::default(),
                    subtasks: Vec::new(),
                }),
            }),
        }
    }

    /// Creates a waiting task with a title line
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self::with_title(Some(title.into()))
    }

    /// Creates a waiting anonymous task whose output goes to the bottom bar
    #[must_use]
    pub fn untitled() -> Self {
        Self::with_title(None)
    }

    /// Appends a subtask
    #[must_use]
    pub fn with_subtask(self, subtask: Self) -> Self {
        self.push_subtask(subtask);
        self
    }

    /// Appends several subtasks in order
    #[must_use]
    pub fn with_subtasks(self, subtasks: impl IntoIterator<Item = Self>) -> Self {
        self.write().subtasks.extend(subtasks);
        self
    }

    /// Sets the per-task render options
    #[must_use]
    pub fn with_options(self, options: TaskRenderOptions) -> Self {
        self.write().options = options;
        self
    }

    /// Sets this task's own `collapse` renderer option
    #[must_use]
    pub fn with_collapse(self, collapse: bool) -> Self {
        self.write().collapse = Some(collapse);
        self
    }

    /// Sets whether a failing sibling halts this task
    #[must_use]
    pub fn with_exit_on_error(self, exit_on_error: bool) -> Self {
        self.write().exit_on_error = exit_on_error;
        self
    }

    /// Marks the task as an interactive prompt
    #[must_use]
    pub fn with_prompt(self) -> Self {
        self.set_prompt(true);
        self
    }

    /// Sets the lifecycle state
    pub fn set_state(&self, state: TaskState) {
        self.write().state = state;
    }

    /// Replaces the output
    pub fn set_output(&self, output: impl Into<String>) {
        self.write().output = Some(output.into());
    }

    /// Appends a line to the output
    pub fn append_output(&self, line: &str) {
        let mut fields = self.write();
        match fields.output.as_mut() {
            Some(output) if !output.is_empty() => {
                if !output.ends_with('\n') {
                    output.push('\n');
                }
                output.push_str(line);
            }
            _ => fields.output = Some(line.to_owned()),
        }
    }

    /// Removes the output
    pub fn clear_output(&self) {
        self.write().output = None;
    }

    /// Replaces the title
    pub fn set_title(&self, title: impl Into<String>) {
        self.write().title = Some(title.into());
    }

    /// Enables or disables the task
    pub fn set_enabled(&self, enabled: bool) {
        self.write().enabled = enabled;
    }

    /// Flags or unflags the task as an interactive prompt
    pub fn set_prompt(&self, prompt: bool) {
        self.write().prompt = prompt;
    }

    /// Appends a subtask to a task that may already be rendering
    pub fn push_subtask(&self, subtask: Self) {
        self.write().subtasks.push(subtask);
    }

    // A panic in the engine while holding the lock leaves consistent-enough
    // display data behind, so poisoning is ignored.
    fn read(&self) -> RwLockReadGuard<'_, TaskFields> {
        self.inner
            .fields
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, TaskFields> {
        self.inner
            .fields
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl TaskNode for Task {
    fn id(&self) -> TaskId {
        self.inner.id
    }

    fn is_enabled(&self) -> bool {
        self.read().enabled
    }

    fn title(&self) -> Option<String> {
        self.read().title.clone()
    }

    fn state(&self) -> TaskState {
        self.read().state
    }

    fn output(&self) -> Option<String> {
        self.read().output.clone()
    }

    fn subtasks(&self) -> Vec<Self> {
        self.read().subtasks.clone()
    }

    fn is_prompt(&self) -> bool {
        self.read().prompt
    }

    fn exit_on_error(&self) -> bool {
        self.read().exit_on_error
    }

    fn render_options(&self) -> TaskRenderOptions {
        self.read().options
    }

    fn collapse_override(&self) -> Option<bool> {
        self.read().collapse
    }

    fn has_subtasks(&self) -> bool {
        !self.read().subtasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::BottomBar;
    use std::thread;

    #[test]
    fn test_builder_defaults() {
        let task = Task::titled("Build");
        assert_eq!(task.title().as_deref(), Some("Build"));
        assert_eq!(task.state(), TaskState::Waiting);
        assert!(task.is_enabled());
        assert!(task.exit_on_error());
        assert!(!task.is_prompt());
        assert!(task.output().is_none());
        assert!(!task.has_subtasks());
        assert_eq!(task.collapse_override(), None);
    }

    #[test]
    fn test_untitled_has_no_title() {
        let task = Task::untitled();
        assert!(!task.has_title());
    }

    #[test]
    fn test_clones_share_state() {
        let task = Task::titled("Deploy");
        let engine_side = task.clone();
        engine_side.set_state(TaskState::Pending);
        engine_side.set_output("uploading");

        assert!(task.is_pending());
        assert_eq!(task.output().as_deref(), Some("uploading"));
        assert_eq!(task.id(), engine_side.id());
    }

    #[test]
    fn test_append_output() {
        let task = Task::titled("Stream");
        task.append_output("one");
        task.append_output("two");
        assert_eq!(task.output().as_deref(), Some("one\ntwo"));

        task.clear_output();
        task.append_output("three");
        assert_eq!(task.output().as_deref(), Some("three"));
    }

    #[test]
    fn test_subtasks_keep_order() {
        let parent = Task::titled("Parent")
            .with_subtask(Task::titled("First"))
            .with_subtasks([Task::titled("Second"), Task::titled("Third")]);
        let titles: Vec<_> = parent
            .subtasks()
            .iter()
            .filter_map(TaskNode::title)
            .collect();
        assert_eq!(titles, ["First", "Second", "Third"]);
    }

    #[test]
    fn test_options_and_overrides() {
        let task = Task::titled("Download")
            .with_options(TaskRenderOptions::bottom_bar(3))
            .with_collapse(false)
            .with_exit_on_error(false)
            .with_prompt();
        assert_eq!(task.render_options().bottom_bar, BottomBar::Lines(3));
        assert_eq!(task.collapse_override(), Some(false));
        assert!(!task.exit_on_error());
        assert!(task.is_prompt());
    }

    #[test]
    fn test_mutation_from_another_thread() {
        let task = Task::titled("Concurrent");
        let engine_side = task.clone();
        let worker = thread::spawn(move || {
            engine_side.set_state(TaskState::Completed);
            engine_side.push_subtask(Task::titled("Late child"));
        });
        worker.join().expect("Engine thread panicked");

        assert!(task.is_completed());
        assert!(task.has_subtasks());
    }
}
