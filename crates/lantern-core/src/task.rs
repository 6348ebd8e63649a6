//! Task identity, lifecycle state and the capability contract the renderer reads.

use core::fmt;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::options::TaskRenderOptions;

/// Unique identifier for a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Creates a fresh random identifier
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Task lifecycle state, driven by the execution engine.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskState {
    /// Task is queued and has not been started yet
    #[default]
    Waiting,
    /// Task is running
    Pending,
    /// Task finished successfully
    Completed,
    /// Task finished with an error
    Failed,
    /// Task was skipped by the engine
    Skipped,
}

impl TaskState {
    /// Whether the task has reached a terminal success or failure state.
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// Read-only view of a task as the renderer needs it.
///
/// Getters return owned snapshots: the engine may mutate a task between
/// any two calls and the renderer simply reflects whatever it observes.
pub trait TaskNode: Clone + Send + Sync + 'static {
    /// Stable identity of the task
    fn id(&self) -> TaskId;

    /// Disabled tasks are skipped by the renderer entirely
    fn is_enabled(&self) -> bool;

    /// Display title, `None` for anonymous output-only tasks
    fn title(&self) -> Option<String>;

    /// Current lifecycle state
    fn state(&self) -> TaskState;

    /// Latest (possibly multi-line) output
    fn output(&self) -> Option<String>;

    /// Ordered child tasks
    fn subtasks(&self) -> Vec<Self>;

    /// Whether the task is currently an interactive prompt
    fn is_prompt(&self) -> bool;

    /// Whether a failing sibling halts this task
    fn exit_on_error(&self) -> bool {
        true
    }

    /// Bottom-bar and persistence overrides
    fn render_options(&self) -> TaskRenderOptions;

    /// The task's own `collapse` renderer option, if set
    fn collapse_override(&self) -> Option<bool> {
        None
    }

    /// Whether the task has a title line
    fn has_title(&self) -> bool {
        self.title().is_some()
    }

    /// Whether the task owns any subtasks
    fn has_subtasks(&self) -> bool {
        !self.subtasks().is_empty()
    }

    /// Whether the task is running
    fn is_pending(&self) -> bool {
        self.state() == TaskState::Pending
    }

    /// Whether the task finished successfully
    fn is_completed(&self) -> bool {
        self.state() == TaskState::Completed
    }

    /// Whether the task finished with an error
    fn has_failed(&self) -> bool {
        self.state() == TaskState::Failed
    }

    /// Whether the task was skipped
    fn is_skipped(&self) -> bool {
        self.state() == TaskState::Skipped
    }
}
