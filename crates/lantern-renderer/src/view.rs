use lantern_core::{TaskId, TaskNode, TaskRenderOptions, TaskState};

/// Fields of a task read once per visit.
///
/// The engine may change a task while a tick is in progress; reading every
/// field up front keeps all decisions for one task within a tick consistent.
#[derive(Debug, Clone)]
pub struct TaskView<T> {
    /// Task identity
    pub id: TaskId,
    /// Display title
    pub title: Option<String>,
    /// Lifecycle state
    pub state: TaskState,
    /// Latest output
    pub output: Option<String>,
    /// Interactive prompt flag
    pub prompt: bool,
    /// Whether failing siblings halt this task
    pub exit_on_error: bool,
    /// Per-task render overrides
    pub options: TaskRenderOptions,
    /// Child tasks
    pub subtasks: Vec<T>,
}

impl<T: TaskNode> TaskView<T> {
    /// Snapshots a task
    pub fn read(task: &T) -> Self {
        Self {
            id: task.id(),
            title: task.title(),
            state: task.state(),
            output: task.output(),
            prompt: task.is_prompt(),
            exit_on_error: task.exit_on_error(),
            options: task.render_options(),
            subtasks: task.subtasks(),
        }
    }

    /// Whether the task is running
    pub fn is_pending(&self) -> bool {
        self.state == TaskState::Pending
    }

    /// Whether the task owns subtasks
    pub fn has_subtasks(&self) -> bool {
        !self.subtasks.is_empty()
    }

    /// Whether any direct subtask failed
    pub fn any_subtask_failed(&self) -> bool {
        self.subtasks.iter().any(TaskNode::has_failed)
    }

    /// Whether any direct subtask sets its own `collapse` option to `value`
    pub fn any_subtask_collapse(&self, value: bool) -> bool {
        self.subtasks
            .iter()
            .any(|subtask| subtask.collapse_override() == Some(value))
    }

    /// Output split into its non-empty lines; empty when there is no output
    pub fn output_lines(&self) -> Vec<&str> {
        self.output
            .as_deref()
            .map(|output| output.split('\n').filter(|line| !line.is_empty()).collect())
            .unwrap_or_default()
    }

    /// Whether there is any output to route
    pub fn has_output(&self) -> bool {
        self.output.as_deref().is_some_and(|output| !output.is_empty())
    }
}
