//! Task state to icon mapping.

use lantern_core::{TaskNode, TaskState};

use crate::spinner::SpinnerStore;
use crate::style::{Figures, Palette};
use crate::view::TaskView;

/// Picks the icon for a title line or the first output line of a task
#[derive(Debug)]
pub struct SymbolResolver {
    figures: Figures,
    palette: Palette,
    spinners: SpinnerStore,
    show_subtasks: bool,
    collapse_skips: bool,
}

impl SymbolResolver {
    /// Creates a resolver
    pub fn new(figures: Figures, palette: Palette, show_subtasks: bool, collapse_skips: bool) -> Self {
        Self {
            figures,
            palette,
            spinners: SpinnerStore::new(figures == Figures::UNICODE),
            show_subtasks,
            collapse_skips,
        }
    }

    /// Palette used for icons
    pub fn palette(&self) -> Palette {
        self.palette
    }

    /// Icon of a task halted by a failing sibling
    pub fn stopped(&self) -> String {
        self.palette.red(self.figures.square_small_filled)
    }

    /// Resolves the icon; a title-line query on a running task advances its spinner.
    pub fn resolve<T: TaskNode>(&mut self, task: &TaskView<T>, data: bool) -> String {
        let figures = self.figures;
        let palette = self.palette;
        match (task.state, data) {
            (TaskState::Pending, false) => {
                if self.show_subtasks && task.has_subtasks() {
                    palette.yellow(figures.pointer)
                } else {
                    palette.yellow_bright(self.spinners.next_frame(task.id))
                }
            }
            (TaskState::Completed, false) => {
                if task.any_subtask_failed() {
                    palette.yellow(figures.warning)
                } else {
                    palette.green(figures.tick)
                }
            }
            (TaskState::Failed, false) => {
                if task.has_subtasks() {
                    palette.red(figures.pointer)
                } else {
                    palette.red(figures.cross)
                }
            }
            (TaskState::Skipped, false) if !self.collapse_skips => palette.yellow(figures.warning),
            (TaskState::Skipped, _) => palette.yellow(figures.arrow_down),
            _ if task.prompt => palette.cyan(figures.question_mark_prefix),
            (_, false) => palette.dim(figures.square_small_filled),
            (_, true) => figures.pointer_small.to_owned(),
        }
    }

    /// Starts a tick of spinner bookkeeping
    pub fn begin_tick(&mut self) {
        self.spinners.begin_tick();
    }

    /// Drops spinners of tasks that stopped running
    pub fn end_tick(&mut self) {
        self.spinners.end_tick();
    }
}
