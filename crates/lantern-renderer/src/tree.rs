//! Task tree walk and visibility rules.
//!
//! Each tick the tree is walked in document order. For every enabled task
//! the walk emits a title line, routes its output (prompt region, bottom bar,
//! inline or nowhere), expands its subtasks when the collapse rules allow it,
//! and finally cleans up the overlays of finished tasks.

use lantern_core::{TaskNode, TaskState};

use crate::bottom_bar::BottomBarStore;
use crate::config::RendererOptions;
use crate::line::LineFormatter;
use crate::prompt::PromptSlot;
use crate::style::{Figures, Palette};
use crate::symbol::SymbolResolver;
use crate::view::TaskView;

const SKIPPED_MARKER: &str = "[SKIPPED]";

/// Where a task's output goes during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputRoute {
    /// Prompt region
    Prompt,
    /// Bottom bar
    BottomBar,
    /// Inline below the title
    Inline,
    /// Not shown this tick
    Discard,
}

/// Out-of-band regions the tree walk writes to
#[derive(Debug, Default)]
pub struct Overlays {
    /// Retained bottom-bar lines
    pub bottom_bar: BottomBarStore,
    /// Current prompt output
    pub prompt: PromptSlot,
}

/// Renders the task tree into display lines
#[derive(Debug)]
pub struct TreeRenderer {
    options: RendererOptions,
    formatter: LineFormatter,
    symbols: SymbolResolver,
}

impl TreeRenderer {
    /// Creates a renderer; glyphs and colors follow the options or the terminal
    pub fn new(options: &RendererOptions) -> Self {
        Self::with_style(
            options,
            Figures::select(options.unicode),
            Palette::new(options.colors),
        )
    }

    /// Creates a renderer with explicit glyphs and colors
    pub fn with_style(options: &RendererOptions, figures: Figures, palette: Palette) -> Self {
        Self {
            options: options.clone(),
            formatter: LineFormatter::new(options.indentation, None),
            symbols: SymbolResolver::new(
                figures,
                palette,
                options.show_subtasks,
                options.collapse_skips,
            ),
        }
    }

    /// Renders one full pass over `tasks`, bracketing tick-scoped state.
    ///
    /// `width` clips every line; `None` never clips.
    pub fn render_tick<T: TaskNode>(
        &mut self,
        tasks: &[T],
        width: Option<usize>,
        overlays: &mut Overlays,
    ) -> Option<Vec<String>> {
        self.formatter.set_width(width);
        self.symbols.begin_tick();
        overlays.prompt.begin_tick();

        let lines = self.render(tasks, 0, overlays);

        overlays.prompt.end_tick();
        self.symbols.end_tick();
        lines
    }

    /// Renders sibling `tasks` at `level`; `None` when nothing is visible
    pub fn render<T: TaskNode>(
        &mut self,
        tasks: &[T],
        level: usize,
        overlays: &mut Overlays,
    ) -> Option<Vec<String>> {
        let sibling_failed = tasks.iter().any(TaskNode::has_failed);
        let mut output = Vec::new();

        for task in tasks.iter().filter(|task| task.is_enabled()) {
            let view = TaskView::read(task);

            if let Some(title) = &view.title {
                let shown = self.display_title(&view, title);
                let icon = if is_halted_by_sibling(&view, sibling_failed) {
                    self.symbols.stopped()
                } else {
                    self.symbols.resolve(&view, false)
                };
                output.push(self.formatter.format(&shown, &icon, level));
            }

            if view.has_output() {
                self.route_output(&view, level, &mut output, overlays);
            }

            if should_expand_subtree(&view, &self.options) {
                let subtask_level = if view.title.is_none() { level } else { level + 1 };
                if let Some(lines) = self.render(&view.subtasks, subtask_level, overlays) {
                    output.extend(lines);
                }
            }

            if view.state.is_finished() {
                overlays.prompt.release();
                if should_drop_bottom_bar(&view) {
                    overlays.bottom_bar.remove(view.id);
                }
            }
        }

        (!output.is_empty()).then_some(output)
    }

    fn display_title<T: TaskNode>(&self, view: &TaskView<T>, title: &str) -> String {
        if view.state != TaskState::Skipped || !self.options.collapse_skips {
            return title.to_owned();
        }
        let summary = view.output_lines().last().copied().unwrap_or(title);
        format!(
            "{summary} {}",
            self.symbols.palette().dim(SKIPPED_MARKER)
        )
    }

    fn route_output<T: TaskNode>(
        &mut self,
        view: &TaskView<T>,
        level: usize,
        output: &mut Vec<String>,
        overlays: &mut Overlays,
    ) {
        match output_route(view, &self.options) {
            OutputRoute::Prompt => {
                let content = view.output.clone().unwrap_or_default();
                overlays.prompt.offer(view.id, content);
            }
            OutputRoute::BottomBar => {
                let lines = self.dump_output(view, 0);
                overlays
                    .bottom_bar
                    .append(view.id, lines, view.options.bottom_bar);
            }
            OutputRoute::Inline => output.extend(self.dump_output(view, level + 1)),
            OutputRoute::Discard => {}
        }
    }

    /// Formats output lines: the data icon on the first, a blank prefix on the rest
    fn dump_output<T: TaskNode>(&mut self, view: &TaskView<T>, level: usize) -> Vec<String> {
        let lines = view.output_lines();
        let mut dumped = Vec::with_capacity(lines.len());
        for (index, line) in lines.into_iter().enumerate() {
            let icon = if index == 0 {
                self.symbols.resolve(view, true)
            } else {
                " ".to_owned()
            };
            dumped.push(self.formatter.format(line, &icon, level));
        }
        dumped
    }
}

/// A failing sibling stopped this task before it could finish
pub fn is_halted_by_sibling<T>(view: &TaskView<T>, sibling_failed: bool) -> bool {
    sibling_failed
        && view.exit_on_error
        && !matches!(
            view.state,
            TaskState::Failed | TaskState::Completed | TaskState::Skipped
        )
}

/// Decides where output goes; the first matching rule wins.
///
/// Untitled tasks always use the bottom bar, even with persistent output.
pub fn output_route<T>(view: &TaskView<T>, options: &RendererOptions) -> OutputRoute {
    let pending = view.state == TaskState::Pending;
    if pending && view.prompt {
        OutputRoute::Prompt
    } else if view.options.bottom_bar.is_enabled() || view.title.is_none() {
        OutputRoute::BottomBar
    } else if pending
        || view.options.persistent_output
        || (view.state == TaskState::Skipped && !options.collapse_skips)
    {
        OutputRoute::Inline
    } else {
        OutputRoute::Discard
    }
}

/// Whether the subtasks of this task are rendered
pub fn should_expand_subtree<T: TaskNode>(view: &TaskView<T>, options: &RendererOptions) -> bool {
    if !options.show_subtasks || !view.has_subtasks() {
        return false;
    }
    match view.state {
        TaskState::Pending | TaskState::Failed => true,
        TaskState::Completed => {
            view.title.is_none()
                || (!options.collapse && !view.any_subtask_collapse(true))
                || view.any_subtask_collapse(false)
                || view.any_subtask_failed()
        }
        TaskState::Waiting | TaskState::Skipped => false,
    }
}

/// Whether a finished task loses its bottom-bar entry.
///
/// Only persistent tasks that did not ask for the bottom bar keep it, and
/// failed tasks never do.
pub fn should_drop_bottom_bar<T>(view: &TaskView<T>) -> bool {
    view.state == TaskState::Failed
        || !(view.options.persistent_output && !view.options.bottom_bar.is_enabled())
}
