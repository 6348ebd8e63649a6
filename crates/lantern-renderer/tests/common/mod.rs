//! Shared helpers for lantern-renderer integration tests
#![cfg_attr(
    test,
    allow(
        dead_code,
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::missing_panics_doc,
        clippy::missing_errors_doc,
        clippy::tests_outside_test_module,
        reason = "Test allows"
    )
)]

use lantern_core::{Task, TaskState};
use lantern_renderer::style::{Figures, Palette};
use lantern_renderer::{FrameDriver, MemorySurface, Overlays, RendererOptions, TreeRenderer};
use std::env;
use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests (idempotent).
/// Honors `RUST_LOG` if set, otherwise defaults to "trace".
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = env::var("RUST_LOG").unwrap_or_else(|_| "trace".to_owned());
        if fmt()
            .with_env_filter(EnvFilter::new(filter))
            .with_test_writer()
            .try_init()
            .is_err()
        {
            // another test binary installed a subscriber already
        }
    });
}

/// Titled task already in `state`
pub fn task(title: &str, state: TaskState) -> Task {
    let task = Task::titled(title);
    task.set_state(state);
    task
}

/// Untitled task already in `state`
pub fn untitled(state: TaskState) -> Task {
    let task = Task::untitled();
    task.set_state(state);
    task
}

/// Tree renderer with Unicode glyphs and no colors
pub fn renderer(options: &RendererOptions) -> TreeRenderer {
    TreeRenderer::with_style(options, Figures::UNICODE, Palette::plain())
}

/// Renders one tick and returns the tree lines, empty when nothing is visible
pub fn tick(renderer: &mut TreeRenderer, tasks: &[Task], overlays: &mut Overlays) -> Vec<String> {
    renderer
        .render_tick(tasks, None, overlays)
        .unwrap_or_default()
}

/// Renders a single tick with fresh overlays
pub fn render_once(options: &RendererOptions, tasks: &[Task]) -> Vec<String> {
    tick(&mut renderer(options), tasks, &mut Overlays::default())
}

/// Driver over `tasks` drawing on a recording surface
pub fn driver(
    tasks: Vec<Task>,
    options: &RendererOptions,
) -> (FrameDriver<Task, MemorySurface>, MemorySurface) {
    init_tracing();
    let surface = MemorySurface::new();
    let driver = FrameDriver::with_renderer(tasks, options, renderer(options), surface.clone())
        .expect("Failed to create driver");
    (driver, surface)
}

/// Owned lines from string literals
pub fn lines(values: &[&str]) -> Vec<String> {
    values.iter().map(|&value| value.to_owned()).collect()
}
