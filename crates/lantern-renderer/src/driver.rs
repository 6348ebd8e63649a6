//! Fixed-interval repaint loop.
//!
//! [`FrameDriver::render`] spawns a Tokio task that redraws the frame every
//! tick until [`FrameDriver::end`] stops it and flushes one last frame.

use lantern_core::TaskNode;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, warn};

use crate::config::RendererOptions;
use crate::error::{Error, Result};
use crate::frame::Compositor;
use crate::surface::{Surface, TermSurface};
use crate::tree::TreeRenderer;

type SharedCompositor<T, S> = Arc<Mutex<Compositor<T, S>>>;

#[derive(Debug)]
struct Ticker {
    stop: oneshot::Sender<()>,
    handle: JoinHandle<Result<()>>,
}

/// Drives repaints of a task tree onto a surface
#[derive(Debug)]
pub struct FrameDriver<T, S> {
    compositor: SharedCompositor<T, S>,
    period: Duration,
    clear_output: bool,
    ticker: Option<Ticker>,
}

impl<T: TaskNode> FrameDriver<T, TermSurface> {
    /// Creates a driver drawing on stdout.
    ///
    /// # Errors
    /// Returns [`Error::Config`] when the options are out of range.
    pub fn for_stdout(tasks: Vec<T>, options: &RendererOptions) -> Result<Self> {
        Self::new(tasks, options, TermSurface::stdout())
    }
}

impl<T: TaskNode, S: Surface> FrameDriver<T, S> {
    /// Creates a driver; glyphs and colors follow the options or the terminal.
    ///
    /// # Errors
    /// Returns [`Error::Config`] when the options are out of range.
    pub fn new(tasks: Vec<T>, options: &RendererOptions, surface: S) -> Result<Self> {
        Self::with_renderer(tasks, options, TreeRenderer::new(options), surface)
    }

    /// Creates a driver with a preconfigured tree renderer.
    ///
    /// # Errors
    /// Returns [`Error::Config`] when the options are out of range.
    pub fn with_renderer(
        tasks: Vec<T>,
        options: &RendererOptions,
        renderer: TreeRenderer,
        surface: S,
    ) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            compositor: Arc::new(Mutex::new(Compositor::with_renderer(
                tasks, renderer, surface,
            ))),
            period: options.tick_interval(),
            clear_output: options.clear_output,
            ticker: None,
        })
    }

    /// Starts repainting; does nothing when already rendering.
    ///
    /// # Errors
    /// Returns [`Error::NoRuntime`] outside a Tokio runtime, or the surface's
    /// error if the cursor cannot be hidden.
    pub fn render(&mut self) -> Result<()> {
        if self.ticker.is_some() {
            return Ok(());
        }
        let runtime = Handle::try_current().map_err(|_no_runtime| Error::NoRuntime)?;
        lock(&self.compositor)?.surface_mut().hide_cursor()?;

        let (stop, stopped) = oneshot::channel();
        let handle = runtime.spawn(repaint_loop(
            Arc::clone(&self.compositor),
            self.period,
            stopped,
        ));
        self.ticker = Some(Ticker { stop, handle });
        debug!(period = ?self.period, "Renderer started");
        Ok(())
    }

    /// Stops repainting and flushes a final frame without the prompt region.
    ///
    /// The frame is then cleared or left on screen depending on
    /// `clear_output`, and the cursor is shown again. Does nothing when not
    /// rendering.
    ///
    /// # Errors
    /// Returns the first redraw error raised by a tick or by the final flush.
    pub async fn end(&mut self) -> Result<()> {
        let Some(Ticker { stop, handle }) = self.ticker.take() else {
            return Ok(());
        };
        drop(stop.send(()));
        let looped = match handle.await {
            Ok(result) => result,
            Err(join_error) => Err(Error::Join(join_error.to_string())),
        };
        let finished = self.finish();
        debug!(
            clear_output = self.clear_output,
            failed = looped.is_err() || finished.is_err(),
            "Renderer stopped"
        );
        looped.and(finished)
    }

    /// Whether the repaint loop is running
    pub fn is_rendering(&self) -> bool {
        self.ticker.is_some()
    }

    /// Composes and draws one frame immediately, returning the line count.
    ///
    /// # Errors
    /// Returns the surface's error when the redraw fails.
    pub fn render_once(&self) -> Result<usize> {
        tick_locked(&self.compositor, true)
    }

    fn finish(&self) -> Result<()> {
        let mut compositor = lock(&self.compositor)?;
        let drawn = compositor.tick(false).map(drop);
        let surface = compositor.surface_mut();
        let finalized = if self.clear_output {
            surface.clear()
        } else {
            surface.done()
        };
        let shown = surface.show_cursor();
        debug!(clear_output = self.clear_output, "Final frame flushed");
        Ok(drawn.and(finalized).and(shown)?)
    }
}

async fn repaint_loop<T: TaskNode, S: Surface>(
    compositor: SharedCompositor<T, S>,
    period: Duration,
    mut stopped: oneshot::Receiver<()>,
) -> Result<()> {
    let mut ticks = interval(period);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            biased;
            _ = &mut stopped => return Ok(()),
            _ = ticks.tick() => {
                if let Err(error) = tick_locked(&compositor, true) {
                    warn!(%error, "Redraw failed, stopping repaint loop");
                    return Err(error);
                }
            }
        }
    }
}

fn tick_locked<T: TaskNode, S: Surface>(
    compositor: &Mutex<Compositor<T, S>>,
    include_prompt: bool,
) -> Result<usize> {
    Ok(lock(compositor)?.tick(include_prompt)?)
}

fn lock<T, S>(compositor: &Mutex<Compositor<T, S>>) -> Result<MutexGuard<'_, Compositor<T, S>>> {
    compositor.lock().map_err(|_poisoned| Error::StatePoisoned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Figures, Palette};
    use crate::surface::MemorySurface;
    use lantern_core::{Task, TaskState};

    fn driver(
        tasks: Vec<Task>,
        options: &RendererOptions,
        surface: MemorySurface,
    ) -> FrameDriver<Task, MemorySurface> {
        let renderer = TreeRenderer::with_style(options, Figures::UNICODE, Palette::plain());
        FrameDriver::with_renderer(tasks, options, renderer, surface).expect("driver")
    }

    #[test]
    fn test_invalid_options_rejected() {
        let options = RendererOptions {
            tick_interval_ms: 0,
            ..RendererOptions::default()
        };
        let result = FrameDriver::new(Vec::<Task>::new(), &options, MemorySurface::new());
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_oversized_indentation_rejected_before_rendering() {
        let options = RendererOptions {
            indentation: usize::MAX,
            ..RendererOptions::default()
        };
        let root = Task::titled("Root").with_subtask(Task::titled("Leaf"));
        let result = FrameDriver::new(vec![root], &options, MemorySurface::new());
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_render_outside_runtime() {
        let mut driver = driver(Vec::new(), &RendererOptions::default(), MemorySurface::new());
        assert!(matches!(driver.render(), Err(Error::NoRuntime)));
        assert!(!driver.is_rendering());
    }

    #[test]
    fn test_render_once_draws_synchronously() {
        let build = Task::titled("Build");
        build.set_state(TaskState::Completed);
        let surface = MemorySurface::new();
        let driver = driver(vec![build], &RendererOptions::default(), surface.clone());

        assert_eq!(driver.render_once().expect("render"), 1);
        assert_eq!(surface.last_frame().expect("frame"), ["✔ Build"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_end_without_render_is_noop() {
        let surface = MemorySurface::new();
        let mut driver = driver(Vec::new(), &RendererOptions::default(), surface.clone());
        driver.end().await.expect("end");
        assert_eq!(surface.record(), crate::surface::SurfaceRecord::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_output_clears_instead_of_done() {
        let options = RendererOptions {
            clear_output: true,
            ..RendererOptions::default()
        };
        let surface = MemorySurface::new();
        let mut driver = driver(Vec::new(), &options, surface.clone());
        driver.render().expect("render");
        driver.end().await.expect("end");

        let record = surface.record();
        assert_eq!(record.cleared, 1);
        assert_eq!(record.finalized, 0);
        assert_eq!(record.shown, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_failure_surfaces_from_end() {
        let failing = MemorySurface::failing();
        let mut driver = driver(Vec::new(), &RendererOptions::default(), failing);
        driver.render().expect("render");
        tokio::time::sleep(Duration::from_millis(250)).await;

        assert!(matches!(driver.end().await, Err(Error::Io(_))));
        assert!(!driver.is_rendering());
    }
}
