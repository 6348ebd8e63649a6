//! Frame composition.
//!
//! A [`Frame`] is one full screen image: the task tree, then the bottom bar,
//! then the prompt region. The [`Compositor`] owns everything a tick needs
//! to produce one and push it to a [`Surface`].

use lantern_core::TaskNode;
use std::io;
use tracing::trace;

use crate::config::RendererOptions;
use crate::surface::Surface;
use crate::tree::{Overlays, TreeRenderer};

/// One composed screen image
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Task tree lines, `None` when no task is visible
    pub tasks: Option<Vec<String>>,
    /// Bottom-bar snapshot, `None` when the store is empty
    pub bottom_bar: Option<Vec<String>>,
    /// Prompt region lines, empty when no prompt is active
    pub prompt: Vec<String>,
}

impl Frame {
    /// All regions in display order
    pub fn lines(&self) -> Vec<String> {
        self.tasks
            .iter()
            .flatten()
            .chain(self.bottom_bar.iter().flatten())
            .chain(&self.prompt)
            .cloned()
            .collect()
    }
}

/// Renderer state shared by the repaint loop and the final flush
#[derive(Debug)]
pub struct Compositor<T, S> {
    tasks: Vec<T>,
    renderer: TreeRenderer,
    overlays: Overlays,
    surface: S,
}

impl<T: TaskNode, S: Surface> Compositor<T, S> {
    /// Creates a compositor over `tasks` drawing on `surface`
    pub fn new(tasks: Vec<T>, options: &RendererOptions, surface: S) -> Self {
        Self::with_renderer(tasks, TreeRenderer::new(options), surface)
    }

    /// Creates a compositor with a preconfigured tree renderer
    pub fn with_renderer(tasks: Vec<T>, renderer: TreeRenderer, surface: S) -> Self {
        Self {
            tasks,
            renderer,
            overlays: Overlays::default(),
            surface,
        }
    }

    /// Walks the tree once and collects every region.
    ///
    /// The prompt region is left out when `include_prompt` is false.
    pub fn compose(&mut self, include_prompt: bool) -> Frame {
        let width = self.surface.width();
        let tasks = self
            .renderer
            .render_tick(&self.tasks, width, &mut self.overlays);
        let bottom_bar = self.overlays.bottom_bar.snapshot();
        let prompt = if include_prompt {
            self.overlays.prompt.render()
        } else {
            Vec::new()
        };
        Frame {
            tasks,
            bottom_bar,
            prompt,
        }
    }

    /// Composes a frame and draws it, returning the number of lines drawn.
    ///
    /// # Errors
    /// Returns the surface's error when the redraw fails.
    pub fn tick(&mut self, include_prompt: bool) -> io::Result<usize> {
        let lines = self.compose(include_prompt).lines();
        trace!(lines = lines.len(), "Drawing frame");
        self.surface.draw(&lines)?;
        Ok(lines.len())
    }

    /// Bottom bar and prompt state carried between ticks
    pub fn overlays(&self) -> &Overlays {
        &self.overlays
    }

    /// Redraw target
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
