//! Terminal renderer for task lists.
//!
//! On every tick the [`FrameDriver`] walks a concurrently mutated task tree,
//! decides what is visible, and redraws the whole screen region in place:
//! the indented task tree, a bottom bar of retained output lines and a
//! prompt region for interactive tasks.
#![cfg_attr(
    test,
    allow(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::missing_panics_doc,
        clippy::missing_errors_doc,
        reason = "Allow for tests"
    )
)]

/// Bottom-bar output retention
pub mod bottom_bar;
/// Renderer configuration
pub mod config;
/// Frame driver with start/stop lifecycle
pub mod driver;
/// Error types and result definitions
pub mod error;
/// Frame composition
pub mod frame;
/// Single-line formatting
pub mod line;
/// Prompt region holder
pub mod prompt;
/// Spinner animation state
pub mod spinner;
/// Redraw primitives
pub mod surface;
/// Glyphs, colors and text primitives
pub mod style;
/// Task state to icon mapping
pub mod symbol;
/// Task tree walk and visibility rules
pub mod tree;
/// Per-tick snapshot of a task
pub mod view;

pub use bottom_bar::BottomBarStore;
pub use config::RendererOptions;
pub use driver::FrameDriver;
pub use error::{Error, Result};
pub use frame::{Compositor, Frame};
pub use line::LineFormatter;
pub use prompt::PromptSlot;
pub use surface::{MemorySurface, Surface, TermSurface};
pub use symbol::SymbolResolver;
pub use tree::{Overlays, TreeRenderer};
