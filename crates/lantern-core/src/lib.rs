//! Core task types for the lantern task-list renderer.
//!
//! The renderer never drives tasks itself. It reads them through the
//! [`TaskNode`] capability trait, while an external engine mutates them.
//! [`Task`] is a thread-safe handle implementing that contract.
#![cfg_attr(
    test,
    allow(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::missing_panics_doc,
        reason = "Allow for tests"
    )
)]

/// Shared task handle mutated by an execution engine.
pub mod handle;
/// Per-task render options.
pub mod options;
/// Task identity, lifecycle state and the capability trait.
pub mod task;

pub use handle::Task;
pub use options::{BottomBar, TaskRenderOptions};
pub use task::{TaskId, TaskNode, TaskState};
