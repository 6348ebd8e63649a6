use serde::{Deserialize, Serialize};

/// Whether a task routes its output to the bottom bar, and how many lines it keeps there.
///
/// Deserializes from either a boolean or a line count, so `bottom_bar = true`
/// and `bottom_bar = 3` are both accepted.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawBottomBar", into = "RawBottomBar")]
pub enum BottomBar {
    /// Output stays inline
    #[default]
    Disabled,
    /// Output goes to the bottom bar, retaining this many lines
    Lines(usize),
}

impl BottomBar {
    /// Whether output is routed to the bottom bar
    pub fn is_enabled(self) -> bool {
        matches!(self, Self::Lines(count) if count > 0)
    }

    /// Number of retained lines for a bottom-bar entry created from this option.
    ///
    /// Untitled tasks route to the bottom bar even when disabled; they keep one line.
    pub fn capacity(self) -> usize {
        match self {
            Self::Disabled | Self::Lines(0) => 1,
            Self::Lines(count) => count,
        }
    }
}

impl From<bool> for BottomBar {
    fn from(enabled: bool) -> Self {
        if enabled { Self::Lines(1) } else { Self::Disabled }
    }
}

impl From<usize> for BottomBar {
    fn from(count: usize) -> Self {
        if count == 0 {
            Self::Disabled
        } else {
            Self::Lines(count)
        }
    }
}

#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
enum RawBottomBar {
    Flag(bool),
    Count(usize),
}

impl From<RawBottomBar> for BottomBar {
    fn from(raw: RawBottomBar) -> Self {
        match raw {
            RawBottomBar::Flag(enabled) => enabled.into(),
            RawBottomBar::Count(count) => count.into(),
        }
    }
}

impl From<BottomBar> for RawBottomBar {
    fn from(option: BottomBar) -> Self {
        match option {
            BottomBar::Disabled => Self::Flag(false),
            BottomBar::Lines(count) => Self::Count(count),
        }
    }
}

/// Per-task overrides of the renderer's output handling
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskRenderOptions {
    /// Route output to the bottom bar
    pub bottom_bar: BottomBar,
    /// Keep output visible after the task finishes
    pub persistent_output: bool,
}

impl TaskRenderOptions {
    /// Options routing output to the bottom bar, retaining `lines` lines
    #[must_use]
    pub fn bottom_bar(lines: usize) -> Self {
        Self {
            bottom_bar: BottomBar::from(lines),
            ..Self::default()
        }
    }

    /// Options keeping output after completion
    #[must_use]
    pub fn persistent() -> Self {
        Self {
            persistent_output: true,
            ..Self::default()
        }
    }
}
