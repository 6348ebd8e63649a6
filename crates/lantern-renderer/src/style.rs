//! Formatting primitives: glyphs, colors, indentation and truncation.

use console::{Term, colors_enabled, measure_text_width, style, truncate_str};

const ELLIPSIS: &str = "…";

/// Named glyphs used as task icons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Figures {
    /// Completed task
    pub tick: &'static str,
    /// Failed task without subtasks
    pub cross: &'static str,
    /// Completed with failed subtasks, or skipped without collapsing
    pub warning: &'static str,
    /// Parent with visible subtasks
    pub pointer: &'static str,
    /// Plain output line
    pub pointer_small: &'static str,
    /// Skipped task
    pub arrow_down: &'static str,
    /// Waiting or halted task
    pub square_small_filled: &'static str,
    /// Prompt task
    pub question_mark_prefix: &'static str,
}

impl Figures {
    /// Glyphs for terminals with Unicode support
    pub const UNICODE: Self = Self {
        tick: "✔",
        cross: "✖",
        warning: "⚠",
        pointer: "❯",
        pointer_small: "›",
        arrow_down: "↓",
        square_small_filled: "◼",
        question_mark_prefix: "?",
    };

    /// Fallback glyphs for legacy consoles
    pub const FALLBACK: Self = Self {
        tick: "√",
        cross: "×",
        warning: "‼",
        pointer: ">",
        pointer_small: "»",
        arrow_down: "↓",
        square_small_filled: "■",
        question_mark_prefix: "？",
    };

    /// Picks the glyph set, detecting terminal support when `unicode` is `None`
    pub fn select(unicode: Option<bool>) -> Self {
        let wants_unicode = unicode.unwrap_or_else(|| Term::stdout().features().wants_emoji());
        if wants_unicode {
            Self::UNICODE
        } else {
            Self::FALLBACK
        }
    }
}

/// Applies ANSI colors when enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    /// Creates a palette, detecting color support when `colors` is `None`
    pub fn new(colors: Option<bool>) -> Self {
        Self {
            enabled: colors.unwrap_or_else(colors_enabled),
        }
    }

    /// Palette that never emits escape codes
    pub fn plain() -> Self {
        Self { enabled: false }
    }

    /// Green text
    pub fn green(self, text: &str) -> String {
        style(text).green().force_styling(self.enabled).to_string()
    }

    /// Red text
    pub fn red(self, text: &str) -> String {
        style(text).red().force_styling(self.enabled).to_string()
    }

    /// Yellow text
    pub fn yellow(self, text: &str) -> String {
        style(text).yellow().force_styling(self.enabled).to_string()
    }

    /// Bright yellow text
    pub fn yellow_bright(self, text: &str) -> String {
        style(text)
            .yellow()
            .bright()
            .force_styling(self.enabled)
            .to_string()
    }

    /// Cyan text
    pub fn cyan(self, text: &str) -> String {
        style(text).cyan().force_styling(self.enabled).to_string()
    }

    /// Dimmed text
    pub fn dim(self, text: &str) -> String {
        style(text).dim().force_styling(self.enabled).to_string()
    }
}

/// Indents every non-blank line by `spaces`
pub fn indent(text: &str, spaces: usize) -> String {
    if spaces == 0 {
        return text.to_owned();
    }
    let padding = " ".repeat(spaces);
    text.split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                line.to_owned()
            } else {
                format!("{padding}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Clips text to `width` columns, ignoring ANSI escapes; `None` never clips
pub fn truncate(text: &str, width: Option<usize>) -> String {
    match width {
        Some(columns) if measure_text_width(text) > columns => {
            truncate_str(text, columns, ELLIPSIS).into_owned()
        }
        _ => text.to_owned(),
    }
}
