use crate::style;

/// Turns an icon, a text and a nesting level into one clipped display line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineFormatter {
    indentation: usize,
    width: Option<usize>,
}

impl LineFormatter {
    /// Creates a formatter; `width` of `None` never clips
    pub fn new(indentation: usize, width: Option<usize>) -> Self {
        Self { indentation, width }
    }

    /// Updates the terminal width, which may change between ticks
    pub fn set_width(&mut self, width: Option<usize>) {
        self.width = width;
    }

    /// Formats `icon text` indented by `level` steps and clipped to the width.
    ///
    /// Overflow is cut off, never wrapped.
    pub fn format(&self, text: &str, icon: &str, level: usize) -> String {
        let indented = style::indent(
            &format!("{icon} {text}"),
            level.saturating_mul(self.indentation),
        );
        style::truncate(&indented, self.width)
    }
}
