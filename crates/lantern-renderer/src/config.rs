//! Renderer configuration.
//!
//! Options are fixed once a renderer is constructed. They can be built in
//! code or loaded from a TOML file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{Error, Result};

const DEFAULT_INDENTATION: usize = 2;
const DEFAULT_TICK_INTERVAL_MS: u64 = 100;
const MAX_INDENTATION: usize = 64;

/// Global options for one renderer instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RendererOptions {
    /// Spaces per nesting level
    pub indentation: usize,
    /// Erase the task list when rendering ends instead of leaving it on screen
    pub clear_output: bool,
    /// Ever expand subtasks
    pub show_subtasks: bool,
    /// Collapse the subtasks of completed parents
    pub collapse: bool,
    /// Render skipped tasks as a one-line summary
    pub collapse_skips: bool,
    /// Repaint period in milliseconds
    pub tick_interval_ms: u64,
    /// Force ANSI colors on or off (`None` detects from the terminal)
    pub colors: Option<bool>,
    /// Force Unicode glyphs on or off (`None` detects from the terminal)
    pub unicode: Option<bool>,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            indentation: DEFAULT_INDENTATION,
            clear_output: false,
            show_subtasks: true,
            collapse: true,
            collapse_skips: true,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            colors: None,
            unicode: None,
        }
    }
}

impl RendererOptions {
    /// Parses options from TOML source; missing keys take their defaults.
    ///
    /// # Errors
    /// Returns an error if the source is not valid TOML, contains unknown
    /// keys, or holds out-of-range values.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let options: Self = toml::from_str(source)?;
        options.validate()?;
        Ok(options)
    }

    /// Loads options from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    /// Returns [`Error::Config`] when the repaint interval is zero or the
    /// indentation is wider than 64 columns.
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(Error::Config(
                "tick_interval_ms must be greater than zero".to_owned(),
            ));
        }
        if self.indentation > MAX_INDENTATION {
            return Err(Error::Config(format!(
                "indentation must be at most {MAX_INDENTATION}, got {}",
                self.indentation
            )));
        }
        Ok(())
    }

    /// Repaint period
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
