use core::result::Result as CoreResult;
use std::io::Error as IoError;

use thiserror::Error;
use toml::de::Error as TomlError;

/// Result type for renderer operations.
pub type Result<T> = CoreResult<T, Error>;

/// Errors surfaced by the renderer.
///
/// Walking the task tree never fails; everything here comes from the
/// terminal, the configuration file or the async runtime.
#[derive(Debug, Error)]
pub enum Error {
    /// The redraw primitive or a config file read failed.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// The configuration file is not valid TOML for [`crate::RendererOptions`].
    #[error("TOML deserialization error: {0}")]
    Toml(#[from] TomlError),

    /// Configuration values are out of range.
    #[error("Configuration error: {0}")]
    Config(String),

    /// `render()` was called outside a Tokio runtime.
    #[error("No Tokio runtime available to drive the repaint loop")]
    NoRuntime,

    /// A thread panicked while holding the renderer state.
    #[error("Renderer state lock poisoned")]
    StatePoisoned,

    /// The repaint task panicked or was cancelled.
    #[error("Repaint task failed: {0}")]
    Join(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_display() {
        let config = Error::Config("tick_interval_ms must be positive".to_owned());
        assert_eq!(
            config.to_string(),
            "Configuration error: tick_interval_ms must be positive"
        );
        assert_eq!(
            Error::NoRuntime.to_string(),
            "No Tokio runtime available to drive the repaint loop"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_error = io::Error::new(io::ErrorKind::BrokenPipe, "terminal gone");
        let error: Error = io_error.into();
        assert!(matches!(error, Error::Io(_)));
    }

    #[test]
    fn test_error_from_toml() {
        let toml_error = toml::from_str::<toml::Table>("= broken").unwrap_err();
        let error: Error = toml_error.into();
        assert!(matches!(error, Error::Toml(_)));
    }
}
