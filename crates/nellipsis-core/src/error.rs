//! Error types shared by every Nested Ellipsis crate

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Error types organized by layer
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Content Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Markup error: {message}")]
    Markup { message: String },

    // ─────────────────────────────────────────────────────────────
    // Measurement Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Measurement surface is not attached")]
    Detached,

    #[error("Measurement failed: {message}")]
    Measure { message: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid configuration: {message}")]
    ConfigInvalid { message: String },

    // ─────────────────────────────────────────────────────────────
    // Terminal/TUI Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Terminal error: {message}")]
    Terminal { message: String },

    #[error("Failed to initialize terminal: {0}")]
    TerminalInit(String),

    #[error("File watcher error: {message}")]
    Watcher { message: String },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn markup(message: impl Into<String>) -> Self {
        Self::Markup {
            message: message.into(),
        }
    }

    pub fn measure(message: impl Into<String>) -> Self {
        Self::Measure {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            message: message.into(),
        }
    }

    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }

    pub fn watcher(message: impl Into<String>) -> Self {
        Self::Watcher {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error
    ///
    /// A recoverable error leaves the last committed render on screen; the
    /// next trigger simply tries again.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Detached | Error::Measure { .. } | Error::Markup { .. } | Error::Watcher { .. }
        )
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = Error::markup("unexpected end of input");
        assert_eq!(err.to_string(), "Markup error: unexpected end of input");

        let err = Error::Detached;
        assert!(err.to_string().contains("not attached"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_config_errors_are_not_recoverable() {
        let err = Error::ConfigNotFound {
            path: PathBuf::from("/test/.nellipsis/config.toml"),
        };
        assert!(err.to_string().contains("/test/.nellipsis/config.toml"));
        assert!(!err.is_recoverable());
        assert!(!Error::config_invalid("bad key").is_recoverable());
    }

    #[test]
    fn test_error_is_recoverable() {
        assert!(Error::Detached.is_recoverable());
        assert!(Error::measure("layout failed").is_recoverable());
        assert!(Error::watcher("inotify limit").is_recoverable());
        assert!(!Error::TerminalInit("no tty".into()).is_recoverable());
    }

    #[test]
    fn test_error_constructors() {
        let _ = Error::markup("test");
        let _ = Error::measure("test");
        let _ = Error::config("test");
        let _ = Error::config_invalid("test");
        let _ = Error::terminal("test");
        let _ = Error::watcher("test");
    }

    #[test]
    fn test_context_preserves_error() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let err = result.context("reading content").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
