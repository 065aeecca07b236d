//! Application error types with rich context

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Terminal/TUI Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Terminal error: {message}")]
    Terminal { message: String },

    #[error("Failed to initialize terminal: {0}")]
    TerminalInit(String),

    // ─────────────────────────────────────────────────────────────
    // Collaborator Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Analytics error: {message}")]
    Analytics { message: String },

    #[error("Navigation failed: {message}")]
    Navigation { message: String },

    #[error("Reading list error: {message}")]
    ReadingList { message: String },

    #[error("Watchlist error: {message}")]
    Watchlist { message: String },

    #[error("Collaborator error: {message}")]
    Collaborator { message: String },

    // ─────────────────────────────────────────────────────────────
    // Script/Source Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid view state script at line {line}: {message}")]
    Script { line: usize, message: String },

    #[error("Script file not found: {path}")]
    ScriptNotFound { path: PathBuf },

    #[error("Invalid page title: {message}")]
    InvalidTitle { message: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ─────────────────────────────────────────────────────────────
    // Channel/Communication Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Channel send error: {message}")]
    ChannelSend { message: String },

    #[error("Channel closed unexpectedly")]
    ChannelClosed,
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }

    pub fn analytics(message: impl Into<String>) -> Self {
        Self::Analytics {
            message: message.into(),
        }
    }

    pub fn navigation(message: impl Into<String>) -> Self {
        Self::Navigation {
            message: message.into(),
        }
    }

    pub fn reading_list(message: impl Into<String>) -> Self {
        Self::ReadingList {
            message: message.into(),
        }
    }

    pub fn watchlist(message: impl Into<String>) -> Self {
        Self::Watchlist {
            message: message.into(),
        }
    }

    pub fn collaborator(message: impl Into<String>) -> Self {
        Self::Collaborator {
            message: message.into(),
        }
    }

    pub fn script(line: usize, message: impl Into<String>) -> Self {
        Self::Script {
            line,
            message: message.into(),
        }
    }

    pub fn invalid_title(message: impl Into<String>) -> Self {
        Self::InvalidTitle {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn channel_send(message: impl Into<String>) -> Self {
        Self::ChannelSend {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error
    ///
    /// Collaborator failures are isolated to the side effect that raised them,
    /// so the preview keeps running.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Analytics { .. }
                | Error::Navigation { .. }
                | Error::ReadingList { .. }
                | Error::Watchlist { .. }
                | Error::Collaborator { .. }
                | Error::ChannelSend { .. }
                | Error::ChannelClosed
        )
    }

    /// Check if this error should trigger application exit
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::TerminalInit(_) | Error::ScriptNotFound { .. } | Error::Script { .. }
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
        let err = Error::navigation("no host");
        assert_eq!(err.to_string(), "Navigation failed: no host");

        let err = Error::script(3, "unknown state");
        assert_eq!(
            err.to_string(),
            "Invalid view state script at line 3: unknown state"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_collaborator_errors_are_recoverable() {
        assert!(Error::analytics("endpoint down").is_recoverable());
        assert!(Error::reading_list("db locked").is_recoverable());
        assert!(Error::watchlist("not logged in").is_recoverable());
        assert!(!Error::analytics("endpoint down").is_fatal());
    }

    #[test]
    fn test_error_is_fatal() {
        assert!(Error::TerminalInit("no tty".into()).is_fatal());
        assert!(Error::ScriptNotFound {
            path: PathBuf::from("/missing.ndjson")
        }
        .is_fatal());
        assert!(!Error::config("bad units").is_fatal());
    }

    #[test]
    fn test_context_preserves_error() {
        let res: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let err = res.context("reading script").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
