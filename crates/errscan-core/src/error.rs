//! Error types for log scanning and sample-log generation

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Error types organized by concern
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ─────────────────────────────────────────────────────────────
    // Log File Errors
    // ─────────────────────────────────────────────────────────────
    #[error("failed to read log file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("log file {path} is not valid UTF-8 text")]
    Decode { path: PathBuf },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid configuration: {message}")]
    ConfigInvalid { message: String },

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn decode(path: impl Into<PathBuf>) -> Self {
        Self::Decode { path: path.into() }
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

    /// Whether this error is about the input log file itself
    pub fn is_file_access(&self) -> bool {
        matches!(self, Error::Read { .. } | Error::Decode { .. })
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

    fn not_found() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory")
    }

    #[test]
    fn test_error_display_messages() {
        let err = Error::read("/var/log/app.log", not_found());
        assert_eq!(
            err.to_string(),
            "failed to read log file /var/log/app.log: No such file or directory"
        );

        let err = Error::decode("/var/log/app.log");
        assert!(err.to_string().contains("not valid UTF-8"));
    }

    #[test]
    fn test_error_from_io() {
        let err: Error = not_found().into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_error_from_toml() {
        let parse = toml::from_str::<toml::Table>("not valid toml {{{{").unwrap_err();
        let err: Error = parse.into();
        assert!(matches!(err, Error::Toml(_)));
        assert!(!err.is_file_access());
    }

    #[test]
    fn test_file_access_classification() {
        assert!(Error::read("/x", not_found()).is_file_access());
        assert!(Error::decode("/x").is_file_access());
        assert!(!Error::config("bad").is_file_access());
    }

    #[test]
    fn test_context_preserves_error() {
        let result: std::result::Result<(), std::io::Error> = Err(not_found());
        let err = result.context("opening log").unwrap_err();
        assert!(matches!(err, Error::Io(_)));

        let result: std::result::Result<(), Error> = Err(Error::decode("/x"));
        let err = result
            .with_context(|| format!("scanning {}", "/x"))
            .unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }
}
