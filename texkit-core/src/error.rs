use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Result type for texkit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type returned by custom serialization handlers.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("invalid output target: expected a path or a handler, found {kind}")]
    #[diagnostic(
        code(texkit::invalid_target),
        help("use a string path, e.g. target = \"values.tex\", or a table like {{ handler = \"stdout\" }}")
    )]
    InvalidTargetKind { kind: String },

    #[error("unknown handler '{name}'")]
    #[diagnostic(code(texkit::unknown_handler))]
    UnknownHandler { name: String },

    #[error("cannot write to '{}': {reason}", path.display())]
    #[diagnostic(
        code(texkit::target_conflict),
        help("pass a path to a regular, writable file as the default output")
    )]
    TargetConflict { path: PathBuf, reason: String },

    #[error("failed to write '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Handler(HandlerError),

    #[error("invalid format spec '{spec}': {reason}")]
    #[diagnostic(
        code(texkit::invalid_format),
        help("format specs look like '.2f', ',d', '>8', '+.3e' or '.1%'")
    )]
    InvalidFormat { spec: String, reason: String },
}

impl Error {
    /// Create an I/O error for the given path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a target conflict error for the given path
    pub fn target_conflict(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::TargetConflict {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid format error
    pub fn invalid_format(spec: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidFormat {
            spec: spec.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_error_is_transparent() {
        let inner: HandlerError = "disk on fire".into();
        let err = Error::Handler(inner);
        assert_eq!(err.to_string(), "disk on fire");
    }

    #[test]
    fn test_target_conflict_message() {
        let err = Error::target_conflict("out", "is a directory");
        assert_eq!(err.to_string(), "cannot write to 'out': is a directory");
    }
}
