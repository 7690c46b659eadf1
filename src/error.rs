//! Error types for reference resolution, search and text loading.
//!
//! Resolution failures are ordinary values: a caller that gets one back can
//! still treat the same input as a search query.

use thiserror::Error;

/// Crate result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Errors with enough context to explain why an input did not resolve
#[derive(Debug, Error)]
pub enum Error {
    /// A locus token could not be parsed
    #[error("Invalid reference format `{token}`: {reason}")]
    InvalidFormat {
        /// The offending token.
        token: String,
        /// What was wrong with it.
        reason: &'static str,
    },

    /// A chapter, verse or book index outside the allowed range
    #[error("{what} {value} is out of range: {reason}")]
    OutOfRange {
        /// Which part of the locus was out of range.
        what: &'static str,
        /// The rejected value.
        value: u64,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// No book-shaped token could be resolved
    #[error("Unknown book: {0}")]
    UnknownBook(String),

    /// Input was empty or whitespace only
    #[error("Empty input")]
    NullOrEmptyInput,

    /// A version abbreviation that no loaded text carries
    #[error("Unknown version: {0}")]
    UnknownVersion(String),

    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<std::path::PathBuf>,
    },

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },

    /// Text file parsing error
    #[error("Parse error in {file:?}: {message}")]
    Parse {
        /// File that failed to parse, if known.
        file: Option<std::path::PathBuf>,
        /// Description of the parse failure.
        message: String,
    },
}

impl Error {
    /// Create an invalid-format error for a token
    pub fn invalid_format(token: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidFormat { token: token.into(), reason }
    }

    /// Create an out-of-range error
    pub fn out_of_range(what: &'static str, value: impl Into<u64>, reason: &'static str) -> Self {
        Self::OutOfRange { what, value: value.into(), reason }
    }

    /// Create an IO error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }

    /// Create a parse error with file context
    pub fn parse(message: impl Into<String>, file: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Parse { file: file.into(), message: message.into() }
    }

    /// Whether this failure came from interpreting the input as a reference.
    ///
    /// These are the errors after which a caller falls back to searching.
    pub const fn is_resolution_failure(&self) -> bool {
        matches!(
            self,
            Self::InvalidFormat { .. } | Self::OutOfRange { .. } | Self::UnknownBook(_)
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io { source: e, path: None }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn resolution_failures_are_flagged() {
        assert!(Error::invalid_format("2:1:5", "more than one chapter separator").is_resolution_failure());
        assert!(Error::out_of_range("chapter", 0u32, "chapters start at 1").is_resolution_failure());
        assert!(Error::UnknownBook("zzz".into()).is_resolution_failure());
        assert!(!Error::NullOrEmptyInput.is_resolution_failure());
        assert!(!Error::config("bad", "fix it").is_resolution_failure());
    }

    #[test]
    fn messages_carry_context() {
        let err = Error::out_of_range("verse", 0u32, "verses start at 1");
        assert_eq!(err.to_string(), "verse 0 is out of range: verses start at 1");

        let err = Error::invalid_format("2:1:5", "more than one chapter separator");
        assert!(err.to_string().contains("2:1:5"));
    }
}
