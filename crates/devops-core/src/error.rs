//! Structured error handling for job configuration codecs.

use strum::{AsRefStr, Display, EnumString, IntoStaticStr};
use thiserror::Error;

/// Type alias for boxed dynamic errors that can be sent across threads.
///
/// Used as the source of [`Error`] so that parser and writer failures from
/// any backend can be carried without leaking their concrete types.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for Results with our custom Error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Categories of errors that can occur while encoding or decoding a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// The document is not well-formed XML or lacks a mandatory element.
    MalformedDocument,
    /// The source provider could not be determined or is not supported.
    UnsupportedSourceType,
    /// A value could not be serialized into the document.
    Encoding,
}

/// Structured error type with classification and an optional source.
///
/// Every codec error is terminal for the call that produced it.
#[must_use]
#[derive(Debug, Error)]
#[error("[{kind}]{}", message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Primary error message.
    pub message: Option<String>,
    /// Underlying source error, if any.
    #[source]
    pub source: Option<BoxedError>,
}

impl Error {
    /// Creates a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            source: None,
        }
    }

    /// Creates a new error from a source error.
    pub fn from_source(kind: ErrorKind, source: impl Into<BoxedError>) -> Self {
        Self {
            kind,
            message: None,
            source: Some(source.into()),
        }
    }

    /// Adds a message to this error.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the source of the error.
    pub fn with_source(mut self, source: impl Into<BoxedError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Creates a new malformed document error.
    pub fn malformed_document() -> Self {
        Self::new(ErrorKind::MalformedDocument)
    }

    /// Creates a new unsupported source type error.
    pub fn unsupported_source_type() -> Self {
        Self::new(ErrorKind::UnsupportedSourceType)
    }

    /// Creates a new encoding error.
    pub fn encoding() -> Self {
        Self::new(ErrorKind::Encoding)
    }

    /// Returns the error kind.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error kind as a string.
    #[must_use]
    pub fn kind_str(&self) -> &'static str {
        self.kind.into()
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(error: std::string::FromUtf8Error) -> Self {
        Self::from_source(ErrorKind::Encoding, error).with_message("Invalid UTF-8 encoding")
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(error: std::str::Utf8Error) -> Self {
        Self::from_source(ErrorKind::MalformedDocument, error)
            .with_message("Invalid UTF-8 encoding")
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_error_new() {
        let error = Error::new(ErrorKind::Encoding);
        assert_eq!(error.kind, ErrorKind::Encoding);
        assert!(error.message.is_none());
        assert!(error.source.is_none());
    }

    #[test]
    fn test_error_builder_pattern() {
        let error = Error::malformed_document().with_message("missing <script>");

        assert_eq!(error.kind(), ErrorKind::MalformedDocument);
        assert_eq!(error.message.as_deref(), Some("missing <script>"));
    }

    #[test]
    fn test_error_display() {
        let error = Error::unsupported_source_type().with_message("no branch source");

        let display_str = error.to_string();
        assert!(display_str.contains("unsupported_source_type"));
        assert!(display_str.contains("no branch source"));
    }

    #[test]
    fn test_error_display_without_message() {
        let error = Error::encoding();
        assert_eq!(error.to_string(), "[encoding]");
    }

    #[test]
    fn test_from_source() {
        let source = std::io::Error::other("writer closed");
        let error = Error::from_source(ErrorKind::Encoding, source);

        assert!(error.source.is_some());
        assert_eq!(error.kind_str(), "encoding");
    }

    #[test]
    fn test_from_utf8_error() {
        let bytes = vec![0xff, 0xfe];
        let error = Error::from(String::from_utf8(bytes).unwrap_err());

        assert_eq!(error.kind, ErrorKind::Encoding);
        assert!(error.source.is_some());
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            ErrorKind::from_str("malformed_document").unwrap(),
            ErrorKind::MalformedDocument
        );
        assert_eq!(
            ErrorKind::from_str("unsupported_source_type").unwrap(),
            ErrorKind::UnsupportedSourceType
        );
        assert!(ErrorKind::from_str("timeout").is_err());
    }
}
