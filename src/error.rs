//! Error types for conversion and splitting.
//!
//! Every failure the core can report is a variant of [`Error`]. All of them
//! are recoverable at the [`Converter`](crate::converter::Converter) boundary:
//! the caller gets a `Result` back and no output is produced.

/// Result type alias for paperpress operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while validating, rendering or splitting.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// MIME type outside the accepted set
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    /// File is larger than the configured maximum
    #[error("File too large: {size} bytes (maximum {max} bytes)")]
    TooLarge {
        /// Declared size of the input
        size: u64,
        /// Maximum accepted size
        max: u64,
    },

    /// Operation invoked with no file selected
    #[error("No input file selected")]
    MissingInput,

    /// Operation not defined for the file's type (e.g. splitting an image)
    #[error("Operation '{operation}' is not supported for {mime}")]
    UnsupportedOperationForType {
        /// Requested operation
        operation: String,
        /// MIME type of the input
        mime: String,
    },

    /// Raster bytes could not be decoded as the declared format
    #[error("Failed to decode image: {0}")]
    DecodeFailure(String),

    /// Split criteria with a non-positive count or unknown kind
    #[error("Invalid split criteria: {0}")]
    InvalidCriteria(String),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (only raised by sinks and PDF assembly buffers)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Payload-free classification of [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`Error::UnsupportedType`]
    UnsupportedType,
    /// See [`Error::TooLarge`]
    TooLarge,
    /// See [`Error::MissingInput`]
    MissingInput,
    /// See [`Error::UnsupportedOperationForType`]
    UnsupportedOperationForType,
    /// See [`Error::DecodeFailure`]
    DecodeFailure,
    /// See [`Error::InvalidCriteria`]
    InvalidCriteria,
    /// See [`Error::Config`]
    Config,
    /// See [`Error::Io`]
    Io,
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnsupportedType(_) => ErrorKind::UnsupportedType,
            Error::TooLarge { .. } => ErrorKind::TooLarge,
            Error::MissingInput => ErrorKind::MissingInput,
            Error::UnsupportedOperationForType { .. } => ErrorKind::UnsupportedOperationForType,
            Error::DecodeFailure(_) => ErrorKind::DecodeFailure,
            Error::InvalidCriteria(_) => ErrorKind::InvalidCriteria,
            Error::Config(_) => ErrorKind::Config,
            Error::Io(_) => ErrorKind::Io,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_large_message() {
        let err = Error::TooLarge {
            size: 5_242_881,
            max: 5_242_880,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("5242881"));
        assert!(msg.contains("5242880"));
    }

    #[test]
    fn test_unsupported_operation_message() {
        let err = Error::UnsupportedOperationForType {
            operation: "split".to_string(),
            mime: "image/png".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("split"));
        assert!(msg.contains("image/png"));
    }

    #[test]
    fn test_kind_classification() {
        assert_eq!(Error::MissingInput.kind(), ErrorKind::MissingInput);
        assert_eq!(
            Error::UnsupportedType("application/pdf".into()).kind(),
            ErrorKind::UnsupportedType
        );
        assert_eq!(Error::DecodeFailure("bad".into()).kind(), ErrorKind::DecodeFailure);
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        assert_eq!(Error::from(io).kind(), ErrorKind::Io);
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
