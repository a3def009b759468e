//! Human-readable status messages for the presentation layer.
//!
//! The wording is not part of the contract; the condition each message
//! reports is.

use std::fmt;

use serde::Serialize;

use crate::error::{Error, ErrorKind};
use crate::input::InputFile;

/// Message category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    /// Operation or load succeeded
    Success,
    /// Something was rejected or failed
    Error,
}

/// A status message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feedback {
    /// Category
    pub kind: FeedbackKind,
    /// Text shown to the user
    pub message: String,
    /// Error classification, for error feedback
    #[serde(skip)]
    pub error: Option<ErrorKind>,
}

impl Feedback {
    /// Success message.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Success,
            message: message.into(),
            error: None,
        }
    }

    /// A file was loaded and accepted.
    pub fn loaded(file: &InputFile) -> Self {
        Self::success(format!("File loaded: {}", file.name()))
    }

    /// An operation was requested before any file was selected.
    pub fn missing_input() -> Self {
        Self::from_error(&Error::MissingInput)
    }

    /// Describe an error.
    pub fn from_error(err: &Error) -> Self {
        let message = match err {
            Error::UnsupportedType(_) => {
                "The file is not of a supported type. Please load a JPG, PNG or TXT file."
                    .to_string()
            },
            Error::TooLarge { max, .. } => format!(
                "The file is too large. The maximum allowed size is {}.",
                human_size(*max)
            ),
            Error::MissingInput => "Please load a file first.".to_string(),
            Error::UnsupportedOperationForType { operation, mime } => {
                format!("Cannot {} a {} file; only text files can be split.", operation, mime)
            },
            Error::DecodeFailure(reason) => format!("The image could not be read: {}", reason),
            other => other.to_string(),
        };
        Self {
            kind: FeedbackKind::Error,
            message,
            error: Some(err.kind()),
        }
    }

    /// Whether this is an error message.
    pub fn is_error(&self) -> bool {
        self.kind == FeedbackKind::Error
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Receives status messages (a UI message list, a terminal, a log).
pub trait Presenter {
    /// Show one message.
    fn display(&mut self, feedback: &Feedback);
}

impl Presenter for Vec<Feedback> {
    fn display(&mut self, feedback: &Feedback) {
        self.push(feedback.clone());
    }
}

fn human_size(bytes: u64) -> String {
    const MB: u64 = 1024 * 1024;
    const KB: u64 = 1024;
    if bytes >= MB && bytes % MB == 0 {
        format!("{} MB", bytes / MB)
    } else if bytes >= KB && bytes % KB == 0 {
        format!("{} KB", bytes / KB)
    } else {
        format!("{} bytes", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loaded_names_file() {
        let fb = Feedback::loaded(&InputFile::text("notas.txt", "x"));
        assert_eq!(fb.kind, FeedbackKind::Success);
        assert!(fb.message.contains("notas.txt"));
    }

    #[test]
    fn test_too_large_mentions_limit() {
        let fb = Feedback::from_error(&Error::TooLarge {
            size: 6 * 1024 * 1024,
            max: 5 * 1024 * 1024,
        });
        assert!(fb.is_error());
        assert!(fb.message.contains("5 MB"));
        assert_eq!(fb.error, Some(ErrorKind::TooLarge));
    }

    #[test]
    fn test_each_kind_is_distinct() {
        let errors = [
            Error::UnsupportedType("x/y".into()),
            Error::TooLarge { size: 2, max: 1 },
            Error::MissingInput,
            Error::UnsupportedOperationForType {
                operation: "split".into(),
                mime: "image/png".into(),
            },
            Error::DecodeFailure("bad".into()),
        ];
        let messages: std::collections::HashSet<String> =
            errors.iter().map(|e| Feedback::from_error(e).message).collect();
        assert_eq!(messages.len(), errors.len());
    }

    #[test]
    fn test_vec_presenter_collects() {
        let mut shown: Vec<Feedback> = Vec::new();
        shown.display(&Feedback::missing_input());
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].error, Some(ErrorKind::MissingInput));
    }

    #[test]
    fn test_human_size() {
        assert_eq!(human_size(5 * 1024 * 1024), "5 MB");
        assert_eq!(human_size(2048), "2 KB");
        assert_eq!(human_size(1000), "1000 bytes");
    }
}
