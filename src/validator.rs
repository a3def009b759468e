//! Input validation.
//!
//! Checks a file's declared type and size against policy. The check is a
//! pure function of those two attributes: the content is never inspected.

use crate::config::DEFAULT_MAX_FILE_SIZE;
use crate::error::Error;
use crate::input::{InputFile, MimeType};

/// Why a file was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectionReason {
    /// Type outside `image/jpeg`, `image/png`, `text/plain`
    UnsupportedType,
    /// Size above the maximum
    TooLarge,
}

/// Outcome of [`Validator::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationResult {
    /// File accepted
    Ok,
    /// File rejected
    Rejected(RejectionReason),
}

impl ValidationResult {
    /// Whether the file was accepted.
    pub fn is_ok(&self) -> bool {
        matches!(self, ValidationResult::Ok)
    }
}

/// Type and size policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validator {
    max_file_size: u64,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FILE_SIZE)
    }
}

impl Validator {
    /// Create a validator with the given inclusive size limit.
    pub fn new(max_file_size: u64) -> Self {
        Self { max_file_size }
    }

    /// Inclusive size limit in bytes.
    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Whether a MIME type is in the accepted set.
    pub fn accepts_type(mime: &MimeType) -> bool {
        matches!(mime, MimeType::Jpeg | MimeType::Png | MimeType::PlainText)
    }

    /// Validate a file. The type check runs first, so a file that is both
    /// the wrong type and too large reports `UnsupportedType`.
    pub fn validate(&self, file: &InputFile) -> ValidationResult {
        if !Self::accepts_type(file.mime_type()) {
            return ValidationResult::Rejected(RejectionReason::UnsupportedType);
        }
        if file.size_bytes() > self.max_file_size {
            return ValidationResult::Rejected(RejectionReason::TooLarge);
        }
        ValidationResult::Ok
    }

    /// Validate a file, turning a rejection into the matching [`Error`].
    pub fn check(&self, file: &InputFile) -> Result<(), Error> {
        match self.validate(file) {
            ValidationResult::Ok => Ok(()),
            ValidationResult::Rejected(RejectionReason::UnsupportedType) => {
                log::info!("Rejected {}: unsupported type {}", file.name(), file.mime_type());
                Err(Error::UnsupportedType(file.mime_type().to_string()))
            },
            ValidationResult::Rejected(RejectionReason::TooLarge) => {
                log::info!(
                    "Rejected {}: {} bytes exceeds {}",
                    file.name(),
                    file.size_bytes(),
                    self.max_file_size
                );
                Err(Error::TooLarge {
                    size: file.size_bytes(),
                    max: self.max_file_size,
                })
            },
        }
    }
}

/// Validate a file against the default policy.
pub fn validate(file: &InputFile) -> ValidationResult {
    Validator::default().validate(file)
}
