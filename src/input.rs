//! Input files.
//!
//! An [`InputFile`] is acquired by the caller (file picker, CLI, network)
//! before any core work begins. Once built it is immutable: the content is
//! held as [`Bytes`] and text is decoded from it on demand.

use std::borrow::Cow;
use std::fmt;
use std::path::Path;

use bytes::Bytes;

/// MIME type of an input file.
///
/// The three types the tool understands get their own variants; anything
/// else is carried verbatim in [`MimeType::Other`] so it can be reported.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MimeType {
    /// `image/jpeg`
    Jpeg,
    /// `image/png`
    Png,
    /// `text/plain`
    PlainText,
    /// Any other type
    Other(String),
}

impl MimeType {
    /// Parse a MIME type string. Parameters such as `; charset=utf-8` are ignored.
    pub fn parse(s: &str) -> Self {
        let essence = s.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
        match essence.as_str() {
            "image/jpeg" => MimeType::Jpeg,
            "image/png" => MimeType::Png,
            "text/plain" => MimeType::PlainText,
            _ => MimeType::Other(s.trim().to_string()),
        }
    }

    /// Guess the type from a file extension (`jpg`, `jpeg`, `png`, `txt`).
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => MimeType::Jpeg,
            "png" => MimeType::Png,
            "txt" | "text" => MimeType::PlainText,
            _ => MimeType::Other("application/octet-stream".to_string()),
        }
    }

    /// Guess the type from a path's extension.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or_else(|| MimeType::Other("application/octet-stream".to_string()))
    }

    /// The MIME type string.
    pub fn as_str(&self) -> &str {
        match self {
            MimeType::Jpeg => "image/jpeg",
            MimeType::Png => "image/png",
            MimeType::PlainText => "text/plain",
            MimeType::Other(s) => s,
        }
    }

    /// Whether the type is in the `image/` family.
    pub fn is_image(&self) -> bool {
        self.as_str().starts_with("image/")
    }

    /// Whether the type is `text/plain`.
    pub fn is_text(&self) -> bool {
        matches!(self, MimeType::PlainText)
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A loaded input file.
#[derive(Debug, Clone)]
pub struct InputFile {
    name: String,
    mime_type: MimeType,
    size_bytes: u64,
    content: Bytes,
}

impl InputFile {
    /// Create an input file whose declared size is the content length.
    pub fn new(name: impl Into<String>, mime_type: MimeType, content: impl Into<Bytes>) -> Self {
        let content = content.into();
        Self {
            name: name.into(),
            mime_type,
            size_bytes: content.len() as u64,
            content,
        }
    }

    /// Create an input file with a size reported separately from the content.
    ///
    /// Browsers and file pickers report a size before content is read; the
    /// validator trusts this value.
    pub fn with_declared_size(
        name: impl Into<String>,
        mime_type: MimeType,
        size_bytes: u64,
        content: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type,
            size_bytes,
            content: content.into(),
        }
    }

    /// Create a text file from a string.
    pub fn text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(name, MimeType::PlainText, Bytes::from(text.into()))
    }

    /// File name as reported by the source.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared MIME type.
    pub fn mime_type(&self) -> &MimeType {
        &self.mime_type
    }

    /// Declared size in bytes.
    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// Raw content.
    pub fn bytes(&self) -> &Bytes {
        &self.content
    }

    /// Content decoded as UTF-8. Invalid sequences become U+FFFD.
    pub fn decoded_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.content)
    }
}
