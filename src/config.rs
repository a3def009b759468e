//! Configuration for conversion and splitting.
//!
//! Defaults reproduce the fixed behaviour of the tool: a 5 MiB input limit,
//! a 500×500 page, text anchored at (50, 450) in 12pt Helvetica, and output
//! names `archivo.pdf` / `parte-N.txt`.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::splitter::SizeMeasure;

/// Maximum accepted input size in bytes (5 MiB, inclusive).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// Converter configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Largest accepted input, in bytes
    pub max_file_size: u64,
    /// Page width in PDF units
    pub page_width: f32,
    /// Page height in PDF units
    pub page_height: f32,
    /// Left edge of the text block
    pub text_x: f32,
    /// Baseline of the first text line
    pub text_y: f32,
    /// Font size for the text block
    pub font_size: f32,
    /// Distance between baselines when the text has line breaks
    pub line_height: f32,
    /// Standard Type1 font used for text
    pub font_name: String,
    /// Compress the page content stream with FlateDecode
    pub compress: bool,
    /// How the size criterion measures text
    pub size_measure: SizeMeasure,
    /// File name of the converted document
    pub pdf_name: String,
    /// Prefix of split part names (`parte-` → `parte-1.txt`)
    pub part_prefix: String,
    /// Extension of split part names, without the dot
    pub part_extension: String,
    /// Creator written to the document info dictionary
    pub creator: Option<String>,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            page_width: 500.0,
            page_height: 500.0,
            text_x: 50.0,
            text_y: 450.0,
            font_size: 12.0,
            line_height: 24.0,
            font_name: "Helvetica".to_string(),
            compress: false,
            size_measure: SizeMeasure::Chars,
            pdf_name: "archivo.pdf".to_string(),
            part_prefix: "parte-".to_string(),
            part_extension: "txt".to_string(),
            creator: Some("paperpress".to_string()),
        }
    }
}

impl ConverterConfig {
    /// Create a configuration with the default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Set the maximum accepted input size.
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    /// Set the page dimensions.
    pub fn with_page_size(mut self, width: f32, height: f32) -> Self {
        self.page_width = width;
        self.page_height = height;
        self
    }

    /// Enable or disable content stream compression.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Choose how the size criterion measures text.
    pub fn with_size_measure(mut self, measure: SizeMeasure) -> Self {
        self.size_measure = measure;
        self
    }

    /// Name of the `index`-th split part (1-based).
    pub fn part_name(&self, index: usize) -> String {
        format!("{}{}.{}", self.part_prefix, index, self.part_extension)
    }

    /// Check the values that would otherwise produce a broken document.
    pub fn validate(&self) -> Result<()> {
        if self.page_width <= 0.0 || self.page_height <= 0.0 {
            return Err(Error::Config(format!(
                "page size must be positive, got {}x{}",
                self.page_width, self.page_height
            )));
        }
        if self.font_size <= 0.0 {
            return Err(Error::Config(format!(
                "font size must be positive, got {}",
                self.font_size
            )));
        }
        if self.font_name.is_empty() {
            return Err(Error::Config("font name is empty".to_string()));
        }
        if self.pdf_name.is_empty() || self.part_prefix.is_empty() {
            return Err(Error::Config("output names must not be empty".to_string()));
        }
        Ok(())
    }
}
