//! Conversion orchestration.
//!
//! [`Converter`] composes the pieces: validate the input, then either render
//! it to a PDF or split its text, and produce named output files. Every
//! output is built before any is handed to a sink, so a failing operation
//! emits nothing.

use std::fmt;

use serde::Serialize;

use crate::config::ConverterConfig;
use crate::error::{Error, Result};
use crate::feedback::Feedback;
use crate::input::InputFile;
use crate::render::PdfRenderer;
use crate::sink::ByteSink;
use crate::splitter::{SplitCriteria, TextSplitter};
use crate::validator::{ValidationResult, Validator};

/// Requested operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Convert the file to a one-page PDF
    Convert,
    /// Split the file's text into parts
    Split(SplitCriteria),
}

impl Operation {
    /// Short verb for messages.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Convert => "convert",
            Operation::Split(_) => "split",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Convert => f.write_str("convert"),
            Operation::Split(criteria) => write!(f, "split ({})", criteria),
        }
    }
}

/// A generated file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputFile {
    /// File name (`archivo.pdf`, `parte-1.txt`, ...)
    pub name: String,
    /// File contents
    #[serde(skip)]
    pub data: Vec<u8>,
    /// Size of `data` in bytes
    pub size: usize,
}

impl OutputFile {
    fn new(name: String, data: Vec<u8>) -> Self {
        let size = data.len();
        Self { name, data, size }
    }
}

/// Validates input and dispatches to the renderer or the splitter.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    config: ConverterConfig,
    validator: Validator,
    renderer: PdfRenderer,
    splitter: TextSplitter,
}

impl Converter {
    /// Create a converter with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ConverterConfig::default())
    }

    /// Create a converter with a custom configuration.
    pub fn with_config(config: ConverterConfig) -> Self {
        Self {
            validator: Validator::new(config.max_file_size),
            renderer: PdfRenderer::with_config(config.clone()),
            splitter: TextSplitter::with_measure(config.size_measure),
            config,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Validate a file without running any operation.
    pub fn validate(&self, file: &InputFile) -> ValidationResult {
        self.validator.validate(file)
    }

    /// Report on a freshly loaded file: accepted, or why not.
    pub fn load(&self, file: &InputFile) -> Feedback {
        match self.validator.check(file) {
            Ok(()) => Feedback::loaded(file),
            Err(err) => Feedback::from_error(&err),
        }
    }

    /// Run `operation` on `file` and return the outputs without emitting them.
    pub fn run(&self, file: Option<&InputFile>, operation: Operation) -> Result<Vec<OutputFile>> {
        let file = file.ok_or(Error::MissingInput)?;
        self.validator.check(file)?;

        match operation {
            Operation::Convert => self.convert(file),
            Operation::Split(criteria) => self.split(file, criteria),
        }
    }

    /// Run `operation` and hand every output to `sink`, in order.
    ///
    /// Returns the emitted outputs. Nothing reaches the sink unless the
    /// whole operation succeeded. If an emit fails, the files emitted before
    /// it are passed to [`ByteSink::discard`] and the emit error is returned.
    pub fn run_into(
        &self,
        file: Option<&InputFile>,
        operation: Operation,
        sink: &mut dyn ByteSink,
    ) -> Result<Vec<OutputFile>> {
        let outputs = self.run(file, operation)?;
        for (emitted, output) in outputs.iter().enumerate() {
            if let Err(err) = sink.emit(&output.name, &output.data) {
                log::warn!(
                    "Failed to emit {}, discarding {} earlier files: {}",
                    output.name,
                    emitted,
                    err
                );
                sink.discard(emitted);
                return Err(err);
            }
        }
        log::debug!("Emitted {} files for {}", outputs.len(), operation);
        Ok(outputs)
    }

    fn convert(&self, file: &InputFile) -> Result<Vec<OutputFile>> {
        let document = self.renderer.render(file)?;
        log::info!("Converted {} to {}", file.name(), self.config.pdf_name);
        Ok(vec![OutputFile::new(self.config.pdf_name.clone(), document.into_bytes())])
    }

    fn split(&self, file: &InputFile, criteria: SplitCriteria) -> Result<Vec<OutputFile>> {
        if !file.mime_type().is_text() {
            return Err(Error::UnsupportedOperationForType {
                operation: Operation::Split(criteria).name().to_string(),
                mime: file.mime_type().to_string(),
            });
        }

        let text = file.decoded_text();
        let segments = self.splitter.split(&text, criteria);
        log::info!("Split {} into {} parts by {}", file.name(), segments.len(), criteria);

        Ok(segments
            .into_iter()
            .enumerate()
            .map(|(i, segment)| OutputFile::new(self.config.part_name(i + 1), segment.into_bytes()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::input::MimeType;
    use crate::sink::MemorySink;

    #[test]
    fn test_missing_input() {
        let err = Converter::new().run(None, Operation::Convert).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingInput);
    }

    #[test]
    fn test_convert_names_output() {
        let file = InputFile::text("a.txt", "hola");
        let outputs = Converter::new().run(Some(&file), Operation::Convert).unwrap();
        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].name, "archivo.pdf");
        assert!(outputs[0].data.starts_with(b"%PDF-"));
        assert_eq!(outputs[0].size, outputs[0].data.len());
    }

    #[test]
    fn test_split_names_parts_in_order() {
        let file = InputFile::text("a.txt", "one two three four five");
        let op = Operation::Split(SplitCriteria::words(2).unwrap());
        let outputs = Converter::new().run(Some(&file), op).unwrap();
        let names: Vec<&str> = outputs.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["parte-1.txt", "parte-2.txt", "parte-3.txt"]);
        assert_eq!(outputs[2].data, b"five".to_vec());
    }

    #[test]
    fn test_split_rejects_images() {
        let file = InputFile::new("a.png", MimeType::Png, vec![0u8; 8]);
        let op = Operation::Split(SplitCriteria::lines(1).unwrap());
        let mut sink = MemorySink::new();
        let err = Converter::new().run_into(Some(&file), op, &mut sink).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedOperationForType);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_validation_runs_first() {
        let file = InputFile::new("a.bin", MimeType::parse("application/zip"), vec![1u8]);
        let op = Operation::Split(SplitCriteria::lines(1).unwrap());
        let err = Converter::new().run(Some(&file), op).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedType);
    }

    #[test]
    fn test_load_feedback() {
        let converter = Converter::new();
        assert!(!converter.load(&InputFile::text("a.txt", "x")).is_error());
        let big =
            InputFile::with_declared_size("big.txt", MimeType::PlainText, 6_000_000, Vec::<u8>::new());
        assert!(converter.load(&big).is_error());
    }

    #[test]
    fn test_operation_display() {
        let op = Operation::Split(SplitCriteria::lines(3).unwrap());
        assert_eq!(op.to_string(), "split (lines:3)");
        assert_eq!(Operation::Convert.name(), "convert");
    }
}
