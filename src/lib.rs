#![allow(clippy::too_many_arguments)]
#![allow(clippy::should_implement_trait)]

//! # Paperpress
//!
//! Single-file converter: load one JPEG, PNG or plain-text file, then turn it
//! into a one-page PDF or split its text into numbered parts.
//!
//! ## Core Features
//!
//! - **Validation**: type whitelist and a 5 MiB size ceiling, checked before any work
//! - **PDF Generation**: hand-built PDF 1.7 writer with a fixed 500×500 page
//! - **Image Embedding**: JPEG passthrough (DCTDecode), PNG with Flate and soft masks
//! - **Text Drawing**: Helvetica with WinAnsi encoding, one line per input line
//! - **Splitting**: by lines, by words, or by a size budget that never cuts a character
//! - **Sinks**: outputs are handed to a pluggable [`ByteSink`]
//!
//! ## Quick Start
//!
//! ```
//! use paperpress::{Converter, InputFile, MemorySink, Operation, SplitCriteria};
//!
//! # fn main() -> paperpress::Result<()> {
//! let file = InputFile::text("notas.txt", "uno\ndos\ntres");
//! let converter = Converter::new();
//!
//! let mut sink = MemorySink::new();
//! converter.run_into(Some(&file), Operation::Split(SplitCriteria::lines(2)?), &mut sink)?;
//! assert_eq!(sink.names(), vec!["parte-1.txt", "parte-2.txt"]);
//!
//! let pdf = converter.run(Some(&file), Operation::Convert)?;
//! assert_eq!(pdf[0].name, "archivo.pdf");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Input model and validation
pub mod input;
pub mod validator;

// Text splitting
pub mod splitter;

// PDF object model and writer
pub mod object;
pub mod writer;

// Rendering
pub mod render;

// Orchestration and presentation
pub mod converter;
pub mod feedback;
pub mod sink;

// Re-exports
pub use config::ConverterConfig;
pub use converter::{Converter, Operation, OutputFile};
pub use error::{Error, ErrorKind, Result};
pub use feedback::{Feedback, FeedbackKind, Presenter};
pub use input::{InputFile, MimeType};
pub use render::{PdfDocument, PdfRenderer};
pub use sink::{ByteSink, DirectorySink, MemorySink};
pub use splitter::{SizeMeasure, SplitCriteria, SplitResult, TextSplitter};
pub use validator::{RejectionReason, ValidationResult, Validator};
