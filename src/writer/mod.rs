//! PDF writing module for generating PDF files.
//!
//! ## Architecture
//!
//! ```text
//! text / ImageData
//!     ↓
//! [PdfWriter] + [PageBuilder] (pages, resources)
//!     ↓
//! [ContentStreamBuilder] (operators → content stream bytes)
//!     ↓
//! [ObjectSerializer] (serializes PDF objects)
//!     ↓
//! PDF bytes
//! ```
//!
//! ## Example
//!
//! ```
//! use paperpress::writer::PdfWriter;
//!
//! let mut writer = PdfWriter::new();
//! writer
//!     .add_page(500.0, 500.0)
//!     .add_text_block("Hello, World!", 50.0, 450.0, "Helvetica", 12.0, 24.0)
//!     .finish();
//! let bytes = writer.finish().unwrap();
//! assert!(bytes.starts_with(b"%PDF-"));
//! ```

mod content_stream;
pub mod encoding;
mod image_handler;
mod object_serializer;
mod pdf_writer;

pub use content_stream::{ContentStreamBuilder, ContentStreamOp};
pub use image_handler::{ColorSpace, ImageData, ImageError, ImageFormat, ImagePlacement};
pub use object_serializer::ObjectSerializer;
pub use pdf_writer::{PageBuilder, PdfWriter, PdfWriterConfig};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_exports() {
        let _serializer = ObjectSerializer::new();
        let _builder = ContentStreamBuilder::new();
        let _writer = PdfWriter::with_config(PdfWriterConfig::default());
    }
}
