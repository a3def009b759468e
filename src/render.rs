//! One-page PDF rendering.
//!
//! Turns a validated [`InputFile`] into a single fixed-size page holding
//! either the decoded raster image or the file's text. The renderer does not
//! re-validate; it only refuses types it has no drawing for.

use crate::config::ConverterConfig;
use crate::error::{Error, Result};
use crate::input::{InputFile, MimeType};
use crate::writer::{ImageData, ImagePlacement, PdfWriter, PdfWriterConfig};

/// Serialized single-page PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfDocument {
    bytes: Vec<u8>,
}

impl PdfDocument {
    /// Document bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Take the document bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the buffer is empty (never true for a rendered document).
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Renders input files onto a single page.
#[derive(Debug, Clone, Default)]
pub struct PdfRenderer {
    config: ConverterConfig,
}

impl PdfRenderer {
    /// Create a renderer with the default page geometry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer with a custom configuration.
    pub fn with_config(config: ConverterConfig) -> Self {
        Self { config }
    }

    fn writer_config(&self, file: &InputFile) -> PdfWriterConfig {
        PdfWriterConfig::default()
            .with_title(file.name())
            .with_creator(self.config.creator.clone())
            .with_compress(self.config.compress)
    }

    /// Render `file` to a one-page PDF.
    ///
    /// Images are drawn at natural size with their top edge on the page top;
    /// text is drawn as one block at the configured anchor.
    pub fn render(&self, file: &InputFile) -> Result<PdfDocument> {
        let config = &self.config;
        let mut writer = PdfWriter::with_config(self.writer_config(file));
        let mime = file.mime_type();

        match mime {
            MimeType::Jpeg | MimeType::Png => {
                let image = ImageData::decode(mime, file.bytes())?;
                let placement = ImagePlacement::top_left(&image, config.page_height);
                if placement.width > config.page_width || placement.height > config.page_height {
                    log::debug!(
                        "{}: {}x{} image overflows the {}x{} page",
                        file.name(),
                        image.width,
                        image.height,
                        config.page_width,
                        config.page_height
                    );
                }
                writer
                    .add_page(config.page_width, config.page_height)
                    .add_image(image, &placement)
                    .finish();
            },
            MimeType::PlainText => {
                let text = file.decoded_text();
                let mut page = writer.add_page(config.page_width, config.page_height);
                page.add_text_block(
                    &text,
                    config.text_x,
                    config.text_y,
                    &config.font_name,
                    config.font_size,
                    config.line_height,
                );
                let replaced = page.replaced_chars();
                if replaced > 0 {
                    log::warn!(
                        "{}: {} characters cannot be shown in {} and were replaced",
                        file.name(),
                        replaced,
                        config.font_name
                    );
                }
                page.finish();
            },
            MimeType::Other(other) => return Err(Error::UnsupportedType(other.clone())),
        }

        let bytes = writer.finish()?;
        log::debug!("Rendered {} into {} bytes", file.name(), bytes.len());
        Ok(PdfDocument { bytes })
    }
}

/// Render with the default configuration.
pub fn render(file: &InputFile) -> Result<PdfDocument> {
    PdfRenderer::new().render(file)
}
