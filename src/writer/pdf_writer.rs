//! PDF document writer.
//!
//! Assembles complete PDF documents with proper structure:
//! header, body, xref table, and trailer.

use std::collections::BTreeMap;
use std::io::Write;

use super::content_stream::ContentStreamBuilder;
use super::image_handler::{ImageData, ImagePlacement};
use super::object_serializer::ObjectSerializer;
use crate::error::Result;
use crate::object::{Dictionary, Object};

/// Configuration for PDF generation.
#[derive(Debug, Clone)]
pub struct PdfWriterConfig {
    /// PDF version (e.g., "1.7")
    pub version: String,
    /// Document title
    pub title: Option<String>,
    /// Creator application
    pub creator: Option<String>,
    /// Whether to compress page content streams
    pub compress: bool,
    /// Whether to write a CreationDate into the info dictionary
    pub creation_date: bool,
}

impl Default for PdfWriterConfig {
    fn default() -> Self {
        Self {
            version: "1.7".to_string(),
            title: None,
            creator: Some("paperpress".to_string()),
            compress: false,
            creation_date: true,
        }
    }
}

impl PdfWriterConfig {
    /// Set document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set or clear the creator application.
    pub fn with_creator(mut self, creator: Option<String>) -> Self {
        self.creator = creator;
        self
    }

    /// Enable or disable content stream compression (FlateDecode).
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Enable or disable the CreationDate entry.
    pub fn with_creation_date(mut self, enabled: bool) -> Self {
        self.creation_date = enabled;
        self
    }
}

/// Compress data using Flate/Deflate compression.
fn compress_data(data: &[u8]) -> std::io::Result<Vec<u8>> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// A page being built.
pub struct PageBuilder<'a> {
    writer: &'a mut PdfWriter,
    page_index: usize,
}

impl<'a> PageBuilder<'a> {
    /// Draw a block of text with a standard Type1 font.
    ///
    /// `x`/`y` is the first baseline; further lines step down by `leading`.
    pub fn add_text_block(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        base_font: &str,
        font_size: f32,
        leading: f32,
    ) -> &mut Self {
        let resource = self.writer.font_resource(base_font);
        let page = &mut self.writer.pages[self.page_index];
        page.fonts.insert(resource.clone(), base_font.to_string());
        page.content
            .begin_text()
            .set_font(&resource, font_size)
            .text_block(text, x, y, leading)
            .end_text();
        self
    }

    /// Draw an image at the given placement.
    pub fn add_image(&mut self, image: ImageData, placement: &ImagePlacement) -> &mut Self {
        let page = &mut self.writer.pages[self.page_index];
        let resource = format!("Im{}", page.images.len() + 1);
        page.content.draw_image_at(&resource, placement);
        page.images.push((resource, image));
        self
    }

    /// Characters replaced so far on this page because the font could not encode them.
    pub fn replaced_chars(&self) -> usize {
        self.writer.pages[self.page_index].content.replaced_chars()
    }

    /// Close any open text object on this page.
    pub fn finish(&mut self) {
        self.writer.pages[self.page_index].content.end_text();
    }
}

/// Internal page data.
struct PageData {
    width: f32,
    height: f32,
    content: ContentStreamBuilder,
    /// Font resource name -> base font
    fonts: BTreeMap<String, String>,
    /// Image resource name -> image
    images: Vec<(String, ImageData)>,
}

/// PDF document writer.
///
/// Objects are numbered in the order they are written, so the xref table
/// is a straight run from 1 to N.
pub struct PdfWriter {
    config: PdfWriterConfig,
    pages: Vec<PageData>,
    /// Base font -> resource name (F1, F2, ...), shared by all pages
    font_resources: BTreeMap<String, String>,
}

impl PdfWriter {
    /// Create a new PDF writer with default config.
    pub fn new() -> Self {
        Self::with_config(PdfWriterConfig::default())
    }

    /// Create a PDF writer with custom config.
    pub fn with_config(config: PdfWriterConfig) -> Self {
        Self {
            config,
            pages: Vec::new(),
            font_resources: BTreeMap::new(),
        }
    }

    /// Add a page with the given dimensions.
    pub fn add_page(&mut self, width: f32, height: f32) -> PageBuilder<'_> {
        let page_index = self.pages.len();
        self.pages.push(PageData {
            width,
            height,
            content: ContentStreamBuilder::new(),
            fonts: BTreeMap::new(),
            images: Vec::new(),
        });
        PageBuilder {
            writer: self,
            page_index,
        }
    }

    fn font_resource(&mut self, base_font: &str) -> String {
        let next = self.font_resources.len() + 1;
        self.font_resources
            .entry(base_font.to_string())
            .or_insert_with(|| format!("F{}", next))
            .clone()
    }

    /// Build the complete PDF document.
    pub fn finish(self) -> Result<Vec<u8>> {
        let mut objects: Vec<Object> = Vec::new();
        // Reserve ids 1 (catalog) and 2 (page tree).
        objects.push(Object::Null);
        objects.push(Object::Null);
        let catalog_id = 1u32;
        let pages_id = 2u32;

        let mut font_ids: BTreeMap<String, u32> = BTreeMap::new();
        for base_font in self.font_resources.keys() {
            let id = push(
                &mut objects,
                Object::dict([
                    ("Type", Object::name("Font")),
                    ("Subtype", Object::name("Type1")),
                    ("BaseFont", Object::name(base_font)),
                    ("Encoding", Object::name("WinAnsiEncoding")),
                ]),
            );
            font_ids.insert(base_font.clone(), id);
        }

        let mut kids = Vec::with_capacity(self.pages.len());
        for page in &self.pages {
            let mut xobjects = Dictionary::new();
            for (resource, image) in &page.images {
                let mut dict = image.build_xobject_dict();
                if let (Some(mask_dict), Some(mask)) = (image.build_soft_mask_dict(), &image.soft_mask)
                {
                    let mask_id = push(&mut objects, Object::stream(mask_dict, mask.clone()));
                    dict.insert("SMask".to_string(), Object::reference(mask_id));
                }
                let image_id = push(&mut objects, Object::stream(dict, image.data.clone()));
                xobjects.insert(resource.clone(), Object::reference(image_id));
            }

            let raw_content = page.content.build()?;
            let mut content_dict = Dictionary::new();
            let content_bytes = if self.config.compress {
                content_dict.insert("Filter".to_string(), Object::name("FlateDecode"));
                compress_data(&raw_content)?
            } else {
                raw_content
            };
            let content_id = push(&mut objects, Object::stream(content_dict, content_bytes));

            let fonts: Dictionary = page
                .fonts
                .iter()
                .filter_map(|(resource, base)| {
                    font_ids
                        .get(base)
                        .map(|id| (resource.clone(), Object::reference(*id)))
                })
                .collect();
            let mut resources = Dictionary::new();
            if !fonts.is_empty() {
                resources.insert("Font".to_string(), Object::Dictionary(fonts));
            }
            if !xobjects.is_empty() {
                resources.insert("XObject".to_string(), Object::Dictionary(xobjects));
            }

            let page_id = push(
                &mut objects,
                Object::dict([
                    ("Type", Object::name("Page")),
                    ("Parent", Object::reference(pages_id)),
                    (
                        "MediaBox",
                        Object::rect(0.0, 0.0, page.width as f64, page.height as f64),
                    ),
                    ("Contents", Object::reference(content_id)),
                    ("Resources", Object::Dictionary(resources)),
                ]),
            );
            kids.push(Object::reference(page_id));
        }

        let page_count = kids.len() as i64;
        objects[(pages_id - 1) as usize] = Object::dict([
            ("Type", Object::name("Pages")),
            ("Kids", Object::Array(kids)),
            ("Count", Object::Integer(page_count)),
        ]);
        objects[(catalog_id - 1) as usize] = Object::dict([
            ("Type", Object::name("Catalog")),
            ("Pages", Object::reference(pages_id)),
        ]);

        let mut info = Dictionary::new();
        if let Some(title) = &self.config.title {
            info.insert("Title".to_string(), Object::text_string(title));
        }
        if let Some(creator) = &self.config.creator {
            info.insert("Creator".to_string(), Object::text_string(creator));
            info.insert("Producer".to_string(), Object::text_string(creator));
        }
        if self.config.creation_date {
            let date = chrono::Local::now().format("D:%Y%m%d%H%M%S").to_string();
            info.insert("CreationDate".to_string(), Object::string(&date));
        }
        let info_id = push(&mut objects, Object::Dictionary(info));

        log::debug!("Writing PDF with {} pages and {} objects", page_count, objects.len());

        let serializer = ObjectSerializer::new();
        let mut output = Vec::new();

        writeln!(output, "%PDF-{}", self.config.version)?;
        // Binary marker (recommended for binary content)
        output.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");

        let mut offsets = Vec::with_capacity(objects.len());
        for (i, obj) in objects.iter().enumerate() {
            offsets.push(output.len());
            serializer.write_indirect(&mut output, i as u32 + 1, 0, obj)?;
        }

        let xref_start = output.len();
        writeln!(output, "xref")?;
        writeln!(output, "0 {}", objects.len() + 1)?;
        writeln!(output, "0000000000 65535 f ")?;
        for offset in &offsets {
            writeln!(output, "{:010} 00000 n ", offset)?;
        }

        let trailer = Object::dict([
            ("Size", Object::Integer(objects.len() as i64 + 1)),
            ("Root", Object::reference(catalog_id)),
            ("Info", Object::reference(info_id)),
        ]);
        writeln!(output, "trailer")?;
        serializer.write_object(&mut output, &trailer)?;
        writeln!(output)?;
        writeln!(output, "startxref")?;
        writeln!(output, "{}", xref_start)?;
        write!(output, "%%EOF")?;

        Ok(output)
    }
}

/// Append an object and return its number.
fn push(objects: &mut Vec<Object>, obj: Object) -> u32 {
    objects.push(obj);
    objects.len() as u32
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::image_handler::{ColorSpace, ImageFormat};

    fn as_text(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }

    #[test]
    fn test_create_empty_page() {
        let mut writer = PdfWriter::new();
        writer.add_page(500.0, 500.0).finish();
        let content = as_text(&writer.finish().unwrap());

        assert!(content.starts_with("%PDF-1.7"));
        assert!(content.contains("/Type /Catalog"));
        assert!(content.contains("/Type /Pages"));
        assert!(content.contains("/Count 1"));
        assert!(content.contains("/MediaBox [0 0 500 500]"));
        assert!(content.ends_with("%%EOF"));
    }

    #[test]
    fn test_pdf_with_text() {
        let mut writer = PdfWriter::new();
        writer
            .add_page(500.0, 500.0)
            .add_text_block("Hello", 50.0, 450.0, "Helvetica", 12.0, 24.0)
            .finish();
        let content = as_text(&writer.finish().unwrap());

        assert!(content.contains("/BaseFont /Helvetica"));
        assert!(content.contains("/Encoding /WinAnsiEncoding"));
        assert!(content.contains("/Font <</F1 "));
        assert!(content.contains("1 0 0 1 50 450 Tm"));
        assert!(content.contains("(Hello) Tj"));
    }

    #[test]
    fn test_pdf_with_image_and_soft_mask() {
        let image = ImageData {
            width: 2,
            height: 3,
            bits_per_component: 8,
            color_space: ColorSpace::DeviceRGB,
            format: ImageFormat::Png,
            data: vec![1, 2, 3],
            soft_mask: Some(vec![4, 5]),
        };
        let placement = ImagePlacement::top_left(&image, 500.0);
        let mut writer = PdfWriter::new();
        writer.add_page(500.0, 500.0).add_image(image, &placement).finish();
        let content = as_text(&writer.finish().unwrap());

        assert!(content.contains("/XObject <</Im1 "));
        assert!(content.contains("/SMask "));
        assert!(content.contains("2 0 0 3 0 497 cm"));
        assert!(content.contains("/Im1 Do"));
    }

    #[test]
    fn test_metadata() {
        let config = PdfWriterConfig::default()
            .with_title("notes.txt")
            .with_creation_date(false);
        let mut writer = PdfWriter::with_config(config);
        writer.add_page(500.0, 500.0).finish();
        let content = as_text(&writer.finish().unwrap());

        assert!(content.contains("/Title (notes.txt)"));
        assert!(content.contains("/Creator (paperpress)"));
        assert!(!content.contains("/CreationDate"));
    }

    #[test]
    fn test_non_ascii_title_is_utf16() {
        let config = PdfWriterConfig::default()
            .with_title("ñandú.txt")
            .with_creation_date(false);
        let mut writer = PdfWriter::with_config(config);
        writer.add_page(500.0, 500.0).finish();
        let content = as_text(&writer.finish().unwrap());

        assert!(content.contains("/Title (\\376\\377\\000\\361\\000a\\000n"));
        assert!(!content.contains("\\303"));
        assert!(content.contains("/Creator (paperpress)"));
    }

    /// Data of the first stream whose dictionary starts with `key`.
    fn stream_data<'a>(pdf: &'a [u8], key: &[u8]) -> &'a [u8] {
        let dict = pdf.windows(key.len()).position(|w| w == key).unwrap();
        let start = dict + pdf[dict..].windows(7).position(|w| w == b"stream\n").unwrap() + 7;
        let len = pdf[start..]
            .windows(10)
            .position(|w| w == b"\nendstream")
            .unwrap();
        &pdf[start..start + len]
    }

    #[test]
    fn test_compressed_content() {
        use std::io::Read;

        let build = |compress: bool| {
            let config = PdfWriterConfig::default().with_compress(compress);
            let mut writer = PdfWriter::with_config(config);
            writer
                .add_page(500.0, 500.0)
                .add_text_block("Hidden", 0.0, 0.0, "Helvetica", 12.0, 24.0)
                .finish();
            writer.finish().unwrap()
        };
        let compressed = build(true);
        let plain = build(false);
        assert!(!as_text(&plain).contains("/FlateDecode"));

        let mut inflated = Vec::new();
        flate2::read::ZlibDecoder::new(stream_data(&compressed, b"<</Filter /FlateDecode"))
            .read_to_end(&mut inflated)
            .unwrap();
        assert_eq!(inflated, stream_data(&plain, b"<</Length"));
        assert!(as_text(&inflated).contains("(Hidden) Tj"));
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let mut writer = PdfWriter::new();
        writer
            .add_page(500.0, 500.0)
            .add_text_block("x", 0.0, 0.0, "Helvetica", 12.0, 24.0)
            .finish();
        let bytes = writer.finish().unwrap();

        let xref = bytes.windows(6).position(|w| w == b"\nxref\n").unwrap() + 1;
        let tail = as_text(&bytes[xref..]);
        let startxref: usize = tail
            .rsplit("startxref\n")
            .next()
            .and_then(|t| t.lines().next())
            .and_then(|n| n.parse().ok())
            .unwrap();
        assert_eq!(startxref, xref);

        let offsets: Vec<usize> = tail
            .lines()
            .skip(3)
            .take_while(|l| l.ends_with(" n "))
            .map(|l| l[..10].parse().unwrap())
            .collect();
        assert!(!offsets.is_empty());
        for (i, offset) in offsets.iter().enumerate() {
            let expected = format!("{} 0 obj", i + 1);
            assert!(bytes[*offset..].starts_with(expected.as_bytes()));
        }
    }
}
