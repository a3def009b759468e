//! PDF content stream builder.
//!
//! Builds PDF content streams containing graphics and text operators
//! according to PDF specification ISO 32000-1:2008 Section 8-9.

use std::io::Write;

use super::encoding;
use super::object_serializer::{write_escaped, write_real};
use crate::error::Result;

/// Operations that can be added to a content stream.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentStreamOp {
    /// Save graphics state (q)
    SaveState,
    /// Restore graphics state (Q)
    RestoreState,
    /// Set transformation matrix (cm)
    Transform(f32, f32, f32, f32, f32, f32),
    /// Begin text object (BT)
    BeginText,
    /// End text object (ET)
    EndText,
    /// Set font resource and size (Tf)
    SetFont(String, f32),
    /// Set text matrix (Tm)
    SetTextMatrix(f32, f32, f32, f32, f32, f32),
    /// Set text leading (TL)
    SetTextLeading(f32),
    /// Move to next line (T*)
    NextLine,
    /// Show already-encoded text (Tj)
    ShowText(Vec<u8>),
    /// Paint XObject (Do)
    PaintXObject(String),
}

/// Builder for PDF content streams.
#[derive(Debug, Default)]
pub struct ContentStreamBuilder {
    operations: Vec<ContentStreamOp>,
    in_text_object: bool,
    current_font: Option<(String, f32)>,
    /// Characters replaced while encoding text
    replaced_chars: usize,
}

impl ContentStreamBuilder {
    /// Create a new content stream builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an operation to the stream.
    pub fn op(&mut self, op: ContentStreamOp) -> &mut Self {
        self.operations.push(op);
        self
    }

    /// Begin a text object.
    pub fn begin_text(&mut self) -> &mut Self {
        if !self.in_text_object {
            self.op(ContentStreamOp::BeginText);
            self.in_text_object = true;
        }
        self
    }

    /// End a text object.
    pub fn end_text(&mut self) -> &mut Self {
        if self.in_text_object {
            self.op(ContentStreamOp::EndText);
            self.in_text_object = false;
            self.current_font = None;
        }
        self
    }

    /// Select a font resource for text operations.
    pub fn set_font(&mut self, resource: &str, size: f32) -> &mut Self {
        let wanted = (resource.to_string(), size);
        if self.current_font.as_ref() != Some(&wanted) {
            self.op(ContentStreamOp::SetFont(resource.to_string(), size));
            self.current_font = Some(wanted);
        }
        self
    }

    /// Draw a block of text with its first baseline at (`x`, `y`).
    ///
    /// Line breaks (`\r\n`, `\r`, `\n`) move down by `leading`; tabs become
    /// four spaces. Lines are never wrapped or clipped.
    pub fn text_block(&mut self, text: &str, x: f32, y: f32, leading: f32) -> &mut Self {
        self.begin_text();
        self.op(ContentStreamOp::SetTextLeading(leading));
        self.op(ContentStreamOp::SetTextMatrix(1.0, 0.0, 0.0, 1.0, x, y));

        let normalized = text.replace("\r\n", "\n").replace('\r', "\n").replace('\t', "    ");
        for (i, line) in normalized.split('\n').enumerate() {
            if i > 0 {
                self.op(ContentStreamOp::NextLine);
            }
            let (bytes, replaced) = encoding::encode_line(line);
            self.replaced_chars += replaced;
            self.op(ContentStreamOp::ShowText(bytes));
        }
        self
    }

    /// Draw an image XObject with its lower-left corner at (`x`, `y`).
    pub fn draw_image(
        &mut self,
        resource_id: &str,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> &mut Self {
        self.end_text();
        self.op(ContentStreamOp::SaveState);
        self.op(ContentStreamOp::Transform(width, 0.0, 0.0, height, x, y));
        self.op(ContentStreamOp::PaintXObject(resource_id.to_string()));
        self.op(ContentStreamOp::RestoreState);
        self
    }

    /// Draw an image using an [`ImagePlacement`](super::image_handler::ImagePlacement).
    pub fn draw_image_at(
        &mut self,
        resource_id: &str,
        placement: &super::image_handler::ImagePlacement,
    ) -> &mut Self {
        self.draw_image(resource_id, placement.x, placement.y, placement.width, placement.height)
    }

    /// Number of characters that were replaced during text encoding.
    pub fn replaced_chars(&self) -> usize {
        self.replaced_chars
    }

    /// Build the content stream to bytes. An open text object is closed.
    pub fn build(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        for op in &self.operations {
            write_op(&mut buf, op)?;
            writeln!(buf)?;
        }
        if self.in_text_object {
            write_op(&mut buf, &ContentStreamOp::EndText)?;
            writeln!(buf)?;
        }
        Ok(buf)
    }
}

fn write_nums<W: Write>(w: &mut W, nums: &[f32]) -> std::io::Result<()> {
    for n in nums {
        write_real(w, *n as f64)?;
        write!(w, " ")?;
    }
    Ok(())
}

fn write_op<W: Write>(w: &mut W, op: &ContentStreamOp) -> std::io::Result<()> {
    match op {
        ContentStreamOp::SaveState => write!(w, "q"),
        ContentStreamOp::RestoreState => write!(w, "Q"),
        ContentStreamOp::Transform(a, b, c, d, e, f) => {
            write_nums(w, &[*a, *b, *c, *d, *e, *f])?;
            write!(w, "cm")
        },
        ContentStreamOp::BeginText => write!(w, "BT"),
        ContentStreamOp::EndText => write!(w, "ET"),
        ContentStreamOp::SetFont(name, size) => {
            write!(w, "/{} ", name)?;
            write_nums(w, &[*size])?;
            write!(w, "Tf")
        },
        ContentStreamOp::SetTextMatrix(a, b, c, d, e, f) => {
            write_nums(w, &[*a, *b, *c, *d, *e, *f])?;
            write!(w, "Tm")
        },
        ContentStreamOp::SetTextLeading(leading) => {
            write_nums(w, &[*leading])?;
            write!(w, "TL")
        },
        ContentStreamOp::NextLine => write!(w, "T*"),
        ContentStreamOp::ShowText(bytes) => {
            write!(w, "(")?;
            write_escaped(w, bytes)?;
            write!(w, ") Tj")
        },
        ContentStreamOp::PaintXObject(name) => write!(w, "/{} Do", name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(builder: &ContentStreamBuilder) -> String {
        String::from_utf8(builder.build().unwrap()).unwrap()
    }

    #[test]
    fn test_simple_text() {
        let mut builder = ContentStreamBuilder::new();
        builder
            .begin_text()
            .set_font("F1", 12.0)
            .text_block("Hello, World!", 50.0, 450.0, 24.0)
            .end_text();

        let content = render(&builder);
        assert_eq!(
            content,
            "BT\n/F1 12 Tf\n24 TL\n1 0 0 1 50 450 Tm\n(Hello, World!) Tj\nET\n"
        );
    }

    #[test]
    fn test_multiline_text_uses_leading() {
        let mut builder = ContentStreamBuilder::new();
        builder.set_font("F1", 12.0).text_block("a\r\nb\rc", 0.0, 0.0, 24.0);
        let content = render(&builder);
        assert!(content.contains("(a) Tj\nT*\n(b) Tj\nT*\n(c) Tj"));
        // Build closes the open text object.
        assert!(content.ends_with("ET\n"));
    }

    #[test]
    fn test_tabs_expand() {
        let mut builder = ContentStreamBuilder::new();
        builder.text_block("a\tb", 0.0, 0.0, 24.0);
        assert!(render(&builder).contains("(a    b) Tj"));
    }

    #[test]
    fn test_escaped_text_and_replacement() {
        let mut builder = ContentStreamBuilder::new();
        builder.text_block("(x) é 日", 0.0, 0.0, 24.0);
        let content = render(&builder);
        assert!(content.contains("(\\(x\\) \\351 ?) Tj"));
        assert_eq!(builder.replaced_chars(), 1);
    }

    #[test]
    fn test_draw_image() {
        let mut builder = ContentStreamBuilder::new();
        builder.draw_image("Im1", 0.0, 400.0, 100.0, 100.0);
        assert_eq!(render(&builder), "q\n100 0 0 100 0 400 cm\n/Im1 Do\nQ\n");
    }

    #[test]
    fn test_draw_image_closes_text() {
        let mut builder = ContentStreamBuilder::new();
        builder.text_block("x", 0.0, 0.0, 12.0);
        builder.draw_image("Im1", 0.0, 0.0, 1.0, 1.0);
        let out = render(&builder);
        let end = out.find("ET\n").unwrap();
        let save = out.find("q\n").unwrap();
        assert!(end < save);
    }

    #[test]
    fn test_set_font_deduplicates() {
        let mut builder = ContentStreamBuilder::new();
        builder.begin_text().set_font("F1", 12.0).set_font("F1", 12.0);
        builder.end_text();
        assert_eq!(render(&builder).matches(" Tf\n").count(), 1);
    }
}
