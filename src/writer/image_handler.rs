//! Image handling for PDF generation.
//!
//! Per PDF spec Section 8.9, images are represented as XObjects.
//!
//! # Supported Formats
//!
//! - **JPEG**: Pass-through embedding using DCTDecode filter
//! - **PNG**: Decoded samples re-compressed with FlateDecode, alpha as SMask

use std::io::Write;

use crate::input::MimeType;
use crate::object::{Dictionary, Object};

/// Image format for PDF embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// JPEG image (DCTDecode filter)
    Jpeg,
    /// PNG image (FlateDecode filter)
    Png,
}

/// Color space for image data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    /// Grayscale (1 component per pixel)
    DeviceGray,
    /// RGB color (3 components per pixel)
    DeviceRGB,
    /// CMYK color (4 components per pixel)
    DeviceCMYK,
}

impl ColorSpace {
    /// Get the PDF name for this color space.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            ColorSpace::DeviceGray => "DeviceGray",
            ColorSpace::DeviceRGB => "DeviceRGB",
            ColorSpace::DeviceCMYK => "DeviceCMYK",
        }
    }
}

/// Image embedding error.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    /// The declared type is not a supported raster format
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// Failed to decode image
    #[error("Failed to decode image: {0}")]
    DecodeError(String),

    /// Failed to compress image data
    #[error("Compression error: {0}")]
    CompressionError(String),

    /// Invalid image data
    #[error("Invalid image data: {0}")]
    InvalidData(String),
}

impl From<ImageError> for crate::error::Error {
    fn from(err: ImageError) -> Self {
        match err {
            ImageError::UnsupportedFormat(mime) => crate::error::Error::UnsupportedType(mime),
            other => crate::error::Error::DecodeFailure(other.to_string()),
        }
    }
}

/// Image data ready for embedding.
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Bits per component (always 8 here)
    pub bits_per_component: u8,
    /// Color space
    pub color_space: ColorSpace,
    /// Image format
    pub format: ImageFormat,
    /// Encoded image data (JPEG stream or Flate-compressed samples)
    pub data: Vec<u8>,
    /// Flate-compressed alpha channel, if any
    pub soft_mask: Option<Vec<u8>>,
}

impl ImageData {
    /// Decode `data` as the raster format named by `mime`.
    ///
    /// The declared type wins: PNG bytes declared as `image/jpeg` fail.
    pub fn decode(mime: &MimeType, data: &[u8]) -> Result<Self, ImageError> {
        match mime {
            MimeType::Jpeg => Self::from_jpeg(data.to_vec()),
            MimeType::Png => Self::from_png(data),
            other => Err(ImageError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Load a JPEG image.
    ///
    /// The data is fully decoded once to make sure it is a valid JPEG, then
    /// embedded unchanged.
    pub fn from_jpeg(data: Vec<u8>) -> Result<Self, ImageError> {
        let (width, height, color_space) = parse_jpeg_header(&data)?;
        image::load_from_memory_with_format(&data, image::ImageFormat::Jpeg)
            .map_err(|e| ImageError::DecodeError(e.to_string()))?;

        Ok(Self {
            width,
            height,
            bits_per_component: 8,
            color_space,
            format: ImageFormat::Jpeg,
            data,
            soft_mask: None,
        })
    }

    /// Load a PNG image.
    pub fn from_png(data: &[u8]) -> Result<Self, ImageError> {
        use image::GenericImageView;

        let img = image::load_from_memory_with_format(data, image::ImageFormat::Png)
            .map_err(|e| ImageError::DecodeError(e.to_string()))?;
        let (width, height) = img.dimensions();
        let pixels = (width as usize) * (height as usize);

        let (color_space, samples, alpha) = match img.color() {
            image::ColorType::L8 | image::ColorType::L16 => {
                (ColorSpace::DeviceGray, img.to_luma8().into_raw(), None)
            },
            image::ColorType::La8 | image::ColorType::La16 => {
                let la = img.to_luma_alpha8();
                let mut gray = Vec::with_capacity(pixels);
                let mut alpha = Vec::with_capacity(pixels);
                for p in la.pixels() {
                    gray.push(p.0[0]);
                    alpha.push(p.0[1]);
                }
                (ColorSpace::DeviceGray, gray, Some(alpha))
            },
            image::ColorType::Rgba8 | image::ColorType::Rgba16 | image::ColorType::Rgba32F => {
                let rgba = img.to_rgba8();
                let mut rgb = Vec::with_capacity(pixels * 3);
                let mut alpha = Vec::with_capacity(pixels);
                for p in rgba.pixels() {
                    rgb.extend_from_slice(&p.0[..3]);
                    alpha.push(p.0[3]);
                }
                (ColorSpace::DeviceRGB, rgb, Some(alpha))
            },
            _ => (ColorSpace::DeviceRGB, img.to_rgb8().into_raw(), None),
        };

        // A fully opaque alpha channel adds nothing.
        let alpha = alpha.filter(|a| a.iter().any(|&v| v != 0xFF));

        Ok(Self {
            width,
            height,
            bits_per_component: 8,
            color_space,
            format: ImageFormat::Png,
            data: compress_image_data(&samples)?,
            soft_mask: alpha.map(|a| compress_image_data(&a)).transpose()?,
        })
    }

    /// Build the Image XObject dictionary (without `Length` or `SMask`).
    pub fn build_xobject_dict(&self) -> Dictionary {
        let mut dict = Dictionary::new();
        dict.insert("Type".to_string(), Object::name("XObject"));
        dict.insert("Subtype".to_string(), Object::name("Image"));
        dict.insert("Width".to_string(), Object::Integer(self.width as i64));
        dict.insert("Height".to_string(), Object::Integer(self.height as i64));
        dict.insert("ColorSpace".to_string(), Object::name(self.color_space.pdf_name()));
        dict.insert(
            "BitsPerComponent".to_string(),
            Object::Integer(self.bits_per_component as i64),
        );
        let filter = match self.format {
            ImageFormat::Jpeg => "DCTDecode",
            ImageFormat::Png => "FlateDecode",
        };
        dict.insert("Filter".to_string(), Object::name(filter));
        dict
    }

    /// Build the soft mask (alpha channel) XObject dictionary.
    pub fn build_soft_mask_dict(&self) -> Option<Dictionary> {
        self.soft_mask.as_ref().map(|_| {
            let mut dict = Dictionary::new();
            dict.insert("Type".to_string(), Object::name("XObject"));
            dict.insert("Subtype".to_string(), Object::name("Image"));
            dict.insert("Width".to_string(), Object::Integer(self.width as i64));
            dict.insert("Height".to_string(), Object::Integer(self.height as i64));
            dict.insert("ColorSpace".to_string(), Object::name("DeviceGray"));
            dict.insert("BitsPerComponent".to_string(), Object::Integer(8));
            dict.insert("Filter".to_string(), Object::name("FlateDecode"));
            dict
        })
    }
}

/// Parse JPEG header to extract dimensions and color space.
fn parse_jpeg_header(data: &[u8]) -> Result<(u32, u32, ColorSpace), ImageError> {
    if data.len() < 2 || data[0] != 0xFF || data[1] != 0xD8 {
        return Err(ImageError::InvalidData("Not a valid JPEG".to_string()));
    }

    let mut pos = 2;
    while pos + 1 < data.len() {
        if data[pos] != 0xFF {
            pos += 1;
            continue;
        }

        let marker = data[pos + 1];
        pos += 2;

        // Fill bytes and stuffed zeros
        if marker == 0xFF || marker == 0x00 {
            continue;
        }

        // SOF markers (Start of Frame), excluding DHT/JPG/DAC
        if matches!(marker, 0xC0..=0xCF) && !matches!(marker, 0xC4 | 0xC8 | 0xCC) {
            if pos + 8 > data.len() {
                return Err(ImageError::InvalidData("Truncated JPEG header".to_string()));
            }

            let height = u16::from_be_bytes([data[pos + 3], data[pos + 4]]) as u32;
            let width = u16::from_be_bytes([data[pos + 5], data[pos + 6]]) as u32;
            let color_space = match data[pos + 7] {
                1 => ColorSpace::DeviceGray,
                4 => ColorSpace::DeviceCMYK,
                _ => ColorSpace::DeviceRGB,
            };

            return Ok((width, height, color_space));
        }

        if pos + 2 > data.len() {
            break;
        }
        let length = u16::from_be_bytes([data[pos], data[pos + 1]]) as usize;
        pos += length;
    }

    Err(ImageError::InvalidData("Could not find JPEG dimensions".to_string()))
}

/// Compress samples with Flate.
fn compress_image_data(data: &[u8]) -> Result<Vec<u8>, ImageError> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| ImageError::CompressionError(e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| ImageError::CompressionError(e.to_string()))
}

/// Image placement on a PDF page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePlacement {
    /// X position (left edge)
    pub x: f32,
    /// Y position (bottom edge)
    pub y: f32,
    /// Display width
    pub width: f32,
    /// Display height
    pub height: f32,
}

impl ImagePlacement {
    /// Create a new image placement.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Natural size at scale 1.0, left edge at 0, top edge on the page top.
    ///
    /// Images taller or wider than the page overflow; nothing is scaled.
    pub fn top_left(image: &ImageData, page_height: f32) -> Self {
        let width = image.width as f32;
        let height = image.height as f32;
        Self::new(0.0, page_height - height, width, height)
    }
}
