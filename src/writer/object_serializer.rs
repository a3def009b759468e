//! PDF object serialization.
//!
//! Serializes PDF objects to their byte representation according to
//! PDF specification ISO 32000-1:2008 Section 7.3.

use std::io::Write;

use crate::object::{Dictionary, Object};

/// Serializer for PDF objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectSerializer;

impl ObjectSerializer {
    /// Create a serializer. Dictionaries are written on a single line.
    pub fn new() -> Self {
        Self
    }

    /// Write an indirect object definition.
    ///
    /// Format: `{id} {gen} obj\n{object}\nendobj\n`
    pub fn write_indirect<W: Write>(
        &self,
        w: &mut W,
        id: u32,
        gen: u16,
        obj: &Object,
    ) -> std::io::Result<()> {
        writeln!(w, "{} {} obj", id, gen)?;
        self.write_object(w, obj)?;
        write!(w, "\nendobj\n")
    }

    /// Write any object.
    pub fn write_object<W: Write>(&self, w: &mut W, obj: &Object) -> std::io::Result<()> {
        match obj {
            Object::Null => write!(w, "null"),
            Object::Boolean(b) => write!(w, "{}", b),
            Object::Integer(i) => write!(w, "{}", i),
            Object::Real(r) => write_real(w, *r),
            Object::String(s) => write_string(w, s),
            Object::Name(n) => write_name(w, n),
            Object::Array(arr) => {
                write!(w, "[")?;
                for (i, item) in arr.iter().enumerate() {
                    if i > 0 {
                        write!(w, " ")?;
                    }
                    self.write_object(w, item)?;
                }
                write!(w, "]")
            },
            Object::Dictionary(dict) => self.write_dictionary(w, dict),
            Object::Stream { dict, data } => {
                let mut dict = dict.clone();
                dict.insert("Length".to_string(), Object::Integer(data.len() as i64));
                self.write_dictionary(w, &dict)?;
                write!(w, "\nstream\n")?;
                w.write_all(data)?;
                write!(w, "\nendstream")
            },
            Object::Reference(r) => write!(w, "{} {} R", r.id, r.gen),
        }
    }

    fn write_dictionary<W: Write>(&self, w: &mut W, dict: &Dictionary) -> std::io::Result<()> {
        write!(w, "<<")?;
        for (i, (key, value)) in dict.iter().enumerate() {
            if i > 0 {
                write!(w, " ")?;
            }
            write_name(w, key)?;
            write!(w, " ")?;
            self.write_object(w, value)?;
        }
        write!(w, ">>")
    }
}

/// Write a real number, trimming trailing zeros (at most 5 decimals).
pub(crate) fn write_real<W: Write>(w: &mut W, value: f64) -> std::io::Result<()> {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        write!(w, "{}", value as i64)
    } else {
        let formatted = format!("{:.5}", value);
        let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
        write!(w, "{}", trimmed)
    }
}

/// Write a literal string `(...)`, escaping delimiters and any byte that is
/// not printable ASCII as `\ddd` octal.
pub(crate) fn write_string<W: Write>(w: &mut W, data: &[u8]) -> std::io::Result<()> {
    write!(w, "(")?;
    write_escaped(w, data)?;
    write!(w, ")")
}

/// Escape bytes for use inside a literal string.
pub(crate) fn write_escaped<W: Write>(w: &mut W, data: &[u8]) -> std::io::Result<()> {
    for &byte in data {
        match byte {
            b'(' => write!(w, "\\(")?,
            b')' => write!(w, "\\)")?,
            b'\\' => write!(w, "\\\\")?,
            b'\n' => write!(w, "\\n")?,
            b'\r' => write!(w, "\\r")?,
            b'\t' => write!(w, "\\t")?,
            0x20..=0x7E => w.write_all(&[byte])?,
            _ => write!(w, "\\{:03o}", byte)?,
        }
    }
    Ok(())
}

/// Write a name, escaping delimiters and non-regular bytes as `#xx`.
fn write_name<W: Write>(w: &mut W, name: &str) -> std::io::Result<()> {
    write!(w, "/")?;
    for byte in name.bytes() {
        match byte {
            b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%' | b'#' => {
                write!(w, "#{:02X}", byte)?
            },
            0x21..=0x7E => w.write_all(&[byte])?,
            _ => write!(w, "#{:02X}", byte)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ser(obj: &Object) -> String {
        let mut buf = Vec::new();
        ObjectSerializer::new().write_object(&mut buf, obj).unwrap();
        String::from_utf8_lossy(&buf).into_owned()
    }

    #[test]
    fn test_serialize_scalars() {
        assert_eq!(ser(&Object::Null), "null");
        assert_eq!(ser(&Object::Boolean(true)), "true");
        assert_eq!(ser(&Object::Integer(-42)), "-42");
        assert_eq!(ser(&Object::Real(500.0)), "500");
        assert_eq!(ser(&Object::Real(0.25)), "0.25");
    }

    #[test]
    fn test_serialize_string_escapes() {
        assert_eq!(ser(&Object::string("a(b)c\\")), "(a\\(b\\)c\\\\)");
        assert_eq!(ser(&Object::String(vec![b'A', 0xE9])), "(A\\351)");
    }

    #[test]
    fn test_serialize_name_with_special_chars() {
        assert_eq!(ser(&Object::name("Type")), "/Type");
        assert_eq!(ser(&Object::name("A B")), "/A#20B");
        assert_eq!(ser(&Object::name("a/b")), "/a#2Fb");
    }

    #[test]
    fn test_serialize_dictionary_is_sorted() {
        let obj = Object::dict([("Type", Object::name("Page")), ("Count", Object::Integer(1))]);
        assert_eq!(ser(&obj), "<</Count 1 /Type /Page>>");
    }

    #[test]
    fn test_serialize_empty_dictionary() {
        assert_eq!(ser(&Object::Dictionary(Dictionary::new())), "<<>>");
    }

    #[test]
    fn test_serialize_stream_sets_length() {
        let obj = Object::stream(Dictionary::new(), b"BT ET".to_vec());
        assert_eq!(ser(&obj), "<</Length 5>>\nstream\nBT ET\nendstream");
    }

    #[test]
    fn test_serialize_indirect() {
        let mut buf = Vec::new();
        ObjectSerializer::new()
            .write_indirect(&mut buf, 3, 0, &Object::reference(7))
            .unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "3 0 obj\n7 0 R\nendobj\n");
    }

    #[test]
    fn test_rect_helper() {
        assert_eq!(ser(&Object::rect(0.0, 0.0, 500.0, 500.0)), "[0 0 500 500]");
    }
}
