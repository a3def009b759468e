//! PDF object types.
//!
//! The writer builds documents out of these values and serializes them with
//! [`ObjectSerializer`](crate::writer::ObjectSerializer). Dictionaries are
//! ordered maps so output is deterministic.

use std::collections::BTreeMap;

/// Dictionary entries keyed by name (without the leading `/`).
pub type Dictionary = BTreeMap<String, Object>;

/// PDF object representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    /// Null object
    Null,
    /// Boolean value
    Boolean(bool),
    /// Integer value
    Integer(i64),
    /// Real (floating-point) value
    Real(f64),
    /// String (byte array)
    String(Vec<u8>),
    /// Name (starting with /)
    Name(String),
    /// Array of objects
    Array(Vec<Object>),
    /// Dictionary (key-value pairs)
    Dictionary(Dictionary),
    /// Stream (dictionary + data)
    Stream {
        /// Stream dictionary
        dict: Dictionary,
        /// Stream data
        data: bytes::Bytes,
    },
    /// Indirect object reference
    Reference(ObjectRef),
}

/// Reference to an indirect object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectRef {
    /// Object number
    pub id: u32,
    /// Generation number
    pub gen: u16,
}

impl ObjectRef {
    /// Create a new object reference.
    pub fn new(id: u32, gen: u16) -> Self {
        Self { id, gen }
    }
}

impl Object {
    /// Name object.
    pub fn name(s: &str) -> Object {
        Object::Name(s.to_string())
    }

    /// String object holding the raw bytes of `s`.
    pub fn string(s: &str) -> Object {
        Object::String(s.as_bytes().to_vec())
    }

    /// Text string for document metadata.
    ///
    /// ASCII is written as is, which PDFDocEncoding shares. Anything else is
    /// written as UTF-16BE behind a `FE FF` byte order mark.
    pub fn text_string(s: &str) -> Object {
        if s.is_ascii() {
            return Object::string(s);
        }
        let mut bytes = Vec::with_capacity(2 + s.len() * 2);
        bytes.extend_from_slice(&[0xFE, 0xFF]);
        for unit in s.encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        Object::String(bytes)
    }

    /// Reference to object `id` generation 0.
    pub fn reference(id: u32) -> Object {
        Object::Reference(ObjectRef::new(id, 0))
    }

    /// Dictionary from `(key, value)` pairs.
    pub fn dict<'a>(entries: impl IntoIterator<Item = (&'a str, Object)>) -> Object {
        Object::Dictionary(entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }

    /// Rectangle array `[llx lly urx ury]` from origin and size.
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Object {
        Object::Array(vec![
            Object::Real(x),
            Object::Real(y),
            Object::Real(x + width),
            Object::Real(y + height),
        ])
    }

    /// Stream object. `Length` is filled in at serialization time.
    pub fn stream(dict: Dictionary, data: impl Into<bytes::Bytes>) -> Object {
        Object::Stream {
            dict,
            data: data.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dict_helper() {
        let obj = Object::dict([("Type", Object::name("Page")), ("Count", Object::Integer(1))]);
        match obj {
            Object::Dictionary(dict) => {
                assert_eq!(dict.get("Type"), Some(&Object::Name("Page".to_string())));
                assert_eq!(dict.get("Count"), Some(&Object::Integer(1)));
            },
            other => panic!("expected dictionary, got {:?}", other),
        }
    }

    #[test]
    fn test_reference_is_generation_zero() {
        assert_eq!(Object::reference(7), Object::Reference(ObjectRef { id: 7, gen: 0 }));
    }

    #[test]
    fn test_text_string_keeps_ascii() {
        assert_eq!(Object::text_string("notes.txt"), Object::String(b"notes.txt".to_vec()));
    }

    #[test]
    fn test_text_string_non_ascii_is_utf16be() {
        assert_eq!(
            Object::text_string("ñ😀"),
            Object::String(vec![0xFE, 0xFF, 0x00, 0xF1, 0xD8, 0x3D, 0xDE, 0x00])
        );
    }
}
