//! PDF objects emitted by the writer.
//!
//! Only the object kinds a generated business document needs are modeled:
//! no null or boolean values, no parsing support. Dictionaries are sorted
//! maps so serialization is deterministic.

use std::collections::BTreeMap;

/// Dictionary entries, kept sorted by key.
pub type Dictionary = BTreeMap<String, Object>;

/// A PDF object as written to the file body.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    /// Integer value
    Integer(i64),
    /// Real value, written with at most 5 decimals
    Real(f64),
    /// Byte string
    String(Vec<u8>),
    /// Name, written with a leading `/`
    Name(String),
    /// Array of objects
    Array(Vec<Object>),
    /// Dictionary
    Dictionary(Dictionary),
    /// Stream; `/Length` is filled in on write when missing
    Stream {
        /// Stream dictionary
        dict: Dictionary,
        /// Encoded stream data
        data: bytes::Bytes,
    },
    /// Indirect reference
    Reference(ObjectRef),
}

/// Indirect object number. Generated files never reuse numbers, so the
/// generation is always 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectRef(pub u32);

impl std::fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} 0 R", self.0)
    }
}

impl Object {
    /// `/name`
    pub fn name(name: &str) -> Object {
        Object::Name(name.to_string())
    }

    /// Text string for the Info dictionary: ASCII as is, anything else as
    /// UTF-16BE with a byte order mark.
    pub fn text(text: &str) -> Object {
        if text.is_ascii() {
            return Object::String(text.as_bytes().to_vec());
        }
        let mut bytes = vec![0xFE, 0xFF];
        bytes.extend(text.encode_utf16().flat_map(u16::to_be_bytes));
        Object::String(bytes)
    }

    /// Integer from a count or length.
    pub fn count(n: usize) -> Object {
        Object::Integer(n as i64)
    }

    /// Reference to object `id`.
    pub fn reference(id: u32) -> Object {
        Object::Reference(ObjectRef(id))
    }

    /// Dictionary from `(key, value)` pairs.
    pub fn dict<'a>(entries: impl IntoIterator<Item = (&'a str, Object)>) -> Object {
        Object::Dictionary(entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }

    /// `[0 0 width height]` page box.
    pub fn media_box(width: f32, height: f32) -> Object {
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(width as f64),
            Object::Real(height as f64),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_display() {
        assert_eq!(ObjectRef(12).to_string(), "12 0 R");
    }

    #[test]
    fn test_dict_sorts_keys() {
        let Object::Dictionary(dict) = Object::dict([
            ("Type", Object::name("Page")),
            ("Count", Object::count(1)),
        ]) else {
            panic!("expected dictionary");
        };
        let keys: Vec<&str> = dict.keys().map(String::as_str).collect();
        assert_eq!(keys, ["Count", "Type"]);
    }

    #[test]
    fn test_media_box() {
        assert_eq!(
            Object::media_box(612.0, 792.0),
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(612.0),
                Object::Real(792.0),
            ])
        );
    }
}
