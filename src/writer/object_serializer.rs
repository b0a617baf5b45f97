//! PDF object syntax.
//!
//! Output is compact: no whitespace inside dictionaries beyond the single
//! space between a key and its value, and one indirect object per
//! `obj`/`endobj` block.

use crate::object::{Dictionary, Object};
use std::io::Write;

/// Writes [`Object`]s in PDF syntax.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectSerializer;

impl ObjectSerializer {
    /// Serialize one object.
    pub fn serialize(&self, obj: &Object) -> std::io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        write_object(&mut buf, obj)?;
        Ok(buf)
    }

    /// Append `{id} 0 obj\n{object}\nendobj\n` to `out`.
    pub fn write_indirect(&self, out: &mut Vec<u8>, id: u32, obj: &Object) -> std::io::Result<()> {
        writeln!(out, "{} 0 obj", id)?;
        write_object(out, obj)?;
        out.extend_from_slice(b"\nendobj\n");
        Ok(())
    }
}

fn write_object<W: Write>(w: &mut W, obj: &Object) -> std::io::Result<()> {
    match obj {
        Object::Integer(i) => write!(w, "{}", i),
        Object::Real(r) => w.write_all(format_number(*r).as_bytes()),
        Object::String(s) => write_string(w, s),
        Object::Name(n) => write_name(w, n),
        Object::Array(items) => {
            w.write_all(b"[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    w.write_all(b" ")?;
                }
                write_object(w, item)?;
            }
            w.write_all(b"]")
        },
        Object::Dictionary(dict) => write_dictionary(w, dict),
        Object::Stream { dict, data } => {
            if dict.contains_key("Length") {
                write_dictionary(w, dict)?;
            } else {
                let mut with_length = dict.clone();
                with_length.insert("Length".to_string(), Object::count(data.len()));
                write_dictionary(w, &with_length)?;
            }
            w.write_all(b"\nstream\n")?;
            w.write_all(data)?;
            w.write_all(b"\nendstream")
        },
        Object::Reference(r) => write!(w, "{}", r),
    }
}

fn write_dictionary<W: Write>(w: &mut W, dict: &Dictionary) -> std::io::Result<()> {
    w.write_all(b"<<")?;
    for (key, value) in dict {
        write_name(w, key)?;
        w.write_all(b" ")?;
        write_object(w, value)?;
    }
    w.write_all(b">>")
}

/// Literal `(...)` when every byte is printable ASCII, hex `<...>` otherwise.
fn write_string<W: Write>(w: &mut W, data: &[u8]) -> std::io::Result<()> {
    if !data.iter().all(|b| (0x20..=0x7E).contains(b)) {
        w.write_all(b"<")?;
        for byte in data {
            write!(w, "{:02X}", byte)?;
        }
        return w.write_all(b">");
    }

    w.write_all(b"(")?;
    for &byte in data {
        if matches!(byte, b'(' | b')' | b'\\') {
            w.write_all(b"\\")?;
        }
        w.write_all(&[byte])?;
    }
    w.write_all(b")")
}

/// `/Name`, with anything outside the regular character set as `#xx`.
fn write_name<W: Write>(w: &mut W, name: &str) -> std::io::Result<()> {
    w.write_all(b"/")?;
    for byte in name.bytes() {
        let regular = byte.is_ascii_graphic() && !b"()<>[]{}/%#".contains(&byte);
        if regular {
            w.write_all(&[byte])?;
        } else {
            write!(w, "#{:02X}", byte)?;
        }
    }
    Ok(())
}

/// At most 5 decimals, no trailing zeros, no `-0`.
pub(crate) fn format_number(value: f64) -> String {
    let formatted = format!("{:.5}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}
