//! Page content streams.
//!
//! Operators are appended directly to a byte buffer, one per line. The
//! builder tracks just enough graphics state to skip redundant `BT`/`ET`
//! pairs and font selections.

use super::object_serializer::format_number;
use std::io::Write;

/// Accumulates the operators of one page.
#[derive(Debug, Default)]
pub struct ContentStreamBuilder {
    buf: Vec<u8>,
    font: Option<(String, f32)>,
    in_text: bool,
}

impl ContentStreamBuilder {
    /// Empty stream.
    pub fn new() -> Self {
        Self::default()
    }

    fn line(&mut self, operands: &[f32], operator: &str) -> &mut Self {
        for value in operands {
            self.buf.extend_from_slice(format_number(*value as f64).as_bytes());
            self.buf.push(b' ');
        }
        self.buf.extend_from_slice(operator.as_bytes());
        self.buf.push(b'\n');
        self
    }

    /// Open a text object unless one is already open.
    pub fn begin_text(&mut self) -> &mut Self {
        if !self.in_text {
            self.in_text = true;
            self.line(&[], "BT");
        }
        self
    }

    /// Close the open text object, if any.
    pub fn end_text(&mut self) -> &mut Self {
        if self.in_text {
            self.in_text = false;
            self.line(&[], "ET");
        }
        self
    }

    /// Select a font resource (e.g. `F1`). Repeated selections are skipped.
    pub fn set_font(&mut self, resource: &str, size: f32) -> &mut Self {
        let unchanged = matches!(&self.font, Some((r, s)) if r == resource && *s == size);
        if !unchanged {
            // `Tf` is part of the graphics state, so it survives ET/BT.
            self.buf.push(b'/');
            self.buf.extend_from_slice(resource.as_bytes());
            self.buf.push(b' ');
            self.line(&[size], "Tf");
            self.font = Some((resource.to_string(), size));
        }
        self
    }

    /// Show text with its left baseline origin at (x, y).
    pub fn text(&mut self, text: &str, x: f32, y: f32) -> &mut Self {
        self.begin_text();
        self.line(&[1.0, 0.0, 0.0, 1.0, x, y], "Tm");
        self.buf.push(b'(');
        escape_into(&mut self.buf, &encode_win_ansi(text));
        self.buf.extend_from_slice(b") Tj\n");
        self
    }

    /// Fill gray level (0 = black, 1 = white).
    pub fn fill_gray(&mut self, gray: f32) -> &mut Self {
        self.line(&[gray], "g")
    }

    /// Stroke gray level (0 = black, 1 = white).
    pub fn stroke_gray(&mut self, gray: f32) -> &mut Self {
        self.line(&[gray], "G")
    }

    /// Line width in points.
    pub fn set_line_width(&mut self, width: f32) -> &mut Self {
        self.line(&[width], "w")
    }

    /// Begin a subpath.
    pub fn move_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.line(&[x, y], "m")
    }

    /// Straight segment to (x, y).
    pub fn line_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.line(&[x, y], "l")
    }

    /// Rectangle path with lower-left corner (x, y).
    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) -> &mut Self {
        self.line(&[x, y, width, height], "re")
    }

    /// Stroke the current path.
    pub fn stroke(&mut self) -> &mut Self {
        self.line(&[], "S")
    }

    /// Fill, then stroke, the current path.
    pub fn fill_stroke(&mut self) -> &mut Self {
        self.line(&[], "B")
    }

    /// `q`
    pub fn save_state(&mut self) -> &mut Self {
        self.line(&[], "q")
    }

    /// `Q`
    pub fn restore_state(&mut self) -> &mut Self {
        self.line(&[], "Q")
    }

    /// Stream bytes. A text object left open is closed in the output.
    pub fn build(&self) -> std::io::Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.buf.len() + 3);
        out.write_all(&self.buf)?;
        if self.in_text {
            out.write_all(b"ET\n")?;
        }
        Ok(out)
    }
}

/// Literal-string body. Bytes outside printable ASCII use octal escapes so
/// the stream stays 7-bit.
fn escape_into(out: &mut Vec<u8>, bytes: &[u8]) {
    for &byte in bytes {
        match byte {
            b'(' | b')' | b'\\' => out.extend_from_slice(&[b'\\', byte]),
            0x20..=0x7E => out.push(byte),
            _ => out.extend_from_slice(format!("\\{:03o}", byte).as_bytes()),
        }
    }
}

/// Encode text for a standard font with `/WinAnsiEncoding`.
///
/// Latin-1 maps straight through; the punctuation, currency signs and
/// letters that WinAnsi places in 0x80..0x9F are mapped explicitly. Anything
/// else becomes `?`, and a tab becomes a space.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

/// WinAnsi code drawn for `ch`; the font metrics measure this same code.
pub(crate) fn win_ansi_byte(ch: char) -> u8 {
    match ch {
        '\u{20}'..='\u{7E}' | '\u{A0}'..='\u{FF}' => ch as u8,
        '\t' => b' ',
        '€' => 0x80,
        '‚' => 0x82,
        '„' => 0x84,
        '…' => 0x85,
        '‰' => 0x89,
        'Š' => 0x8A,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '™' => 0x99,
        'š' => 0x9A,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => b'?',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn built(builder: &ContentStreamBuilder) -> String {
        String::from_utf8(builder.build().unwrap()).unwrap()
    }

    #[test]
    fn test_text_line() {
        let mut builder = ContentStreamBuilder::new();
        builder.set_font("F1", 12.0).text("Hello, World!", 72.0, 720.0).end_text();

        assert_eq!(
            built(&builder),
            "/F1 12 Tf\nBT\n1 0 0 1 72 720 Tm\n(Hello, World!) Tj\nET\n"
        );
    }

    #[test]
    fn test_redundant_font_selection_skipped() {
        let mut builder = ContentStreamBuilder::new();
        builder.set_font("F1", 10.0).set_font("F1", 10.0).set_font("F1", 9.0).set_font("F2", 9.0);
        assert_eq!(built(&builder), "/F1 10 Tf\n/F1 9 Tf\n/F2 9 Tf\n");
    }

    #[test]
    fn test_text_object_not_nested() {
        let mut builder = ContentStreamBuilder::new();
        builder.text("a", 0.0, 0.0).text("b", 0.0, 10.0).end_text().end_text();
        let content = built(&builder);
        assert_eq!(content.matches("BT\n").count(), 1);
        assert_eq!(content.matches("ET\n").count(), 1);
    }

    #[test]
    fn test_open_text_closed_on_build() {
        let mut builder = ContentStreamBuilder::new();
        builder.text("open", 0.0, 0.0);
        assert!(built(&builder).ends_with("(open) Tj\nET\n"));
    }

    #[test]
    fn test_rule() {
        let mut builder = ContentStreamBuilder::new();
        builder
            .stroke_gray(0.8)
            .set_line_width(0.5)
            .move_to(48.0, 700.5)
            .line_to(564.0, 700.5)
            .stroke();

        assert_eq!(built(&builder), "0.8 G\n0.5 w\n48 700.5 m\n564 700.5 l\nS\n");
    }

    #[test]
    fn test_filled_box() {
        let mut builder = ContentStreamBuilder::new();
        builder
            .save_state()
            .fill_gray(0.95)
            .rect(384.0, 600.0, 180.0, 48.0)
            .fill_stroke()
            .restore_state();
        assert_eq!(built(&builder), "q\n0.95 g\n384 600 180 48 re\nB\nQ\n");
    }

    #[test]
    fn test_escaped_text() {
        let mut builder = ContentStreamBuilder::new();
        builder.text("Net (30) \\ days", 0.0, 0.0);
        assert!(built(&builder).contains("(Net \\(30\\) \\\\ days) Tj"));
    }

    #[test]
    fn test_win_ansi_encoding() {
        assert_eq!(encode_win_ansi("€5"), vec![0x80, b'5']);
        assert_eq!(encode_win_ansi("é"), vec![0xE9]);
        assert_eq!(encode_win_ansi("—"), vec![0x97]);
        assert_eq!(encode_win_ansi("日本"), vec![b'?', b'?']);
    }

    #[test]
    fn test_non_ascii_written_as_octal() {
        let mut builder = ContentStreamBuilder::new();
        builder.text("Café", 0.0, 0.0);
        assert!(built(&builder).contains("(Caf\\351) Tj"));
    }
}
