//! Font metrics and line wrapping.
//!
//! Documents are set in the PDF Base-14 Helvetica family, which every PDF
//! viewer provides without embedding. Widths below are the standard AFM
//! metrics in units of 1/1000 em.
//!
//! The metrics table is built once per process and is read-only afterwards,
//! so any number of concurrent renders can share it without locking.

use super::content_stream::win_ansi_byte;
use lazy_static::lazy_static;

/// Fonts available to the layout primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Font {
    /// Helvetica
    #[default]
    Regular,
    /// Helvetica-Bold
    Bold,
}

impl Font {
    /// PostScript name written as the font's `/BaseFont`.
    pub fn base_font(&self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold => "Helvetica-Bold",
        }
    }
}

/// Helvetica widths for 0x20..=0x7E.
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0..?
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // @..O
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // P.._
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // `..o
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // p..~
];

/// Helvetica-Bold widths for 0x20..=0x7E.
const HELVETICA_BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 0..?
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // @..O
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // P.._
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // `..o
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // p..~
];

/// Helvetica widths for 0xA0..=0xFF (Latin-1 in WinAnsi).
const HELVETICA_LATIN1: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333, // nbsp..macron
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611, // degree..questiondown
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // Agrave..Idieresis
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // Eth..germandbls
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278, // agrave..idieresis
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500, // eth..ydieresis
];

/// Helvetica-Bold widths for 0xA0..=0xFF.
const HELVETICA_BOLD_LATIN1: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333, // nbsp..macron
    400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611, // degree..questiondown
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // Agrave..Idieresis
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // Eth..germandbls
    556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278, // agrave..idieresis
    611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556, // eth..ydieresis
];

/// The WinAnsi 0x80..=0x9F codes the encoder emits, as (code, regular, bold).
const WIN_ANSI_HIGH: [(u8, u16, u16); 20] = [
    (0x80, 556, 556),   // Euro
    (0x82, 222, 278),   // quotesinglbase
    (0x84, 333, 500),   // quotedblbase
    (0x85, 1000, 1000), // ellipsis
    (0x89, 1000, 1000), // perthousand
    (0x8A, 667, 667),   // Scaron
    (0x8C, 1000, 1000), // OE
    (0x8E, 611, 611),   // Zcaron
    (0x91, 222, 278),   // quoteleft
    (0x92, 222, 278),   // quoteright
    (0x93, 333, 500),   // quotedblleft
    (0x94, 333, 500),   // quotedblright
    (0x95, 350, 350),   // bullet
    (0x96, 556, 556),   // endash
    (0x97, 1000, 1000), // emdash
    (0x99, 1000, 1000), // trademark
    (0x9A, 500, 556),   // scaron
    (0x9C, 944, 944),   // oe
    (0x9E, 500, 500),   // zcaron
    (0x9F, 667, 667),   // Ydieresis
];

lazy_static! {
    static ref SHARED: FontManager = FontManager::new();
}

/// Text measurement contract used by the canvas and layout primitives.
pub trait TextMetrics: Send + Sync {
    /// Rendered width of `text` in points.
    fn measure(&self, text: &str, font: Font, size: f32) -> f32;

    /// Greedy word wrap into lines no wider than `max_width`.
    ///
    /// See [`wrap_text`] for the exact rules.
    fn wrap(&self, text: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
        wrap_text(self, text, font, size, max_width)
    }
}

/// Metrics for a single font, indexed by WinAnsi code.
#[derive(Debug, Clone)]
pub struct FontInfo {
    /// Font name (e.g., "Helvetica-Bold")
    pub name: &'static str,
    /// Glyph widths in 1/1000 em; 0 where WinAnsi assigns no glyph
    widths: [u16; 256],
}

impl FontInfo {
    fn from_tables(name: &'static str, ascii: &[u16; 95], latin1: &[u16; 96], bold: bool) -> Self {
        let mut widths = [0u16; 256];
        widths[0x20..0x7F].copy_from_slice(ascii);
        widths[0xA0..].copy_from_slice(latin1);
        for (code, regular, heavy) in WIN_ANSI_HIGH {
            widths[code as usize] = if bold { heavy } else { regular };
        }
        Self { name, widths }
    }

    /// Width of the glyph drawn for `ch`, in font units (1/1000 em).
    ///
    /// Characters outside WinAnsi are drawn as `?` and measured as `?`.
    pub fn char_width(&self, ch: char) -> f32 {
        self.widths[win_ansi_byte(ch) as usize] as f32
    }

    /// Width of `text` in points at `font_size`.
    pub fn text_width(&self, text: &str, font_size: f32) -> f32 {
        let units: f32 = text.chars().map(|c| self.char_width(c)).sum();
        units * font_size / 1000.0
    }
}

/// Font manager holding Helvetica metrics.
#[derive(Debug, Clone)]
pub struct FontManager {
    regular: FontInfo,
    bold: FontInfo,
}

impl FontManager {
    /// Build the metrics table.
    pub fn new() -> Self {
        Self {
            regular: FontInfo::from_tables("Helvetica", &HELVETICA_ASCII, &HELVETICA_LATIN1, false),
            bold: FontInfo::from_tables(
                "Helvetica-Bold",
                &HELVETICA_BOLD_ASCII,
                &HELVETICA_BOLD_LATIN1,
                true,
            ),
        }
    }

    /// Process-wide shared table.
    pub fn shared() -> &'static FontManager {
        &SHARED
    }

    /// Get font info.
    pub fn font(&self, font: Font) -> &FontInfo {
        match font {
            Font::Regular => &self.regular,
            Font::Bold => &self.bold,
        }
    }
}

impl Default for FontManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMetrics for FontManager {
    fn measure(&self, text: &str, font: Font, size: f32) -> f32 {
        self.font(font).text_width(text, size)
    }
}

/// Fixed-advance metrics: every character is `char_width_ratio * size` wide.
///
/// Handy when a test needs to predict line breaks exactly.
#[derive(Debug, Clone, Copy)]
pub struct SimpleFontMetrics {
    /// Character width as proportion of font size
    pub char_width_ratio: f32,
}

impl Default for SimpleFontMetrics {
    fn default() -> Self {
        Self {
            char_width_ratio: 0.5,
        }
    }
}

impl TextMetrics for SimpleFontMetrics {
    fn measure(&self, text: &str, _font: Font, size: f32) -> f32 {
        text.chars().count() as f32 * size * self.char_width_ratio
    }
}

/// Wrap text to fit within `max_width`.
///
/// - Explicit newlines start a new paragraph; each paragraph wraps on its own
///   and a blank paragraph yields an empty line.
/// - Words are packed greedily, separated by single spaces.
/// - A word wider than `max_width` is broken at character boundaries. A
///   character wider than `max_width` on its own still gets its own line, so
///   nothing is ever dropped.
/// - Empty input yields exactly one empty line.
pub fn wrap_text<M: TextMetrics + ?Sized>(
    metrics: &M,
    text: &str,
    font: Font,
    size: f32,
    max_width: f32,
) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        wrap_paragraph(metrics, paragraph, font, size, max_width, &mut lines);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn wrap_paragraph<M: TextMetrics + ?Sized>(
    metrics: &M,
    paragraph: &str,
    font: Font,
    size: f32,
    max_width: f32,
    lines: &mut Vec<String>,
) {
    let start = lines.len();
    let mut current = String::new();

    for word in paragraph.split_whitespace() {
        if metrics.measure(word, font, size) > max_width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let mut pieces = break_word(metrics, word, font, size, max_width);
            current = pieces.pop().unwrap_or_default();
            lines.extend(pieces);
            continue;
        }

        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate = format!("{} {}", current, word);
        if metrics.measure(&candidate, font, size) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    if !current.is_empty() || lines.len() == start {
        lines.push(current);
    }
}

fn break_word<M: TextMetrics + ?Sized>(
    metrics: &M,
    word: &str,
    font: Font,
    size: f32,
    max_width: f32,
) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();

    for ch in word.chars() {
        piece.push(ch);
        if piece.chars().count() > 1 && metrics.measure(&piece, font, size) > max_width {
            piece.pop();
            pieces.push(std::mem::take(&mut piece));
            piece.push(ch);
        }
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}
