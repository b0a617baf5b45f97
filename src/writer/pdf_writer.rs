//! PDF file assembly.
//!
//! Object layout is fixed: catalog (1), page tree (2), one Type1 font object
//! per font in order of first use, a page/content pair per page, then the
//! Info dictionary. Nothing time-dependent is written, so the same pages
//! always produce the same bytes.

use super::content_stream::ContentStreamBuilder;
use super::font_manager::Font;
use super::object_serializer::ObjectSerializer;
use crate::error::Result;
use crate::object::{Dictionary, Object};
use indexmap::IndexMap;
use std::io::Write;

const CATALOG_ID: u32 = 1;
const PAGES_ID: u32 = 2;
const FIRST_FONT_ID: u32 = 3;

/// File-level options.
#[derive(Debug, Clone)]
pub struct PdfWriterConfig {
    /// Header version, e.g. "1.7"
    pub version: String,
    /// Info `/Title`
    pub title: Option<String>,
    /// Info `/Author`
    pub author: Option<String>,
    /// Info `/Creator`
    pub creator: Option<String>,
    /// FlateDecode page content streams
    pub compress: bool,
}

impl Default for PdfWriterConfig {
    fn default() -> Self {
        Self {
            version: "1.7".to_string(),
            title: None,
            author: None,
            creator: Some("stockdocs".to_string()),
            compress: false,
        }
    }
}

impl PdfWriterConfig {
    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the document author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set or clear the creator application.
    pub fn with_creator(mut self, creator: Option<String>) -> Self {
        self.creator = creator;
        self
    }

    /// Enable or disable content stream compression.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }
}

fn deflate(data: &[u8]) -> std::io::Result<Vec<u8>> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Draws onto one page. Coordinates are PDF user space (origin bottom-left).
pub struct PageBuilder<'a> {
    writer: &'a mut PdfWriter,
    index: usize,
}

impl<'a> PageBuilder<'a> {
    /// One line of text with its left baseline origin at (x, y).
    pub fn add_text(&mut self, text: &str, x: f32, y: f32, font: Font, font_size: f32) -> &mut Self {
        let resource = self.writer.font_resource(font);
        self.content()
            .begin_text()
            .set_font(&resource, font_size)
            .text(text, x, y);
        self
    }

    /// Stroke a straight line of `width` in `gray`.
    pub fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, gray: f32) -> &mut Self {
        self.content()
            .end_text()
            .save_state()
            .stroke_gray(gray)
            .set_line_width(width)
            .move_to(from.0, from.1)
            .line_to(to.0, to.1)
            .stroke()
            .restore_state();
        self
    }

    /// Fill and outline a rectangle whose lower-left corner is (x, y).
    pub fn draw_box(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill_gray: f32,
        stroke_gray: f32,
    ) -> &mut Self {
        self.content()
            .end_text()
            .save_state()
            .fill_gray(fill_gray)
            .stroke_gray(stroke_gray)
            .rect(x, y, width, height)
            .fill_stroke()
            .restore_state();
        self
    }

    /// Close any open text object and hand the writer back.
    pub fn finish(mut self) -> &'a mut PdfWriter {
        self.content().end_text();
        self.writer
    }

    fn content(&mut self) -> &mut ContentStreamBuilder {
        &mut self.writer.pages[self.index].content
    }
}

struct PageData {
    width: f32,
    height: f32,
    content: ContentStreamBuilder,
}

/// Collects pages and writes the complete file.
pub struct PdfWriter {
    config: PdfWriterConfig,
    pages: Vec<PageData>,
    fonts: IndexMap<Font, String>,
}

impl PdfWriter {
    /// Writer with default options.
    pub fn new() -> Self {
        Self::with_config(PdfWriterConfig::default())
    }

    /// Writer with the given options.
    pub fn with_config(config: PdfWriterConfig) -> Self {
        Self {
            config,
            pages: Vec::new(),
            fonts: IndexMap::new(),
        }
    }

    /// Append a page and start drawing on it.
    pub fn add_page(&mut self, width: f32, height: f32) -> PageBuilder<'_> {
        let index = self.pages.len();
        self.pages.push(PageData {
            width,
            height,
            content: ContentStreamBuilder::new(),
        });
        PageBuilder {
            writer: self,
            index,
        }
    }

    /// Pages added so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// `F1`, `F2`, ... in order of first use.
    fn font_resource(&mut self, font: Font) -> String {
        let next = format!("F{}", self.fonts.len() + 1);
        self.fonts.entry(font).or_insert(next).clone()
    }

    fn first_page_id(&self) -> u32 {
        FIRST_FONT_ID + self.fonts.len() as u32
    }

    fn info_id(&self) -> u32 {
        self.first_page_id() + 2 * self.pages.len() as u32
    }

    fn font_object(font: Font) -> Object {
        Object::dict([
            ("Type", Object::name("Font")),
            ("Subtype", Object::name("Type1")),
            ("BaseFont", Object::name(font.base_font())),
            ("Encoding", Object::name("WinAnsiEncoding")),
        ])
    }

    fn content_object(&self, page: &PageData) -> Result<Object> {
        let raw = page.content.build()?;
        let mut dict = Dictionary::new();
        let data = if self.config.compress {
            match deflate(&raw) {
                Ok(packed) => {
                    dict.insert("Filter".to_string(), Object::name("FlateDecode"));
                    packed
                },
                Err(e) => {
                    log::warn!("Content stream compression failed, writing uncompressed: {}", e);
                    raw
                },
            }
        } else {
            raw
        };
        dict.insert("Length".to_string(), Object::count(data.len()));
        Ok(Object::Stream {
            dict,
            data: bytes::Bytes::from(data),
        })
    }

    fn info_object(&self) -> Object {
        let entries = [
            ("Title", &self.config.title),
            ("Author", &self.config.author),
            ("Creator", &self.config.creator),
        ];
        Object::dict(
            entries
                .into_iter()
                .filter_map(|(key, value)| value.as_deref().map(|v| (key, Object::text(v)))),
        )
    }

    /// Objects in id order, starting at 1.
    fn objects(&self) -> Result<Vec<Object>> {
        let first_page_id = self.first_page_id();
        let font_resources: Dictionary = self
            .fonts
            .iter()
            .enumerate()
            .map(|(i, (_, resource))| (resource.clone(), Object::reference(FIRST_FONT_ID + i as u32)))
            .collect();

        let kids = (0..self.pages.len())
            .map(|i| Object::reference(first_page_id + 2 * i as u32))
            .collect();

        let mut objects = vec![
            Object::dict([
                ("Type", Object::name("Catalog")),
                ("Pages", Object::reference(PAGES_ID)),
            ]),
            Object::dict([
                ("Type", Object::name("Pages")),
                ("Kids", Object::Array(kids)),
                ("Count", Object::count(self.pages.len())),
            ]),
        ];
        objects.extend(self.fonts.keys().map(|font| Self::font_object(*font)));

        for (i, page) in self.pages.iter().enumerate() {
            let content_id = first_page_id + 2 * i as u32 + 1;
            objects.push(Object::dict([
                ("Type", Object::name("Page")),
                ("Parent", Object::reference(PAGES_ID)),
                ("MediaBox", Object::media_box(page.width, page.height)),
                ("Contents", Object::reference(content_id)),
                (
                    "Resources",
                    Object::dict([("Font", Object::Dictionary(font_resources.clone()))]),
                ),
            ]));
            objects.push(self.content_object(page)?);
        }

        objects.push(self.info_object());
        Ok(objects)
    }

    /// Write header, body, cross-reference table and trailer.
    pub fn finish(self) -> Result<Vec<u8>> {
        let serializer = ObjectSerializer;
        let objects = self.objects()?;
        let size = objects.len() + 1;

        let mut output = Vec::new();
        writeln!(output, "%PDF-{}", self.config.version)?;
        output.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");

        let mut offsets = Vec::with_capacity(objects.len());
        for (i, obj) in objects.iter().enumerate() {
            offsets.push(output.len());
            serializer.write_indirect(&mut output, i as u32 + 1, obj)?;
        }

        let xref_start = output.len();
        writeln!(output, "xref\n0 {}", size)?;
        writeln!(output, "0000000000 65535 f ")?;
        for offset in &offsets {
            writeln!(output, "{:010} 00000 n ", offset)?;
        }

        let trailer = Object::dict([
            ("Size", Object::count(size)),
            ("Root", Object::reference(CATALOG_ID)),
            ("Info", Object::reference(self.info_id())),
        ]);
        output.extend_from_slice(b"trailer\n");
        output.extend_from_slice(&serializer.serialize(&trailer)?);
        write!(output, "\nstartxref\n{}\n%%EOF", xref_start)?;

        log::debug!(
            "Wrote PDF: {} page(s), {} font(s), {} bytes",
            self.pages.len(),
            self.fonts.len(),
            output.len()
        );
        Ok(output)
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}
