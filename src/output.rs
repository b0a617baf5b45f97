//! Output sink: page display lists to PDF bytes and files.
//!
//! Layout works top-down with `y` as the baseline; PDF user space starts at
//! the bottom-left, so every y is flipped against the page height here.

use crate::config::RenderConfig;
use crate::error::Result;
use crate::layout::canvas::{DrawOp, Page, RULE_WIDTH};
use crate::writer::pdf_writer::{PdfWriter, PdfWriterConfig};
use std::path::{Path, PathBuf};

/// Fallback filename stem when a record has no usable identifier.
const FALLBACK_STEM: &str = "document";

/// A finished document ready to be stored or sent.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    /// Suggested filename, e.g. `purchase-order-po-0042.pdf`
    pub filename: String,
    /// Complete PDF file
    pub bytes: Vec<u8>,
    /// Number of pages
    pub page_count: usize,
}

impl RenderedDocument {
    /// Write the PDF into `dir` under its suggested filename.
    ///
    /// Creates `dir` if needed and returns the written path.
    pub fn save_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.bytes)?;
        log::info!("Wrote {} ({} bytes)", path.display(), self.bytes.len());
        Ok(path)
    }
}

/// Serialize laid-out pages into a PDF file.
pub fn write_pdf(pages: &[Page], config: &RenderConfig, title: &str) -> Result<Vec<u8>> {
    let geometry = config.geometry();
    let (width, height) = (geometry.width, geometry.height);

    let mut writer_config = PdfWriterConfig::default()
        .with_title(title)
        .with_creator(config.creator.clone())
        .with_compress(config.compress);
    if let Some(author) = &config.author {
        writer_config = writer_config.with_author(author.clone());
    }

    let mut writer = PdfWriter::with_config(writer_config);
    for page in pages {
        let mut builder = writer.add_page(width, height);
        for op in &page.ops {
            match op {
                DrawOp::Text {
                    text,
                    x,
                    y,
                    font,
                    size,
                    ..
                } => {
                    builder.add_text(text, *x, height - y, *font, *size);
                },
                DrawOp::Rule { x1, x2, y, gray } => {
                    builder.draw_line((*x1, height - y), (*x2, height - y), RULE_WIDTH, *gray);
                },
                DrawOp::Box {
                    x,
                    y,
                    width: w,
                    height: h,
                    fill_gray,
                    stroke_gray,
                } => {
                    builder.draw_box(*x, height - (y + h), *w, *h, *fill_gray, *stroke_gray);
                },
            }
        }
        builder.finish();
    }
    writer.finish()
}

/// `<kind>-<id>.pdf` with the id lower-cased and made path-safe.
pub fn document_filename(kind: &str, id: Option<&str>) -> String {
    let stem = id.map(slugify).filter(|s| !s.is_empty());
    format!("{}-{}.pdf", kind, stem.as_deref().unwrap_or(FALLBACK_STEM))
}

/// Lower-case, whitespace runs and path separators become `-`.
fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_dash = false;
    for ch in value.trim().chars() {
        if ch.is_whitespace() || matches!(ch, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') {
            pending_dash = !slug.is_empty();
            continue;
        }
        if pending_dash {
            slug.push('-');
            pending_dash = false;
        }
        slug.extend(ch.to_lowercase());
    }
    slug
}
