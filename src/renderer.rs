//! Render pipeline: record → [`Document`] → pages → PDF bytes.
//!
//! Each call owns its own [`Canvas`]; the only state shared between calls is
//! the read-only font metrics table, so renders may run concurrently.
//!
//! ```no_run
//! use stockdocs::config::RenderConfig;
//! use stockdocs::document::{Document, Section, TextBlock};
//! use stockdocs::renderer;
//!
//! # fn main() -> stockdocs::Result<()> {
//! let document = Document::new("Pick List")
//!     .with_document_id(Some("PL-0007".to_string()))
//!     .with_meta("Status", "Open")
//!     .with_section(Section::Text(TextBlock::new("Notes", vec!["Fragile".to_string()])));
//! let bytes = renderer::render(&document, &RenderConfig::default())?;
//! assert!(bytes.starts_with(b"%PDF-"));
//! # Ok(())
//! # }
//! ```

use crate::config::RenderConfig;
use crate::document::{Branding, Document, Section};
use crate::error::Result;
use crate::format::Formatters;
use crate::layout::{
    draw_header, draw_summary, draw_table, draw_text_block, draw_totals, draw_two_columns, Canvas,
    Page,
};
use crate::output::{self, RenderedDocument};
use crate::schemas::DocumentRecord;
use crate::writer::font_manager::{FontManager, TextMetrics};

/// Lay out a document with the built-in Helvetica metrics.
pub fn layout(document: &Document, config: &RenderConfig) -> Result<Vec<Page>> {
    layout_with_metrics(document, config, FontManager::shared())
}

/// Lay out a document with caller-supplied metrics.
///
/// Returns the display list of every page. Fails on invalid configuration or
/// on the first cell value that cannot be extracted.
pub fn layout_with_metrics(
    document: &Document,
    config: &RenderConfig,
    metrics: &dyn TextMetrics,
) -> Result<Vec<Page>> {
    config.validate()?;
    log::debug!(
        "Laying out '{}' ({} sections)",
        document.title,
        document.sections.len()
    );

    let mut canvas = Canvas::new(config.geometry(), metrics);
    draw_header(&mut canvas, config, document);

    for section in &document.sections {
        log::trace!(
            "Section {} at page {} y={:.1}",
            section.kind(),
            canvas.page_index() + 1,
            canvas.cursor()
        );
        match section {
            Section::Text(block) => {
                draw_text_block(&mut canvas, config, block);
            },
            Section::Columns { left, right } => {
                draw_two_columns(&mut canvas, config, left, right.as_ref());
            },
            Section::Table { title, data } => {
                draw_table(&mut canvas, config, title, data.as_ref())?;
            },
            Section::Totals(rows) => {
                draw_totals(&mut canvas, config, rows);
            },
            Section::Summary { label, value } => {
                draw_summary(&mut canvas, config, label, value);
            },
        }
    }

    let pages = canvas.finish();
    log::debug!("Laid out '{}' on {} page(s)", document.title, pages.len());
    Ok(pages)
}

/// Render a document to PDF bytes.
pub fn render(document: &Document, config: &RenderConfig) -> Result<Vec<u8>> {
    let pages = layout(document, config)?;
    output::write_pdf(&pages, config, &document.title)
}

/// Build, lay out and serialize a business record.
pub fn render_record(
    record: &DocumentRecord,
    formatters: &dyn Formatters,
    branding: Option<&Branding>,
    config: &RenderConfig,
) -> Result<RenderedDocument> {
    let document = record.to_document(formatters, branding)?;
    let pages = layout(&document, config)?;
    let bytes = output::write_pdf(&pages, config, &document.title)?;
    let filename = output::document_filename(record.kind(), record.document_id().as_deref());
    log::debug!("Rendered {} ({} bytes, {} page(s))", filename, bytes.len(), pages.len());

    Ok(RenderedDocument {
        filename,
        bytes,
        page_count: pages.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Margins;
    use crate::document::{Column, TextBlock, TotalsRow};
    use crate::error::Error;
    use crate::writer::font_manager::SimpleFontMetrics;

    fn sample() -> Document {
        Document::new("Sales Order")
            .with_document_id(Some("SO-1".to_string()))
            .with_meta("Status", "Open")
            .with_section(Section::Text(TextBlock::new("Notes", vec![])))
            .with_section(Section::table(
                "Items",
                vec![Column::new("Item", 1.0, |s: &String| Ok(s.clone()))],
                vec!["Bolt".to_string()],
            ))
            .with_section(Section::Totals(vec![TotalsRow::new("Total", "$1.00")]))
    }

    #[test]
    fn test_layout_draws_every_section() {
        let pages = layout(&sample(), &RenderConfig::default()).unwrap();
        assert_eq!(pages.len(), 1);
        for text in ["Sales Order", "SO-1", "Notes", "-", "Item", "Bolt", "Total", "$1.00"] {
            assert!(pages[0].has_text(text), "missing {}", text);
        }
    }

    #[test]
    fn test_invalid_config_rejected_before_layout() {
        let config = RenderConfig::new().with_margins(Margins::uniform(500.0));
        assert!(matches!(layout(&sample(), &config), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_extractor_error_aborts_render() {
        let doc = Document::new("Invoice").with_section(Section::table(
            "Items",
            vec![Column::new("Qty", 1.0, |_: &u8| Err(Error::malformed("quantity", "bad")))],
            vec![1u8],
        ));
        assert!(render(&doc, &RenderConfig::default()).is_err());
    }

    #[test]
    fn test_custom_metrics() {
        let metrics = SimpleFontMetrics::default();
        let pages = layout_with_metrics(&sample(), &RenderConfig::default(), &metrics).unwrap();
        assert!(pages[0].has_text("Bolt"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let config = RenderConfig::default();
        assert_eq!(render(&sample(), &config).unwrap(), render(&sample(), &config).unwrap());
    }
}
