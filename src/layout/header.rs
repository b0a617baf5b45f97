//! Document header block.
//!
//! Left column: optional company branding, then the bold title and the
//! document identifier. Right column: `Label: value` metadata rows,
//! right-aligned at the right margin and starting at the same top y as the
//! left column. The block is as tall as the taller column.

use super::canvas::Canvas;
use super::text_block::draw_lines_at;
use crate::config::RenderConfig;
use crate::document::{Align, Branding, Document};
use crate::writer::font_manager::Font;

/// Extra space under the branding lines.
const BRANDING_GAP: f32 = 4.0;

/// Extra space under the title, on top of the line height.
const TITLE_GAP: f32 = 2.0;

/// Narrowest wrap width for branding text.
const MIN_BRANDING_WIDTH: f32 = 200.0;

/// Draw the header at the cursor. Returns the cursor after the section gap.
pub fn draw_header(canvas: &mut Canvas<'_>, config: &RenderConfig, document: &Document) -> f32 {
    let t = &config.typography;
    let geometry = *canvas.geometry();
    let top = canvas.cursor();
    let left_x = geometry.content_left();

    let mut left_y = top;
    if let Some(branding) = &document.branding {
        left_y = draw_branding(canvas, config, branding, left_x, left_y);
    }

    canvas.draw_text(&document.title, left_x, left_y, Align::Left, Font::Bold, t.title_size);
    left_y += t.line_height + TITLE_GAP;

    if let Some(id) = &document.document_id {
        canvas.draw_text(id, left_x, left_y, Align::Left, Font::Regular, t.document_id_size);
        left_y += t.line_height;
    }

    let right_x = geometry.content_right();
    let mut meta_y = top;
    for field in &document.meta {
        let text = format!("{}: {}", field.label, field.value);
        canvas.draw_text(&text, right_x, meta_y, Align::Right, Font::Regular, t.meta_size);
        meta_y += t.line_height;
    }

    let bottom = left_y.max(meta_y) + t.section_gap;
    canvas.advance_to(bottom);
    log::trace!("Header: left column to {}, meta to {}", left_y, meta_y);
    canvas.cursor()
}

fn draw_branding(
    canvas: &mut Canvas<'_>,
    config: &RenderConfig,
    branding: &Branding,
    x: f32,
    top: f32,
) -> f32 {
    let t = &config.typography;
    let geometry = canvas.geometry();
    let max_width = (geometry.content_right() - config.meta_width - x).max(MIN_BRANDING_WIDTH);

    let mut y = top;
    let mut drew = false;

    if let Some(name) = branding.company_name.as_deref().map(str::trim) {
        if !name.is_empty() {
            for line in canvas.wrap(name, Font::Bold, t.branding_name_size, max_width) {
                canvas.draw_text(&line, x, y, Align::Left, Font::Bold, t.branding_name_size);
                y += t.line_height;
            }
            drew = true;
        }
    }

    for lines in [&branding.address_lines, &branding.contact_lines] {
        let lines: Vec<String> = lines.iter().filter(|l| !l.trim().is_empty()).cloned().collect();
        if !lines.is_empty() {
            y = draw_lines_at(canvas, config, &lines, x, y, max_width, t.branding_line_size);
            drew = true;
        }
    }

    if drew {
        y += BRANDING_GAP;
    }
    y
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::canvas::DrawOp;
    use crate::writer::font_manager::FontManager;

    fn render(document: &Document) -> (f32, Vec<crate::layout::canvas::Page>) {
        let config = RenderConfig::default();
        let metrics = FontManager::new();
        let mut canvas = Canvas::new(config.geometry(), &metrics);
        let y = draw_header(&mut canvas, &config, document);
        (y, canvas.finish())
    }

    #[test]
    fn test_title_and_id_only() {
        let doc = Document::new("Pick List").with_document_id(Some("PL-7".to_string()));
        let (y, pages) = render(&doc);
        // title (14 + 2) + id (14) + gap
        assert_eq!(y, 48.0 + 16.0 + 14.0 + 12.0);
        assert!(pages[0].has_text("Pick List"));
        assert!(pages[0].has_text("PL-7"));
    }

    #[test]
    fn test_meta_column_sets_height_when_taller() {
        let doc = Document::new("Sales Order")
            .with_meta("Status", "Open")
            .with_meta("Order Date", "Jan 3, 2025")
            .with_meta("Requested", "-")
            .with_meta("Promised", "-")
            .with_meta("Priority", "Rush");
        let (y, _) = render(&doc);
        assert_eq!(y, 48.0 + 5.0 * 14.0 + 12.0);
    }

    #[test]
    fn test_meta_right_aligned_at_margin() {
        let doc = Document::new("Invoice").with_meta("Status", "Paid");
        let (_, pages) = render(&doc);
        match pages[0].find_text("Status: Paid") {
            Some(DrawOp::Text { x, width, y, align, .. }) => {
                assert_eq!(*align, Align::Right);
                assert!((x + width - 564.0).abs() < 1e-3);
                assert_eq!(*y, 48.0);
            },
            other => panic!("meta not drawn: {:?}", other),
        }
    }

    #[test]
    fn test_branding_pushes_title_down() {
        let branding = Branding {
            company_name: Some("Northwind Traders".to_string()),
            address_lines: vec!["1 Harbor Way".to_string()],
            contact_lines: vec!["Phone: 555-0100".to_string()],
        };
        let doc = Document::new("Purchase Order").with_branding(Some(branding));
        let (_, pages) = render(&doc);

        let Some(DrawOp::Text { y, .. }) = pages[0].find_text("Purchase Order") else {
            panic!("title missing");
        };
        // name 14 + address 14 + contact 14 + gap 4
        assert_eq!(*y, 48.0 + 42.0 + 4.0);
        let Some(DrawOp::Text { font, size, .. }) = pages[0].find_text("Northwind Traders") else {
            panic!("company name missing");
        };
        assert_eq!((*font, *size), (Font::Bold, 12.0));
    }
}
