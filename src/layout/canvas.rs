//! Paginated drawing surface.
//!
//! The canvas owns the page list and the vertical cursor for exactly one
//! render. Coordinates are top-down: `y` grows towards the bottom of the page
//! and is the text baseline for text operations. The output sink flips them
//! into PDF user space.
//!
//! Pagination follows an advance-and-check convention: layout primitives ask
//! [`Canvas::fits`] (or call [`Canvas::ensure_space`]) before drawing a unit
//! that must not be split, and [`Canvas::advance`] never breaks pages on its
//! own.

use crate::config::PageGeometry;
use crate::document::Align;
use crate::writer::font_manager::{Font, TextMetrics};

/// Rule line width in points.
pub const RULE_WIDTH: f32 = 0.5;

/// Gray level of dividers under a table header.
pub const HEADER_RULE_GRAY: f32 = 0.86;

/// Gray level of dividers between table rows.
pub const ROW_RULE_GRAY: f32 = 0.92;

/// Slack for float comparisons against the bottom margin.
const EPSILON: f32 = 1e-3;

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// A single pre-wrapped line of text
    Text {
        /// Text content
        text: String,
        /// Anchor x passed by the caller
        anchor_x: f32,
        /// Resolved left origin
        x: f32,
        /// Baseline
        y: f32,
        /// Measured width
        width: f32,
        /// Alignment used to resolve `x`
        align: Align,
        /// Font
        font: Font,
        /// Font size in points
        size: f32,
    },
    /// Horizontal divider
    Rule {
        /// Left end
        x1: f32,
        /// Right end
        x2: f32,
        /// Vertical position
        y: f32,
        /// Gray level (0 = black)
        gray: f32,
    },
    /// Filled and outlined rectangle
    Box {
        /// Left edge
        x: f32,
        /// Top edge
        y: f32,
        /// Width
        width: f32,
        /// Height
        height: f32,
        /// Fill gray level
        fill_gray: f32,
        /// Outline gray level
        stroke_gray: f32,
    },
}

/// The recorded operations of one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Draw operations in paint order
    pub ops: Vec<DrawOp>,
}

impl Page {
    /// Text lines on this page, in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// True if some text op on this page is exactly `text`.
    pub fn has_text(&self, text: &str) -> bool {
        self.texts().any(|t| t == text)
    }

    /// First text op whose content is exactly `text`.
    pub fn find_text(&self, text: &str) -> Option<&DrawOp> {
        self.ops
            .iter()
            .find(|op| matches!(op, DrawOp::Text { text: t, .. } if t == text))
    }
}

/// Paginated drawing surface for one document render.
pub struct Canvas<'m> {
    geometry: PageGeometry,
    metrics: &'m dyn TextMetrics,
    pages: Vec<Page>,
    cursor: f32,
}

impl<'m> Canvas<'m> {
    /// Open a canvas with one empty page and the cursor at the top margin.
    pub fn new(geometry: PageGeometry, metrics: &'m dyn TextMetrics) -> Self {
        Self {
            geometry,
            metrics,
            pages: vec![Page::default()],
            cursor: geometry.margins.top,
        }
    }

    /// Page geometry.
    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Text metrics used for measuring and wrapping.
    pub fn metrics(&self) -> &dyn TextMetrics {
        self.metrics
    }

    /// Current cursor position (top-down).
    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    /// Zero-based index of the page being drawn.
    pub fn page_index(&self) -> usize {
        self.pages.len() - 1
    }

    /// Pages opened so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// True when nothing has advanced the cursor on the current page.
    pub fn at_page_top(&self) -> bool {
        self.cursor <= self.geometry.margins.top + EPSILON
    }

    /// Space left between the cursor and the bottom margin.
    pub fn remaining(&self) -> f32 {
        self.geometry.body_bottom() - self.cursor
    }

    /// Whether a unit of `height` fits below the cursor on this page.
    pub fn fits(&self, height: f32) -> bool {
        self.cursor + height <= self.geometry.body_bottom() + EPSILON
    }

    /// Start a new page if a unit of `height` does not fit here.
    ///
    /// Never breaks a page that has nothing on it yet, so a unit taller than a
    /// whole page is drawn (and overflows) instead of looping on blank pages.
    /// Returns true if a page was added.
    pub fn ensure_space(&mut self, height: f32) -> bool {
        if self.fits(height) || self.at_page_top() {
            return false;
        }
        self.new_page();
        true
    }

    /// Move the cursor down.
    pub fn advance(&mut self, dy: f32) {
        self.cursor += dy;
    }

    /// Move the cursor down to `y` if it is above it.
    pub fn advance_to(&mut self, y: f32) {
        if y > self.cursor {
            self.cursor = y;
        }
    }

    /// Open a new page and reset the cursor to the top margin.
    pub fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.cursor = self.geometry.margins.top;
        log::debug!("Page break: now on page {}", self.pages.len());
    }

    /// Rendered width of `text`.
    pub fn measure(&self, text: &str, font: Font, size: f32) -> f32 {
        self.metrics.measure(text, font, size)
    }

    /// Word-wrap `text` into lines no wider than `max_width`.
    pub fn wrap(&self, text: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
        self.metrics.wrap(text, font, size, max_width)
    }

    /// Draw one line of text with its baseline at `y`.
    ///
    /// `anchor_x` is the left edge, midpoint or right edge depending on
    /// `align`. Empty text is a no-op.
    pub fn draw_text(
        &mut self,
        text: &str,
        anchor_x: f32,
        y: f32,
        align: Align,
        font: Font,
        size: f32,
    ) {
        if text.is_empty() {
            return;
        }
        let width = self.metrics.measure(text, font, size);
        let x = align.origin(anchor_x, width);
        self.current_page().ops.push(DrawOp::Text {
            text: text.to_string(),
            anchor_x,
            x,
            y,
            width,
            align,
            font,
            size,
        });
    }

    /// Draw a divider across the content width at `y`.
    pub fn draw_rule(&mut self, y: f32, gray: f32) {
        let x1 = self.geometry.content_left();
        let x2 = self.geometry.content_right();
        self.current_page().ops.push(DrawOp::Rule { x1, x2, y, gray });
    }

    /// Draw a filled, outlined box whose top-left corner is (x, y).
    pub fn draw_box(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill_gray: f32,
        stroke_gray: f32,
    ) {
        self.current_page().ops.push(DrawOp::Box {
            x,
            y,
            width,
            height,
            fill_gray,
            stroke_gray,
        });
    }

    /// Close the canvas and hand over the pages.
    pub fn finish(self) -> Vec<Page> {
        self.pages
    }

    fn current_page(&mut self) -> &mut Page {
        let index = self.pages.len() - 1;
        &mut self.pages[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use crate::writer::font_manager::{FontManager, SimpleFontMetrics};

    fn geometry() -> PageGeometry {
        RenderConfig::default().geometry()
    }

    #[test]
    fn test_new_canvas_starts_at_top_margin() {
        let metrics = FontManager::new();
        let canvas = Canvas::new(geometry(), &metrics);
        assert_eq!(canvas.cursor(), 48.0);
        assert_eq!(canvas.page_count(), 1);
        assert!(canvas.at_page_top());
        assert_eq!(canvas.remaining(), 696.0);
    }

    #[test]
    fn test_right_aligned_text_ends_at_anchor() {
        let metrics = SimpleFontMetrics::default();
        let mut canvas = Canvas::new(geometry(), &metrics);
        // 5 chars * 10pt * 0.5 = 25pt wide
        canvas.draw_text("Total", 564.0, 100.0, Align::Right, Font::Regular, 10.0);
        let pages = canvas.finish();
        match &pages[0].ops[0] {
            DrawOp::Text { x, width, anchor_x, .. } => {
                assert_eq!(*width, 25.0);
                assert_eq!(*x, 539.0);
                assert_eq!(*x + *width, *anchor_x);
            },
            other => panic!("unexpected op {:?}", other),
        }
    }

    #[test]
    fn test_center_aligned_text_straddles_anchor() {
        let metrics = SimpleFontMetrics::default();
        let mut canvas = Canvas::new(geometry(), &metrics);
        canvas.draw_text("Qty", 300.0, 100.0, Align::Center, Font::Bold, 10.0);
        let pages = canvas.finish();
        let DrawOp::Text { x, width, .. } = &pages[0].ops[0] else {
            panic!("expected text");
        };
        assert_eq!(*x + *width / 2.0, 300.0);
    }

    #[test]
    fn test_empty_text_is_noop() {
        let metrics = FontManager::new();
        let mut canvas = Canvas::new(geometry(), &metrics);
        canvas.draw_text("", 48.0, 60.0, Align::Left, Font::Regular, 10.0);
        assert!(canvas.finish()[0].ops.is_empty());
    }

    #[test]
    fn test_advance_never_breaks_pages() {
        let metrics = FontManager::new();
        let mut canvas = Canvas::new(geometry(), &metrics);
        canvas.advance(1000.0);
        assert_eq!(canvas.page_count(), 1);
        assert!(!canvas.fits(0.0));
    }

    #[test]
    fn test_ensure_space_breaks_when_needed() {
        let metrics = FontManager::new();
        let mut canvas = Canvas::new(geometry(), &metrics);
        canvas.advance(680.0);
        assert!(canvas.fits(16.0));
        assert!(!canvas.ensure_space(16.0));
        assert!(canvas.ensure_space(18.0));
        assert_eq!(canvas.page_count(), 2);
        assert_eq!(canvas.cursor(), 48.0);
    }

    #[test]
    fn test_ensure_space_keeps_fresh_page() {
        let metrics = FontManager::new();
        let mut canvas = Canvas::new(geometry(), &metrics);
        assert!(!canvas.ensure_space(5000.0));
        assert_eq!(canvas.page_count(), 1);
    }

    #[test]
    fn test_rule_spans_content_width() {
        let metrics = FontManager::new();
        let mut canvas = Canvas::new(geometry(), &metrics);
        canvas.draw_rule(120.0, ROW_RULE_GRAY);
        assert_eq!(
            canvas.finish()[0].ops[0],
            DrawOp::Rule {
                x1: 48.0,
                x2: 564.0,
                y: 120.0,
                gray: ROW_RULE_GRAY
            }
        );
    }

    #[test]
    fn test_ops_go_to_current_page() {
        let metrics = FontManager::new();
        let mut canvas = Canvas::new(geometry(), &metrics);
        canvas.draw_text("first", 48.0, 60.0, Align::Left, Font::Regular, 10.0);
        canvas.new_page();
        canvas.draw_text("second", 48.0, 60.0, Align::Left, Font::Regular, 10.0);
        let pages = canvas.finish();
        assert!(pages[0].has_text("first"));
        assert!(!pages[0].has_text("second"));
        assert!(pages[1].has_text("second"));
    }
}
