//! Totals block and summary callout.

use super::canvas::Canvas;
use crate::config::RenderConfig;
use crate::document::{Align, TotalsRow};
use crate::writer::font_manager::Font;

/// Summary callout fill gray.
const SUMMARY_FILL_GRAY: f32 = 0.97;

/// Summary callout outline gray.
const SUMMARY_STROKE_GRAY: f32 = 0.82;

/// Label baseline offset from the top of the callout box.
const SUMMARY_LABEL_OFFSET: f32 = 16.0;

/// Value baseline offset from the top of the callout box.
const SUMMARY_VALUE_OFFSET: f32 = 34.0;

/// Draw label/value pairs stacked in input order.
///
/// Labels start at `content_right - totals_label_offset`; values end at the
/// right margin. The last row is bold at the emphasis size. The block is kept
/// on one page. Returns the cursor after the section gap.
pub fn draw_totals(canvas: &mut Canvas<'_>, config: &RenderConfig, rows: &[TotalsRow]) -> f32 {
    if rows.is_empty() {
        return canvas.cursor();
    }
    let t = &config.typography;
    canvas.ensure_space(rows.len() as f32 * t.line_height);

    let right = canvas.geometry().content_right();
    let label_x = right - config.totals_label_offset;
    let last = rows.len() - 1;

    for (index, row) in rows.iter().enumerate() {
        let (font, size) = if index == last {
            (Font::Bold, t.totals_emphasis_size)
        } else {
            (Font::Regular, t.body_size)
        };
        let y = canvas.cursor();
        canvas.draw_text(&row.label, label_x, y, Align::Left, font, size);
        canvas.draw_text(&row.value, right, y, Align::Right, font, size);
        canvas.advance(t.line_height);
    }

    canvas.advance(t.section_gap);
    canvas.cursor()
}

/// Draw a boxed callout at the right margin with a centered label and value.
///
/// The cursor is the top of the box. Returns the cursor after the section gap.
pub fn draw_summary(canvas: &mut Canvas<'_>, config: &RenderConfig, label: &str, value: &str) -> f32 {
    let t = &config.typography;
    let (width, height) = (config.summary_width, config.summary_height);
    canvas.ensure_space(height);

    let x = canvas.geometry().content_right() - width;
    let top = canvas.cursor();
    let center = x + width / 2.0;

    canvas.draw_box(x, top, width, height, SUMMARY_FILL_GRAY, SUMMARY_STROKE_GRAY);
    canvas.draw_text(label, center, top + SUMMARY_LABEL_OFFSET, Align::Center, Font::Bold, t.body_size);
    canvas.draw_text(
        value,
        center,
        top + SUMMARY_VALUE_OFFSET,
        Align::Center,
        Font::Bold,
        t.summary_value_size,
    );

    canvas.advance(height + t.section_gap);
    canvas.cursor()
}
