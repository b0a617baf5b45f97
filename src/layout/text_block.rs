//! Labeled text blocks.
//!
//! A block is a bold section title followed by lines that are each wrapped
//! independently. An empty line list renders a single `-` so the block never
//! collapses to zero height.

use super::canvas::Canvas;
use crate::config::RenderConfig;
use crate::document::{Align, TextBlock};
use crate::writer::font_manager::Font;

/// Placeholder for missing values.
pub const PLACEHOLDER: &str = "-";

/// Draw a bold section title with its baseline at `y`. Returns the next baseline.
pub fn draw_section_title_at(
    canvas: &mut Canvas<'_>,
    config: &RenderConfig,
    title: &str,
    x: f32,
    y: f32,
) -> f32 {
    let t = &config.typography;
    canvas.draw_text(title, x, y, Align::Left, Font::Bold, t.section_title_size);
    y + t.line_height
}

/// Wrap each of `lines` independently to `width`.
///
/// An empty input becomes a single placeholder line.
pub fn wrap_lines(
    canvas: &Canvas<'_>,
    lines: &[String],
    font: Font,
    size: f32,
    width: f32,
) -> Vec<String> {
    if lines.is_empty() {
        return vec![PLACEHOLDER.to_string()];
    }
    lines
        .iter()
        .flat_map(|line| canvas.wrap(line, font, size, width))
        .collect()
}

/// Draw `lines` at a fixed position without pagination. Returns the y below
/// the last line.
pub fn draw_lines_at(
    canvas: &mut Canvas<'_>,
    config: &RenderConfig,
    lines: &[String],
    x: f32,
    y: f32,
    width: f32,
    size: f32,
) -> f32 {
    let line_height = config.typography.line_height;
    let mut cursor = y;
    for line in wrap_lines(canvas, lines, Font::Regular, size, width) {
        canvas.draw_text(&line, x, cursor, Align::Left, Font::Regular, size);
        cursor += line_height;
    }
    cursor
}

/// Height of a titled block of `line_count` wrapped lines.
fn block_height(config: &RenderConfig, line_count: usize) -> f32 {
    config.typography.line_height * (line_count as f32 + 1.0)
}

/// Draw a full-width labeled text block at the cursor.
///
/// The title is kept with the first line; body lines break across pages one
/// line at a time. Returns the cursor after the trailing section gap.
pub fn draw_text_block(canvas: &mut Canvas<'_>, config: &RenderConfig, block: &TextBlock) -> f32 {
    let t = &config.typography;
    let width = canvas.geometry().content_width();
    let x = canvas.geometry().content_left();
    let lines = wrap_lines(canvas, &block.lines, Font::Regular, t.body_size, width);

    canvas.ensure_space(block_height(config, 1));
    let top = canvas.cursor();
    let y = draw_section_title_at(canvas, config, &block.title, x, top);
    canvas.advance_to(y);

    for line in &lines {
        canvas.ensure_space(t.line_height);
        let y = canvas.cursor();
        canvas.draw_text(line, x, y, Align::Left, Font::Regular, t.body_size);
        canvas.advance(t.line_height);
    }

    canvas.advance(t.section_gap);
    canvas.cursor()
}

/// Draw two labeled blocks side by side, each `(content_width - gap) / 2` wide.
///
/// The pair moves to a new page as a unit when it does not fit. A pair taller
/// than a whole page is drawn as two stacked full-width blocks instead.
/// Returns the cursor after the trailing section gap.
pub fn draw_two_columns(
    canvas: &mut Canvas<'_>,
    config: &RenderConfig,
    left: &TextBlock,
    right: Option<&TextBlock>,
) -> f32 {
    let t = &config.typography;
    let geometry = *canvas.geometry();
    let column_width = (geometry.content_width() - config.column_gap) / 2.0;
    let left_x = geometry.content_left();
    let right_x = left_x + column_width + config.column_gap;

    let left_lines = wrap_lines(canvas, &left.lines, Font::Regular, t.body_size, column_width);
    let right_lines = right
        .map(|block| wrap_lines(canvas, &block.lines, Font::Regular, t.body_size, column_width));

    let left_height = block_height(config, left_lines.len());
    let right_height = right_lines
        .as_ref()
        .map_or(0.0, |lines| block_height(config, lines.len()));
    let height = left_height.max(right_height);

    if height > geometry.body_height() {
        log::debug!("Two-column block ({}pt) taller than a page, stacking", height);
        draw_text_block(canvas, config, left);
        if let Some(block) = right {
            draw_text_block(canvas, config, block);
        }
        return canvas.cursor();
    }

    canvas.ensure_space(height);
    let top = canvas.cursor();
    draw_column(canvas, config, &left.title, &left_lines, left_x, top);
    if let (Some(block), Some(lines)) = (right, right_lines.as_ref()) {
        draw_column(canvas, config, &block.title, lines, right_x, top);
    }

    canvas.advance(height + t.section_gap);
    canvas.cursor()
}

fn draw_column(
    canvas: &mut Canvas<'_>,
    config: &RenderConfig,
    title: &str,
    lines: &[String],
    x: f32,
    top: f32,
) {
    let t = &config.typography;
    let mut y = draw_section_title_at(canvas, config, title, x, top);
    for line in lines {
        canvas.draw_text(line, x, y, Align::Left, Font::Regular, t.body_size);
        y += t.line_height;
    }
}
