//! Table renderer.
//!
//! Column widths come from relative weights. Body rows are pre-wrapped into a
//! [`RenderedRow`], checked against the remaining page space and moved to a
//! new page as a unit, where the header row is drawn again by the same routine
//! in continuation mode.
//!
//! Every column draws all of its wrapped lines whatever its alignment, and the
//! row is as tall as its tallest cell. Non-wrapping columns stay on one line
//! and may overflow their width.

use super::canvas::{Canvas, HEADER_RULE_GRAY, ROW_RULE_GRAY};
use super::text_block::{draw_section_title_at, PLACEHOLDER};
use crate::config::RenderConfig;
use crate::document::{ColumnSpec, TableData};
use crate::error::{Error, Result};
use crate::writer::font_manager::Font;

/// Distance of the divider below the header baseline.
const HEADER_RULE_OFFSET: f32 = 4.0;

/// Distance of the row divider above the next row's baseline.
const ROW_RULE_OFFSET: f32 = 6.0;

/// Compute actual column widths from weights.
///
/// Each width is `weight / sum(weights) * content_width`; the last column
/// takes whatever is left so the widths always sum to `content_width`.
pub fn column_widths(columns: &[&ColumnSpec], content_width: f32) -> Result<Vec<f32>> {
    if columns.is_empty() {
        return Err(Error::malformed("columns", "a table needs at least one column"));
    }
    for column in columns {
        if !(column.weight.is_finite() && column.weight > 0.0) {
            return Err(Error::InvalidColumn {
                column: column.label.clone(),
                weight: column.weight,
            });
        }
    }

    let total: f32 = columns.iter().map(|c| c.weight).sum();
    let mut widths: Vec<f32> = columns
        .iter()
        .map(|c| c.weight / total * content_width)
        .collect();
    let last = widths.len() - 1;
    let used: f32 = widths[..last].iter().sum();
    widths[last] = content_width - used;
    Ok(widths)
}

/// A body row wrapped and measured, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRow {
    /// Wrapped lines per column
    pub cells: Vec<Vec<String>>,
    /// `max(lines) * line_height + row_padding`
    pub height: f32,
}

impl RenderedRow {
    /// Extract, wrap and measure row `row` of `data`.
    pub fn build(
        canvas: &Canvas<'_>,
        config: &RenderConfig,
        data: &dyn TableData,
        columns: &[&ColumnSpec],
        widths: &[f32],
        row: usize,
    ) -> Result<Self> {
        let t = &config.typography;
        let mut cells = Vec::with_capacity(columns.len());

        for (index, (column, width)) in columns.iter().zip(widths).enumerate() {
            let raw = data.cell(row, index)?;
            let text = if raw.trim().is_empty() {
                PLACEHOLDER.to_string()
            } else {
                raw
            };

            let lines = if column.wrap {
                let wrap_width = (width - config.table.cell_padding).max(0.0);
                canvas.wrap(&text, Font::Regular, t.body_size, wrap_width)
            } else {
                let line = text.replace(['\r', '\n'], " ");
                let measured = canvas.measure(&line, Font::Regular, t.body_size);
                if measured > *width {
                    log::trace!(
                        "Row {} column '{}' overflows: {:.1}pt in {:.1}pt",
                        row,
                        column.label,
                        measured,
                        width
                    );
                }
                vec![line]
            };
            cells.push(lines);
        }

        let max_lines = cells.iter().map(Vec::len).max().unwrap_or(1).max(1);
        let height = max_lines as f32 * t.line_height + config.table.row_padding;
        Ok(Self { cells, height })
    }
}

/// Draw a titled table at the cursor. Returns the cursor after the section gap.
///
/// The title, header row and first body row are kept together. Whenever a row
/// does not fit, a new page is started and the header is redrawn with the
/// title marked as continued. An empty table draws its title and header only.
pub fn draw_table(
    canvas: &mut Canvas<'_>,
    config: &RenderConfig,
    title: &str,
    data: &dyn TableData,
) -> Result<f32> {
    let t = &config.typography;
    let columns = data.columns();
    let widths = column_widths(&columns, canvas.geometry().content_width())?;
    let header_height = t.line_height * 2.0;

    let mut pending = None;
    if data.row_count() > 0 {
        pending = Some(RenderedRow::build(canvas, config, data, &columns, &widths, 0)?);
    }
    let first_height = pending.as_ref().map_or(0.0, |r| r.height);
    canvas.ensure_space(header_height + first_height);
    draw_table_header(canvas, config, title, &columns, &widths, false);

    for index in 0..data.row_count() {
        let row = match pending.take() {
            Some(row) => row,
            None => RenderedRow::build(canvas, config, data, &columns, &widths, index)?,
        };

        if !canvas.fits(row.height) {
            if canvas.at_page_top() {
                log::warn!(
                    "Table '{}' row {} ({}pt) is taller than a page; drawing anyway",
                    title,
                    index,
                    row.height
                );
            } else {
                canvas.new_page();
                draw_table_header(canvas, config, title, &columns, &widths, true);
                if !canvas.fits(row.height) {
                    log::warn!("Table '{}' row {} overflows the page", title, index);
                }
            }
        }

        draw_row(canvas, config, &columns, &widths, &row);
    }

    log::trace!("Table '{}' drew {} rows", title, data.row_count());
    canvas.advance(t.section_gap);
    Ok(canvas.cursor())
}

/// Draw the table title and header row at the cursor.
///
/// With `continuation` set, the title carries the configured suffix
/// (` (continued)` by default).
pub fn draw_table_header(
    canvas: &mut Canvas<'_>,
    config: &RenderConfig,
    title: &str,
    columns: &[&ColumnSpec],
    widths: &[f32],
    continuation: bool,
) {
    let t = &config.typography;
    let left = canvas.geometry().content_left();

    let title = if continuation {
        format!("{}{}", title, config.table.continued_suffix)
    } else {
        title.to_string()
    };
    let top = canvas.cursor();
    let y = draw_section_title_at(canvas, config, &title, left, top);

    let mut x = left;
    for (column, width) in columns.iter().zip(widths) {
        let anchor = column.align.anchor_in(x, *width);
        canvas.draw_text(&column.label, anchor, y, column.align, Font::Bold, t.body_size);
        x += width;
    }
    canvas.draw_rule(y + HEADER_RULE_OFFSET, HEADER_RULE_GRAY);
    canvas.advance_to(y + t.line_height);
}

fn draw_row(
    canvas: &mut Canvas<'_>,
    config: &RenderConfig,
    columns: &[&ColumnSpec],
    widths: &[f32],
    row: &RenderedRow,
) {
    let t = &config.typography;
    let top = canvas.cursor();
    let mut x = canvas.geometry().content_left();

    for ((column, width), lines) in columns.iter().zip(widths).zip(&row.cells) {
        let anchor = column.align.anchor_in(x, *width);
        for (i, line) in lines.iter().enumerate() {
            let y = top + i as f32 * t.line_height;
            canvas.draw_text(line, anchor, y, column.align, Font::Regular, t.body_size);
        }
        x += width;
    }

    canvas.advance(row.height);
    let y = canvas.cursor() - ROW_RULE_OFFSET;
    canvas.draw_rule(y, ROW_RULE_GRAY);
}
