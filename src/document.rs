//! Generic document model consumed by the layout primitives.
//!
//! A [`Document`] is a header (title, identifier, metadata, optional company
//! branding) followed by an ordered list of [`Section`]s. Schema adapters
//! build documents; the renderer lays them out. Nothing in this module knows
//! about purchase orders or invoices.

use crate::error::Result;
use std::fmt;

/// Horizontal alignment of a text line relative to its anchor x.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    /// Anchor is the left edge
    #[default]
    Left,
    /// Anchor is the midpoint
    Center,
    /// Anchor is the right edge
    Right,
}

impl Align {
    /// Left origin for a line of `width` drawn at `anchor_x`.
    pub fn origin(&self, anchor_x: f32, width: f32) -> f32 {
        match self {
            Align::Left => anchor_x,
            Align::Center => anchor_x - width / 2.0,
            Align::Right => anchor_x - width,
        }
    }

    /// Anchor x for a line placed in a cell starting at `left` of `width`.
    pub fn anchor_in(&self, left: f32, width: f32) -> f32 {
        match self {
            Align::Left => left,
            Align::Center => left + width / 2.0,
            Align::Right => left + width,
        }
    }
}

/// A `Label: value` pair shown in the header's right-hand column.
#[derive(Debug, Clone, PartialEq)]
pub struct MetaField {
    /// Field label
    pub label: String,
    /// Display value
    pub value: String,
}

/// Company identity drawn above the document title.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Branding {
    /// Company name (bold)
    pub company_name: Option<String>,
    /// Postal address lines
    pub address_lines: Vec<String>,
    /// Phone, email and tax id lines
    pub contact_lines: Vec<String>,
}

impl Branding {
    /// True when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.company_name
            .as_deref()
            .map_or(true, |name| name.trim().is_empty())
            && self.address_lines.iter().all(|l| l.trim().is_empty())
            && self.contact_lines.iter().all(|l| l.trim().is_empty())
    }
}

/// A titled list of plain-text lines; each line is wrapped independently.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    /// Bold section title
    pub title: String,
    /// Lines to wrap; an empty list renders a single `-`
    pub lines: Vec<String>,
}

impl TextBlock {
    /// Create a text block.
    pub fn new(title: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            title: title.into(),
            lines,
        }
    }
}

/// One row of a totals block.
#[derive(Debug, Clone, PartialEq)]
pub struct TotalsRow {
    /// Row label
    pub label: String,
    /// Formatted amount
    pub value: String,
}

impl TotalsRow {
    /// Create a totals row.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Header information for a table column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    /// Header label
    pub label: String,
    /// Relative width; normalized against the sum of all weights
    pub weight: f32,
    /// Alignment of header and body text
    pub align: Align,
    /// Word-wrap body cells to the column width
    pub wrap: bool,
}

type ValueFn<R> = Box<dyn Fn(&R) -> Result<String> + Send + Sync>;

/// A table column over rows of type `R`.
pub struct Column<R> {
    spec: ColumnSpec,
    value: ValueFn<R>,
}

impl<R> Column<R> {
    /// Left-aligned, non-wrapping column.
    pub fn new<F>(label: impl Into<String>, weight: f32, value: F) -> Self
    where
        F: Fn(&R) -> Result<String> + Send + Sync + 'static,
    {
        Self {
            spec: ColumnSpec {
                label: label.into(),
                weight,
                align: Align::Left,
                wrap: false,
            },
            value: Box::new(value),
        }
    }

    /// Set alignment.
    pub fn with_align(mut self, align: Align) -> Self {
        self.spec.align = align;
        self
    }

    /// Word-wrap body cells.
    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.spec.wrap = wrap;
        self
    }

    /// Header information.
    pub fn spec(&self) -> &ColumnSpec {
        &self.spec
    }

    /// Extract the display text for `row`.
    pub fn value(&self, row: &R) -> Result<String> {
        (self.value)(row)
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column").field("spec", &self.spec).finish_non_exhaustive()
    }
}

/// Row-type-erased view of a table, so sections can hold any row type.
pub trait TableData: Send + Sync {
    /// Column headers in display order.
    fn columns(&self) -> Vec<&ColumnSpec>;

    /// Number of body rows.
    fn row_count(&self) -> usize;

    /// Display text of one cell.
    fn cell(&self, row: usize, column: usize) -> Result<String>;
}

impl fmt::Debug for dyn TableData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableData")
            .field("columns", &self.columns())
            .field("rows", &self.row_count())
            .finish()
    }
}

/// Columns plus row data.
#[derive(Debug)]
pub struct Table<R> {
    columns: Vec<Column<R>>,
    rows: Vec<R>,
}

impl<R> Table<R> {
    /// Create a table.
    pub fn new(columns: Vec<Column<R>>, rows: Vec<R>) -> Self {
        Self { columns, rows }
    }
}

impl<R: Send + Sync> TableData for Table<R> {
    fn columns(&self) -> Vec<&ColumnSpec> {
        self.columns.iter().map(Column::spec).collect()
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn cell(&self, row: usize, column: usize) -> Result<String> {
        match (self.rows.get(row), self.columns.get(column)) {
            (Some(r), Some(c)) => c.value(r),
            _ => Err(crate::error::Error::malformed(
                "table",
                format!("cell ({}, {}) out of range", row, column),
            )),
        }
    }
}

/// A unit of layout, rendered strictly in order.
#[derive(Debug)]
pub enum Section {
    /// Titled wrapped lines across the full content width
    Text(TextBlock),
    /// Two titled blocks side by side; the right one is optional
    Columns {
        /// Left block
        left: TextBlock,
        /// Right block
        right: Option<TextBlock>,
    },
    /// Titled table with repeated headers across pages
    Table {
        /// Section title drawn above the header row
        title: String,
        /// Columns and rows
        data: Box<dyn TableData>,
    },
    /// Right-aligned label/value pairs; the last row is emphasized
    Totals(Vec<TotalsRow>),
    /// Boxed callout at the right margin (e.g. balance due)
    Summary {
        /// Callout label
        label: String,
        /// Callout value
        value: String,
    },
}

impl Section {
    /// Table section from typed columns and rows.
    pub fn table<R: Send + Sync + 'static>(
        title: impl Into<String>,
        columns: Vec<Column<R>>,
        rows: Vec<R>,
    ) -> Self {
        Section::Table {
            title: title.into(),
            data: Box::new(Table::new(columns, rows)),
        }
    }

    /// Short name used in log messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Section::Text(_) => "text",
            Section::Columns { .. } => "columns",
            Section::Table { .. } => "table",
            Section::Totals(_) => "totals",
            Section::Summary { .. } => "summary",
        }
    }
}

/// A complete render request.
#[derive(Debug)]
pub struct Document {
    /// Bold title at top-left
    pub title: String,
    /// Identifier drawn under the title
    pub document_id: Option<String>,
    /// Right-aligned metadata rows
    pub meta: Vec<MetaField>,
    /// Company identity above the title
    pub branding: Option<Branding>,
    /// Body sections in order
    pub sections: Vec<Section>,
}

impl Document {
    /// Create an empty document with a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            document_id: None,
            meta: Vec::new(),
            branding: None,
            sections: Vec::new(),
        }
    }

    /// Set the document identifier. Blank identifiers are ignored.
    pub fn with_document_id(mut self, id: Option<String>) -> Self {
        self.document_id = id.filter(|s| !s.trim().is_empty());
        self
    }

    /// Append a metadata row.
    pub fn with_meta(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.push(MetaField {
            label: label.into(),
            value: value.into(),
        });
        self
    }

    /// Set company branding. Empty branding is dropped.
    pub fn with_branding(mut self, branding: Option<Branding>) -> Self {
        self.branding = branding.filter(|b| !b.is_empty());
        self
    }

    /// Append a section.
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Append a section in place.
    pub fn push(&mut self, section: Section) {
        self.sections.push(section);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_align_origin() {
        assert_eq!(Align::Left.origin(100.0, 40.0), 100.0);
        assert_eq!(Align::Center.origin(100.0, 40.0), 80.0);
        assert_eq!(Align::Right.origin(100.0, 40.0), 60.0);
    }

    #[test]
    fn test_align_anchor_in_cell() {
        assert_eq!(Align::Left.anchor_in(48.0, 100.0), 48.0);
        assert_eq!(Align::Center.anchor_in(48.0, 100.0), 98.0);
        assert_eq!(Align::Right.anchor_in(48.0, 100.0), 148.0);
    }

    #[test]
    fn test_table_data_erases_row_type() {
        let section = Section::table(
            "Items",
            vec![
                Column::new("Name", 2.0, |r: &(String, u32)| Ok(r.0.clone())),
                Column::new("Qty", 1.0, |r: &(String, u32)| Ok(r.1.to_string()))
                    .with_align(Align::Right),
            ],
            vec![("Bolt".to_string(), 3), ("Nut".to_string(), 12)],
        );
        let Section::Table { data, .. } = section else {
            panic!("expected table");
        };
        assert_eq!(data.row_count(), 2);
        assert_eq!(data.columns()[1].align, Align::Right);
        assert_eq!(data.cell(1, 1).unwrap(), "12");
        assert!(data.cell(5, 0).is_err());
    }

    #[test]
    fn test_extractor_errors_propagate() {
        let table = Table::new(
            vec![Column::new("Price", 1.0, |p: &f64| {
                if p.is_finite() {
                    Ok(p.to_string())
                } else {
                    Err(Error::malformed("unit_price", "not a finite number"))
                }
            })],
            vec![f64::NAN],
        );
        assert!(matches!(table.cell(0, 0), Err(Error::MalformedInput { .. })));
    }

    #[test]
    fn test_blank_document_id_dropped() {
        let doc = Document::new("Invoice").with_document_id(Some("  ".to_string()));
        assert!(doc.document_id.is_none());
    }

    #[test]
    fn test_empty_branding_dropped() {
        let doc = Document::new("Invoice").with_branding(Some(Branding::default()));
        assert!(doc.branding.is_none());
    }
}
