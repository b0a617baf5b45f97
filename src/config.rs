//! Configuration for document rendering.
//!
//! Every constant the layout primitives use lives here so that page size,
//! margins and spacing are configuration rather than hardcoded numbers.
//! Defaults reproduce a US Letter page with 48pt margins.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Page size presets.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageSize {
    /// US Letter (8.5" x 11")
    #[default]
    Letter,
    /// A4 (210mm x 297mm)
    A4,
    /// Legal (8.5" x 14")
    Legal,
    /// Custom dimensions in points
    Custom {
        /// Page width in points
        width: f32,
        /// Page height in points
        height: f32,
    },
}

impl PageSize {
    /// Get dimensions in points (1 inch = 72 points).
    pub fn dimensions(&self) -> (f32, f32) {
        match self {
            PageSize::Letter => (612.0, 792.0),
            PageSize::A4 => (595.0, 842.0),
            PageSize::Legal => (612.0, 1008.0),
            PageSize::Custom { width, height } => (*width, *height),
        }
    }
}

/// Page margins in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    /// Top margin
    pub top: f32,
    /// Right margin
    pub right: f32,
    /// Bottom margin
    pub bottom: f32,
    /// Left margin
    pub left: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(48.0)
    }
}

impl Margins {
    /// Same margin on every side.
    pub fn uniform(margin: f32) -> Self {
        Self {
            top: margin,
            right: margin,
            bottom: margin,
            left: margin,
        }
    }
}

/// Immutable page geometry shared by the canvas and every layout primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    /// Page width in points
    pub width: f32,
    /// Page height in points
    pub height: f32,
    /// Page margins
    pub margins: Margins,
}

impl PageGeometry {
    /// Page width minus left and right margins.
    pub fn content_width(&self) -> f32 {
        self.width - self.margins.left - self.margins.right
    }

    /// X coordinate of the left content edge.
    pub fn content_left(&self) -> f32 {
        self.margins.left
    }

    /// X coordinate of the right content edge.
    pub fn content_right(&self) -> f32 {
        self.width - self.margins.right
    }

    /// Lowest y (top-down) that content may reach.
    pub fn body_bottom(&self) -> f32 {
        self.height - self.margins.bottom
    }

    /// Vertical space available on an empty page.
    pub fn body_height(&self) -> f32 {
        self.body_bottom() - self.margins.top
    }
}

/// Font sizes and vertical rhythm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Typography {
    /// Baseline-to-baseline distance for every text line
    pub line_height: f32,
    /// Space added after each section
    pub section_gap: f32,
    /// Document title size (bold)
    pub title_size: f32,
    /// Document identifier size
    pub document_id_size: f32,
    /// Metadata rows size
    pub meta_size: f32,
    /// Section title size (bold)
    pub section_title_size: f32,
    /// Body text and table cells
    pub body_size: f32,
    /// Company name in the header (bold)
    pub branding_name_size: f32,
    /// Company address and contact lines
    pub branding_line_size: f32,
    /// Emphasised final totals row (bold)
    pub totals_emphasis_size: f32,
    /// Summary callout value size
    pub summary_value_size: f32,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            line_height: 14.0,
            section_gap: 12.0,
            title_size: 18.0,
            document_id_size: 11.0,
            meta_size: 10.0,
            section_title_size: 11.0,
            body_size: 10.0,
            branding_name_size: 12.0,
            branding_line_size: 9.0,
            totals_emphasis_size: 11.0,
            summary_value_size: 14.0,
        }
    }
}

/// Table spacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Horizontal room subtracted from a column before wrapping
    pub cell_padding: f32,
    /// Extra height added to every body row
    pub row_padding: f32,
    /// Suffix appended to a table title reprinted on a continuation page
    pub continued_suffix: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            cell_padding: 4.0,
            row_padding: 4.0,
            continued_suffix: " (continued)".to_string(),
        }
    }
}

/// Complete render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Page size
    pub page_size: PageSize,
    /// Page margins
    pub margins: Margins,
    /// Font sizes and spacing
    pub typography: Typography,
    /// Table spacing
    pub table: TableConfig,
    /// Width reserved for right-aligned header metadata
    pub meta_width: f32,
    /// Gap between the two halves of a two-column block
    pub column_gap: f32,
    /// Distance of the totals label anchor from the right margin
    pub totals_label_offset: f32,
    /// Summary callout box width
    pub summary_width: f32,
    /// Summary callout box height
    pub summary_height: f32,
    /// Compress page content streams with FlateDecode
    pub compress: bool,
    /// Creator written to the PDF Info dictionary
    pub creator: Option<String>,
    /// Author written to the PDF Info dictionary
    pub author: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::Letter,
            margins: Margins::default(),
            typography: Typography::default(),
            table: TableConfig::default(),
            meta_width: 180.0,
            column_gap: 24.0,
            totals_label_offset: 160.0,
            summary_width: 180.0,
            summary_height: 48.0,
            compress: false,
            creator: Some("stockdocs".to_string()),
            author: None,
        }
    }
}

impl RenderConfig {
    /// Create configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set page size.
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set all margins.
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Set line height.
    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.typography.line_height = line_height;
        self
    }

    /// Enable or disable content stream compression.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Set document author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Page geometry derived from page size and margins.
    pub fn geometry(&self) -> PageGeometry {
        let (width, height) = self.page_size.dimensions();
        PageGeometry {
            width,
            height,
            margins: self.margins,
        }
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: RenderConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Reject geometry that leaves no room to lay out a table row.
    pub fn validate(&self) -> Result<()> {
        let geometry = self.geometry();
        let t = &self.typography;

        if !(geometry.width > 0.0 && geometry.height > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "page size must be positive, got {}x{}",
                geometry.width, geometry.height
            )));
        }
        let margins = [
            geometry.margins.top,
            geometry.margins.right,
            geometry.margins.bottom,
            geometry.margins.left,
        ];
        if margins.iter().any(|m| !m.is_finite() || *m < 0.0) {
            return Err(Error::InvalidConfig("margins must be finite and >= 0".to_string()));
        }
        if !(geometry.content_width() > 0.0) {
            return Err(Error::InvalidConfig(
                "left and right margins leave no content width".to_string(),
            ));
        }
        if !(t.line_height.is_finite() && t.line_height > 0.0) {
            return Err(Error::InvalidConfig("line height must be > 0".to_string()));
        }
        let sizes = [
            t.title_size,
            t.document_id_size,
            t.meta_size,
            t.section_title_size,
            t.body_size,
            t.branding_name_size,
            t.branding_line_size,
            t.totals_emphasis_size,
            t.summary_value_size,
        ];
        if sizes.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            return Err(Error::InvalidConfig("font sizes must be > 0".to_string()));
        }
        if self.table.cell_padding < 0.0 || self.table.row_padding < 0.0 {
            return Err(Error::InvalidConfig("table padding must be >= 0".to_string()));
        }
        // A table header plus one single-line row must fit on an empty page.
        let minimum = t.line_height * 2.0 + self.table.row_padding;
        if geometry.body_height() < minimum {
            return Err(Error::InvalidConfig(format!(
                "top and bottom margins leave {}pt, need at least {}pt",
                geometry.body_height(),
                minimum
            )));
        }
        Ok(())
    }
}
