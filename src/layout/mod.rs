//! Page layout for business documents.
//!
//! - [`canvas`]: paginated drawing surface with a vertical cursor
//! - [`header`]: title, identifier, metadata and branding
//! - [`text_block`]: labeled text blocks and two-column blocks
//! - [`table`]: weighted columns, wrapping and repeated headers
//! - [`totals`]: totals block and summary callout
//!
//! Every primitive draws at the canvas cursor and returns the cursor after
//! its trailing section gap.

pub mod canvas;
pub mod header;
pub mod table;
pub mod text_block;
pub mod totals;

pub use canvas::{Canvas, DrawOp, Page};
pub use header::draw_header;
pub use table::{column_widths, draw_table, draw_table_header, RenderedRow};
pub use text_block::{draw_text_block, draw_two_columns, PLACEHOLDER};
pub use totals::{draw_summary, draw_totals};
