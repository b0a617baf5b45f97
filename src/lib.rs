// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::too_many_arguments)]
#![allow(clippy::type_complexity)]
#![allow(clippy::should_implement_trait)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # Stockdocs
//!
//! Paginated business documents for inventory operations: purchase orders,
//! pick lists, sales orders, delivery orders and invoices, rendered to PDF.
//!
//! ## Pipeline
//!
//! - **Schema adapters** ([`schemas`]) map a typed record into a generic
//!   [`Document`](document::Document): header, metadata and ordered sections.
//! - **Layout** ([`layout`]) draws sections onto a [`Canvas`](layout::Canvas)
//!   with weighted table columns, word wrapping, page breaks and repeated
//!   table headers.
//! - **Writer** ([`writer`]) serializes the pages into a deterministic PDF
//!   using the standard Helvetica fonts.
//!
//! Money and dates are formatted through the [`Formatters`](format::Formatters)
//! trait, so locale rules stay with the caller.
//!
//! ## Quick Start
//!
//! ```no_run
//! use stockdocs::config::RenderConfig;
//! use stockdocs::format::LocaleFormatter;
//! use stockdocs::renderer::render_record;
//! use stockdocs::schemas::DocumentRecord;
//!
//! # fn main() -> stockdocs::Result<()> {
//! let record = DocumentRecord::from_json_str(
//!     r#"{"document_type": "invoice", "display_id": "INV-1",
//!         "items": [{"item_name": "Pallet wrap", "quantity": 2,
//!                    "unit_price": 60, "line_total": 120}]}"#,
//! )?;
//! let rendered = render_record(&record, &LocaleFormatter::en_us(), None, &RenderConfig::default())?;
//! rendered.save_to("out")?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// PDF object model and writer
pub mod object;
pub mod writer;

// Document model and layout
pub mod document;
pub mod layout;

// Formatting and schema adapters
pub mod format;
pub mod schemas;

// Pipeline and output
pub mod output;
pub mod renderer;

pub use config::RenderConfig;
pub use document::{Document, Section};
pub use error::{Error, Result};
pub use format::{Formatters, LocaleFormatter};
pub use output::RenderedDocument;
pub use renderer::{render, render_record};
pub use schemas::DocumentRecord;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = "stockdocs";
