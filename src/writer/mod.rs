//! PDF writing.
//!
//! - [`font_manager`]: Base-14 Helvetica metrics and word wrapping
//! - [`content_stream`]: page content operators
//! - [`object_serializer`]: PDF object syntax
//! - [`pdf_writer`]: file assembly (objects, xref, trailer)

pub mod content_stream;
pub mod font_manager;
pub mod object_serializer;
pub mod pdf_writer;

pub use content_stream::{encode_win_ansi, ContentStreamBuilder};
pub use font_manager::{wrap_text, Font, FontManager, SimpleFontMetrics, TextMetrics};
pub use object_serializer::ObjectSerializer;
pub use pdf_writer::{PageBuilder, PdfWriter, PdfWriterConfig};
