//! Field extraction from the parsed invoice tree.

pub mod header;
pub mod lines;
pub mod paths;

pub use header::{extract_header, transmission_format};
pub use lines::{classify_attachments, extract_line_items};
