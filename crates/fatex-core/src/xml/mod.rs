//! Generic XML document tree and resilient field lookup.

mod tree;

pub use tree::{parse_document, Element};
