//! Core library for FatturaPA invoice flattening.
//!
//! This crate provides:
//! - Resilient field lookup in a partially-missing XML invoice tree
//! - Extraction of header and line-item records, with extra-data
//!   classification into typed references
//! - Header broadcast and numeric coercion into a flat row table
//! - Optional grouping aggregation by the reference key
//! - Collaborator contracts for table export and audit logging

pub mod audit;
pub mod error;
pub mod export;
pub mod extract;
pub mod models;
pub mod pipeline;
pub mod table;
pub mod xml;

pub use audit::{AuditRecord, AuditSink, AuditStatus};
pub use error::{DocumentError, ExtractionError, FatexError, Result};
pub use export::{ExportFormat, TableExporter};
pub use models::config::{ExportConfig, ExtractionConfig, FatexConfig};
pub use models::record::{AggregatedRow, Header, LineItem, Row, TypedReferences};
pub use pipeline::{FlattenResult, InvoiceFlattener};
pub use table::FlatTable;
