//! The linear flattening pipeline: parse, extract, assemble, aggregate.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::extract::{extract_header, extract_line_items, transmission_format};
use crate::models::config::ExtractionConfig;
use crate::table::{aggregate, assemble, FlatTable};
use crate::xml::parse_document;

/// Result of flattening one invoice document.
#[derive(Debug, Clone)]
pub struct FlattenResult {
    /// Finalized table, detail or grouped.
    pub table: FlatTable,
    /// Non-fatal warnings collected along the way.
    pub warnings: Vec<String>,
    /// Number of line-item groups found in the document.
    pub nr_lines: usize,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Flattens one invoice document into a table. Holds no per-document
/// state: one instance can serve concurrent invocations on independent
/// documents.
#[derive(Debug, Clone, Default)]
pub struct InvoiceFlattener {
    config: ExtractionConfig,
}

impl InvoiceFlattener {
    /// Create a flattener with default extraction settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a flattener from explicit extraction settings.
    pub fn with_config(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Enable or disable the grouping aggregation.
    pub fn with_grouping(mut self, grouping: bool) -> Self {
        self.config.group_by_reference = grouping;
        self
    }

    /// Run the whole pipeline on one UTF-8 document. A parse, shape, or
    /// coercion failure aborts with an error result and no partial table.
    pub fn flatten(&self, xml: &str, filename: &str) -> Result<FlattenResult> {
        let start = Instant::now();
        let mut warnings = Vec::new();

        info!("flattening {} ({} bytes)", filename, xml.len());

        let root = parse_document(xml)?;

        if let Some(format) = transmission_format(&root)? {
            if !self.config.accepted_formats.contains(&format) {
                warn!("unexpected transmission format {format:?} in {filename}");
                warnings.push(format!("unexpected transmission format: {format}"));
            }
        }

        let header = extract_header(&root)?;
        let items = extract_line_items(&root, &self.config)?;
        let nr_lines = items.len();

        let rows = assemble(&header, &items, filename)?;

        let table = if self.config.group_by_reference {
            FlatTable::Grouped(aggregate(&rows))
        } else {
            FlatTable::Detail(rows)
        };

        debug!(
            "flattened {} line items of {} into {} rows",
            nr_lines,
            filename,
            table.row_count()
        );

        Ok(FlattenResult {
            table,
            warnings,
            nr_lines,
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }
}
