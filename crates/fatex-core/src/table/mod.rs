//! Flat-table assembly: header broadcast, numeric coercion, and the
//! optional grouping aggregation.

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::ExtractionError;
use crate::models::record::{AggregatedRow, Header, LineItem, Row};

/// Column names of the detail (ungrouped) table.
pub const DETAIL_COLUMNS: &[&str] = &[
    "filename",
    "supplier_tax_id",
    "supplier_name",
    "document_type",
    "document_number",
    "document_date",
    "total_amount",
    "line_number",
    "article_code",
    "description",
    "quantity",
    "unit_of_measure",
    "unit_price",
    "line_total",
    "vat_rate",
    "drawing_ref",
    "project_ref",
    "delivery_note_ref",
];

/// Column names of the grouped table.
pub const GROUPED_COLUMNS: &[&str] = &[
    "filename",
    "document_number",
    "document_date",
    "drawing_ref",
    "project_ref",
    "delivery_note_ref",
    "document_amount",
];

/// The finalized table handed to exporter collaborators. A document yields
/// either line detail or its aggregation, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlatTable {
    /// One row per line item.
    Detail(Vec<Row>),
    /// One row per distinct reference key.
    Grouped(Vec<AggregatedRow>),
}

impl FlatTable {
    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        match self {
            FlatTable::Detail(rows) => rows.len(),
            FlatTable::Grouped(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Column schema of this table. Present even when there are no rows.
    pub fn column_names(&self) -> &'static [&'static str] {
        match self {
            FlatTable::Detail(_) => DETAIL_COLUMNS,
            FlatTable::Grouped(_) => GROUPED_COLUMNS,
        }
    }
}

fn coerce(field: &'static str, value: &str) -> Result<Decimal, ExtractionError> {
    Decimal::from_str(value.trim()).map_err(|_| ExtractionError::Coercion {
        field,
        value: value.to_string(),
    })
}

/// Broadcast the header over every line item to produce one flat [`Row`]
/// per line, appending the source filename and coercing the numeric
/// columns. Coercion failure is fatal for the whole document.
///
/// Zero line items produce an empty table: the header is discarded rather
/// than emitted as a header-only row.
pub fn assemble(
    header: &Header,
    items: &[LineItem],
    filename: &str,
) -> Result<Vec<Row>, ExtractionError> {
    if items.is_empty() {
        return Ok(Vec::new());
    }

    let total_amount = coerce("total_amount", &header.total_amount)?;

    items
        .iter()
        .map(|item| {
            Ok(Row {
                filename: filename.to_string(),
                supplier_tax_id: header.supplier_tax_id.clone(),
                supplier_name: header.supplier_name.clone(),
                document_type: header.document_type.clone(),
                document_number: header.document_number.clone(),
                document_date: header.document_date.clone(),
                total_amount,
                line_number: item.line_number.clone(),
                article_code: item.article_code.clone(),
                description: item.description.clone(),
                quantity: coerce("quantity", &item.quantity)?,
                unit_of_measure: item.unit_of_measure.clone(),
                unit_price: coerce("unit_price", &item.unit_price)?,
                line_total: coerce("line_total", &item.line_total)?,
                vat_rate: coerce("vat_rate", &item.vat_rate)?,
                drawing_ref: item.references.drawing.clone(),
                project_ref: item.references.project.clone(),
                delivery_note_ref: item.references.delivery_note.clone(),
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct GroupKey {
    filename: String,
    document_number: String,
    document_date: String,
    drawing_ref: String,
    project_ref: String,
    delivery_note_ref: String,
}

/// Group rows by the composite reference key, summing `line_total` into
/// `document_amount` rounded to 2 decimal places (banker's rounding, the
/// `Decimal::round_dp` default). Output order follows the sorted key, which
/// is stable across runs; consumers must not rely on a particular order.
pub fn aggregate(rows: &[Row]) -> Vec<AggregatedRow> {
    let mut groups: BTreeMap<GroupKey, Decimal> = BTreeMap::new();

    for row in rows {
        let key = GroupKey {
            filename: row.filename.clone(),
            document_number: row.document_number.clone(),
            document_date: row.document_date.clone(),
            drawing_ref: row.drawing_ref.clone(),
            project_ref: row.project_ref.clone(),
            delivery_note_ref: row.delivery_note_ref.clone(),
        };
        *groups.entry(key).or_insert(Decimal::ZERO) += row.line_total;
    }

    debug!("aggregated {} rows into {} groups", rows.len(), groups.len());

    groups
        .into_iter()
        .map(|(key, sum)| AggregatedRow {
            filename: key.filename,
            document_number: key.document_number,
            document_date: key.document_date,
            drawing_ref: key.drawing_ref,
            project_ref: key.project_ref,
            delivery_note_ref: key.delivery_note_ref,
            document_amount: sum.round_dp(2),
        })
        .collect()
}
