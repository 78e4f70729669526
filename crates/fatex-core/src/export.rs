//! Exporter collaborator contract.
//!
//! The core renders column names and per-row cell text; byte-level
//! serialization (delimited files, workbooks) belongs to the collaborator
//! implementing [`TableExporter`].

use rust_decimal::Decimal;

use crate::models::config::ExportConfig;
use crate::table::FlatTable;
use crate::Result;

/// Requested output shape for a finalized table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportFormat {
    /// Delimited text, the back-office default (`;` fields, `,` decimals).
    Delimited {
        field_separator: char,
        decimal_separator: char,
    },

    /// Spreadsheet workbook with one named sheet.
    Workbook { sheet_name: String },
}

impl ExportFormat {
    /// Delimited format with the configured separators.
    pub fn delimited(config: &ExportConfig) -> Self {
        ExportFormat::Delimited {
            field_separator: config.field_separator,
            decimal_separator: config.decimal_separator,
        }
    }

    /// Workbook format with the configured sheet name.
    pub fn workbook(config: &ExportConfig) -> Self {
        ExportFormat::Workbook {
            sheet_name: config.sheet_name.clone(),
        }
    }
}

/// Serializes a finalized table into output bytes.
pub trait TableExporter {
    fn export(&self, table: &FlatTable, format: &ExportFormat) -> Result<Vec<u8>>;
}

/// Format an amount with the requested decimal separator.
pub fn format_amount(value: Decimal, decimal_separator: char) -> String {
    let text = value.to_string();
    if decimal_separator == '.' {
        text
    } else {
        text.replace('.', &decimal_separator.to_string())
    }
}

/// Render every row of the table as text cells, in column order, applying
/// the decimal separator to amount columns.
pub fn render_rows(table: &FlatTable, decimal_separator: char) -> Vec<Vec<String>> {
    match table {
        FlatTable::Detail(rows) => rows
            .iter()
            .map(|r| {
                vec![
                    r.filename.clone(),
                    r.supplier_tax_id.clone(),
                    r.supplier_name.clone(),
                    r.document_type.clone(),
                    r.document_number.clone(),
                    r.document_date.clone(),
                    format_amount(r.total_amount, decimal_separator),
                    r.line_number.clone(),
                    r.article_code.clone(),
                    r.description.clone(),
                    format_amount(r.quantity, decimal_separator),
                    r.unit_of_measure.clone(),
                    format_amount(r.unit_price, decimal_separator),
                    format_amount(r.line_total, decimal_separator),
                    format_amount(r.vat_rate, decimal_separator),
                    r.drawing_ref.clone(),
                    r.project_ref.clone(),
                    r.delivery_note_ref.clone(),
                ]
            })
            .collect(),
        FlatTable::Grouped(rows) => rows
            .iter()
            .map(|r| {
                vec![
                    r.filename.clone(),
                    r.document_number.clone(),
                    r.document_date.clone(),
                    r.drawing_ref.clone(),
                    r.project_ref.clone(),
                    r.delivery_note_ref.clone(),
                    format_amount(r.document_amount, decimal_separator),
                ]
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn test_format_amount_with_comma() {
        let value = Decimal::from_str("1234.56").unwrap();
        assert_eq!(format_amount(value, ','), "1234,56");
        assert_eq!(format_amount(value, '.'), "1234.56");
    }

    #[test]
    fn test_rendered_cells_match_schema_width() {
        let table = FlatTable::Detail(Vec::new());
        assert!(render_rows(&table, ',').is_empty());

        let grouped = FlatTable::Grouped(vec![crate::models::record::AggregatedRow {
            filename: "a.xml".to_string(),
            document_number: "1".to_string(),
            document_date: "2024-01-01".to_string(),
            drawing_ref: "**".to_string(),
            project_ref: "**".to_string(),
            delivery_note_ref: "**".to_string(),
            document_amount: Decimal::from_str("2.00").unwrap(),
        }]);
        let rows = render_rows(&grouped, ',');
        assert_eq!(rows[0].len(), grouped.column_names().len());
        assert_eq!(rows[0][6], "2,00");
    }
}
