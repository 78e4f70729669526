//! Table exporter implementations for the CLI.

use fatex_core::export::{render_rows, ExportFormat};
use fatex_core::{FatexError, FlatTable, TableExporter};

/// Exports a table as delimited text with the requested separators.
pub struct DelimitedExporter;

impl TableExporter for DelimitedExporter {
    fn export(&self, table: &FlatTable, format: &ExportFormat) -> fatex_core::Result<Vec<u8>> {
        match format {
            ExportFormat::Delimited {
                field_separator,
                decimal_separator,
            } => {
                let mut writer = csv::WriterBuilder::new()
                    .delimiter(*field_separator as u8)
                    .from_writer(Vec::new());

                writer
                    .write_record(table.column_names())
                    .map_err(|e| FatexError::Io(std::io::Error::other(e)))?;
                for row in render_rows(table, *decimal_separator) {
                    writer
                        .write_record(&row)
                        .map_err(|e| FatexError::Io(std::io::Error::other(e)))?;
                }

                writer
                    .into_inner()
                    .map_err(|e| FatexError::Io(std::io::Error::other(e)))
            }
            ExportFormat::Workbook { .. } => Err(FatexError::Config(
                "workbook export is handled by an external collaborator".to_string(),
            )),
        }
    }
}

/// Serialize a table as a JSON array of row objects.
pub fn to_json(table: &FlatTable) -> serde_json::Result<String> {
    match table {
        FlatTable::Detail(rows) => serde_json::to_string_pretty(rows),
        FlatTable::Grouped(rows) => serde_json::to_string_pretty(rows),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fatex_core::{ExportConfig, InvoiceFlattener};

    const MINIMAL: &str = "<FatturaElettronica><FatturaElettronicaBody>\
        <DatiGenerali><DatiGeneraliDocumento>\
            <Numero>7</Numero><Data>2024-01-31</Data>\
            <ImportoTotaleDocumento>12.50</ImportoTotaleDocumento>\
        </DatiGeneraliDocumento></DatiGenerali>\
        <DatiBeniServizi><DettaglioLinee>\
            <NumeroLinea>1</NumeroLinea><Descrizione>X</Descrizione>\
            <PrezzoTotale>12.50</PrezzoTotale>\
        </DettaglioLinee></DatiBeniServizi>\
        </FatturaElettronicaBody></FatturaElettronica>";

    #[test]
    fn test_delimited_export_uses_separators() {
        let result = InvoiceFlattener::new().flatten(MINIMAL, "m.xml").unwrap();

        let bytes = DelimitedExporter
            .export(&result.table, &ExportFormat::delimited(&ExportConfig::default()))
            .unwrap();
        let text = String::from_utf8(bytes).unwrap();

        let mut lines = text.lines();
        let head = lines.next().unwrap();
        assert!(head.starts_with("filename;supplier_tax_id;"));
        let data = lines.next().unwrap();
        assert!(data.contains("12,50"));
        assert!(data.contains(";7;"));
    }

    #[test]
    fn test_workbook_export_is_delegated() {
        let result = InvoiceFlattener::new().flatten(MINIMAL, "m.xml").unwrap();

        let err = DelimitedExporter.export(
            &result.table,
            &ExportFormat::Workbook {
                sheet_name: "fatture".to_string(),
            },
        );
        assert!(err.is_err());
    }
}
