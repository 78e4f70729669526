//! Record types produced by the extraction and flattening stages.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sentinel value for absent string fields.
pub const MISSING: &str = "**";

/// Default for absent numeric-string fields, coerced later.
pub const ZERO: &str = "0";

/// Document-level fields, extracted once per invoice. Numeric values stay
/// as raw strings until [`crate::table::assemble`] coerces them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Supplier VAT identifier (IdFiscaleIVA/IdCodice).
    pub supplier_tax_id: String,

    /// Supplier legal name (Anagrafica/Denominazione).
    pub supplier_name: String,

    /// Document type code (TipoDocumento).
    pub document_type: String,

    /// Document number (Numero).
    pub document_number: String,

    /// Document date as given in the source (Data).
    pub document_date: String,

    /// Total document amount (ImportoTotaleDocumento), raw string.
    pub total_amount: String,
}

/// References resolved from a line item's extra-data group, keyed by type
/// code. Slots keep the [`MISSING`] sentinel when no matching entry exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedReferences {
    /// Drawing number reference.
    pub drawing: String,

    /// Project / work-order code reference.
    pub project: String,

    /// Delivery-note reference.
    pub delivery_note: String,
}

impl Default for TypedReferences {
    fn default() -> Self {
        Self {
            drawing: MISSING.to_string(),
            project: MISSING.to_string(),
            delivery_note: MISSING.to_string(),
        }
    }
}

/// One billed position from the document's goods-and-services section.
/// Numeric fields stay as raw strings until assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Line number (NumeroLinea).
    pub line_number: String,

    /// Article code (CodiceArticolo/CodiceValore).
    pub article_code: String,

    /// Free-text line description (Descrizione).
    pub description: String,

    /// Quantity (Quantita), raw string.
    pub quantity: String,

    /// Unit of measure (UnitaMisura).
    pub unit_of_measure: String,

    /// Net unit price (PrezzoUnitario), raw string.
    pub unit_price: String,

    /// Line total (PrezzoTotale), raw string.
    pub line_total: String,

    /// VAT rate (AliquotaIVA), raw string.
    pub vat_rate: String,

    /// References resolved from the extra-data group.
    pub references: TypedReferences,
}

/// One flat output row: header fields broadcast over a line item, plus the
/// source filename, with numeric columns coerced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub filename: String,
    pub supplier_tax_id: String,
    pub supplier_name: String,
    pub document_type: String,
    pub document_number: String,
    pub document_date: String,
    pub total_amount: Decimal,
    pub line_number: String,
    pub article_code: String,
    pub description: String,
    pub quantity: Decimal,
    pub unit_of_measure: String,
    pub unit_price: Decimal,
    pub line_total: Decimal,
    pub vat_rate: Decimal,
    pub drawing_ref: String,
    pub project_ref: String,
    pub delivery_note_ref: String,
}

/// One grouped output row: composite business key plus the summed,
/// 2-decimal-rounded document amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedRow {
    pub filename: String,
    pub document_number: String,
    pub document_date: String,
    pub drawing_ref: String,
    pub project_ref: String,
    pub delivery_note_ref: String,
    pub document_amount: Decimal,
}
