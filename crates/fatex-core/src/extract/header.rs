//! Document-level (header) field extraction.

use crate::error::DocumentError;
use crate::models::record::{Header, MISSING, ZERO};
use crate::xml::Element;

use super::paths;

/// Extract the one [`Header`] record of the document. Absent fields fall
/// back to the sentinel, except the total amount which falls back to `"0"`
/// so the later numeric coercion stays well-defined.
pub fn extract_header(root: &Element) -> Result<Header, DocumentError> {
    Ok(Header {
        supplier_tax_id: root.scalar_or(paths::SUPPLIER_TAX_ID, MISSING)?,
        supplier_name: root.scalar_or(paths::SUPPLIER_NAME, MISSING)?,
        document_type: root.scalar_or(paths::DOCUMENT_TYPE, MISSING)?,
        document_number: root.scalar_or(paths::DOCUMENT_NUMBER, MISSING)?,
        document_date: root.scalar_or(paths::DOCUMENT_DATE, MISSING)?,
        total_amount: root.scalar_or(paths::TOTAL_AMOUNT, ZERO)?,
    })
}

/// The document's transmission format marker, if present.
pub fn transmission_format(root: &Element) -> Result<Option<String>, DocumentError> {
    match root.at(paths::TRANSMISSION_FORMAT)? {
        Some(el) if el.is_scalar() => Ok(Some(el.text().to_string())),
        _ => Ok(None),
    }
}
