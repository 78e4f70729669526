//! Node paths of the FatturaPA B2B invoice shape, relative to the root
//! element. The counterpart of a regex pattern table for a tagged tree.

/// Supplier VAT identifier.
pub const SUPPLIER_TAX_ID: &[&str] = &[
    "FatturaElettronicaHeader",
    "CedentePrestatore",
    "DatiAnagrafici",
    "IdFiscaleIVA",
    "IdCodice",
];

/// Supplier legal name.
pub const SUPPLIER_NAME: &[&str] = &[
    "FatturaElettronicaHeader",
    "CedentePrestatore",
    "DatiAnagrafici",
    "Anagrafica",
    "Denominazione",
];

/// Transmission format marker (FPR12 for B2B, FPA12 for public bodies).
pub const TRANSMISSION_FORMAT: &[&str] = &[
    "FatturaElettronicaHeader",
    "DatiTrasmissione",
    "FormatoTrasmissione",
];

/// Document type code.
pub const DOCUMENT_TYPE: &[&str] = &[
    "FatturaElettronicaBody",
    "DatiGenerali",
    "DatiGeneraliDocumento",
    "TipoDocumento",
];

/// Document date.
pub const DOCUMENT_DATE: &[&str] = &[
    "FatturaElettronicaBody",
    "DatiGenerali",
    "DatiGeneraliDocumento",
    "Data",
];

/// Document number.
pub const DOCUMENT_NUMBER: &[&str] = &[
    "FatturaElettronicaBody",
    "DatiGenerali",
    "DatiGeneraliDocumento",
    "Numero",
];

/// Total document amount.
pub const TOTAL_AMOUNT: &[&str] = &[
    "FatturaElettronicaBody",
    "DatiGenerali",
    "DatiGeneraliDocumento",
    "ImportoTotaleDocumento",
];

/// Parent of the repeating line-item group.
pub const GOODS_SECTION: &[&str] = &["FatturaElettronicaBody", "DatiBeniServizi"];

/// Repeating line-item element name within [`GOODS_SECTION`].
pub const LINE_GROUP: &str = "DettaglioLinee";

/// Repeating extra-data element name within a line item.
pub const EXTRA_DATA_GROUP: &str = "AltriDatiGestionali";

// Scalar fields within one line item.
pub const LINE_NUMBER: &[&str] = &["NumeroLinea"];
pub const ARTICLE_CODE: &[&str] = &["CodiceArticolo", "CodiceValore"];
pub const DESCRIPTION: &[&str] = &["Descrizione"];
pub const QUANTITY: &[&str] = &["Quantita"];
pub const UNIT_OF_MEASURE: &[&str] = &["UnitaMisura"];
pub const UNIT_PRICE: &[&str] = &["PrezzoUnitario"];
pub const LINE_TOTAL: &[&str] = &["PrezzoTotale"];
pub const VAT_RATE: &[&str] = &["AliquotaIVA"];

// Scalar fields within one extra-data entry.
pub const TYPE_CODE: &[&str] = &["TipoDato"];
pub const REFERENCE_TEXT: &[&str] = &["RiferimentoTesto"];
