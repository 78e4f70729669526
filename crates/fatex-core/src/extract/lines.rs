//! Line-item extraction and extra-data classification.

use tracing::trace;

use crate::error::DocumentError;
use crate::models::config::ExtractionConfig;
use crate::models::record::{LineItem, TypedReferences, MISSING, ZERO};
use crate::xml::Element;

use super::paths;

/// Resolve a line item's extra-data group into typed references.
///
/// Entries are visited in document order and the matching slot is simply
/// overwritten, so when two entries share a type code the last one wins.
/// Unrecognized type codes are skipped; an absent group leaves every slot
/// at the sentinel.
pub fn classify_attachments(
    line: &Element,
    config: &ExtractionConfig,
) -> Result<TypedReferences, DocumentError> {
    let mut refs = TypedReferences::default();

    for entry in line.children_named(paths::EXTRA_DATA_GROUP) {
        let type_code = entry.scalar_or(paths::TYPE_CODE, MISSING)?;
        let reference = entry.scalar_or(paths::REFERENCE_TEXT, MISSING)?;

        if type_code == config.drawing_code {
            refs.drawing = reference;
        } else if type_code == config.project_code {
            refs.project = reference;
        } else if type_code == config.delivery_note_code {
            refs.delivery_note = reference;
        } else {
            trace!("skipping unrecognized extra-data type code {type_code:?}");
        }
    }

    Ok(refs)
}

/// Build one [`LineItem`] per repeating line group, in document order.
/// An absent goods section is the empty-document case and yields no items.
///
/// A line whose description equals the stamp-duty marker is a pass-through
/// administrative charge: its article code, unit, and all three references
/// are forced back to the sentinel even when attachment data is present.
pub fn extract_line_items(
    root: &Element,
    config: &ExtractionConfig,
) -> Result<Vec<LineItem>, DocumentError> {
    let Some(section) = root.at(paths::GOODS_SECTION)? else {
        return Ok(Vec::new());
    };

    let mut items = Vec::new();
    for line in section.children_named(paths::LINE_GROUP) {
        let mut item = LineItem {
            line_number: line.scalar_or(paths::LINE_NUMBER, MISSING)?,
            article_code: line.scalar_or(paths::ARTICLE_CODE, MISSING)?,
            description: line.scalar_or(paths::DESCRIPTION, MISSING)?,
            quantity: line.scalar_or(paths::QUANTITY, ZERO)?,
            unit_of_measure: line.scalar_or(paths::UNIT_OF_MEASURE, MISSING)?,
            unit_price: line.scalar_or(paths::UNIT_PRICE, ZERO)?,
            line_total: line.scalar_or(paths::LINE_TOTAL, ZERO)?,
            vat_rate: line.scalar_or(paths::VAT_RATE, ZERO)?,
            references: classify_attachments(line, config)?,
        };

        if item.description == config.stamp_duty_marker {
            item.article_code = MISSING.to_string();
            item.unit_of_measure = MISSING.to_string();
            item.references = TypedReferences::default();
        }

        items.push(item);
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parse_document;
    use pretty_assertions::assert_eq;

    fn line(inner: &str) -> Element {
        parse_document(&format!("<DettaglioLinee>{inner}</DettaglioLinee>")).unwrap()
    }

    fn body(lines: &str) -> Element {
        parse_document(&format!(
            "<FatturaElettronica><FatturaElettronicaBody><DatiBeniServizi>{lines}</DatiBeniServizi></FatturaElettronicaBody></FatturaElettronica>"
        ))
        .unwrap()
    }

    fn config() -> ExtractionConfig {
        ExtractionConfig::default()
    }

    #[test]
    fn test_classify_all_three_codes() {
        let line = line(
            "<AltriDatiGestionali><TipoDato>DISEGNO</TipoDato><RiferimentoTesto>D-100</RiferimentoTesto></AltriDatiGestionali>\
             <AltriDatiGestionali><TipoDato>COMMESSA</TipoDato><RiferimentoTesto>C-7</RiferimentoTesto></AltriDatiGestionali>\
             <AltriDatiGestionali><TipoDato>N01</TipoDato><RiferimentoTesto>DDT-9</RiferimentoTesto></AltriDatiGestionali>",
        );

        let refs = classify_attachments(&line, &config()).unwrap();
        assert_eq!(refs.drawing, "D-100");
        assert_eq!(refs.project, "C-7");
        assert_eq!(refs.delivery_note, "DDT-9");
    }

    #[test]
    fn test_last_entry_wins_for_duplicate_type_code() {
        let line = line(
            "<AltriDatiGestionali><TipoDato>DISEGNO</TipoDato><RiferimentoTesto>FIRST</RiferimentoTesto></AltriDatiGestionali>\
             <AltriDatiGestionali><TipoDato>DISEGNO</TipoDato><RiferimentoTesto>SECOND</RiferimentoTesto></AltriDatiGestionali>",
        );

        let refs = classify_attachments(&line, &config()).unwrap();
        assert_eq!(refs.drawing, "SECOND");
    }

    #[test]
    fn test_unrecognized_codes_are_skipped() {
        let line = line(
            "<AltriDatiGestionali><TipoDato>AswSWP</TipoDato><RiferimentoTesto>ignored</RiferimentoTesto></AltriDatiGestionali>",
        );

        let refs = classify_attachments(&line, &config()).unwrap();
        assert_eq!(refs, TypedReferences::default());
    }

    #[test]
    fn test_absent_group_keeps_defaults() {
        let line = line("<NumeroLinea>1</NumeroLinea>");

        let refs = classify_attachments(&line, &config()).unwrap();
        assert_eq!(refs.drawing, "**");
        assert_eq!(refs.project, "**");
        assert_eq!(refs.delivery_note, "**");
    }

    #[test]
    fn test_extract_full_line() {
        let root = body(
            "<DettaglioLinee>\
                <NumeroLinea>1</NumeroLinea>\
                <CodiceArticolo><CodiceValore>ART-1</CodiceValore></CodiceArticolo>\
                <Descrizione>Widget</Descrizione>\
                <Quantita>2.00</Quantita>\
                <UnitaMisura>NR</UnitaMisura>\
                <PrezzoUnitario>10.00</PrezzoUnitario>\
                <PrezzoTotale>20.00</PrezzoTotale>\
                <AliquotaIVA>22.00</AliquotaIVA>\
                <AltriDatiGestionali><TipoDato>DISEGNO</TipoDato><RiferimentoTesto>D1</RiferimentoTesto></AltriDatiGestionali>\
            </DettaglioLinee>",
        );

        let items = extract_line_items(&root, &config()).unwrap();
        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.line_number, "1");
        assert_eq!(item.article_code, "ART-1");
        assert_eq!(item.description, "Widget");
        assert_eq!(item.quantity, "2.00");
        assert_eq!(item.unit_of_measure, "NR");
        assert_eq!(item.unit_price, "10.00");
        assert_eq!(item.line_total, "20.00");
        assert_eq!(item.vat_rate, "22.00");
        assert_eq!(item.references.drawing, "D1");
    }

    #[test]
    fn test_missing_line_fields_use_defaults() {
        let root = body("<DettaglioLinee><NumeroLinea>1</NumeroLinea></DettaglioLinee>");

        let items = extract_line_items(&root, &config()).unwrap();
        let item = &items[0];
        assert_eq!(item.article_code, "**");
        assert_eq!(item.description, "**");
        assert_eq!(item.quantity, "0");
        assert_eq!(item.unit_of_measure, "**");
        assert_eq!(item.unit_price, "0");
        assert_eq!(item.line_total, "0");
        assert_eq!(item.vat_rate, "0");
    }

    #[test]
    fn test_absent_goods_section_yields_no_items() {
        let root =
            parse_document("<FatturaElettronica><FatturaElettronicaBody/></FatturaElettronica>")
                .unwrap();

        assert!(extract_line_items(&root, &config()).unwrap().is_empty());
    }

    #[test]
    fn test_single_line_with_single_extra_entry() {
        // One line item and one extra-data entry must still behave as
        // one-element lists, not collapse into bare scalars.
        let root = body(
            "<DettaglioLinee>\
                <NumeroLinea>1</NumeroLinea>\
                <AltriDatiGestionali><TipoDato>N01</TipoDato><RiferimentoTesto>DDT-1</RiferimentoTesto></AltriDatiGestionali>\
            </DettaglioLinee>",
        );

        let items = extract_line_items(&root, &config()).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].references.delivery_note, "DDT-1");
    }

    #[test]
    fn test_stamp_duty_line_is_forced_to_sentinels() {
        let root = body(
            "<DettaglioLinee>\
                <NumeroLinea>3</NumeroLinea>\
                <CodiceArticolo><CodiceValore>BOLLO</CodiceValore></CodiceArticolo>\
                <Descrizione>RIMB.SPESE BOLLI        </Descrizione>\
                <Quantita>1.00</Quantita>\
                <UnitaMisura>NR</UnitaMisura>\
                <PrezzoTotale>2.00</PrezzoTotale>\
                <AltriDatiGestionali><TipoDato>DISEGNO</TipoDato><RiferimentoTesto>D-LEAK</RiferimentoTesto></AltriDatiGestionali>\
            </DettaglioLinee>",
        );

        let items = extract_line_items(&root, &config()).unwrap();
        let item = &items[0];
        assert_eq!(item.description, "RIMB.SPESE BOLLI        ");
        assert_eq!(item.article_code, "**");
        assert_eq!(item.unit_of_measure, "**");
        assert_eq!(item.references.drawing, "**");
        assert_eq!(item.references.project, "**");
        assert_eq!(item.references.delivery_note, "**");
        // The charge itself still flows through as a row.
        assert_eq!(item.line_total, "2.00");
    }

    #[test]
    fn test_order_is_preserved() {
        let root = body(
            "<DettaglioLinee><NumeroLinea>1</NumeroLinea></DettaglioLinee>\
             <DettaglioLinee><NumeroLinea>2</NumeroLinea></DettaglioLinee>\
             <DettaglioLinee><NumeroLinea>3</NumeroLinea></DettaglioLinee>",
        );

        let items = extract_line_items(&root, &config()).unwrap();
        let numbers: Vec<_> = items.iter().map(|i| i.line_number.as_str()).collect();
        assert_eq!(numbers, vec!["1", "2", "3"]);
    }
}
