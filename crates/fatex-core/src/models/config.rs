//! Configuration structures for the flattening pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the fatex pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FatexConfig {
    /// Extraction configuration.
    pub extraction: ExtractionConfig,

    /// Export configuration.
    pub export: ExportConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Extra-data type code resolved into the drawing reference.
    pub drawing_code: String,

    /// Extra-data type code resolved into the project / work-order reference.
    pub project_code: String,

    /// Extra-data type code resolved into the delivery-note reference.
    pub delivery_note_code: String,

    /// Exact line description marking a stamp-duty pass-through charge.
    /// Trailing spaces are significant.
    pub stamp_duty_marker: String,

    /// Transmission format codes accepted without a warning.
    pub accepted_formats: Vec<String>,

    /// Group rows by the reference key instead of emitting line detail.
    pub group_by_reference: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            drawing_code: "DISEGNO".to_string(),
            project_code: "COMMESSA".to_string(),
            delivery_note_code: "N01".to_string(),
            stamp_duty_marker: "RIMB.SPESE BOLLI        ".to_string(),
            accepted_formats: vec!["FPR12".to_string(), "FPA12".to_string()],
            group_by_reference: false,
        }
    }
}

/// Delimited-export configuration handed to exporter collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Field separator for delimited text output.
    pub field_separator: char,

    /// Decimal separator applied when formatting amounts.
    pub decimal_separator: char,

    /// Sheet name for workbook output.
    pub sheet_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            field_separator: ';',
            decimal_separator: ',',
            sheet_name: "fatture".to_string(),
        }
    }
}

impl FatexConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = FatexConfig::default();

        assert_eq!(config.extraction.drawing_code, "DISEGNO");
        assert_eq!(config.extraction.delivery_note_code, "N01");
        assert_eq!(config.export.field_separator, ';');
        assert_eq!(config.export.decimal_separator, ',');
        assert!(!config.extraction.group_by_reference);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: FatexConfig =
            serde_json::from_str(r#"{"extraction": {"group_by_reference": true}}"#).unwrap();

        assert!(config.extraction.group_by_reference);
        assert_eq!(config.extraction.project_code, "COMMESSA");
        assert_eq!(config.export.sheet_name, "fatture");
    }
}
