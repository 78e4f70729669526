//! Audit sink implementation: JSON-lines append to a local file.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use fatex_core::{AuditRecord, AuditSink};

/// Appends one JSON object per audit record to a log file.
pub struct JsonLinesAuditSink {
    path: PathBuf,
}

impl JsonLinesAuditSink {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl AuditSink for JsonLinesAuditSink {
    fn record(&mut self, record: &AuditRecord) -> std::io::Result<()> {
        let line = serde_json::to_string(record).map_err(std::io::Error::other)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_are_appended_as_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        let mut sink = JsonLinesAuditSink::new(&path);

        sink.record(&AuditRecord::success("a.xml", "grouping=off", "2 rows".to_string()))
            .unwrap();
        sink.record(&AuditRecord::failure("b.xml", "grouping=on", "boom".to_string()))
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"success\""));
        assert!(lines[1].contains("\"failure\""));
    }
}
