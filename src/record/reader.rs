// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Tolerant line-by-line reader for trace logs.
//!
//! The log may be appended to while it is read, so the final line can be
//! partial. Blank and un-parseable lines are skipped rather than failing
//! the whole read.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::error::RecordError;

use super::schema::{LegacyRecord, PersistedRecord, LEGACY_SCHEMA_VERSION, SCHEMA_VERSION};

/// One decoded line of a trace log.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordLine {
    /// Current schema.
    Current(PersistedRecord),
    /// Flat 1.0 schema.
    Legacy(LegacyRecord),
    /// Valid JSON object with an unrecognized (or unparseable) shape.
    Unknown(serde_json::Value),
}

impl RecordLine {
    /// Schema version carried by the line, if any.
    pub fn version(&self) -> Option<&str> {
        match self {
            RecordLine::Current(record) => Some(&record.version),
            RecordLine::Legacy(record) => Some(&record.version),
            RecordLine::Unknown(value) => value.get("version").and_then(|v| v.as_str()),
        }
    }

    pub fn event_type(&self) -> Option<&str> {
        match self {
            RecordLine::Current(record) => Some(&record.event_type),
            RecordLine::Legacy(record) => Some(&record.event_type),
            RecordLine::Unknown(value) => value.get("event_type").and_then(|v| v.as_str()),
        }
    }
}

/// Decode a single log line. Returns `None` for blank or malformed lines.
pub fn parse_record_line(line: &str) -> Option<RecordLine> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let value: serde_json::Value = serde_json::from_str(line).ok()?;
    if !value.is_object() {
        return None;
    }

    let version = value.get("version").and_then(|v| v.as_str()).map(str::to_string);
    let decoded = match version.as_deref() {
        Some(SCHEMA_VERSION) => serde_json::from_value(value.clone()).map(RecordLine::Current),
        Some(LEGACY_SCHEMA_VERSION) => {
            serde_json::from_value(value.clone()).map(RecordLine::Legacy)
        }
        _ => return Some(RecordLine::Unknown(value)),
    };

    Some(decoded.unwrap_or(RecordLine::Unknown(value)))
}

/// Read every decodable record from a trace log.
///
/// A missing file yields an empty list.
pub fn read_records(path: &Path) -> Result<Vec<RecordLine>, RecordError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for line in BufReader::new(file).lines() {
        let line = line?;
        match parse_record_line(&line) {
            Some(record) => records.push(record),
            None if line.trim().is_empty() => {}
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!(skipped, path = %path.display(), "Skipped malformed trace lines");
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CURRENT: &str = r#"{"version":"1.1","id":"8c1c4b5e-6d8f-4e33-9a63-0a4b9d2b7f10","event_type":"file_edit","timestamp":"2026-01-02T03:04:05.123456Z","session_id":"s1","vcs":{"type":"git","revision":"abc"},"contributor":{"type":"ai","model_id":"anthropic/claude-sonnet-4"},"file":{"path":"src/a.rs","ranges":[{"start_line":1,"end_line":2}]},"tool_name":"Edit","metadata":{}}"#;
    const LEGACY: &str = r#"{"version":"1.0","id":"1","timestamp":"2025-01-01T00:00:00+00:00","event_type":"PostToolUse","file_path":"a.py","ranges":[],"contributor":{"type":"human"}}"#;

    #[test]
    fn test_parse_current() {
        let record = parse_record_line(CURRENT).unwrap();
        match &record {
            RecordLine::Current(r) => {
                assert_eq!(r.file.as_ref().unwrap().path, "src/a.rs");
                assert_eq!(r.vcs.revision.as_deref(), Some("abc"));
            }
            other => panic!("Expected current record, got {:?}", other),
        }
        assert_eq!(record.version(), Some("1.1"));
        assert_eq!(record.event_type(), Some("file_edit"));
    }

    #[test]
    fn test_parse_legacy() {
        let record = parse_record_line(LEGACY).unwrap();
        assert!(matches!(record, RecordLine::Legacy(_)));
        assert_eq!(record.event_type(), Some("PostToolUse"));
    }

    #[test]
    fn test_parse_unknown_version() {
        let record = parse_record_line(r#"{"version":"9.0","event_type":"x"}"#).unwrap();
        assert!(matches!(record, RecordLine::Unknown(_)));
        assert_eq!(record.version(), Some("9.0"));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_record_line("").is_none());
        assert!(parse_record_line("   ").is_none());
        assert!(parse_record_line("[1,2,3]").is_none());
        assert!(parse_record_line(r#"{"version":"1.1","id":"#).is_none());
    }

    #[test]
    fn test_read_mixed_versions_and_partial_tail() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("traces.jsonl");
        let content = format!("{LEGACY}\n{CURRENT}\n\n{{\"version\":\"1.1\",\"id\":\"trunc");
        std::fs::write(&path, content).unwrap();

        let records = read_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert!(matches!(records[0], RecordLine::Legacy(_)));
        assert!(matches!(records[1], RecordLine::Current(_)));
    }

    #[test]
    fn test_read_missing_file() {
        let temp = TempDir::new().unwrap();
        let records = read_records(&temp.path().join("missing.jsonl")).unwrap();
        assert!(records.is_empty());
    }
}
