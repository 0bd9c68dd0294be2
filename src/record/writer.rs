// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Append-only JSONL record writer.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::error::RecordError;
use crate::types::TraceEvent;

use super::schema::PersistedRecord;

/// Trace directory, relative to the workspace root.
pub const TRACE_DIR: &str = ".agent-trace";

/// Trace file name inside [`TRACE_DIR`].
pub const TRACE_FILE_NAME: &str = "traces.jsonl";

/// Path of the trace log for a workspace root.
pub fn trace_file_path(workspace_root: &Path) -> PathBuf {
    workspace_root.join(TRACE_DIR).join(TRACE_FILE_NAME)
}

/// Writes persisted records to `<root>/.agent-trace/traces.jsonl`.
///
/// Every call opens the file in append mode, writes one complete line and
/// closes it again. No handle is held between calls.
#[derive(Debug, Clone)]
pub struct RecordWriter {
    workspace_root: PathBuf,
    path: PathBuf,
}

impl RecordWriter {
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        let workspace_root = workspace_root.into();
        let path = trace_file_path(&workspace_root);
        Self {
            workspace_root,
            path,
        }
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// Path of the trace log this writer appends to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Build a record from `event` and append it.
    pub fn append(
        &self,
        event: &TraceEvent,
        vcs_kind: &str,
        revision: Option<String>,
    ) -> Result<PersistedRecord, RecordError> {
        let record = PersistedRecord::from_event(event, &self.workspace_root, vcs_kind, revision);
        self.append_record(&record)?;
        Ok(record)
    }

    /// Append an already-built record as one JSON line.
    #[instrument(skip(self, record), fields(path = %self.path.display(), id = %record.id))]
    pub fn append_record(&self, record: &PersistedRecord) -> Result<(), RecordError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| RecordError::CreateDir {
                path: parent.display().to_string(),
                message: e.to_string(),
            })?;
        }

        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        // Single write so concurrent appenders interleave at line granularity
        file.write_all(line.as_bytes())?;
        file.flush()?;

        debug!(bytes = line.len(), event_type = %record.event_type, "Appended trace record");
        Ok(())
    }
}
