// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Persisted record schema.
//!
//! One JSON object per line. The `version` field is bumped on breaking
//! changes, and readers must not assume a single version across a file.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{Contributor, LineRange, Metadata, TraceEvent};
use crate::workspace::to_relative_path;

/// Current record schema version.
pub const SCHEMA_VERSION: &str = "1.1";

/// Flat schema written before the `vcs`/`file` blocks were introduced.
pub const LEGACY_SCHEMA_VERSION: &str = "1.0";

/// VCS provenance block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VcsInfo {
    #[serde(rename = "type")]
    pub kind: String,
    pub revision: Option<String>,
}

/// A line range as persisted (content hashes are not written).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRange {
    pub start_line: u32,
    pub end_line: u32,
}

impl From<&LineRange> for RecordRange {
    fn from(range: &LineRange) -> Self {
        Self {
            start_line: range.start_line,
            end_line: range.end_line,
        }
    }
}

/// File block, present only when the event names a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    /// Path relative to the workspace root (or unchanged if outside it).
    pub path: String,
    /// Always present; empty when the event carries no ranges.
    pub ranges: Vec<RecordRange>,
}

/// A version 1.1 trace record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedRecord {
    pub version: String,
    pub id: Uuid,
    pub event_type: String,
    pub timestamp: DateTime<Utc>,
    pub session_id: Option<String>,
    pub vcs: VcsInfo,
    pub contributor: Contributor,
    pub file: Option<FileInfo>,
    pub tool_name: Option<String>,
    #[serde(default)]
    pub metadata: Metadata,
}

impl PersistedRecord {
    /// Build a record for `event` with a fresh ID and the current UTC time.
    pub fn from_event(
        event: &TraceEvent,
        workspace_root: &Path,
        vcs_kind: &str,
        revision: Option<String>,
    ) -> Self {
        let file = event
            .file_path
            .as_deref()
            .filter(|path| !path.is_empty())
            .map(|path| FileInfo {
                path: to_relative_path(path, workspace_root),
                ranges: event.ranges.iter().map(RecordRange::from).collect(),
            });

        Self {
            version: SCHEMA_VERSION.to_string(),
            id: Uuid::new_v4(),
            event_type: event.event_type.clone(),
            timestamp: Utc::now(),
            session_id: event.session_id.clone(),
            vcs: VcsInfo {
                kind: vcs_kind.to_string(),
                revision,
            },
            contributor: event.contributor.clone(),
            file,
            tool_name: event.tool_name.clone(),
            metadata: event.metadata.clone(),
        }
    }
}

/// A version 1.0 trace record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyRecord {
    pub version: String,
    pub id: String,
    pub timestamp: String,
    pub event_type: String,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub ranges: Vec<RecordRange>,
    #[serde(default)]
    pub contributor: Contributor,
    #[serde(default)]
    pub tool_name: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub git_revision: Option<String>,
    #[serde(default)]
    pub metadata: Metadata,
}
