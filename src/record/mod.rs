// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Durable JSON-Lines trace log.
//!
//! - [`schema`] - the versioned persisted record shape
//! - [`RecordWriter`] - append-only writer for `<root>/.agent-trace/traces.jsonl`
//! - [`read_records`] - tolerant reader for consumers of the log

mod reader;
pub mod schema;
mod writer;

pub use reader::{parse_record_line, read_records, RecordLine};
pub use schema::{
    FileInfo, LegacyRecord, PersistedRecord, RecordRange, VcsInfo, LEGACY_SCHEMA_VERSION,
    SCHEMA_VERSION,
};
pub use writer::{trace_file_path, RecordWriter, TRACE_DIR, TRACE_FILE_NAME};
