// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! The tracer façade.
//!
//! [`AgentTracer`] builds canonical events and hands each one to both sinks:
//! the JSONL [`RecordWriter`] (when file export is enabled) and the
//! [`SpanEmitter`]. The sinks are independent: a failed write never stops the
//! span from being emitted.
//!
//! # Example
//!
//! ```rust,ignore
//! use agent_trace::tracer::{AgentTracer, FileEditOptions};
//! use agent_trace::config::TraceConfig;
//! use agent_trace::types::LineRange;
//!
//! let tracer = AgentTracer::new(TraceConfig::default());
//! tracer.trace_file_edit(
//!     "/repo/src/main.rs",
//!     vec![LineRange::new(1, 10)],
//!     FileEditOptions {
//!         model: Some("claude-sonnet-4-20250514".to_string()),
//!         ..Default::default()
//!     },
//! )?;
//! ```

mod events;
mod global;

pub use events::{
    build_code_review, build_code_suggestion, build_command_run, build_custom, build_debug,
    build_file_create, build_file_delete, build_file_edit, build_refactor, build_session_end,
    build_session_start, build_test_generate, build_test_run, CodeReviewOptions,
    CommandRunOptions, CustomOptions, DebugOptions, FileCreateOptions, FileDeleteOptions,
    FileEditOptions, RefactorOptions, SuggestionOptions, TestGenerateOptions, TestRunOptions,
};
pub use global::{get_tracer, init_tracer, install_tracer, try_tracer};

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::config::TraceConfig;
use crate::error::TraceError;
use crate::record::RecordWriter;
use crate::telemetry::{SpanContext, SpanEmitter, TracingSpanEmitter};
use crate::types::{LineRange, Metadata, TraceEvent};
use crate::workspace::{to_relative_path, GitVcs, Vcs};

/// Records trace events to the JSONL log and the span backend.
///
/// The workspace root is resolved once, at construction. The VCS revision
/// is looked up again for every event.
pub struct AgentTracer {
    config: TraceConfig,
    workspace_root: PathBuf,
    vcs: Arc<dyn Vcs>,
    emitter: Arc<dyn SpanEmitter>,
    writer: Option<RecordWriter>,
}

impl fmt::Debug for AgentTracer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentTracer")
            .field("config", &self.config)
            .field("workspace_root", &self.workspace_root)
            .field("file_export", &self.writer.is_some())
            .finish()
    }
}

impl AgentTracer {
    /// Create a tracer backed by `git` and the `tracing` span emitter.
    pub fn new(config: TraceConfig) -> Self {
        let emitter = Arc::new(TracingSpanEmitter::new());
        Self::with_parts(config, Arc::new(GitVcs::new()), emitter)
    }

    /// Create a tracer from explicit collaborators.
    pub fn with_parts(
        config: TraceConfig,
        vcs: Arc<dyn Vcs>,
        emitter: Arc<dyn SpanEmitter>,
    ) -> Self {
        let workspace_root = vcs.resolve_root();
        let writer = config
            .file_export
            .then(|| RecordWriter::new(workspace_root.clone()));

        debug!(
            root = %workspace_root.display(),
            file_export = config.file_export,
            console_export = config.console_export,
            "Tracer initialized"
        );

        Self {
            config,
            workspace_root,
            vcs,
            emitter,
            writer,
        }
    }

    pub fn config(&self) -> &TraceConfig {
        &self.config
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// Path of the JSONL log, if file export is enabled.
    pub fn trace_file_path(&self) -> Option<&Path> {
        self.writer.as_ref().map(RecordWriter::path)
    }

    /// Record an event to both sinks.
    ///
    /// Invalid events are rejected before either sink runs. A file write
    /// failure is returned after the span has been emitted.
    #[instrument(skip_all, fields(event_type = %event.event_type))]
    pub fn trace_event(&self, event: TraceEvent) -> Result<(), TraceError> {
        event.validate()?;

        let revision = self.vcs.resolve_revision();

        let written = match &self.writer {
            Some(writer) => writer
                .append(&event, self.vcs.kind(), revision.clone())
                .map(|_| ()),
            None => Ok(()),
        };
        if let Err(e) = &written {
            warn!(error = %e, "Failed to write trace record");
        }

        let relative_path = event
            .file_path
            .as_deref()
            .filter(|path| !path.is_empty())
            .map(|path| to_relative_path(path, &self.workspace_root));
        let ctx = SpanContext {
            relative_path: relative_path.as_deref(),
            revision: revision.as_deref(),
        };
        self.emitter.emit(&event, &ctx);

        written.map_err(TraceError::from)
    }

    /// Trace a file edit.
    pub fn trace_file_edit(
        &self,
        file_path: &str,
        ranges: Vec<LineRange>,
        opts: FileEditOptions,
    ) -> Result<(), TraceError> {
        self.trace_event(build_file_edit(file_path, ranges, &opts))
    }

    /// Trace a file creation. A non-zero `line_count` records `[1, line_count]`.
    pub fn trace_file_create(
        &self,
        file_path: &str,
        opts: FileCreateOptions,
    ) -> Result<(), TraceError> {
        self.trace_event(build_file_create(file_path, &opts))
    }

    /// Trace a file deletion.
    pub fn trace_file_delete(
        &self,
        file_path: &str,
        opts: FileDeleteOptions,
    ) -> Result<(), TraceError> {
        self.trace_event(build_file_delete(file_path, &opts))
    }

    /// Trace the start of a coding session.
    pub fn trace_session_start(
        &self,
        session_id: &str,
        model: Option<&str>,
        metadata: Metadata,
    ) -> Result<(), TraceError> {
        self.trace_event(build_session_start(session_id, model, metadata))
    }

    /// Trace the end of a coding session.
    pub fn trace_session_end(
        &self,
        session_id: &str,
        model: Option<&str>,
        metadata: Metadata,
    ) -> Result<(), TraceError> {
        self.trace_event(build_session_end(session_id, model, metadata))
    }

    pub fn trace_code_review(
        &self,
        file_path: &str,
        ranges: Vec<LineRange>,
        opts: CodeReviewOptions,
    ) -> Result<(), TraceError> {
        self.trace_event(build_code_review(file_path, ranges, &opts))
    }

    /// Trace a code suggestion (autocomplete, inline suggestion).
    pub fn trace_code_suggestion(
        &self,
        file_path: &str,
        ranges: Vec<LineRange>,
        opts: SuggestionOptions,
    ) -> Result<(), TraceError> {
        self.trace_event(build_code_suggestion(file_path, ranges, &opts))
    }

    pub fn trace_refactor(
        &self,
        file_path: &str,
        ranges: Vec<LineRange>,
        opts: RefactorOptions,
    ) -> Result<(), TraceError> {
        self.trace_event(build_refactor(file_path, ranges, &opts))
    }

    pub fn trace_debug(
        &self,
        file_path: &str,
        ranges: Vec<LineRange>,
        opts: DebugOptions,
    ) -> Result<(), TraceError> {
        self.trace_event(build_debug(file_path, ranges, &opts))
    }

    pub fn trace_test_generate(
        &self,
        file_path: &str,
        ranges: Vec<LineRange>,
        opts: TestGenerateOptions,
    ) -> Result<(), TraceError> {
        self.trace_event(build_test_generate(file_path, ranges, &opts))
    }

    /// Trace a test run. Metadata always carries `passed`, `failed`, `skipped` and `total`.
    pub fn trace_test_run(&self, opts: TestRunOptions) -> Result<(), TraceError> {
        self.trace_event(build_test_run(&opts))
    }

    /// Trace a terminal command execution.
    pub fn trace_command_run(
        &self,
        command: &str,
        opts: CommandRunOptions,
    ) -> Result<(), TraceError> {
        self.trace_event(build_command_run(command, &opts))
    }

    pub fn trace_custom(&self, event_name: &str, opts: CustomOptions) -> Result<(), TraceError> {
        self.trace_event(build_custom(event_name, opts))
    }
}
