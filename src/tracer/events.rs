// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Typed event constructors.
//!
//! Each `build_*` function normalizes the model ID, defaults ranges and
//! shapes metadata for one event kind. They are pure; recording happens in
//! [`super::AgentTracer`].

use crate::identity::normalize_model_id;
use crate::types::{Contributor, EventType, LineRange, Metadata, TraceEvent};

/// Options for [`build_file_edit`].
#[derive(Debug, Clone, Default)]
pub struct FileEditOptions {
    pub model: Option<String>,
    /// Tool name (e.g. `Write`, `Edit`).
    pub tool_name: Option<String>,
    pub session_id: Option<String>,
    /// Link to the conversation transcript.
    pub transcript_url: Option<String>,
}

/// Options for [`build_file_create`].
#[derive(Debug, Clone, Default)]
pub struct FileCreateOptions {
    pub model: Option<String>,
    pub tool_name: Option<String>,
    pub session_id: Option<String>,
    /// Number of lines in the created file; 0 records no range.
    pub line_count: u32,
}

/// Options for [`build_file_delete`].
#[derive(Debug, Clone, Default)]
pub struct FileDeleteOptions {
    pub model: Option<String>,
    pub tool_name: Option<String>,
    pub session_id: Option<String>,
}

/// Options for [`build_code_review`].
#[derive(Debug, Clone, Default)]
pub struct CodeReviewOptions {
    pub model: Option<String>,
    pub session_id: Option<String>,
    /// Review kind (e.g. `security`, `style`, `performance`).
    pub review_type: Option<String>,
    pub findings: Vec<String>,
}

/// Options for [`build_code_suggestion`].
#[derive(Debug, Clone, Default)]
pub struct SuggestionOptions {
    pub model: Option<String>,
    pub session_id: Option<String>,
    /// Suggestion kind (e.g. `autocomplete`, `inline`).
    pub suggestion_type: Option<String>,
}

/// Options for [`build_refactor`].
#[derive(Debug, Clone, Default)]
pub struct RefactorOptions {
    pub model: Option<String>,
    pub session_id: Option<String>,
    /// Refactoring kind (e.g. `rename`, `extract`, `inline`).
    pub refactor_type: Option<String>,
}

/// Options for [`build_debug`].
#[derive(Debug, Clone, Default)]
pub struct DebugOptions {
    pub model: Option<String>,
    pub session_id: Option<String>,
    /// Issue kind (e.g. `error`, `warning`, `logic`).
    pub issue_type: Option<String>,
    pub resolved: bool,
}

/// Options for [`build_test_generate`].
#[derive(Debug, Clone, Default)]
pub struct TestGenerateOptions {
    pub model: Option<String>,
    pub session_id: Option<String>,
    pub test_framework: Option<String>,
    pub test_count: Option<u32>,
}

/// Options for [`build_test_run`].
#[derive(Debug, Clone, Default)]
pub struct TestRunOptions {
    pub model: Option<String>,
    pub session_id: Option<String>,
    pub test_file: Option<String>,
    pub passed: u32,
    pub failed: u32,
    pub skipped: u32,
}

/// Options for [`build_command_run`].
#[derive(Debug, Clone, Default)]
pub struct CommandRunOptions {
    pub model: Option<String>,
    pub session_id: Option<String>,
    pub exit_code: Option<i32>,
    pub working_dir: Option<String>,
}

/// Options for [`build_custom`].
#[derive(Debug, Clone, Default)]
pub struct CustomOptions {
    pub file_path: Option<String>,
    pub ranges: Vec<LineRange>,
    pub model: Option<String>,
    pub session_id: Option<String>,
    pub metadata: Metadata,
}

/// `Some` only for non-empty strings.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Base event attributed to an AI contributor.
fn ai_event(kind: EventType, model: &Option<String>, session_id: &Option<String>) -> TraceEvent {
    TraceEvent::new(kind)
        .with_contributor(Contributor::ai(normalize_model_id(model.as_deref())))
        .with_session_id(session_id.clone())
}

pub fn build_file_edit(
    file_path: &str,
    ranges: Vec<LineRange>,
    opts: &FileEditOptions,
) -> TraceEvent {
    let mut metadata = Metadata::new();
    if let Some(url) = present(&opts.transcript_url) {
        metadata.insert("transcript_url".to_string(), url.into());
    }

    ai_event(EventType::FileEdit, &opts.model, &opts.session_id)
        .with_file_path(Some(file_path.to_string()))
        .with_ranges(ranges)
        .with_tool_name(opts.tool_name.clone())
        .with_metadata(metadata)
}

pub fn build_file_create(file_path: &str, opts: &FileCreateOptions) -> TraceEvent {
    let ranges = if opts.line_count > 0 {
        vec![LineRange::new(1, opts.line_count.max(1))]
    } else {
        Vec::new()
    };

    ai_event(EventType::FileCreate, &opts.model, &opts.session_id)
        .with_file_path(Some(file_path.to_string()))
        .with_ranges(ranges)
        .with_tool_name(opts.tool_name.clone())
}

pub fn build_file_delete(file_path: &str, opts: &FileDeleteOptions) -> TraceEvent {
    ai_event(EventType::FileDelete, &opts.model, &opts.session_id)
        .with_file_path(Some(file_path.to_string()))
        .with_tool_name(opts.tool_name.clone())
}

pub fn build_session_start(
    session_id: &str,
    model: Option<&str>,
    metadata: Metadata,
) -> TraceEvent {
    session_event(EventType::SessionStart, session_id, model, metadata)
}

pub fn build_session_end(
    session_id: &str,
    model: Option<&str>,
    metadata: Metadata,
) -> TraceEvent {
    session_event(EventType::SessionEnd, session_id, model, metadata)
}

fn session_event(
    kind: EventType,
    session_id: &str,
    model: Option<&str>,
    metadata: Metadata,
) -> TraceEvent {
    TraceEvent::new(kind)
        .with_contributor(Contributor::ai(normalize_model_id(model)))
        .with_session_id(Some(session_id.to_string()))
        .with_metadata(metadata)
}

pub fn build_code_review(
    file_path: &str,
    ranges: Vec<LineRange>,
    opts: &CodeReviewOptions,
) -> TraceEvent {
    let mut metadata = Metadata::new();
    if let Some(review_type) = present(&opts.review_type) {
        metadata.insert("review_type".to_string(), review_type.into());
    }
    if !opts.findings.is_empty() {
        metadata.insert("finding_count".to_string(), opts.findings.len().into());
    }

    ai_event(EventType::CodeReview, &opts.model, &opts.session_id)
        .with_file_path(Some(file_path.to_string()))
        .with_ranges(ranges)
        .with_metadata(metadata)
}

pub fn build_code_suggestion(
    file_path: &str,
    ranges: Vec<LineRange>,
    opts: &SuggestionOptions,
) -> TraceEvent {
    let mut metadata = Metadata::new();
    if let Some(suggestion_type) = present(&opts.suggestion_type) {
        metadata.insert("suggestion_type".to_string(), suggestion_type.into());
    }

    ai_event(EventType::CodeSuggest, &opts.model, &opts.session_id)
        .with_file_path(Some(file_path.to_string()))
        .with_ranges(ranges)
        .with_metadata(metadata)
}

pub fn build_refactor(
    file_path: &str,
    ranges: Vec<LineRange>,
    opts: &RefactorOptions,
) -> TraceEvent {
    let mut metadata = Metadata::new();
    if let Some(refactor_type) = present(&opts.refactor_type) {
        metadata.insert("refactor_type".to_string(), refactor_type.into());
    }

    ai_event(EventType::Refactor, &opts.model, &opts.session_id)
        .with_file_path(Some(file_path.to_string()))
        .with_ranges(ranges)
        .with_metadata(metadata)
}

pub fn build_debug(file_path: &str, ranges: Vec<LineRange>, opts: &DebugOptions) -> TraceEvent {
    let mut metadata = Metadata::new();
    metadata.insert("resolved".to_string(), opts.resolved.into());
    if let Some(issue_type) = present(&opts.issue_type) {
        metadata.insert("issue_type".to_string(), issue_type.into());
    }

    ai_event(EventType::Debug, &opts.model, &opts.session_id)
        .with_file_path(Some(file_path.to_string()))
        .with_ranges(ranges)
        .with_metadata(metadata)
}

pub fn build_test_generate(
    file_path: &str,
    ranges: Vec<LineRange>,
    opts: &TestGenerateOptions,
) -> TraceEvent {
    let mut metadata = Metadata::new();
    if let Some(framework) = present(&opts.test_framework) {
        metadata.insert("test_framework".to_string(), framework.into());
    }
    if let Some(count) = opts.test_count {
        metadata.insert("test_count".to_string(), count.into());
    }

    ai_event(EventType::TestGenerate, &opts.model, &opts.session_id)
        .with_file_path(Some(file_path.to_string()))
        .with_ranges(ranges)
        .with_metadata(metadata)
}

pub fn build_test_run(opts: &TestRunOptions) -> TraceEvent {
    let total = i64::from(opts.passed) + i64::from(opts.failed) + i64::from(opts.skipped);

    let mut metadata = Metadata::new();
    metadata.insert("passed".to_string(), opts.passed.into());
    metadata.insert("failed".to_string(), opts.failed.into());
    metadata.insert("skipped".to_string(), opts.skipped.into());
    metadata.insert("total".to_string(), total.into());

    ai_event(EventType::TestRun, &opts.model, &opts.session_id)
        .with_file_path(present(&opts.test_file).map(str::to_string))
        .with_metadata(metadata)
}

pub fn build_command_run(command: &str, opts: &CommandRunOptions) -> TraceEvent {
    let mut metadata = Metadata::new();
    metadata.insert("command".to_string(), command.into());
    if let Some(exit_code) = opts.exit_code {
        metadata.insert("exit_code".to_string(), exit_code.into());
    }
    if let Some(dir) = present(&opts.working_dir) {
        metadata.insert("working_dir".to_string(), dir.into());
    }

    ai_event(EventType::CommandRun, &opts.model, &opts.session_id).with_metadata(metadata)
}

/// Custom event. `custom_event_name` is set first; caller metadata may override it.
pub fn build_custom(event_name: &str, opts: CustomOptions) -> TraceEvent {
    let mut metadata = Metadata::new();
    metadata.insert("custom_event_name".to_string(), event_name.into());
    metadata.extend(opts.metadata);

    ai_event(EventType::Custom, &opts.model, &opts.session_id)
        .with_file_path(opts.file_path)
        .with_ranges(opts.ranges)
        .with_metadata(metadata)
}
