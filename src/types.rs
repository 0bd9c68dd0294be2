// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Core type definitions for attribution tracing.
//!
//! These types are the canonical, sink-agnostic representation of a traced
//! action. A [`TraceEvent`] is built immediately before recording and is never
//! mutated afterwards; only its serialized form (see [`crate::record`]) or its
//! span attributes (see [`crate::telemetry`]) outlive the recording call.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TraceError;

/// Maximum length of a contributor model ID, in characters.
pub const MAX_MODEL_ID_LEN: usize = 250;

// ============================================================================
// Contributor
// ============================================================================

/// Type of code contributor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContributorType {
    Human,
    #[default]
    Ai,
    Mixed,
    Unknown,
}

impl ContributorType {
    /// Wire representation (`"human"`, `"ai"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            ContributorType::Human => "human",
            ContributorType::Ai => "ai",
            ContributorType::Mixed => "mixed",
            ContributorType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ContributorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The actor an event is attributed to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    /// Contributor kind (defaults to `ai`).
    #[serde(rename = "type", default)]
    pub kind: ContributorType,

    /// Model ID following the `provider/model` convention
    /// (e.g. `anthropic/claude-opus-4-5-20251101`).
    #[serde(default)]
    pub model_id: Option<String>,
}

impl Contributor {
    /// An AI contributor with an optional model ID.
    pub fn ai(model_id: Option<String>) -> Self {
        Self {
            kind: ContributorType::Ai,
            model_id,
        }
    }

    /// A human contributor.
    pub fn human() -> Self {
        Self {
            kind: ContributorType::Human,
            model_id: None,
        }
    }

    /// Set the contributor kind.
    pub fn with_kind(mut self, kind: ContributorType) -> Self {
        self.kind = kind;
        self
    }
}

// ============================================================================
// Line ranges
// ============================================================================

/// An inclusive, 1-indexed span of lines in a file.
///
/// Both bounds must be at least 1. Reversed ranges (`end_line < start_line`)
/// are accepted and recorded as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    pub start_line: u32,
    pub end_line: u32,

    /// Caller-supplied fingerprint for position-independent tracking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<String>,
}

impl LineRange {
    pub fn new(start_line: u32, end_line: u32) -> Self {
        Self {
            start_line,
            end_line,
            content_hash: None,
        }
    }

    /// A single-line range.
    pub fn line(line: u32) -> Self {
        Self::new(line, line)
    }

    /// Attach a content hash.
    pub fn with_content_hash(mut self, hash: impl Into<String>) -> Self {
        self.content_hash = Some(hash.into());
        self
    }

    pub fn is_valid(&self) -> bool {
        self.start_line >= 1 && self.end_line >= 1
    }
}

// ============================================================================
// Event types
// ============================================================================

/// Known kinds of traced events.
///
/// [`TraceEvent::event_type`] is a free-form string; these are the values the
/// built-in constructors use. Unrecognized hook event names pass through verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    // File operations
    FileCreate,
    FileEdit,
    FileDelete,

    // Session lifecycle
    SessionStart,
    SessionEnd,

    // Code assistance
    CodeReview,
    CodeSuggest,
    Refactor,
    Debug,

    // Testing
    TestGenerate,
    TestRun,

    // Terminal/commands
    CommandRun,

    Custom,
}

impl EventType {
    /// Every known event type, in declaration order.
    pub const ALL: [EventType; 13] = [
        EventType::FileCreate,
        EventType::FileEdit,
        EventType::FileDelete,
        EventType::SessionStart,
        EventType::SessionEnd,
        EventType::CodeReview,
        EventType::CodeSuggest,
        EventType::Refactor,
        EventType::Debug,
        EventType::TestGenerate,
        EventType::TestRun,
        EventType::CommandRun,
        EventType::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::FileCreate => "file_create",
            EventType::FileEdit => "file_edit",
            EventType::FileDelete => "file_delete",
            EventType::SessionStart => "session_start",
            EventType::SessionEnd => "session_end",
            EventType::CodeReview => "code_review",
            EventType::CodeSuggest => "code_suggest",
            EventType::Refactor => "refactor",
            EventType::Debug => "debug",
            EventType::TestGenerate => "test_generate",
            EventType::TestRun => "test_run",
            EventType::CommandRun => "command_run",
            EventType::Custom => "custom",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventType::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown event type: {s}"))
    }
}

impl From<EventType> for String {
    fn from(kind: EventType) -> Self {
        kind.as_str().to_string()
    }
}

// ============================================================================
// Metadata
// ============================================================================

/// A scalar metadata value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl MetadataValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetadataValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            MetadataValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            MetadataValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::Bool(b) => write!(f, "{b}"),
            MetadataValue::Int(n) => write!(f, "{n}"),
            MetadataValue::Float(x) => write!(f, "{x}"),
            MetadataValue::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        MetadataValue::String(value.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        MetadataValue::String(value)
    }
}

impl From<bool> for MetadataValue {
    fn from(value: bool) -> Self {
        MetadataValue::Bool(value)
    }
}

impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        MetadataValue::Int(value)
    }
}

impl From<i32> for MetadataValue {
    fn from(value: i32) -> Self {
        MetadataValue::Int(value.into())
    }
}

impl From<u32> for MetadataValue {
    fn from(value: u32) -> Self {
        MetadataValue::Int(value.into())
    }
}

impl From<usize> for MetadataValue {
    fn from(value: usize) -> Self {
        MetadataValue::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f64> for MetadataValue {
    fn from(value: f64) -> Self {
        MetadataValue::Float(value)
    }
}

/// Event metadata, keyed and ordered by name.
pub type Metadata = BTreeMap<String, MetadataValue>;

// ============================================================================
// Trace event
// ============================================================================

/// A canonical event to be traced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEvent {
    /// Event kind (e.g. `file_edit`), or a verbatim hook event name.
    pub event_type: String,

    /// File path as supplied by the caller; made root-relative by the sinks.
    #[serde(default)]
    pub file_path: Option<String>,

    /// Line ranges affected.
    #[serde(default)]
    pub ranges: Vec<LineRange>,

    #[serde(default)]
    pub contributor: Contributor,

    /// Tool that made the change (e.g. `Write`, `Edit`).
    #[serde(default)]
    pub tool_name: Option<String>,

    /// Coding session ID.
    #[serde(default)]
    pub session_id: Option<String>,

    #[serde(default)]
    pub metadata: Metadata,
}

impl TraceEvent {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            file_path: None,
            ranges: Vec::new(),
            contributor: Contributor::default(),
            tool_name: None,
            session_id: None,
            metadata: Metadata::new(),
        }
    }

    pub fn with_file_path(mut self, path: Option<String>) -> Self {
        self.file_path = path;
        self
    }

    pub fn with_ranges(mut self, ranges: Vec<LineRange>) -> Self {
        self.ranges = ranges;
        self
    }

    pub fn with_contributor(mut self, contributor: Contributor) -> Self {
        self.contributor = contributor;
        self
    }

    pub fn with_tool_name(mut self, tool_name: Option<String>) -> Self {
        self.tool_name = tool_name;
        self
    }

    pub fn with_session_id(mut self, session_id: Option<String>) -> Self {
        self.session_id = session_id;
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Check the structural invariants of the event.
    ///
    /// Every range bound must be at least 1 and the model ID must not exceed
    /// [`MAX_MODEL_ID_LEN`] characters.
    pub fn validate(&self) -> Result<(), TraceError> {
        if let Some(range) = self.ranges.iter().find(|r| !r.is_valid()) {
            return Err(TraceError::InvalidEvent(format!(
                "line range bounds must be >= 1, got [{}, {}]",
                range.start_line, range.end_line
            )));
        }

        if let Some(model_id) = &self.contributor.model_id {
            let len = model_id.chars().count();
            if len > MAX_MODEL_ID_LEN {
                return Err(TraceError::InvalidEvent(format!(
                    "model_id is {len} characters, maximum is {MAX_MODEL_ID_LEN}"
                )));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Hook input
// ============================================================================

/// A scalar value inside a hook's free-form `tool_input` map.
///
/// Booleans are coerced to integers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged, from = "RawToolInputValue")]
pub enum ToolInputValue {
    Int(i64),
    String(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawToolInputValue {
    Int(i64),
    Bool(bool),
    String(String),
}

impl From<RawToolInputValue> for ToolInputValue {
    fn from(raw: RawToolInputValue) -> Self {
        match raw {
            RawToolInputValue::Int(n) => ToolInputValue::Int(n),
            RawToolInputValue::Bool(b) => ToolInputValue::Int(i64::from(b)),
            RawToolInputValue::String(s) => ToolInputValue::String(s),
        }
    }
}

impl fmt::Display for ToolInputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolInputValue::Int(n) => write!(f, "{n}"),
            ToolInputValue::String(s) => f.write_str(s),
        }
    }
}

/// Raw payload delivered by an editor/agent hook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookInput {
    pub hook_event_name: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub transcript_path: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub tool_name: Option<String>,
    #[serde(default)]
    pub tool_use_id: Option<String>,
    #[serde(default)]
    pub tool_input: Option<HashMap<String, Option<ToolInputValue>>>,
    #[serde(default)]
    pub cwd: Option<String>,
}

impl HookInput {
    pub fn new(hook_event_name: impl Into<String>) -> Self {
        Self {
            hook_event_name: hook_event_name.into(),
            ..Default::default()
        }
    }

    /// Look up a non-null `tool_input` entry.
    pub fn tool_input_value(&self, key: &str) -> Option<&ToolInputValue> {
        self.tool_input
            .as_ref()
            .and_then(|input| input.get(key))
            .and_then(|value| value.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contributor_default_is_ai() {
        let contributor = Contributor::default();
        assert_eq!(contributor.kind, ContributorType::Ai);
        assert!(contributor.model_id.is_none());
    }

    #[test]
    fn test_contributor_serializes_type_field() {
        let contributor = Contributor::human();
        let json = serde_json::to_value(&contributor).unwrap();
        assert_eq!(json["type"], "human");
        assert!(json["model_id"].is_null());
    }

    #[test]
    fn test_event_type_values() {
        assert_eq!(EventType::FileCreate.as_str(), "file_create");
        assert_eq!(EventType::FileEdit.as_str(), "file_edit");
        assert_eq!(EventType::FileDelete.as_str(), "file_delete");
        assert_eq!(EventType::SessionStart.as_str(), "session_start");
        assert_eq!(EventType::SessionEnd.as_str(), "session_end");
        assert_eq!(EventType::CodeReview.as_str(), "code_review");
        assert_eq!(EventType::CodeSuggest.as_str(), "code_suggest");
        assert_eq!(EventType::Refactor.as_str(), "refactor");
        assert_eq!(EventType::Debug.as_str(), "debug");
        assert_eq!(EventType::TestGenerate.as_str(), "test_generate");
        assert_eq!(EventType::TestRun.as_str(), "test_run");
        assert_eq!(EventType::CommandRun.as_str(), "command_run");
        assert_eq!(EventType::Custom.as_str(), "custom");
    }

    #[test]
    fn test_event_type_from_str() {
        for kind in EventType::ALL {
            assert_eq!(kind.as_str().parse::<EventType>().unwrap(), kind);
        }
        assert!("PostToolUse".parse::<EventType>().is_err());
    }

    #[test]
    fn test_event_type_serde_matches_as_str() {
        let json = serde_json::to_string(&EventType::CodeSuggest).unwrap();
        assert_eq!(json, "\"code_suggest\"");
    }

    #[test]
    fn test_metadata_value_untagged() {
        let mut metadata = Metadata::new();
        metadata.insert("passed".to_string(), 10.into());
        metadata.insert("resolved".to_string(), true.into());
        metadata.insert("ratio".to_string(), 0.5.into());
        metadata.insert("command".to_string(), "cargo test".into());

        let json = serde_json::to_string(&metadata).unwrap();
        assert_eq!(
            json,
            r#"{"command":"cargo test","passed":10,"ratio":0.5,"resolved":true}"#
        );

        let parsed: Metadata = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, metadata);
    }

    #[test]
    fn test_line_range_validity() {
        assert!(LineRange::new(1, 10).is_valid());
        assert!(LineRange::new(10, 1).is_valid());
        assert!(!LineRange::new(0, 10).is_valid());
        assert!(!LineRange::new(1, 0).is_valid());
    }

    #[test]
    fn test_line_range_omits_missing_hash() {
        let json = serde_json::to_value(LineRange::new(1, 2)).unwrap();
        assert!(json.get("content_hash").is_none());

        let json = serde_json::to_value(LineRange::line(3).with_content_hash("abc")).unwrap();
        assert_eq!(json["content_hash"], "abc");
    }

    #[test]
    fn test_trace_event_validate() {
        let event = TraceEvent::new(EventType::FileEdit).with_ranges(vec![LineRange::new(1, 5)]);
        assert!(event.validate().is_ok());

        let event = TraceEvent::new(EventType::FileEdit).with_ranges(vec![LineRange::new(0, 5)]);
        assert!(matches!(event.validate(), Err(TraceError::InvalidEvent(_))));

        let long_model = "m".repeat(MAX_MODEL_ID_LEN + 1);
        let event = TraceEvent::new("custom").with_contributor(Contributor::ai(Some(long_model)));
        assert!(event.validate().is_err());

        let max_model = "m".repeat(MAX_MODEL_ID_LEN);
        let event = TraceEvent::new("custom").with_contributor(Contributor::ai(Some(max_model)));
        assert!(event.validate().is_ok());
    }

    #[test]
    fn test_hook_input_minimal() {
        let input: HookInput =
            serde_json::from_str(r#"{"hook_event_name": "SessionStart"}"#).unwrap();
        assert_eq!(input.hook_event_name, "SessionStart");
        assert!(input.tool_input.is_none());
    }

    #[test]
    fn test_hook_input_tool_input_values() {
        let input: HookInput = serde_json::from_str(
            r#"{
                "hook_event_name": "PostToolUse",
                "tool_name": "Edit",
                "tool_input": {
                    "file_path": "/repo/src/lib.rs",
                    "limit": 20,
                    "replace_all": false,
                    "old_string": null
                },
                "tool_response": {"success": true}
            }"#,
        )
        .unwrap();

        assert_eq!(
            input.tool_input_value("file_path"),
            Some(&ToolInputValue::String("/repo/src/lib.rs".to_string()))
        );
        assert_eq!(input.tool_input_value("limit"), Some(&ToolInputValue::Int(20)));
        assert_eq!(input.tool_input_value("replace_all"), Some(&ToolInputValue::Int(0)));
        assert_eq!(input.tool_input_value("old_string"), None);
        assert_eq!(input.tool_input_value("missing"), None);
    }

    #[test]
    fn test_hook_input_rejects_nested_tool_input() {
        let result: Result<HookInput, _> = serde_json::from_str(
            r#"{"hook_event_name": "PostToolUse", "tool_input": {"edits": [1, 2]}}"#,
        );
        assert!(result.is_err());
    }
}
