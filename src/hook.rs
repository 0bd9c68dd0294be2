// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Editor/agent hook adapter.
//!
//! Translates a raw hook payload into a single `file_edit` event. Only
//! file-modifying hooks from the `Write` and `Edit` tools qualify; anything
//! else is skipped without error.

use std::fmt;

use tracing::debug;

use crate::error::HookError;
use crate::tracer::{AgentTracer, FileEditOptions};
use crate::types::{HookInput, LineRange, ToolInputValue};

/// Hook event names that carry file modifications.
pub const TRACED_HOOK_EVENTS: &[&str] = &["PostToolUse", "afterFileEdit", "afterTabFileEdit"];

/// Tools whose invocations are traced.
pub const TRACED_TOOLS: &[&str] = &["Write", "Edit"];

/// Why a hook payload produced no record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    UnsupportedEvent,
    UnsupportedTool,
    MissingFilePath,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            SkipReason::UnsupportedEvent => "hook event is not traced",
            SkipReason::UnsupportedTool => "tool is not traced",
            SkipReason::MissingFilePath => "no file path in payload",
        };
        f.write_str(reason)
    }
}

/// Result of handling one hook payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookOutcome {
    Recorded,
    Skipped(SkipReason),
}

/// A qualifying hook, ready to be traced as a file edit.
#[derive(Debug, Clone)]
pub struct PlannedEdit {
    pub file_path: String,
    pub ranges: Vec<LineRange>,
    pub options: FileEditOptions,
}

impl HookInput {
    /// Parse a hook payload.
    ///
    /// Syntax errors yield [`HookError::InvalidJson`]; well-formed JSON of the
    /// wrong shape yields [`HookError::InvalidPayload`].
    pub fn from_json(input: &str) -> Result<Self, HookError> {
        let value: serde_json::Value =
            serde_json::from_str(input).map_err(|e| HookError::InvalidJson(e.to_string()))?;
        serde_json::from_value(value).map_err(|e| HookError::InvalidPayload(e.to_string()))
    }
}

/// Number of lines a replacement string spans, saturating at `u32::MAX`.
fn line_span(s: &str) -> u32 {
    let newlines = s.matches('\n').count();
    u32::try_from(newlines).unwrap_or(u32::MAX).saturating_add(1)
}

/// Decide whether `input` qualifies and, if so, what to record.
pub fn plan_hook(input: &HookInput) -> Result<PlannedEdit, SkipReason> {
    if !TRACED_HOOK_EVENTS.contains(&input.hook_event_name.as_str()) {
        return Err(SkipReason::UnsupportedEvent);
    }

    let tool_name = input.tool_name.as_deref().unwrap_or("");
    if !TRACED_TOOLS.contains(&tool_name) {
        return Err(SkipReason::UnsupportedTool);
    }

    let file_path = input
        .file_path
        .clone()
        .filter(|path| !path.is_empty())
        .or_else(|| input.tool_input_value("file_path").map(ToString::to_string))
        .filter(|path| !path.is_empty())
        .ok_or(SkipReason::MissingFilePath)?;

    let ranges = match input.tool_input_value("new_string") {
        Some(ToolInputValue::String(s)) if !s.is_empty() => vec![LineRange::new(1, line_span(s))],
        _ => vec![LineRange::line(1)],
    };

    Ok(PlannedEdit {
        file_path,
        ranges,
        options: FileEditOptions {
            model: input.model.clone(),
            tool_name: Some(tool_name.to_string()),
            session_id: input.session_id.clone(),
            transcript_url: input
                .transcript_path
                .as_deref()
                .filter(|path| !path.is_empty())
                .map(|path| format!("file://{path}")),
        },
    })
}

/// Trace `input` if it qualifies.
pub fn handle_hook(tracer: &AgentTracer, input: &HookInput) -> Result<HookOutcome, HookError> {
    let plan = match plan_hook(input) {
        Ok(plan) => plan,
        Err(reason) => {
            debug!(
                hook_event = %input.hook_event_name,
                tool = input.tool_name.as_deref().unwrap_or(""),
                %reason,
                "Skipping hook"
            );
            return Ok(HookOutcome::Skipped(reason));
        }
    };

    tracer.trace_file_edit(&plan.file_path, plan.ranges, plan.options)?;
    Ok(HookOutcome::Recorded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn edit_hook() -> HookInput {
        HookInput {
            tool_name: Some("Edit".to_string()),
            file_path: Some("/repo/src/lib.rs".to_string()),
            ..HookInput::new("PostToolUse")
        }
    }

    fn with_tool_input(mut input: HookInput, pairs: &[(&str, ToolInputValue)]) -> HookInput {
        let map: HashMap<String, Option<ToolInputValue>> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Some(v.clone())))
            .collect();
        input.tool_input = Some(map);
        input
    }

    #[test]
    fn test_session_start_is_skipped() {
        let input = HookInput {
            hook_event_name: "SessionStart".to_string(),
            ..edit_hook()
        };
        assert_eq!(plan_hook(&input).unwrap_err(), SkipReason::UnsupportedEvent);
    }

    #[test]
    fn test_read_tool_is_skipped() {
        let input = HookInput {
            tool_name: Some("Read".to_string()),
            ..edit_hook()
        };
        assert_eq!(plan_hook(&input).unwrap_err(), SkipReason::UnsupportedTool);
    }

    #[test]
    fn test_missing_tool_is_skipped() {
        let input = HookInput {
            tool_name: None,
            ..edit_hook()
        };
        assert_eq!(plan_hook(&input).unwrap_err(), SkipReason::UnsupportedTool);
    }

    #[test]
    fn test_cursor_events_qualify() {
        for name in ["afterFileEdit", "afterTabFileEdit"] {
            let input = HookInput {
                hook_event_name: name.to_string(),
                ..edit_hook()
            };
            assert!(plan_hook(&input).is_ok(), "{name} should qualify");
        }
    }

    #[test]
    fn test_missing_path_is_skipped() {
        let input = HookInput {
            file_path: None,
            ..edit_hook()
        };
        assert_eq!(plan_hook(&input).unwrap_err(), SkipReason::MissingFilePath);

        let input = with_tool_input(
            HookInput {
                file_path: Some(String::new()),
                ..edit_hook()
            },
            &[("file_path", ToolInputValue::String(String::new()))],
        );
        assert_eq!(plan_hook(&input).unwrap_err(), SkipReason::MissingFilePath);
    }

    #[test]
    fn test_path_from_tool_input() {
        let input = with_tool_input(
            HookInput {
                file_path: None,
                ..edit_hook()
            },
            &[("file_path", ToolInputValue::String("/repo/a.rs".to_string()))],
        );
        assert_eq!(plan_hook(&input).unwrap().file_path, "/repo/a.rs");
    }

    #[test]
    fn test_top_level_path_wins() {
        let input = with_tool_input(
            edit_hook(),
            &[("file_path", ToolInputValue::String("/other.rs".to_string()))],
        );
        assert_eq!(plan_hook(&input).unwrap().file_path, "/repo/src/lib.rs");
    }

    #[test]
    fn test_range_from_new_string() {
        let input = with_tool_input(
            edit_hook(),
            &[("new_string", ToolInputValue::String("a\nb\nc".to_string()))],
        );
        let plan = plan_hook(&input).unwrap();
        assert_eq!(plan.ranges, vec![LineRange::new(1, 3)]);
    }

    #[test]
    fn test_default_single_line_range() {
        let plan = plan_hook(&edit_hook()).unwrap();
        assert_eq!(plan.ranges, vec![LineRange::new(1, 1)]);

        let input = with_tool_input(
            edit_hook(),
            &[("new_string", ToolInputValue::String(String::new()))],
        );
        assert_eq!(plan_hook(&input).unwrap().ranges, vec![LineRange::new(1, 1)]);
    }

    #[test]
    fn test_options_carry_hook_fields() {
        let input = HookInput {
            model: Some("claude-sonnet-4-20250514".to_string()),
            session_id: Some("sess-9".to_string()),
            transcript_path: Some("/tmp/transcript.jsonl".to_string()),
            ..edit_hook()
        };
        let options = plan_hook(&input).unwrap().options;
        assert_eq!(options.tool_name.as_deref(), Some("Edit"));
        assert_eq!(options.session_id.as_deref(), Some("sess-9"));
        assert_eq!(
            options.transcript_url.as_deref(),
            Some("file:///tmp/transcript.jsonl")
        );
    }

    #[test]
    fn test_from_json_errors() {
        assert!(matches!(
            HookInput::from_json("{not json"),
            Err(HookError::InvalidJson(_))
        ));
        assert!(matches!(
            HookInput::from_json(r#"{"tool_name": "Edit"}"#),
            Err(HookError::InvalidPayload(_))
        ));
        assert!(matches!(
            HookInput::from_json(r#"{"hook_event_name": 42}"#),
            Err(HookError::InvalidPayload(_))
        ));
    }

    #[test]
    fn test_from_json_tool_input() {
        let input = HookInput::from_json(
            r#"{
                "hook_event_name": "PostToolUse",
                "tool_name": "Write",
                "tool_input": {
                    "file_path": "/repo/x.rs",
                    "new_string": "a\nb",
                    "replace_all": false,
                    "old": null
                }
            }"#,
        )
        .unwrap();
        let plan = plan_hook(&input).unwrap();
        assert_eq!(plan.file_path, "/repo/x.rs");
        assert_eq!(plan.ranges, vec![LineRange::new(1, 2)]);
    }

    #[test]
    fn test_line_span() {
        assert_eq!(line_span("a"), 1);
        assert_eq!(line_span("a\n"), 2);
        assert_eq!(line_span("one\ntwo\nthree\n"), 4);
        assert_eq!(line_span("\n\n"), 3);
    }

    #[test]
    fn test_trailing_newline_counts_next_line() {
        let input = HookInput::from_json(
            r#"{
                "hook_event_name": "afterFileEdit",
                "tool_name": "Edit",
                "tool_input": {"file_path": "/repo/y.rs", "new_string": "a\n"}
            }"#,
        )
        .unwrap();
        let plan = plan_hook(&input).unwrap();
        assert_eq!(plan.ranges, vec![LineRange::new(1, 2)]);
    }
}
