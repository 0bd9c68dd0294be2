// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Span emission for trace events.
//!
//! Each event becomes one span named `agent.<event_type>` with attributes for
//! the contributor, file, tool, session and revision, plus one `range.<i>`
//! sub-event per line range. Each custom metadata entry becomes its own
//! attribute under [`attrs::METADATA_PREFIX`].

use std::sync::Mutex;

use tracing::{event, field, info_span, Level};
use tracing_opentelemetry::OpenTelemetrySpanExt;

use crate::types::{MetadataValue, TraceEvent};

/// `tracing` target for emitted spans.
pub const SPAN_TARGET: &str = "agent_trace::span";

/// Semantic convention attribute names.
pub mod attrs {
    pub const CONTRIBUTOR_TYPE: &str = "agent_trace.contributor.type";
    pub const MODEL_ID: &str = "agent_trace.contributor.model_id";
    pub const EVENT_TYPE: &str = "agent_trace.event.type";
    pub const FILE_PATH: &str = "agent_trace.file.path";
    pub const RANGE_START: &str = "agent_trace.range.start_line";
    pub const RANGE_END: &str = "agent_trace.range.end_line";
    pub const CONTENT_HASH: &str = "agent_trace.range.content_hash";
    pub const TOOL_NAME: &str = "agent_trace.tool.name";
    pub const SESSION_ID: &str = "agent_trace.session.id";
    pub const GIT_REVISION: &str = "agent_trace.vcs.revision";
    pub const TRANSCRIPT_URL: &str = "agent_trace.conversation.url";
    pub const METADATA_PREFIX: &str = "agent_trace.metadata.";
}

/// Span name for an event type.
pub fn span_name(event_type: &str) -> String {
    format!("agent.{}", event_type)
}

/// Per-event values the sinks derive from the workspace rather than the event.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpanContext<'a> {
    /// File path relative to the workspace root.
    pub relative_path: Option<&'a str>,
    /// VCS revision at the time of the event.
    pub revision: Option<&'a str>,
}

/// An attribute key/value pair.
pub type Attribute = (String, MetadataValue);

/// A named sub-event of a span.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanSubEvent {
    pub name: String,
    pub attributes: Vec<Attribute>,
}

/// Span attributes for an event, in emission order.
pub fn span_attributes(event: &TraceEvent, ctx: &SpanContext<'_>) -> Vec<Attribute> {
    let mut attributes: Vec<Attribute> = vec![
        (attrs::EVENT_TYPE.to_string(), event.event_type.as_str().into()),
        (
            attrs::CONTRIBUTOR_TYPE.to_string(),
            event.contributor.kind.as_str().into(),
        ),
    ];

    let optional = [
        (attrs::MODEL_ID, event.contributor.model_id.as_deref()),
        (attrs::FILE_PATH, ctx.relative_path),
        (attrs::TOOL_NAME, event.tool_name.as_deref()),
        (attrs::SESSION_ID, event.session_id.as_deref()),
        (attrs::GIT_REVISION, ctx.revision),
    ];
    for (key, value) in optional {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            attributes.push((key.to_string(), value.into()));
        }
    }

    for (key, value) in &event.metadata {
        attributes.push((format!("{}{}", attrs::METADATA_PREFIX, key), value.clone()));
    }

    attributes
}

/// One `range.<i>` sub-event per line range.
pub fn range_events(event: &TraceEvent) -> Vec<SpanSubEvent> {
    event
        .ranges
        .iter()
        .enumerate()
        .map(|(i, range)| {
            let mut attributes: Vec<Attribute> = vec![
                (attrs::RANGE_START.to_string(), range.start_line.into()),
                (attrs::RANGE_END.to_string(), range.end_line.into()),
            ];
            if let Some(hash) = &range.content_hash {
                attributes.push((attrs::CONTENT_HASH.to_string(), hash.as_str().into()));
            }
            SpanSubEvent {
                name: format!("range.{}", i),
                attributes,
            }
        })
        .collect()
}

/// Emits trace events to a span backend.
///
/// Emission is infallible from the caller's point of view; transports
/// handle their own batching and failures.
pub trait SpanEmitter: Send + Sync {
    fn emit(&self, event: &TraceEvent, ctx: &SpanContext<'_>);
}

/// Emits spans through the `tracing` dispatcher.
///
/// The span carries `otel.name = agent.<event_type>` so the OpenTelemetry
/// layer exports it under that name. Metadata keys are dynamic, so each one
/// is set directly on the OpenTelemetry span as
/// `agent_trace.metadata.<key>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSpanEmitter;

impl TracingSpanEmitter {
    pub fn new() -> Self {
        Self
    }
}

impl SpanEmitter for TracingSpanEmitter {
    fn emit(&self, event: &TraceEvent, ctx: &SpanContext<'_>) {
        let span = info_span!(
            target: SPAN_TARGET,
            "agent_event",
            "otel.name" = %span_name(&event.event_type),
            "otel.status_code" = field::Empty,
            "agent_trace.event.type" = %event.event_type,
            "agent_trace.contributor.type" = %event.contributor.kind,
            "agent_trace.contributor.model_id" = field::Empty,
            "agent_trace.file.path" = field::Empty,
            "agent_trace.tool.name" = field::Empty,
            "agent_trace.session.id" = field::Empty,
            "agent_trace.vcs.revision" = field::Empty,
        );

        if let Some(model_id) = event.contributor.model_id.as_deref() {
            span.record(attrs::MODEL_ID, model_id);
        }
        if let Some(path) = ctx.relative_path {
            span.record(attrs::FILE_PATH, path);
        }
        if let Some(tool) = event.tool_name.as_deref() {
            span.record(attrs::TOOL_NAME, tool);
        }
        if let Some(session) = event.session_id.as_deref() {
            span.record(attrs::SESSION_ID, session);
        }
        if let Some(revision) = ctx.revision {
            span.record(attrs::GIT_REVISION, revision);
        }
        for (key, value) in &event.metadata {
            span.set_attribute(
                format!("{}{}", attrs::METADATA_PREFIX, key),
                otel_value(value),
            );
        }

        for (i, range) in event.ranges.iter().enumerate() {
            event!(
                target: SPAN_TARGET,
                parent: &span,
                Level::INFO,
                agent_trace.range.start_line = range.start_line,
                agent_trace.range.end_line = range.end_line,
                agent_trace.range.content_hash = range.content_hash.as_deref(),
                "range.{}",
                i
            );
        }

        span.record("otel.status_code", "OK");
    }
}

fn otel_value(value: &MetadataValue) -> opentelemetry::Value {
    match value {
        MetadataValue::Bool(b) => opentelemetry::Value::from(*b),
        MetadataValue::Int(n) => opentelemetry::Value::from(*n),
        MetadataValue::Float(f) => opentelemetry::Value::from(*f),
        MetadataValue::String(s) => opentelemetry::Value::from(s.clone()),
    }
}

/// A span captured by [`RecordingSpanEmitter`].
#[derive(Debug, Clone, PartialEq)]
pub struct EmittedSpan {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub events: Vec<SpanSubEvent>,
}

impl EmittedSpan {
    /// Look up an attribute by key.
    pub fn attribute(&self, key: &str) -> Option<&MetadataValue> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}

/// In-memory emitter that keeps every span it is given.
#[derive(Debug, Default)]
pub struct RecordingSpanEmitter {
    spans: Mutex<Vec<EmittedSpan>>,
}

impl RecordingSpanEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the spans emitted so far.
    pub fn spans(&self) -> Vec<EmittedSpan> {
        self.spans
            .lock()
            .map(|spans| spans.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.spans.lock().map(|spans| spans.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SpanEmitter for RecordingSpanEmitter {
    fn emit(&self, event: &TraceEvent, ctx: &SpanContext<'_>) {
        let span = EmittedSpan {
            name: span_name(&event.event_type),
            attributes: span_attributes(event, ctx),
            events: range_events(event),
        };
        if let Ok(mut spans) = self.spans.lock() {
            spans.push(span);
        }
    }
}
