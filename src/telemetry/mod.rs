// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Telemetry: diagnostic logging and span emission.
//!
//! This module covers two separate concerns:
//!
//! - **Diagnostics**: structured logging for the tool itself, via
//!   [`init_telemetry`]
//! - **Span emission**: the observability sink for trace events, via the
//!   [`SpanEmitter`] trait
//!
//! # Usage
//!
//! ```rust,ignore
//! use agent_trace::telemetry::{init_telemetry, TelemetryConfig};
//!
//! let config = TelemetryConfig::default().with_console_spans(true);
//! let _guard = init_telemetry(&config)?;
//! ```
//!
//! Remote exporters (OTLP, Azure Monitor) are configured through
//! [`TelemetryConfig::with_exports`]; [`init_telemetry`] bridges the spans
//! of [`TracingSpanEmitter`] to them as `agent.<event_type>`.

mod export;
mod init;
mod spans;

pub use export::{build_tracer_provider, otlp_traces_endpoint, ExportTargets, OTLP_TRACES_PATH};
pub use init::{init_telemetry, TelemetryConfig, TelemetryGuard};
pub use spans::{
    attrs, range_events, span_attributes, span_name, Attribute, EmittedSpan,
    RecordingSpanEmitter, SpanContext, SpanEmitter, SpanSubEvent, TracingSpanEmitter,
    SPAN_TARGET,
};
