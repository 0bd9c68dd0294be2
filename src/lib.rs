// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Agent trace - attribution tracing for AI coding agents.
//!
//! Records which actor (human or AI model) changed which lines of which file,
//! as an append-only JSONL log under `.agent-trace/` and as `tracing` spans.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - [`types`] - Core type definitions (TraceEvent, LineRange, Contributor, HookInput)
//! - [`error`] - Error types and result aliases
//! - [`identity`] - Model identifier normalization
//! - [`workspace`] - Workspace root, relative paths and VCS revision lookup
//! - [`record`] - Versioned JSONL record schema, writer and reader
//! - [`telemetry`] - Logging setup and span emission
//! - [`config`] - Option resolution (explicit > environment > default)
//! - [`tracer`] - The tracer façade and process-wide accessor
//! - [`hook`] - Editor/agent hook adapter
//!
//! # Example
//!
//! ```rust,ignore
//! use agent_trace::config::TraceOptions;
//! use agent_trace::tracer::{get_tracer, FileEditOptions};
//! use agent_trace::types::LineRange;
//!
//! let tracer = get_tracer(&TraceOptions::default());
//! tracer.trace_file_edit(
//!     "src/main.rs",
//!     vec![LineRange::new(1, 10)],
//!     FileEditOptions {
//!         model: Some("claude-sonnet-4-20250514".to_string()),
//!         session_id: Some("session-123".to_string()),
//!         ..Default::default()
//!     },
//! )?;
//! ```

pub mod config;
pub mod error;
pub mod hook;
pub mod identity;
pub mod record;
pub mod telemetry;
pub mod tracer;
pub mod types;
pub mod workspace;

// Re-export commonly used types at crate root
pub use config::{resolve_config, TraceConfig, TraceOptions};
pub use error::{HookError, RecordError, Result, TraceError};
pub use hook::{handle_hook, HookOutcome, SkipReason};
pub use identity::normalize_model_id;
pub use record::{PersistedRecord, RecordLine, SCHEMA_VERSION};
pub use tracer::{get_tracer, init_tracer, AgentTracer};
pub use types::{
    Contributor, ContributorType, EventType, HookInput, LineRange, Metadata, MetadataValue,
    TraceEvent,
};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
