// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Configuration module for agent tracing.
//!
//! Four options are recognized, each resolvable from the environment:
//! - `AGENT_TRACE_OTLP_ENDPOINT`: OTLP collector endpoint
//! - `APPLICATIONINSIGHTS_CONNECTION_STRING`: Azure Monitor connection string
//! - `AGENT_TRACE_FILE_EXPORT`: JSONL file export (default: enabled)
//! - `AGENT_TRACE_CONSOLE_EXPORT`: console span export (default: disabled)
//!
//! Configuration is resolved per option with precedence (explicit > env > defaults).

mod merger;
mod types;

pub use merger::{
    env_bool, resolve_config, resolve_config_with, ENV_AZURE_CONNECTION_STRING,
    ENV_CONSOLE_EXPORT, ENV_FILE_EXPORT, ENV_OTLP_ENDPOINT,
};
pub use types::{TraceConfig, TraceOptions, DEFAULT_SERVICE_NAME};
