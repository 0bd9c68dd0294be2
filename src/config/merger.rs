// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Configuration resolution.
//!
//! Each option is resolved independently with precedence
//! explicit option > environment variable > default.

use super::types::{TraceConfig, TraceOptions};

/// OTLP collector endpoint.
pub const ENV_OTLP_ENDPOINT: &str = "AGENT_TRACE_OTLP_ENDPOINT";

/// Azure Application Insights connection string.
pub const ENV_AZURE_CONNECTION_STRING: &str = "APPLICATIONINSIGHTS_CONNECTION_STRING";

/// Enable/disable JSONL file export (default: enabled).
pub const ENV_FILE_EXPORT: &str = "AGENT_TRACE_FILE_EXPORT";

/// Enable/disable console span export (default: disabled).
pub const ENV_CONSOLE_EXPORT: &str = "AGENT_TRACE_CONSOLE_EXPORT";

/// Interpret an optional environment value as a boolean.
///
/// Unset values yield `default`. Set values are true only for
/// `true`, `1` or `yes` (case-insensitive).
pub fn env_bool(value: Option<&str>, default: bool) -> bool {
    match value {
        None => default,
        Some(v) => matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"),
    }
}

/// Resolve configuration against the process environment.
pub fn resolve_config(options: &TraceOptions) -> TraceConfig {
    resolve_config_with(options, |name| std::env::var(name).ok())
}

/// Resolve configuration using `lookup` for environment values.
pub fn resolve_config_with<F>(options: &TraceOptions, lookup: F) -> TraceConfig
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = TraceConfig::default();
    let non_empty = |value: Option<String>| value.filter(|v| !v.is_empty());

    TraceConfig {
        service_name: options
            .service_name
            .clone()
            .unwrap_or(defaults.service_name),
        file_export: options
            .file_export
            .unwrap_or_else(|| env_bool(lookup(ENV_FILE_EXPORT).as_deref(), defaults.file_export)),
        console_export: options.console_export.unwrap_or_else(|| {
            env_bool(lookup(ENV_CONSOLE_EXPORT).as_deref(), defaults.console_export)
        }),
        otlp_endpoint: non_empty(options.otlp_endpoint.clone())
            .or_else(|| non_empty(lookup(ENV_OTLP_ENDPOINT))),
        azure_connection_string: non_empty(options.azure_connection_string.clone())
            .or_else(|| non_empty(lookup(ENV_AZURE_CONNECTION_STRING))),
    }
}
