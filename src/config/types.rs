// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Configuration type definitions.

use serde::{Deserialize, Serialize};

use crate::telemetry::ExportTargets;

/// Default service name reported to span backends.
pub const DEFAULT_SERVICE_NAME: &str = "agent-trace";

/// Explicit, call-time configuration overrides.
///
/// Every field left as `None` falls back to the environment, then to the
/// default in [`TraceConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceOptions {
    /// Service name for span resources
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,

    /// Write records to `.agent-trace/traces.jsonl`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_export: Option<bool>,

    /// Print spans to the console (stderr)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub console_export: Option<bool>,

    /// OTLP collector endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otlp_endpoint: Option<String>,

    /// Azure Application Insights connection string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub azure_connection_string: Option<String>,
}

impl TraceOptions {
    pub fn with_file_export(mut self, enabled: bool) -> Self {
        self.file_export = Some(enabled);
        self
    }

    pub fn with_console_export(mut self, enabled: bool) -> Self {
        self.console_export = Some(enabled);
        self
    }

    pub fn with_otlp_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.otlp_endpoint = Some(endpoint.into());
        self
    }

    pub fn with_azure_connection_string(mut self, connection: impl Into<String>) -> Self {
        self.azure_connection_string = Some(connection.into());
        self
    }

    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into());
        self
    }
}

/// Fully resolved tracer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceConfig {
    pub service_name: String,
    pub file_export: bool,
    pub console_export: bool,
    pub otlp_endpoint: Option<String>,
    pub azure_connection_string: Option<String>,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            file_export: true,
            console_export: false,
            otlp_endpoint: None,
            azure_connection_string: None,
        }
    }
}

impl TraceConfig {
    /// Span export targets implied by this configuration.
    pub fn export_targets(&self) -> ExportTargets {
        ExportTargets {
            service_name: self.service_name.clone(),
            console: self.console_export,
            otlp_endpoint: self.otlp_endpoint.clone(),
            azure_connection_string: self.azure_connection_string.clone(),
        }
    }
}
