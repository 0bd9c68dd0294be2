// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Remote span export through OpenTelemetry.
//!
//! Spans emitted on [`SPAN_TARGET`](super::SPAN_TARGET) are bridged into an
//! OpenTelemetry tracer provider by a `tracing-opentelemetry` layer installed
//! in [`init_telemetry`](super::init_telemetry). The provider gets one
//! exporter per configured backend:
//!
//! - OTLP over HTTP/protobuf when an endpoint is set
//! - Azure Monitor when a connection string is set (requires the
//!   `azure-monitor` feature)
//!
//! Exporters are attached as simple (synchronous) processors: a hook
//! invocation is short-lived and every span must be flushed before exit.

use std::fmt;
use std::io;

use opentelemetry::KeyValue;
use opentelemetry_otlp::{SpanExporter, WithExportConfig};
use opentelemetry_sdk::trace::{Builder, TracerProvider};
use opentelemetry_sdk::Resource;
use tracing::{info, warn};

use crate::config::DEFAULT_SERVICE_NAME;

/// Path of the OTLP/HTTP traces signal.
pub const OTLP_TRACES_PATH: &str = "/v1/traces";

/// Span backends the process was configured with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTargets {
    /// `service.name` resource attribute.
    pub service_name: String,
    pub console: bool,
    pub otlp_endpoint: Option<String>,
    pub azure_connection_string: Option<String>,
}

impl Default for ExportTargets {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            console: false,
            otlp_endpoint: None,
            azure_connection_string: None,
        }
    }
}

impl ExportTargets {
    /// Whether any remote exporter is configured.
    pub fn has_remote(&self) -> bool {
        self.otlp_endpoint.is_some() || self.azure_connection_string.is_some()
    }
}

/// Full OTLP/HTTP traces URL for a collector endpoint.
///
/// `http://collector:4318` becomes `http://collector:4318/v1/traces`; URLs
/// already ending in the traces path are kept.
pub fn otlp_traces_endpoint(endpoint: &str) -> String {
    let trimmed = endpoint.trim_end_matches('/');
    if trimmed.ends_with(OTLP_TRACES_PATH) {
        trimmed.to_string()
    } else {
        format!("{}{}", trimmed, OTLP_TRACES_PATH)
    }
}

/// Build a tracer provider exporting to every configured remote backend.
///
/// Returns `Ok(None)` when no remote backend is configured.
pub fn build_tracer_provider(targets: &ExportTargets) -> io::Result<Option<TracerProvider>> {
    if !targets.has_remote() {
        return Ok(None);
    }

    let resource = Resource::new(vec![KeyValue::new(
        "service.name",
        targets.service_name.clone(),
    )]);
    let mut builder = TracerProvider::builder().with_resource(resource);

    if let Some(endpoint) = &targets.otlp_endpoint {
        let url = otlp_traces_endpoint(endpoint);
        let exporter = SpanExporter::builder()
            .with_http()
            .with_endpoint(url.clone())
            .build()
            .map_err(export_error)?;
        builder = builder.with_simple_exporter(exporter);
        info!(endpoint = %url, "OTLP span export configured");
    }

    if let Some(connection_string) = &targets.azure_connection_string {
        builder = with_azure_monitor(builder, connection_string)?;
    }

    Ok(Some(builder.build()))
}

#[cfg(feature = "azure-monitor")]
fn with_azure_monitor(builder: Builder, connection_string: &str) -> io::Result<Builder> {
    let exporter = opentelemetry_application_insights::Exporter::new_from_connection_string(
        connection_string,
        reqwest::blocking::Client::new(),
    )
    .map_err(export_error)?;
    info!("Azure Monitor span export configured");
    Ok(builder.with_simple_exporter(exporter))
}

#[cfg(not(feature = "azure-monitor"))]
fn with_azure_monitor(builder: Builder, _connection_string: &str) -> io::Result<Builder> {
    warn!("Azure Monitor export needs the `azure-monitor` feature; connection string ignored");
    Ok(builder)
}

fn export_error(err: impl fmt::Display) -> io::Error {
    io::Error::new(
        io::ErrorKind::Other,
        format!("Failed to configure span exporter: {}", err),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_targets_default() {
        let targets = ExportTargets::default();
        assert_eq!(targets.service_name, "agent-trace");
        assert!(!targets.has_remote());
    }

    #[test]
    fn test_has_remote() {
        let otlp = ExportTargets {
            otlp_endpoint: Some("http://localhost:4318".to_string()),
            ..Default::default()
        };
        assert!(otlp.has_remote());

        let azure = ExportTargets {
            azure_connection_string: Some("InstrumentationKey=abc".to_string()),
            ..Default::default()
        };
        assert!(azure.has_remote());
    }

    #[test]
    fn test_otlp_traces_endpoint() {
        assert_eq!(
            otlp_traces_endpoint("http://localhost:4318"),
            "http://localhost:4318/v1/traces"
        );
        assert_eq!(
            otlp_traces_endpoint("http://localhost:4318/"),
            "http://localhost:4318/v1/traces"
        );
        assert_eq!(
            otlp_traces_endpoint("https://collector.example.com/v1/traces"),
            "https://collector.example.com/v1/traces"
        );
    }

    #[test]
    fn test_no_provider_without_remote() {
        let provider = build_tracer_provider(&ExportTargets::default()).unwrap();
        assert!(provider.is_none());
    }

    #[test]
    fn test_provider_for_otlp_endpoint() {
        // Building the exporter does not connect; nothing listens on this port.
        let targets = ExportTargets {
            otlp_endpoint: Some("http://127.0.0.1:4318".to_string()),
            ..Default::default()
        };
        let provider = build_tracer_provider(&targets).unwrap();
        assert!(provider.is_some());
    }
}
