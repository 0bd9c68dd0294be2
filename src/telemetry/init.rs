// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Telemetry initialization and configuration.
//!
//! Diagnostic output always goes to stderr: hook hosts read stdout.
//! When a remote backend is configured, spans on [`SPAN_TARGET`] are also
//! bridged to OpenTelemetry, independent of the log level.

use std::io;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::TracerProvider;
use tracing::{info, warn, Level};
use tracing_subscriber::{
    filter::Targets,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

use super::export::{build_tracer_provider, ExportTargets};
use super::spans::SPAN_TARGET;

/// Configuration for telemetry initialization.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Default log level if RUST_LOG is not set.
    pub default_level: Level,

    /// Print every `agent.<event_type>` span when it closes (console export).
    pub console_spans: bool,

    /// Whether to include file/line information.
    pub include_file_line: bool,

    /// Whether to include target module path.
    pub include_target: bool,

    /// Whether to use ANSI colors in output.
    pub ansi_colors: bool,

    /// Custom filter directive (overrides default_level).
    pub filter_directive: Option<String>,

    /// Remote span backends.
    pub exports: ExportTargets,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            default_level: Level::WARN,
            console_spans: false,
            include_file_line: false,
            include_target: true,
            ansi_colors: true,
            filter_directive: None,
            exports: ExportTargets::default(),
        }
    }
}

impl TelemetryConfig {
    /// Create a config suitable for development with verbose output.
    pub fn development() -> Self {
        Self {
            default_level: Level::DEBUG,
            console_spans: true,
            include_file_line: true,
            include_target: true,
            ansi_colors: true,
            filter_directive: None,
            exports: ExportTargets::default(),
        }
    }

    /// Create a config suitable for hook invocations: errors only, no colors.
    pub fn production() -> Self {
        Self {
            default_level: Level::ERROR,
            console_spans: false,
            include_file_line: false,
            include_target: false,
            ansi_colors: false,
            filter_directive: None,
            exports: ExportTargets::default(),
        }
    }

    /// Create a config for testing with trace-level output.
    pub fn testing() -> Self {
        Self {
            default_level: Level::TRACE,
            console_spans: true,
            include_file_line: true,
            include_target: true,
            ansi_colors: false,
            filter_directive: Some("agent_trace=trace".to_string()),
            exports: ExportTargets::default(),
        }
    }

    /// Set the default log level.
    pub fn with_level(mut self, level: Level) -> Self {
        self.default_level = level;
        self
    }

    /// Set a custom filter directive.
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter_directive = Some(filter.into());
        self
    }

    /// Enable or disable ANSI colors.
    pub fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi_colors = ansi;
        self
    }

    /// Enable or disable console export of spans.
    pub fn with_console_spans(mut self, enabled: bool) -> Self {
        self.console_spans = enabled;
        self
    }

    /// Set the remote span backends.
    pub fn with_exports(mut self, exports: ExportTargets) -> Self {
        self.exports = exports;
        self
    }

    /// Filter directive string before `RUST_LOG` is consulted.
    fn base_directive(&self) -> String {
        let mut directive = self
            .filter_directive
            .clone()
            .unwrap_or_else(|| self.default_level.to_string().to_lowercase());
        if self.console_spans {
            directive.push_str(&format!(",{}=info", SPAN_TARGET));
        }
        directive
    }
}

/// Guard returned by [`init_telemetry`].
///
/// Keep this guard alive for the duration of your program. Dropping it
/// flushes and shuts down the remote exporters.
pub struct TelemetryGuard {
    provider: Option<TracerProvider>,
}

impl TelemetryGuard {
    /// Whether a remote exporter is installed.
    pub fn exporting(&self) -> bool {
        self.provider.is_some()
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.provider.take() {
            if let Err(e) = provider.shutdown() {
                warn!("Failed to shut down span exporter: {}", e);
            }
        }
    }
}

/// Initialize telemetry with the given configuration.
///
/// This should be called once at application startup. `RUST_LOG` takes
/// precedence over the configured level unless a filter directive is set.
///
/// # Example
///
/// ```rust,ignore
/// use agent_trace::telemetry::{init_telemetry, TelemetryConfig};
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let _guard = init_telemetry(&TelemetryConfig::default())?;
///
///     // Your application code here
///
///     Ok(())
/// }
/// ```
pub fn init_telemetry(config: &TelemetryConfig) -> io::Result<TelemetryGuard> {
    let base = config.base_directive();
    let filter = match &config.filter_directive {
        Some(_) => EnvFilter::try_new(&base)
            .unwrap_or_else(|_| EnvFilter::new(config.default_level.to_string())),
        None => EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&base))
            .unwrap_or_else(|_| EnvFilter::new(config.default_level.to_string())),
    };

    let span_events = if config.console_spans {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let fmt_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(config.ansi_colors)
        .with_target(config.include_target)
        .with_file(config.include_file_line)
        .with_line_number(config.include_file_line)
        .with_span_events(span_events)
        .with_filter(filter);

    let provider = build_tracer_provider(&config.exports)?;
    let otel_layer = provider.as_ref().map(|provider| {
        tracing_opentelemetry::layer()
            .with_tracer(provider.tracer("agent-trace"))
            .with_filter(Targets::new().with_target(SPAN_TARGET, Level::INFO))
    });

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(otel_layer)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    if provider.is_some() {
        info!(
            otlp_endpoint = ?config.exports.otlp_endpoint,
            azure = config.exports.azure_connection_string.is_some(),
            "Remote span export enabled"
        );
    }

    Ok(TelemetryGuard { provider })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_telemetry_config_default() {
        let config = TelemetryConfig::default();
        assert_eq!(config.default_level, Level::WARN);
        assert!(!config.console_spans);
        assert!(config.ansi_colors);
    }

    #[test]
    fn test_telemetry_config_development() {
        let config = TelemetryConfig::development();
        assert_eq!(config.default_level, Level::DEBUG);
        assert!(config.console_spans);
    }

    #[test]
    fn test_telemetry_config_production() {
        let config = TelemetryConfig::production();
        assert_eq!(config.default_level, Level::ERROR);
        assert!(!config.ansi_colors);
    }

    #[test]
    fn test_telemetry_config_builder() {
        let config = TelemetryConfig::default()
            .with_level(Level::DEBUG)
            .with_filter("agent_trace=trace")
            .with_ansi(false)
            .with_console_spans(true);

        assert_eq!(config.default_level, Level::DEBUG);
        assert_eq!(config.filter_directive, Some("agent_trace=trace".to_string()));
        assert!(!config.ansi_colors);
        assert!(config.console_spans);
    }

    #[test]
    fn test_telemetry_config_exports() {
        let config = TelemetryConfig::production();
        assert!(!config.exports.has_remote());

        let config = config.with_exports(ExportTargets {
            otlp_endpoint: Some("http://localhost:4318".to_string()),
            ..Default::default()
        });
        assert!(config.exports.has_remote());
        assert_eq!(config.exports.service_name, "agent-trace");
    }

    #[test]
    fn test_guard_without_exporter() {
        let guard = TelemetryGuard { provider: None };
        assert!(!guard.exporting());
    }

    #[test]
    fn test_base_directive_enables_span_target() {
        let config = TelemetryConfig::default();
        assert_eq!(config.base_directive(), "warn");

        let config = config.with_console_spans(true);
        assert_eq!(config.base_directive(), "warn,agent_trace::span=info");
    }
}
