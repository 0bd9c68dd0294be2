// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Process-wide tracer.

use once_cell::sync::OnceCell;
use tracing::debug;

use super::AgentTracer;
use crate::config::{resolve_config, TraceOptions};
use crate::error::TraceError;

static TRACER: OnceCell<AgentTracer> = OnceCell::new();

/// Initialize the global tracer from `options`.
///
/// Fails with [`TraceError::AlreadyInitialized`] if a tracer is already installed.
pub fn init_tracer(options: &TraceOptions) -> Result<&'static AgentTracer, TraceError> {
    install_tracer(AgentTracer::new(resolve_config(options)))
}

/// Install a pre-built tracer as the global tracer.
pub fn install_tracer(tracer: AgentTracer) -> Result<&'static AgentTracer, TraceError> {
    TRACER
        .set(tracer)
        .map_err(|_| TraceError::AlreadyInitialized)?;
    TRACER.get().ok_or(TraceError::AlreadyInitialized)
}

/// Get the global tracer, creating it from `options` on first use.
///
/// The first caller wins: once a tracer exists, later options are ignored.
pub fn get_tracer(options: &TraceOptions) -> &'static AgentTracer {
    if let Some(tracer) = TRACER.get() {
        if *options != TraceOptions::default() {
            debug!("Global tracer already initialized, ignoring options");
        }
        return tracer;
    }
    TRACER.get_or_init(|| AgentTracer::new(resolve_config(options)))
}

/// The global tracer, if one has been initialized.
pub fn try_tracer() -> Option<&'static AgentTracer> {
    TRACER.get()
}
