// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! agent-trace entry point: reads one hook payload from stdin and records it.

use std::io::Read;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{debug, error};

use agent_trace::config::{resolve_config, TraceOptions};
use agent_trace::hook::{handle_hook, HookOutcome};
use agent_trace::record::SCHEMA_VERSION;
use agent_trace::telemetry::{init_telemetry, TelemetryConfig};
use agent_trace::tracer::get_tracer;
use agent_trace::types::HookInput;
use agent_trace::VERSION;

/// Attribution tracing for AI coding agents.
#[derive(Parser)]
#[command(name = "agent-trace")]
#[command(author, version, about = "Record AI attribution for file edits", long_about = None)]
struct Cli {
    /// Do not write records to .agent-trace/traces.jsonl
    #[arg(long)]
    no_file_export: bool,

    /// Print trace spans to stderr
    #[arg(long)]
    console: bool,

    /// OTLP collector endpoint
    #[arg(long, env = "AGENT_TRACE_OTLP_ENDPOINT")]
    otlp_endpoint: Option<String>,

    /// Show debug logs
    #[arg(short = 'v', long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a hook payload read from stdin (default)
    Hook,

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Version) => {
            println!("agent-trace {}", VERSION);
            println!("record schema {}", SCHEMA_VERSION);
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Hook) | None => run_hook(&cli),
    }
}

fn run_hook(cli: &Cli) -> anyhow::Result<ExitCode> {
    let options = TraceOptions {
        file_export: Some(!cli.no_file_export),
        console_export: Some(cli.console),
        otlp_endpoint: cli.otlp_endpoint.clone(),
        ..Default::default()
    };
    let config = resolve_config(&options);

    let telemetry = if cli.verbose {
        TelemetryConfig::development()
    } else {
        TelemetryConfig::production()
    };
    let telemetry = telemetry
        .with_console_spans(config.console_export)
        .with_exports(config.export_targets());
    let _guard = match init_telemetry(&telemetry) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("agent-trace: telemetry disabled: {}", e);
            None
        }
    };

    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    let input = input.trim();
    if input.is_empty() {
        debug!("Empty hook input");
        return Ok(ExitCode::SUCCESS);
    }

    let hook_input = match HookInput::from_json(input) {
        Ok(hook_input) => hook_input,
        Err(e) => {
            error!("{}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    let tracer = get_tracer(&options);
    match handle_hook(tracer, &hook_input) {
        Ok(HookOutcome::Recorded) => {
            debug!(hook_event = %hook_input.hook_event_name, "Hook recorded");
            Ok(ExitCode::SUCCESS)
        }
        Ok(HookOutcome::Skipped(reason)) => {
            debug!(%reason, "Hook skipped");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!("{}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}
