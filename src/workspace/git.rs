// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! `git`-backed [`Vcs`] implementation.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use tracing::debug;

use super::{current_dir_or_dot, Vcs};

/// Default upper bound on a single `git` invocation.
pub const DEFAULT_GIT_TIMEOUT: Duration = Duration::from_secs(5);

/// Interval between exit checks while waiting on `git`.
const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Resolves workspace root and revision by invoking `git`.
#[derive(Debug, Clone)]
pub struct GitVcs {
    /// Directory to run `git` in (defaults to the process working directory).
    cwd: Option<PathBuf>,
    /// Maximum time a single invocation may take before it is killed.
    timeout: Duration,
}

impl Default for GitVcs {
    fn default() -> Self {
        Self::new()
    }
}

impl GitVcs {
    pub fn new() -> Self {
        Self {
            cwd: None,
            timeout: DEFAULT_GIT_TIMEOUT,
        }
    }

    /// Run `git` in a specific directory.
    pub fn in_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Set the invocation timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run a git command and return trimmed stdout.
    ///
    /// Returns `None` when git is missing, exits non-zero, prints nothing,
    /// or does not finish within the timeout.
    fn git(&self, args: &[&str]) -> Option<String> {
        let mut command = Command::new("git");
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null());
        if let Some(dir) = &self.cwd {
            command.current_dir(dir);
        }

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                debug!(error = %e, "git unavailable");
                return None;
            }
        };

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if Instant::now() >= deadline => {
                    debug!(?args, timeout_ms = self.timeout.as_millis() as u64, "git timed out");
                    let _ = child.kill();
                    let _ = child.wait();
                    return None;
                }
                Ok(None) => std::thread::sleep(POLL_INTERVAL),
                Err(e) => {
                    debug!(error = %e, "failed waiting on git");
                    return None;
                }
            }
        };

        if !status.success() {
            debug!(?args, code = ?status.code(), "git exited unsuccessfully");
            return None;
        }

        let mut stdout = String::new();
        child.stdout.take()?.read_to_string(&mut stdout).ok()?;

        let trimmed = stdout.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

impl Vcs for GitVcs {
    fn resolve_root(&self) -> PathBuf {
        match self.git(&["rev-parse", "--show-toplevel"]) {
            Some(root) => PathBuf::from(root),
            None => self.cwd.clone().unwrap_or_else(current_dir_or_dot),
        }
    }

    fn resolve_revision(&self) -> Option<String> {
        self.git(&["rev-parse", "HEAD"])
    }
}
