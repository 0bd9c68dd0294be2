// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Workspace discovery and VCS provenance.
//!
//! All environment-dependent lookups sit behind the [`Vcs`] capability:
//!
//! - [`GitVcs`] shells out to `git` with a bounded timeout
//! - [`FixedVcs`] returns fixed values (for tests and embedding)
//!
//! Lookups never fail the caller. A missing `git`, a non-zero exit, or a
//! timeout degrades to the current directory (root) or `None` (revision).

mod git;
mod paths;

pub use git::{GitVcs, DEFAULT_GIT_TIMEOUT};
pub use paths::to_relative_path;

use std::path::PathBuf;

/// Best-effort access to version-control state.
pub trait Vcs: Send + Sync {
    /// Repository top-level directory, or the current directory when unavailable.
    fn resolve_root(&self) -> PathBuf;

    /// Current commit identifier, if one can be determined.
    fn resolve_revision(&self) -> Option<String>;

    /// VCS kind recorded in persisted records.
    fn kind(&self) -> &'static str {
        "git"
    }
}

/// A [`Vcs`] that returns fixed values.
#[derive(Debug, Clone)]
pub struct FixedVcs {
    root: PathBuf,
    revision: Option<String>,
}

impl FixedVcs {
    pub fn new(root: impl Into<PathBuf>, revision: Option<&str>) -> Self {
        Self {
            root: root.into(),
            revision: revision.map(str::to_string),
        }
    }
}

impl Vcs for FixedVcs {
    fn resolve_root(&self) -> PathBuf {
        self.root.clone()
    }

    fn resolve_revision(&self) -> Option<String> {
        self.revision.clone()
    }
}

/// Current working directory, falling back to `.` if it cannot be read.
pub(crate) fn current_dir_or_dot() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_vcs() {
        let vcs = FixedVcs::new("/home/user/project", Some("abc123"));
        assert_eq!(vcs.resolve_root(), PathBuf::from("/home/user/project"));
        assert_eq!(vcs.resolve_revision().as_deref(), Some("abc123"));
        assert_eq!(vcs.kind(), "git");
    }

    #[test]
    fn test_fixed_vcs_without_revision() {
        let vcs = FixedVcs::new("/tmp", None);
        assert!(vcs.resolve_revision().is_none());
    }
}
