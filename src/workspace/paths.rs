// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Root-relative path rewriting.

use std::path::Path;

/// Rewrite `absolute_path` relative to `root`.
///
/// Paths that are not descendants of `root` (including relative paths) are
/// returned unchanged. The comparison is lexical; no filesystem access.
pub fn to_relative_path(absolute_path: &str, root: &Path) -> String {
    match Path::new(absolute_path).strip_prefix(root) {
        Ok(relative) if relative.as_os_str().is_empty() => ".".to_string(),
        Ok(relative) => relative.to_string_lossy().into_owned(),
        Err(_) => absolute_path.to_string(),
    }
}
