// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Model identity normalization.
//!
//! Canonicalizes free-form model identifiers into the `provider/model` form
//! (e.g. `claude-sonnet-4-20250514` becomes `anthropic/claude-sonnet-4-20250514`).

/// Prefix to provider mappings, checked in order. First match wins.
///
/// `o1`/`o3` have no trailing separator, so they must stay after the
/// more specific prefixes.
pub const PROVIDER_PREFIXES: &[(&str, &str)] = &[
    ("claude-", "anthropic"),
    ("gpt-", "openai"),
    ("o1", "openai"),
    ("o3", "openai"),
    ("gemini-", "google"),
];

/// Find the provider for a bare model ID, if its prefix is recognized.
pub fn provider_for(model: &str) -> Option<&'static str> {
    PROVIDER_PREFIXES
        .iter()
        .find(|(prefix, _)| model.starts_with(prefix))
        .map(|(_, provider)| *provider)
}

/// Normalize a model ID to `provider/model` form.
///
/// Empty input yields `None`. IDs already containing a `/` and IDs with no
/// recognized prefix are returned unchanged.
pub fn normalize_model_id(model: Option<&str>) -> Option<String> {
    let model = model.filter(|m| !m.is_empty())?;

    if model.contains('/') {
        return Some(model.to_string());
    }

    match provider_for(model) {
        Some(provider) => Some(format!("{provider}/{model}")),
        None => Some(model.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_and_empty() {
        assert_eq!(normalize_model_id(None), None);
        assert_eq!(normalize_model_id(Some("")), None);
    }

    #[test]
    fn test_already_normalized() {
        assert_eq!(
            normalize_model_id(Some("anthropic/claude-opus-4-5-20251101")).as_deref(),
            Some("anthropic/claude-opus-4-5-20251101")
        );
        assert_eq!(
            normalize_model_id(Some("custom/gpt-4o")).as_deref(),
            Some("custom/gpt-4o")
        );
    }

    #[test]
    fn test_claude_prefix() {
        assert_eq!(
            normalize_model_id(Some("claude-sonnet-4-20250514")).as_deref(),
            Some("anthropic/claude-sonnet-4-20250514")
        );
    }

    #[test]
    fn test_openai_prefixes() {
        assert_eq!(normalize_model_id(Some("gpt-4o")).as_deref(), Some("openai/gpt-4o"));
        assert_eq!(
            normalize_model_id(Some("o1-preview")).as_deref(),
            Some("openai/o1-preview")
        );
        assert_eq!(normalize_model_id(Some("o3-mini")).as_deref(), Some("openai/o3-mini"));
        assert_eq!(normalize_model_id(Some("o1")).as_deref(), Some("openai/o1"));
    }

    #[test]
    fn test_gemini_prefix() {
        assert_eq!(
            normalize_model_id(Some("gemini-pro")).as_deref(),
            Some("google/gemini-pro")
        );
    }

    #[test]
    fn test_unknown_model() {
        assert_eq!(
            normalize_model_id(Some("some-other-model")).as_deref(),
            Some("some-other-model")
        );
        // Prefix match is case-sensitive
        assert_eq!(normalize_model_id(Some("Claude-3")).as_deref(), Some("Claude-3"));
    }

    #[test]
    fn test_idempotent() {
        for raw in [
            "claude-sonnet-4-20250514",
            "gpt-4o",
            "o1-mini",
            "o3",
            "gemini-2.0-flash",
            "llama3.2",
            "openai/gpt-4o",
        ] {
            let once = normalize_model_id(Some(raw));
            let twice = normalize_model_id(once.as_deref());
            assert_eq!(once, twice, "normalization not idempotent for {raw}");
        }
    }

    #[test]
    fn test_provider_prepended_once() {
        let normalized = normalize_model_id(Some("claude-opus-4-20250514")).unwrap();
        assert_eq!(normalized.matches("anthropic/").count(), 1);
    }

    #[test]
    fn test_provider_for() {
        assert_eq!(provider_for("claude-3-5-haiku-latest"), Some("anthropic"));
        assert_eq!(provider_for("o3-mini"), Some("openai"));
        assert_eq!(provider_for("llama3.1"), None);
    }
}
