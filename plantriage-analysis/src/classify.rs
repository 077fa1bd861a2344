//! First-match-wins classification of segments against the pattern catalog.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use plantriage_types::ErrorCategory;
use regex::Regex;
use tracing::debug;

use crate::catalog;
use crate::segment::Segment;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category: ErrorCategory,
    pub matcher_id: &'static str,
    pub captures: BTreeMap<String, String>,
}

/// Classify one segment. Categories are tried in catalog priority order and
/// the first matcher that hits wins; there is no scoring across categories.
///
/// Segments no matcher recognizes are retained as `unknown` only when they
/// carry an `Error:` marker; warning-only noise is dropped (`None`).
pub fn classify(segment: &Segment) -> Option<Classification> {
    for rules in catalog::catalog() {
        for matcher in &rules.matchers {
            if let Some(captures) = matcher.captures(&segment.text) {
                debug!(
                    category = rules.category.as_str(),
                    matcher = matcher.id,
                    "classified segment"
                );
                return Some(Classification {
                    category: rules.category,
                    matcher_id: matcher.id,
                    captures,
                });
            }
        }
    }

    if segment.has_error_marker() {
        debug!("unmatched segment retained as unknown");
        return Some(Classification {
            category: ErrorCategory::Unknown,
            matcher_id: "unknown",
            captures: BTreeMap::new(),
        });
    }

    debug!("unmatched warning segment dropped");
    None
}

static MARKER_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:Error|Warning):\s+").expect("built-in pattern must compile"));
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("built-in pattern must compile"));

/// Normalize a segment into the report's human-readable message: strip the
/// diagnostic marker, collapse whitespace, and prepend a category-specific
/// preamble.
pub fn normalize_message(segment_text: &str, category: ErrorCategory) -> String {
    let stripped = MARKER_PREFIX_RE.replace(segment_text, "");
    let cleaned = WHITESPACE_RE.replace_all(stripped.trim(), " ").into_owned();

    match category {
        ErrorCategory::Permission => {
            format!("You don't have sufficient permissions: {cleaned}")
        }
        ErrorCategory::Dependency => format!("There's a dependency issue: {cleaned}"),
        ErrorCategory::Syntax => {
            format!("There's a syntax error in your configuration: {cleaned}")
        }
        ErrorCategory::ResourceConflict => format!("Resource conflict detected: {cleaned}"),
        ErrorCategory::State => format!(
            "The Terraform state doesn't match the actual infrastructure: {cleaned}"
        ),
        ErrorCategory::Provider => {
            format!("There's an issue with the provider configuration: {cleaned}")
        }
        ErrorCategory::Module => format!("There's an issue with a module: {cleaned}"),
        ErrorCategory::Validation | ErrorCategory::Unknown => cleaned,
    }
}
