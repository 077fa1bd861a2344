//! Analysis pipeline: turn raw `terraform plan` output into a structured
//! triage report.
//!
//! This crate owns *what* the plan text means. It does not read files or
//! print anything; the CLI crate owns the boundary. The pipeline is a pure
//! function of its input: segment the text, classify each segment against
//! the read-only pattern catalog, extract affected resources, synthesize
//! recommendations, and assemble the report.

pub mod assemble;
pub mod catalog;
pub mod classify;
pub mod metadata;
pub mod recommend;
pub mod resources;
pub mod segment;

use chrono::{DateTime, Utc};
use plantriage_types::{ErrorEntry, PlanReport};
use tracing::debug;

/// Analyze plan output, stamping the report with the current time.
pub fn analyze(plan_text: &str) -> PlanReport {
    analyze_at(plan_text, Utc::now())
}

/// Analyze plan output with a caller-supplied report timestamp.
///
/// Everything except the timestamp is a deterministic function of
/// `plan_text`, so two calls with the same arguments produce byte-identical
/// serialized reports.
pub fn analyze_at(plan_text: &str, timestamp: DateTime<Utc>) -> PlanReport {
    let resource_count = metadata::extract_resource_count(plan_text);

    let mut errors: Vec<ErrorEntry> = Vec::new();
    for segment in segment::split_segments(plan_text) {
        let Some(classification) = classify::classify(&segment) else {
            continue;
        };

        let affected_resources = resources::extract_resources(&segment.text, Some(&classification));
        let message = classify::normalize_message(&segment.text, classification.category);
        let recommendations =
            recommend::recommendations_for(&classification, &affected_resources, &message);

        errors.push(ErrorEntry {
            error_type: classification.category,
            message,
            affected_resources,
            recommendations,
        });
    }

    debug!(errors = errors.len(), "assembling report");
    assemble::assemble(errors, resource_count, timestamp)
}
