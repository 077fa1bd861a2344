//! Final report assembly: status, summary sentence, metadata. Pure
//! aggregation over already-classified entries.

use chrono::{DateTime, Utc};
use plantriage_types::{
    ErrorCategory, ErrorEntry, Metadata, PlanReport, ReportStatus, ResourceCount,
};

pub fn assemble(
    errors: Vec<ErrorEntry>,
    resource_count: ResourceCount,
    timestamp: DateTime<Utc>,
) -> PlanReport {
    let status = if errors.is_empty() {
        ReportStatus::Ok
    } else {
        ReportStatus::Error
    };

    PlanReport {
        status,
        summary: summarize(&errors),
        errors,
        metadata: Metadata {
            timestamp,
            resource_count,
        },
    }
}

fn summarize(errors: &[ErrorEntry]) -> String {
    if errors.is_empty() {
        return "Your Terraform plan looks good! No errors were detected.".to_string();
    }

    let count = errors.len();
    let plural = if count == 1 { "issue" } else { "issues" };

    match most_frequent_category(errors) {
        Some(category) => format!(
            "Found {count} {plural} in your Terraform plan. Most are related to {} problems. Check the recommendations for solutions.",
            category.as_str()
        ),
        None => format!(
            "Found {count} {plural} in your Terraform plan. Check the recommendations for solutions."
        ),
    }
}

/// Frequency count over the entry sequence; ties resolve to the category
/// seen first, keeping the summary deterministic.
fn most_frequent_category(errors: &[ErrorEntry]) -> Option<ErrorCategory> {
    let mut counts: Vec<(ErrorCategory, usize)> = Vec::new();
    for entry in errors {
        match counts.iter_mut().find(|(c, _)| *c == entry.error_type) {
            Some((_, n)) => *n += 1,
            None => counts.push((entry.error_type, 1)),
        }
    }

    let mut best: Option<(ErrorCategory, usize)> = None;
    for (category, n) in counts {
        if best.map(|(_, m)| n > m).unwrap_or(true) {
            best = Some((category, n));
        }
    }
    best.map(|(category, _)| category)
}
