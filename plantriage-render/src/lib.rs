//! Rendering helpers (markdown) for human-readable reports.

use plantriage_types::{Confidence, PlanReport, ReportStatus};

pub fn render_report_md(report: &PlanReport) -> String {
    let mut out = String::new();
    out.push_str("# plantriage report\n\n");
    out.push_str(&format!("- Status: `{}`\n", status_label(report.status)));
    out.push_str(&format!("- {}\n", report.summary));
    out.push_str(&format!(
        "- Resources: {} to add, {} to change, {} to destroy\n",
        report.metadata.resource_count.add,
        report.metadata.resource_count.change,
        report.metadata.resource_count.destroy
    ));
    out.push_str(&format!(
        "- Generated: {}\n\n",
        report.metadata.timestamp.to_rfc3339()
    ));

    out.push_str("## Errors\n\n");
    if report.errors.is_empty() {
        out.push_str("_No errors found._\n");
        return out;
    }

    for (i, entry) in report.errors.iter().enumerate() {
        out.push_str(&format!(
            "### {}. {}\n\n",
            i + 1,
            entry.error_type.as_str()
        ));
        out.push_str(&format!("{}\n", entry.message));

        if !entry.affected_resources.is_empty() {
            out.push_str("\n**Affected resources**\n\n");
            for resource in &entry.affected_resources {
                out.push_str(&format!("- `{}`\n", resource.address));
            }
        }

        if !entry.recommendations.is_empty() {
            out.push_str("\n**Recommendations**\n\n");
            for rec in &entry.recommendations {
                out.push_str(&format!(
                    "- ({}) {}\n",
                    confidence_label(rec.confidence),
                    rec.description
                ));
                if let Some(code) = &rec.code {
                    out.push_str(&format!("\n  ```\n  {}\n  ```\n", indent_block(code)));
                }
            }
        }

        out.push('\n');
    }

    out
}

fn indent_block(code: &str) -> String {
    code.replace('\n', "\n  ")
}

fn status_label(status: ReportStatus) -> &'static str {
    match status {
        ReportStatus::Ok => "ok",
        ReportStatus::Error => "error",
    }
}

fn confidence_label(confidence: Confidence) -> &'static str {
    match confidence {
        Confidence::High => "high",
        Confidence::Medium => "medium",
        Confidence::Low => "low",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use plantriage_types::{
        AffectedResource, ErrorCategory, ErrorEntry, Metadata, Recommendation, ResourceCount,
    };
    use pretty_assertions::assert_eq;

    fn report(errors: Vec<ErrorEntry>) -> PlanReport {
        let status = if errors.is_empty() {
            ReportStatus::Ok
        } else {
            ReportStatus::Error
        };
        PlanReport {
            status,
            summary: "summary sentence".to_string(),
            errors,
            metadata: Metadata {
                timestamp: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
                resource_count: ResourceCount::default(),
            },
        }
    }

    #[test]
    fn empty_report_renders_placeholder() {
        let md = render_report_md(&report(vec![]));
        assert!(md.contains("- Status: `ok`"));
        assert!(md.contains("_No errors found._"));
    }

    #[test]
    fn entries_render_resources_and_recommendations() {
        let md = render_report_md(&report(vec![ErrorEntry {
            error_type: ErrorCategory::Dependency,
            message: "There's a dependency issue: missing vpc".to_string(),
            affected_resources: vec![AffectedResource::from_parts("aws_vpc", "main")],
            recommendations: vec![Recommendation {
                description: "Declare the missing resource".to_string(),
                confidence: Confidence::High,
                code: Some("terraform validate".to_string()),
            }],
        }]));

        assert!(md.contains("### 1. dependency"));
        assert!(md.contains("- `aws_vpc.main`"));
        assert!(md.contains("- (high) Declare the missing resource"));
        assert!(md.contains("terraform validate"));
    }

    #[test]
    fn status_labels_match_wire_tokens() {
        assert_eq!(status_label(ReportStatus::Ok), "ok");
        assert_eq!(status_label(ReportStatus::Error), "error");
    }
}
