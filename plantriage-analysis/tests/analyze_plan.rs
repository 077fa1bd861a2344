//! End-to-end pipeline tests against realistic plan output.

use chrono::{TimeZone, Utc};
use plantriage_analysis::{analyze, analyze_at};
use plantriage_types::{Confidence, ErrorCategory, ReportStatus, ResourceCount};
use pretty_assertions::assert_eq;

fn fixed_time() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

#[test]
fn clean_plan_yields_ok_and_no_errors() {
    let report = analyze("No changes.");
    assert_eq!(report.status, ReportStatus::Ok);
    assert!(report.errors.is_empty());
    assert_eq!(
        report.summary,
        "Your Terraform plan looks good! No errors were detected."
    );
}

#[test]
fn undeclared_resource_is_a_dependency_error_with_address() {
    let report = analyze(
        r#"Error: A managed resource "aws_vpc" "main" has not been declared in the root module."#,
    );

    assert_eq!(report.status, ReportStatus::Error);
    assert_eq!(report.errors.len(), 1);

    let entry = &report.errors[0];
    assert_eq!(entry.error_type, ErrorCategory::Dependency);
    assert!(
        entry
            .affected_resources
            .iter()
            .any(|r| r.address == "aws_vpc.main"),
        "expected aws_vpc.main in {:?}",
        entry.affected_resources
    );
    assert!(
        entry
            .recommendations
            .iter()
            .any(|r| r.confidence == Confidence::High)
    );
}

#[test]
fn resource_type_typo_is_syntax_with_terraform_fmt() {
    let report = analyze(
        r#"Error: The provider hashicorp/aws does not support resource type "aws_security_gruop". Did you mean "aws_security_group"?"#,
    );

    assert_eq!(report.errors.len(), 1);
    let entry = &report.errors[0];
    assert_eq!(entry.error_type, ErrorCategory::Syntax);

    let fmt = entry
        .recommendations
        .iter()
        .find(|r| r.code.as_deref() == Some("terraform fmt"))
        .expect("terraform fmt recommendation");
    assert_eq!(fmt.confidence, Confidence::High);
}

#[test]
fn plan_summary_line_populates_resource_counts() {
    let report = analyze("Plan: 2 to add, 0 to change, 0 to destroy.");
    assert_eq!(
        report.metadata.resource_count,
        ResourceCount {
            add: 2,
            change: 0,
            destroy: 0
        }
    );
    // The summary line itself is not an error.
    assert_eq!(report.status, ReportStatus::Ok);
}

#[test]
fn missing_summary_line_defaults_counts_to_zero() {
    let report = analyze("Error: something exploded");
    assert_eq!(report.metadata.resource_count, ResourceCount::default());
}

#[test]
fn status_error_iff_errors_nonempty() {
    let clean = analyze("No changes.");
    assert_eq!(clean.status, ReportStatus::Ok);
    assert!(clean.errors.is_empty());

    let broken = analyze("Error: permission denied while reading state");
    assert_eq!(broken.status, ReportStatus::Error);
    assert!(!broken.errors.is_empty());
}

#[test]
fn entries_preserve_document_order() {
    let input = "\
╷
│ Error: syntax error in configuration
╵

╷
│ Error: A managed resource \"aws_vpc\" \"main\" has not been declared in the root module.
╵
";
    let report = analyze(input);
    assert_eq!(report.errors.len(), 2);
    assert_eq!(report.errors[0].error_type, ErrorCategory::Syntax);
    assert_eq!(report.errors[1].error_type, ErrorCategory::Dependency);
}

#[test]
fn recommendations_are_sorted_descending_in_every_entry() {
    let input = "\
Error: bucket aws_s3_bucket.logs already exists

Error: state is out of date, please run refresh
";
    let report = analyze(input);
    assert!(!report.errors.is_empty());
    for entry in &report.errors {
        let mut sorted = entry.recommendations.clone();
        sorted.sort_by_key(|r| r.confidence);
        assert_eq!(entry.recommendations, sorted);
    }
}

#[test]
fn no_duplicate_addresses_within_an_entry() {
    let report = analyze(
        "Error: aws_vpc.main conflicts with aws_vpc.main because aws_vpc.main already exists",
    );
    assert_eq!(report.errors.len(), 1);
    let addresses: Vec<&str> = report.errors[0]
        .affected_resources
        .iter()
        .map(|r| r.address.as_str())
        .collect();
    let mut deduped = addresses.clone();
    deduped.dedup();
    assert_eq!(addresses, deduped);
    assert_eq!(addresses, vec!["aws_vpc.main"]);
}

#[test]
fn non_unknown_entries_always_carry_recommendations() {
    let input = "\
Error: validation failed for aws_instance.web

Error: access denied when creating aws_iam_role.deploy

Error: module source has changed
";
    let report = analyze(input);
    assert_eq!(report.errors.len(), 3);
    for entry in &report.errors {
        assert_ne!(entry.error_type, ErrorCategory::Unknown);
        assert!(!entry.recommendations.is_empty());
    }
}

#[test]
fn unknown_but_marked_errors_are_retained() {
    let report = analyze("Error: flux capacitor underflow");
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].error_type, ErrorCategory::Unknown);
}

#[test]
fn analysis_is_deterministic_given_a_timestamp() {
    let input = "\
╷
│ Error: A managed resource \"aws_vpc\" \"main\" has not been declared in the root module.
╵

Plan: 2 to add, 0 to change, 1 to destroy.
";
    let a = analyze_at(input, fixed_time());
    let b = analyze_at(input, fixed_time());

    let json_a = serde_json::to_string(&a).expect("serialize");
    let json_b = serde_json::to_string(&b).expect("serialize");
    assert_eq!(json_a, json_b);
}

#[test]
fn full_failing_plan_round_trip() {
    let input = "\
Terraform v1.5.4
on linux_amd64

╷
│ Error: A managed resource \"aws_vpc\" \"main\" has not been declared in the root module.
│
│   on main.tf line 14, in resource \"aws_subnet\" \"private\":
│   14:   vpc_id = aws_vpc.main.id
╵

╷
│ Error: The provider hashicorp/aws does not support resource type \"aws_security_gruop\". Did you mean \"aws_security_group\"?
╵

Plan: 3 to add, 1 to change, 0 to destroy.
";
    let report = analyze_at(input, fixed_time());

    assert_eq!(report.status, ReportStatus::Error);
    assert_eq!(report.errors.len(), 2);
    assert_eq!(report.errors[0].error_type, ErrorCategory::Dependency);
    assert_eq!(report.errors[1].error_type, ErrorCategory::Syntax);
    assert_eq!(report.metadata.resource_count.add, 3);
    assert_eq!(report.metadata.resource_count.change, 1);
    assert!(report.summary.starts_with("Found 2 issues"));

    let value = serde_json::to_value(&report).expect("serialize report");
    assert_eq!(value["status"], serde_json::json!("error"));
    assert_eq!(value["errors"][0]["errorType"], serde_json::json!("dependency"));
    assert_eq!(
        value["metadata"]["resourceCount"],
        serde_json::json!({"add": 3, "change": 1, "destroy": 0})
    );
}
