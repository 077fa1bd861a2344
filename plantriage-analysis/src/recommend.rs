//! Recommendation synthesis: per-category template sets with static
//! confidence levels.
//!
//! Confidence is a property of the template, never computed from the input,
//! so identical input always yields identical output. Code snippets are
//! attached only where the fix is mechanical (a command or a fill-in block);
//! judgment calls ship as prose.

use plantriage_types::{AffectedResource, Confidence, Recommendation};

use crate::classify::Classification;

/// Produce the ordered recommendation list for one classified error.
/// Highest confidence first; ties keep template declaration order.
pub fn recommendations_for(
    classification: &Classification,
    resources: &[AffectedResource],
    message: &str,
) -> Vec<Recommendation> {
    use plantriage_types::ErrorCategory::*;

    let mut recs = match classification.category {
        Validation => for_validation(classification, resources),
        Dependency => for_dependency(classification),
        Permission => for_permission(message),
        Syntax => for_syntax(classification),
        ResourceConflict => for_conflict(resources, message),
        State => for_state(resources),
        Provider => for_provider(message),
        Module => for_module(message),
        Unknown => for_unknown(),
    };

    // Stable sort; Confidence orders most-confident-first.
    recs.sort_by_key(|r| r.confidence);
    recs
}

fn rec(description: String, confidence: Confidence) -> Recommendation {
    Recommendation {
        description,
        confidence,
        code: None,
    }
}

fn rec_code(description: String, confidence: Confidence, code: &str) -> Recommendation {
    Recommendation {
        description,
        confidence,
        code: Some(code.to_string()),
    }
}

fn placeholder_address(resources: &[AffectedResource]) -> (String, String) {
    match resources.first() {
        Some(r) => (r.type_.clone(), r.name.clone()),
        None => ("resource_type".to_string(), "name".to_string()),
    }
}

fn for_validation(
    classification: &Classification,
    resources: &[AffectedResource],
) -> Vec<Recommendation> {
    let field = classification.captures.get("field");
    let expected = classification.captures.get("expected");

    if let Some(field) = field
        && classification.matcher_id == "validation.required_argument"
    {
        let (type_, _) = placeholder_address(resources);
        let snippet = format!(
            "resource \"{type_}\" \"name\" {{\n  {field} = \"value\"\n  # ... other configuration ...\n}}"
        );
        return vec![rec_code(
            format!("Add the required '{field}' argument to your {type_} configuration"),
            Confidence::High,
            &snippet,
        )];
    }

    if let Some(expected) = expected {
        return vec![rec(
            format!("Update the value to match the expected form: {expected}"),
            Confidence::High,
        )];
    }

    if let Some(field) = field {
        return vec![rec(
            format!(
                "Check the documentation for valid values of '{field}' and update your configuration accordingly"
            ),
            Confidence::Medium,
        )];
    }

    vec![rec(
        "Review the reported validation rule and update your configuration to satisfy it"
            .to_string(),
        Confidence::Medium,
    )]
}

fn for_dependency(classification: &Classification) -> Vec<Recommendation> {
    let captures = &classification.captures;

    if let (Some(type_), Some(name)) =
        (captures.get("resource_type"), captures.get("resource_name"))
    {
        let snippet = format!("resource \"{type_}\" \"{name}\" {{\n  # ...\n}}");
        return vec![
            rec_code(
                format!(
                    "Declare the missing resource \"{type_}\" \"{name}\" or correct the reference if it is misspelled"
                ),
                Confidence::High,
                &snippet,
            ),
            rec(
                format!("Ensure that {type_}.{name} is defined in the correct module scope"),
                Confidence::Medium,
            ),
        ];
    }

    if let Some(reference) = captures.get("reference") {
        return vec![
            rec(
                format!(
                    "Define the missing resource '{reference}' or correct the reference if it is misspelled"
                ),
                Confidence::High,
            ),
            rec(
                format!("Ensure that '{reference}' is in the correct module scope"),
                Confidence::Medium,
            ),
        ];
    }

    if classification.matcher_id == "dependency.cycle" {
        return vec![
            rec(
                "Break the circular dependency between resources by restructuring your configuration"
                    .to_string(),
                Confidence::Medium,
            ),
            rec_code(
                "Consider routing the shared value through a local to break the cycle".to_string(),
                Confidence::Medium,
                "locals {\n  intermediate_value = \"something\"\n}\n\nresource \"type\" \"name\" {\n  property = local.intermediate_value\n}",
            ),
        ];
    }

    vec![
        rec(
            "Check that all referenced resources exist and are correctly spelled".to_string(),
            Confidence::Medium,
        ),
        rec_code(
            "Make dependencies explicit with depends_on where ordering matters".to_string(),
            Confidence::Medium,
            "resource \"type\" \"name\" {\n  # ...\n  depends_on = [\n    resource.dependency\n  ]\n}",
        ),
    ]
}

fn for_permission(message: &str) -> Vec<Recommendation> {
    let mut recs = vec![rec(
        "Check that your credentials have sufficient permissions for this operation".to_string(),
        Confidence::High,
    )];

    if message.contains("AWS") || message.contains("IAM") || message.contains("arn:aws") {
        recs.push(rec_code(
            "Ensure your AWS IAM user or role can manage the affected resources".to_string(),
            Confidence::Medium,
            "{\n  \"Version\": \"2012-10-17\",\n  \"Statement\": [\n    {\n      \"Effect\": \"Allow\",\n      \"Action\": [\n        \"service:Action\"\n      ],\n      \"Resource\": \"*\"\n    }\n  ]\n}",
        ));
    } else if message.contains("Azure") || message.contains("Microsoft") {
        recs.push(rec_code(
            "Check that your Azure service principal has the required role assignments".to_string(),
            Confidence::Medium,
            "az role assignment create --assignee \"$CLIENT_ID\" --role \"Contributor\" --scope \"/subscriptions/$SUBSCRIPTION_ID\"",
        ));
    }

    recs.push(rec(
        "Verify that your authentication credentials are correct and not expired".to_string(),
        Confidence::Medium,
    ));
    recs
}

fn for_syntax(classification: &Classification) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    if let (Some(wrong), Some(suggestion)) = (
        classification.captures.get("resource_type"),
        classification.captures.get("suggestion"),
    ) {
        recs.push(rec(
            format!(
                "Replace the unsupported resource type \"{wrong}\" with \"{suggestion}\""
            ),
            Confidence::High,
        ));
    }

    recs.push(rec_code(
        "Run 'terraform fmt' to automatically fix minor syntax issues".to_string(),
        Confidence::High,
        "terraform fmt",
    ));
    recs.push(rec(
        "Check the HCL syntax documentation for proper formatting".to_string(),
        Confidence::Medium,
    ));
    recs
}

fn for_conflict(resources: &[AffectedResource], message: &str) -> Vec<Recommendation> {
    let (type_, name) = placeholder_address(resources);
    let mut recs = Vec::new();

    if message.contains("already exists") {
        recs.push(rec_code(
            "Import the existing resource into your Terraform state instead of creating a new one"
                .to_string(),
            Confidence::High,
            &format!("terraform import {type_}.{name} <resource_id>"),
        ));
        recs.push(rec(
            format!("Use a different name for your {type_} to avoid the conflict"),
            Confidence::Medium,
        ));
    } else if message.contains("in use") {
        recs.push(rec(
            "Identify and remove the dependency on this resource before making changes".to_string(),
            Confidence::Medium,
        ));
    }

    recs.push(rec_code(
        "If the conflicting resource no longer exists, remove it from state".to_string(),
        Confidence::Low,
        &format!("terraform state rm {type_}.{name}"),
    ));
    recs
}

fn for_state(resources: &[AffectedResource]) -> Vec<Recommendation> {
    let (type_, name) = placeholder_address(resources);

    vec![
        rec_code(
            "Refresh the Terraform state to match the current real infrastructure".to_string(),
            Confidence::High,
            "terraform refresh",
        ),
        rec_code(
            "Import the existing resource into your Terraform state".to_string(),
            Confidence::Medium,
            &format!("terraform import {type_}.{name} <resource_id>"),
        ),
        rec(
            "If the resource was modified manually, update your configuration to match".to_string(),
            Confidence::Medium,
        ),
    ]
}

fn for_provider(message: &str) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    if message.contains("version") {
        recs.push(rec_code(
            "Update the provider version constraint in your required_providers block".to_string(),
            Confidence::High,
            "terraform {\n  required_providers {\n    aws = {\n      source  = \"hashicorp/aws\"\n      version = \"~> 4.0\"\n    }\n  }\n}",
        ));
    } else if message.contains("plugin") {
        recs.push(rec_code(
            "Reinstall the provider plugin".to_string(),
            Confidence::High,
            "terraform init -upgrade",
        ));
    }

    recs.push(rec(
        "Check your provider configuration for missing required attributes".to_string(),
        Confidence::Medium,
    ));
    recs
}

fn for_module(message: &str) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    if message.contains("source") {
        recs.push(rec_code(
            "Check that the module source is correct and accessible".to_string(),
            Confidence::High,
            "module \"example\" {\n  source  = \"hashicorp/consul/aws\"\n  version = \"0.1.0\"\n}",
        ));
    } else if message.contains("version") {
        recs.push(rec_code(
            "Update the module version constraint to a compatible version".to_string(),
            Confidence::High,
            "module \"example\" {\n  source  = \"hashicorp/consul/aws\"\n  version = \"~> 0.1.0\"\n}",
        ));
    }

    recs.push(rec_code(
        "Run terraform init to download any missing modules".to_string(),
        Confidence::Medium,
        "terraform init",
    ));
    recs
}

fn for_unknown() -> Vec<Recommendation> {
    vec![
        rec(
            "Check the Terraform documentation for this specific error message".to_string(),
            Confidence::Medium,
        ),
        rec_code(
            "Run 'terraform validate' for more detailed error information".to_string(),
            Confidence::Medium,
            "terraform validate",
        ),
        rec(
            "Make sure you're using a Terraform version compatible with your configuration"
                .to_string(),
            Confidence::Low,
        ),
    ]
}
