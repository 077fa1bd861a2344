use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The analysis artifact. Created fresh per analysis call, never mutated
/// after assembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanReport {
    pub status: ReportStatus,
    pub summary: String,

    #[serde(default)]
    pub errors: Vec<ErrorEntry>,

    pub metadata: Metadata,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Ok,
    Error,
}

/// Fixed classification label for an error found in the plan output.
///
/// The wire tokens are part of the report schema; the catalog's priority
/// order lives in `plantriage-analysis`, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Validation,
    Dependency,
    Permission,
    Syntax,
    ResourceConflict,
    State,
    Provider,
    Module,
    Unknown,
}

impl ErrorCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCategory::Validation => "validation",
            ErrorCategory::Dependency => "dependency",
            ErrorCategory::Permission => "permission",
            ErrorCategory::Syntax => "syntax",
            ErrorCategory::ResourceConflict => "resource_conflict",
            ErrorCategory::State => "state",
            ErrorCategory::Provider => "provider",
            ErrorCategory::Module => "module",
            ErrorCategory::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEntry {
    pub error_type: ErrorCategory,
    pub message: String,

    #[serde(default)]
    pub affected_resources: Vec<AffectedResource>,

    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

/// A resource referenced by an error, with its canonical dotted address
/// (`type.name`, optionally module-qualified).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffectedResource {
    pub name: String,

    #[serde(rename = "type")]
    pub type_: String,

    pub address: String,
}

impl AffectedResource {
    /// Build a resource whose address is the plain `type.name` form.
    pub fn from_parts(type_: impl Into<String>, name: impl Into<String>) -> Self {
        let type_ = type_.into();
        let name = name.into();
        let address = format!("{type_}.{name}");
        Self {
            name,
            type_,
            address,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub description: String,
    pub confidence: Confidence,

    /// Example command or configuration snippet; present only when the fix
    /// is mechanical.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Static, template-assigned rank. Variant order is most-confident-first so
/// a stable sort by `Confidence` yields the required report ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Report generation time, captured at assembly, not parsed from input.
    pub timestamp: DateTime<Utc>,

    pub resource_count: ResourceCount,
}

/// Counts parsed from the plan's `Plan: N to add, ...` summary line.
/// Each defaults to zero when the summary line is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceCount {
    #[serde(default)]
    pub add: u64,

    #[serde(default)]
    pub change: u64,

    #[serde(default)]
    pub destroy: u64,
}
