//! Shared DTOs (schemas-as-code) for the plantriage workspace.
//!
//! # Design constraints
//! - These types serialize to the report shape consumed by automation
//!   pipelines. Field names and nesting are fixed for compatibility.
//! - Be conservative with breaking changes.
//! - Prefer adding optional fields over changing semantics.

pub mod report;

pub use report::{
    AffectedResource, Confidence, ErrorCategory, ErrorEntry, Metadata, PlanReport,
    Recommendation, ReportStatus, ResourceCount,
};
