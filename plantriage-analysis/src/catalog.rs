//! The classification knowledge base: an ordered registry of categories and
//! their matchers.
//!
//! Order is load-bearing twice over. Categories are tried in a fixed
//! priority order (permission first since it is unambiguous, syntax and
//! validation before the generic dependency patterns, provider and module
//! catch-alls last), and matchers within a category run most-specific
//! first. The table is built once behind a `LazyLock` and shared read-only
//! across all analysis calls.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use plantriage_types::ErrorCategory;
use regex::Regex;

pub struct CategoryRules {
    pub category: ErrorCategory,
    pub matchers: Vec<Matcher>,
}

/// A text pattern with named capture slots used to both classify a segment
/// and extract data from it.
pub struct Matcher {
    pub id: &'static str,
    pub regex: Regex,
}

impl Matcher {
    /// Run the pattern and collect its named captures. Group order in the
    /// map is alphabetical, which keeps downstream output deterministic.
    pub fn captures(&self, text: &str) -> Option<BTreeMap<String, String>> {
        let caps = self.regex.captures(text)?;
        let mut out = BTreeMap::new();
        for name in self.regex.capture_names().flatten() {
            if let Some(value) = caps.name(name) {
                out.insert(name.to_string(), value.as_str().to_string());
            }
        }
        Some(out)
    }
}

static CATALOG: LazyLock<Vec<CategoryRules>> = LazyLock::new(build_catalog);

pub fn catalog() -> &'static [CategoryRules] {
    &CATALOG
}

fn matcher(id: &'static str, pattern: &str) -> Matcher {
    Matcher {
        id,
        regex: Regex::new(pattern).expect("built-in pattern must compile"),
    }
}

fn build_catalog() -> Vec<CategoryRules> {
    vec![
        CategoryRules {
            category: ErrorCategory::Permission,
            matchers: vec![
                matcher(
                    "permission.denied",
                    r"(?i)access denied|permission denied|not authorized|unauthorized|forbidden",
                ),
                matcher(
                    "permission.credentials",
                    r"(?i)credential|authentication",
                ),
            ],
        },
        CategoryRules {
            category: ErrorCategory::Syntax,
            matchers: vec![
                matcher(
                    "syntax.unsupported_resource_type",
                    r#"(?i)does not support resource type "(?P<resource_type>[^"]+)"\.\s*did you mean "(?P<suggestion>[^"]+)""#,
                ),
                matcher(
                    "syntax.invalid_block",
                    r"(?i)invalid block definition|unsupported block type",
                ),
                matcher("syntax.error", r"(?i)syntax error"),
                matcher("syntax.unbalanced", r#"(?i)unexpected ["\)]|expected ["\(]"#),
            ],
        },
        CategoryRules {
            category: ErrorCategory::Validation,
            matchers: vec![
                matcher(
                    "validation.required_argument",
                    r#"(?i)the argument "(?P<field>[^"]+)" is required"#,
                ),
                matcher("validation.failed", r"(?i)validation failed"),
                matcher("validation.required_field", r"(?i)required field is not set"),
                matcher("validation.one_of", r"(?i)value must be one of"),
                matcher("validation.at_least", r"(?i)must contain at least"),
                matcher(
                    "validation.expected_but_got",
                    r"(?i)expected\s+(?P<expected>.+?)\s+but\s+got",
                ),
                matcher(
                    "validation.invalid_value",
                    r#"(?i)invalid value(?:\s+for\s+"?(?P<field>[^":,.]+))?"#,
                ),
            ],
        },
        CategoryRules {
            category: ErrorCategory::Dependency,
            matchers: vec![
                matcher(
                    "dependency.undeclared_resource",
                    r#"(?i)a (?:managed|data) resource "(?P<resource_type>[^"]+)" "(?P<resource_name>[^"]+)" has not been declared"#,
                ),
                matcher(
                    "dependency.unknown_resource",
                    r"(?i)unknown resource '(?P<reference>[^']+)'",
                ),
                matcher(
                    "dependency.undeclared_reference",
                    r"(?i)reference to undeclared (?:resource|input variable|local value)",
                ),
                matcher("dependency.cycle", r"(?i)\bcycle\b|cyclic dependency"),
                matcher(
                    "dependency.unresolved",
                    r"(?i)cannot resolve|depends on resource",
                ),
            ],
        },
        CategoryRules {
            category: ErrorCategory::ResourceConflict,
            matchers: vec![
                matcher("conflict.already_exists", r"(?i)already exists"),
                matcher(
                    "conflict.conflicts_with",
                    r"(?i)conflicts with|duplicate (?:resource|name|entry)",
                ),
                matcher("conflict.in_use", r"(?i)\bin use\b"),
            ],
        },
        CategoryRules {
            category: ErrorCategory::State,
            matchers: vec![
                matcher(
                    "state.out_of_date",
                    r"(?i)state is out of date|stale state|state lock",
                ),
                matcher("state.drift", r"(?i)drift detected"),
                matcher("state.importing", r"(?i)\bimporting\b"),
                matcher("state.mismatch", r"(?i)does not match"),
            ],
        },
        CategoryRules {
            category: ErrorCategory::Provider,
            matchers: vec![
                matcher(
                    "provider.install",
                    r"(?i)failed to (?:install|query) provider|could not retrieve the list of available versions",
                ),
                matcher("provider.registry", r"(?i)registry\.terraform\.io"),
                matcher("provider.plugin", r"(?i)\bplugin\b"),
                matcher("provider.generic", r"(?i)\bproviders?\b"),
            ],
        },
        CategoryRules {
            category: ErrorCategory::Module,
            matchers: vec![
                matcher(
                    "module.not_installed",
                    r"(?i)module (?:is )?not (?:yet )?installed|unreadable module",
                ),
                matcher("module.source", r"(?i)module source"),
                matcher("module.version", r"(?i)version constraint"),
                matcher("module.generic", r#"(?i)\bmodule "[^"]+""#),
            ],
        },
    ]
}
