//! Extraction of affected resources from a segment, independent of which
//! category matched.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use plantriage_types::AffectedResource;
use regex::Regex;

use crate::classify::Classification;

/// Address-shaped token: optional `module.<name>.` qualifiers followed by a
/// provider-style resource type (always contains an underscore, which keeps
/// ordinary prose like `main.tf` or `e.g.` out) and a resource name.
static ADDRESS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:module\.[A-Za-z_][A-Za-z0-9_-]*\.)*(?P<type>[a-z][a-z0-9]*_[a-z0-9_]+)\.(?P<name>[A-Za-z_][A-Za-z0-9_-]*)\b",
    )
    .expect("built-in pattern must compile")
});

/// Derive the affected resources for one segment. An explicit resource
/// reference captured by the classifier takes precedence and is merged with
/// the text scan; entries are de-duplicated by address, first seen wins.
pub fn extract_resources(
    segment_text: &str,
    classification: Option<&Classification>,
) -> Vec<AffectedResource> {
    let mut out = Vec::new();
    let mut seen = BTreeSet::new();

    if let Some(c) = classification
        && let (Some(type_), Some(name)) = (
            c.captures.get("resource_type"),
            c.captures.get("resource_name"),
        )
    {
        let resource = AffectedResource::from_parts(type_.clone(), name.clone());
        seen.insert(resource.address.clone());
        out.push(resource);
    }

    for caps in ADDRESS_RE.captures_iter(segment_text) {
        let address = caps.get(0).map(|m| m.as_str().to_string()).unwrap_or_default();
        if address.is_empty() || !seen.insert(address.clone()) {
            continue;
        }
        out.push(AffectedResource {
            name: caps["name"].to_string(),
            type_: caps["type"].to_string(),
            address,
        });
    }

    out
}
