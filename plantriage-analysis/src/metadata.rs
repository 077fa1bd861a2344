//! Extraction of the plan's resource-count summary line.

use std::sync::LazyLock;

use plantriage_types::ResourceCount;
use regex::Regex;

static PLAN_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*Plan:(?P<rest>.*)$").expect("built-in pattern must compile"));
static ADD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+) to add").expect("built-in pattern must compile"));
static CHANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+) to change").expect("built-in pattern must compile"));
static DESTROY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+) to destroy").expect("built-in pattern must compile"));

/// Parse `Plan: N to add, N to change, N to destroy.` out of the plan text.
/// Each count defaults to zero when the summary line is absent or the
/// position is missing; this never fails.
pub fn extract_resource_count(plan_text: &str) -> ResourceCount {
    let Some(caps) = PLAN_LINE_RE.captures(plan_text) else {
        return ResourceCount::default();
    };
    let line = &caps["rest"];

    ResourceCount {
        add: count_in(&ADD_RE, line),
        change: count_in(&CHANGE_RE, line),
        destroy: count_in(&DESTROY_RE, line),
    }
}

fn count_in(re: &Regex, line: &str) -> u64 {
    re.captures(line)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}
