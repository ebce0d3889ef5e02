//! Field extraction from merge commit messages.
//!
//! Every extractor tolerates a missing field and returns a neutral value
//! instead of failing, since upstream messages are not uniformly formatted.

use crate::domain::commit::MERGE_MARKER;

const PULL_REQUEST_MARKER: &str = "Merge pull request #";
const COMPONENT_MARKER: &str = "Component: ";
const UPSTREAM_COMMIT_MARKER: &str = "Upstream-commit:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMetadata {
    pub pr_number: Option<i64>,
    pub component: String,
    pub title: String,
}

impl CommitMetadata {
    pub fn extract(message: &str) -> Self {
        Self {
            pr_number: pull_request_number(message),
            component: component(message),
            title: title(message),
        }
    }
}

/// Number following `Merge pull request #`.
///
/// A marker with no digits after it, or digits that overflow, yields `Some(0)`.
pub fn pull_request_number(message: &str) -> Option<i64> {
    let start = message.find(PULL_REQUEST_MARKER)? + PULL_REQUEST_MARKER.len();
    let digits: String = message[start..]
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    Some(digits.parse().unwrap_or(0))
}

pub fn component(message: &str) -> String {
    let Some(index) = message.find(COMPONENT_MARKER) else {
        return String::new();
    };
    let rest = &message[index + COMPONENT_MARKER.len()..];
    rest.lines().next().unwrap_or_default().trim().to_string()
}

/// Summary line of the upstream change, with its first letter capitalised.
///
/// The summary sits right above the `Upstream-commit:` trailer. Blank lines
/// and component trailers placed between the two are skipped, but the scan
/// never reaches into the two-line merge header.
pub fn title(message: &str) -> String {
    let lines: Vec<&str> = message.split('\n').collect();
    let Some(marker) = lines
        .iter()
        .position(|line| line.trim().starts_with(UPSTREAM_COMMIT_MARKER))
    else {
        return String::new();
    };

    let floor = if lines[0].contains(MERGE_MARKER) {
        marker.min(2)
    } else {
        0
    };
    let summary = lines[floor..marker]
        .iter()
        .rev()
        .map(|line| line.trim())
        .find(|line| !line.is_empty() && !line.starts_with(COMPONENT_MARKER.trim_end()))
        .unwrap_or_default();

    capitalize(summary)
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
