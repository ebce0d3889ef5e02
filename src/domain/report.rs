use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::domain::classifier::{Classifier, TypeMarker};
use crate::domain::metadata::CommitMetadata;
use crate::domain::registry::{RepoRegistry, pull_request_url};

/// Rendered in place of a missing pull request number.
const MISSING_PR_NUMBER: i64 = -1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEntry {
    pub title: String,
    pub pr_number: Option<i64>,
    pub component: String,
    pub section: String,
    pub marker: TypeMarker,
    pub rendered_line: String,
}

impl ChangeEntry {
    /// Classifies and renders one change. Returns `None` when the component
    /// has no registered repository.
    pub fn build(
        metadata: CommitMetadata,
        classifier: &Classifier,
        registry: &RepoRegistry,
    ) -> Option<Self> {
        let classification = classifier.classify(&metadata.title);
        let repository = registry.repository(&metadata.component)?;

        let number = metadata.pr_number.unwrap_or(MISSING_PR_NUMBER);
        let rendered_line = format!(
            "{} {} [{repository}#{number}]({})",
            classification.marker,
            metadata.title,
            pull_request_url(repository, number),
        );

        Some(Self {
            title: metadata.title,
            pr_number: metadata.pr_number,
            component: metadata.component,
            section: classification.section,
            marker: classification.marker,
            rendered_line,
        })
    }
}

/// Rendered lines grouped by section name.
#[derive(Debug, Clone, Default)]
pub struct SectionMap {
    sections: BTreeMap<String, Vec<String>>,
}

impl SectionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entry: ChangeEntry) {
        self.sections
            .entry(entry.section)
            .or_default()
            .push(entry.rendered_line);
    }

    pub fn len(&self) -> usize {
        self.sections.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Markdown report with sections and their lines in ascending order.
    pub fn render(&self, notice: &str, title: &str) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(out, "# Changelog");
        let _ = writeln!(out);
        let _ = writeln!(out, "{notice}");
        let _ = writeln!(out);
        let _ = writeln!(out, "## {title}");

        let mut names: Vec<&String> = self.sections.keys().collect();
        names.sort();
        for name in names {
            let mut lines = self.sections[name].clone();
            lines.sort();

            let _ = writeln!(out);
            let _ = writeln!(out, "### {}", title_case(name));
            let _ = writeln!(out);
            for line in lines {
                let _ = writeln!(out, "{line}");
            }
        }
        out
    }
}

/// Upper-cases the first letter of every word. ASCII characters other than
/// letters, digits and `_` separate words, as does any whitespace; non-ASCII
/// punctuation belongs to the word it touches.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if at_word_start {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        at_word_start = is_word_separator(ch);
    }
    out
}

fn is_word_separator(ch: char) -> bool {
    if ch.is_ascii() {
        return !(ch.is_ascii_alphanumeric() || ch == '_');
    }
    ch.is_whitespace()
}
