use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeMarker {
    Added,
    Fixed,
    Changed,
}

impl TypeMarker {
    pub fn from_title(title: &str) -> Self {
        if title.starts_with("Add") {
            TypeMarker::Added
        } else if title.starts_with("Fix") {
            TypeMarker::Fixed
        } else {
            TypeMarker::Changed
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TypeMarker::Added => "+",
            TypeMarker::Fixed => "-",
            TypeMarker::Changed => "*",
        }
    }
}

impl fmt::Display for TypeMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Moves a title into `section` when its lower-cased form contains any keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRule {
    pub keywords: Vec<String>,
    pub section: String,
}

impl SectionRule {
    pub fn new(keywords: &[&str], section: &str) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            section: section.to_string(),
        }
    }

    fn matches(&self, lower_title: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| lower_title.contains(keyword.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub marker: TypeMarker,
    pub section: String,
}

/// Ordered keyword rules; when several rules match, the last one wins.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<SectionRule>,
    triage_section: String,
}

impl Classifier {
    pub fn new(rules: Vec<SectionRule>, triage_section: impl Into<String>) -> Self {
        Self {
            rules,
            triage_section: triage_section.into(),
        }
    }

    pub fn classify(&self, title: &str) -> Classification {
        let lower_title = title.to_lowercase();
        let mut section = self.triage_section.as_str();
        for rule in &self.rules {
            if rule.matches(&lower_title) {
                section = rule.section.as_str();
            }
        }

        Classification {
            marker: TypeMarker::from_title(title),
            section: section.to_string(),
        }
    }
}
