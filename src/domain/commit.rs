use std::fmt;

/// Substring that marks a commit as a merged pull request.
pub const MERGE_MARKER: &str = "Merge pull request";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CommitHash(pub String);

impl CommitHash {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommitHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub hash: CommitHash,
    pub message: String,
}

impl Commit {
    pub fn new(hash: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            hash: CommitHash(hash.into()),
            message: message.into(),
        }
    }

    pub fn is_merge(&self) -> bool {
        self.message.contains(MERGE_MARKER)
    }

    /// Key used to recognise the same logical change across two histories.
    ///
    /// Merge commits carry a two-line `Merge pull request #N from X` header,
    /// so their third line is the first line of the merged change. When the
    /// message is shorter than that, the first line is used instead.
    pub fn signature(&self) -> &str {
        let mut lines = self.message.split('\n');
        let first = lines.next().unwrap_or_default();
        if !self.is_merge() {
            return first;
        }
        lines.nth(1).unwrap_or(first)
    }
}
