//! The two history walks: one over the already released revision to learn
//! which changes it contains, one over the new revision to find merged pull
//! requests that are not in it yet.

use std::collections::{BTreeMap, HashMap};

use crate::domain::commit::{Commit, CommitHash};
use crate::error::AppResult;
use crate::services::CommitSource;

/// Signatures of every commit reachable from the released revision.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    signatures: HashMap<String, CommitHash>,
}

impl ExclusionSet {
    /// Walks the full ancestry of `start`, merges and plain commits alike.
    /// Aborts on the first traversal error.
    pub fn build(source: &dyn CommitSource, start: &CommitHash) -> AppResult<Self> {
        let mut signatures = HashMap::new();
        for commit in source.history(start)? {
            let commit = commit?;
            signatures.insert(commit.signature().to_string(), commit.hash);
        }
        Ok(Self { signatures })
    }

    pub fn contains(&self, signature: &str) -> bool {
        self.signatures.contains_key(signature)
    }

    /// Commit that last recorded `signature` during the walk.
    pub fn get(&self, signature: &str) -> Option<&CommitHash> {
        self.signatures.get(signature)
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }
}

/// Merge commits reachable from `start` whose signature is not excluded,
/// keyed by hash.
pub fn collect_candidates(
    source: &dyn CommitSource,
    start: &CommitHash,
    exclusions: &ExclusionSet,
) -> AppResult<BTreeMap<CommitHash, Commit>> {
    let mut candidates = BTreeMap::new();
    for commit in source.history(start)? {
        let commit = commit?;
        if !commit.is_merge() {
            continue;
        }
        if exclusions.contains(commit.signature()) {
            tracing::debug!(
                commit = %commit.hash,
                released = ?exclusions.get(commit.signature()),
                signature = commit.signature(),
                "already released"
            );
            continue;
        }
        candidates.insert(commit.hash.clone(), commit);
    }
    Ok(candidates)
}
