use crate::domain::commit::{Commit, CommitHash};
use crate::error::AppResult;

pub type History<'a> = Box<dyn Iterator<Item = AppResult<Commit>> + 'a>;

/// Read access to a commit graph.
pub trait CommitSource {
    /// Resolves a revision expression (branch, tag, hash) to a commit.
    fn resolve(&self, revision: &str) -> AppResult<CommitHash>;

    /// Lazily walks `start` and all of its ancestors, newest first, following
    /// every parent. Each commit is yielded once.
    fn history(&self, start: &CommitHash) -> AppResult<History<'_>>;
}
