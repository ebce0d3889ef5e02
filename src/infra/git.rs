use std::path::Path;

use git2::{Oid, Repository, Sort};

use crate::domain::commit::{Commit, CommitHash};
use crate::error::{AppError, AppResult};
use crate::services::{CommitSource, History};

/// Commit source backed by an on-disk git repository.
pub struct GitRepository {
    repo: Repository,
}

impl GitRepository {
    /// Opens the repository containing `path`, searching parent directories.
    pub fn discover(path: &Path) -> AppResult<Self> {
        let repo = Repository::discover(path).map_err(|err| {
            AppError::History(format!(
                "cannot open repository at {}: {}",
                path.display(),
                err.message()
            ))
        })?;
        Ok(Self { repo })
    }

    fn read_commit(&self, oid: Oid) -> AppResult<Commit> {
        let commit = self.repo.find_commit(oid).map_err(history_error)?;
        let message = String::from_utf8_lossy(commit.message_bytes()).into_owned();
        Ok(Commit::new(oid.to_string(), message))
    }
}

impl CommitSource for GitRepository {
    fn resolve(&self, revision: &str) -> AppResult<CommitHash> {
        let object = self.repo.revparse_single(revision).map_err(|err| {
            AppError::Revision(format!("cannot resolve '{revision}': {}", err.message()))
        })?;
        let commit = object.peel_to_commit().map_err(|err| {
            AppError::Revision(format!(
                "'{revision}' does not point to a commit: {}",
                err.message()
            ))
        })?;
        Ok(CommitHash(commit.id().to_string()))
    }

    fn history(&self, start: &CommitHash) -> AppResult<History<'_>> {
        let oid = Oid::from_str(start.as_str()).map_err(history_error)?;
        let mut walk = self.repo.revwalk().map_err(history_error)?;
        walk.set_sorting(Sort::TIME).map_err(history_error)?;
        walk.push(oid).map_err(history_error)?;

        Ok(Box::new(walk.map(move |next| {
            let oid = next.map_err(history_error)?;
            self.read_commit(oid)
        })))
    }
}

fn history_error(err: git2::Error) -> AppError {
    AppError::History(err.message().to_string())
}
