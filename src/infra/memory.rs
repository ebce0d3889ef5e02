use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::domain::commit::{Commit, CommitHash};
use crate::error::{AppError, AppResult};
use crate::services::{CommitSource, History};

struct Node {
    commit: Commit,
    parents: Vec<CommitHash>,
    sequence: usize,
}

/// Commit graph held in memory. Commits added later count as newer.
#[derive(Default)]
pub struct InMemoryHistory {
    nodes: HashMap<CommitHash, Node>,
    refs: HashMap<String, CommitHash>,
    corrupt: HashSet<CommitHash>,
}

impl InMemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, hash: &str, message: &str, parents: &[&str]) {
        let sequence = self.nodes.len();
        let commit = Commit::new(hash, message);
        self.nodes.insert(
            commit.hash.clone(),
            Node {
                commit,
                parents: parents.iter().map(|p| CommitHash(p.to_string())).collect(),
                sequence,
            },
        );
    }

    pub fn tag(&mut self, name: &str, hash: &str) {
        self.refs
            .insert(name.to_string(), CommitHash(hash.to_string()));
    }

    /// Makes any walk that reaches `hash` fail.
    pub fn corrupt(&mut self, hash: &str) {
        self.corrupt.insert(CommitHash(hash.to_string()));
    }
}

impl CommitSource for InMemoryHistory {
    fn resolve(&self, revision: &str) -> AppResult<CommitHash> {
        let hash = self
            .refs
            .get(revision)
            .cloned()
            .unwrap_or_else(|| CommitHash(revision.to_string()));
        if self.nodes.contains_key(&hash) {
            Ok(hash)
        } else {
            Err(AppError::Revision(format!("cannot resolve '{revision}'")))
        }
    }

    fn history(&self, start: &CommitHash) -> AppResult<History<'_>> {
        let node = self
            .nodes
            .get(start)
            .ok_or_else(|| AppError::History(format!("unknown commit {start}")))?;
        Ok(Box::new(Walk {
            graph: self,
            queue: BinaryHeap::from([(node.sequence, start.clone())]),
            seen: HashSet::from([start.clone()]),
        }))
    }
}

struct Walk<'a> {
    graph: &'a InMemoryHistory,
    queue: BinaryHeap<(usize, CommitHash)>,
    seen: HashSet<CommitHash>,
}

impl Iterator for Walk<'_> {
    type Item = AppResult<Commit>;

    fn next(&mut self) -> Option<Self::Item> {
        let (_, hash) = self.queue.pop()?;
        if self.graph.corrupt.contains(&hash) {
            self.queue.clear();
            return Some(Err(AppError::History(format!("cannot read commit {hash}"))));
        }
        let Some(node) = self.graph.nodes.get(&hash) else {
            self.queue.clear();
            return Some(Err(AppError::History(format!("missing commit {hash}"))));
        };

        for parent in &node.parents {
            if self.seen.insert(parent.clone()) {
                let sequence = self
                    .graph
                    .nodes
                    .get(parent)
                    .map_or(0, |parent| parent.sequence);
                self.queue.push((sequence, parent.clone()));
            }
        }
        Some(Ok(node.commit.clone()))
    }
}
