//! In-memory fakes for the log collaborator and the random source.
//!
//! `InMemoryCommitLog` and `ScriptedRandom` satisfy the trait contracts without
//! touching git or real randomness, so puzzles can be built and played
//! headlessly.

use std::collections::{BTreeMap, VecDeque};

use crate::domain::{CommitRecord, GauthordleError, Result};
use crate::git::CommitLog;
use crate::random::RandomSource;
use crate::schedule::TimeRange;

// ---------------------------------------------------------------------------
// InMemoryCommitLog
// ---------------------------------------------------------------------------

/// Commit log that returns a fixed set of commits for any time range.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCommitLog {
    commits: Vec<CommitRecord>,
    files_by_author: BTreeMap<String, Vec<String>>,
    fail_with: Option<String>,
}

impl InMemoryCommitLog {
    pub fn new(commits: Vec<CommitRecord>) -> Self {
        Self {
            commits,
            ..Self::default()
        }
    }

    /// Files reported as touched by `email`, in the given order.
    pub fn with_files<I, S>(mut self, email: &str, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files_by_author.insert(
            email.to_lowercase(),
            files.into_iter().map(Into::into).collect(),
        );
        self
    }

    /// Make every call fail with a collaborator error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            fail_with: Some(message.into()),
            ..Self::default()
        }
    }

    fn check(&self) -> Result<()> {
        match &self.fail_with {
            Some(message) => Err(GauthordleError::Collaborator(message.clone())),
            None => Ok(()),
        }
    }
}

impl CommitLog for InMemoryCommitLog {
    fn commits_between(&self, _range: &TimeRange) -> Result<Vec<CommitRecord>> {
        self.check()?;
        Ok(self.commits.clone())
    }

    fn files_touched_by(&self, author_email: &str) -> Result<Vec<String>> {
        self.check()?;
        Ok(self
            .files_by_author
            .get(&author_email.to_lowercase())
            .cloned()
            .unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// ScriptedRandom
// ---------------------------------------------------------------------------

/// Random source that replays a fixed script of draws.
///
/// Each draw is reduced modulo the requested bound. The script repeats once
/// exhausted; an empty script always yields 0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    script: VecDeque<u64>,
    requested: Vec<u64>,
}

impl ScriptedRandom {
    pub fn new<I: IntoIterator<Item = u64>>(script: I) -> Self {
        Self {
            script: script.into_iter().collect(),
            requested: Vec::new(),
        }
    }

    /// Every bound passed to `next_below`, in call order.
    pub fn requested_bounds(&self) -> &[u64] {
        &self.requested
    }
}

impl RandomSource for ScriptedRandom {
    fn next_below(&mut self, n: u64) -> u64 {
        self.requested.push(n);
        let Some(value) = self.script.pop_front() else {
            return 0;
        };
        self.script.push_back(value);
        value % n
    }
}
