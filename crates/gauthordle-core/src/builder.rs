//! Puzzle construction.
//!
//! Orchestrates author selection, reveal-commit sampling and hint lookup into
//! a [`Puzzle`]. Given the same filtered commits and the same random stream,
//! the result is identical: the author draw always comes first, the reveal
//! draws after it.

use std::collections::HashMap;

use crate::domain::{
    AuthorBias, CommitRecord, GauthordleError, Puzzle, PuzzleHints, Result, REVEAL_COUNT,
};
use crate::git::CommitLog;
use crate::normalize::display_names;
use crate::obs;
use crate::random::RandomSource;
use crate::selector::select_author;

/// Builds puzzles from an already filtered commit set.
pub struct PuzzleBuilder<'a> {
    log: &'a dyn CommitLog,
    bias: AuthorBias,
}

impl<'a> PuzzleBuilder<'a> {
    /// `log` answers the most-touched-file query for the chosen author.
    pub fn new(log: &'a dyn CommitLog, bias: AuthorBias) -> Self {
        Self { log, bias }
    }

    pub fn bias(&self) -> AuthorBias {
        self.bias
    }

    /// Build a puzzle, or fail without any partial result.
    pub fn build(&self, commits: Vec<CommitRecord>, rng: &mut dyn RandomSource) -> Result<Puzzle> {
        if commits.is_empty() {
            return Err(GauthordleError::InsufficientData(
                "no commits left after filtering".to_string(),
            ));
        }

        let selection = select_author(&commits, self.bias, rng)?;
        let target = selection.email;

        let author_commits: Vec<CommitRecord> = commits
            .iter()
            .filter(|c| c.author_email == target)
            .cloned()
            .collect();
        let names = display_names(&commits);
        let target_name = names.get(&target).cloned().unwrap_or_default();

        let reveal_commits = sample_reveal_commits(&author_commits, rng)?;

        let files = self.log.files_touched_by(&target)?;
        let hints = PuzzleHints {
            total_commit_count: author_commits.len(),
            most_touched_file: most_touched_file(&files),
        };

        obs::emit_puzzle_built(selection.eligible, commits.len());

        Ok(Puzzle::new(
            target,
            target_name,
            author_commits,
            reveal_commits,
            hints,
            commits,
            names,
        ))
    }
}

/// Draw [`REVEAL_COUNT`] distinct commits, in draw order.
///
/// Duplicate indices are redrawn.
pub fn sample_reveal_commits(
    author_commits: &[CommitRecord],
    rng: &mut dyn RandomSource,
) -> Result<[CommitRecord; REVEAL_COUNT]> {
    if author_commits.len() < REVEAL_COUNT {
        return Err(GauthordleError::InsufficientData(format!(
            "need {REVEAL_COUNT} commits to build a puzzle, author has {}",
            author_commits.len()
        )));
    }

    let bound = author_commits.len() as u64;
    let mut picked: Vec<usize> = Vec::with_capacity(REVEAL_COUNT);
    while picked.len() < REVEAL_COUNT {
        let index = rng.next_below(bound) as usize;
        if !picked.contains(&index) {
            picked.push(index);
        }
    }

    Ok(std::array::from_fn(|i| author_commits[picked[i]].clone()))
}

/// The file appearing most often in `files`; ties go to the first seen.
///
/// Empty when `files` is empty.
pub fn most_touched_file(files: &[String]) -> String {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();
    for file in files {
        let count = counts.entry(file.as_str()).or_insert(0);
        if *count == 0 {
            first_seen.push(file.as_str());
        }
        *count += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for file in first_seen {
        let count = counts[file];
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((file, count));
        }
    }
    best.map(|(file, _)| file.to_string()).unwrap_or_default()
}
