//! The immutable puzzle value handed from the builder to a session.

use std::collections::BTreeMap;

use serde::Serialize;

use super::commit::CommitRecord;

/// Number of commits revealed over the course of a game, one per stage.
pub const REVEAL_COUNT: usize = 4;

/// Hints unlocked as the game progresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PuzzleHints {
    /// Surviving commits by the target author in the puzzle window.
    pub total_commit_count: usize,
    /// File the target author changed most often. Empty when unknown.
    pub most_touched_file: String,
}

/// One entry of the guess menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorChoice {
    pub email: String,
    pub name: String,
}

/// A complete, internally consistent puzzle.
///
/// Only the puzzle builder creates these; everything is read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Puzzle {
    target_author_email: String,
    target_author_name: String,
    author_commits: Vec<CommitRecord>,
    reveal_commits: [CommitRecord; REVEAL_COUNT],
    hints: PuzzleHints,
    all_commits: Vec<CommitRecord>,
    author_display_names: BTreeMap<String, String>,
}

impl Puzzle {
    pub(crate) fn new(
        target_author_email: String,
        target_author_name: String,
        author_commits: Vec<CommitRecord>,
        reveal_commits: [CommitRecord; REVEAL_COUNT],
        hints: PuzzleHints,
        all_commits: Vec<CommitRecord>,
        author_display_names: BTreeMap<String, String>,
    ) -> Self {
        Self {
            target_author_email,
            target_author_name,
            author_commits,
            reveal_commits,
            hints,
            all_commits,
            author_display_names,
        }
    }

    pub fn target_author_email(&self) -> &str {
        &self.target_author_email
    }

    pub fn target_author_name(&self) -> &str {
        &self.target_author_name
    }

    pub fn author_commits(&self) -> &[CommitRecord] {
        &self.author_commits
    }

    pub fn reveal_commits(&self) -> &[CommitRecord; REVEAL_COUNT] {
        &self.reveal_commits
    }

    pub fn hints(&self) -> &PuzzleHints {
        &self.hints
    }

    pub fn all_commits(&self) -> &[CommitRecord] {
        &self.all_commits
    }

    /// Display name per lower-cased email, for every author in the puzzle window.
    pub fn author_display_names(&self) -> &BTreeMap<String, String> {
        &self.author_display_names
    }

    /// Every known author, ordered by display name and then email.
    pub fn author_choices(&self) -> Vec<AuthorChoice> {
        let mut choices: Vec<AuthorChoice> = self
            .author_display_names
            .iter()
            .map(|(email, name)| AuthorChoice {
                email: email.clone(),
                name: name.clone(),
            })
            .collect();
        choices.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.email.cmp(&b.email)));
        choices
    }
}
