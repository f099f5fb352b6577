//! Structured observability hooks for puzzle construction and play.
//!
//! Events carry an `event` field so they can be picked out of JSON logs.
//! The target author is only ever logged at `debug!` level.

use tracing::{debug, info};

/// RAII guard that tags everything logged while building or playing a
/// puzzle with its seed fingerprint.
pub struct PuzzleSpan {
    _span: tracing::span::EnteredSpan,
}

impl PuzzleSpan {
    pub fn enter(fingerprint: &str) -> Self {
        let span = tracing::info_span!("gauthordle.puzzle", puzzle = %fingerprint);
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: raw commits loaded from the log collaborator.
pub fn emit_commits_loaded(count: usize, since: &str, until: &str) {
    info!(event = "commits.loaded", count = count, since = %since, until = %until);
}

/// Emit event: one filter stage finished.
pub fn emit_filter_stage(stage: &str, before: usize, after: usize) {
    debug!(
        event = "filter.stage",
        stage = %stage,
        before = before,
        after = after,
        removed = before.saturating_sub(after),
    );
}

/// Emit event: a puzzle was assembled.
pub fn emit_puzzle_built(eligible_authors: usize, total_commits: usize) {
    info!(
        event = "puzzle.built",
        eligible_authors = eligible_authors,
        total_commits = total_commits,
    );
}

/// Emit event: the selector picked a target author.
pub fn emit_author_selected(index: usize, eligible_authors: usize, email: &str) {
    debug!(
        event = "author.selected",
        index = index,
        eligible_authors = eligible_authors,
        email = %email,
    );
}

/// Emit event: a guess was judged.
pub fn emit_guess(stage: usize, correct: bool) {
    info!(event = "session.guess", stage = stage, correct = correct);
}

/// Emit event: a session reached a terminal state.
pub fn emit_session_finished(won: bool, guesses: usize) {
    info!(event = "session.finished", won = won, guesses = guesses);
}
