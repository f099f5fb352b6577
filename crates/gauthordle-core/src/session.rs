//! The reveal-and-guess loop.
//!
//! A [`Session`] owns the puzzle it plays. Each stage reveals one more commit
//! and accepts one guess:
//!
//! | stage | commits shown | hints shown                      |
//! |-------|---------------|----------------------------------|
//! | 0     | 1             | none                             |
//! | 1     | 2             | total commit count               |
//! | 2     | 3             | total commit count               |
//! | 3     | 4             | total commit count, busiest file |
//!
//! A correct guess wins immediately. A wrong guess advances the stage, or
//! loses on the last one. [`Session::guess`] makes the decision without any
//! I/O; [`Session::play`] drives it through a [`SessionFrontend`].

use serde::Serialize;

use crate::domain::{AuthorChoice, CommitRecord, GauthordleError, Puzzle, Result, REVEAL_COUNT};
use crate::obs;

pub const LAST_STAGE: usize = REVEAL_COUNT - 1;

/// First stage at which the total commit count is visible.
pub const COMMIT_COUNT_HINT_STAGE: usize = 1;

/// First stage at which the most touched file is visible.
pub const MOST_TOUCHED_FILE_HINT_STAGE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    Guessing { stage: usize },
    Won { stage: usize },
    Lost,
}

impl SessionState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, SessionState::Guessing { .. })
    }
}

/// Verdict on a single guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GuessOutcome {
    Correct,
    Incorrect { next_stage: usize },
    OutOfGuesses,
}

/// Final result of a played session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionOutcome {
    Won { guesses: usize },
    Lost,
}

/// What the player may see at the current stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageView<'a> {
    pub stage: usize,
    pub commits: &'a [CommitRecord],
    pub total_commit_count: Option<usize>,
    pub most_touched_file: Option<&'a str>,
}

/// Rendering and input collaborator for [`Session::play`].
pub trait SessionFrontend {
    /// Show the commits and hints unlocked so far.
    fn show_stage(&mut self, view: &StageView<'_>) -> Result<()>;

    /// Ask for a guess; returns the chosen author's email.
    fn choose_author(&mut self, choices: &[AuthorChoice]) -> Result<String>;

    fn show_verdict(&mut self, outcome: GuessOutcome) -> Result<()>;

    /// Reveal the true author once the session is over.
    fn show_answer(&mut self, name: &str, email: &str) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct Session {
    puzzle: Puzzle,
    state: SessionState,
    guesses: usize,
}

impl Session {
    pub fn new(puzzle: Puzzle) -> Self {
        Self {
            puzzle,
            state: SessionState::Guessing { stage: 0 },
            guesses: 0,
        }
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn guesses(&self) -> usize {
        self.guesses
    }

    /// The furthest stage reached.
    pub fn stage(&self) -> usize {
        match self.state {
            SessionState::Guessing { stage } | SessionState::Won { stage } => stage,
            SessionState::Lost => LAST_STAGE,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_terminal()
    }

    /// Commits and hints visible at the current stage. Reveals are cumulative.
    pub fn view(&self) -> StageView<'_> {
        let stage = self.stage();
        let hints = self.puzzle.hints();
        StageView {
            stage,
            commits: &self.puzzle.reveal_commits()[..=stage],
            total_commit_count: (stage >= COMMIT_COUNT_HINT_STAGE)
                .then_some(hints.total_commit_count),
            most_touched_file: (stage >= MOST_TOUCHED_FILE_HINT_STAGE)
                .then_some(hints.most_touched_file.as_str()),
        }
    }

    /// Judge a guess and advance the state machine.
    pub fn guess(&mut self, author_email: &str) -> Result<GuessOutcome> {
        let SessionState::Guessing { stage } = self.state else {
            return Err(GauthordleError::Session(
                "guess submitted after the session finished".to_string(),
            ));
        };

        self.guesses += 1;
        let correct = author_email.eq_ignore_ascii_case(self.puzzle.target_author_email());
        obs::emit_guess(stage, correct);

        let outcome = if correct {
            self.state = SessionState::Won { stage };
            GuessOutcome::Correct
        } else if stage < LAST_STAGE {
            self.state = SessionState::Guessing { stage: stage + 1 };
            GuessOutcome::Incorrect {
                next_stage: stage + 1,
            }
        } else {
            self.state = SessionState::Lost;
            GuessOutcome::OutOfGuesses
        };
        Ok(outcome)
    }

    /// Play the session to completion through `frontend`.
    pub fn play(mut self, frontend: &mut dyn SessionFrontend) -> Result<SessionOutcome> {
        let choices = self.puzzle.author_choices();

        while !self.is_finished() {
            frontend.show_stage(&self.view())?;
            let email = frontend.choose_author(&choices)?;
            let outcome = self.guess(&email)?;
            frontend.show_verdict(outcome)?;
        }

        frontend.show_answer(
            self.puzzle.target_author_name(),
            self.puzzle.target_author_email(),
        )?;

        let outcome = match self.state {
            SessionState::Won { .. } => SessionOutcome::Won {
                guesses: self.guesses,
            },
            _ => SessionOutcome::Lost,
        };
        obs::emit_session_finished(matches!(outcome, SessionOutcome::Won { .. }), self.guesses);
        Ok(outcome)
    }
}
