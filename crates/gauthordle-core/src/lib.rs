//! gauthordle core library
//!
//! Builds and plays the daily "guess the commit author" puzzle:
//! commits are read from git, normalized and filtered, an author is drawn
//! with a bias towards prolific contributors, and a [`Session`] walks the
//! player through four reveal stages.

pub mod builder;
pub mod config;
pub mod domain;
pub mod fakes;
pub mod filter;
pub mod git;
pub mod normalize;
pub mod obs;
pub mod random;
pub mod schedule;
pub mod selector;
pub mod session;
pub mod telemetry;

pub use builder::{most_touched_file, sample_reveal_commits, PuzzleBuilder};
pub use config::{default_config_path, load_config, load_config_or_default, parse_config};
pub use domain::{
    AuthorBias, AuthorChoice, AuthorFilterRule, CommitRecord, FilterConfig, GauthordleError,
    PatternTarget, Puzzle, PuzzleHints, Result, Team, REVEAL_COUNT,
};
pub use filter::{filter_commit_subjects, filter_out_bots, CommitFilter, FilterStage};
pub use git::{is_git_installed, is_git_repo, CommitLog, GitCommitLog};
pub use normalize::normalize_authors;
pub use obs::PuzzleSpan;
pub use random::{RandomSource, SeededRandom};
pub use schedule::{
    daily_seed, puzzle_time_range, random_seed, seed_fingerprint, PuzzleMode, TimeRange,
    PUZZLE_VERSION,
};
pub use selector::{eligible_authors, select_author, AuthorSelection};
pub use session::{
    GuessOutcome, Session, SessionFrontend, SessionOutcome, SessionState, StageView,
};
pub use telemetry::init_tracing;

/// gauthordle version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
