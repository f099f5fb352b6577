//! Domain models for gauthordle.
//!
//! - `CommitRecord`: one commit as reported by the log collaborator
//! - `FilterConfig`: exclusion rules, teams and author bias
//! - `Puzzle`: the immutable result of puzzle construction

pub mod commit;
pub mod config;
pub mod error;
pub mod puzzle;

pub use commit::CommitRecord;
pub use config::{AuthorBias, AuthorFilterRule, FilterConfig, PatternTarget, Team};
pub use error::{GauthordleError, Result};
pub use puzzle::{AuthorChoice, Puzzle, PuzzleHints, REVEAL_COUNT};
