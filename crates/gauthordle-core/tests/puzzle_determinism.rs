//! Reproducibility and sampling guarantees of puzzle construction.

use std::collections::{BTreeSet, HashSet};

use gauthordle_core::fakes::{InMemoryCommitLog, ScriptedRandom};
use gauthordle_core::{
    daily_seed, AuthorBias, CommitRecord, PuzzleBuilder, SeededRandom, REVEAL_COUNT,
};

fn team_history() -> Vec<CommitRecord> {
    let authors = [
        ("Ada", "ada@x.com", 12),
        ("Grace", "grace@x.com", 7),
        ("Linus", "linus@x.com", 4),
        ("Ken", "ken@x.com", 9),
        ("Barbara", "barbara@x.com", 2),
    ];
    let mut commits = Vec::new();
    for (name, email, count) in authors {
        for i in 0..count {
            commits.push(CommitRecord::new(
                name,
                email,
                format!("{name} reworks module number {i}"),
            ));
        }
    }
    commits
}

fn log() -> InMemoryCommitLog {
    InMemoryCommitLog::new(team_history())
        .with_files("ada@x.com", ["src/engine.rs", "src/engine.rs", "README.md"])
        .with_files("grace@x.com", ["compiler/pass.rs"])
}

#[test]
fn same_seed_builds_identical_puzzle() {
    let log = log();
    let builder = PuzzleBuilder::new(&log, AuthorBias::default());

    for seed in [0, 1, 42, 20_261_017, u64::MAX] {
        let a = builder
            .build(team_history(), &mut SeededRandom::new(seed))
            .unwrap();
        let b = builder
            .build(team_history(), &mut SeededRandom::new(seed))
            .unwrap();
        assert_eq!(a.target_author_email(), b.target_author_email());
        assert_eq!(a.reveal_commits(), b.reveal_commits());
        assert_eq!(a, b);
    }
}

#[test]
fn daily_seed_builds_same_puzzle_all_day() {
    let log = log();
    let builder = PuzzleBuilder::new(&log, AuthorBias::default());
    let morning: chrono::DateTime<chrono::Utc> = "2026-10-17T06:00:00Z".parse().unwrap();
    let evening: chrono::DateTime<chrono::Utc> = "2026-10-17T22:30:00Z".parse().unwrap();

    let a = builder
        .build(team_history(), &mut SeededRandom::new(daily_seed(morning)))
        .unwrap();
    let b = builder
        .build(team_history(), &mut SeededRandom::new(daily_seed(evening)))
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn reveal_commits_are_distinct_and_belong_to_author() {
    let log = log();
    let builder = PuzzleBuilder::new(&log, AuthorBias::default());

    for seed in 0..200 {
        let puzzle = builder
            .build(team_history(), &mut SeededRandom::new(seed))
            .unwrap();
        let distinct: BTreeSet<&str> = puzzle
            .reveal_commits()
            .iter()
            .map(|c| c.subject_line.as_str())
            .collect();
        assert_eq!(distinct.len(), REVEAL_COUNT, "seed {seed}");
        for commit in puzzle.reveal_commits() {
            assert_eq!(commit.author_email, puzzle.target_author_email());
            assert!(puzzle.author_commits().contains(commit));
        }
        assert_ne!(puzzle.target_author_email(), "barbara@x.com");
    }
}

#[test]
fn author_draw_precedes_reveal_draws() {
    let log = log();
    let builder = PuzzleBuilder::new(&log, AuthorBias::new(1.0).unwrap());
    // 4 eligible authors sorted: linus(4), grace(7), ken(9), ada(12).
    let mut rng = ScriptedRandom::new([3, 0, 1, 2, 3]);
    let puzzle = builder.build(team_history(), &mut rng).unwrap();

    assert_eq!(puzzle.target_author_email(), "ada@x.com");
    assert_eq!(rng.requested_bounds(), &[4, 12, 12, 12, 12]);
    assert_eq!(
        puzzle.reveal_commits()[0].subject_line,
        "Ada reworks module number 0"
    );
    assert_eq!(puzzle.hints().most_touched_file, "src/engine.rs");
    assert_eq!(puzzle.hints().total_commit_count, 12);
}

#[test]
fn uniform_bias_reaches_every_eligible_author() {
    let log = log();
    let builder = PuzzleBuilder::new(&log, AuthorBias::new(1.0).unwrap());
    let expected = ["linus@x.com", "grace@x.com", "ken@x.com", "ada@x.com"];

    for (draw, email) in expected.iter().enumerate() {
        let mut rng = ScriptedRandom::new([draw as u64, 0, 1, 2, 3]);
        let puzzle = builder.build(team_history(), &mut rng).unwrap();
        assert_eq!(puzzle.target_author_email(), *email);
    }
}

#[test]
fn exactly_four_commits_are_all_revealed() {
    let commits: Vec<CommitRecord> = (0..4)
        .map(|i| CommitRecord::new("Solo", "solo@x.com", format!("solo change number {i}")))
        .collect();
    let log = InMemoryCommitLog::new(commits.clone());
    let builder = PuzzleBuilder::new(&log, AuthorBias::default());

    for seed in 0..50 {
        let puzzle = builder
            .build(commits.clone(), &mut SeededRandom::new(seed))
            .unwrap();
        let revealed: HashSet<&CommitRecord> = puzzle.reveal_commits().iter().collect();
        let all: HashSet<&CommitRecord> = commits.iter().collect();
        assert_eq!(revealed, all);
    }
}
