//! gauthordle - the daily git author guessing game
//!
//! Run from a checkout of the repository's main development branch. Every
//! player on the same day gets the same puzzle; `--random` plays a one-off.

mod render;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::Parser;
use colored::*;
use gauthordle_core::{
    init_tracing, is_git_installed, is_git_repo, load_config_or_default, puzzle_time_range,
    seed_fingerprint, CommitFilter, CommitLog, CommitRecord, FilterConfig, GitCommitLog,
    PuzzleBuilder, PuzzleMode, PuzzleSpan, SeededRandom, Session, SessionOutcome,
};
use tracing::{info, Level};

use crate::render::TerminalFrontend;

const HELP_BODY: &str = "A daily game where you try to guess the author of some git commits.

To play, check out the main development branch of your repository and run
this program with no arguments. A new puzzle starts every day at midnight UTC.";

#[derive(Parser)]
#[command(name = "gauthordle")]
#[command(author = "Joseph Naberhaus")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "The daily git author guessing game", long_about = HELP_BODY)]
struct Cli {
    /// Play a random puzzle instead of the daily one
    #[arg(long)]
    random: bool,

    /// Only use commits by members of this team from the config file
    #[arg(long)]
    team: Option<String>,

    /// Write every commit considered for the puzzle to this file as JSON
    #[arg(long, value_name = "PATH")]
    debug_dump_commits: Option<PathBuf>,

    /// Config file (default: ~/.gauthordle.yaml)
    #[arg(long, env = "GAUTHORDLE_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    init_tracing(cli.json, level);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", format!("ERROR: {err:#}").red());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    if !is_git_installed() {
        bail!("git must be installed");
    }
    let repo_dir = std::env::current_dir().context("failed to read the current directory")?;
    if !is_git_repo(&repo_dir) {
        bail!("must be in a git repository");
    }

    println!("Building game...");

    let config = load_config_or_default(cli.config.as_deref()).context("failed to load config")?;
    let config = select_team(config, cli.team.as_deref())?;
    let bias = config.author_bias()?;
    let filter = CommitFilter::new(&config)?;

    let now = Utc::now();
    let log = GitCommitLog::new(&repo_dir);
    let raw = log.commits_between(&puzzle_time_range(now))?;
    let commits = filter.apply(&raw);

    if let Some(path) = &cli.debug_dump_commits {
        dump_commits(path, &commits)?;
        info!(path = %path.display(), count = commits.len(), "dumped filtered commits");
    }

    let mode = if cli.random {
        PuzzleMode::Random
    } else {
        PuzzleMode::Daily
    };
    let seed = mode.seed(now);
    let fingerprint = seed_fingerprint(seed);
    let _span = PuzzleSpan::enter(&fingerprint);

    let puzzle = PuzzleBuilder::new(&log, bias)
        .build(commits, &mut SeededRandom::new(seed))
        .context("failed to build a puzzle")?;

    let mut frontend = TerminalFrontend::new(mode, &fingerprint);
    match Session::new(puzzle).play(&mut frontend)? {
        SessionOutcome::Won { guesses } => info!(guesses, "puzzle solved"),
        SessionOutcome::Lost => info!("puzzle not solved"),
    }
    Ok(())
}

/// Activate `team` on `config`, rejecting names the config does not define.
fn select_team(config: FilterConfig, team: Option<&str>) -> Result<FilterConfig> {
    match team {
        None => Ok(config),
        Some(name) if config.has_team(name) => Ok(config.with_team(name)),
        Some(name) => bail!("team {name:?} doesn't exist in your config file"),
    }
}

fn dump_commits(path: &Path, commits: &[CommitRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(commits)?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write commits to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use gauthordle_core::Team;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_all_flags() {
        let cli = Cli::try_parse_from([
            "gauthordle",
            "--random",
            "--team",
            "core",
            "--debug-dump-commits",
            "out.json",
            "--config",
            "cfg.yaml",
            "--verbose",
            "--json",
        ])
        .unwrap();
        assert!(cli.random);
        assert_eq!(cli.team.as_deref(), Some("core"));
        assert_eq!(cli.debug_dump_commits, Some(PathBuf::from("out.json")));
        assert_eq!(cli.config, Some(PathBuf::from("cfg.yaml")));
        assert!(cli.verbose && cli.json);
    }

    #[test]
    fn test_rejects_positional_arguments() {
        assert!(Cli::try_parse_from(["gauthordle", "extra"]).is_err());
    }

    #[test]
    fn test_select_team_known_and_unknown() {
        let mut config = FilterConfig::default();
        config
            .teams
            .insert("core".to_string(), Team::new(["ada@example.com"]));

        assert!(select_team(config.clone(), None)
            .unwrap()
            .active_team_members()
            .is_none());
        assert!(select_team(config.clone(), Some("core"))
            .unwrap()
            .active_team_members()
            .is_some());

        let err = select_team(config, Some("web")).unwrap_err();
        assert!(err.to_string().contains("\"web\""));
    }

    #[test]
    fn test_dump_commits_writes_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("commits.json");
        let commits = vec![CommitRecord::new("Ada", "ada@example.com", "fix login bug")];

        dump_commits(&path, &commits).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n  "));
        let back: Vec<CommitRecord> = serde_json::from_str(&text).unwrap();
        assert_eq!(back, commits);
    }

    #[test]
    fn test_dump_commits_reports_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("commits.json");
        let err = dump_commits(&path, &[]).unwrap_err();
        assert!(format!("{err:#}").contains("failed to write commits"));
    }
}
