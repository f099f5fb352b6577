//! Git integration: reading commit history for puzzle construction.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::domain::{CommitRecord, GauthordleError, Result};
use crate::obs;
use crate::schedule::TimeRange;

const FIELD_SEPARATOR: char = '\u{1f}';
const RECORD_SEPARATOR: char = '\u{1e}';
const LOG_FORMAT: &str = "--format=%an%x1f%ae%x1f%s%x1e";

/// Source of commit history.
///
/// Implementations must return the same records in the same order for
/// identical inputs; daily puzzles depend on it.
pub trait CommitLog {
    /// Commits in `range`, newest first.
    fn commits_between(&self, range: &TimeRange) -> Result<Vec<CommitRecord>>;

    /// Every file path changed by `author_email` across their whole history.
    /// Duplicates are kept; order decides ties for the most touched file.
    fn files_touched_by(&self, author_email: &str) -> Result<Vec<String>>;
}

/// [`CommitLog`] backed by the `git` binary.
#[derive(Debug, Clone)]
pub struct GitCommitLog {
    repo_dir: PathBuf,
}

impl GitCommitLog {
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
        }
    }

    pub fn repo_dir(&self) -> &Path {
        &self.repo_dir
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        run_git(&self.repo_dir, args)
    }
}

impl CommitLog for GitCommitLog {
    fn commits_between(&self, range: &TimeRange) -> Result<Vec<CommitRecord>> {
        let (since, until) = (range.since_arg(), range.until_arg());
        let stdout = self.run(&[
            "log",
            &format!("--since={since}"),
            &format!("--until={until}"),
            LOG_FORMAT,
        ])?;
        let commits = parse_log_records(&stdout)?;
        obs::emit_commits_loaded(commits.len(), &since, &until);
        Ok(commits)
    }

    fn files_touched_by(&self, author_email: &str) -> Result<Vec<String>> {
        // Anchor on the brackets git prints around the email so that
        // `da@x.com` does not also match `linda@x.com`.
        let author = format!("--author=<{author_email}>");
        let stdout = self.run(&[
            "log",
            &author,
            "--fixed-strings",
            "--regexp-ignore-case",
            "--name-only",
            "--format=",
        ])?;
        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}

fn run_git(repo_dir: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo_dir)
        .output()
        .map_err(|e| GauthordleError::Collaborator(format!("failed to run git: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(GauthordleError::Collaborator(format!(
            "git {} failed: {}",
            args.first().copied().unwrap_or_default(),
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Parse `git log` output written with the unit/record separator format.
///
/// Newlines are dropped first; subjects never contain them and git appends
/// one after every record.
pub fn parse_log_records(stdout: &str) -> Result<Vec<CommitRecord>> {
    let flattened: String = stdout.chars().filter(|&c| c != '\n').collect();

    let mut records: Vec<&str> = flattened.split(RECORD_SEPARATOR).collect();
    // Everything after the final separator is padding.
    records.pop();

    records
        .into_iter()
        .map(|record| {
            let fields: Vec<&str> = record.split(FIELD_SEPARATOR).collect();
            match fields.as_slice() {
                [name, email, subject] => Ok(CommitRecord::new(*name, *email, *subject)),
                _ => Err(GauthordleError::Collaborator(format!(
                    "unexpected git log record with {} fields",
                    fields.len()
                ))),
            }
        })
        .collect()
}

/// Check whether the `git` binary can be run.
pub fn is_git_installed() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Check whether a directory is inside a git work tree.
pub fn is_git_repo(dir: &Path) -> bool {
    Command::new("git")
        .args(["rev-parse", "--is-inside-work-tree"])
        .current_dir(dir)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use std::process::Command as StdCommand;

    fn run(repo_dir: &Path, args: &[&str], env: &[(&str, &str)]) {
        let output = StdCommand::new("git")
            .args(args)
            .envs(env.iter().copied())
            .current_dir(repo_dir)
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }

    fn commit_as(repo: &Path, name: &str, email: &str, date: &str, file: &str, subject: &str) {
        std::fs::write(repo.join(file), format!("{subject}\n")).unwrap();
        run(repo, &["add", file], &[]);
        let env = [
            ("GIT_AUTHOR_NAME", name),
            ("GIT_AUTHOR_EMAIL", email),
            ("GIT_AUTHOR_DATE", date),
            ("GIT_COMMITTER_NAME", name),
            ("GIT_COMMITTER_EMAIL", email),
            ("GIT_COMMITTER_DATE", date),
        ];
        run(repo, &["commit", "-q", "-m", subject], &env);
    }

    fn make_git_repo() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), &["init", "-q"], &[]);
        run(dir.path(), &["config", "user.name", "test-user"], &[]);
        run(dir.path(), &["config", "user.email", "test@example.com"], &[]);
        run(dir.path(), &["config", "commit.gpgsign", "false"], &[]);
        dir
    }

    fn window(since: &str, until: &str) -> TimeRange {
        let parse = |s: &str| DateTime::parse_from_rfc3339(s).unwrap();
        TimeRange {
            start: parse(since),
            end: parse(until),
        }
    }

    #[test]
    fn test_parse_log_records() {
        let out = "Ada\u{1f}ada@x.com\u{1f}fix the parser\u{1e}\nGrace\u{1f}grace@x.com\u{1f}add compiler pass\u{1e}\n";
        let commits = parse_log_records(out).unwrap();
        assert_eq!(
            commits,
            vec![
                CommitRecord::new("Ada", "ada@x.com", "fix the parser"),
                CommitRecord::new("Grace", "grace@x.com", "add compiler pass"),
            ]
        );
    }

    #[test]
    fn test_parse_empty_log() {
        assert!(parse_log_records("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_malformed_record() {
        let err = parse_log_records("Ada\u{1f}ada@x.com\u{1e}").unwrap_err();
        assert!(matches!(err, GauthordleError::Collaborator(_)));
    }

    #[test]
    fn test_commits_between_reads_window_newest_first() {
        let repo = make_git_repo();
        let p = repo.path();
        commit_as(p, "Ada", "ada@x.com", "2024-01-10T12:00:00Z", "a.txt", "too old to count");
        commit_as(p, "Ada", "Ada@X.com", "2024-03-10T12:00:00Z", "a.txt", "rework the parser");
        commit_as(p, "Grace", "grace@x.com", "2024-03-12T12:00:00Z", "b.txt", "add compiler pass");

        let log = GitCommitLog::new(p);
        let commits = log
            .commits_between(&window("2024-03-01T00:00:00Z", "2024-04-01T00:00:00Z"))
            .unwrap();
        assert_eq!(
            commits,
            vec![
                CommitRecord::new("Grace", "grace@x.com", "add compiler pass"),
                CommitRecord::new("Ada", "Ada@X.com", "rework the parser"),
            ]
        );
    }

    #[test]
    fn test_files_touched_by_matches_email_literally() {
        let repo = make_git_repo();
        let p = repo.path();
        commit_as(p, "Ada", "ada+dev@x.com", "2024-03-10T12:00:00Z", "a.txt", "first change here");
        commit_as(p, "Ada", "Ada+Dev@x.com", "2024-03-11T12:00:00Z", "a.txt", "second change here");
        commit_as(p, "Ada", "ada+dev@x.com", "2024-03-12T12:00:00Z", "b.txt", "third change here");
        commit_as(p, "Grace", "grace@x.com", "2024-03-13T12:00:00Z", "c.txt", "unrelated change here");
        commit_as(p, "Nada", "nada+dev@x.com", "2024-03-14T12:00:00Z", "d.txt", "suffix email change");

        let files = GitCommitLog::new(p).files_touched_by("ada+dev@x.com").unwrap();
        assert_eq!(files, vec!["b.txt", "a.txt", "a.txt"]);

        let nada = GitCommitLog::new(p).files_touched_by("nada+dev@x.com").unwrap();
        assert_eq!(nada, vec!["d.txt"]);
    }

    #[test]
    fn test_commits_between_honours_exact_window_edges() {
        let repo = make_git_repo();
        let p = repo.path();
        commit_as(p, "Ada", "ada@x.com", "2024-02-29T23:59:55Z", "a.txt", "just before the window");
        commit_as(p, "Ada", "ada@x.com", "2024-03-01T00:00:05Z", "a.txt", "just after window start");
        commit_as(p, "Ada", "ada@x.com", "2024-03-01T23:59:55Z", "a.txt", "just before window end");
        commit_as(p, "Ada", "ada@x.com", "2024-03-02T00:00:00Z", "a.txt", "exactly at window end");

        let commits = GitCommitLog::new(p)
            .commits_between(&window("2024-03-01T00:00:00Z", "2024-03-02T00:00:00Z"))
            .unwrap();
        let subjects: Vec<&str> = commits.iter().map(|c| c.subject_line.as_str()).collect();
        assert_eq!(subjects, ["just before window end", "just after window start"]);
    }

    #[test]
    fn test_commits_between_fails_outside_repo() {
        let dir = tempfile::tempdir().unwrap();
        let result = GitCommitLog::new(dir.path())
            .commits_between(&window("2024-03-01T00:00:00Z", "2024-04-01T00:00:00Z"));
        assert!(matches!(result, Err(GauthordleError::Collaborator(_))));
    }

    #[test]
    fn test_is_git_repo_true_for_repo() {
        let repo = make_git_repo();
        assert!(is_git_installed());
        assert!(is_git_repo(repo.path()));
    }

    #[test]
    fn test_is_git_repo_false_for_non_repo() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!is_git_repo(dir.path()));
    }
}
