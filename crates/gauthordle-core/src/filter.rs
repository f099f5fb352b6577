//! Commit filter pipeline.
//!
//! Reduces the raw log to commits worth guessing about. Stages run in a fixed
//! order on normalized records:
//!
//! 1. normalization (lower-cased emails, canonical names)
//! 2. configured author exclusions
//! 3. team restriction
//! 4. bot heuristics
//! 5. subject-line quality and per-author de-duplication
//!
//! Normalizing first means exclusion and team rules, and the per-author
//! duplicate tracking, all see one canonical email per person.

use std::collections::{HashMap, HashSet};
use std::fmt;

use regex::Regex;

use crate::domain::{CommitRecord, FilterConfig, GauthordleError, PatternTarget, Result, Team};
use crate::normalize::normalize_authors;
use crate::obs;

/// Minimum whitespace-separated words for a subject to say anything useful.
pub const MIN_SUBJECT_WORDS: usize = 3;

/// A pipeline stage, used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterStage {
    Normalize,
    Exclusions,
    Team,
    Bots,
    Subjects,
}

impl FilterStage {
    pub const ORDER: [FilterStage; 5] = [
        FilterStage::Normalize,
        FilterStage::Exclusions,
        FilterStage::Team,
        FilterStage::Bots,
        FilterStage::Subjects,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FilterStage::Normalize => "normalize",
            FilterStage::Exclusions => "exclusions",
            FilterStage::Team => "team",
            FilterStage::Bots => "bots",
            FilterStage::Subjects => "subjects",
        }
    }
}

impl fmt::Display for FilterStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated filter built from a [`FilterConfig`].
#[derive(Debug, Clone)]
pub struct CommitFilter {
    name_patterns: Vec<Regex>,
    email_patterns: Vec<Regex>,
    team: Option<Team>,
}

impl CommitFilter {
    /// Compile the exclusion patterns and resolve the active team.
    ///
    /// An active team that is not defined in the config is ignored.
    pub fn new(config: &FilterConfig) -> Result<Self> {
        let mut name_patterns = Vec::new();
        let mut email_patterns = Vec::new();

        for rule in &config.author_filters {
            match rule.active_pattern() {
                Some(PatternTarget::Name(pattern)) => name_patterns.push(compile(pattern)?),
                Some(PatternTarget::Email(pattern)) => email_patterns.push(compile(pattern)?),
                None => {}
            }
        }

        if let Some(name) = config.active_team.as_deref() {
            if !config.has_team(name) {
                tracing::debug!(team = %name, "active team not defined in config; not filtering by team");
            }
        }

        Ok(Self {
            name_patterns,
            email_patterns,
            team: config.active_team_members().cloned(),
        })
    }

    /// Run every stage, in order, over `commits`.
    pub fn apply(&self, commits: &[CommitRecord]) -> Vec<CommitRecord> {
        let mut current = commits.to_vec();
        for stage in FilterStage::ORDER {
            let before = current.len();
            current = self.run_stage(stage, current);
            obs::emit_filter_stage(stage.as_str(), before, current.len());
        }
        current
    }

    fn run_stage(&self, stage: FilterStage, commits: Vec<CommitRecord>) -> Vec<CommitRecord> {
        match stage {
            FilterStage::Normalize => normalize_authors(&commits),
            FilterStage::Exclusions => self.filter_exclusions(commits),
            FilterStage::Team => self.filter_team(commits),
            FilterStage::Bots => filter_out_bots(commits),
            FilterStage::Subjects => filter_commit_subjects(commits),
        }
    }

    /// Drop commits whose author matches any configured exclusion.
    pub fn filter_exclusions(&self, mut commits: Vec<CommitRecord>) -> Vec<CommitRecord> {
        commits.retain(|commit| !self.is_excluded(commit));
        commits
    }

    fn is_excluded(&self, commit: &CommitRecord) -> bool {
        self.name_patterns
            .iter()
            .any(|r| r.is_match(&commit.author_name))
            || self
                .email_patterns
                .iter()
                .any(|r| r.is_match(&commit.author_email))
    }

    /// Keep only team members' commits when a known team is active.
    pub fn filter_team(&self, mut commits: Vec<CommitRecord>) -> Vec<CommitRecord> {
        if let Some(team) = &self.team {
            commits.retain(|commit| team.contains(&commit.author_email.to_lowercase()));
        }
        commits
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| GauthordleError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Best-effort removal of bot-made commits.
///
/// Emails containing "noreply" and names containing "robot" (any case) are
/// treated as bots. Plenty of bots slip through.
pub fn filter_out_bots(mut commits: Vec<CommitRecord>) -> Vec<CommitRecord> {
    commits.retain(|commit| !is_bot(commit));
    commits
}

pub fn is_bot(commit: &CommitRecord) -> bool {
    commit.author_email.contains("noreply") || commit.author_name.to_lowercase().contains("robot")
}

/// Keep only subjects that carry signal.
///
/// Drops short subjects and merges, then every repeat of a subject (ignoring
/// case) within the same author's commits.
pub fn filter_commit_subjects(mut commits: Vec<CommitRecord>) -> Vec<CommitRecord> {
    let mut seen: HashMap<String, HashSet<String>> = HashMap::new();
    commits.retain(|commit| {
        if !is_interesting_subject(&commit.subject_line) {
            return false;
        }
        seen.entry(commit.author_email.clone())
            .or_default()
            .insert(commit.subject_line.to_lowercase())
    });
    commits
}

pub fn is_interesting_subject(subject: &str) -> bool {
    subject.split_whitespace().count() >= MIN_SUBJECT_WORDS
        && !subject.to_lowercase().contains("merge")
}
