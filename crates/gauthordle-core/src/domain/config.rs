//! Filter configuration: exclusion rules, teams and the author bias.
//!
//! [`FilterConfig`] is a plain value. It is validated once when a
//! [`CommitFilter`](crate::filter::CommitFilter) or [`AuthorBias`] is built
//! from it, never mutated through option chains.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::error::{GauthordleError, Result};

/// Excludes authors by name or email regex.
///
/// Only one pattern is active per rule. The name pattern takes precedence when
/// both are given; a rule with neither is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorFilterRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_email: Option<String>,
}

/// Which commit field an exclusion pattern is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternTarget<'a> {
    Name(&'a str),
    Email(&'a str),
}

impl AuthorFilterRule {
    pub fn exclude_name(pattern: impl Into<String>) -> Self {
        Self {
            exclude_name: Some(pattern.into()),
            exclude_email: None,
        }
    }

    pub fn exclude_email(pattern: impl Into<String>) -> Self {
        Self {
            exclude_name: None,
            exclude_email: Some(pattern.into()),
        }
    }

    /// The single pattern this rule applies, if any.
    pub fn active_pattern(&self) -> Option<PatternTarget<'_>> {
        fn non_empty(p: &Option<String>) -> Option<&str> {
            p.as_deref().filter(|s| !s.is_empty())
        }
        match (non_empty(&self.exclude_name), non_empty(&self.exclude_email)) {
            (Some(name), _) => Some(PatternTarget::Name(name)),
            (None, Some(email)) => Some(PatternTarget::Email(email)),
            (None, None) => None,
        }
    }
}

/// Member email addresses of a named team. Membership is case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Team(Vec<String>);

impl Team {
    pub fn new<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(members.into_iter().map(Into::into).collect())
    }

    pub fn members(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, email: &str) -> bool {
        let email = email.to_lowercase();
        self.0.iter().any(|m| m.to_lowercase() == email)
    }
}

/// How strongly author selection favours prolific authors.
///
/// Valid values lie in `[1, 5]`; 1 is uniform over eligible authors.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct AuthorBias(f64);

impl AuthorBias {
    pub const MIN: f64 = 1.0;
    pub const MAX: f64 = 5.0;
    pub const DEFAULT: f64 = 3.5;

    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() || !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(GauthordleError::Config(format!(
                "author bias must be between {} and {}, got {value}",
                Self::MIN,
                Self::MAX
            )));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for AuthorBias {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

/// Everything that shapes which commits and authors make it into a puzzle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default)]
    pub author_filters: Vec<AuthorFilterRule>,

    #[serde(default)]
    pub teams: BTreeMap<String, Team>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_bias: Option<f64>,

    /// Team to restrict the puzzle to. Supplied at run time, not from file.
    #[serde(skip)]
    pub active_team: Option<String>,
}

impl FilterConfig {
    /// Select the team the puzzle is restricted to.
    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.active_team = Some(team.into());
        self
    }

    pub fn has_team(&self, name: &str) -> bool {
        self.teams.contains_key(name)
    }

    /// The active team, when one is set and defined in `teams`.
    pub fn active_team_members(&self) -> Option<&Team> {
        self.active_team
            .as_deref()
            .and_then(|name| self.teams.get(name))
    }

    /// The configured bias, validated, or the default when unset.
    pub fn author_bias(&self) -> Result<AuthorBias> {
        self.author_bias
            .map(AuthorBias::new)
            .unwrap_or_else(|| Ok(AuthorBias::default()))
    }
}
