//! Bias-weighted author selection.
//!
//! Eligible authors are sorted by commit count. A uniform draw in
//! `[0, floor(N^b))` is mapped through `r^(1/b)`, which lands on the prolific
//! end of the list more often as `b` grows while keeping every author
//! reachable. With `b = 1` the draw is uniform.

use std::collections::BTreeMap;

use crate::domain::{AuthorBias, CommitRecord, GauthordleError, Result, REVEAL_COUNT};
use crate::obs;
use crate::random::RandomSource;

/// Commit counts per author email.
pub fn commit_counts(commits: &[CommitRecord]) -> BTreeMap<&str, usize> {
    let mut counts = BTreeMap::new();
    for commit in commits {
        *counts.entry(commit.author_email.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Authors with enough commits for a puzzle, least prolific first.
///
/// Ties are broken by email so the order is total and reproducible.
pub fn eligible_authors(commits: &[CommitRecord]) -> Vec<(&str, usize)> {
    let mut eligible: Vec<(&str, usize)> = commit_counts(commits)
        .into_iter()
        .filter(|&(_, count)| count >= REVEAL_COUNT)
        .collect();
    eligible.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
    eligible
}

/// Map a draw onto an index of an `n`-long sorted list.
pub fn biased_index(n: usize, bias: AuthorBias, rng: &mut dyn RandomSource) -> usize {
    let b = bias.value();
    let rand_max = ((n as f64).powf(b).floor() as u64).max(1);
    let r = rng.next_below(rand_max);
    let index = (r as f64).powf(1.0 / b).floor() as usize;
    // Floating point error can push the root past the last slot.
    index.min(n.saturating_sub(1))
}

/// Outcome of an author draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorSelection {
    pub email: String,
    /// Position in the eligible list, least prolific first.
    pub index: usize,
    pub eligible: usize,
}

/// Pick the target author.
///
/// Consumes exactly one draw from `rng`.
pub fn select_author(
    commits: &[CommitRecord],
    bias: AuthorBias,
    rng: &mut dyn RandomSource,
) -> Result<AuthorSelection> {
    let eligible = eligible_authors(commits);
    if eligible.is_empty() {
        return Err(GauthordleError::InsufficientData(format!(
            "there are no authors with {REVEAL_COUNT} or more valid commits"
        )));
    }

    let index = biased_index(eligible.len(), bias, rng);
    let email = eligible[index].0.to_string();
    obs::emit_author_selected(index, eligible.len(), &email);
    Ok(AuthorSelection {
        email,
        index,
        eligible: eligible.len(),
    })
}
