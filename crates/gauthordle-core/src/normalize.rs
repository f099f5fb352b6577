//! Author detail normalization.
//!
//! Emails are case-insensitive, and people rename themselves over time. This
//! pass lower-cases every email and gives every commit sharing an email the
//! same canonical display name.

use std::collections::{BTreeMap, HashMap};

use crate::domain::CommitRecord;

/// Produce a normalized copy of `commits`.
///
/// The input is newest-first. Walking it from the last element toward the
/// first, the first time an email is seen fixes its canonical name.
pub fn normalize_authors(commits: &[CommitRecord]) -> Vec<CommitRecord> {
    let mut canonical_names: HashMap<String, String> = HashMap::new();
    let mut normalized: Vec<CommitRecord> = commits
        .iter()
        .rev()
        .map(|commit| {
            let author_email = commit.author_email.to_lowercase();
            let author_name = canonical_names
                .entry(author_email.clone())
                .or_insert_with(|| commit.author_name.clone())
                .clone();
            CommitRecord {
                author_name,
                author_email,
                subject_line: commit.subject_line.clone(),
            }
        })
        .collect();

    normalized.reverse();
    normalized
}

/// Canonical display name per email for an already-normalized sequence.
pub fn display_names<'a, I>(commits: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = &'a CommitRecord>,
{
    commits
        .into_iter()
        .map(|c| (c.author_email.clone(), c.author_name.clone()))
        .collect()
}
