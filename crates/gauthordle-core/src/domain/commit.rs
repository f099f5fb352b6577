//! Commit records as produced by the log collaborator.

use serde::{Deserialize, Serialize};

/// A single commit, reduced to the fields the game cares about.
///
/// Records are never mutated in place; every transform produces a new
/// sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommitRecord {
    pub author_name: String,
    pub author_email: String,
    pub subject_line: String,
}

impl CommitRecord {
    pub fn new(
        author_name: impl Into<String>,
        author_email: impl Into<String>,
        subject_line: impl Into<String>,
    ) -> Self {
        Self {
            author_name: author_name.into(),
            author_email: author_email.into(),
            subject_line: subject_line.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_record_json_field_names() {
        let commit = CommitRecord::new("Ada Lovelace", "ada@example.com", "add engine notes");
        let json = serde_json::to_value(&commit).unwrap();
        assert_eq!(json["author_name"], "Ada Lovelace");
        assert_eq!(json["author_email"], "ada@example.com");
        assert_eq!(json["subject_line"], "add engine notes");
    }
}
