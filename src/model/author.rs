//! Commit author identity.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// The person a commit is attributed to.
///
/// Identity is keyed on the display name alone: two authors with the same
/// name compare equal even when their email addresses differ. This folds
/// together the address drift that accumulates in long-lived repositories
/// (corporate renames, personal vs. work addresses) under one identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    name: String,
    email_address: String,
}

impl Author {
    /// Creates an author from a display name and email address.
    pub fn new(name: impl Into<String>, email_address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email_address: email_address.into(),
        }
    }

    /// The author's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The author's email address. May be empty when the repository
    /// recorded none.
    pub fn email_address(&self) -> &str {
        &self.email_address
    }

    /// Whether `query` equals the name or the email address,
    /// case-insensitively. Comparison folds through Unicode lowercase,
    /// so non-ASCII names match regardless of casing.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase() == query || self.email_address.to_lowercase() == query
    }
}

impl PartialEq for Author {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Author {}

impl PartialOrd for Author {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Author {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl Hash for Author {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email_address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_keyed_on_name() {
        let work = Author::new("Jane Smith", "jane@corp.example.com");
        let personal = Author::new("Jane Smith", "jane@home.example.org");
        let other = Author::new("John Smith", "jane@corp.example.com");

        assert_eq!(work, personal);
        assert_ne!(work, other);
    }

    #[test]
    fn ordering_follows_name() {
        let mut authors = vec![
            Author::new("Charlie", "c@example.com"),
            Author::new("Alice", "a@example.com"),
            Author::new("Bob", "b@example.com"),
        ];
        authors.sort();
        let names: Vec<&str> = authors.iter().map(Author::name).collect();
        assert_eq!(names, ["Alice", "Bob", "Charlie"]);
    }

    #[test]
    fn matches_is_case_insensitive() {
        let author = Author::new("Jane Smith", "Jane.Smith@Example.COM");
        assert!(author.matches("jane smith"));
        assert!(author.matches("JANE SMITH"));
        assert!(author.matches("jane.smith@example.com"));
        assert!(!author.matches("john smith"));
    }

    #[test]
    fn matches_compares_whole_fields() {
        let author = Author::new("jdoe", "jane.doe@example.com");
        assert!(author.matches("jdoe"));
        assert!(author.matches("jane.doe@example.com"));
        // A fragment of either field is not a match.
        assert!(!author.matches("jane.doe"));
        assert!(!author.matches("doe"));
    }

    #[test]
    fn display_renders_name_and_address() {
        let author = Author::new("Jane Smith", "jane@example.com");
        assert_eq!(author.to_string(), "Jane Smith <jane@example.com>");
    }
}
