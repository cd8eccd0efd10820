//! A single recorded change to a source file.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Local, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::Author;

/// One change to a file: who made it, when, and the commit it came from.
///
/// Revisions order chronologically, with the commit id breaking ties so
/// that two revisions recorded in the same second still have a stable,
/// total order. Equality is consistent with that ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Revision {
    author: Author,
    date_time: DateTime<Local>,
    id: String,
}

impl Revision {
    /// Creates a revision from its author, timestamp, and commit id.
    pub fn new(author: Author, date_time: DateTime<Local>, id: impl Into<String>) -> Self {
        Self {
            author,
            date_time,
            id: id.into(),
        }
    }

    /// Who made the change.
    pub fn author(&self) -> &Author {
        &self.author
    }

    /// When the change was recorded, in the local timezone.
    pub fn date_time(&self) -> DateTime<Local> {
        self.date_time
    }

    /// The calendar date of the change.
    pub fn date(&self) -> NaiveDate {
        self.date_time.date_naive()
    }

    /// The time of day of the change.
    pub fn time(&self) -> NaiveTime {
        self.date_time.time()
    }

    /// The identifier of the commit that produced this revision.
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl PartialEq for Revision {
    fn eq(&self, other: &Self) -> bool {
        self.date_time == other.date_time && self.id == other.id
    }
}

impl Eq for Revision {}

impl PartialOrd for Revision {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Revision {
    fn cmp(&self, other: &Self) -> Ordering {
        self.date_time
            .cmp(&other.date_time)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn at(seconds: i64) -> DateTime<Local> {
        Utc.timestamp_opt(seconds, 0)
            .single()
            .unwrap()
            .with_timezone(&Local)
    }

    fn revision(seconds: i64, id: &str) -> Revision {
        Revision::new(Author::new("Test User", "test@example.com"), at(seconds), id)
    }

    #[test]
    fn orders_chronologically() {
        let older = revision(1_700_000_000, "bbb");
        let newer = revision(1_700_086_400, "aaa");
        assert!(older < newer);
    }

    #[test]
    fn commit_id_breaks_timestamp_ties() {
        let first = revision(1_700_000_000, "aaa");
        let second = revision(1_700_000_000, "bbb");
        assert!(first < second);
        assert_ne!(first, second);
    }

    #[test]
    fn equality_requires_timestamp_and_id() {
        let a = revision(1_700_000_000, "aaa");
        let b = revision(1_700_000_000, "aaa");
        assert_eq!(a, b);
        assert_ne!(a, revision(1_700_000_001, "aaa"));
    }

    #[test]
    fn splits_date_and_time_of_day() {
        let rev = revision(1_700_000_000, "aaa");
        assert_eq!(rev.date(), rev.date_time().date_naive());
        assert_eq!(rev.time(), rev.date_time().time());
    }

    #[test]
    fn display_is_the_commit_id() {
        assert_eq!(revision(1_700_000_000, "abc123").to_string(), "abc123");
    }
}
