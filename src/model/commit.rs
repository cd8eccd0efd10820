//! Commit records and the deduplicated history they form.

use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::Author;
use crate::time_window::TimeWindow;

/// One commit: who recorded it, when, the full hash, the full message,
/// and the set of repository-relative paths it touched.
///
/// Identity is keyed on the hash alone, which is what makes a set of
/// records collapse the same commit reached through several refs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitRecord {
    author: Author,
    date_time: DateTime<Local>,
    hash: String,
    message: String,
    files: BTreeSet<PathBuf>,
}

impl CommitRecord {
    /// Creates a record with an empty message and no touched files.
    pub fn new(author: Author, date_time: DateTime<Local>, hash: impl Into<String>) -> Self {
        Self {
            author,
            date_time,
            hash: hash.into(),
            message: String::new(),
            files: BTreeSet::new(),
        }
    }

    /// Sets the full commit message, subject and body.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Sets the touched paths. Duplicates collapse into one entry.
    pub fn with_files(mut self, files: impl IntoIterator<Item = PathBuf>) -> Self {
        self.files = files.into_iter().collect();
        self
    }

    /// Adds one touched path.
    pub fn add_file(&mut self, path: impl Into<PathBuf>) {
        self.files.insert(path.into());
    }

    /// The identity the commit is attributed to.
    pub fn author(&self) -> &Author {
        &self.author
    }

    /// When the commit was recorded, in the local timezone.
    pub fn date_time(&self) -> DateTime<Local> {
        self.date_time
    }

    /// The full commit hash.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// An abbreviated hash for display, twelve characters at most.
    pub fn short_hash(&self) -> &str {
        self.hash.get(..12).unwrap_or(&self.hash)
    }

    /// The full commit message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The repository-relative paths this commit touched, in path order.
    pub fn files(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(PathBuf::as_path)
    }

    /// Whether the commit touched `path`.
    pub fn touched(&self, path: &Path) -> bool {
        self.files.contains(path)
    }

    /// Number of distinct paths the commit touched.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

impl PartialEq for CommitRecord {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for CommitRecord {}

impl Hash for CommitRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash.hash(state);
    }
}

/// Every distinct commit reachable from a repository's refs, newest first.
///
/// Construction keeps one record per hash, so a history deserialized from
/// outside input holds the same invariants as an extracted one. Ordering
/// is by timestamp, newest first, with the hash breaking ties so the
/// sequence is stable across runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<CommitRecord>", into = "Vec<CommitRecord>")]
pub struct CommitHistory {
    records: Vec<CommitRecord>,
}

impl CommitHistory {
    /// Builds a history, sorting records newest first and collapsing
    /// duplicate hashes. When the same hash appears more than once the
    /// newest record wins.
    pub fn new(mut records: Vec<CommitRecord>) -> Self {
        records.sort_by(|a, b| {
            b.date_time
                .cmp(&a.date_time)
                .then_with(|| b.hash.cmp(&a.hash))
        });
        let mut seen: FxHashSet<String> = FxHashSet::default();
        records.retain(|record| seen.insert(record.hash.clone()));
        Self { records }
    }

    /// Number of distinct commits.
    pub fn commit_count(&self) -> usize {
        self.records.len()
    }

    /// Whether the history holds no commits at all.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over commits, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &CommitRecord> {
        self.records.iter()
    }

    /// Looks up a commit by its full hash.
    pub fn find_by_hash(&self, hash: &str) -> Option<&CommitRecord> {
        self.records.iter().find(|record| record.hash == hash)
    }

    /// Commits attributed to `author`, newest first. Authors are compared
    /// by identity, so the email address does not have to match.
    pub fn commits_by(&self, author: &Author) -> Vec<&CommitRecord> {
        self.records
            .iter()
            .filter(|record| record.author() == author)
            .collect()
    }

    /// Commits whose author name or email address matches `query`
    /// case-insensitively, newest first.
    pub fn commits_matching(&self, query: &str) -> Vec<&CommitRecord> {
        self.records
            .iter()
            .filter(|record| record.author().matches(query))
            .collect()
    }

    /// Commits whose calendar date falls within `window`, newest first.
    pub fn commits_during(&self, window: &TimeWindow) -> Vec<&CommitRecord> {
        self.records
            .iter()
            .filter(|record| window.contains(record.date_time().date_naive()))
            .collect()
    }

    /// Commits that touched `path`, newest first.
    pub fn commits_touching(&self, path: &Path) -> Vec<&CommitRecord> {
        self.records
            .iter()
            .filter(|record| record.touched(path))
            .collect()
    }

    /// Every distinct author across the history, ordered by name.
    pub fn authors(&self) -> BTreeSet<&Author> {
        self.records.iter().map(CommitRecord::author).collect()
    }

    /// The oldest commit in the history.
    pub fn earliest_commit(&self) -> Option<&CommitRecord> {
        self.records.last()
    }

    /// The newest commit in the history.
    pub fn latest_commit(&self) -> Option<&CommitRecord> {
        self.records.first()
    }

    /// The union of every path touched anywhere in the history.
    pub fn touched_paths(&self) -> BTreeSet<&Path> {
        self.records.iter().flat_map(CommitRecord::files).collect()
    }
}

impl<'a> IntoIterator for &'a CommitHistory {
    type Item = &'a CommitRecord;
    type IntoIter = std::slice::Iter<'a, CommitRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl From<Vec<CommitRecord>> for CommitHistory {
    fn from(records: Vec<CommitRecord>) -> Self {
        Self::new(records)
    }
}

impl From<CommitHistory> for Vec<CommitRecord> {
    fn from(history: CommitHistory) -> Self {
        history.records
    }
}
