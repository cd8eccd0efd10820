//! A source file and its recorded revision history.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use chrono::{DateTime, Local};

use super::{Author, FileType, ModelError, Revision};
use crate::time_window::TimeWindow;

/// A file on disk together with every revision recorded against it.
///
/// Revisions are held in chronological order and are unique per commit id.
/// The file's [`FileType`] is derived from its extension on first use and
/// memoized for the lifetime of the value.
///
/// Identity follows the path: two `SourceFile`s compare equal when they
/// point at the same file, regardless of how much history each carries.
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: PathBuf,
    file_type: OnceLock<FileType>,
    revisions: BTreeSet<Revision>,
}

impl SourceFile {
    /// Creates an empty history for the file at `path`.
    ///
    /// Fails with [`ModelError::NotAFile`] when `path` does not name a
    /// regular file on disk.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, ModelError> {
        let path = path.into();
        if !path.is_file() {
            return Err(ModelError::NotAFile { path });
        }
        Ok(Self {
            path,
            file_type: OnceLock::new(),
            revisions: BTreeSet::new(),
        })
    }

    /// Records a revision against this file.
    ///
    /// Fails with [`ModelError::DuplicateRevision`] when a revision with
    /// the same commit id was already recorded. A commit touches a file
    /// once; seeing it twice means the caller's extraction is broken.
    pub fn add_revision(&mut self, revision: Revision) -> Result<(), ModelError> {
        if self.revisions.iter().any(|known| known.id() == revision.id()) {
            return Err(ModelError::DuplicateRevision {
                id: revision.id().to_string(),
                path: self.path.clone(),
            });
        }
        self.revisions.insert(revision);
        Ok(())
    }

    /// Records a revision and returns the file, for chained construction.
    pub fn with_revision(mut self, revision: Revision) -> Result<Self, ModelError> {
        self.add_revision(revision)?;
        Ok(self)
    }

    /// The path this history was built for.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The file's type, derived from its extension on first call and
    /// memoized after that.
    pub fn file_type(&self) -> FileType {
        *self
            .file_type
            .get_or_init(|| FileType::from_path(&self.path))
    }

    /// Number of recorded revisions.
    pub fn revision_count(&self) -> usize {
        self.revisions.len()
    }

    /// The commit ids of every recorded revision.
    pub fn revision_ids(&self) -> BTreeSet<&str> {
        self.revisions.iter().map(Revision::id).collect()
    }

    /// Looks up a revision by commit id.
    pub fn revision(&self, id: &str) -> Option<&Revision> {
        self.revisions.iter().find(|revision| revision.id() == id)
    }

    /// Revisions made by `author`, oldest first. Authors are compared by
    /// identity, so the email address does not have to match.
    pub fn revisions_by(&self, author: &Author) -> Vec<&Revision> {
        self.revisions
            .iter()
            .filter(|revision| revision.author() == author)
            .collect()
    }

    /// Revisions whose author name or email address matches `query`
    /// case-insensitively, oldest first.
    pub fn revisions_matching(&self, query: &str) -> Vec<&Revision> {
        self.revisions
            .iter()
            .filter(|revision| revision.author().matches(query))
            .collect()
    }

    /// Revisions whose calendar date falls within `window`, oldest first.
    pub fn revisions_during(&self, window: &TimeWindow) -> Vec<&Revision> {
        self.revisions
            .iter()
            .filter(|revision| window.contains(revision.date()))
            .collect()
    }

    /// The oldest recorded revision.
    pub fn first_revision(&self) -> Option<&Revision> {
        self.revisions.first()
    }

    /// When the oldest revision was recorded.
    pub fn first_revision_date_time(&self) -> Option<DateTime<Local>> {
        self.first_revision().map(Revision::date_time)
    }

    /// The newest recorded revision.
    pub fn last_revision(&self) -> Option<&Revision> {
        self.revisions.last()
    }

    /// When the newest revision was recorded.
    pub fn last_revision_date_time(&self) -> Option<DateTime<Local>> {
        self.last_revision().map(Revision::date_time)
    }

    /// Whether `author` made at least one revision.
    pub fn was_modified_by(&self, author: &Author) -> bool {
        self.revisions
            .iter()
            .any(|revision| revision.author() == author)
    }

    /// Whether any revision's author matches `query` case-insensitively.
    pub fn was_modified_matching(&self, query: &str) -> bool {
        self.revisions
            .iter()
            .any(|revision| revision.author().matches(query))
    }

    /// Whether any revision falls within `window`.
    pub fn was_modified_during(&self, window: &TimeWindow) -> bool {
        self.revisions
            .iter()
            .any(|revision| window.contains(revision.date()))
    }

    /// Every distinct author that touched this file, ordered by name.
    pub fn authors(&self) -> BTreeSet<&Author> {
        self.revisions.iter().map(Revision::author).collect()
    }

    /// Iterates over revisions, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Revision> {
        self.revisions.iter()
    }
}

impl<'a> IntoIterator for &'a SourceFile {
    type Item = &'a Revision;
    type IntoIter = std::collections::btree_set::Iter<'a, Revision>;

    fn into_iter(self) -> Self::IntoIter {
        self.revisions.iter()
    }
}

impl PartialEq for SourceFile {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for SourceFile {}

impl PartialOrd for SourceFile {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SourceFile {
    fn cmp(&self, other: &Self) -> Ordering {
        self.path.cmp(&other.path)
    }
}

impl fmt::Display for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
