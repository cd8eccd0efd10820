//! Per-file revision index built from a commit history.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::model::{CommitHistory, FileType, ModelResult, Revision, SourceFile};

/// Groups a [`CommitHistory`] into one [`SourceFile`] per touched path
/// that still exists under the repository root.
///
/// Keys are repository-relative paths; each [`SourceFile`] holds the
/// root-joined absolute path. Paths that appear in history but are no
/// longer on disk are skipped, so the index describes the working tree
/// as it stands now, not every file that ever existed.
#[derive(Debug, Clone)]
pub struct SourceFileIndex {
    files: BTreeMap<PathBuf, SourceFile>,
}

impl SourceFileIndex {
    /// Builds the index from `history`, resolving paths against `root`.
    ///
    /// Fails with [`DuplicateRevision`](crate::model::ModelError::DuplicateRevision)
    /// when a revision would be recorded twice for one path. Histories
    /// collapse duplicate hashes on construction, so this never fires for
    /// an extracted or deserialized history.
    pub fn from_history(history: &CommitHistory, root: &Path) -> ModelResult<Self> {
        let mut files = BTreeMap::new();
        let mut vanished: FxHashSet<&Path> = FxHashSet::default();
        for record in history {
            for relative in record.files() {
                let absolute = root.join(relative);
                if !absolute.is_file() {
                    vanished.insert(relative);
                    continue;
                }
                let file = match files.entry(relative.to_path_buf()) {
                    Entry::Occupied(entry) => entry.into_mut(),
                    Entry::Vacant(entry) => entry.insert(SourceFile::new(absolute)?),
                };
                file.add_revision(Revision::new(
                    record.author().clone(),
                    record.date_time(),
                    record.hash(),
                ))?;
            }
        }
        if !vanished.is_empty() {
            debug!("Skipped {} path(s) no longer present on disk", vanished.len());
        }
        Ok(Self { files })
    }

    /// Looks up a file by its repository-relative path.
    pub fn get(&self, path: &Path) -> Option<&SourceFile> {
        self.files.get(path)
    }

    /// Number of indexed files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the index holds no files.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterates over indexed files in path order.
    pub fn iter(&self) -> impl Iterator<Item = &SourceFile> {
        self.files.values()
    }

    /// The repository-relative path of every indexed file, in order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.keys().map(PathBuf::as_path)
    }

    /// Files classified as `file_type`, in path order.
    pub fn files_of_type(&self, file_type: FileType) -> Vec<&SourceFile> {
        self.files
            .values()
            .filter(|file| file.file_type() == file_type)
            .collect()
    }
}

impl<'a> IntoIterator for &'a SourceFileIndex {
    type Item = &'a SourceFile;
    type IntoIter = std::collections::btree_map::Values<'a, PathBuf, SourceFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.values()
    }
}
