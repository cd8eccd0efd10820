//! Commit provenance for git repositories
//!
//! Extracts the full commit history of a repository and aggregates it
//! into a per-file revision index, so callers can answer "who changed
//! what, and when" without holding a repository handle.
//!
//! # Features
//!
//! - Walk every commit reachable from any ref, deduplicated by hash
//! - Record committer identity, local-time timestamp, full hash, full
//!   message, and the touched paths of each commit
//! - Rename-aware tree diffing, with the root commit counted against
//!   the empty tree
//! - Per-file revision histories with author, pattern, and date-window
//!   queries
//! - Optional parallel extraction and cooperative cancellation
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use gitprov::{HistoryExtractor, SourceFileIndex};
//!
//! let extractor = HistoryExtractor::open(Path::new("/path/to/repo")).unwrap();
//! let history = extractor.extract().unwrap();
//! println!("{} commits", history.commit_count());
//!
//! let root = extractor.workdir().unwrap();
//! let index = SourceFileIndex::from_history(&history, root).unwrap();
//! for file in &index {
//!     println!("{}: {} revision(s)", file, file.revision_count());
//! }
//! ```

pub mod git;
pub mod index;
pub mod model;
pub mod time_window;

pub use git::{
    extract_commit_history, CancellationToken, ExtractOptions, GitError, GitResult,
    HistoryError, HistoryExtractor, HistoryResult,
};
pub use index::SourceFileIndex;
pub use model::{
    Author, CommitHistory, CommitRecord, FileType, ModelError, ModelResult, Revision, SourceFile,
};
pub use time_window::TimeWindow;
