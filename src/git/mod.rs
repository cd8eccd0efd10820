//! Commit history extraction from git repositories
//!
//! Walks every commit reachable from a repository's refs and turns each
//! one into a [`CommitRecord`](crate::model::CommitRecord): committer
//! identity, local-time timestamp, full hash, full message, and the set
//! of paths the commit touched relative to its predecessor.
//!
//! # Features
//!
//! - All-refs walk with hash-keyed deduplication
//! - Tree diffs with rename detection and optional whitespace handling
//! - Predecessor resolution with a HEAD fallback for shallow edge cases
//! - Optional parallel diffing and cooperative cancellation
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use gitprov::git::HistoryExtractor;
//!
//! let extractor = HistoryExtractor::open(Path::new("/path/to/repo")).unwrap();
//! let history = extractor.extract().unwrap();
//! for record in &history {
//!     println!("{} {}", record.short_hash(), record.author());
//! }
//! ```

pub mod cancel;
pub mod extractor;

pub use cancel::CancellationToken;
pub use extractor::{extract_commit_history, ExtractOptions, HistoryExtractor};

use std::path::PathBuf;

use thiserror::Error;

/// Errors from the underlying repository operations.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Failed to open repository at {path:?}: {source}")]
    Open { path: PathBuf, source: git2::Error },

    #[error("Failed to walk commit graph: {0}")]
    Walk(#[from] git2::Error),

    #[error("Failed to resolve a predecessor for {hash}: {source}")]
    ResolvePredecessor { hash: String, source: git2::Error },

    #[error("Failed to diff commit {hash}: {source}")]
    Diff { hash: String, source: git2::Error },

    #[error("Extraction cancelled")]
    Cancelled,
}

pub type GitResult<T> = Result<T, GitError>;

/// The single error surfaced by history extraction. The underlying
/// [`GitError`] stays available through [`cause`](HistoryError::cause)
/// and the standard source chain.
#[derive(Error, Debug)]
#[error("Failed to load commit history")]
pub struct HistoryError(#[from] GitError);

impl HistoryError {
    /// The repository-level failure behind this error.
    pub fn cause(&self) -> &GitError {
        &self.0
    }
}

pub type HistoryResult<T> = Result<T, HistoryError>;
