//! Value types describing commits, authors, revisions, and source files.
//!
//! These types carry the extracted history once it leaves the repository:
//! [`CommitRecord`] and [`CommitHistory`] for the commit-centric view,
//! [`SourceFile`] and [`Revision`] for the file-centric one. They hold no
//! repository handles, so they stay valid after extraction and can be
//! queried, serialized, and shipped across threads freely.

mod author;
mod commit;
mod file_type;
mod revision;
mod source_file;

use std::path::PathBuf;

use thiserror::Error;

pub use author::Author;
pub use commit::{CommitHistory, CommitRecord};
pub use file_type::FileType;
pub use revision::Revision;
pub use source_file::SourceFile;

/// Errors from constructing or mutating the model types.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The path handed to [`SourceFile::new`] is not a regular file.
    #[error("Not a regular file: {path:?}")]
    NotAFile { path: PathBuf },

    /// The same commit id was recorded twice against one file.
    #[error("Revision {id} already recorded for {path:?}")]
    DuplicateRevision { id: String, path: PathBuf },
}

/// Convenience alias for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_name_the_offending_path() {
        let missing = ModelError::NotAFile {
            path: PathBuf::from("src/Missing.java"),
        };
        assert_eq!(missing.to_string(), "Not a regular file: \"src/Missing.java\"");

        let duplicate = ModelError::DuplicateRevision {
            id: "abc123".into(),
            path: PathBuf::from("src/A.java"),
        };
        assert_eq!(
            duplicate.to_string(),
            "Revision abc123 already recorded for \"src/A.java\""
        );
    }
}
