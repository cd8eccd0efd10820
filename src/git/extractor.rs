//! All-refs commit walking and per-commit tree diffing.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone, Utc};
use git2::{
    Commit, Delta, Diff, DiffDelta, DiffFindOptions, DiffOptions, Oid, Patch, Repository, Sort,
};
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::cancel::CancellationToken;
use super::{GitError, GitResult, HistoryResult};
use crate::model::{Author, CommitHistory, CommitRecord};

/// Tuning knobs for extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Collapse a rename into a single entry for the new path.
    pub detect_renames: bool,
    /// Count deleted paths as touched by the deleting commit.
    pub track_deletions: bool,
    /// Leave out files whose only changes are to whitespace.
    pub ignore_whitespace: bool,
    /// Resolve commits on the rayon thread pool.
    pub parallel: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            detect_renames: true,
            track_deletions: true,
            ignore_whitespace: false,
            parallel: false,
        }
    }
}

impl ExtractOptions {
    pub fn with_detect_renames(mut self, detect_renames: bool) -> Self {
        self.detect_renames = detect_renames;
        self
    }

    pub fn with_track_deletions(mut self, track_deletions: bool) -> Self {
        self.track_deletions = track_deletions;
        self
    }

    pub fn with_ignore_whitespace(mut self, ignore_whitespace: bool) -> Self {
        self.ignore_whitespace = ignore_whitespace;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Extracts the full commit history of one repository.
///
/// The extractor owns its repository handle; dropping it releases the
/// handle. Every extraction walks all refs, so the result is independent
/// of which branch happens to be checked out.
pub struct HistoryExtractor {
    repo: Repository,
    options: ExtractOptions,
}

impl HistoryExtractor {
    /// Opens the repository at or above `path` with default options.
    pub fn open(path: &Path) -> GitResult<Self> {
        Self::open_with(path, ExtractOptions::default())
    }

    /// Opens the repository at or above `path`.
    pub fn open_with(path: &Path, options: ExtractOptions) -> GitResult<Self> {
        let repo = Repository::discover(path).map_err(|source| GitError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Opened git repository at {:?}", repo.path());
        Ok(Self { repo, options })
    }

    /// Whether `path` lies in or under a git repository.
    pub fn is_repository(path: &Path) -> bool {
        Repository::discover(path).is_ok()
    }

    /// The repository's working directory. Absent for bare repositories.
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    /// The options this extractor applies.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extracts every distinct commit reachable from any ref.
    pub fn extract(&self) -> HistoryResult<CommitHistory> {
        Ok(self.extract_inner(None)?)
    }

    /// Like [`extract`](Self::extract), but stops early with
    /// [`GitError::Cancelled`] once `token` is cancelled.
    pub fn extract_cancellable(&self, token: &CancellationToken) -> HistoryResult<CommitHistory> {
        Ok(self.extract_inner(Some(token))?)
    }

    fn extract_inner(&self, token: Option<&CancellationToken>) -> GitResult<CommitHistory> {
        let oids = self.reachable_commits(token)?;
        let records = if self.options.parallel {
            self.resolve_parallel(&oids, token)?
        } else {
            self.resolve_sequential(&oids, token)?
        };
        let records = dedup_by_hash(records);
        debug!("Extracted {} unique commit(s)", records.len());
        Ok(CommitHistory::new(records))
    }

    fn reachable_commits(&self, token: Option<&CancellationToken>) -> GitResult<Vec<Oid>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TIME)?;
        revwalk.push_glob("refs/*")?;
        // An unborn HEAD has no commit to push.
        if self.repo.head().is_ok() {
            revwalk.push_head()?;
        }

        let mut oids = Vec::new();
        for oid in revwalk {
            check_cancelled(token)?;
            oids.push(oid?);
        }
        Ok(oids)
    }

    fn resolve_sequential(
        &self,
        oids: &[Oid],
        token: Option<&CancellationToken>,
    ) -> GitResult<Vec<CommitRecord>> {
        let mut records = Vec::with_capacity(oids.len());
        for &oid in oids {
            check_cancelled(token)?;
            let commit = self.repo.find_commit(oid)?;
            records.push(build_record(&self.repo, &commit, &self.options)?);
        }
        Ok(records)
    }

    fn resolve_parallel(
        &self,
        oids: &[Oid],
        token: Option<&CancellationToken>,
    ) -> GitResult<Vec<CommitRecord>> {
        // A repository handle is not thread-safe; every worker opens its
        // own against the same git dir.
        let git_dir = self.repo.path().to_path_buf();
        let options = self.options.clone();
        oids.par_iter()
            .map(|&oid| {
                check_cancelled(token)?;
                let repo = Repository::open(&git_dir).map_err(|source| GitError::Open {
                    path: git_dir.clone(),
                    source,
                })?;
                let commit = repo.find_commit(oid)?;
                build_record(&repo, &commit, &options)
            })
            .collect()
    }
}

/// Opens the repository at or above `path` and extracts its full history
/// with default options. The repository handle is released before this
/// returns.
pub fn extract_commit_history(path: &Path) -> HistoryResult<CommitHistory> {
    let extractor = HistoryExtractor::open(path)?;
    extractor.extract()
}

fn check_cancelled(token: Option<&CancellationToken>) -> GitResult<()> {
    match token {
        Some(token) if token.is_cancelled() => Err(GitError::Cancelled),
        _ => Ok(()),
    }
}

/// Attribution uses the committer identity, not the author.
fn build_record(
    repo: &Repository,
    commit: &Commit<'_>,
    options: &ExtractOptions,
) -> GitResult<CommitRecord> {
    let committer = commit.committer();
    let author = Author::new(
        committer.name().unwrap_or("Unknown"),
        committer.email().unwrap_or(""),
    );
    let record = CommitRecord::new(
        author,
        local_date_time(commit.time().seconds()),
        commit.id().to_string(),
    )
    .with_message(commit.message().unwrap_or(""))
    .with_files(changed_paths(repo, commit, options)?);
    Ok(record)
}

fn local_date_time(epoch_seconds: i64) -> DateTime<Local> {
    Utc.timestamp_opt(epoch_seconds, 0)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
        .with_timezone(&Local)
}

/// Resolves the commit to diff against: the first parent, falling back to
/// HEAD when the parent cannot be looked up, as happens at the edge of a
/// shallow clone. A root commit resolves to `None`.
fn resolve_predecessor<'repo>(
    repo: &'repo Repository,
    commit: &Commit<'_>,
) -> GitResult<Option<Commit<'repo>>> {
    if commit.parent_count() == 0 {
        return Ok(None);
    }
    let hash = commit.id().to_string();
    let first_parent = format!("{hash}~1");
    match peel_to_commit(repo, &first_parent) {
        Ok(predecessor) => Ok(Some(predecessor)),
        Err(primary) => {
            warn!("Falling back to HEAD as predecessor of {hash}: {primary}");
            peel_to_commit(repo, "HEAD")
                .map(Some)
                .map_err(|source| GitError::ResolvePredecessor { hash, source })
        }
    }
}

fn peel_to_commit<'repo>(
    repo: &'repo Repository,
    revspec: &str,
) -> Result<Commit<'repo>, git2::Error> {
    repo.revparse_single(revspec)?.peel_to_commit()
}

fn changed_paths(
    repo: &Repository,
    commit: &Commit<'_>,
    options: &ExtractOptions,
) -> GitResult<BTreeSet<PathBuf>> {
    let hash = commit.id().to_string();
    let predecessor = resolve_predecessor(repo, commit)?;
    // A root commit diffs against the empty tree, so its whole file set
    // counts as touched.
    let old_tree = match &predecessor {
        Some(parent) => Some(parent.tree().map_err(|source| GitError::Diff {
            hash: hash.clone(),
            source,
        })?),
        None => None,
    };
    let new_tree = commit.tree().map_err(|source| GitError::Diff {
        hash: hash.clone(),
        source,
    })?;

    let mut diff_options = DiffOptions::new();
    diff_options.ignore_whitespace(options.ignore_whitespace);
    let mut diff = repo
        .diff_tree_to_tree(old_tree.as_ref(), Some(&new_tree), Some(&mut diff_options))
        .map_err(|source| GitError::Diff {
            hash: hash.clone(),
            source,
        })?;
    if options.detect_renames {
        let mut find_options = DiffFindOptions::new();
        find_options.renames(true);
        diff.find_similar(Some(&mut find_options))
            .map_err(|source| GitError::Diff {
                hash: hash.clone(),
                source,
            })?;
    }

    let mut paths = BTreeSet::new();
    for (index, delta) in diff.deltas().enumerate() {
        // The tree diff keys deltas on blob ids, so a whitespace-only edit
        // still surfaces as Modified; the patch is what reveals it has no
        // hunks left once whitespace is ignored.
        if options.ignore_whitespace
            && matches!(delta.status(), Delta::Modified)
            && whitespace_only(&diff, index).map_err(|source| GitError::Diff {
                hash: hash.clone(),
                source,
            })?
        {
            continue;
        }
        if let Some(path) = touched_path(&delta, options.track_deletions) {
            paths.insert(path);
        }
    }
    Ok(paths)
}

/// Whether the delta at `index` produces no hunks under the diff's
/// options. Binary and unreadable entries carry no patch and never
/// qualify.
fn whitespace_only(diff: &Diff<'_>, index: usize) -> Result<bool, git2::Error> {
    let patch = Patch::from_diff(diff, index)?;
    Ok(patch.is_some_and(|patch| patch.num_hunks() == 0))
}

/// The path a delta contributes to the touched set. A rename contributes
/// its new path only; a deletion contributes its old path, or nothing when
/// deletion tracking is off.
fn touched_path(delta: &DiffDelta<'_>, track_deletions: bool) -> Option<PathBuf> {
    match delta.status() {
        Delta::Deleted => {
            if track_deletions {
                delta.old_file().path().map(Path::to_path_buf)
            } else {
                None
            }
        }
        _ => delta
            .new_file()
            .path()
            .or_else(|| delta.old_file().path())
            .map(Path::to_path_buf),
    }
}

fn dedup_by_hash(records: Vec<CommitRecord>) -> Vec<CommitRecord> {
    let mut seen: FxHashSet<String> = FxHashSet::default();
    records
        .into_iter()
        .filter(|record| seen.insert(record.hash().to_string()))
        .collect()
}
