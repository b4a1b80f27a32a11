//! Recent commit retrieval for style profiling.

use chrono::{TimeZone, Utc};
use git2::{Commit, ErrorCode, Repository, Sort};

use crate::error::GitError;
use crate::history::CommitRecord;

fn to_record(commit: &Commit) -> CommitRecord {
    let message = commit
        .message()
        .and_then(|m| m.lines().next())
        .unwrap_or("")
        .trim()
        .to_string();
    let timestamp = Utc.timestamp_opt(commit.time().seconds(), 0).single();

    CommitRecord {
        hash: commit.id().to_string(),
        message,
        timestamp,
    }
}

/// Fetch up to `limit` commits reachable from HEAD, newest first.
///
/// A repository without commits yields an empty list.
pub fn recent_commits(repo: &Repository, limit: usize) -> Result<Vec<CommitRecord>, GitError> {
    let mut revwalk = repo.revwalk().map_err(GitError::RevwalkError)?;
    revwalk
        .set_sorting(Sort::TIME)
        .map_err(GitError::RevwalkError)?;

    match revwalk.push_head() {
        Ok(()) => {}
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
            return Ok(Vec::new());
        }
        Err(e) => return Err(GitError::RevwalkError(e)),
    }

    let mut commits = Vec::new();
    for oid_result in revwalk.take(limit) {
        let oid = oid_result.map_err(GitError::RevwalkError)?;
        let commit = repo.find_commit(oid).map_err(GitError::ParseCommit)?;
        commits.push(to_record(&commit));
    }

    Ok(commits)
}
