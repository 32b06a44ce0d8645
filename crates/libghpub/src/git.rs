use std::{
    path::Path,
    process::{Command, Output},
    result::Result as StdResult,
};

use thiserror::Error;

/// Failure of a git subcommand: the process could not be spawned or exited
/// with a non-zero status.
#[derive(Debug, Error)]
#[error("Git command failed: {command}\nError: {detail}")]
pub struct GitError {
    /// The full command line that failed.
    pub command: String,
    /// Spawn failure or trimmed stderr of the failing command.
    pub detail: String,
}

/// Result alias for git helper functions.
pub type Result<T> = StdResult<T, GitError>;

/// Spawn a git command in `repo_path` and wait for it, without interpreting
/// its exit status. Only a spawn failure is an error here; callers that need
/// exit-code branching (ref verification, commit) inspect the output
/// themselves.
fn spawn_git(repo_path: &Path, args: &[&str]) -> Result<Output> {
    Command::new("git")
        .current_dir(repo_path)
        .args(args)
        .output()
        .map_err(|e| GitError {
            command: format!("git {}", args.join(" ")),
            detail: e.to_string(),
        })
}

/// Run a git command with the given arguments in the specified directory.
/// Returns the output if successful, otherwise returns an error with the full
/// command details.
fn run_git(repo_path: &Path, args: &[&str]) -> Result<Output> {
    let output = spawn_git(repo_path, args)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(GitError {
            command: format!("git {}", args.join(" ")),
            detail: stderr.trim().to_string(),
        });
    }

    Ok(output)
}

/// Check whether the repository has staged or unstaged changes.
pub fn has_uncommitted_changes(repo_path: &Path) -> Result<bool> {
    let output = run_git(repo_path, &["status", "--porcelain"])?;
    let status_output = String::from_utf8_lossy(&output.stdout);
    Ok(!status_output.trim().is_empty())
}

/// Read the origin URL configured for the repository. Returns `None` when no
/// origin is configured; `git config --get` exits non-zero for a missing key,
/// which is not a failure of the query itself.
pub fn remote_origin_url(repo_path: &Path) -> Result<Option<String>> {
    let output = spawn_git(repo_path, &["config", "--get", "remote.origin.url"])?;
    if !output.status.success() {
        return Ok(None);
    }

    let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Ok(if url.is_empty() { None } else { Some(url) })
}

/// Initialize a new repository in `repo_path`.
pub fn init(repo_path: &Path) -> Result<()> {
    run_git(repo_path, &["init"])?;
    Ok(())
}

/// Register `url` as the `origin` remote of the repository.
pub fn add_remote_origin(repo_path: &Path, url: &str) -> Result<()> {
    run_git(repo_path, &["remote", "add", "origin", url])?;
    Ok(())
}

/// Determine whether a local branch named `branch` exists, by exit code of
/// `git show-ref --verify --quiet`.
pub fn branch_exists(repo_path: &Path, branch: &str) -> Result<bool> {
    let refname = format!("refs/heads/{branch}");
    let output = spawn_git(repo_path, &["show-ref", "--verify", "--quiet", &refname])?;
    Ok(output.status.success())
}

/// Check out the existing branch named `branch`.
pub fn checkout(repo_path: &Path, branch: &str) -> Result<()> {
    run_git(repo_path, &["checkout", branch])?;
    Ok(())
}

/// Create and check out a new branch named `branch`.
pub fn checkout_new(repo_path: &Path, branch: &str) -> Result<()> {
    run_git(repo_path, &["checkout", "-b", branch])?;
    Ok(())
}

/// Stage all tracked and untracked changes in the repository.
pub fn add_all(repo_path: &Path) -> Result<()> {
    run_git(repo_path, &["add", "-A"])?;
    Ok(())
}

/// Result of attempting a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// A commit was created.
    Committed,
    /// Git reported there was nothing staged to commit.
    NothingToCommit,
}

/// Create a commit with the provided `message`. An empty index is reported as
/// [`CommitOutcome::NothingToCommit`] rather than an error; git prints that
/// diagnostic on stdout, so both streams are inspected.
pub fn commit(repo_path: &Path, message: &str) -> Result<CommitOutcome> {
    let output = spawn_git(repo_path, &["commit", "-m", message])?;
    if output.status.success() {
        return Ok(CommitOutcome::Committed);
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    if stdout.contains("nothing to commit")
        || stderr.contains("nothing to commit")
        || stdout.contains("nothing added to commit")
    {
        return Ok(CommitOutcome::NothingToCommit);
    }

    let detail = if stderr.trim().is_empty() {
        stdout.trim().to_string()
    } else {
        stderr.trim().to_string()
    };
    Err(GitError {
        command: format!("git commit -m {message}"),
        detail,
    })
}

/// Force-push `branch` to the `origin` remote.
pub fn push_force(repo_path: &Path, branch: &str) -> Result<()> {
    run_git(repo_path, &["push", "origin", branch, "--force"])?;
    Ok(())
}
