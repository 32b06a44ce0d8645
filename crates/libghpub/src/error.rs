use std::{fmt, io, path::PathBuf, result::Result as StdResult};

use thiserror::Error;

/// Custom Result type for deploy operations.
pub type Result<T> = StdResult<T, DeployError>;

/// Pipeline stage that produced a failure.
///
/// Every [`DeployError`] that originates inside the publish sequence carries
/// the stage it came from, so callers can branch on failure category
/// uniformly instead of parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Clean-working-tree verification in the source tree.
    Precondition,
    /// Reading the configured origin URL from the source tree.
    ReadRemote,
    /// Deleting and recreating the cache directory.
    ResetCache,
    /// Repository init and remote registration inside the cache.
    InitRepo,
    /// Switching to (or creating) the gh-pages branch in the cache.
    Checkout,
    /// Copying the source directory into the cache.
    Copy,
    /// Staging and committing the cache contents.
    Commit,
    /// Force-pushing the gh-pages branch to origin.
    Push,
    /// Removing the cache directory after the run.
    Cleanup,
}

impl Stage {
    /// Human-readable stage label used in error messages.
    fn as_str(self) -> &'static str {
        match self {
            Self::Precondition => "precondition check",
            Self::ReadRemote => "read remote",
            Self::ResetCache => "reset cache",
            Self::InitRepo => "init cache repo",
            Self::Checkout => "checkout gh-pages",
            Self::Copy => "copy contents",
            Self::Commit => "commit",
            Self::Push => "push",
            Self::Cleanup => "cleanup",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deploy-specific error types.
#[derive(Error, Debug)]
pub enum DeployError {
    /// The source working tree has uncommitted changes and force mode is off.
    #[error("Uncommitted changes in {}! Deploy failed.", repo_dir.display())]
    UncommittedChanges {
        /// Source working tree with uncommitted changes.
        repo_dir: PathBuf,
    },

    /// The source working tree has no usable origin remote configured.
    #[error("No remote repository configured in {}! Deploy failed.", repo_dir.display())]
    MissingRemote {
        /// Source working tree the remote was read from.
        repo_dir: PathBuf,
    },

    /// A git command failed during the given stage.
    #[error("{stage}: {message}")]
    Git {
        /// Stage the command ran in.
        stage: Stage,
        /// Full command line and trimmed stderr of the failure.
        message: String,
    },

    /// A filesystem operation failed during the given stage.
    #[error("{stage}: {source}")]
    Io {
        /// Stage the operation ran in.
        stage: Stage,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// Removing the cache directory failed.
    #[error("Failed to remove cache directory {}: {source}", path.display())]
    Cleanup {
        /// Cache directory that could not be removed.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

impl DeployError {
    /// Return the recommended process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::UncommittedChanges { .. } | Self::MissingRemote { .. } => 2,
            Self::Git { .. } => 4,
            _ => 1,
        }
    }

    /// The stage this error originated in, when known.
    pub fn stage(&self) -> Stage {
        match self {
            Self::UncommittedChanges { .. } => Stage::Precondition,
            Self::MissingRemote { .. } => Stage::ReadRemote,
            Self::Git { stage, .. } | Self::Io { stage, .. } => *stage,
            Self::Cleanup { .. } => Stage::Cleanup,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let test_cases = vec![
            (
                DeployError::UncommittedChanges {
                    repo_dir: PathBuf::from("/work/site"),
                },
                2,
            ),
            (
                DeployError::MissingRemote {
                    repo_dir: PathBuf::from("/work/site"),
                },
                2,
            ),
            (
                DeployError::Git {
                    stage: Stage::Push,
                    message: "git push origin gh-pages --force failed".to_string(),
                },
                4,
            ),
            (
                DeployError::Io {
                    stage: Stage::Copy,
                    source: io::Error::other("disk full"),
                },
                1,
            ),
            (
                DeployError::Cleanup {
                    path: PathBuf::from("/work/site/.gh-pages-cache"),
                    source: io::Error::other("busy"),
                },
                1,
            ),
        ];

        for (error, expected) in test_cases {
            assert_eq!(error.exit_code(), expected, "failed for {error}");
        }
    }

    #[test]
    fn test_stage_tagging() {
        let error = DeployError::Git {
            stage: Stage::InitRepo,
            message: "git init failed".to_string(),
        };
        assert_eq!(error.stage(), Stage::InitRepo);
        assert!(error.to_string().starts_with("init cache repo:"));

        let error = DeployError::UncommittedChanges {
            repo_dir: PathBuf::from("/work/site"),
        };
        assert_eq!(error.stage(), Stage::Precondition);
    }
}
