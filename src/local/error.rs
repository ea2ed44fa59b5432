//! Error types for local repository discovery and git invocations.

use thiserror::Error;

use crate::gitlab::LabError;

/// Errors that may occur while inspecting or driving the local repository.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LocalDiscoveryError {
    /// The start directory is not within a git work tree.
    #[error("not inside a Git repository")]
    NotARepository,

    /// The repository path cannot be represented as UTF-8.
    #[error("repository path is not valid UTF-8: {path}")]
    NonUtf8Path {
        /// Lossy rendering of the offending path.
        path: String,
    },

    /// The named remote is absent from `git remote -v`.
    #[error("could not find remote: {name}")]
    UnknownRemote {
        /// Name of the missing remote.
        name: String,
    },

    /// The remote URL has no recognisable host and project path.
    #[error("could not parse remote URL: {url}")]
    InvalidRemoteUrl {
        /// The unparseable URL string.
        url: String,
    },

    /// `git branch` output has no line marking the current branch.
    #[error("could not determine the current branch")]
    CurrentBranchNotFound,

    /// A git subprocess could not be run or exited unsuccessfully.
    #[error("`{command}` failed: {message}")]
    Command {
        /// The command line that was run.
        command: String,
        /// Captured stderr or spawn error.
        message: String,
    },

    /// Git library operation failed.
    #[error("git error: {message}")]
    Git {
        /// Error detail from the git2 library.
        message: String,
    },
}

impl From<git2::Error> for LocalDiscoveryError {
    fn from(error: git2::Error) -> Self {
        Self::Git {
            message: error.message().to_owned(),
        }
    }
}

impl From<LocalDiscoveryError> for LabError {
    fn from(error: LocalDiscoveryError) -> Self {
        match error {
            LocalDiscoveryError::UnknownRemote { name } => Self::UnknownRemote { name },
            LocalDiscoveryError::InvalidRemoteUrl { url } => Self::InvalidRemoteUrl { url },
            other => Self::LocalRepository {
                message: other.to_string(),
            },
        }
    }
}
