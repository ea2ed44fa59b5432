//! Local git repository discovery.

use std::path::Path;

use camino::{Utf8Path, Utf8PathBuf};
use git2::Repository;

use super::error::LocalDiscoveryError;

/// A discovered repository: its work tree and git directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalRepository {
    workdir: Utf8PathBuf,
    git_dir: Utf8PathBuf,
}

impl LocalRepository {
    /// Builds a repository handle from known paths.
    #[must_use]
    pub const fn new(workdir: Utf8PathBuf, git_dir: Utf8PathBuf) -> Self {
        Self { workdir, git_dir }
    }

    /// Root of the working tree.
    #[must_use]
    pub fn workdir(&self) -> &Utf8Path {
        &self.workdir
    }

    /// The `.git` directory handed to git subprocesses.
    #[must_use]
    pub fn git_dir(&self) -> &Utf8Path {
        &self.git_dir
    }
}

/// Discovers the repository containing `start_path`.
///
/// `start_path` may be any directory inside the work tree or the git
/// directory itself (as passed with `--git-dir`).
///
/// # Errors
///
/// Returns [`LocalDiscoveryError::NotARepository`] when no repository is
/// found or it has no work tree, and [`LocalDiscoveryError::NonUtf8Path`]
/// when a path is not UTF-8.
pub fn discover_repository(start_path: &Utf8Path) -> Result<LocalRepository, LocalDiscoveryError> {
    let repo = Repository::discover(start_path).map_err(|error| {
        if error.code() == git2::ErrorCode::NotFound {
            LocalDiscoveryError::NotARepository
        } else {
            LocalDiscoveryError::from(error)
        }
    })?;

    let workdir = repo
        .workdir()
        .ok_or(LocalDiscoveryError::NotARepository)
        .and_then(utf8_path)?;
    let git_dir = utf8_path(repo.path())?;

    tracing::debug!(%workdir, %git_dir, "discovered repository");
    Ok(LocalRepository::new(workdir, git_dir))
}

fn utf8_path(path: &Path) -> Result<Utf8PathBuf, LocalDiscoveryError> {
    Utf8PathBuf::from_path_buf(path.to_path_buf()).map_err(|raw| {
        LocalDiscoveryError::NonUtf8Path {
            path: raw.display().to_string(),
        }
    })
}
