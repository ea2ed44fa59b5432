//! Git subprocess collaborator.
//!
//! Commands run with `--git-dir` pointing at the discovered repository and
//! the work tree as current directory. Commands whose output is meant for
//! the user (fetch, checkout, diff) inherit the terminal.

use std::collections::BTreeSet;
use std::process::{Command, Output, Stdio};

use camino::Utf8PathBuf;

use super::discovery::LocalRepository;
use super::error::LocalDiscoveryError;
use super::remote::remote_url_from_remote_output;

/// Git operations the workflow actions depend on.
#[cfg_attr(test, mockall::automock)]
pub trait GitRepository {
    /// Name of the checked-out branch.
    ///
    /// # Errors
    ///
    /// Returns [`LocalDiscoveryError::CurrentBranchNotFound`] on a detached
    /// head, or [`LocalDiscoveryError::Command`] when git fails.
    fn current_branch(&self) -> Result<String, LocalDiscoveryError>;

    /// URL configured for the named remote.
    ///
    /// # Errors
    ///
    /// Returns [`LocalDiscoveryError::UnknownRemote`] when the remote does
    /// not exist, or [`LocalDiscoveryError::Command`] when git fails.
    fn remote_url(&self, remote: &str) -> Result<String, LocalDiscoveryError>;

    /// Fetches one remote.
    ///
    /// # Errors
    ///
    /// Returns [`LocalDiscoveryError::Command`] when git fails.
    fn fetch(&self, remote: &str) -> Result<(), LocalDiscoveryError>;

    /// Checks out a branch.
    ///
    /// # Errors
    ///
    /// Returns [`LocalDiscoveryError::Command`] when git fails.
    fn checkout(&self, branch: &str) -> Result<(), LocalDiscoveryError>;

    /// Shows `git diff base..head --` to the user.
    ///
    /// # Errors
    ///
    /// Returns [`LocalDiscoveryError::Command`] when git fails.
    fn diff(&self, base: &str, head: &str) -> Result<(), LocalDiscoveryError>;
}

/// [`GitRepository`] backed by the `git` executable.
#[derive(Debug, Clone)]
pub struct GitCli {
    git_dir: Utf8PathBuf,
    workdir: Utf8PathBuf,
}

impl GitCli {
    /// Drives git for a discovered repository.
    #[must_use]
    pub fn new(repository: &LocalRepository) -> Self {
        Self {
            git_dir: repository.git_dir().to_owned(),
            workdir: repository.workdir().to_owned(),
        }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut command = Command::new("git");
        command
            .arg("--git-dir")
            .arg(self.git_dir.as_str())
            .args(args)
            .current_dir(self.workdir.as_std_path());
        command
    }

    fn capture(&self, args: &[&str]) -> Result<String, LocalDiscoveryError> {
        let rendered = render_command(args);
        tracing::debug!(command = %rendered, "running git");
        let output = self
            .command(args)
            .output()
            .map_err(|error| LocalDiscoveryError::Command {
                command: rendered.clone(),
                message: error.to_string(),
            })?;
        checked_stdout(rendered, &output)
    }

    fn run_attached(&self, args: &[&str]) -> Result<(), LocalDiscoveryError> {
        let rendered = render_command(args);
        tracing::debug!(command = %rendered, "running git");
        let status = self
            .command(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|error| LocalDiscoveryError::Command {
                command: rendered.clone(),
                message: error.to_string(),
            })?;
        if status.success() {
            Ok(())
        } else {
            Err(LocalDiscoveryError::Command {
                command: rendered,
                message: status.to_string(),
            })
        }
    }
}

impl GitRepository for GitCli {
    fn current_branch(&self) -> Result<String, LocalDiscoveryError> {
        let output = self.capture(&["branch"])?;
        current_branch_from_branch_output(&output)
    }

    fn remote_url(&self, remote: &str) -> Result<String, LocalDiscoveryError> {
        let output = self.capture(&["remote", "-v"])?;
        remote_url_from_remote_output(remote, &output)
    }

    fn fetch(&self, remote: &str) -> Result<(), LocalDiscoveryError> {
        self.run_attached(&["fetch", remote])
    }

    fn checkout(&self, branch: &str) -> Result<(), LocalDiscoveryError> {
        self.run_attached(&["checkout", branch])
    }

    fn diff(&self, base: &str, head: &str) -> Result<(), LocalDiscoveryError> {
        let range = format!("{base}..{head}");
        self.run_attached(&["diff", &range, "--"])
    }
}

fn render_command(args: &[&str]) -> String {
    format!("git {}", args.join(" "))
}

fn checked_stdout(command: String, output: &Output) -> Result<String, LocalDiscoveryError> {
    if output.status.success() {
        return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
    }
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_owned();
    Err(LocalDiscoveryError::Command {
        command,
        message: if stderr.is_empty() {
            output.status.to_string()
        } else {
            stderr
        },
    })
}

/// Extracts the checked-out branch from `git branch` output.
///
/// # Errors
///
/// Returns [`LocalDiscoveryError::CurrentBranchNotFound`] when no line is
/// marked with `* ` or the marked entry is a detached head.
pub fn current_branch_from_branch_output(output: &str) -> Result<String, LocalDiscoveryError> {
    output
        .lines()
        .find_map(|line| line.strip_prefix("* "))
        .map(str::trim)
        .filter(|branch| !branch.is_empty() && !branch.starts_with('('))
        .map(str::to_owned)
        .ok_or(LocalDiscoveryError::CurrentBranchNotFound)
}

/// Remote-qualified refs for a merge request diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffRefs {
    /// Qualified target ref, the left side of the range.
    pub base: String,
    /// Qualified source ref, the right side of the range.
    pub head: String,
    /// Every remote to fetch before diffing, sorted and unique.
    pub remotes: Vec<String>,
}

/// Qualifies bare branch names with `default_remote`.
///
/// A ref containing `/` already names its remote (the part before the first
/// `/`); that remote is fetched too.
#[must_use]
pub fn qualify_diff_refs(default_remote: &str, base: &str, head: &str) -> DiffRefs {
    let mut remotes = BTreeSet::from([default_remote.to_owned()]);
    let mut qualify = |reference: &str| match reference.split_once('/') {
        Some((remote, _)) => {
            remotes.insert(remote.to_owned());
            reference.to_owned()
        }
        None => format!("{default_remote}/{reference}"),
    };
    let qualified_base = qualify(base);
    let qualified_head = qualify(head);
    DiffRefs {
        base: qualified_base,
        head: qualified_head,
        remotes: remotes.into_iter().collect(),
    }
}
