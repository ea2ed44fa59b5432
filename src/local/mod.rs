//! Local git repository access.
//!
//! Discovery finds the work tree with git2, the remote parser turns a remote
//! address into a host and project path, and [`GitRepository`] wraps the git
//! subprocess calls the workflow actions need (branch, remotes, fetch,
//! checkout, diff).

mod discovery;
mod error;
mod git;
mod remote;

pub use discovery::{LocalRepository, discover_repository};
pub use error::LocalDiscoveryError;
pub use git::{
    DiffRefs, GitCli, GitRepository, current_branch_from_branch_output, qualify_diff_refs,
};
#[cfg(test)]
pub use git::MockGitRepository;
pub use remote::{RemoteDescriptor, parse_remote, remote_url_from_remote_output};
