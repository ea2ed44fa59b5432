//! `lab`: a command-line companion for GitLab merge requests.
//!
//! The library infers the GitLab server and project from a git remote,
//! obtains a private token, and talks to the GitLab REST API. The `lab`
//! binary builds its workflow commands (list, create, accept, diff, ...) on
//! these pieces.

pub mod browser;
pub mod config;
pub mod credentials;
pub mod gitlab;
pub mod local;
pub mod output;
pub mod telemetry;

pub use browser::{Browser, SystemBrowser};
pub use config::LabConfig;
pub use credentials::{CredentialResolver, ResolvedToken, TokenSource};
pub use gitlab::{
    GitLabClient, LabError, MergeRequest, MergeRequestGateway, MergeRequestIntake,
    MergeRequestSelector, PrivateToken, ProjectPath, ServerHandle,
};
pub use local::{GitRepository, LocalDiscoveryError, RemoteDescriptor};
pub use output::OutputFormatter;
