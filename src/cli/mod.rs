//! Command handlers of the `lab` binary.
//!
//! - [`project`]: project homepage and dashboard feed
//! - [`merge_request`]: the `merge-request` subcommands
//!
//! [`run`] discovers the repository, infers the server and project from the
//! configured remote, resolves a private token, and hands an
//! [`ActionContext`] to the selected command.

use std::io::{self, Write};

use camino::Utf8PathBuf;
use clap::Parser;
use lab::credentials::{DialoguerPrompt, ProjectTokenFile};
use lab::local::{GitCli, LocalRepository, discover_repository, parse_remote};
use lab::{
    CredentialResolver, GitLabClient, GitRepository, LabConfig, LabError, OutputFormatter,
    ProjectPath, ServerHandle, SystemBrowser, TokenSource,
};

pub mod args;
pub mod context;
pub mod merge_request;
pub mod picker;
pub mod project;

#[cfg(test)]
pub mod test_utils;

use args::{Command, LabArgs, MergeRequestCommand};
use context::{ActionContext, Streams};
use picker::TerminalPicker;

/// Parses the command line and runs the selected command.
///
/// # Errors
///
/// Returns the first [`LabError`] raised while preparing or running the
/// command.
pub fn run() -> Result<(), LabError> {
    let args = LabArgs::parse();
    let environment = LabConfig::environment_layer()?;
    let config = LabConfig::compose(environment, args.global.overrides())?;

    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    let mut streams = Streams {
        out: &mut stdout,
        err: &mut stderr,
    };

    let workspace = Workspace::open(&config)?;
    let client = if needs_api(&args.command) {
        workspace.authenticated_client(&config, &mut streams)?
    } else {
        GitLabClient::with_timeout(workspace.server.clone(), config.timeout())?
    };

    let formatter = OutputFormatter::for_stdout();
    let context = ActionContext {
        git: &workspace.git,
        gateway: &client,
        feed: &client,
        browser: &SystemBrowser,
        picker: &TerminalPicker,
        formatter: &formatter,
        server: client.server(),
        project: &workspace.project,
        remote: config.remote(),
        state: config.state(),
        format: config.format(),
    };

    let result = dispatch(&args.command, &context, &mut streams);
    streams.out.flush().map_err(|error| LabError::Io {
        message: error.to_string(),
    })?;
    result
}

fn dispatch(
    command: &Command,
    context: &ActionContext<'_>,
    streams: &mut Streams<'_>,
) -> Result<(), LabError> {
    match command {
        Command::Browse => project::browse(context, streams),
        Command::Feed => project::feed(context, streams),
        Command::MergeRequest(subcommand) => match subcommand {
            MergeRequestCommand::Create { target, title } => {
                merge_request::create(context, streams, target.as_deref(), title.as_deref())
            }
            MergeRequestCommand::Browse { id } => {
                merge_request::browse(context, streams, id.as_deref())
            }
            MergeRequestCommand::Accept { id } => {
                merge_request::accept(context, streams, id.as_deref())
            }
            MergeRequestCommand::Diff { id } => merge_request::diff(context, streams, id.as_deref()),
            MergeRequestCommand::PickDiff => merge_request::pick_diff(context, streams),
            MergeRequestCommand::List => merge_request::list(context, streams),
            MergeRequestCommand::Checkout => merge_request::checkout(context, streams),
        },
    }
}

/// Whether `command` calls the API and therefore needs a private token.
const fn needs_api(command: &Command) -> bool {
    !matches!(command, Command::Browse)
}

/// The local repository and the GitLab project its remote points at.
struct Workspace {
    repository: LocalRepository,
    git: GitCli,
    project: ProjectPath,
    server: ServerHandle,
}

impl Workspace {
    fn open(config: &LabConfig) -> Result<Self, LabError> {
        let start = Utf8PathBuf::from(config.git_dir().unwrap_or("."));
        let repository = discover_repository(&start)?;
        let git = GitCli::new(&repository);
        let remote_url = git.remote_url(config.remote())?;
        let remote = parse_remote(&remote_url)?;
        let server =
            ServerHandle::for_remote(&remote, config.scheme())?.with_api_path(config.api_path());
        tracing::debug!(
            host = server.host(),
            project = %remote.project(),
            "inferred GitLab project from remote"
        );

        Ok(Self {
            project: remote.project().clone(),
            repository,
            git,
            server,
        })
    }

    fn authenticated_client(
        &self,
        config: &LabConfig,
        streams: &mut Streams<'_>,
    ) -> Result<GitLabClient, LabError> {
        let store = ProjectTokenFile::for_repository(&self.repository);
        let prompt = DialoguerPrompt;
        let session = GitLabClient::with_timeout(self.server.clone(), config.timeout())?;
        let resolver = CredentialResolver::new(
            &store,
            &prompt,
            &session,
            self.server.private_token_url(),
            store.path(),
        );

        let resolved = resolver.resolve(config.token())?;
        if let TokenSource::Login { saved_to } = &resolved.source {
            streams.note(&format!("Saved private token to {saved_to}"))?;
        }

        GitLabClient::with_timeout(
            self.server.clone().with_token(resolved.token),
            config.timeout(),
        )
    }
}
