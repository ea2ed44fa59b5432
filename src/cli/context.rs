//! Collaborators shared by the workflow actions.

use std::io::Write;

use lab::gitlab::FeedGateway;
use lab::{
    Browser, GitRepository, LabError, MergeRequestGateway, OutputFormatter, ProjectPath,
    ServerHandle,
};

use super::picker::MergeRequestPicker;

/// Everything an action needs, injected so actions never touch the process
/// environment directly.
pub struct ActionContext<'a> {
    /// Local git operations.
    pub git: &'a dyn GitRepository,
    /// Merge request API.
    pub gateway: &'a dyn MergeRequestGateway,
    /// Dashboard feed API.
    pub feed: &'a dyn FeedGateway,
    /// Page opener.
    pub browser: &'a dyn Browser,
    /// Interactive merge request chooser.
    pub picker: &'a dyn MergeRequestPicker,
    /// Template renderer.
    pub formatter: &'a OutputFormatter,
    /// Server the project lives on.
    pub server: &'a ServerHandle,
    /// Project inferred from the remote.
    pub project: &'a ProjectPath,
    /// Configured remote name, used to qualify diff refs and to fetch.
    pub remote: &'a str,
    /// Merge request state to query.
    pub state: &'a str,
    /// User template, if any.
    pub format: Option<&'a str>,
}

/// Output streams of one invocation.
pub struct Streams<'w> {
    /// Command results.
    pub out: &'w mut dyn Write,
    /// Progress and summary lines.
    pub err: &'w mut dyn Write,
}

impl Streams<'_> {
    /// Writes a line of command output.
    ///
    /// # Errors
    ///
    /// Returns [`LabError::Io`] when the stream is closed.
    pub fn say(&mut self, line: &str) -> Result<(), LabError> {
        writeln!(self.out, "{line}").map_err(|error| io_error(&error))
    }

    /// Writes rendered template output verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`LabError::Io`] when the stream is closed.
    pub fn emit(&mut self, rendered: &str) -> Result<(), LabError> {
        self.out
            .write_all(rendered.as_bytes())
            .map_err(|error| io_error(&error))
    }

    /// Writes rendered template output to the diagnostic stream.
    ///
    /// # Errors
    ///
    /// Returns [`LabError::Io`] when the stream is closed.
    pub fn emit_note(&mut self, rendered: &str) -> Result<(), LabError> {
        self.err
            .write_all(rendered.as_bytes())
            .map_err(|error| io_error(&error))
    }

    /// Writes a line to the diagnostic stream.
    ///
    /// # Errors
    ///
    /// Returns [`LabError::Io`] when the stream is closed.
    pub fn note(&mut self, line: &str) -> Result<(), LabError> {
        writeln!(self.err, "{line}").map_err(|error| io_error(&error))
    }
}

impl ActionContext<'_> {
    /// Announces and opens `url`.
    ///
    /// # Errors
    ///
    /// Returns [`LabError::Io`] when the announcement cannot be written or
    /// no browser starts.
    pub fn browse(&self, streams: &mut Streams<'_>, url: &str) -> Result<(), LabError> {
        streams.note(&format!("Opening \"{url}\"..."))?;
        self.browser.open(url)
    }
}

fn io_error(error: &std::io::Error) -> LabError {
    LabError::Io {
        message: error.to_string(),
    }
}
