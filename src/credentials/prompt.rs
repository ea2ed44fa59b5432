//! Terminal prompt for an interactive login.

use std::io::IsTerminal;

use dialoguer::{Input, Password};

use crate::gitlab::LabError;

/// Asks the user for GitLab credentials.
#[cfg_attr(test, mockall::automock)]
pub trait LoginPrompt {
    /// Whether a person is there to answer.
    fn is_interactive(&self) -> bool;

    /// Reads the login name.
    ///
    /// # Errors
    ///
    /// Returns [`LabError::Io`] when the terminal cannot be read.
    fn login(&self) -> Result<String, LabError>;

    /// Reads the password without echoing it.
    ///
    /// # Errors
    ///
    /// Returns [`LabError::Io`] when the terminal cannot be read.
    fn password(&self) -> Result<String, LabError>;
}

/// [`LoginPrompt`] on the controlling terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct DialoguerPrompt;

impl LoginPrompt for DialoguerPrompt {
    fn is_interactive(&self) -> bool {
        std::io::stdin().is_terminal() && std::io::stderr().is_terminal()
    }

    fn login(&self) -> Result<String, LabError> {
        Input::<String>::new()
            .with_prompt("Login")
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)
    }

    fn password(&self) -> Result<String, LabError> {
        Password::new()
            .with_prompt("Password")
            .allow_empty_password(true)
            .interact()
            .map_err(prompt_error)
    }
}

fn prompt_error(error: dialoguer::Error) -> LabError {
    LabError::Io {
        message: format!("failed to read from terminal: {error}"),
    }
}
