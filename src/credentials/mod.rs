//! Private token acquisition.
//!
//! A token is looked up in order: the explicit value from the command line
//! or environment, the `.lab` file at the work-tree root, and finally an
//! interactive login whose token is saved back to `.lab` so later
//! invocations skip the prompt.

mod prompt;
mod store;

pub use prompt::{DialoguerPrompt, LoginPrompt};
#[cfg(test)]
pub use prompt::MockLoginPrompt;
pub use store::{PersistedConfig, ProjectTokenFile, TokenStore};
#[cfg(test)]
pub use store::MockTokenStore;

use camino::Utf8PathBuf;

use crate::gitlab::{LabError, PrivateToken, SessionGateway};

/// Where a resolved token came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    /// `--token` or `LAB_PRIVATE_TOKEN`.
    Explicit,
    /// A previously saved token file.
    Stored {
        /// Path of the file that held the token.
        path: Utf8PathBuf,
    },
    /// A fresh interactive login.
    Login {
        /// Path the new token was written to.
        saved_to: Utf8PathBuf,
    },
}

/// A private token and its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedToken {
    /// The token to authenticate with.
    pub token: PrivateToken,
    /// Where it came from.
    pub source: TokenSource,
}

/// Resolves the private token for one invocation.
pub struct CredentialResolver<'a> {
    store: &'a dyn TokenStore,
    prompt: &'a dyn LoginPrompt,
    session: &'a dyn SessionGateway,
    token_url: String,
    store_path: Utf8PathBuf,
}

impl<'a> CredentialResolver<'a> {
    /// Builds a resolver.
    ///
    /// `token_url` is the page named in the error when no token can be
    /// obtained; `store_path` is reported when the stored token is used.
    #[must_use]
    pub fn new(
        store: &'a dyn TokenStore,
        prompt: &'a dyn LoginPrompt,
        session: &'a dyn SessionGateway,
        token_url: impl Into<String>,
        store_path: impl Into<Utf8PathBuf>,
    ) -> Self {
        Self {
            store,
            prompt,
            session,
            token_url: token_url.into(),
            store_path: store_path.into(),
        }
    }

    /// Finds a private token.
    ///
    /// # Errors
    ///
    /// Returns [`LabError::Configuration`] when the token file is unreadable,
    /// propagates login and save failures, and returns
    /// [`LabError::MissingToken`] when no token exists and nobody can be
    /// prompted.
    pub fn resolve(&self, explicit: Option<&str>) -> Result<ResolvedToken, LabError> {
        if let Some(token) = explicit.and_then(PrivateToken::non_blank) {
            tracing::debug!("using explicit private token");
            return Ok(ResolvedToken {
                token,
                source: TokenSource::Explicit,
            });
        }

        if let Some(token) = self.store.load()? {
            tracing::debug!(path = %self.store_path, "using stored private token");
            return Ok(ResolvedToken {
                token,
                source: TokenSource::Stored {
                    path: self.store_path.clone(),
                },
            });
        }

        if !self.prompt.is_interactive() {
            return Err(LabError::MissingToken {
                token_url: self.token_url.clone(),
            });
        }

        let token = self.login()?;
        let saved_to = self.store.save(&token)?;
        Ok(ResolvedToken {
            token,
            source: TokenSource::Login { saved_to },
        })
    }

    fn login(&self) -> Result<PrivateToken, LabError> {
        let login = ask_until_filled(|| self.prompt.login())?;
        let password = ask_until_filled(|| self.prompt.password())?;
        self.session.get_session(&login, &password)
    }
}

fn ask_until_filled<F>(mut ask: F) -> Result<String, LabError>
where
    F: FnMut() -> Result<String, LabError>,
{
    loop {
        let answer = ask()?;
        if !answer.trim().is_empty() {
            return Ok(answer);
        }
    }
}

#[cfg(test)]
mod tests;
