//! Opening pages in the user's web browser.

use crate::gitlab::LabError;

/// Capability to show a URL to the user.
#[cfg_attr(test, mockall::automock)]
pub trait Browser {
    /// Opens `url`.
    ///
    /// # Errors
    ///
    /// Returns [`LabError::Io`] when no browser could be launched.
    fn open(&self, url: &str) -> Result<(), LabError>;
}

/// [`Browser`] using the platform's default browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBrowser;

impl Browser for SystemBrowser {
    fn open(&self, url: &str) -> Result<(), LabError> {
        tracing::debug!(%url, "launching browser");
        webbrowser::open(url).map_err(|error| LabError::Io {
            message: format!("failed to open {url}: {error}"),
        })
    }
}
