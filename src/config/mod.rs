//! Application configuration composed from defaults, environment, and CLI.
//!
//! # Precedence
//!
//! Values are merged with ortho-config's layered approach, lowest to
//! highest:
//!
//! 1. **Defaults** – built-in application defaults
//! 2. **Environment variables** – `LAB_PRIVATE_TOKEN`, `LAB_REMOTE`,
//!    `LAB_GIT_DIR`, `LAB_FORMAT`, `LAB_STATE`, `LAB_SCHEME`,
//!    `LAB_API_PATH`, `LAB_TIMEOUT_SECONDS`
//! 3. **Command-line arguments** – global flags such as `--remote` and
//!    `--token`
//!
//! The private token persisted after an interactive login is not part of
//! this configuration; see [`crate::credentials`].

use std::time::Duration;

use ortho_config::figment::Figment;
use ortho_config::figment::providers::Env;
use ortho_config::{MergeComposer, OrthoConfig};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::gitlab::{DEFAULT_API_PATH, DEFAULT_SCHEME, LabError};

/// Remote used when none is configured.
pub const DEFAULT_REMOTE: &str = "origin";

/// Merge request state listed when none is configured.
pub const DEFAULT_STATE: &str = "opened";

/// `LAB_LOG` belongs to the log filter, not to this configuration.
const LOG_KEY: &str = "LOG";

/// Settings shared by every command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(prefix = "LAB")]
pub struct LabConfig {
    /// Path to the `.git` directory (`--git-dir`, `LAB_GIT_DIR`).
    pub git_dir: Option<String>,

    /// Remote naming the GitLab project (`--remote`, `LAB_REMOTE`).
    pub remote: Option<String>,

    /// Private token (`--token`, `-t`, `LAB_PRIVATE_TOKEN`).
    pub private_token: Option<String>,

    /// Template for `merge-request list` (`--format`, `-f`, `LAB_FORMAT`).
    pub format: Option<String>,

    /// Merge request state filter (`--state`, `LAB_STATE`).
    pub state: Option<String>,

    /// Scheme used to reach the server (`LAB_SCHEME`).
    pub scheme: Option<String>,

    /// API base path (`LAB_API_PATH`).
    pub api_path: Option<String>,

    /// Transport timeout in seconds; unset means no timeout.
    pub timeout_seconds: Option<u64>,
}

impl LabConfig {
    /// Merges the environment and CLI layers over the defaults.
    ///
    /// `cli_overrides` holds only the flags the user actually passed.
    ///
    /// # Errors
    ///
    /// Returns [`LabError::Configuration`] when a layer holds a value of the
    /// wrong type.
    pub fn compose(environment: Value, cli_overrides: Value) -> Result<Self, LabError> {
        let defaults = serde_json::to_value(Self::default()).map_err(configuration_error)?;
        let mut composer = MergeComposer::new();
        composer.push_defaults(defaults);
        composer.push_environment(environment);
        composer.push_cli(cli_overrides);
        Self::merge_from_layers(composer.layers()).map_err(configuration_error)
    }

    /// Reads the `LAB_*` variables of the process into a layer for
    /// [`LabConfig::compose`].
    ///
    /// Scalars are parsed the figment way (`30` becomes a number). Values are
    /// never split on commas, so templates keep their punctuation.
    ///
    /// # Errors
    ///
    /// Returns [`LabError::Configuration`] when the variables cannot be
    /// collected into a layer.
    pub fn environment_layer() -> Result<Value, LabError> {
        Figment::from(Env::prefixed(Self::prefix()).ignore(&[LOG_KEY]))
            .extract::<Value>()
            .map_err(configuration_error)
    }

    /// Remote name, defaulting to `origin`.
    #[must_use]
    pub fn remote(&self) -> &str {
        non_blank(self.remote.as_deref()).unwrap_or(DEFAULT_REMOTE)
    }

    /// Merge request state, defaulting to `opened`.
    #[must_use]
    pub fn state(&self) -> &str {
        non_blank(self.state.as_deref()).unwrap_or(DEFAULT_STATE)
    }

    /// Scheme, defaulting to `http`.
    #[must_use]
    pub fn scheme(&self) -> &str {
        non_blank(self.scheme.as_deref()).unwrap_or(DEFAULT_SCHEME)
    }

    /// API base path, defaulting to `/api/v3`.
    #[must_use]
    pub fn api_path(&self) -> &str {
        non_blank(self.api_path.as_deref()).unwrap_or(DEFAULT_API_PATH)
    }

    /// Explicit private token, if any.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        non_blank(self.private_token.as_deref())
    }

    /// List template override, if any.
    #[must_use]
    pub fn format(&self) -> Option<&str> {
        non_blank(self.format.as_deref())
    }

    /// Configured `.git` directory, if any.
    #[must_use]
    pub fn git_dir(&self) -> Option<&str> {
        non_blank(self.git_dir.as_deref())
    }

    /// Transport timeout, if configured.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds
            .filter(|seconds| *seconds > 0)
            .map(Duration::from_secs)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|candidate| !candidate.trim().is_empty())
}

fn configuration_error(error: impl std::fmt::Display) -> LabError {
    LabError::Configuration {
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests;
