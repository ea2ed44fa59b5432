//! Project-local token file.

use std::io::{ErrorKind, Write};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, File, OpenOptions};
use serde::{Deserialize, Serialize};

use crate::gitlab::{LabError, PrivateToken};
use crate::local::LocalRepository;

const TOKEN_FILE_NAME: &str = ".lab";

#[cfg(unix)]
const TOKEN_FILE_MODE: u32 = 0o600;

/// Persistence for a private token between invocations.
#[cfg_attr(test, mockall::automock)]
pub trait TokenStore {
    /// Loads a previously saved token, if any.
    ///
    /// # Errors
    ///
    /// Returns [`LabError::Configuration`] when a token file exists but
    /// cannot be read or parsed.
    fn load(&self) -> Result<Option<PrivateToken>, LabError>;

    /// Saves `token`, replacing any earlier value, and returns where it went.
    ///
    /// # Errors
    ///
    /// Returns [`LabError::Configuration`] when the file cannot be written.
    fn save(&self, token: &PrivateToken) -> Result<Utf8PathBuf, LabError>;
}

/// Contents of the `.lab` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedConfig {
    /// Private token obtained from an interactive login.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_token: Option<String>,
}

/// The `.lab` TOML file at the root of a work tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectTokenFile {
    directory: Utf8PathBuf,
}

impl ProjectTokenFile {
    /// Token file inside `directory`.
    #[must_use]
    pub fn new(directory: impl Into<Utf8PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Token file at the root of a discovered repository.
    #[must_use]
    pub fn for_repository(repository: &LocalRepository) -> Self {
        Self::new(repository.workdir())
    }

    /// Full path of the token file.
    #[must_use]
    pub fn path(&self) -> Utf8PathBuf {
        self.directory.join(TOKEN_FILE_NAME)
    }

    fn open_directory(&self) -> Result<Dir, LabError> {
        open_directory(&self.directory)
    }
}

fn open_directory(directory: &Utf8Path) -> Result<Dir, LabError> {
    Dir::open_ambient_dir(directory, ambient_authority()).map_err(|error| {
        LabError::Configuration {
            message: format!("failed to open {directory}: {error}"),
        }
    })
}

/// Write, create, and truncate; new files are owner-only from creation.
fn private_file_options() -> OpenOptions {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use cap_std::fs_utf8::OpenOptionsExt;

        options.mode(TOKEN_FILE_MODE);
    }
    options
}

/// Tightens a token file that existed before with looser permissions.
#[cfg(unix)]
fn restrict_existing(file: &File, path: &Utf8Path) -> Result<(), LabError> {
    use cap_std::fs_utf8::PermissionsExt;

    let metadata = file.metadata().map_err(|error| LabError::Configuration {
        message: format!("failed to stat {path}: {error}"),
    })?;
    let mut permissions = metadata.permissions();
    if permissions.mode() & 0o777 == TOKEN_FILE_MODE {
        return Ok(());
    }

    permissions.set_mode(TOKEN_FILE_MODE);
    file.set_permissions(permissions)
        .map_err(|error| LabError::Configuration {
            message: format!("failed to restrict {path}: {error}"),
        })
}

#[cfg(not(unix))]
const fn restrict_existing(_file: &File, _path: &Utf8Path) -> Result<(), LabError> {
    Ok(())
}

impl TokenStore for ProjectTokenFile {
    fn load(&self) -> Result<Option<PrivateToken>, LabError> {
        let path = self.path();
        let dir = self.open_directory()?;
        let contents = match dir.read_to_string(TOKEN_FILE_NAME) {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => {
                return Err(LabError::Configuration {
                    message: format!("failed to read {path}: {error}"),
                });
            }
        };

        let persisted: PersistedConfig =
            toml::from_str(&contents).map_err(|error| LabError::Configuration {
                message: format!("failed to parse {path}: {error}"),
            })?;

        let token = persisted
            .private_token
            .as_deref()
            .and_then(PrivateToken::non_blank);
        if token.is_none() {
            tracing::warn!(%path, "token file has no private_token");
        }
        Ok(token)
    }

    fn save(&self, token: &PrivateToken) -> Result<Utf8PathBuf, LabError> {
        let path = self.path();
        let persisted = PersistedConfig {
            private_token: Some(token.value().to_owned()),
        };
        let contents = toml::to_string(&persisted).map_err(|error| LabError::Configuration {
            message: format!("failed to encode {path}: {error}"),
        })?;

        let dir = self.open_directory()?;
        let mut file = dir
            .open_with(TOKEN_FILE_NAME, &private_file_options())
            .map_err(|error| LabError::Configuration {
                message: format!("failed to open {path}: {error}"),
            })?;
        restrict_existing(&file, &path)?;
        file.write_all(contents.as_bytes())
            .map_err(|error| LabError::Configuration {
                message: format!("failed to write {path}: {error}"),
            })?;

        tracing::debug!(%path, "saved private token");
        Ok(path)
    }
}
