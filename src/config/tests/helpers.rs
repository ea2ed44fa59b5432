//! Shared test helpers for configuration tests.

use serde_json::Value;

use crate::config::LabConfig;
use crate::gitlab::LabError;

/// Variables the configuration reads; each is cleared unless a test sets it.
const LAB_VARIABLES: [&str; 8] = [
    "LAB_PRIVATE_TOKEN",
    "LAB_REMOTE",
    "LAB_GIT_DIR",
    "LAB_FORMAT",
    "LAB_STATE",
    "LAB_SCHEME",
    "LAB_API_PATH",
    "LAB_TIMEOUT_SECONDS",
];

/// Reads the environment layer with exactly `variables` set.
///
/// # Panics
///
/// Panics when the layer cannot be read.
pub fn environment_from(variables: &[(&str, &str)]) -> Value {
    try_environment_from(variables).expect("environment should be valid")
}

/// Like [`environment_from`] but returns the loader's result.
pub fn try_environment_from(variables: &[(&str, &str)]) -> Result<Value, LabError> {
    let is_set = |name: &str| variables.iter().any(|(set, _)| *set == name);
    let mut settings: Vec<(&str, Option<&str>)> = LAB_VARIABLES
        .into_iter()
        .filter(|name| !is_set(*name))
        .map(|name| (name, None))
        .collect();
    settings.extend(variables.iter().map(|(name, value)| (*name, Some(*value))));

    let _guard = env_lock::lock_env(settings);
    LabConfig::environment_layer()
}
