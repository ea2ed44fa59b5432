//! Interactive choice between merge requests.

use dialoguer::Select;
use lab::LabError;

/// Lets the user choose one of several labelled entries.
pub trait MergeRequestPicker {
    /// Returns the index of the chosen label, or `None` when the user
    /// cancelled.
    ///
    /// # Errors
    ///
    /// Returns [`LabError::Io`] when the terminal cannot be used.
    fn pick(&self, labels: &[String]) -> Result<Option<usize>, LabError>;
}

/// [`MergeRequestPicker`] drawing a selection list on stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPicker;

impl MergeRequestPicker for TerminalPicker {
    fn pick(&self, labels: &[String]) -> Result<Option<usize>, LabError> {
        Select::new()
            .with_prompt("Select merge request")
            .items(labels)
            .default(0)
            .interact_opt()
            .map_err(|error| LabError::Io {
                message: format!("failed to read selection: {error}"),
            })
    }
}
