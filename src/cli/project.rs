//! Project-level commands: `browse` and `feed`.

use lab::LabError;
use lab::output::{FEED_ENTRY_TEMPLATE, FEED_TITLE_TEMPLATE};

use super::context::{ActionContext, Streams};

/// Opens the project homepage.
///
/// # Errors
///
/// Returns [`LabError::Io`] when no browser starts.
pub fn browse(context: &ActionContext<'_>, streams: &mut Streams<'_>) -> Result<(), LabError> {
    let url = context.server.project_url(context.project);
    context.browse(streams, &url)
}

/// Prints the dashboard activity feed.
///
/// A `--format` template replaces both the title and the entry template.
///
/// # Errors
///
/// Propagates gateway failures and template errors.
pub fn feed(context: &ActionContext<'_>, streams: &mut Streams<'_>) -> Result<(), LabError> {
    let feed = context.feed.dashboard_feed()?;
    let title_template = context.format.unwrap_or(FEED_TITLE_TEMPLATE);
    let entry_template = context.format.unwrap_or(FEED_ENTRY_TEMPLATE);

    streams.emit(&context.formatter.feed_title(title_template, &feed)?)?;
    for entry in &feed.entries {
        streams.emit(&context.formatter.feed_entry(entry_template, entry)?)?;
    }
    Ok(())
}
