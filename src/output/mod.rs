//! Template-driven terminal output.
//!
//! Merge requests and feed entries are rendered with `minijinja` templates.
//! Users may replace the list template with `--format`. Colour filters
//! (`green`, `red`, `bold`, ...) emit ANSI styles when the formatter is built
//! for a terminal and pass text through unchanged otherwise.
//!
//! # Available Filters
//!
//! - `black`, `red`, `green`, `yellow`, `blue`, `magenta`, `cyan`, `white`,
//!   `bold`: styling
//! - `itoa`: renders a number as text
//! - `short_date`: RFC 3339 timestamp as `dd/mm-yy HH:MM`
//!
//! # Merge Request Variables
//!
//! `id`, `iid`, `title`, `description`, `source_branch`, `target_branch`,
//! `state`, `web_url`.

use std::io::IsTerminal;

use anstyle::{AnsiColor, Style};
use minijinja::{AutoEscape, Environment, Value, context};
use serde::Serialize;

use crate::gitlab::{ActivityFeed, FeedEntry, LabError, MergeRequest};

/// Default template for `merge-request list`.
pub const MERGE_REQUEST_LIST_TEMPLATE: &str = "
{{ \"#\" | blue }}{{ iid | itoa | yellow }} {{ title | green | bold }}
{{ source_branch | green }} -> {{ target_branch | red }}

{{ description }}

";

/// Default template for one choice in a merge request picker.
pub const MERGE_REQUEST_PICK_TEMPLATE: &str = "{{ title | green }}";

/// Default template for the dashboard feed title.
pub const FEED_TITLE_TEMPLATE: &str = "
{{ title | bold }}
";

/// Default template for one dashboard feed entry.
pub const FEED_ENTRY_TEMPLATE: &str = "
{{ \"[\" | magenta | bold }}{{ updated | short_date }}{{ \"]\" | magenta | bold }} {{ title }}
";

const COUNT_TEMPLATE: &str = "{{ count | red | bold }} {{ \"merge requests\" | blue }}\n";

const SHORT_DATE_FORMAT: &str = "%d/%m-%y %H:%M";

const COLOURS: [(&str, AnsiColor); 8] = [
    ("black", AnsiColor::Black),
    ("red", AnsiColor::Red),
    ("green", AnsiColor::Green),
    ("yellow", AnsiColor::Yellow),
    ("blue", AnsiColor::Blue),
    ("magenta", AnsiColor::Magenta),
    ("cyan", AnsiColor::Cyan),
    ("white", AnsiColor::White),
];

/// Renders records through templates, with or without colour.
#[derive(Debug)]
pub struct OutputFormatter {
    env: Environment<'static>,
    colour: bool,
}

impl OutputFormatter {
    /// Creates a formatter; `colour` enables ANSI styling.
    #[must_use]
    pub fn new(colour: bool) -> Self {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);

        for (name, colour_code) in COLOURS {
            let style = Style::new().fg_color(Some(colour_code.into()));
            add_style_filter(&mut env, name, style, colour);
        }
        add_style_filter(&mut env, "bold", Style::new().bold(), colour);
        env.add_filter("itoa", |value: Value| value.to_string());
        env.add_filter("short_date", short_date);

        Self { env, colour }
    }

    /// Formatter coloured only when stdout is a terminal.
    #[must_use]
    pub fn for_stdout() -> Self {
        Self::new(std::io::stdout().is_terminal())
    }

    /// Whether colour filters emit styling.
    #[must_use]
    pub const fn is_coloured(&self) -> bool {
        self.colour
    }

    /// Renders a merge request with `template`.
    ///
    /// # Errors
    ///
    /// Returns [`LabError::Configuration`] when the template is invalid.
    pub fn merge_request(
        &self,
        template: &str,
        merge_request: &MergeRequest,
    ) -> Result<String, LabError> {
        self.render(template, merge_request)
    }

    /// Renders the feed title with `template`.
    ///
    /// # Errors
    ///
    /// Returns [`LabError::Configuration`] when the template is invalid.
    pub fn feed_title(&self, template: &str, feed: &ActivityFeed) -> Result<String, LabError> {
        self.render(template, context! { title => &feed.title })
    }

    /// Renders one feed entry with `template`.
    ///
    /// # Errors
    ///
    /// Returns [`LabError::Configuration`] when the template is invalid.
    pub fn feed_entry(&self, template: &str, entry: &FeedEntry) -> Result<String, LabError> {
        self.render(template, entry)
    }

    /// Renders the `N merge requests` summary line.
    ///
    /// # Errors
    ///
    /// Returns [`LabError::Configuration`] if the built-in template fails.
    pub fn merge_request_count(&self, count: usize) -> Result<String, LabError> {
        self.render(COUNT_TEMPLATE, context! { count => count })
    }

    fn render<S: Serialize>(&self, template: &str, context: S) -> Result<String, LabError> {
        self.env
            .render_str(template, context)
            .map_err(|error| LabError::Configuration {
                message: format!("invalid output template: {error}"),
            })
    }
}

fn add_style_filter(env: &mut Environment<'static>, name: &'static str, style: Style, colour: bool) {
    if colour {
        env.add_filter(name, move |value: Value| {
            format!("{}{value}{}", style.render(), style.render_reset())
        });
    } else {
        env.add_filter(name, |value: Value| value.to_string());
    }
}

fn short_date(value: Value) -> String {
    let raw = value.to_string();
    chrono::DateTime::parse_from_rfc3339(raw.trim())
        .map_or(raw, |timestamp| timestamp.format(SHORT_DATE_FORMAT).to_string())
}

#[cfg(test)]
mod tests;
