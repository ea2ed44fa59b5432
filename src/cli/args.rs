//! Command-line surface of the `lab` binary.

use clap::{Args, Parser, Subcommand};
use serde_json::{Map, Value};

/// Command-line client for GitLab merge requests.
#[derive(Debug, Parser)]
#[command(name = "lab", version, about = "Command-line client for GitLab")]
pub struct LabArgs {
    /// Flags accepted by every command.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Flags shared by every command.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Path to the repository or its `.git` directory.
    #[arg(long, global = true, value_name = "DIR")]
    pub git_dir: Option<String>,

    /// Remote naming the GitLab project [default: origin].
    #[arg(long, global = true, value_name = "NAME")]
    pub remote: Option<String>,

    /// Private token [env: LAB_PRIVATE_TOKEN].
    #[arg(short = 't', long, global = true, value_name = "TOKEN")]
    pub token: Option<String>,

    /// Output template; `help` prints the default list template.
    #[arg(short = 'f', long, global = true, value_name = "TEMPLATE")]
    pub format: Option<String>,

    /// Merge request state to query [default: opened].
    #[arg(long, global = true, value_name = "STATE")]
    pub state: Option<String>,
}

impl GlobalArgs {
    /// The CLI configuration layer: only the flags actually passed.
    #[must_use]
    pub fn overrides(&self) -> Value {
        let flags = [
            ("git_dir", &self.git_dir),
            ("remote", &self.remote),
            ("private_token", &self.token),
            ("format", &self.format),
            ("state", &self.state),
        ];
        let layer: Map<String, Value> = flags
            .into_iter()
            .filter_map(|(key, value)| {
                value
                    .as_ref()
                    .map(|given| (key.to_owned(), Value::String(given.clone())))
            })
            .collect();
        Value::Object(layer)
    }
}

/// Top-level commands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Open the project homepage.
    Browse,

    /// Show the dashboard activity feed.
    Feed,

    /// Work with merge requests.
    #[command(name = "merge-request", visible_alias = "mr", subcommand)]
    MergeRequest(MergeRequestCommand),
}

/// `merge-request` subcommands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum MergeRequestCommand {
    /// Create a merge request from the current branch.
    #[command(visible_alias = "c")]
    Create {
        /// Target branch [default: master].
        target: Option<String>,
        /// Title [default: the branch name in words].
        title: Option<String>,
    },

    /// Browse the current merge request or one by ID.
    #[command(visible_alias = "b")]
    Browse {
        /// Merge request ID as shown by GitLab.
        id: Option<String>,
    },

    /// Accept the current merge request or one by ID.
    Accept {
        /// Merge request ID as shown by GitLab.
        id: Option<String>,
    },

    /// Diff the current merge request or one by ID.
    Diff {
        /// Merge request ID as shown by GitLab.
        id: Option<String>,
    },

    /// Pick a merge request and diff it.
    PickDiff,

    /// List merge requests.
    #[command(visible_alias = "l")]
    List,

    /// Pick a merge request and check out its source branch.
    #[command(visible_alias = "co")]
    Checkout,
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn parse(args: &[&str]) -> LabArgs {
        LabArgs::try_parse_from(args).expect("arguments should parse")
    }

    #[rstest]
    #[case::long(&["lab", "merge-request", "list"])]
    #[case::alias(&["lab", "mr", "l"])]
    fn list_accepts_aliases(#[case] args: &[&str]) {
        assert_eq!(
            parse(args).command,
            Command::MergeRequest(MergeRequestCommand::List)
        );
    }

    #[rstest]
    fn create_takes_optional_target_and_title() {
        let args = parse(&["lab", "mr", "c", "develop", "Add feed"]);
        assert_eq!(
            args.command,
            Command::MergeRequest(MergeRequestCommand::Create {
                target: Some("develop".to_owned()),
                title: Some("Add feed".to_owned()),
            })
        );
    }

    #[rstest]
    fn checkout_alias_parses() {
        assert_eq!(
            parse(&["lab", "mr", "co"]).command,
            Command::MergeRequest(MergeRequestCommand::Checkout)
        );
    }

    #[rstest]
    fn global_flags_after_subcommand_become_overrides() {
        let args = parse(&["lab", "mr", "accept", "12", "--state", "merged", "-t", "abc"]);
        assert_eq!(
            args.command,
            Command::MergeRequest(MergeRequestCommand::Accept {
                id: Some("12".to_owned())
            })
        );
        assert_eq!(
            args.global.overrides(),
            json!({"state": "merged", "private_token": "abc"})
        );
    }

    #[rstest]
    fn no_flags_means_empty_layer() {
        assert_eq!(parse(&["lab", "browse"]).global.overrides(), json!({}));
    }
}
