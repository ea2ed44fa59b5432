//! Tests for template rendering.

use rstest::{fixture, rstest};

use super::*;
use crate::gitlab::{FeedAuthor, GlobalId, InternalId};

#[fixture]
fn merge_request() -> MergeRequest {
    MergeRequest {
        id: GlobalId::new(101),
        iid: InternalId::new(7),
        title: "Add feed".to_owned(),
        description: "Shows the dashboard".to_owned(),
        source_branch: "feature/feed".to_owned(),
        target_branch: "master".to_owned(),
        state: Some("opened".to_owned()),
        web_url: None,
    }
}

#[rstest]
fn monochrome_list_template_renders_plain_text(merge_request: MergeRequest) {
    let formatter = OutputFormatter::new(false);

    let rendered = formatter
        .merge_request(MERGE_REQUEST_LIST_TEMPLATE, &merge_request)
        .expect("template should render");

    assert_eq!(
        rendered,
        "\n#7 Add feed\nfeature/feed -> master\n\nShows the dashboard\n\n"
    );
}

#[rstest]
fn coloured_template_emits_ansi_styles(merge_request: MergeRequest) {
    let formatter = OutputFormatter::new(true);

    let rendered = formatter
        .merge_request("{{ title | green }}", &merge_request)
        .expect("template should render");

    let green = Style::new().fg_color(Some(AnsiColor::Green.into()));
    assert_eq!(
        rendered,
        format!("{}Add feed{}", green.render(), green.render_reset())
    );
    assert!(formatter.is_coloured());
}

#[rstest]
fn custom_format_can_use_any_field(merge_request: MergeRequest) {
    let formatter = OutputFormatter::new(false);

    let rendered = formatter
        .merge_request("{{ id }}|{{ iid }}|{{ state }}|{{ source_branch }}", &merge_request)
        .expect("template should render");

    assert_eq!(rendered, "101|7|opened|feature/feed");
}

#[rstest]
fn invalid_template_is_a_configuration_error(merge_request: MergeRequest) {
    let formatter = OutputFormatter::new(false);

    let result = formatter.merge_request("{{ title", &merge_request);

    assert!(
        matches!(result, Err(LabError::Configuration { .. })),
        "expected Configuration, got {result:?}"
    );
}

#[rstest]
fn feed_entry_uses_short_date() {
    let formatter = OutputFormatter::new(false);
    let entry = FeedEntry {
        id: "tag:1".to_owned(),
        title: "Jane pushed to master".to_owned(),
        author: FeedAuthor {
            name: "Jane".to_owned(),
        },
        updated: "2014-03-01T10:05:00Z".to_owned(),
        summary: String::new(),
    };

    let rendered = formatter
        .feed_entry(FEED_ENTRY_TEMPLATE, &entry)
        .expect("template should render");

    assert_eq!(rendered, "\n[01/03-14 10:05] Jane pushed to master\n");
}

#[rstest]
fn unparseable_dates_pass_through() {
    let formatter = OutputFormatter::new(false);
    let entry = FeedEntry {
        updated: "yesterday".to_owned(),
        ..FeedEntry::default()
    };

    let rendered = formatter
        .feed_entry("{{ updated | short_date }}", &entry)
        .expect("template should render");

    assert_eq!(rendered, "yesterday");
}

#[rstest]
fn feed_title_and_count_render() {
    let formatter = OutputFormatter::new(false);
    let feed = ActivityFeed {
        title: "Dashboard feed".to_owned(),
        entries: Vec::new(),
    };

    assert_eq!(
        formatter
            .feed_title(FEED_TITLE_TEMPLATE, &feed)
            .expect("title should render"),
        "\nDashboard feed\n"
    );
    assert_eq!(
        formatter
            .merge_request_count(3)
            .expect("count should render"),
        "3 merge requests\n"
    );
}
