//! `merge-request` subcommands.

use lab::gitlab::{CreateMergeRequest, MergeRequest, MergeRequestSelector};
use lab::local::qualify_diff_refs;
use lab::output::{MERGE_REQUEST_LIST_TEMPLATE, MERGE_REQUEST_PICK_TEMPLATE};
use lab::{LabError, MergeRequestIntake};

use super::context::{ActionContext, Streams};

/// Target branch used when `create` is given none.
pub const DEFAULT_TARGET_BRANCH: &str = "master";

/// Format value that prints the default list template instead of listing.
const FORMAT_HELP: &str = "help";

/// Opens a merge request from the current branch.
///
/// # Errors
///
/// Returns [`LabError::DuplicateMergeRequest`] when the branch already has
/// one, and propagates git and browser failures.
pub fn create(
    context: &ActionContext<'_>,
    streams: &mut Streams<'_>,
    target: Option<&str>,
    title: Option<&str>,
) -> Result<(), LabError> {
    let source_branch = context.git.current_branch()?;
    let request = CreateMergeRequest {
        target_branch: non_empty(target).unwrap_or(DEFAULT_TARGET_BRANCH).to_owned(),
        title: non_empty(title).map_or_else(|| title_from_branch(&source_branch), str::to_owned),
        source_branch,
    };

    let created = context
        .gateway
        .create_merge_request(context.project, &request)?;
    let url = context
        .server
        .merge_request_url(context.project, created.iid);
    streams.say(&format!("Created merge request: {url}"))?;
    context.browse(streams, &url)
}

/// Opens the current merge request, or the one with ID `id`.
///
/// # Errors
///
/// Returns [`LabError::NotFound`] when no merge request matches.
pub fn browse(
    context: &ActionContext<'_>,
    streams: &mut Streams<'_>,
    id: Option<&str>,
) -> Result<(), LabError> {
    let (merge_request, _) = resolve(context, id)?;
    let url = context
        .server
        .merge_request_url(context.project, merge_request.iid);
    context.browse(streams, &url)
}

/// Merges the current merge request, or the one with ID `id`, then deletes
/// its source branch.
///
/// # Errors
///
/// Returns [`LabError::NotFound`] when no merge request matches and
/// propagates merge and branch deletion failures.
pub fn accept(
    context: &ActionContext<'_>,
    streams: &mut Streams<'_>,
    id: Option<&str>,
) -> Result<(), LabError> {
    let (merge_request, _) = resolve(context, id)?;
    context
        .gateway
        .accept_merge_request(context.project, merge_request.id)?;

    streams.say(&format!(
        "Removing source branch: {}",
        merge_request.source_branch
    ))?;
    context
        .gateway
        .remove_branch(context.project, &merge_request.source_branch)?;

    let url = context
        .server
        .merge_request_url(context.project, merge_request.iid);
    context.browse(streams, &url)
}

/// Diffs the current merge request, or the one with ID `id`.
///
/// The merge request page is opened as well when an ID was given.
///
/// # Errors
///
/// Returns [`LabError::NotFound`] when no merge request matches and
/// propagates git failures.
pub fn diff(
    context: &ActionContext<'_>,
    streams: &mut Streams<'_>,
    id: Option<&str>,
) -> Result<(), LabError> {
    let (merge_request, selector) = resolve(context, id)?;
    show_diff(context, &merge_request)?;

    if selector.is_explicit() {
        let url = context
            .server
            .merge_request_url(context.project, merge_request.iid);
        context.browse(streams, &url)?;
    }
    Ok(())
}

/// Lets the user pick a merge request and diffs it.
///
/// # Errors
///
/// Propagates query, prompt, and git failures.
pub fn pick_diff(context: &ActionContext<'_>, streams: &mut Streams<'_>) -> Result<(), LabError> {
    pick(context, streams)?.map_or(Ok(()), |merge_request| {
        show_diff(context, &merge_request)
    })
}

/// Lists merge requests in the configured state.
///
/// `--format help` prints the default template instead.
///
/// # Errors
///
/// Propagates query failures and template errors.
pub fn list(context: &ActionContext<'_>, streams: &mut Streams<'_>) -> Result<(), LabError> {
    if context.format == Some(FORMAT_HELP) {
        return streams.say(MERGE_REQUEST_LIST_TEMPLATE);
    }

    let template = context.format.unwrap_or(MERGE_REQUEST_LIST_TEMPLATE);
    let merge_requests = context
        .gateway
        .query_merge_requests(context.project, context.state)?;
    for merge_request in &merge_requests {
        streams.emit(&context.formatter.merge_request(template, merge_request)?)?;
    }

    let count = context.formatter.merge_request_count(merge_requests.len())?;
    streams.emit_note(&count)
}

/// Lets the user pick a merge request and checks out its source branch.
///
/// # Errors
///
/// Propagates query, prompt, and git failures.
pub fn checkout(context: &ActionContext<'_>, streams: &mut Streams<'_>) -> Result<(), LabError> {
    let Some(merge_request) = pick(context, streams)? else {
        return Ok(());
    };

    let branch = &merge_request.source_branch;
    streams.say(&format!("Checking out: \"{branch}\"..."))?;
    context.git.fetch(context.remote)?;
    context.git.checkout(branch)?;
    Ok(())
}

fn resolve(
    context: &ActionContext<'_>,
    id: Option<&str>,
) -> Result<(MergeRequest, MergeRequestSelector), LabError> {
    let selector = MergeRequestSelector::from_argument(id, || {
        context.git.current_branch().map_err(LabError::from)
    })?;
    let merge_request =
        MergeRequestIntake::new(context.gateway).resolve(context.project, context.state, &selector)?;
    Ok((merge_request, selector))
}

fn pick(
    context: &ActionContext<'_>,
    streams: &mut Streams<'_>,
) -> Result<Option<MergeRequest>, LabError> {
    let mut merge_requests = context
        .gateway
        .query_merge_requests(context.project, context.state)?;
    if merge_requests.is_empty() {
        streams.note(&format!(
            "No {} merge requests on project {}",
            context.state, context.project
        ))?;
        return Ok(None);
    }

    let template = context.format.unwrap_or(MERGE_REQUEST_PICK_TEMPLATE);
    let labels = merge_requests
        .iter()
        .map(|merge_request| context.formatter.merge_request(template, merge_request))
        .collect::<Result<Vec<_>, _>>()?;

    let chosen = context
        .picker
        .pick(&labels)?
        .filter(|index| *index < merge_requests.len())
        .map(|index| merge_requests.swap_remove(index));
    Ok(chosen)
}

fn show_diff(context: &ActionContext<'_>, merge_request: &MergeRequest) -> Result<(), LabError> {
    let refs = qualify_diff_refs(
        context.remote,
        &merge_request.target_branch,
        &merge_request.source_branch,
    );
    for remote in &refs.remotes {
        context.git.fetch(remote)?;
    }
    context.git.diff(&refs.base, &refs.head)?;
    Ok(())
}

fn title_from_branch(branch: &str) -> String {
    branch.replace(['-', '_'], " ")
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|candidate| !candidate.trim().is_empty())
}
