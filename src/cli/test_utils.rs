//! Shared test utilities for CLI tests.

use std::cell::RefCell;

use lab::gitlab::{
    ActivityFeed, CreateMergeRequest, FeedGateway, GlobalId, InternalId, MergeRequest,
};
use lab::{
    Browser, GitRepository, LabError, LocalDiscoveryError, MergeRequestGateway, OutputFormatter,
    ProjectPath, ServerHandle,
};

use super::context::{ActionContext, Streams};
use super::picker::MergeRequestPicker;

/// Builds a merge request with predictable fields.
#[must_use]
pub fn merge_request(iid: u64, source_branch: &str, target_branch: &str) -> MergeRequest {
    MergeRequest {
        id: GlobalId::new(iid + 1000),
        iid: InternalId::new(iid),
        title: format!("Merge {source_branch}"),
        description: String::new(),
        source_branch: source_branch.to_owned(),
        target_branch: target_branch.to_owned(),
        state: Some("opened".to_owned()),
        web_url: None,
    }
}

/// Git fake that records every mutating call.
pub struct RecordingGit {
    /// Answer for `current_branch`.
    pub branch: Result<String, LocalDiscoveryError>,
    /// Calls in order, e.g. `fetch origin`.
    pub calls: RefCell<Vec<String>>,
}

impl RecordingGit {
    fn on_branch(branch: &str) -> Self {
        Self {
            branch: Ok(branch.to_owned()),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Recorded calls.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

impl GitRepository for RecordingGit {
    fn current_branch(&self) -> Result<String, LocalDiscoveryError> {
        self.branch.clone()
    }

    fn remote_url(&self, remote: &str) -> Result<String, LocalDiscoveryError> {
        Err(LocalDiscoveryError::UnknownRemote {
            name: remote.to_owned(),
        })
    }

    fn fetch(&self, remote: &str) -> Result<(), LocalDiscoveryError> {
        self.record(format!("fetch {remote}"));
        Ok(())
    }

    fn checkout(&self, branch: &str) -> Result<(), LocalDiscoveryError> {
        self.record(format!("checkout {branch}"));
        Ok(())
    }

    fn diff(&self, base: &str, head: &str) -> Result<(), LocalDiscoveryError> {
        self.record(format!("diff {base}..{head}"));
        Ok(())
    }
}

/// Gateway fake serving a fixed merge request list.
pub struct CapturingGateway {
    /// Merge requests returned by every query.
    pub merge_requests: Vec<MergeRequest>,
    /// Error returned by `remove_branch`, if any.
    pub remove_error: Option<LabError>,
    /// Payloads passed to `create_merge_request`.
    pub created: RefCell<Vec<CreateMergeRequest>>,
    /// Calls in order, e.g. `query opened`.
    pub calls: RefCell<Vec<String>>,
}

impl CapturingGateway {
    /// Recorded calls.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

impl MergeRequestGateway for CapturingGateway {
    fn create_merge_request(
        &self,
        project: &ProjectPath,
        request: &CreateMergeRequest,
    ) -> Result<MergeRequest, LabError> {
        self.record(format!("create {project}"));
        self.created.borrow_mut().push(request.clone());
        let mut created = merge_request(42, &request.source_branch, &request.target_branch);
        created.title.clone_from(&request.title);
        Ok(created)
    }

    fn query_merge_requests(
        &self,
        project: &ProjectPath,
        state: &str,
    ) -> Result<Vec<MergeRequest>, LabError> {
        self.record(format!("query {project} {state}"));
        Ok(self.merge_requests.clone())
    }

    fn accept_merge_request(&self, _project: &ProjectPath, id: GlobalId) -> Result<(), LabError> {
        self.record(format!("accept {id}"));
        Ok(())
    }

    fn remove_branch(&self, _project: &ProjectPath, branch: &str) -> Result<(), LabError> {
        self.record(format!("remove {branch}"));
        self.remove_error.clone().map_or(Ok(()), Err)
    }
}

/// Feed fake returning one preconfigured response.
#[derive(Default)]
pub struct StubFeed {
    response: RefCell<Option<Result<ActivityFeed, LabError>>>,
}

impl StubFeed {
    /// Sets the response of the next `dashboard_feed` call.
    pub fn respond_with(&mut self, response: Result<ActivityFeed, LabError>) {
        *self.response.get_mut() = Some(response);
    }
}

impl FeedGateway for StubFeed {
    fn dashboard_feed(&self) -> Result<ActivityFeed, LabError> {
        self.response
            .borrow_mut()
            .take()
            .expect("feed response should be configured")
    }
}

/// Browser fake remembering opened URLs.
#[derive(Default)]
pub struct RecordingBrowser {
    opened: RefCell<Vec<String>>,
}

impl RecordingBrowser {
    /// URLs opened so far.
    #[must_use]
    pub fn opened(&self) -> Vec<String> {
        self.opened.borrow().clone()
    }
}

impl Browser for RecordingBrowser {
    fn open(&self, url: &str) -> Result<(), LabError> {
        self.opened.borrow_mut().push(url.to_owned());
        Ok(())
    }
}

/// Picker fake answering with a fixed choice.
#[derive(Default)]
pub struct ScriptedPicker {
    /// Index to return; `None` simulates a cancelled prompt.
    pub choice: Option<usize>,
    offered: RefCell<Vec<String>>,
}

impl ScriptedPicker {
    /// Labels shown by the last `pick` call.
    #[must_use]
    pub fn offered(&self) -> Vec<String> {
        self.offered.borrow().clone()
    }
}

impl MergeRequestPicker for ScriptedPicker {
    fn pick(&self, labels: &[String]) -> Result<Option<usize>, LabError> {
        self.offered.replace(labels.to_vec());
        Ok(self.choice)
    }
}

/// Fakes and settings for one action under test.
pub struct Harness {
    /// Git fake.
    pub git: RecordingGit,
    /// Merge request gateway fake.
    pub gateway: CapturingGateway,
    /// Feed fake.
    pub feed: StubFeed,
    /// Browser fake.
    pub browser: RecordingBrowser,
    /// Picker fake.
    pub picker: ScriptedPicker,
    /// Colourless formatter.
    pub formatter: OutputFormatter,
    /// Server at `http://gitlab.example.com`.
    pub server: ServerHandle,
    /// `group/project`.
    pub project: ProjectPath,
    /// Configured remote.
    pub remote: &'static str,
    /// Merge request state filter.
    pub state: &'static str,
    /// User template.
    pub format: Option<&'static str>,
}

impl Harness {
    /// Harness on branch `feature-x` with no merge requests.
    #[must_use]
    pub fn new() -> Self {
        Self {
            git: RecordingGit::on_branch("feature-x"),
            gateway: CapturingGateway {
                merge_requests: Vec::new(),
                remove_error: None,
                created: RefCell::new(Vec::new()),
                calls: RefCell::new(Vec::new()),
            },
            feed: StubFeed::default(),
            browser: RecordingBrowser::default(),
            picker: ScriptedPicker::default(),
            formatter: OutputFormatter::new(false),
            server: ServerHandle::new("http", "gitlab.example.com")
                .expect("server should be valid"),
            project: ProjectPath::new("group/project").expect("project should be valid"),
            remote: "origin",
            state: "opened",
            format: None,
        }
    }

    /// Harness serving `merge_requests`.
    #[must_use]
    pub fn with_merge_requests(merge_requests: Vec<MergeRequest>) -> Self {
        let mut harness = Self::new();
        harness.gateway.merge_requests = merge_requests;
        harness
    }

    /// Context borrowing every fake.
    #[must_use]
    pub fn context(&self) -> ActionContext<'_> {
        ActionContext {
            git: &self.git,
            gateway: &self.gateway,
            feed: &self.feed,
            browser: &self.browser,
            picker: &self.picker,
            formatter: &self.formatter,
            server: &self.server,
            project: &self.project,
            remote: self.remote,
            state: self.state,
            format: self.format,
        }
    }
}

/// In-memory stdout and stderr.
#[derive(Default)]
pub struct CapturedOutput {
    out: Vec<u8>,
    err: Vec<u8>,
}

impl CapturedOutput {
    /// Streams writing into this capture.
    #[must_use]
    pub fn streams(&mut self) -> Streams<'_> {
        Streams {
            out: &mut self.out,
            err: &mut self.err,
        }
    }

    /// Captured stdout.
    #[must_use]
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.out).into_owned()
    }

    /// Captured stderr.
    #[must_use]
    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.err).into_owned()
    }
}
