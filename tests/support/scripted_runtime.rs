// ABOUTME: In-memory runtime gateway double for reconcile scenarios.
// ABOUTME: Records every call in order and replays scripted inspect results and failures.

use async_trait::async_trait;
use berth::runtime::{
    ContainerDetails, ContainerError, ContainerFilters, ContainerOps, ContainerSummary,
    CreateRequest, EndpointConfig, FileError, FileOps, ImageError, ImageOps, LogError, LogLine,
    LogLines, LogOps, LogOptions, LogStream, NetworkError, NetworkOps, RemoveOptions,
    WaitCondition,
};
use berth::types::{ContainerId, NetworkId};
use bytes::Bytes;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

pub const CONTAINER_ID: &str = "c0ffee";

/// One gateway call, in the order the reconciler made it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ImageExists(String),
    PullImage(String),
    Create(String),
    Start,
    Stop(Duration),
    Remove { force: bool, remove_volumes: bool },
    Inspect,
    List,
    Wait(WaitCondition),
    Connect(String),
    Disconnect(String),
    Upload(String),
    Logs,
}

#[derive(Default)]
struct State {
    calls: Vec<Call>,
    image_missing: bool,
    exists: bool,
    inspections: VecDeque<ContainerDetails>,
    exit_code: i64,
    log_lines: Vec<String>,
    created: Option<CreateRequest>,
    connected: Vec<(String, EndpointConfig)>,
    uploads: Vec<(String, Bytes)>,
    fail_start: Option<ContainerError>,
    fail_stop: Option<ContainerError>,
    fail_remove: Option<ContainerError>,
    fail_wait_removed: Option<ContainerError>,
    fail_disconnect: Option<NetworkError>,
    fail_connect: Option<NetworkError>,
}

/// Cloneable handle: the reconciler owns one clone, the test keeps another.
#[derive(Clone, Default)]
pub struct ScriptedRuntime {
    state: Arc<Mutex<State>>,
}

/// Inspect result for a running container.
pub fn running() -> ContainerDetails {
    let mut details = ContainerDetails::new(ContainerId::new(CONTAINER_ID));
    details.running = true;
    details.finished_at = "0001-01-01T00:00:00Z".to_string();
    details
}

/// Inspect result for a container that stopped at `finished_at`.
pub fn stopped(finished_at: &str, exit_code: i64) -> ContainerDetails {
    let mut details = ContainerDetails::new(ContainerId::new(CONTAINER_ID));
    details.finished_at = finished_at.to_string();
    details.exit_code = exit_code;
    details
}

impl ScriptedRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// A runtime where the container already exists (e.g. created by an earlier apply).
    pub fn with_existing(details: ContainerDetails) -> Self {
        let runtime = Self::new();
        {
            let mut state = runtime.state.lock();
            state.exists = true;
            state.inspections.push_back(details);
        }
        runtime
    }

    /// Queue inspect results. The last one repeats once the queue drains.
    pub fn script_inspect(&self, details: impl IntoIterator<Item = ContainerDetails>) {
        self.state.lock().inspections.extend(details);
    }

    pub fn set_image_missing(&self) {
        self.state.lock().image_missing = true;
    }

    pub fn set_exit_code(&self, code: i64) {
        self.state.lock().exit_code = code;
    }

    pub fn set_log_lines(&self, lines: &[&str]) {
        self.state.lock().log_lines = lines.iter().map(|l| l.to_string()).collect();
    }

    pub fn fail_start(&self, err: ContainerError) {
        self.state.lock().fail_start = Some(err);
    }

    pub fn fail_stop(&self, err: ContainerError) {
        self.state.lock().fail_stop = Some(err);
    }

    pub fn fail_remove(&self, err: ContainerError) {
        self.state.lock().fail_remove = Some(err);
    }

    pub fn fail_wait_removed(&self, err: ContainerError) {
        self.state.lock().fail_wait_removed = Some(err);
    }

    pub fn fail_disconnect(&self, err: NetworkError) {
        self.state.lock().fail_disconnect = Some(err);
    }

    pub fn fail_connect(&self, err: NetworkError) {
        self.state.lock().fail_connect = Some(err);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().calls.clone()
    }

    /// Calls with the read-side noise (inspect, list) filtered out.
    pub fn mutations(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, Call::Inspect | Call::List))
            .collect()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.state.lock().calls.iter().filter(|c| *c == call).count()
    }

    pub fn exists(&self) -> bool {
        self.state.lock().exists
    }

    pub fn created(&self) -> Option<CreateRequest> {
        self.state.lock().created.clone()
    }

    pub fn connected(&self) -> Vec<(String, EndpointConfig)> {
        self.state.lock().connected.clone()
    }

    pub fn uploads(&self) -> Vec<(String, Bytes)> {
        self.state.lock().uploads.clone()
    }

    fn record(&self, call: Call) {
        self.state.lock().calls.push(call);
    }
}

#[async_trait]
impl ContainerOps for ScriptedRuntime {
    async fn create_container(
        &self,
        request: &CreateRequest,
    ) -> Result<ContainerId, ContainerError> {
        let mut state = self.state.lock();
        state.calls.push(Call::Create(request.name.clone()));
        state.created = Some(request.clone());
        state.exists = true;
        Ok(ContainerId::new(CONTAINER_ID))
    }

    async fn start_container(&self, _id: &ContainerId) -> Result<(), ContainerError> {
        let mut state = self.state.lock();
        state.calls.push(Call::Start);
        match state.fail_start.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn stop_container(
        &self,
        _id: &ContainerId,
        timeout: Duration,
    ) -> Result<(), ContainerError> {
        let mut state = self.state.lock();
        state.calls.push(Call::Stop(timeout));
        match state.fail_stop.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn remove_container(
        &self,
        _id: &ContainerId,
        opts: &RemoveOptions,
    ) -> Result<(), ContainerError> {
        let mut state = self.state.lock();
        state.calls.push(Call::Remove {
            force: opts.force,
            remove_volumes: opts.remove_volumes,
        });
        match state.fail_remove.take() {
            Some(err) => Err(err),
            None => {
                state.exists = false;
                Ok(())
            }
        }
    }

    async fn inspect_container(
        &self,
        id: &ContainerId,
    ) -> Result<ContainerDetails, ContainerError> {
        let mut state = self.state.lock();
        state.calls.push(Call::Inspect);
        if !state.exists {
            return Err(ContainerError::NotFound(id.to_string()));
        }
        let details = if state.inspections.len() > 1 {
            state.inspections.pop_front()
        } else {
            state.inspections.front().cloned()
        };
        Ok(details.unwrap_or_else(running))
    }

    async fn list_containers(
        &self,
        filters: &ContainerFilters,
    ) -> Result<Vec<ContainerSummary>, ContainerError> {
        let mut state = self.state.lock();
        state.calls.push(Call::List);
        assert!(filters.all, "existence lookup must include stopped containers");
        if !state.exists {
            return Ok(Vec::new());
        }
        Ok(vec![ContainerSummary {
            id: ContainerId::new(CONTAINER_ID),
        }])
    }

    async fn wait_container(
        &self,
        _id: &ContainerId,
        condition: WaitCondition,
    ) -> Result<i64, ContainerError> {
        let mut state = self.state.lock();
        state.calls.push(Call::Wait(condition));
        match condition {
            WaitCondition::NotRunning => Ok(state.exit_code),
            WaitCondition::Removed => match state.fail_wait_removed.take() {
                Some(err) => Err(err),
                None => {
                    state.exists = false;
                    Ok(0)
                }
            },
        }
    }
}

#[async_trait]
impl NetworkOps for ScriptedRuntime {
    async fn connect_to_network(
        &self,
        _container: &ContainerId,
        network: &NetworkId,
        endpoint: &EndpointConfig,
    ) -> Result<(), NetworkError> {
        let mut state = self.state.lock();
        state.calls.push(Call::Connect(network.to_string()));
        if let Some(err) = state.fail_connect.take() {
            return Err(err);
        }
        state.connected.push((network.to_string(), endpoint.clone()));
        Ok(())
    }

    async fn disconnect_from_network(
        &self,
        _container: &ContainerId,
        network: &NetworkId,
        _force: bool,
    ) -> Result<(), NetworkError> {
        let mut state = self.state.lock();
        state.calls.push(Call::Disconnect(network.to_string()));
        match state.fail_disconnect.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ImageOps for ScriptedRuntime {
    async fn pull_image(&self, reference: &str) -> Result<(), ImageError> {
        let mut state = self.state.lock();
        state.calls.push(Call::PullImage(reference.to_string()));
        state.image_missing = false;
        Ok(())
    }

    async fn image_exists(&self, reference: &str) -> Result<bool, ImageError> {
        let mut state = self.state.lock();
        state.calls.push(Call::ImageExists(reference.to_string()));
        Ok(!state.image_missing)
    }
}

#[async_trait]
impl FileOps for ScriptedRuntime {
    async fn copy_to_container(
        &self,
        _id: &ContainerId,
        path: &str,
        archive: Bytes,
    ) -> Result<(), FileError> {
        let mut state = self.state.lock();
        state.calls.push(Call::Upload(path.to_string()));
        state.uploads.push((path.to_string(), archive));
        Ok(())
    }
}

#[async_trait]
impl LogOps for ScriptedRuntime {
    async fn container_logs(
        &self,
        _id: &ContainerId,
        _opts: &LogOptions,
    ) -> Result<LogLines, LogError> {
        self.record(Call::Logs);
        let lines: Vec<Result<LogLine, LogError>> = self
            .state
            .lock()
            .log_lines
            .iter()
            .map(|content| {
                Ok(LogLine {
                    content: format!("{content}\n"),
                    stream: LogStream::Stdout,
                })
            })
            .collect();
        Ok(Box::pin(futures::stream::iter(lines)))
    }
}
