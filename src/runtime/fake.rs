// ABOUTME: In-memory runtime used by unit tests.
// ABOUTME: Scripted container states, exec results and archives without a Docker daemon.

use crate::runtime::traits::sealed::Sealed;
use crate::runtime::traits::{
    ArchiveError, ArchiveOps, ContainerError, ContainerFilters, ContainerInfo, ContainerOps,
    ContainerState, ContainerSummary, ExecConfig, ExecError, ExecOps, ExecResult, RuntimeInfo,
    RuntimeInfoError, RuntimeMetadata,
};
use crate::health::BOOT_PROBE;
use crate::types::ContainerId;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

#[derive(Debug, Clone)]
pub(crate) struct FakeContainer {
    pub id: ContainerId,
    pub name: String,
    pub state: ContainerState,
    pub labels: HashMap<String, String>,
    pub boot_exit: i64,
    pub boot_output: Vec<u8>,
    pub failing: Vec<String>,
    pub archive: Option<Vec<u8>>,
}

impl FakeContainer {
    pub fn running(name: &str) -> Self {
        Self {
            id: ContainerId::new(format!("{name}-0123456789abcdef")),
            name: name.to_string(),
            state: ContainerState::Running,
            labels: HashMap::new(),
            boot_exit: 0,
            boot_output: b"1\n".to_vec(),
            failing: Vec::new(),
            archive: Some(b"fake tar".to_vec()),
        }
    }

    pub fn exited(name: &str) -> Self {
        Self {
            state: ContainerState::Exited,
            ..Self::running(name)
        }
    }

    pub fn boot_output(mut self, output: &[u8]) -> Self {
        self.boot_output = output.to_vec();
        self
    }

    pub fn boot_exit(mut self, code: i64) -> Self {
        self.boot_exit = code;
        self
    }

    pub fn fail_on(mut self, command: &str) -> Self {
        self.failing.push(command.to_string());
        self
    }

    pub fn without_archive(mut self) -> Self {
        self.archive = None;
        self
    }

    pub fn label(mut self, key: &str, value: &str) -> Self {
        self.labels.insert(key.to_string(), value.to_string());
        self
    }

    fn info(&self) -> ContainerInfo {
        ContainerInfo {
            id: self.id.clone(),
            name: self.name.clone(),
            state: self.state,
            labels: self.labels.clone(),
        }
    }
}

#[derive(Default)]
pub(crate) struct FakeRuntime {
    containers: Mutex<Vec<FakeContainer>>,
    execs: Mutex<Vec<(String, String)>>,
}

impl FakeRuntime {
    pub fn new(containers: Vec<FakeContainer>) -> Self {
        Self {
            containers: Mutex::new(containers),
            execs: Mutex::new(Vec::new()),
        }
    }

    /// Mutate a container in place, e.g. to simulate a restart.
    pub fn update(&self, name: &str, f: impl FnOnce(&mut FakeContainer)) {
        let mut containers = self.containers.lock().unwrap();
        if let Some(c) = containers.iter_mut().find(|c| c.name == name) {
            f(c);
        }
    }

    /// Command lines executed in `name`, in order.
    pub fn execs_for(&self, name: &str) -> Vec<String> {
        self.execs
            .lock()
            .unwrap()
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, cmd)| cmd.clone())
            .collect()
    }

    fn find(&self, reference: &str) -> Option<FakeContainer> {
        self.containers
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.name == reference || c.id.as_str() == reference)
            .cloned()
    }

    fn find_by_id(&self, id: &ContainerId) -> Option<FakeContainer> {
        self.find(id.as_str())
    }
}

impl Sealed for FakeRuntime {}

#[async_trait]
impl RuntimeInfo for FakeRuntime {
    async fn info(&self) -> Result<RuntimeMetadata, RuntimeInfoError> {
        Ok(RuntimeMetadata {
            name: "Fake".to_string(),
            version: "0.0.0".to_string(),
            api_version: "1.45".to_string(),
            os: "linux".to_string(),
            arch: "aarch64".to_string(),
        })
    }

    async fn ping(&self) -> Result<(), RuntimeInfoError> {
        Ok(())
    }
}

#[async_trait]
impl ContainerOps for FakeRuntime {
    async fn inspect_container(&self, reference: &str) -> Result<ContainerInfo, ContainerError> {
        self.find(reference)
            .map(|c| c.info())
            .ok_or_else(|| ContainerError::NotFound(reference.to_string()))
    }

    async fn inspect_document(
        &self,
        reference: &str,
    ) -> Result<serde_json::Value, ContainerError> {
        let c = self
            .find(reference)
            .ok_or_else(|| ContainerError::NotFound(reference.to_string()))?;
        Ok(serde_json::json!([{
            "Id": c.id.as_str(),
            "Name": format!("/{}", c.name),
            "State": { "Status": c.state.to_string() },
        }]))
    }

    async fn list_containers(
        &self,
        filters: &ContainerFilters,
    ) -> Result<Vec<ContainerSummary>, ContainerError> {
        Ok(self
            .containers
            .lock()
            .unwrap()
            .iter()
            .filter(|c| filters.all || c.state.is_running())
            .map(|c| ContainerSummary::from(c.info()))
            .collect())
    }
}

#[async_trait]
impl ExecOps for FakeRuntime {
    async fn exec(
        &self,
        container: &ContainerId,
        config: &ExecConfig,
    ) -> Result<ExecResult, ExecError> {
        let c = self
            .find_by_id(container)
            .ok_or_else(|| ExecError::ContainerNotFound(container.to_string()))?;

        if !c.state.is_running() {
            return Err(ExecError::ContainerNotRunning(c.name));
        }

        let line = config.cmd.join(" ");
        self.execs
            .lock()
            .unwrap()
            .push((c.name.clone(), line.clone()));

        if line == BOOT_PROBE {
            return Ok(ExecResult {
                exit_code: c.boot_exit,
                stdout: c.boot_output,
                stderr: Vec::new(),
            });
        }

        if c.failing.iter().any(|f| line.starts_with(f.as_str())) {
            return Ok(ExecResult {
                exit_code: 1,
                stdout: Vec::new(),
                stderr: format!("{line}: failed\n").into_bytes(),
            });
        }

        Ok(ExecResult {
            exit_code: 0,
            stdout: format!("output of {line}\n").into_bytes(),
            stderr: Vec::new(),
        })
    }
}

#[async_trait]
impl ArchiveOps for FakeRuntime {
    async fn download_archive(
        &self,
        container: &ContainerId,
        path: &str,
        dest: &Path,
    ) -> Result<u64, ArchiveError> {
        let c = self
            .find_by_id(container)
            .ok_or_else(|| ArchiveError::ContainerNotFound(container.to_string()))?;
        let bytes = c
            .archive
            .ok_or_else(|| ArchiveError::PathNotFound(path.to_string()))?;
        std::fs::write(dest, &bytes)?;
        Ok(bytes.len() as u64)
    }
}
