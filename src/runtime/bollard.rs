// ABOUTME: Bollard-based container runtime implementation.
// ABOUTME: Talks to the local Docker Engine API over its Unix socket.

use crate::runtime::traits::sealed::Sealed;
use crate::runtime::traits::{
    ArchiveError, ArchiveOps, ContainerError, ContainerFilters, ContainerInfo, ContainerOps,
    ContainerState, ContainerSummary, ExecConfig, ExecError, ExecOps, ExecResult, RuntimeInfo,
    RuntimeInfoError, RuntimeMetadata,
};
use crate::runtime::types::DetectedRuntime;
use crate::types::{ContainerId, ExecId};
use async_trait::async_trait;
use bollard::Docker;
use bollard::exec::StartExecOptions;
use bollard::query_parameters::{
    DownloadFromContainerOptions, InspectContainerOptions, ListContainersOptions,
};
use futures::StreamExt;
use std::path::Path;
use std::time::Duration;
use tokio::io::AsyncWriteExt;

/// Seconds bollard waits on a single API request.
const REQUEST_TIMEOUT_SECS: u64 = 120;

// =============================================================================
// Error Mapping Helpers
// =============================================================================

fn map_container_not_found_error(e: bollard::errors::Error) -> ContainerError {
    match &e {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 404 => ContainerError::NotFound(message.clone()),
        _ => ContainerError::Runtime(e.to_string()),
    }
}

fn map_exec_create_error(e: bollard::errors::Error) -> ExecError {
    match &e {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 404 => ExecError::ContainerNotFound(message.clone()),
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 409 => ExecError::ContainerNotRunning(message.clone()),
        _ => ExecError::Runtime(e.to_string()),
    }
}

fn map_exec_not_found_error(e: bollard::errors::Error) -> ExecError {
    match &e {
        bollard::errors::Error::DockerResponseServerError {
            status_code,
            message,
        } if *status_code == 404 => ExecError::ExecNotFound(message.clone()),
        _ => ExecError::Runtime(e.to_string()),
    }
}

fn map_archive_error(e: bollard::errors::Error, container: &ContainerId, path: &str) -> ArchiveError {
    match &e {
        // The archive endpoint answers 404 for both a missing container and a missing path.
        bollard::errors::Error::DockerResponseServerError { status_code, message }
            if *status_code == 404 && message.contains("No such container") =>
        {
            ArchiveError::ContainerNotFound(container.to_string())
        }
        bollard::errors::Error::DockerResponseServerError { status_code, .. }
            if *status_code == 404 =>
        {
            ArchiveError::PathNotFound(path.to_string())
        }
        _ => ArchiveError::Runtime(e.to_string()),
    }
}

fn map_state(status: Option<bollard::models::ContainerStateStatusEnum>) -> ContainerState {
    status
        .map(|s| match s {
            bollard::models::ContainerStateStatusEnum::CREATED => ContainerState::Created,
            bollard::models::ContainerStateStatusEnum::RUNNING => ContainerState::Running,
            bollard::models::ContainerStateStatusEnum::PAUSED => ContainerState::Paused,
            bollard::models::ContainerStateStatusEnum::RESTARTING => ContainerState::Restarting,
            bollard::models::ContainerStateStatusEnum::REMOVING => ContainerState::Removing,
            bollard::models::ContainerStateStatusEnum::EXITED => ContainerState::Exited,
            bollard::models::ContainerStateStatusEnum::DEAD => ContainerState::Dead,
            _ => ContainerState::Exited,
        })
        .unwrap_or(ContainerState::Exited)
}

// =============================================================================
// BollardRuntime
// =============================================================================

/// Container runtime implementation using bollard.
pub struct BollardRuntime {
    client: Docker,
    exec_timeout: Option<Duration>,
}

impl BollardRuntime {
    /// Create a new BollardRuntime from a Docker client.
    pub fn new(client: Docker) -> Self {
        Self {
            client,
            exec_timeout: None,
        }
    }

    /// Bound every exec that does not set its own timeout.
    pub fn with_exec_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.exec_timeout = timeout;
        self
    }

    /// Connect to the Docker socket found by `detect_local()`.
    pub fn connect(info: &DetectedRuntime) -> Result<Self, RuntimeInfoError> {
        let client = Docker::connect_with_unix(
            &info.socket_path,
            REQUEST_TIMEOUT_SECS,
            bollard::API_DEFAULT_VERSION,
        )
        .map_err(|e| RuntimeInfoError::ConnectionFailed(e.to_string()))?;
        Ok(Self::new(client))
    }

    /// Create an exec instance without starting it.
    pub async fn exec_create(
        &self,
        container: &ContainerId,
        config: &ExecConfig,
    ) -> Result<ExecId, ExecError> {
        let opts = bollard::models::ExecConfig {
            cmd: Some(config.cmd.clone()),
            env: if config.env.is_empty() {
                None
            } else {
                Some(config.env.clone())
            },
            working_dir: config.working_dir.clone(),
            user: config.user.clone(),
            attach_stdin: Some(false),
            attach_stdout: Some(config.attach_stdout),
            attach_stderr: Some(config.attach_stderr),
            tty: Some(config.tty),
            privileged: Some(config.privileged),
            ..Default::default()
        };

        let response = self
            .client
            .create_exec(container.as_str(), opts)
            .await
            .map_err(map_exec_create_error)?;

        Ok(ExecId::new(response.id))
    }

    /// Start a created exec instance in attached mode and collect its output.
    pub async fn exec_start(&self, exec_id: &ExecId) -> Result<ExecResult, ExecError> {
        let opts = StartExecOptions {
            detach: false,
            ..Default::default()
        };

        let result = self
            .client
            .start_exec(exec_id.as_str(), Some(opts))
            .await
            .map_err(map_exec_not_found_error)?;

        let mut stdout = Vec::new();
        let mut stderr = Vec::new();

        if let bollard::exec::StartExecResults::Attached { mut output, .. } = result {
            while let Some(item) = output.next().await {
                match item {
                    Ok(bollard::container::LogOutput::StdOut { message }) => {
                        stdout.extend(message);
                    }
                    Ok(bollard::container::LogOutput::StdErr { message }) => {
                        stderr.extend(message);
                    }
                    Ok(bollard::container::LogOutput::Console { message }) => {
                        stdout.extend(message);
                    }
                    Ok(_) => {}
                    Err(e) => {
                        return Err(ExecError::Failed(e.to_string()));
                    }
                }
            }
        }

        // Exit code is only known once the stream has closed
        let details = self
            .client
            .inspect_exec(exec_id.as_str())
            .await
            .map_err(map_exec_not_found_error)?;

        Ok(ExecResult {
            exit_code: details.exit_code.unwrap_or(0),
            stdout,
            stderr,
        })
    }
}

impl Sealed for BollardRuntime {}

#[async_trait]
impl RuntimeInfo for BollardRuntime {
    async fn info(&self) -> Result<RuntimeMetadata, RuntimeInfoError> {
        let info = self
            .client
            .info()
            .await
            .map_err(|e| RuntimeInfoError::ConnectionFailed(e.to_string()))?;

        Ok(RuntimeMetadata {
            name: "Docker".to_string(),
            version: info.server_version.unwrap_or_default(),
            api_version: bollard::API_DEFAULT_VERSION.to_string(),
            os: info.operating_system.unwrap_or_default(),
            arch: info.architecture.unwrap_or_default(),
        })
    }

    async fn ping(&self) -> Result<(), RuntimeInfoError> {
        self.client
            .ping()
            .await
            .map_err(|e| RuntimeInfoError::ConnectionFailed(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl ContainerOps for BollardRuntime {
    async fn inspect_container(&self, reference: &str) -> Result<ContainerInfo, ContainerError> {
        let details = self
            .client
            .inspect_container(reference, None::<InspectContainerOptions>)
            .await
            .map_err(map_container_not_found_error)?;

        let state = map_state(details.state.as_ref().and_then(|s| s.status));

        Ok(ContainerInfo {
            id: ContainerId::new(details.id.unwrap_or_else(|| reference.to_string())),
            name: details
                .name
                .unwrap_or_default()
                .trim_start_matches('/')
                .to_string(),
            state,
            labels: details.config.and_then(|c| c.labels).unwrap_or_default(),
        })
    }

    async fn inspect_document(
        &self,
        reference: &str,
    ) -> Result<serde_json::Value, ContainerError> {
        let details = self
            .client
            .inspect_container(reference, None::<InspectContainerOptions>)
            .await
            .map_err(map_container_not_found_error)?;

        // `docker inspect` prints an array even for a single container
        serde_json::to_value(vec![details]).map_err(|e| ContainerError::Runtime(e.to_string()))
    }

    async fn list_containers(
        &self,
        filters: &ContainerFilters,
    ) -> Result<Vec<ContainerSummary>, ContainerError> {
        let opts = ListContainersOptions {
            all: filters.all,
            ..Default::default()
        };

        let containers = self
            .client
            .list_containers(Some(opts))
            .await
            .map_err(|e| ContainerError::Runtime(e.to_string()))?;

        Ok(containers
            .into_iter()
            .map(|c| {
                let name = c
                    .names
                    .unwrap_or_default()
                    .first()
                    .map(|n| n.trim_start_matches('/').to_string())
                    .unwrap_or_default();

                let state = c
                    .state
                    .map(|s| format!("{:?}", s).to_lowercase())
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(ContainerState::Exited);

                ContainerSummary {
                    id: ContainerId::new(c.id.unwrap_or_default()),
                    name,
                    state,
                    labels: c.labels.unwrap_or_default(),
                }
            })
            .collect())
    }
}

#[async_trait]
impl ExecOps for BollardRuntime {
    async fn exec(
        &self,
        container: &ContainerId,
        config: &ExecConfig,
    ) -> Result<ExecResult, ExecError> {
        tracing::debug!(container = %container.short(), cmd = ?config.cmd, "exec");

        let run = async {
            let exec_id = self.exec_create(container, config).await?;
            self.exec_start(&exec_id).await
        };

        match config.timeout.or(self.exec_timeout) {
            Some(limit) => tokio::time::timeout(limit, run)
                .await
                .map_err(|_| ExecError::TimedOut(limit))?,
            None => run.await,
        }
    }
}

#[async_trait]
impl ArchiveOps for BollardRuntime {
    async fn download_archive(
        &self,
        container: &ContainerId,
        path: &str,
        dest: &Path,
    ) -> Result<u64, ArchiveError> {
        let opts = DownloadFromContainerOptions {
            path: path.to_string(),
        };

        let stream = self
            .client
            .download_from_container(container.as_str(), Some(opts))
            .map(|chunk| chunk.map_err(|e| map_archive_error(e, container, path)));

        write_chunks(stream, dest).await
    }
}

/// Drain `stream` into `dest`. Nothing is left at `dest` when the stream fails,
/// whether before the first chunk or part way through.
async fn write_chunks<S, B>(stream: S, dest: &Path) -> Result<u64, ArchiveError>
where
    S: futures::Stream<Item = Result<B, ArchiveError>>,
    B: AsRef<[u8]>,
{
    let mut stream = std::pin::pin!(stream);

    // A missing guest path fails before any data, so nothing is created.
    let first = match stream.next().await {
        Some(chunk) => chunk?,
        None => {
            tokio::fs::File::create(dest).await?;
            return Ok(0);
        }
    };

    let mut file = tokio::fs::File::create(dest).await?;
    let copied: Result<u64, ArchiveError> = async {
        file.write_all(first.as_ref()).await?;
        let mut written = first.as_ref().len() as u64;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(chunk.as_ref()).await?;
            written += chunk.as_ref().len() as u64;
        }
        file.flush().await?;
        Ok::<_, ArchiveError>(written)
    }
    .await;

    if copied.is_err() {
        drop(file);
        if let Err(e) = tokio::fs::remove_file(dest).await {
            tracing::debug!("cannot remove partial {}: {}", dest.display(), e);
        }
    }
    copied
}
