// ABOUTME: Host process execution for fixed external tools.
// ABOUTME: Runs lsmod, insmod, dmesg, docker stats and scripts, capturing or redirecting output.

use crate::error::{Error, Result};
use std::ffi::OsStr;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

/// Result of running a host command.
#[derive(Debug)]
pub struct CommandOutput {
    pub success: bool,
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

fn describe<S: AsRef<OsStr>>(program: &OsStr, args: &[S]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(AsRef::as_ref))
        .map(|s| s.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run `program` with `args` and capture both streams.
///
/// Fails only when the process cannot be spawned; a non-zero exit is reported
/// through [`CommandOutput::success`].
pub async fn run<P, S>(program: P, args: &[S]) -> Result<CommandOutput>
where
    P: AsRef<OsStr>,
    S: AsRef<OsStr>,
{
    run_in(None, program, args).await
}

/// Like [`run`], optionally from inside `dir`.
pub async fn run_in<P, S>(dir: Option<&Path>, program: P, args: &[S]) -> Result<CommandOutput>
where
    P: AsRef<OsStr>,
    S: AsRef<OsStr>,
{
    let program = program.as_ref();
    let command = describe(program, args);
    tracing::debug!("running {}", command);

    let mut cmd = Command::new(program);
    if let Some(dir) = dir {
        cmd.current_dir(dir);
    }

    let output = cmd
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|source| Error::Command { command, source })?;

    let result = CommandOutput {
        success: output.status.success(),
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    };

    if !result.success {
        tracing::debug!(
            "{} exited with {:?}: {}",
            program.to_string_lossy(),
            result.exit_code,
            result.stderr.trim()
        );
    }

    Ok(result)
}

/// Run `program` with stdout redirected into `dest`.
///
/// Returns whether the command exited successfully.
pub async fn run_to_file<P, S>(program: P, args: &[S], dest: &Path) -> Result<bool>
where
    P: AsRef<OsStr>,
    S: AsRef<OsStr>,
{
    let program = program.as_ref();
    let command = describe(program, args);
    tracing::debug!("running {} > {}", command, dest.display());

    let file = std::fs::File::create(dest)?;
    let status = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::from(file))
        .stderr(Stdio::inherit())
        .status()
        .await
        .map_err(|source| Error::Command { command, source })?;

    Ok(status.success())
}
