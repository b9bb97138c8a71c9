// ABOUTME: Kbox restart scripts on the host.
// ABOUTME: Locates android9_kbox.sh and base_box.sh, marks them executable and runs restarts.

use crate::config::ScriptsConfig;
use crate::error::{Error, Result};
use crate::process::{self, CommandOutput};
use crate::types::ContainerIndex;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// The restart script and the base script it relies on.
#[derive(Debug, Clone)]
pub struct RestartScripts {
    dir: PathBuf,
    restart: PathBuf,
    base: PathBuf,
}

impl RestartScripts {
    pub fn new(dir: &Path, config: &ScriptsConfig) -> Self {
        Self {
            dir: dir.to_path_buf(),
            restart: dir.join(&config.restart),
            base: dir.join(&config.base),
        }
    }

    /// Find both scripts in `dir` and make them executable by their owner.
    pub fn locate(dir: &Path, config: &ScriptsConfig) -> Result<Self> {
        let scripts = Self::new(dir, config);
        scripts.ensure()?;
        Ok(scripts)
    }

    /// Fail unless both scripts exist, then set `u+x` on each.
    pub fn ensure(&self) -> Result<()> {
        for path in [&self.restart, &self.base] {
            if !path.is_file() {
                tracing::error!("{} is not found", path.display());
                return Err(Error::ScriptNotFound(path.clone()));
            }
        }

        for path in [&self.restart, &self.base] {
            make_user_executable(path)?;
        }

        Ok(())
    }

    pub fn restart_script(&self) -> &Path {
        &self.restart
    }

    /// `android9_kbox.sh restart`: restarts host-side services, emulation included.
    pub async fn restart_host(&self) -> Result<CommandOutput> {
        self.run(&["restart".to_string()]).await
    }

    /// `android9_kbox.sh restart <index>`: restarts one container.
    pub async fn restart_container(&self, index: ContainerIndex) -> Result<CommandOutput> {
        self.run(&["restart".to_string(), index.to_string()]).await
    }

    async fn run(&self, args: &[String]) -> Result<CommandOutput> {
        tracing::info!("running {} {}", self.restart.display(), args.join(" "));
        let output = process::run_in(Some(&self.dir), &self.restart, args).await?;

        if output.success {
            tracing::info!("restart script completed successfully");
        } else {
            tracing::warn!(
                "restart script failed with exit code {:?}",
                output.exit_code
            );
        }

        Ok(output)
    }
}

fn make_user_executable(path: &Path) -> Result<()> {
    let mut perms = std::fs::metadata(path)?.permissions();
    let mode = perms.mode();
    if mode & 0o100 == 0 {
        perms.set_mode(mode | 0o100);
        std::fs::set_permissions(path, perms)?;
    }
    Ok(())
}
