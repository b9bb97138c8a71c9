// ABOUTME: Scoped working directory for a collection run.
// ABOUTME: `kbox_XXXXXX_<log|res>` with guestos/ and hostos/, removed when dropped.

use super::CollectKind;
use crate::error::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[derive(Debug)]
pub struct WorkDir {
    dir: TempDir,
    name: String,
}

impl WorkDir {
    pub const GUEST: &'static str = "guestos";
    pub const HOST: &'static str = "hostos";

    /// Create a fresh working directory inside `parent`.
    pub fn create(parent: &Path, kind: CollectKind) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("kbox_")
            .suffix(&format!("_{}", kind.tag()))
            .tempdir_in(parent)?;

        std::fs::create_dir_all(dir.path().join(Self::GUEST))?;
        std::fs::create_dir_all(dir.path().join(Self::HOST))?;

        let name = dir
            .path()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        tracing::debug!("working directory {}", dir.path().display());
        Ok(Self { dir, name })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Final path component, reused for the guest temp directory.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn host_dir(&self) -> PathBuf {
        self.path().join(Self::HOST)
    }

    /// `guestos/<container>`, created on first use.
    pub fn guest_dir(&self, container: &str) -> std::io::Result<PathBuf> {
        let dir = self.path().join(Self::GUEST).join(container);
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Remove the directory now, reporting failures instead of ignoring them.
    pub fn close(self) -> Result<()> {
        Ok(self.dir.close()?)
    }
}
