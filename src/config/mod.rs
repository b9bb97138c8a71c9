// ABOUTME: Configuration types and parsing for kbox-maintainer.yml.
// ABOUTME: Every field has a default, so the tool runs without a config file.

mod collect;
mod host;
mod scripts;

pub use collect::CollectConfig;
pub use host::HostConfig;
pub use scripts::ScriptsConfig;

use crate::error::{Error, Result};
use crate::runtime::RuntimeConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "kbox-maintainer.yml";
pub const CONFIG_FILENAME_ALT: &str = "kbox-maintainer.yaml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub runtime: RuntimeConfig,

    #[serde(default)]
    pub host: HostConfig,

    #[serde(default)]
    pub scripts: ScriptsConfig,

    #[serde(default)]
    pub recovery: RecoveryConfig,

    #[serde(default)]
    pub collect: CollectConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecoveryConfig {
    /// Container label holding the restart-script index.
    #[serde(default = "default_index_label")]
    pub index_label: String,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            index_label: default_index_label(),
        }
    }
}

fn default_index_label() -> String {
    "kbox.index".to_string()
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load the config file from `dir` if present, else the defaults.
    ///
    /// Relative directories are anchored at `dir`.
    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [dir.join(CONFIG_FILENAME), dir.join(CONFIG_FILENAME_ALT)];

        let config = match candidates.iter().find(|p| p.exists()) {
            Some(path) => {
                tracing::debug!("loading config from {}", path.display());
                Self::load(path)?
            }
            None => Self::default(),
        };

        Ok(config.anchored_at(dir))
    }

    /// Directory holding the restart scripts.
    pub fn scripts_dir(&self, cwd: &Path) -> PathBuf {
        self.scripts.dir.clone().unwrap_or_else(|| cwd.to_path_buf())
    }

    /// Directory receiving working directories and archives.
    pub fn output_dir(&self, cwd: &Path) -> PathBuf {
        self.collect
            .output_dir
            .clone()
            .unwrap_or_else(|| cwd.to_path_buf())
    }

    fn anchored_at(mut self, dir: &Path) -> Self {
        let anchor = |p: PathBuf| if p.is_relative() { dir.join(p) } else { p };
        self.scripts.dir = self.scripts.dir.map(anchor);
        self.collect.output_dir = self.collect.output_dir.map(anchor);
        self
    }

    fn validate(&self) -> Result<()> {
        if self.host.required_modules.iter().any(|m| m.trim().is_empty()) {
            return Err(Error::InvalidConfig(
                "host.required_modules cannot contain empty names".to_string(),
            ));
        }

        if self.scripts.restart.trim().is_empty() || self.scripts.base.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "scripts.restart and scripts.base cannot be empty".to_string(),
            ));
        }

        if self.recovery.index_label.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "recovery.index_label cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
