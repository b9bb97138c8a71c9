// ABOUTME: Diagnostics collection configuration.
// ABOUTME: Output location, host log sources and the optional bind-mount mirror.

use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectConfig {
    /// Where working directories and archives are created; the working directory when unset.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    #[serde(default = "default_host_log_dir")]
    pub host_log_dir: PathBuf,

    #[serde(default = "default_gpu_debug_root")]
    pub gpu_debug_root: PathBuf,

    /// Host directory where each container's `/data` is bind-mounted, as `<root>/<name>/data`.
    #[serde(default)]
    pub bind_mount_root: Option<PathBuf>,
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            host_log_dir: default_host_log_dir(),
            gpu_debug_root: default_gpu_debug_root(),
            bind_mount_root: None,
        }
    }
}

fn default_host_log_dir() -> PathBuf {
    PathBuf::from("/var/log")
}

fn default_gpu_debug_root() -> PathBuf {
    PathBuf::from("/sys/kernel/debug/dri")
}
