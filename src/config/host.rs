// ABOUTME: Host precondition configuration.
// ABOUTME: Kernel module files, insmod parameters and the binfmt_misc emulation entry.

use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HostConfig {
    #[serde(default = "default_binder_module")]
    pub binder_module: PathBuf,

    #[serde(default = "default_binder_params")]
    pub binder_params: Vec<String>,

    #[serde(default = "default_ashmem_module")]
    pub ashmem_module: PathBuf,

    /// Names that must all appear in the `lsmod` listing.
    #[serde(default = "default_required_modules")]
    pub required_modules: Vec<String>,

    #[serde(default = "default_emulation_status")]
    pub emulation_status: PathBuf,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            binder_module: default_binder_module(),
            binder_params: default_binder_params(),
            ashmem_module: default_ashmem_module(),
            required_modules: default_required_modules(),
            emulation_status: default_emulation_status(),
        }
    }
}

fn default_binder_module() -> PathBuf {
    PathBuf::from("/lib/modules/5.4.30/kernel/lib/aosp9_binder_linux.ko")
}

fn default_binder_params() -> Vec<String> {
    vec!["num_devices=400".to_string()]
}

fn default_ashmem_module() -> PathBuf {
    PathBuf::from("/lib/modules/5.4.30/kernel/lib/ashmem_linux.ko")
}

fn default_required_modules() -> Vec<String> {
    vec!["binder".to_string(), "ashmem".to_string()]
}

fn default_emulation_status() -> PathBuf {
    PathBuf::from("/proc/sys/fs/binfmt_misc/ubt_a32a64")
}
