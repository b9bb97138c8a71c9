// ABOUTME: Restart script configuration.
// ABOUTME: Locates the Kbox restart script and the base script it sources.

use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptsConfig {
    /// Directory holding both scripts; the working directory when unset.
    #[serde(default)]
    pub dir: Option<PathBuf>,

    #[serde(default = "default_restart")]
    pub restart: String,

    #[serde(default = "default_base")]
    pub base: String,
}

impl Default for ScriptsConfig {
    fn default() -> Self {
        Self {
            dir: None,
            restart: default_restart(),
            base: default_base(),
        }
    }
}

fn default_restart() -> String {
    "android9_kbox.sh".to_string()
}

fn default_base() -> String {
    "base_box.sh".to_string()
}
