// ABOUTME: Validated container index passed to the Kbox restart script.
// ABOUTME: Parsed from an explicit label or from the `<prefix>_<index>` naming convention.

use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContainerIndexError {
    #[error("container index cannot be empty")]
    Empty,

    #[error("container index must be a positive integer, got '{0}'")]
    NotNumeric(String),

    #[error("container name '{0}' does not follow the <prefix>_<index> convention")]
    NoIndexInName(String),
}

/// Numeric slot of a cloud-phone container on its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerIndex(u32);

impl ContainerIndex {
    pub fn new(value: &str) -> Result<Self, ContainerIndexError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ContainerIndexError::Empty);
        }

        if !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(ContainerIndexError::NotNumeric(trimmed.to_string()));
        }

        trimmed
            .parse::<u32>()
            .map(Self)
            .map_err(|_| ContainerIndexError::NotNumeric(trimmed.to_string()))
    }

    /// Take the second `_`-delimited token of a name like `android_3`.
    pub fn from_name(name: &str) -> Result<Self, ContainerIndexError> {
        let token = name
            .trim_start_matches('/')
            .split('_')
            .nth(1)
            .ok_or_else(|| ContainerIndexError::NoIndexInName(name.to_string()))?;
        Self::new(token)
    }

    /// Resolve from `label` when the container carries it, else from its name.
    pub fn resolve(
        name: &str,
        labels: &HashMap<String, String>,
        label: &str,
    ) -> Result<Self, ContainerIndexError> {
        match labels.get(label) {
            Some(value) => Self::new(value),
            None => Self::from_name(name),
        }
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ContainerIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
