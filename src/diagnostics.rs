// ABOUTME: Diagnostics accumulator for non-fatal warnings during collection.
// ABOUTME: Collects warnings that shouldn't fail a container but should be shown to users.

/// Collects non-fatal warnings during log and resource collection.
#[derive(Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record a warning, auto-logging it via tracing.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!("{}", warning.message);
        self.warnings.push(warning);
    }

    /// Get all collected warnings.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }
}

/// A non-fatal warning collected during a run.
#[derive(Debug, Clone)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    /// Create a bind-mount mirror warning.
    pub fn bind_mount_copy(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::BindMountCopy,
            message: message.into(),
        }
    }

    /// Create a working directory cleanup warning.
    pub fn workdir_cleanup(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::WorkdirCleanup,
            message: message.into(),
        }
    }
}

/// Categories of warnings that can occur during collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// Failed to mirror a container's bind-mounted data directory.
    BindMountCopy,
    /// Failed to remove the working directory (it may remain on disk).
    WorkdirCleanup,
}
