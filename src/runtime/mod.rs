// ABOUTME: Container runtime access for Kbox maintenance.
// ABOUTME: Detects the local Docker socket and exposes the bollard-backed runtime.

mod bollard;
mod detection;
mod error;
#[cfg(test)]
pub(crate) mod fake;
pub mod traits;
mod types;

pub use self::bollard::BollardRuntime;
pub use detection::{DetectionError, detect_local};
pub use error::{RuntimeError, RuntimeErrorKind};
pub use traits::*;
pub use types::{DetectedRuntime, RuntimeConfig, SocketSource};
