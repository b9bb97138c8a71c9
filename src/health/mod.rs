// ABOUTME: Container health checks and recovery.
// ABOUTME: Classifies containers by boot completion and restarts the unhealthy ones.

mod checker;
mod recovery;

pub use checker::{
    BOOT_COMPLETED, BOOT_PROBE, CheckReport, Verdict, check_container, check_containers,
};
pub use recovery::{Outcome, RecoverReport, Restarter, recover_containers};
