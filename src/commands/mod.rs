// ABOUTME: Command module aggregator for the kbox-maintainer CLI.
// ABOUTME: Re-exports check, recover, log and resource command handlers.

mod check;
mod collect;
mod recover;
mod runtime_connection;

pub use check::check;
pub use collect::{log, resource};
pub use recover::recover;
