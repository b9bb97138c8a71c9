// ABOUTME: Library root for kbox-maintainer - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod collect;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod health;
pub mod host;
pub mod output;
pub mod process;
pub mod runtime;
pub mod targets;
pub mod types;
