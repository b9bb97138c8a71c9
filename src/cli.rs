// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "kbox-maintainer")]
#[command(about = "Health checks, recovery and diagnostics collection for Kbox cloud-phone hosts")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print reports and errors only
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check host modules, emulation and container boot state
    Check {
        /// Container names or IDs (all containers when omitted)
        containers: Vec<String>,
    },

    /// Recover the host, then restart unhealthy containers
    Recover {
        /// Container names or IDs (all containers when omitted)
        containers: Vec<String>,
    },

    /// Collect host and guest logs into an archive
    Log {
        /// Container names or IDs (all containers when omitted)
        containers: Vec<String>,
    },

    /// Collect host and guest resource usage into an archive
    Resource {
        /// Container names or IDs (all containers when omitted)
        containers: Vec<String>,
    },
}
