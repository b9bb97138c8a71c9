// ABOUTME: Entry point for the kbox-maintainer CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use kbox_maintainer::config::Config;
use kbox_maintainer::error::{Error, Result};
use kbox_maintainer::output::{Output, OutputMode};
use kbox_maintainer::runtime::RuntimeErrorKind;
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise the verbose flag picks the level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    if !cfg!(target_os = "linux") {
        tracing::error!("This tool only supports the linux platform");
        return;
    }

    let mode = if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };

    if let Err(e) = run(cli.command, Output::new(mode)).await {
        Output::new(mode).error(&e.to_string());
        if let Error::Runtime(runtime_err) = &e
            && let Some(hint) = runtime_hint(runtime_err.kind())
        {
            eprintln!("Hint: {hint}");
        }
        std::process::exit(1);
    }
}

fn runtime_hint(kind: RuntimeErrorKind) -> Option<&'static str> {
    match kind {
        RuntimeErrorKind::NoRuntimeFound => {
            Some("is the Docker daemon running? Set runtime.socket in kbox-maintainer.yml if it listens elsewhere")
        }
        RuntimeErrorKind::UnsupportedHost => Some("only unix:// DOCKER_HOST values are supported"),
        RuntimeErrorKind::ConnectionFailed => Some("check that this user may access the Docker socket"),
        RuntimeErrorKind::RuntimeOperation => None,
    }
}

async fn run(command: Commands, output: Output) -> Result<()> {
    let cwd = env::current_dir()?;
    let config = Config::discover(&cwd)?;

    match command {
        Commands::Check { containers } => commands::check(config, containers, output).await,
        Commands::Recover { containers } => {
            commands::recover(config, containers, &cwd, output).await
        }
        Commands::Log { containers } => commands::log(config, containers, &cwd, output).await,
        Commands::Resource { containers } => {
            commands::resource(config, containers, &cwd, output).await
        }
    }
}
