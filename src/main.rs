mod amplify;
mod args;
mod cli;
mod command_handlers;
mod config;
mod error;
mod github;
mod installer;
mod project;
mod runner;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::command_handlers::dispatch::Dispatcher;
use crate::config::ActionConfig;
use crate::runner::ProcessRunner;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = run(Cli::parse()) {
        github::set_failed(&format!("{e:#}"));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let cfg = ActionConfig::resolve(cli, |key| std::env::var(key).ok())?;
    tracing::debug!(?cfg, "resolved inputs");
    Dispatcher::new(&ProcessRunner).run(&cfg)
}
