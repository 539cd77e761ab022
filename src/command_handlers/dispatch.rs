use crate::amplify::AmplifyCli;
use crate::command_handlers::{configure, deploy, environments};
use crate::config::{ActionConfig, AmplifyCommand};
use crate::error::ActionError;
use crate::installer;
use crate::project::Project;
use crate::runner::CommandRunner;
use anyhow::{Context, Result};
use fs_err as fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Runs one validated invocation: optional CLI install, tool and project resolution, a
/// version probe, then exactly one operation. The first error ends the run.
pub struct Dispatcher<'r> {
    runner: &'r dyn CommandRunner,
    locate_npm: fn() -> Result<PathBuf, ActionError>,
}

impl<'r> Dispatcher<'r> {
    pub fn new(runner: &'r dyn CommandRunner) -> Self {
        Self {
            runner,
            locate_npm: installer::locate_npm,
        }
    }

    #[cfg(test)]
    fn with_npm_locator(mut self, locate: fn() -> Result<PathBuf, ActionError>) -> Self {
        self.locate_npm = locate;
        self
    }

    pub fn run(&self, cfg: &ActionConfig) -> Result<()> {
        if let Some(version) = &cfg.cli_version {
            let npm = (self.locate_npm)()?;
            installer::install_cli(self.runner, &npm, &cfg.tool_home, version)?;
        }
        let program = installer::resolve_tool_path(&cfg.tool_home, cfg.cli_version.is_some());

        let project = Project::new(resolve_project_dir(cfg.project_dir.as_deref())?);
        info!("project root {}", project.root().display());

        let amplify = AmplifyCli::new(self.runner, program, project.root());
        let version = amplify
            .version()
            .with_context(|| format!("querying {} --version", amplify.program().display()))?;
        info!("amplify version {}", version.stdout.trim());

        info!("running {} for environment {}", cfg.command, cfg.env_name);
        match cfg.command {
            AmplifyCommand::Push | AmplifyCommand::Publish => deploy::push(&amplify, cfg),
            AmplifyCommand::Status => deploy::status(&amplify, cfg),
            AmplifyCommand::Configure => configure::configure(&amplify, &project, cfg),
            AmplifyCommand::AddEnv => environments::add_env(&amplify, cfg),
            AmplifyCommand::DeleteEnv => environments::delete_env(&amplify, &project, cfg),
        }
    }
}

/// Absolute base path for every file and subprocess; relative `project_dir` values are
/// taken from the process working directory, which is never changed.
pub fn resolve_project_dir(project_dir: Option<&Path>) -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("reading the working directory")?;
    let Some(dir) = project_dir else { return Ok(cwd) };
    let joined = cwd.join(dir);
    if !joined.is_dir() {
        return Err(ActionError::ProjectDirMissing { path: joined }.into());
    }
    Ok(fs::canonicalize(&joined)?)
}
