use crate::config::Credentials;
use crate::project::{AmplifyEnvArg, ProvidersArg};
use crate::runner::{CommandRunner, Invocation, ToolOutput};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Text `amplify env get --name <env>` prints on stdout, with exit status 0, when the
/// environment is not part of the project (observed on @aws-amplify/cli 4.x through 12.x).
pub const ENV_NOT_FOUND_MARKER: &str = "No environment found";

/// True when `env get` output says the environment does not exist. This couples to the
/// CLI's human-readable text; there is no machine-readable query for it.
pub fn environment_missing(output: &ToolOutput) -> bool {
    output.stdout.contains(ENV_NOT_FOUND_MARKER)
}

/// Typed front for the subcommands the action drives. Every call runs in the project root.
pub struct AmplifyCli<'r> {
    runner: &'r dyn CommandRunner,
    program: PathBuf,
    cwd: PathBuf,
}

impl<'r> AmplifyCli<'r> {
    pub fn new(runner: &'r dyn CommandRunner, program: impl Into<PathBuf>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            program: program.into(),
            cwd: cwd.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn exec(&self, args: Vec<String>, stdin: Option<&str>) -> Result<ToolOutput> {
        self.runner.run(&Invocation {
            program: &self.program,
            args: &args,
            cwd: &self.cwd,
            stdin,
        })
    }

    pub fn version(&self) -> Result<ToolOutput> {
        self.exec(words(["--version"]), None)
    }

    pub fn push(&self, extra: &[String]) -> Result<ToolOutput> {
        let mut args = words(["push"]);
        args.extend_from_slice(extra);
        args.push("--yes".into());
        self.exec(args, None)
    }

    pub fn status(&self, extra: &[String]) -> Result<ToolOutput> {
        let mut args = words(["status"]);
        args.extend_from_slice(extra);
        self.exec(args, None)
    }

    pub fn env_get(&self, env_name: &str) -> Result<ToolOutput> {
        self.exec(words(["env", "get", "--name", env_name]), None)
    }

    pub fn env_pull(&self, extra: &[String]) -> Result<ToolOutput> {
        let mut args = words(["env", "pull", "--yes"]);
        args.extend_from_slice(extra);
        self.exec(args, None)
    }

    pub fn env_add(&self, env_name: &str, credentials: &Credentials, extra: &[String]) -> Result<ToolOutput> {
        let amplify = serde_json::to_string(&AmplifyEnvArg { env_name })?;
        let providers = serde_json::to_string(&ProvidersArg::project_level(credentials))?;
        let mut args = words(["env", "add"]);
        args.extend_from_slice(extra);
        args.extend(words(["--amplify", &amplify, "--providers", &providers, "--yes"]));
        self.exec(args, None)
    }

    /// `env remove` asks for confirmation; the answer is fed on stdin.
    pub fn env_remove(&self, env_name: &str, extra: &[String]) -> Result<ToolOutput> {
        let mut args = words(["env", "remove", env_name]);
        args.extend_from_slice(extra);
        self.exec(args, Some("Y\n"))
    }
}

fn words<const N: usize>(parts: [&str; N]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}
