use crate::args::split_arguments;
use crate::cli::Cli;
use crate::error::ActionError;
use anyhow::{Context, Result};
use fs_err as fs;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const ACCESS_KEY_VAR: &str = "AWS_ACCESS_KEY_ID";
pub const SECRET_KEY_VAR: &str = "AWS_SECRET_ACCESS_KEY";
pub const REGION_VAR: &str = "AWS_REGION";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmplifyCommand {
    Push,
    Publish,
    Status,
    Configure,
    AddEnv,
    DeleteEnv,
}

impl AmplifyCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            AmplifyCommand::Push => "push",
            AmplifyCommand::Publish => "publish",
            AmplifyCommand::Status => "status",
            AmplifyCommand::Configure => "configure",
            AmplifyCommand::AddEnv => "add_env",
            AmplifyCommand::DeleteEnv => "delete_env",
        }
    }
}

impl FromStr for AmplifyCommand {
    type Err = ActionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "push" => Ok(AmplifyCommand::Push),
            "publish" => Ok(AmplifyCommand::Publish),
            "status" => Ok(AmplifyCommand::Status),
            "configure" => Ok(AmplifyCommand::Configure),
            "add_env" => Ok(AmplifyCommand::AddEnv),
            "delete_env" => Ok(AmplifyCommand::DeleteEnv),
            other => Err(ActionError::UnsupportedCommand(other.to_string())),
        }
    }
}

impl fmt::Display for AmplifyCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: String,
}

impl Credentials {
    /// Reads the three AWS variables through `lookup`. Blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> std::result::Result<Self, ActionError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let (Some(access_key_id), Some(secret_access_key)) = (get(ACCESS_KEY_VAR), get(SECRET_KEY_VAR)) else {
            return Err(ActionError::MissingCredentials);
        };
        let Some(region) = get(REGION_VAR) else {
            return Err(ActionError::MissingRegion);
        };
        Ok(Credentials {
            access_key_id,
            secret_access_key,
            region,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &"***")
            .field("secret_access_key", &"***")
            .field("region", &self.region)
            .finish()
    }
}

/// Optional TOML defaults, same keys as the action inputs.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileInputs {
    #[serde(default)]
    pub project_dir: Option<String>,
    #[serde(default)]
    pub amplify_command: Option<String>,
    #[serde(default)]
    pub amplify_env: Option<String>,
    #[serde(default)]
    pub delete_lock: Option<String>,
    #[serde(default)]
    pub amplify_cli_version: Option<String>,
    #[serde(default)]
    pub amplify_arguments: Option<String>,
    #[serde(default)]
    pub tool_home: Option<PathBuf>,
}

impl FileInputs {
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        toml::from_str(&data).with_context(|| format!("parsing {}", path.display()))
    }
}

#[derive(Debug, Clone)]
pub struct ActionConfig {
    pub project_dir: Option<PathBuf>,
    pub command: AmplifyCommand,
    pub env_name: String,
    pub delete_lock: Option<String>,
    pub cli_version: Option<String>,
    pub arguments: Vec<String>,
    pub tool_home: PathBuf,
    pub credentials: Credentials,
}

impl ActionConfig {
    /// Merge flags/env over file defaults and run the precondition checks in order:
    /// credentials, region, command, environment. Nothing is installed, written or
    /// spawned here.
    pub fn resolve<F>(cli: Cli, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credentials = Credentials::from_lookup(lookup)?;

        let file = match &cli.config {
            Some(path) => FileInputs::load(path)?,
            None => FileInputs::default(),
        };

        let Some(command) = input(cli.amplify_command, file.amplify_command) else {
            return Err(ActionError::MissingCommand.into());
        };
        let Some(env_name) = input(cli.amplify_env, file.amplify_env) else {
            return Err(ActionError::MissingEnvironment.into());
        };
        let command: AmplifyCommand = command.parse()?;

        let arguments = match input(cli.amplify_arguments, file.amplify_arguments) {
            Some(raw) => split_arguments(&raw)?,
            None => Vec::new(),
        };

        let tool_home = match cli.tool_home.or(file.tool_home) {
            Some(p) => p,
            None => default_tool_home()?,
        };

        Ok(ActionConfig {
            project_dir: input(cli.project_dir, file.project_dir).map(PathBuf::from),
            command,
            env_name,
            delete_lock: input(cli.delete_lock, file.delete_lock),
            cli_version: input(cli.amplify_cli_version, file.amplify_cli_version),
            arguments,
            tool_home,
            credentials,
        })
    }

    pub fn delete_locked(&self) -> bool {
        self.delete_lock.as_deref() == Some("true")
    }
}

// Trimmed, empty treated as unset.
fn input(primary: Option<String>, fallback: Option<String>) -> Option<String> {
    primary
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .or_else(|| fallback.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()))
}

fn default_tool_home() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("locating the running executable")?;
    Ok(exe
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k: &str| map.get(k).cloned()
    }

    fn full_env() -> impl Fn(&str) -> Option<String> {
        env(&[(ACCESS_KEY_VAR, "AKIA"), (SECRET_KEY_VAR, "s3cr3t"), (REGION_VAR, "us-east-1")])
    }

    fn cli(command: Option<&str>, env_name: Option<&str>) -> Cli {
        Cli {
            amplify_command: command.map(String::from),
            amplify_env: env_name.map(String::from),
            tool_home: Some(PathBuf::from("/opt/action")),
            ..Default::default()
        }
    }

    fn err_of(res: Result<ActionConfig>) -> ActionError {
        res.unwrap_err().downcast::<ActionError>().unwrap()
    }

    #[test]
    fn missing_secret_key_reports_credentials() {
        let lookup = env(&[(ACCESS_KEY_VAR, "AKIA"), (REGION_VAR, "us-east-1")]);
        let err = err_of(ActionConfig::resolve(cli(Some("status"), Some("dev")), lookup));
        assert!(matches!(err, ActionError::MissingCredentials));
    }

    #[test]
    fn credentials_checked_before_command() {
        let err = err_of(ActionConfig::resolve(cli(None, None), env(&[])));
        assert!(matches!(err, ActionError::MissingCredentials));
    }

    #[test]
    fn credentials_checked_before_config_file() {
        let mut c = cli(Some("status"), Some("dev"));
        c.config = Some(PathBuf::from("/nonexistent/amplify-action.toml"));
        let err = err_of(ActionConfig::resolve(c, env(&[(REGION_VAR, "us-east-1")])));
        assert!(matches!(err, ActionError::MissingCredentials));

        let mut c = cli(Some("status"), Some("dev"));
        c.config = Some(PathBuf::from("/nonexistent/amplify-action.toml"));
        let lookup = env(&[(ACCESS_KEY_VAR, "AKIA"), (SECRET_KEY_VAR, "x")]);
        let err = err_of(ActionConfig::resolve(c, lookup));
        assert!(matches!(err, ActionError::MissingRegion));
    }

    #[test]
    fn blank_region_is_missing() {
        let lookup = env(&[(ACCESS_KEY_VAR, "AKIA"), (SECRET_KEY_VAR, "x"), (REGION_VAR, "  ")]);
        let err = err_of(ActionConfig::resolve(cli(Some("status"), Some("dev")), lookup));
        assert!(matches!(err, ActionError::MissingRegion));
    }

    #[test]
    fn command_then_env_required() {
        let err = err_of(ActionConfig::resolve(cli(None, Some("dev")), full_env()));
        assert!(matches!(err, ActionError::MissingCommand));
        let err = err_of(ActionConfig::resolve(cli(Some("push"), Some("")), full_env()));
        assert!(matches!(err, ActionError::MissingEnvironment));
    }

    #[test]
    fn unknown_command_named_in_error() {
        let err = err_of(ActionConfig::resolve(cli(Some("frobnicate"), Some("dev")), full_env()));
        assert_eq!(err.to_string(), "amplify command frobnicate is invalid or not supported");
    }

    #[test]
    fn inputs_are_trimmed_and_arguments_split() {
        let mut c = cli(Some(" add_env "), Some("dev\n"));
        c.amplify_arguments = Some("--restore 'a b'".into());
        c.delete_lock = Some("true".into());
        let cfg = ActionConfig::resolve(c, full_env()).unwrap();
        assert_eq!(cfg.command, AmplifyCommand::AddEnv);
        assert_eq!(cfg.env_name, "dev");
        assert_eq!(cfg.arguments, vec!["--restore".to_string(), "a b".to_string()]);
        assert!(cfg.delete_locked());
        assert_eq!(cfg.credentials.region, "us-east-1");
    }

    #[test]
    fn delete_lock_only_literal_true() {
        let mut c = cli(Some("delete_env"), Some("dev"));
        c.delete_lock = Some("TRUE".into());
        let cfg = ActionConfig::resolve(c, full_env()).unwrap();
        assert!(!cfg.delete_locked());
    }

    #[test]
    fn file_defaults_fill_gaps_and_flags_win() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("amplify-action.toml");
        std::fs::write(
            &path,
            "amplify_command = \"push\"\namplify_env = \"staging\"\nproject_dir = \"app\"\n",
        )
        .unwrap();
        let mut c = cli(None, Some("dev"));
        c.config = Some(path);
        let cfg = ActionConfig::resolve(c, full_env()).unwrap();
        assert_eq!(cfg.command, AmplifyCommand::Push);
        assert_eq!(cfg.env_name, "dev");
        assert_eq!(cfg.project_dir, Some(PathBuf::from("app")));
    }

    #[test]
    fn unknown_file_keys_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "amplify_comand = \"push\"\n").unwrap();
        let mut c = cli(None, None);
        c.config = Some(path);
        assert!(ActionConfig::resolve(c, full_env()).is_err());
    }

    #[test]
    fn debug_hides_secrets() {
        let creds = Credentials::from_lookup(full_env()).unwrap();
        let shown = format!("{creds:?}");
        assert!(!shown.contains("s3cr3t"));
        assert!(shown.contains("us-east-1"));
    }
}
