use clap::Parser;
use std::path::PathBuf;

/// Every input can come from a flag or from the variable GitHub Actions exports for it
/// (`INPUT_<NAME>`), so the binary runs the same as an action step or by hand.
#[derive(Parser, Debug, Default)]
#[command(
    version,
    name = "amplify-action",
    about = "Drive the Amplify CLI from CI: push, status, configure, add_env, delete_env"
)]
pub struct Cli {
    /// Project subdirectory holding the amplify/ folder (relative to the working directory)
    #[arg(long, env = "INPUT_PROJECT_DIR")]
    pub project_dir: Option<String>,

    /// Operation: push | publish | status | configure | add_env | delete_env
    #[arg(long, env = "INPUT_AMPLIFY_COMMAND")]
    pub amplify_command: Option<String>,

    /// Target Amplify environment name
    #[arg(long, env = "INPUT_AMPLIFY_ENV")]
    pub amplify_env: Option<String>,

    /// Set to "true" to refuse delete_env
    #[arg(long, env = "INPUT_DELETE_LOCK")]
    pub delete_lock: Option<String>,

    /// Install this @aws-amplify/cli version (or range / dist-tag) before running
    #[arg(long, env = "INPUT_AMPLIFY_CLI_VERSION")]
    pub amplify_cli_version: Option<String>,

    /// Extra arguments appended to the amplify invocation
    #[arg(long, env = "INPUT_AMPLIFY_ARGUMENTS", allow_hyphen_values = true)]
    pub amplify_arguments: Option<String>,

    /// Directory that receives node_modules/ for a pinned CLI (defaults to the executable's directory)
    #[arg(long, env = "AMPLIFY_ACTION_HOME")]
    pub tool_home: Option<PathBuf>,

    /// TOML file providing defaults for any of the inputs above
    #[arg(short, long, env = "AMPLIFY_ACTION_CONFIG")]
    pub config: Option<PathBuf>,
}
