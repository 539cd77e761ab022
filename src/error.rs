use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ActionError {
    #[error("You must provide the action with both AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY environment variables in order to deploy")]
    MissingCredentials,

    #[error("You must provide AWS_REGION environment variable in order to deploy")]
    MissingRegion,

    #[error("You must provide amplify_command input parameter in order to deploy")]
    MissingCommand,

    #[error("You must provide amplify_env input parameter in order to deploy")]
    MissingEnvironment,

    #[error("amplify command {0} is invalid or not supported")]
    UnsupportedCommand(String),

    #[error("amplify_cli_version '{0}' is not a valid version, range or dist-tag")]
    InvalidCliVersion(String),

    #[error("unterminated quote in amplify_arguments: {0}")]
    UnterminatedQuote(String),

    #[error("project_dir {path:?} does not exist or is not a directory")]
    ProjectDirMissing { path: PathBuf },

    #[error("npm was not found on PATH; it is required to install amplify_cli_version")]
    NpmNotFound,

    #[error("failed to start {program:?}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` failed with {status}")]
    ToolFailed { command: String, status: String },

    #[error("{0} environment does not exist, consider using add_env command instead")]
    EnvironmentNotFound(String),

    #[error("ACCIDENTAL DELETION PROTECTION: You must unset delete_lock input parameter for delete to work")]
    DeleteLocked,

    #[error("ACCIDENTAL DELETION PROTECTION: delete command is unsupported for environments that contain prod/release/master in its name")]
    ProtectedEnvironment,
}
