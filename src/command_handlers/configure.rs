use crate::amplify::{environment_missing, AmplifyCli};
use crate::command_handlers::emit;
use crate::config::ActionConfig;
use crate::error::ActionError;
use crate::project::Project;
use anyhow::Result;
use tracing::info;

/// Point the checkout at an existing environment: write credentials, bind them to the
/// environment, confirm it exists, pull it, then show status.
pub fn configure(amplify: &AmplifyCli, project: &Project, cfg: &ActionConfig) -> Result<()> {
    let provider_config = project.write_provider_config(&cfg.credentials)?;
    project.write_local_aws_info(&cfg.env_name, &provider_config)?;

    let found = amplify.env_get(&cfg.env_name)?;
    if environment_missing(&found) {
        return Err(ActionError::EnvironmentNotFound(cfg.env_name.clone()).into());
    }
    info!("found existing environment {}", cfg.env_name);

    let pulled = amplify.env_pull(&cfg.arguments)?;
    emit("amplify env pull", &pulled);

    let status = amplify.status(&[])?;
    emit("amplify status", &status);
    Ok(())
}
