use crate::amplify::AmplifyCli;
use crate::command_handlers::emit;
use crate::config::ActionConfig;
use anyhow::Result;

/// Serves both `push` and `publish`.
pub fn push(amplify: &AmplifyCli, cfg: &ActionConfig) -> Result<()> {
    let out = amplify.push(&cfg.arguments)?;
    emit("amplify push", &out);
    Ok(())
}

pub fn status(amplify: &AmplifyCli, cfg: &ActionConfig) -> Result<()> {
    let out = amplify.status(&cfg.arguments)?;
    emit("amplify status", &out);
    Ok(())
}
