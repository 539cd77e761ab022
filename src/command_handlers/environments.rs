use crate::amplify::AmplifyCli;
use crate::command_handlers::emit;
use crate::config::ActionConfig;
use crate::error::ActionError;
use crate::project::{Project, PLACEHOLDER_ENV};
use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;

// Case-sensitive substring match.
static PROTECTED_ENV: Lazy<Regex> = Lazy::new(|| Regex::new("prod|release|master").unwrap());

pub fn add_env(amplify: &AmplifyCli, cfg: &ActionConfig) -> Result<()> {
    let out = amplify.env_add(&cfg.env_name, &cfg.credentials, &cfg.arguments)?;
    emit("amplify env add", &out);

    let status = amplify.status(&[])?;
    emit("amplify status", &status);
    Ok(())
}

/// Both guards run before anything is written or spawned.
pub fn check_delete_allowed(cfg: &ActionConfig) -> Result<(), ActionError> {
    if cfg.delete_locked() {
        return Err(ActionError::DeleteLocked);
    }
    if PROTECTED_ENV.is_match(&cfg.env_name) {
        tracing::warn!("refusing to delete protected environment {}", cfg.env_name);
        return Err(ActionError::ProtectedEnvironment);
    }
    Ok(())
}

pub fn delete_env(amplify: &AmplifyCli, project: &Project, cfg: &ActionConfig) -> Result<()> {
    check_delete_allowed(cfg)?;

    // The CLI refuses to remove the checked-out environment, so switch to a placeholder.
    project.write_local_env_info(PLACEHOLDER_ENV)?;
    let out = amplify.env_remove(&cfg.env_name, &cfg.arguments)?;
    emit("amplify env remove", &out);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command_handlers::test_support::config;
    use crate::config::AmplifyCommand;
    use std::path::Path;

    fn cfg(env_name: &str, lock: Option<&str>) -> ActionConfig {
        let dir = tempfile::tempdir().unwrap();
        let mut c = config(AmplifyCommand::DeleteEnv, env_name, Path::new("."), dir.path());
        c.delete_lock = lock.map(String::from);
        c
    }

    #[test]
    fn lock_blocks_any_env() {
        for env_name in ["dev", "feature-x", "prod"] {
            assert!(matches!(
                check_delete_allowed(&cfg(env_name, Some("true"))),
                Err(ActionError::DeleteLocked)
            ));
        }
    }

    #[test]
    fn protected_names_blocked_without_lock() {
        for env_name in ["prod-2", "my-release", "master", "preprod", "releases"] {
            assert!(
                matches!(
                    check_delete_allowed(&cfg(env_name, None)),
                    Err(ActionError::ProtectedEnvironment)
                ),
                "{env_name} should be protected"
            );
        }
    }

    #[test]
    fn protected_message_matches_action_wording() {
        let err = check_delete_allowed(&cfg("prod", None)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "ACCIDENTAL DELETION PROTECTION: delete command is unsupported for environments that contain prod/release/master in its name"
        );
    }

    #[test]
    fn ordinary_names_allowed() {
        for env_name in ["dev", "feature1", "Prod", "MASTER", "staging"] {
            assert!(check_delete_allowed(&cfg(env_name, Some("false"))).is_ok(), "{env_name}");
        }
    }
}
