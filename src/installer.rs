use crate::error::ActionError;
use crate::runner::{CommandRunner, Invocation, ToolOutput};
use anyhow::{Context, Result};
use fs_err as fs;
use indicatif::{ProgressBar, ProgressStyle};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CLI_PACKAGE: &str = "@aws-amplify/cli";
pub const CLI_BINARY: &str = "amplify";

static DIST_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9._-]*$").unwrap());

/// Accepts what npm would accept after `@aws-amplify/cli@`: a dist-tag, or a range in
/// npm syntax (`||` alternatives, `A - B` hyphen ranges, space-separated comparators).
/// Anything else is rejected before npm ever sees it.
pub fn validate_version_spec(spec: &str) -> Result<(), ActionError> {
    let s = spec.trim();
    if DIST_TAG.is_match(s) || (!s.is_empty() && s.split("||").all(valid_range_clause)) {
        Ok(())
    } else {
        Err(ActionError::InvalidCliVersion(spec.to_string()))
    }
}

fn valid_range_clause(clause: &str) -> bool {
    let clause = clause.trim();
    if clause.is_empty() {
        return false;
    }
    if let Some((low, high)) = clause.split_once(" - ") {
        return valid_partial(low.trim()) && valid_partial(high.trim());
    }
    clause.split_whitespace().all(valid_comparator)
}

fn valid_comparator(c: &str) -> bool {
    semver::Version::parse(c.trim_start_matches('v')).is_ok() || semver::VersionReq::parse(c).is_ok()
}

// Hyphen-range bounds are bare versions, possibly partial (`11`, `11.2`, `11.x`).
fn valid_partial(bound: &str) -> bool {
    !bound.is_empty()
        && !bound.starts_with(['^', '~', '<', '>', '='])
        && valid_comparator(bound)
}

pub fn locate_npm() -> Result<PathBuf, ActionError> {
    which::which("npm").map_err(|_| ActionError::NpmNotFound)
}

/// `npm install --prefix <home> @aws-amplify/cli@<version>`, leaving the binary under
/// `<home>/node_modules/.bin`.
pub fn install_cli(runner: &dyn CommandRunner, npm: &Path, tool_home: &Path, version: &str) -> Result<ToolOutput> {
    validate_version_spec(version)?;
    fs::create_dir_all(tool_home)?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    pb.set_message(format!("Installing {CLI_PACKAGE}@{version}"));
    pb.enable_steady_tick(Duration::from_millis(120));

    let args = vec![
        "install".to_string(),
        "--prefix".to_string(),
        tool_home.display().to_string(),
        "--no-audit".to_string(),
        "--no-fund".to_string(),
        format!("{CLI_PACKAGE}@{version}"),
    ];
    let res = runner
        .run(&Invocation {
            program: npm,
            args: &args,
            cwd: tool_home,
            stdin: None,
        })
        .with_context(|| format!("installing {CLI_PACKAGE}@{version}"));

    match &res {
        Ok(_) => pb.finish_with_message(format!("Installed {CLI_PACKAGE}@{version}")),
        Err(e) => pb.finish_with_message(format!("FAILED {CLI_PACKAGE}@{version}: {e}")),
    }
    res
}

pub fn local_tool_path(tool_home: &Path) -> PathBuf {
    tool_home.join("node_modules").join(".bin").join(CLI_BINARY)
}

/// The copy under `tool_home` wins. Without a pinned version a global `amplify` on PATH
/// is accepted when no local copy exists; with one, only the local copy is valid.
pub fn resolve_tool_path(tool_home: &Path, pinned: bool) -> PathBuf {
    let local = local_tool_path(tool_home);
    if pinned || local.exists() {
        return local;
    }
    match which::which(CLI_BINARY) {
        Ok(global) => {
            tracing::info!("no local {CLI_BINARY} under {}, using {}", tool_home.display(), global.display());
            global
        }
        Err(_) => local,
    }
}
