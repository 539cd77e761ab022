//! Files the Amplify CLI reads from a project checkout, modelled as typed structs so
//! credentials and environment names are always JSON-escaped.

use crate::config::Credentials;
use anyhow::{Context, Result};
use fs_err as fs;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const PROVIDER_CONFIG_FILE: &str = "aws_config_file_path.json";
pub const LOCAL_AWS_INFO: &str = "amplify/.config/local-aws-info.json";
pub const LOCAL_ENV_INFO: &str = "amplify/.config/local-env-info.json";
pub const DEFAULT_EDITOR: &str = "code";
/// Selected before `env remove` so the CLI is not asked to delete the current env.
pub const PLACEHOLDER_ENV: &str = "dummyenvfordeletecurrentowork";

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig<'a> {
    pub access_key_id: &'a str,
    pub secret_access_key: &'a str,
    pub region: &'a str,
}

impl<'a> From<&'a Credentials> for ProviderConfig<'a> {
    fn from(c: &'a Credentials) -> Self {
        ProviderConfig {
            access_key_id: &c.access_key_id,
            secret_access_key: &c.secret_access_key,
            region: &c.region,
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EnvProviderInfo {
    pub config_level: &'static str,
    pub use_profile: bool,
    pub aws_config_file_path: PathBuf,
}

/// `local-aws-info.json`: environment name -> how to authenticate it.
pub type LocalAwsInfo = BTreeMap<String, EnvProviderInfo>;

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LocalEnvInfo {
    pub project_path: PathBuf,
    pub default_editor: &'static str,
    pub env_name: String,
}

/// `--amplify` payload of `amplify env add`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmplifyEnvArg<'a> {
    pub env_name: &'a str,
}

/// `--providers` payload of `amplify env add`.
#[derive(Debug, Serialize)]
pub struct ProvidersArg<'a> {
    pub awscloudformation: CloudFormationProvider<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudFormationProvider<'a> {
    pub config_level: &'static str,
    pub use_profile: bool,
    #[serde(flatten)]
    pub credentials: ProviderConfig<'a>,
}

impl<'a> ProvidersArg<'a> {
    pub fn project_level(credentials: &'a Credentials) -> Self {
        ProvidersArg {
            awscloudformation: CloudFormationProvider {
                config_level: "project",
                use_profile: false,
                credentials: credentials.into(),
            },
        }
    }
}

/// All project files are addressed relative to one base directory.
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
}

impl Project {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    /// Writes the credential file and returns its absolute path.
    pub fn write_provider_config(&self, credentials: &Credentials) -> Result<PathBuf> {
        let path = self.path(PROVIDER_CONFIG_FILE);
        write_json(&path, &ProviderConfig::from(credentials))?;
        Ok(path)
    }

    /// Points `env_name` at the credential file written by [`Project::write_provider_config`].
    pub fn write_local_aws_info(&self, env_name: &str, provider_config: &Path) -> Result<()> {
        let mut info = LocalAwsInfo::new();
        info.insert(
            env_name.to_string(),
            EnvProviderInfo {
                config_level: "project",
                use_profile: false,
                aws_config_file_path: provider_config.to_path_buf(),
            },
        );
        write_json(&self.path(LOCAL_AWS_INFO), &info)
    }

    pub fn write_local_env_info(&self, env_name: &str) -> Result<()> {
        let info = LocalEnvInfo {
            project_path: self.root.clone(),
            default_editor: DEFAULT_EDITOR,
            env_name: env_name.to_string(),
        };
        write_json(&self.path(LOCAL_ENV_INFO), &info)
    }
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let body = serde_json::to_string_pretty(value)?;
    fs::write(path, body).with_context(|| format!("writing {}", path.display()))?;
    tracing::debug!("wrote {}", path.display());
    Ok(())
}
