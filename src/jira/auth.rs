use std::process::Command;
use std::sync::Arc;

use anyhow::{Context, Result, bail};

use crate::config::types::JiraConfig;

/// How an outbound request authenticates.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Jira Cloud: account email plus API token, sent as HTTP Basic.
    Basic { username: String, token: String },
    /// Jira Data Center personal access token.
    Bearer(String),
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("token", &"<redacted>")
                .finish(),
            Self::Bearer(_) => f.write_str("Bearer(<redacted>)"),
        }
    }
}

/// Source of credentials. [`JiraClient`](super::JiraClient) asks once and
/// asks again only after Jira rejects the cached credentials.
pub trait CredentialProvider: Send + Sync {
    fn credentials(&self) -> Result<Credentials>;
}

/// Fixed credentials supplied by the embedding program.
pub struct StaticCredentials(pub Credentials);

impl CredentialProvider for StaticCredentials {
    fn credentials(&self) -> Result<Credentials> {
        Ok(self.0.clone())
    }
}

/// Reads the token from `JIRA_API_TOKEN` at request time.
///
/// With a username this yields Basic credentials; without one the token is
/// treated as a personal access token.
pub struct EnvCredentials {
    pub username: Option<String>,
}

impl CredentialProvider for EnvCredentials {
    fn credentials(&self) -> Result<Credentials> {
        let token = match std::env::var("JIRA_API_TOKEN") {
            Ok(token) if !token.is_empty() => token,
            _ => bail!(
                "no Jira token found. Set JIRA_API_TOKEN or configure `jira.token_command`."
            ),
        };
        Ok(match &self.username {
            Some(username) => Credentials::Basic {
                username: username.clone(),
                token,
            },
            None => Credentials::Bearer(token),
        })
    }
}

/// Runs a shell command (e.g. `pass show jira/token`) and uses its trimmed
/// stdout as the token.
pub struct CommandCredentials {
    pub username: Option<String>,
    pub command: String,
}

impl CredentialProvider for CommandCredentials {
    fn credentials(&self) -> Result<Credentials> {
        let token = token_from_command(&self.command)?;
        Ok(match &self.username {
            Some(username) => Credentials::Basic {
                username: username.clone(),
                token,
            },
            None => Credentials::Bearer(token),
        })
    }
}

/// Pick the credential provider for a Jira config.
///
/// Priority:
/// 1. `jira.token_command`
/// 2. `JIRA_API_TOKEN` environment variable
pub fn provider_for(config: &JiraConfig) -> Arc<dyn CredentialProvider> {
    let username = config.username.clone().filter(|u| !u.is_empty());
    match &config.token_command {
        Some(command) if !command.trim().is_empty() => Arc::new(CommandCredentials {
            username,
            command: command.clone(),
        }),
        _ => Arc::new(EnvCredentials { username }),
    }
}

fn token_from_command(command: &str) -> Result<String> {
    let (shell, flag) = if cfg!(windows) { ("cmd", "/C") } else { ("sh", "-c") };
    let output = Command::new(shell)
        .args([flag, command])
        .output()
        .with_context(|| format!("failed to run token command `{command}`"))?;

    if !output.status.success() {
        bail!("token command `{command}` exited with {}", output.status);
    }

    let token = String::from_utf8(output.stdout)
        .context("token command produced non-UTF-8 output")?
        .trim()
        .to_owned();

    if token.is_empty() {
        bail!("token command `{command}` returned an empty string");
    }

    Ok(token)
}
