use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::types::AppConfig;

/// Discover and load the app config.
///
/// Priority:
/// 1. `--config` flag (explicit path)
/// 2. `.jira-board.toml` in the current Git repository root
/// 3. `$JIRA_BOARD_CONFIG` environment variable
/// 4. `$XDG_CONFIG_HOME/jira-board/config.toml`
/// 5. `~/.config/jira-board/config.toml`
///
/// If both a global and a repo-local config exist, repo-local sections replace
/// their global counterparts (`[jira]`, `[defaults]` and `[theme]` are taken
/// from the local config; `[[grids]]` are replaced if the local list is
/// non-empty).
///
/// `JIRA_BASE_URL`, `JIRA_USERNAME`, `JIRA_DEFAULT_JQL` and
/// `JIRA_MAX_RESULTS` override whatever the files say.
pub fn load_config(explicit_path: Option<&Path>) -> Result<AppConfig> {
    let mut config = if let Some(path) = explicit_path {
        read_config(path)?
    } else {
        match (find_global_config(), find_repo_local_config()) {
            (Some(global), Some(local)) => merge_configs(read_config(&global)?, read_config(&local)?),
            (Some(path), None) | (None, Some(path)) => read_config(&path)?,
            (None, None) => AppConfig::default(),
        }
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;
    Ok(config)
}

fn read_config(path: &Path) -> Result<AppConfig> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("parsing TOML from {}", path.display()))
}

/// Apply environment overrides using `lookup` to read variables.
pub fn apply_env_overrides(
    config: &mut AppConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

    if let Some(url) = get("JIRA_BASE_URL") {
        config.jira.base_url = url;
    }
    if let Some(user) = get("JIRA_USERNAME") {
        config.jira.username = Some(user);
    }
    if let Some(jql) = get("JIRA_DEFAULT_JQL") {
        config.defaults.jql = jql;
    }
    if let Some(n) = get("JIRA_MAX_RESULTS") {
        config.defaults.max_results = n
            .parse()
            .with_context(|| format!("JIRA_MAX_RESULTS must be a positive integer, got {n:?}"))?;
    }
    Ok(())
}

/// Merge repo-local config on top of global config.
fn merge_configs(global: AppConfig, local: AppConfig) -> AppConfig {
    AppConfig {
        grids: if local.grids.is_empty() {
            global.grids
        } else {
            local.grids
        },
        jira: local.jira,
        defaults: local.defaults,
        theme: local.theme,
    }
}

fn find_repo_local_config() -> Option<PathBuf> {
    // Walk up from CWD looking for `.jira-board.toml` next to a `.git` directory.
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let candidate = dir.join(".jira-board.toml");
        if candidate.is_file() {
            return Some(candidate);
        }
        if dir.join(".git").exists() {
            // Reached git root without finding config.
            return None;
        }
        if !dir.pop() {
            return None;
        }
    }
}

fn find_global_config() -> Option<PathBuf> {
    // $JIRA_BOARD_CONFIG
    if let Ok(path) = std::env::var("JIRA_BOARD_CONFIG") {
        let p = PathBuf::from(&path);
        if p.is_file() {
            return Some(p);
        }
    }

    // $XDG_CONFIG_HOME/jira-board/config.toml
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        let p = PathBuf::from(xdg).join("jira-board/config.toml");
        if p.is_file() {
            return Some(p);
        }
    }

    // ~/.config/jira-board/config.toml
    if let Some(home) = std::env::var("HOME").ok().map(PathBuf::from) {
        let p = home.join(".config/jira-board/config.toml");
        if p.is_file() {
            return Some(p);
        }
    }

    None
}
