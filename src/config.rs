use crate::error::{AgileOpsError, Result};
use crate::types::config::AgileOpsConfig;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;

pub const DEFAULT_CONFIG_FILE: &str = "agileops.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/agileops/config.toml";

/// Environment variables and the `[jira]` keys they override.
pub const ENV_OVERRIDES: [(&str, &str); 3] = [
    ("JIRA_HOST", "host"),
    ("JIRA_USER", "user"),
    ("JIRA_TOKEN", "token"),
];

/// Loads configuration from the global file, the explicit or working-directory
/// file, and finally the `JIRA_*` environment variables.
pub fn load_config(explicit: Option<&Path>) -> Result<AgileOpsConfig> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    let local = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(AgileOpsError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            path.to_path_buf()
        }
        None => PathBuf::from(DEFAULT_CONFIG_FILE),
    };
    load_config_with(global.as_deref(), &local, |key| std::env::var(key).ok())
}

pub(crate) fn load_config_with<F>(
    global_path: Option<&Path>,
    local_path: &Path,
    env: F,
) -> Result<AgileOpsConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut merged = Value::Table(Map::new());
    if let Some(path) = global_path {
        merge_file_if_exists(&mut merged, path)?;
    }
    merge_file_if_exists(&mut merged, local_path)?;
    merge_toml(&mut merged, env_overlay(env));

    merged
        .try_into()
        .map_err(|e: toml::de::Error| AgileOpsError::Config(e.to_string()))
}

fn env_overlay<F>(env: F) -> Value
where
    F: Fn(&str) -> Option<String>,
{
    let jira = ENV_OVERRIDES
        .iter()
        .filter_map(|(var, key)| {
            env(var)
                .filter(|value| !value.trim().is_empty())
                .map(|value| (key.to_string(), Value::String(value)))
        })
        .collect::<Map<_, _>>();

    let mut overlay = Map::new();
    if !jira.is_empty() {
        tracing::debug!(keys = jira.len(), "applying JIRA_* environment overrides");
        overlay.insert("jira".to_string(), Value::Table(jira));
    }
    Value::Table(overlay)
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    tracing::debug!(path = %path.display(), "reading config file");
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(())
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| AgileOpsError::Config(format!("{}: {}", path.display(), e)))
}

fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}
