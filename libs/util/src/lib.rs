use std::path::{Path, PathBuf};

use anyhow::Context;
use toml::{map::Map, Value};
use tracing::debug;

pub fn workspace_dir() -> PathBuf {
    let output = std::process::Command::new(env!("CARGO"))
        .arg("locate-project")
        .arg("--workspace")
        .arg("--message-format=plain")
        .output()
        .unwrap()
        .stdout;
    let cargo_path = Path::new(std::str::from_utf8(&output).unwrap().trim());
    cargo_path.parent().unwrap().to_path_buf()
}

pub fn load_config(config_name: &str) -> anyhow::Result<Map<String, Value>> {
    let workspace_dir = workspace_dir();
    let config = std::fs::read_to_string(workspace_dir.join(config_name))?;

    let config = toml::from_str::<Map<String, Value>>(&config)?;

    Ok(config)
}

/// Loads a `.env` dotfile into the process environment when one exists.
/// Missing dotfiles are fine, the environment may already carry everything.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!(path = %path.display(), "loaded .env"),
        Err(_) => debug!("no .env file found, using process environment"),
    }
}

pub fn require_env(key: &str) -> anyhow::Result<String> {
    std::env::var(key)
        .with_context(|| format!("{} was not found in .env or environment", key))
}
