//! Config file location.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

/// Application directory name under the config root.
const APP_DIR: &str = "football-lineup";

/// Config file name.
const CONFIG_FILE: &str = "config.toml";

/// Resolves the config file path.
///
/// Lookup order:
/// 1. `{dir}/config.toml` when `--dir` is given
/// 2. `$XDG_CONFIG_HOME/football-lineup/config.toml`
/// 3. `$HOME/.config/football-lineup/config.toml`
///
/// # Errors
///
/// Returns an error if neither `XDG_CONFIG_HOME` nor `HOME` is usable
/// (when `dir` is `None`).
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    config_path_from(
        dir.map(PathBuf::as_path),
        std::env::var("XDG_CONFIG_HOME").ok(),
        std::env::var("HOME").ok(),
    )
}

fn config_path_from(
    dir: Option<&Path>,
    xdg_config_home: Option<String>,
    home: Option<String>,
) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join(CONFIG_FILE));
    }
    if let Some(xdg) = xdg_config_home.filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(xdg).join(APP_DIR).join(CONFIG_FILE));
    }
    let Some(home) = home.filter(|v| !v.is_empty()) else {
        bail!("HOME environment variable is not set");
    };
    Ok(PathBuf::from(home)
        .join(".config")
        .join(APP_DIR)
        .join(CONFIG_FILE))
}
