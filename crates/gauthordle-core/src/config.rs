//! Loading [`FilterConfig`] from YAML.

use std::path::{Path, PathBuf};

use crate::domain::{FilterConfig, Result};

/// File name looked up in the user's home directory.
pub const CONFIG_FILE_NAME: &str = ".gauthordle.yaml";

/// `~/.gauthordle.yaml`, when a home directory can be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
}

/// Read the config at `path`. A missing file yields the empty config.
pub fn load_config(path: &Path) -> Result<FilterConfig> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file; using defaults");
            return Ok(FilterConfig::default());
        }
        Err(e) => return Err(e.into()),
    };

    parse_config(&contents)
}

/// Parse YAML config text. Blank text is the empty config.
pub fn parse_config(contents: &str) -> Result<FilterConfig> {
    if contents.trim().is_empty() {
        return Ok(FilterConfig::default());
    }
    Ok(serde_yaml::from_str(contents)?)
}

/// Load from `path` if given, otherwise from the default location.
pub fn load_config_or_default(path: Option<&Path>) -> Result<FilterConfig> {
    match path.map(Path::to_path_buf).or_else(default_config_path) {
        Some(path) => load_config(&path),
        None => Ok(FilterConfig::default()),
    }
}
