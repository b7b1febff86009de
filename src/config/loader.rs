use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use super::ExplorerConfig;

/// Environment variable pointing at an explicit config file
pub const CONFIG_ENV_VAR: &str = "PG_EXPLORER_CONFIG";

const CONFIG_DIR_NAME: &str = "pg-explorer";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Platform config location: `<config dir>/pg-explorer/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Parse and validate config from a TOML string
pub fn parse_config(contents: &str) -> Result<ExplorerConfig> {
    let config: ExplorerConfig = toml::from_str(contents).context("Failed to parse config")?;
    config.validate()?;
    Ok(config)
}

/// Load configuration
///
/// Lookup order:
/// 1. `explicit` path (from `--config`); must exist
/// 2. `PG_EXPLORER_CONFIG`; must exist
/// 3. The platform default path; a missing file yields defaults
pub fn load_config(explicit: Option<&Path>) -> Result<ExplorerConfig> {
    if let Some(path) = explicit {
        return load_required(path);
    }

    if let Ok(path) = env::var(CONFIG_ENV_VAR)
        && !path.trim().is_empty()
    {
        return load_required(Path::new(&path));
    }

    match default_config_path() {
        Some(path) => load_optional(&path),
        None => Ok(ExplorerConfig::default()),
    }
}

fn load_required(path: &Path) -> Result<ExplorerConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config = parse_config(&contents)
        .with_context(|| format!("Invalid config file: {}", path.display()))?;
    debug!(path = %path.display(), "loaded config");
    Ok(config)
}

fn load_optional(path: &Path) -> Result<ExplorerConfig> {
    match fs::read_to_string(path) {
        Ok(contents) => {
            let config = parse_config(&contents)
                .with_context(|| format!("Invalid config file: {}", path.display()))?;
            debug!(path = %path.display(), "loaded config");
            Ok(config)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no config file, using defaults");
            Ok(ExplorerConfig::default())
        }
        Err(e) => Err(e)
            .with_context(|| format!("Failed to read config file: {}", path.display())),
    }
}
