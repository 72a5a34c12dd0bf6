use crate::api::WwwApi;
use crate::error::{Result, WwwError};
use crate::registry::Registry;
use directories::BaseDirs;
use std::path::PathBuf;

/// Overrides the config file location.
pub const CONFIG_ENV: &str = "WWW_CONFIG";

pub const CONFIG_FILE_NAME: &str = ".wwwconf";

pub struct WwwContext {
    pub api: WwwApi,
}

/// `$WWW_CONFIG` if set and non-empty, otherwise `~/.wwwconf`.
pub fn config_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    let base = BaseDirs::new()
        .ok_or_else(|| WwwError::Config("could not determine home directory".to_string()))?;
    Ok(base.home_dir().join(CONFIG_FILE_NAME))
}

/// Build the API over `registry` and the user's config file.
pub fn initialize(registry: Registry) -> Result<WwwContext> {
    let api = WwwApi::new(registry, config_path()?);
    Ok(WwwContext { api })
}
