use crate::commands::{CmdResult, ProviderInfo};
use crate::config::ConfigStore;
use crate::error::Result;
use crate::registry::Registry;
use std::path::Path;

/// List registered destinations, marking those with saved settings.
///
/// Reads the config file if it exists but never creates or rewrites it.
pub fn run(registry: &Registry, config_path: &Path) -> Result<CmdResult> {
    let store = if config_path.exists() {
        Some(ConfigStore::load(config_path)?)
    } else {
        None
    };

    let providers = registry
        .names()
        .into_iter()
        .filter_map(|name| {
            let provider = registry.resolve(name)?;
            let configured = store
                .as_ref()
                .and_then(|s| s.settings(name))
                .is_some_and(|settings| !settings.is_empty());
            Some(ProviderInfo {
                name: name.to_string(),
                about: provider.about().to_string(),
                configured,
            })
        })
        .collect();

    Ok(CmdResult::default().with_providers(providers))
}
