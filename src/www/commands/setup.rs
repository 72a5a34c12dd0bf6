use crate::commands::{CmdMessage, CmdResult};
use crate::config::ConfigStore;
use crate::credentials::Prompter;
use crate::error::{Result, WwwError};
use crate::registry::Registry;
use std::path::Path;
use tracing::debug;

/// `www setup <name>`: acquire credentials interactively and persist them.
/// Never reads stdin and never sends.
pub fn run(
    registry: &mut Registry,
    config_path: &Path,
    name: &str,
    prompter: &mut dyn Prompter,
) -> Result<CmdResult> {
    let provider = registry
        .resolve_mut(name)
        .ok_or_else(|| WwwError::UnknownProvider(name.to_string()))?;

    let mut store = ConfigStore::load(config_path)?;
    provider.setup(store.settings_mut(name), prompter)?;
    store.save()?;
    debug!(provider = name, path = %config_path.display(), "setup saved");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("{name} is set up.")));
    result.add_message(CmdMessage::info(format!(
        "Settings saved to {}",
        config_path.display()
    )));
    Ok(result)
}
