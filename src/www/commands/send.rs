//! The default command: read stdin and deliver it through one provider.
//!
//! Order matters here and is what the tests below pin down:
//!
//! 1. resolve the provider (unknown name: nothing else happens)
//! 2. load the config store
//! 3. initialize against the provider's slice (failure: store is not saved)
//! 4. check stdin is piped, read it, send it
//! 5. save the store, even when step 4 failed

use crate::commands::{CmdMessage, CmdResult};
use crate::config::ConfigStore;
use crate::content::Content;
use crate::credentials::Prompter;
use crate::error::{Result, WwwError};
use crate::input::InputSource;
use crate::provider::{Delivery, Provider};
use crate::registry::Registry;
use std::path::Path;
use tracing::{debug, warn};

fn deliver(provider: &mut dyn Provider, input: &mut dyn InputSource) -> Result<Delivery> {
    if input.is_interactive() {
        return Err(WwwError::NoInput);
    }
    let content: Content = input.read_all()?;
    debug!(bytes = content.len(), "captured input");
    provider.send(&content)
}

pub fn run(
    registry: &mut Registry,
    config_path: &Path,
    name: &str,
    args: &[String],
    input: &mut dyn InputSource,
    prompter: &mut dyn Prompter,
) -> Result<CmdResult> {
    let provider = registry
        .resolve_mut(name)
        .ok_or_else(|| WwwError::UnknownProvider(name.to_string()))?;

    let mut store = ConfigStore::load(config_path)?;
    provider.initialize(args, store.settings_mut(name), prompter)?;
    debug!(provider = name, "initialized");

    let outcome = deliver(provider, input);

    match (outcome, store.save()) {
        (Ok(delivery), Ok(())) => {
            let mut result = CmdResult::default();
            result.add_message(CmdMessage::success(delivery.summary.clone()));
            Ok(result.with_delivery(delivery))
        }
        (Ok(_), Err(save_err)) => Err(save_err),
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(save_err)) => {
            warn!(error = %save_err, "could not save config after failed send");
            Err(err)
        }
    }
}
