//! # API Facade
//!
//! Thin layer between a UI and the command layer. It owns the provider
//! registry and knows where the config file lives; the caller supplies the
//! terminal-facing capabilities (stdin and the prompter) so the commands
//! never touch the process environment directly.

use crate::commands;
use crate::credentials::Prompter;
use crate::error::Result;
use crate::input::InputSource;
use crate::registry::Registry;
use std::path::PathBuf;

pub use crate::commands::{CmdMessage, CmdResult, MessageLevel, ProviderInfo};

pub struct WwwApi {
    registry: Registry,
    config_path: PathBuf,
}

impl WwwApi {
    pub fn new(registry: Registry, config_path: impl Into<PathBuf>) -> Self {
        Self {
            registry,
            config_path: config_path.into(),
        }
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.registry.names()
    }

    /// Deliver stdin through provider `name`, configured by `args`.
    pub fn send(
        &mut self,
        name: &str,
        args: &[String],
        input: &mut dyn InputSource,
        prompter: &mut dyn Prompter,
    ) -> Result<CmdResult> {
        commands::send::run(
            &mut self.registry,
            &self.config_path,
            name,
            args,
            input,
            prompter,
        )
    }

    pub fn setup(&mut self, name: &str, prompter: &mut dyn Prompter) -> Result<CmdResult> {
        commands::setup::run(&mut self.registry, &self.config_path, name, prompter)
    }

    pub fn providers(&self) -> Result<CmdResult> {
        commands::providers::run(&self.registry, &self.config_path)
    }
}
