//! # Provider Contract
//!
//! A provider is one destination kind (a paste service, a mailbox, a bucket,
//! a chat channel). Each goes through the same lifecycle per invocation:
//!
//! ```text
//! Unconfigured --initialize--> Initialized --send--> Sent
//!       |                           |
//!       +---------> Failed <--------+
//! ```
//!
//! `setup` is a separate path used only by `www setup <provider>`; it is never
//! followed by `send` in the same run.
//!
//! Providers are constructed empty. Everything they need (credentials,
//! target identifiers, the network client) is established by `initialize`
//! from the provider's own flags and its slice of the config store.

use crate::config::Settings;
use crate::content::Content;
use crate::credentials::Prompter;
use crate::error::Result;

/// What a successful send produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Delivery {
    /// Where the content can be found now, if the destination has an address.
    pub location: Option<String>,
    /// Short human readable summary.
    pub summary: String,
}

impl Delivery {
    pub fn at(location: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            location: Some(location.into()),
            summary: summary.into(),
        }
    }

    pub fn summary(summary: impl Into<String>) -> Self {
        Self {
            location: None,
            summary: summary.into(),
        }
    }
}

pub trait Provider {
    /// One line description shown by `www providers`.
    fn about(&self) -> &'static str;

    /// Interactively acquire credentials and store them in `settings`.
    ///
    /// Re-running setup overwrites the keys it manages.
    fn setup(&mut self, settings: &mut Settings, prompter: &mut dyn Prompter) -> Result<()>;

    /// Parse `args` (everything after the provider name) and combine them
    /// with `settings` to become ready to send. Values obtained from flags or
    /// prompts that should be remembered are written into `settings`.
    fn initialize(
        &mut self,
        args: &[String],
        settings: &mut Settings,
        prompter: &mut dyn Prompter,
    ) -> Result<()>;

    /// Deliver `content` once. Only valid after a successful `initialize`.
    fn send(&mut self, content: &Content) -> Result<Delivery>;
}
