//! Registry of destination providers.
//!
//! Built once at startup by registering each built-in provider, then handed to
//! the dispatcher. Names are case-sensitive and matched exactly.

use crate::provider::Provider;
use crate::providers::{GMail, Gist, S3, Slack};
use std::collections::HashMap;
use tracing::debug;

#[derive(Default)]
pub struct Registry {
    providers: HashMap<String, Box<dyn Provider>>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in provider.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("gist", Box::new(Gist::default()));
        registry.register("gmail", Box::new(GMail::default()));
        registry.register("s3", Box::new(S3::default()));
        registry.register("slack", Box::new(Slack::default()));
        registry
    }

    /// Register `provider` under `name`. A second registration replaces the first.
    pub fn register(&mut self, name: impl Into<String>, provider: Box<dyn Provider>) {
        let name = name.into();
        if self.providers.insert(name.clone(), provider).is_some() {
            debug!(provider = %name, "provider re-registered, keeping the latest");
        }
    }

    pub fn resolve(&self, name: &str) -> Option<&dyn Provider> {
        self.providers.get(name).map(|p| p.as_ref())
    }

    pub fn resolve_mut(&mut self, name: &str) -> Option<&mut dyn Provider> {
        let provider: &mut dyn Provider = self.providers.get_mut(name)?.as_mut();
        Some(provider)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.providers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
