//! # Configuration Store
//!
//! All persisted state lives in a single JSON file (`~/.wwwconf` by default)
//! holding a two-level mapping:
//!
//! ```text
//! {
//!   "s3":    { "access": "AKIA...", "secret": "..." },
//!   "slack": { "token": "xoxb-..." }
//! }
//! ```
//!
//! The store is loaded once per invocation, the active provider receives a
//! mutable borrow of its own slice, and the whole mapping is written back at
//! the end. Entries for other providers and keys this version does not know
//! about are carried through untouched.
//!
//! The file is not locked. Two concurrent invocations race and the last save
//! wins.

use crate::error::{Result, WwwError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

/// One provider's flat settings map.
pub type Settings = BTreeMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
struct Document(BTreeMap<String, Settings>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigStore {
    path: PathBuf,
    providers: BTreeMap<String, Settings>,
}

impl ConfigStore {
    /// Empty, unsaved store bound to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            providers: BTreeMap::new(),
        }
    }

    /// Load the store from `path`.
    ///
    /// A missing file is first-run state: an empty file is written on a best
    /// effort basis and an empty store is returned. A file that exists but
    /// cannot be read or parsed is an error.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            let store = Self::new(path);
            if let Err(e) = store.save() {
                debug!(path = %store.path.display(), error = %e, "could not create config file");
            }
            return Ok(store);
        }

        let raw = fs::read_to_string(&path)?;

        let doc: Document = if raw.trim().is_empty() {
            Document::default()
        } else {
            serde_json::from_str(&raw).map_err(|e| {
                WwwError::Config(format!("{} is malformed: {}", path.display(), e))
            })?
        };
        debug!(path = %path.display(), providers = doc.0.len(), "loaded config");

        Ok(Self {
            path,
            providers: doc.0,
        })
    }

    /// Atomically replace the file with the full in-memory store.
    pub fn save(&self) -> Result<()> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        let content = serde_json::to_string_pretty(&Document(self.providers.clone()))?;
        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.write_all(b"\n")?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| WwwError::Io(e.error))?;

        debug!(path = %self.path.display(), "saved config");
        Ok(())
    }

    /// The settings slice for `provider`, created empty if absent.
    pub fn settings_mut(&mut self, provider: &str) -> &mut Settings {
        self.providers.entry(provider.to_string()).or_default()
    }

    pub fn settings(&self, provider: &str) -> Option<&Settings> {
        self.providers.get(provider)
    }

    pub fn providers(&self) -> impl Iterator<Item = (&String, &Settings)> {
        self.providers.iter()
    }
}
