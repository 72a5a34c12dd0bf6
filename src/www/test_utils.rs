use crate::config::{ConfigStore, Settings};
use crate::content::Content;
use crate::credentials::Prompter;
use crate::error::{Result, WwwError};
use crate::input::InputSource;
use crate::provider::{Delivery, Provider};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use tempfile::TempDir;

/// Answers prompts from a fixed script and records what was asked.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    /// Labels of every prompt shown so far, in order.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    fn next(&mut self, label: &str) -> Result<String> {
        self.asked.push(label.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| WwwError::Prompt(format!("no scripted answer for {label:?}")))
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&mut self, label: &str) -> Result<String> {
        self.next(label)
    }

    fn password(&mut self, label: &str) -> Result<String> {
        self.next(label)
    }
}

/// Where a [`RecordingProvider`] should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailAt {
    Initialize,
    Send,
}

/// What a [`RecordingProvider`] saw. Shared so tests can inspect it after the
/// provider has been moved into a registry.
#[derive(Debug, Default)]
pub struct Recorded {
    pub events: Vec<&'static str>,
    pub initialized_with: Option<Vec<String>>,
    pub sent: Vec<Content>,
}

/// A provider that records its lifecycle and touches no network.
pub struct RecordingProvider {
    about: &'static str,
    remember: Option<(String, String)>,
    fail_at: Option<FailAt>,
    location: Option<String>,
    recorded: Rc<RefCell<Recorded>>,
}

impl RecordingProvider {
    pub fn new(about: &'static str) -> Self {
        Self {
            about,
            remember: None,
            fail_at: None,
            location: None,
            recorded: Rc::default(),
        }
    }

    /// Write `key = value` into the settings slice during initialize and setup.
    pub fn remembering(mut self, key: &str, value: &str) -> Self {
        self.remember = Some((key.to_string(), value.to_string()));
        self
    }

    pub fn failing_at(mut self, stage: FailAt) -> Self {
        self.fail_at = Some(stage);
        self
    }

    pub fn delivering_to(mut self, location: &str) -> Self {
        self.location = Some(location.to_string());
        self
    }

    pub fn recorded(&self) -> Rc<RefCell<Recorded>> {
        Rc::clone(&self.recorded)
    }

    fn store(&self, settings: &mut Settings) {
        if let Some((key, value)) = &self.remember {
            settings.insert(key.clone(), value.clone());
        }
    }
}

impl Provider for RecordingProvider {
    fn about(&self) -> &'static str {
        self.about
    }

    fn setup(&mut self, settings: &mut Settings, _prompter: &mut dyn Prompter) -> Result<()> {
        self.recorded.borrow_mut().events.push("setup");
        self.store(settings);
        Ok(())
    }

    fn initialize(
        &mut self,
        args: &[String],
        settings: &mut Settings,
        _prompter: &mut dyn Prompter,
    ) -> Result<()> {
        {
            let mut recorded = self.recorded.borrow_mut();
            recorded.events.push("initialize");
            recorded.initialized_with = Some(args.to_vec());
        }
        if self.fail_at == Some(FailAt::Initialize) {
            return Err(WwwError::missing("fake", "Channel"));
        }
        self.store(settings);
        Ok(())
    }

    fn send(&mut self, content: &Content) -> Result<Delivery> {
        {
            let mut recorded = self.recorded.borrow_mut();
            recorded.events.push("send");
            recorded.sent.push(content.clone());
        }
        if self.fail_at == Some(FailAt::Send) {
            return Err(WwwError::delivery("fake", "destination unreachable"));
        }
        Ok(Delivery {
            location: self.location.clone(),
            summary: format!("Recorded {} bytes", content.len()),
        })
    }
}

/// Input that is either a terminal (no content) or a fixed byte string.
#[derive(Debug, Clone)]
pub struct BytesSource {
    bytes: Option<Vec<u8>>,
    reads: usize,
}

impl BytesSource {
    pub fn piped(bytes: &[u8]) -> Self {
        Self {
            bytes: Some(bytes.to_vec()),
            reads: 0,
        }
    }

    pub fn terminal() -> Self {
        Self {
            bytes: None,
            reads: 0,
        }
    }

    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl InputSource for BytesSource {
    fn is_interactive(&self) -> bool {
        self.bytes.is_none()
    }

    fn read_all(&mut self) -> io::Result<Content> {
        self.reads += 1;
        match &self.bytes {
            Some(bytes) => Ok(Content::new(bytes.clone())),
            None => Err(io::Error::other("terminal input is not readable in tests")),
        }
    }
}

/// A scratch directory holding the config file for one test.
pub struct TestEnv {
    // Held so the directory outlives the test body.
    pub _temp_dir: TempDir,
    pub config_path: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join(".wwwconf");
        Self {
            _temp_dir: temp_dir,
            config_path,
        }
    }

    /// Seed the config file with raw text.
    pub fn write_config(&self, raw: &str) {
        std::fs::write(&self.config_path, raw).expect("failed to seed config");
    }

    pub fn read_config(&self) -> Option<String> {
        std::fs::read_to_string(&self.config_path).ok()
    }

    pub fn store(&self) -> ConfigStore {
        ConfigStore::load(&self.config_path).expect("config should load")
    }
}
