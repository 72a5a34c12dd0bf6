//! # Credential Sources
//!
//! Every provider setting that can come from more than one place is resolved
//! through this module, with a single precedence order:
//!
//! 1. an explicit command-line flag
//! 2. the value persisted in the provider's config slice
//! 3. an interactive prompt, for providers that allow it
//!
//! Whatever wins is written back into the slice, so a credential passed once
//! on the command line or typed at a prompt is remembered for the next run.
//!
//! Prompting goes through the [`Prompter`] trait so the precedence rules can
//! be exercised without a terminal. The binary uses [`TerminalPrompter`].

use crate::config::Settings;
use crate::error::{Result, WwwError};
use dialoguer::{Input, Password};

/// Source of interactively supplied values.
pub trait Prompter {
    /// Ask for a visible value.
    fn input(&mut self, label: &str) -> Result<String>;

    /// Ask for a value without echoing it.
    fn password(&mut self, label: &str) -> Result<String>;
}

/// Prompts on the controlling terminal via `dialoguer`.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn input(&mut self, label: &str) -> Result<String> {
        Input::<String>::new()
            .with_prompt(label)
            .interact_text()
            .map_err(|e| WwwError::Prompt(e.to_string()))
    }

    fn password(&mut self, label: &str) -> Result<String> {
        Password::new()
            .with_prompt(label)
            .interact()
            .map_err(|e| WwwError::Prompt(e.to_string()))
    }
}

/// How a prompted value is asked for.
#[derive(Debug, Clone, Copy)]
pub struct Prompt {
    pub label: &'static str,
    pub secret: bool,
}

impl Prompt {
    pub const fn visible(label: &'static str) -> Self {
        Self {
            label,
            secret: false,
        }
    }

    pub const fn secret(label: &'static str) -> Self {
        Self {
            label,
            secret: true,
        }
    }

    /// Ask `prompter`, rejecting blank answers.
    pub fn ask(&self, prompter: &mut dyn Prompter) -> Result<String> {
        let answer = if self.secret {
            prompter.password(self.label)?
        } else {
            prompter.input(self.label)?
        };
        let answer = answer.trim().to_string();
        if answer.is_empty() {
            return Err(WwwError::Prompt(format!("{} cannot be empty", self.label)));
        }
        Ok(answer)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Flag beats persisted value. The winner is written back under `key`.
pub fn resolve(key: &str, flag: Option<String>, settings: &mut Settings) -> Option<String> {
    if let Some(value) = non_empty(flag) {
        settings.insert(key.to_string(), value.clone());
        return Some(value);
    }
    non_empty(settings.get(key).cloned())
}

/// Like [`resolve`], falling back to `prompt` when neither source has a value.
pub fn resolve_or_prompt(
    key: &str,
    flag: Option<String>,
    settings: &mut Settings,
    prompter: &mut dyn Prompter,
    prompt: Prompt,
) -> Result<String> {
    if let Some(value) = resolve(key, flag, settings) {
        return Ok(value);
    }
    let value = prompt.ask(prompter)?;
    settings.insert(key.to_string(), value.clone());
    Ok(value)
}

/// Prompt unconditionally and overwrite `key`. Used by `setup`.
pub fn acquire(
    key: &str,
    settings: &mut Settings,
    prompter: &mut dyn Prompter,
    prompt: Prompt,
) -> Result<()> {
    let value = prompt.ask(prompter)?;
    settings.insert(key.to_string(), value);
    Ok(())
}
