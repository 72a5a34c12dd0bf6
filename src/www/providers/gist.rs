use crate::config::Settings;
use crate::content::Content;
use crate::credentials::{self, Prompt, Prompter};
use crate::error::{Result, WwwError};
use crate::provider::{Delivery, Provider};
use chrono::Utc;
use clap::Parser;
use reqwest::blocking::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use super::{http_client, parse_flags};

pub const GITHUB_API: &str = "https://api.github.com";

const TOKEN: &str = "token";

#[derive(Parser, Debug)]
#[command(name = "gist", bin_name = "www gist", about = "Paste standard input as a GitHub Gist")]
struct GistArgs {
    /// Name of file
    #[arg(long)]
    name: Option<String>,

    /// Gist description
    #[arg(long, default_value = "")]
    description: String,

    /// Create a secret gist instead of a public one
    #[arg(long)]
    private: bool,

    /// GitHub token; without one the gist is anonymous
    #[arg(long)]
    token: Option<String>,

    /// Base URL of the GitHub API (GitHub Enterprise: https://host/api/v3)
    #[arg(long, default_value = GITHUB_API)]
    api_url: String,
}

struct Ready {
    client: Client,
    api_url: String,
    name: String,
    description: String,
    public: bool,
    token: Option<SecretString>,
}

/// Pastes content as a single-file GitHub Gist.
#[derive(Default)]
pub struct Gist {
    ready: Option<Ready>,
}

#[derive(Serialize)]
struct GistFile<'a> {
    content: &'a str,
}

#[derive(Serialize)]
struct CreateGist<'a> {
    description: &'a str,
    public: bool,
    files: BTreeMap<&'a str, GistFile<'a>>,
}

#[derive(Deserialize)]
struct CreatedGist {
    #[serde(default)]
    html_url: String,
}

fn default_name() -> String {
    format!("stdgist-{}", Utc::now().timestamp())
}

impl Provider for Gist {
    fn about(&self) -> &'static str {
        "Paste as a GitHub Gist and print its URL"
    }

    fn setup(&mut self, settings: &mut Settings, prompter: &mut dyn Prompter) -> Result<()> {
        credentials::acquire(TOKEN, settings, prompter, Prompt::secret("GitHub Token"))
    }

    fn initialize(
        &mut self,
        args: &[String],
        settings: &mut Settings,
        _prompter: &mut dyn Prompter,
    ) -> Result<()> {
        let args: GistArgs = parse_flags("gist", args)?;

        let name = args
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(default_name);
        let token = credentials::resolve(TOKEN, args.token, settings)
            .map(|t| SecretString::new(t.into_boxed_str()));

        debug!(%name, authenticated = token.is_some(), "gist initialized");
        self.ready = Some(Ready {
            client: http_client()?,
            api_url: args.api_url.trim_end_matches('/').to_string(),
            name,
            description: args.description,
            public: !args.private,
            token,
        });
        Ok(())
    }

    fn send(&mut self, content: &Content) -> Result<Delivery> {
        let ready = self
            .ready
            .as_ref()
            .ok_or_else(|| WwwError::delivery("gist", "not initialized"))?;

        let text = content.text();
        let body = CreateGist {
            description: &ready.description,
            public: ready.public,
            files: BTreeMap::from([(ready.name.as_str(), GistFile { content: &text })]),
        };

        let mut request = ready
            .client
            .post(format!("{}/gists", ready.api_url))
            .header("accept", "application/vnd.github+json")
            .json(&body);
        if let Some(token) = &ready.token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request
            .send()
            .map_err(|e| WwwError::delivery("gist", e))?;
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            return Err(WwwError::delivery(
                "gist",
                format!("HTTP {status} {}", detail.trim()),
            ));
        }

        let created: CreatedGist = response
            .json()
            .map_err(|e| WwwError::delivery("gist", e))?;
        if created.html_url.is_empty() {
            Ok(Delivery::summary(format!("Created gist {}", ready.name)))
        } else {
            Ok(Delivery::at(
                created.html_url,
                format!("Created gist {}", ready.name),
            ))
        }
    }
}
