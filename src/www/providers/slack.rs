use crate::config::Settings;
use crate::content::Content;
use crate::credentials::{self, Prompt, Prompter};
use crate::error::{Result, WwwError};
use crate::provider::{Delivery, Provider};
use clap::Parser;
use reqwest::blocking::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{http_client, parse_flags};

pub const SLACK_API: &str = "https://slack.com/api";

const TOKEN: &str = "token";

#[derive(Parser, Debug)]
#[command(name = "slack", bin_name = "www slack", about = "Post standard input to a Slack channel")]
struct SlackArgs {
    /// The Slack #channel to post to
    #[arg(long)]
    channel: Option<String>,

    /// Authorization token (remembered for next time)
    #[arg(long)]
    token: Option<String>,

    /// User name to post as
    #[arg(long, default_value = "www")]
    user: String,

    /// Base URL of the Slack Web API
    #[arg(long, default_value = SLACK_API, hide = true)]
    api_url: String,
}

struct Ready {
    client: Client,
    api_url: String,
    channel: String,
    token: SecretString,
    user: String,
}

/// Posts to a Slack channel through `chat.postMessage`.
#[derive(Default)]
pub struct Slack {
    ready: Option<Ready>,
}

#[derive(Serialize)]
struct PostMessage<'a> {
    channel: &'a str,
    text: &'a str,
    username: &'a str,
}

#[derive(Deserialize)]
struct PostMessageResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

fn channel_name(channel: &str) -> String {
    if channel.starts_with('#') {
        channel.to_string()
    } else {
        format!("#{channel}")
    }
}

impl Provider for Slack {
    fn about(&self) -> &'static str {
        "Post to a Slack channel"
    }

    fn setup(&mut self, settings: &mut Settings, prompter: &mut dyn Prompter) -> Result<()> {
        credentials::acquire(TOKEN, settings, prompter, Prompt::secret("Slack Token"))
    }

    fn initialize(
        &mut self,
        args: &[String],
        settings: &mut Settings,
        _prompter: &mut dyn Prompter,
    ) -> Result<()> {
        let args: SlackArgs = parse_flags("slack", args)?;

        let channel = match args.channel.filter(|c| !c.trim_start_matches('#').is_empty()) {
            Some(channel) => channel_name(&channel),
            None => return Err(WwwError::missing("slack", "Channel")),
        };

        let token = credentials::resolve(TOKEN, args.token, settings).ok_or_else(|| {
            WwwError::NotSetUp {
                provider: "slack".to_string(),
                hint: "--token",
            }
        })?;

        debug!(%channel, user = %args.user, "slack initialized");
        self.ready = Some(Ready {
            client: http_client()?,
            api_url: args.api_url.trim_end_matches('/').to_string(),
            channel,
            token: SecretString::new(token.into_boxed_str()),
            user: args.user,
        });
        Ok(())
    }

    fn send(&mut self, content: &Content) -> Result<Delivery> {
        let ready = self
            .ready
            .as_ref()
            .ok_or_else(|| WwwError::delivery("slack", "not initialized"))?;

        let text = content.text();
        let response = ready
            .client
            .post(format!("{}/chat.postMessage", ready.api_url))
            .bearer_auth(ready.token.expose_secret())
            .json(&PostMessage {
                channel: &ready.channel,
                text: &text,
                username: &ready.user,
            })
            .send()
            .map_err(|e| WwwError::delivery("slack", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WwwError::delivery("slack", format!("HTTP {status}")));
        }

        let body: PostMessageResponse = response
            .json()
            .map_err(|e| WwwError::delivery("slack", e))?;
        if !body.ok {
            let reason = body.error.unwrap_or_else(|| "unknown error".to_string());
            return Err(WwwError::delivery("slack", reason));
        }

        Ok(Delivery::summary(format!("Posted to {}", ready.channel)))
    }
}
