//! # Built-in Providers
//!
//! | Name    | Destination                 | Credentials              |
//! |---------|-----------------------------|--------------------------|
//! | `gist`  | GitHub Gists                | optional token           |
//! | `gmail` | SMTP (Gmail by default)     | user + password, prompts |
//! | `s3`    | Amazon S3 (or compatible)   | access + secret, setup   |
//! | `slack` | Slack `chat.postMessage`    | token, setup             |
//!
//! Each provider owns its flag set (a clap `Parser`) which is parsed from the
//! arguments following the provider name. `www <provider> --help` prints it.

use crate::error::{Result, WwwError};
use clap::Parser;
use reqwest::blocking::Client;

pub mod gist;
pub mod gmail;
pub mod s3;
pub mod slack;

pub use gist::Gist;
pub use gmail::GMail;
pub use s3::S3;
pub use slack::Slack;

const USER_AGENT: &str = concat!("www/", env!("CARGO_PKG_VERSION"));

/// Parse a provider's flags. `name` stands in for argv[0].
pub(crate) fn parse_flags<T: Parser>(name: &str, args: &[String]) -> Result<T> {
    let argv = std::iter::once(name.to_string()).chain(args.iter().cloned());
    T::try_parse_from(argv).map_err(WwwError::Flags)
}

pub(crate) fn http_client() -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| WwwError::Config(format!("could not build HTTP client: {e}")))
}
