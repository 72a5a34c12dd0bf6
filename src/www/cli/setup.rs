use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use www::error::Result;
use www::registry::Registry;

/// "0.3.0" for tagged releases, "0.3.0@abc1234 2026-10-01" for dev builds.
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("WWW_GIT_HASH");
    const GIT_DATE: &str = env!("WWW_GIT_DATE");
    const IS_RELEASE: &str = env!("WWW_IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{VERSION}@{GIT_HASH} {GIT_DATE}")
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "www",
    bin_name = "www",
    version = get_version(),
    override_usage = "www [OPTIONS] <PROVIDER> [PROVIDER FLAGS]...\n       www setup <PROVIDER>\n       www providers"
)]
#[command(about = "Pipe standard input to a paste service, mailbox, bucket or chat channel", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Log lifecycle details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Interactively store credentials for a provider
    Setup {
        /// Provider to set up
        provider: String,
    },

    /// List available providers
    Providers,

    /// Any other word names a provider; the rest of the line is its flags
    #[command(external_subcommand)]
    Send(Vec<String>),
}

pub fn providers_help(registry: &Registry) -> String {
    format!(
        "Providers: {}\nRun `www <provider> --help` for a provider's flags.",
        registry.names().join(", ")
    )
}

/// Parse `argv` (including the binary name), listing `registry`'s providers in help.
pub fn parse<I, T>(registry: &Registry, argv: I) -> Result<Cli>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let matches = Cli::command()
        .after_help(providers_help(registry))
        .try_get_matches_from(argv)?;
    Ok(Cli::from_arg_matches(&matches)?)
}
