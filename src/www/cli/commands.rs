//! # CLI Layer
//!
//! One possible client of the `www` library, and the only place that knows
//! about the terminal: it parses argv, wires stdin and the terminal prompter
//! into the API, prints results and turns errors into exit codes.
//!
//! Output discipline: the delivery location (when a provider yields one) is
//! the only thing written to stdout, so `www gist | pbcopy` works. Messages,
//! banners and log lines go to stderr.

use super::render::{print_location, print_messages, print_providers, print_setup_banner};
use super::setup::{Commands, parse};
use www::credentials::TerminalPrompter;
use www::error::{Result, WwwError};
use www::init::{WwwContext, initialize};
use www::input::StdinSource;
use www::logging;
use www::registry::Registry;

pub fn run() -> Result<()> {
    let registry = Registry::builtin();
    let cli = parse(&registry, std::env::args_os())?;
    logging::init(cli.verbose)?;

    let mut ctx = initialize(registry)?;

    match cli.command {
        Some(Commands::Send(argv)) => match argv.split_first() {
            Some((name, args)) => handle_send(&mut ctx, name, args),
            None => Err(usage(&ctx)),
        },
        Some(Commands::Setup { provider }) => handle_setup(&mut ctx, &provider),
        Some(Commands::Providers) => handle_providers(&ctx),
        None => Err(usage(&ctx)),
    }
}

fn usage(ctx: &WwwContext) -> WwwError {
    WwwError::Usage(format!(
        "Usage: www <provider> [flags]\nProviders: {}",
        ctx.api.provider_names().join(", ")
    ))
}

fn handle_send(ctx: &mut WwwContext, name: &str, args: &[String]) -> Result<()> {
    let result = ctx
        .api
        .send(name, args, &mut StdinSource, &mut TerminalPrompter)?;
    if let Some(location) = result.location() {
        print_location(location);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_setup(ctx: &mut WwwContext, name: &str) -> Result<()> {
    if ctx.api.provider_names().contains(&name) {
        print_setup_banner(name);
    }
    let result = ctx.api.setup(name, &mut TerminalPrompter)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_providers(ctx: &WwwContext) -> Result<()> {
    let result = ctx.api.providers()?;
    print_providers(&result.providers);
    print_messages(&result.messages);
    Ok(())
}
