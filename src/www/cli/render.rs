use colored::Colorize;
use console::style;
use www::api::{CmdMessage, MessageLevel, ProviderInfo};
use www::error::WwwError;

/// Messages go to stderr so that stdout carries only the delivery location.
pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => eprintln!("{}", message.content.dimmed()),
            MessageLevel::Success => eprintln!("{}", message.content.green()),
        }
    }
}

pub(super) fn print_location(location: &str) {
    println!("{location}");
}

pub(super) fn format_providers(providers: &[ProviderInfo]) -> Vec<String> {
    let width = providers.iter().map(|p| p.name.len()).max().unwrap_or(0);
    providers
        .iter()
        .map(|p| {
            let marker = if p.configured { "  (configured)" } else { "" };
            format!("  {:<width$}  {}{marker}", p.name, p.about)
        })
        .collect()
}

pub(super) fn print_providers(providers: &[ProviderInfo]) {
    for line in format_providers(providers) {
        println!("{line}");
    }
}

pub(super) fn print_setup_banner(provider: &str) {
    eprintln!("\n{}", style(format!("Setting up {provider}")).cyan().bold());
    eprintln!(
        "{}",
        style("Credentials are stored in plain text in your config file.").dim()
    );
}

/// Print `err` and return the process exit code for it.
pub fn report(err: &WwwError) -> i32 {
    if let WwwError::Flags(clap_err) = err {
        // clap renders help and version to stdout and errors to stderr.
        let _ = clap_err.print();
        return if clap_err.use_stderr() { err.exit_code() } else { 0 };
    }
    eprintln!("{} {}", "Error:".red().bold(), err);
    err.exit_code()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn providers_are_aligned_and_marked() {
        let providers = vec![
            ProviderInfo {
                name: "s3".into(),
                about: "bucket".into(),
                configured: false,
            },
            ProviderInfo {
                name: "slack".into(),
                about: "chat".into(),
                configured: true,
            },
        ];
        assert_eq!(
            format_providers(&providers),
            ["  s3     bucket", "  slack  chat  (configured)"]
        );
    }

    #[test]
    fn help_request_exits_zero() {
        let help = clap::Error::new(clap::error::ErrorKind::DisplayHelp);
        assert!(!help.use_stderr());
        let bad = clap::Error::new(clap::error::ErrorKind::UnknownArgument);
        assert!(bad.use_stderr());
        assert_eq!(WwwError::Flags(bad).exit_code(), 64);
    }
}
