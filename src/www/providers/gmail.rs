use crate::config::Settings;
use crate::content::Content;
use crate::credentials::{self, Prompt, Prompter};
use crate::error::{Result, WwwError};
use crate::provider::{Delivery, Provider};
use clap::Parser;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use super::parse_flags;

pub const GMAIL_SMTP: &str = "smtp.gmail.com";

/// SMTP submission port.
const SUBMISSION_PORT: u16 = 587;

const USER: &str = "user";
const PASSWORD: &str = "password";

#[derive(Parser, Debug)]
#[command(name = "gmail", bin_name = "www gmail", about = "Mail standard input through Gmail")]
struct GMailArgs {
    /// Recipient of message
    #[arg(long)]
    to: Option<String>,

    /// Subject of message
    #[arg(long, default_value = "stdout via www")]
    subject: String,

    /// Sending account (remembered for next time)
    #[arg(long)]
    user: Option<String>,

    /// Account password or app password (remembered for next time)
    #[arg(long)]
    password: Option<String>,

    /// SMTP relay, reached with STARTTLS
    #[arg(long, default_value = GMAIL_SMTP)]
    server: String,

    /// SMTP relay port
    #[arg(long, default_value_t = SUBMISSION_PORT)]
    port: u16,
}

struct Ready {
    server: String,
    port: u16,
    from: Mailbox,
    to: Mailbox,
    subject: String,
    user: String,
    password: SecretString,
}

impl Ready {
    fn compose(&self, content: &Content) -> Result<Message> {
        Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(self.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(content.text().into_owned())
            .map_err(|e| WwwError::delivery("gmail", e))
    }
}

/// Sends content as the body of a plain text email.
///
/// Unlike the other providers, a first run without `setup` simply prompts
/// for the account and password and remembers them.
#[derive(Default)]
pub struct GMail {
    ready: Option<Ready>,
}

fn mailbox(address: &str, what: &str) -> Result<Mailbox> {
    address
        .parse()
        .map_err(|e| WwwError::Config(format!("invalid {what} address {address:?}: {e}")))
}

impl Provider for GMail {
    fn about(&self) -> &'static str {
        "Email to a recipient over SMTP"
    }

    fn setup(&mut self, settings: &mut Settings, prompter: &mut dyn Prompter) -> Result<()> {
        credentials::acquire(USER, settings, prompter, Prompt::visible("Email"))?;
        credentials::acquire(PASSWORD, settings, prompter, Prompt::secret("Password"))
    }

    fn initialize(
        &mut self,
        args: &[String],
        settings: &mut Settings,
        prompter: &mut dyn Prompter,
    ) -> Result<()> {
        let args: GMailArgs = parse_flags("gmail", args)?;

        let to = match args.to.filter(|t| !t.is_empty()) {
            Some(to) => mailbox(&to, "recipient")?,
            None => return Err(WwwError::missing("gmail", "Recipient")),
        };

        let user = credentials::resolve_or_prompt(
            USER,
            args.user,
            settings,
            prompter,
            Prompt::visible("Email"),
        )?;
        let password = credentials::resolve_or_prompt(
            PASSWORD,
            args.password,
            settings,
            prompter,
            Prompt::secret("Password"),
        )?;

        debug!(
            to = %to,
            from = %user,
            server = %args.server,
            port = args.port,
            "gmail initialized"
        );
        self.ready = Some(Ready {
            server: args.server,
            port: args.port,
            from: mailbox(&user, "sender")?,
            to,
            subject: args.subject,
            user,
            password: SecretString::new(password.into_boxed_str()),
        });
        Ok(())
    }

    fn send(&mut self, content: &Content) -> Result<Delivery> {
        let ready = self
            .ready
            .as_ref()
            .ok_or_else(|| WwwError::delivery("gmail", "not initialized"))?;

        let message = ready.compose(content)?;
        let credentials = Credentials::new(
            ready.user.clone(),
            ready.password.expose_secret().to_string(),
        );
        let mailer = SmtpTransport::starttls_relay(&ready.server)
            .map_err(|e| WwwError::delivery("gmail", e))?
            .port(ready.port)
            .credentials(credentials)
            .build();

        mailer
            .send(&message)
            .map_err(|e| WwwError::delivery("gmail", e))?;

        Ok(Delivery::summary(format!("Mailed {}", ready.to)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ScriptedPrompter;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn recipient_is_required_before_prompting() {
        let mut gmail = GMail::default();
        let mut settings = Settings::new();
        let mut prompter = ScriptedPrompter::new(Vec::<String>::new());
        let err = gmail
            .initialize(&[], &mut settings, &mut prompter)
            .unwrap_err();
        assert_eq!(err.to_string(), "Recipient required.");
        assert!(prompter.asked().is_empty());
    }

    #[test]
    fn first_run_prompts_and_remembers_credentials() {
        let mut gmail = GMail::default();
        let mut settings = Settings::new();
        let mut prompter = ScriptedPrompter::new(["me@example.com", "hunter2"]);
        gmail
            .initialize(&args(&["--to", "you@example.com"]), &mut settings, &mut prompter)
            .unwrap();

        assert_eq!(prompter.asked(), ["Email", "Password"]);
        assert_eq!(settings["user"], "me@example.com");
        assert_eq!(settings["password"], "hunter2");
    }

    #[test]
    fn persisted_credentials_skip_prompts() {
        let mut gmail = GMail::default();
        let mut settings = Settings::from([
            ("user".to_string(), "me@example.com".to_string()),
            ("password".to_string(), "hunter2".to_string()),
        ]);
        let mut prompter = ScriptedPrompter::new(Vec::<String>::new());
        gmail
            .initialize(&args(&["--to", "you@example.com"]), &mut settings, &mut prompter)
            .unwrap();
        assert!(prompter.asked().is_empty());
    }

    #[test]
    fn user_flag_overrides_persisted_account() {
        let mut gmail = GMail::default();
        let mut settings = Settings::from([
            ("user".to_string(), "old@example.com".to_string()),
            ("password".to_string(), "pw".to_string()),
        ]);
        gmail
            .initialize(
                &args(&["--to", "you@example.com", "--user", "new@example.com"]),
                &mut settings,
                &mut ScriptedPrompter::new(Vec::<String>::new()),
            )
            .unwrap();
        assert_eq!(gmail.ready.unwrap().user, "new@example.com");
        assert_eq!(settings["user"], "new@example.com");
    }

    #[test]
    fn invalid_recipient_is_a_config_error() {
        let mut gmail = GMail::default();
        let err = gmail
            .initialize(
                &args(&["--to", "not an address"]),
                &mut Settings::new(),
                &mut ScriptedPrompter::new(Vec::<String>::new()),
            )
            .unwrap_err();
        assert!(matches!(err, WwwError::Config(_)));
    }

    #[test]
    fn composed_message_carries_headers_and_body() {
        let mut gmail = GMail::default();
        let mut settings = Settings::from([
            ("user".to_string(), "me@example.com".to_string()),
            ("password".to_string(), "pw".to_string()),
        ]);
        gmail
            .initialize(
                &args(&["--to", "you@example.com", "--subject", "build log"]),
                &mut settings,
                &mut ScriptedPrompter::new(Vec::<String>::new()),
            )
            .unwrap();

        let message = gmail
            .ready
            .as_ref()
            .unwrap()
            .compose(&Content::from("all green"))
            .unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains("To: you@example.com"));
        assert!(raw.contains("From: me@example.com"));
        assert!(raw.contains("Subject: build log"));
        assert!(raw.contains("all green"));
    }

    #[test]
    fn unreachable_relay_is_a_delivery_error() {
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();

        let mut gmail = GMail::default();
        let mut settings = Settings::from([
            ("user".to_string(), "me@example.com".to_string()),
            ("password".to_string(), "pw".to_string()),
        ]);
        gmail
            .initialize(
                &args(&[
                    "--to",
                    "you@example.com",
                    "--server",
                    "127.0.0.1",
                    "--port",
                    &port.to_string(),
                ]),
                &mut settings,
                &mut ScriptedPrompter::new(Vec::<String>::new()),
            )
            .unwrap();

        let err = gmail.send(&Content::from("all green")).unwrap_err();
        assert!(matches!(err, WwwError::Delivery { .. }));
        assert_eq!(err.exit_code(), 69);
    }

    #[test]
    fn setup_stores_user_and_password() {
        let mut gmail = GMail::default();
        let mut settings = Settings::new();
        let mut prompter = ScriptedPrompter::new(["a@example.com", "one", "b@example.com", "two"]);
        gmail.setup(&mut settings, &mut prompter).unwrap();
        gmail.setup(&mut settings, &mut prompter).unwrap();
        assert_eq!(settings.len(), 2);
        assert_eq!(settings["user"], "b@example.com");
        assert_eq!(settings["password"], "two");
    }
}
