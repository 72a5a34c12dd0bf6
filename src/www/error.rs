use thiserror::Error;

/// Broad category of a failure, used by the binary to pick an exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Usage,
    UnknownProvider,
    Config,
    Delivery,
    Io,
}

impl ErrorKind {
    /// sysexits(3) style exit code for this category.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorKind::Usage => 64,
            ErrorKind::UnknownProvider => 67,
            ErrorKind::Delivery => 69,
            ErrorKind::Io => 74,
            ErrorKind::Config => 78,
        }
    }
}

#[derive(Error, Debug)]
pub enum WwwError {
    #[error("{0}")]
    Usage(String),

    #[error("Invalid provider: {0}")]
    UnknownProvider(String),

    #[error("No input. Pipe content into www, e.g. `echo hi | www gist`")]
    NoInput,

    #[error(transparent)]
    Flags(#[from] clap::Error),

    #[error("{setting} required.")]
    MissingSetting {
        provider: String,
        setting: &'static str,
    },

    #[error("{provider} is not set up. Run `www setup {provider}` or pass {hint}")]
    NotSetUp { provider: String, hint: &'static str },

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("{provider}: {message}")]
    Delivery { provider: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl WwwError {
    pub fn delivery(provider: &str, message: impl std::fmt::Display) -> Self {
        WwwError::Delivery {
            provider: provider.to_string(),
            message: message.to_string(),
        }
    }

    pub fn missing(provider: &str, setting: &'static str) -> Self {
        WwwError::MissingSetting {
            provider: provider.to_string(),
            setting,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            WwwError::Usage(_) | WwwError::NoInput | WwwError::Flags(_) => ErrorKind::Usage,
            WwwError::UnknownProvider(_) => ErrorKind::UnknownProvider,
            WwwError::MissingSetting { .. }
            | WwwError::NotSetUp { .. }
            | WwwError::Prompt(_)
            | WwwError::Config(_)
            | WwwError::Serialization(_) => ErrorKind::Config,
            WwwError::Delivery { .. } => ErrorKind::Delivery,
            WwwError::Io(_) => ErrorKind::Io,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.kind().exit_code()
    }
}

pub type Result<T> = std::result::Result<T, WwwError>;
