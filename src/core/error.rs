use thiserror::Error;

/// Failure of the Argument Extractor: the command carries no usable argument.
///
/// Distinct from an empty string so callers cannot mistake "absent" for "present but blank".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    /// Nothing follows the command token
    #[error("command `{0}` expects an argument")]
    Missing(String),

    /// Only whitespace follows the command token
    #[error("argument of command `{0}` is blank")]
    Blank(String),
}

/// Startup-time registry violations. Never produced while dispatching.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("command `{0}` is already registered")]
    Duplicate(String),

    #[error("invalid command name `{0}`")]
    InvalidName(String),
}

/// Failure of a System-Operation Collaborator (filesystem, display, network, host).
#[derive(Error, Debug)]
pub enum SystemError {
    /// IO errors (missing path, permission denied, socket setup)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Display enumeration or capture failed
    #[error("capture error: {0}")]
    Capture(String),

    /// HTTP errors while resolving the public address
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP status code errors
    #[error("HTTP request failed with status: {0}")]
    HttpStatus(reqwest::StatusCode),

    /// A lookup answered with something that is not an address
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// The OS did not report a required value
    #[error("{0} is unavailable")]
    Unavailable(&'static str),

    /// Blocking work could not be joined
    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// A reply could not be delivered to the operator.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Telegram API errors
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    /// Attachment could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other refusal by the transport
    #[error("reply rejected: {0}")]
    Rejected(String),
}

/// Everything a command handler can fail with.
///
/// The three variants are the failure classes surfaced to the dispatcher:
/// user-correctable argument errors, collaborator failures and undeliverable replies.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("bad argument: {0}")]
    BadArgument(#[from] ArgumentError),

    #[error("{context}: {source}")]
    Collaborator {
        context: &'static str,
        #[source]
        source: SystemError,
    },

    #[error("failed to send reply: {0}")]
    Transport(#[from] TransportError),
}

impl HandlerError {
    /// Wraps a collaborator failure with a short description of what was attempted.
    pub fn collaborator(context: &'static str, source: impl Into<SystemError>) -> Self {
        HandlerError::Collaborator {
            context,
            source: source.into(),
        }
    }

    /// Stable label used in logs and counters.
    pub fn kind(&self) -> &'static str {
        match self {
            HandlerError::BadArgument(_) => "bad_argument",
            HandlerError::Collaborator { .. } => "collaborator",
            HandlerError::Transport(_) => "transport",
        }
    }
}

/// Type alias for handler results
pub type HandlerResult = Result<(), HandlerError>;
