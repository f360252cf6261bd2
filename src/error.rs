use thiserror::Error;

/// Errors raised while constructing a session or building a request.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("an API key must be provided either in the configuration file or on the command line")]
    MissingApiKey,

    #[error("failed to serialize request body: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Network-level failure from the transport collaborator. HTTP error
/// statuses are not transport errors; they come back as ordinary replies.
#[derive(Debug, Error)]
#[error("network request failed: {message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// A runtime command line that could not be applied.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("invalid number '{value}' for {command}")]
    BadNumber {
        command: &'static str,
        value: String,
    },

    #[error("unknown command '{0}'")]
    Unknown(String),
}
