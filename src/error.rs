//! Error types for the Eversend client

use thiserror::Error;

/// Failure of the underlying HTTP collaborator.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Other(String),
}

/// Client error types
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("authentication failed with status {status}: {message}")]
    Auth { status: u16, message: String },

    #[error("API request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("unexpected response from {context}: {reason}")]
    Decode { context: String, reason: String },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ClientError {
    pub(crate) fn decode(context: impl Into<String>, reason: impl ToString) -> Self {
        ClientError::Decode {
            context: context.into(),
            reason: reason.to_string(),
        }
    }

    /// Server-supplied message for `Auth` and `Api` failures.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Auth { message, .. } | ClientError::Api { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Whether repeating the same call may succeed.
    ///
    /// Transport and decode failures are transient from the caller's point of
    /// view; rejected arguments and business-level API errors are not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClientError::Transport(_) | ClientError::Decode { .. })
    }

    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ClientError::Transport(_) => "transport",
            ClientError::Auth { .. } => "auth",
            ClientError::Api { .. } => "api",
            ClientError::Decode { .. } => "decode",
            ClientError::InvalidArgument(_) => "invalid_argument",
            ClientError::Configuration(_) => "configuration",
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_kinds() {
        assert!(ClientError::Transport(TransportError::Other("reset".into())).is_retryable());
        assert!(ClientError::decode("wallets", "missing field `data`").is_retryable());
        assert!(!ClientError::InvalidArgument("amount".into()).is_retryable());
        assert!(!ClientError::Api { status: 400, message: "bad".into() }.is_retryable());
        assert!(!ClientError::Auth { status: 401, message: "no".into() }.is_retryable());
    }

    #[test]
    fn server_message_only_for_remote_failures() {
        let err = ClientError::Auth { status: 401, message: "invalid credentials".into() };
        assert_eq!(err.server_message(), Some("invalid credentials"));
        assert_eq!(ClientError::InvalidArgument("x".into()).server_message(), None);
    }
}
