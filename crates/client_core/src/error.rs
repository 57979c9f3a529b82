use thiserror::Error;

/// Failure taxonomy for a single API call. Passive loads degrade to fallback
/// data on any variant; user-initiated mutations surface `user_message` as an
/// alert instead.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request timed out")]
    Timeout,
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("server rejected request ({status}): {message}")]
    Status { status: u16, message: String },
    #[error("invalid response body: {0}")]
    InvalidBody(String),
}

impl ApiError {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Transport(err.to_string())
        }
    }

    /// The message shown for a failed mutation: the server's own error text
    /// when it sent one, a generic retry prompt otherwise.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { message, .. } => message.clone(),
            _ => "Please try again.".to_string(),
        }
    }

    pub fn is_server_rejection(&self) -> bool {
        matches!(self, ApiError::Status { .. })
    }
}
