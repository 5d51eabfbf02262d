//! Error types shared by the network layer and the views.

/// Message shown when a request does not complete within the configured window.
pub const TIMEOUT_MESSAGE: &str = "Request timeout - please try again";

/// Every failure the backend client can produce.
///
/// The `Display` output is the user-facing message; once an error crosses the
/// request hook only that string survives.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{}", TIMEOUT_MESSAGE)]
    Timeout,

    #[error("{message}")]
    Http { message: String, status: u16 },

    #[error("{0}")]
    Transport(String),

    #[error("Invalid response from server: {0}")]
    InvalidPayload(String),

    #[error("Could not read file: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// Client-side refusal to submit; never reaches the network.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("Enter some text or choose a file first")]
    NothingToSubmit,
}
