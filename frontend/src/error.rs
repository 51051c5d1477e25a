use shared::ErrorBody;
use thiserror::Error;

pub const NO_RESPONSE_MESSAGE: &str =
    "No response received from server. Please check your internet connection.";

/// Failure of a call to the route API.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("no response received: {0}")]
    Network(String),
    #[error("server responded with status {status}")]
    Server {
        status: u16,
        body: Option<ErrorBody>,
    },
    #[error("could not decode response: {0}")]
    Decode(String),
    #[error("{0}")]
    Request(String),
}

impl ApiError {
    /// Builds a server error from a raw response body. Bodies that are not
    /// the structured error payload are dropped.
    pub fn server(status: u16, raw_body: &str) -> Self {
        Self::Server {
            status,
            body: serde_json::from_str(raw_body).ok(),
        }
    }

    /// Message shown to the user: structured `error`, then `detail`, then
    /// the status code, then the connectivity hint, then the raw message.
    pub fn user_message(&self) -> String {
        match self {
            Self::Server { status, body } => {
                let structured = body.as_ref().and_then(|body| {
                    non_blank(body.error.as_deref()).or_else(|| non_blank(body.detail.as_deref()))
                });
                match structured {
                    Some(message) => message.to_string(),
                    None => format!("Server error: {status}"),
                }
            }
            Self::Network(_) => NO_RESPONSE_MESSAGE.to_string(),
            Self::Decode(_) | Self::Request(_) => self.to_string(),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
