use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body returned by the service alongside a non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize, Error)]
#[error("{error}")]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    /// Extracts the message from a raw response body, if it is an `ApiError`.
    pub fn parse_message(body: &str) -> Option<String> {
        serde_json::from_str::<ApiError>(body)
            .ok()
            .map(|api_error| api_error.error)
            .filter(|message| !message.trim().is_empty())
    }
}
