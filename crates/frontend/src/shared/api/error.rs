use thiserror::Error;

/// Ошибка обращения к внешнему API
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Failed to serialize request: {0}")]
    Encode(String),
}

impl ApiError {
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        ApiError::Status {
            status,
            message: message.into(),
        }
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(e: gloo_net::Error) -> Self {
        match e {
            gloo_net::Error::SerdeError(e) => ApiError::Decode(e.to_string()),
            other => ApiError::Network(other.to_string()),
        }
    }
}

impl From<serde_qs::Error> for ApiError {
    fn from(e: serde_qs::Error) -> Self {
        ApiError::Encode(e.to_string())
    }
}
